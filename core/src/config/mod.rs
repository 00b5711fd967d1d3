mod load;
mod types;

pub use load::{load, CONFIG_FILE_NAME};
pub use types::*;
