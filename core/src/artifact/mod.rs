//! Input artifact and the file selector that guards it.
mod media;
mod selector;

pub use media::MediaType;
pub use selector::{Artifact, Candidate, FileSelector, DEFAULT_MAX_FILE_BYTES};
