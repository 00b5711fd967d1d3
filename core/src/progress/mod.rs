//! Simulated progress while the redaction request is in flight.
mod model;
mod ticker;

pub use model::{ProgressModel, COMPLETE};
pub use ticker::ProgressEstimator;
