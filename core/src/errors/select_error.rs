// core/src/errors/select_error.rs
use thiserror::Error;

/// Client-side rejection of a candidate artifact. Never reaches the network.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("unsupported file type: {name} (supported: PDF, PNG, JPG, JPEG, GIF, BMP, WEBP)")]
    UnsupportedType { name: String },

    #[error("file too large: {size} bytes (max {limit} bytes)")]
    OversizedFile { size: u64, limit: u64 },

    #[error("no file provided")]
    Empty,

    #[error("file selection is disabled while a submission is in flight")]
    Disabled,

    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
