// core/src/errors/history_error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to fetch history (status {status})")]
    Status { status: u16 },

    #[error("Error fetching history: {0}")]
    Transport(#[source] anyhow::Error),

    #[error("Error decoding history: {0}")]
    Decode(#[source] anyhow::Error),
}
