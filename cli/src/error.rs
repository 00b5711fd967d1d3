// cli/src/error.rs
use deid_core::api::{ConfigError, HistoryError, SelectError, TransportError, WorkflowError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("failed to write {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Plugin(#[from] anyhow::Error),
}
