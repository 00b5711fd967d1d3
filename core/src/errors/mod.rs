mod config_error;
mod history_error;
mod select_error;
mod transport_error;
mod workflow_error;

pub use config_error::ConfigError;
pub use history_error::HistoryError;
pub use select_error::SelectError;
pub use transport_error::TransportError;
pub use workflow_error::WorkflowError;
