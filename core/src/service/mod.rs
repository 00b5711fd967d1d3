//! Collaborator seams. HTTP implementations live in `deid-plugins`.
mod services;
pub mod r#trait;
mod types;

pub use r#trait::{ArtifactFetcher, HistoryService, RedactionService};
pub use services::{Services, ServicesFactory};
pub use types::{FetchedArtifact, RedactionRequest, ServiceResponse};
