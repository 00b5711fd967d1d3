// core/src/service/trait.rs
use async_trait::async_trait;

use crate::endpoints::ArtifactRef;
use crate::errors::{HistoryError, TransportError};
use crate::history::HistoryEntry;

use super::{FetchedArtifact, RedactionRequest, ServiceResponse};

#[async_trait]
pub trait RedactionService: Send + Sync {
    /// Returns `Err` only when no response was received at all.
    async fn redact(&self, req: RedactionRequest) -> Result<ServiceResponse, TransportError>;
}

#[async_trait]
pub trait HistoryService: Send + Sync {
    /// Entries in server order (oldest first).
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
}

#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    async fn fetch(&self, target: &ArtifactRef) -> Result<FetchedArtifact, TransportError>;
}
