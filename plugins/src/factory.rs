use std::sync::Arc;

use deid_core::api::{ArtifactFetcher, Endpoints, HistoryService, RedactionService};
use reqwest::Client;

use crate::http::{HttpArtifactFetcher, HttpHistoryService, HttpRedactionService};

// Client is a handle over one connection pool; callers pass clones of it.

pub fn build_redaction(client: Client, endpoints: Endpoints) -> Arc<dyn RedactionService> {
    Arc::new(HttpRedactionService::new(client, endpoints))
}

pub fn build_history(client: Client, endpoints: Endpoints) -> Arc<dyn HistoryService> {
    Arc::new(HttpHistoryService::new(client, endpoints))
}

pub fn build_fetcher(client: Client, endpoints: Endpoints) -> Arc<dyn ArtifactFetcher> {
    Arc::new(HttpArtifactFetcher::new(client, endpoints))
}
