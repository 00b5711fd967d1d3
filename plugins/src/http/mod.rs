//! reqwest-backed collaborators.
pub mod fetcher;
pub mod history;
pub mod redaction;

use std::time::Duration;

use anyhow::{Context, Result};
use deid_core::api::{ServiceConfig, TransportError};
use reqwest::Client;

pub use fetcher::HttpArtifactFetcher;
pub use history::HttpHistoryService;
pub use redaction::HttpRedactionService;

/// Shared client. The timeout is applied only when configured.
pub fn build_client(cfg: &ServiceConfig) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(ms) = cfg.timeout_ms {
        builder = builder.timeout(Duration::from_millis(ms));
    }
    builder.build().context("Failed to create HTTP client")
}

pub(crate) fn transport_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Other(anyhow::Error::new(e))
    }
}

pub(crate) fn content_type(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
