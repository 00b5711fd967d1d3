// core/src/errors/transport_error.rs
use thiserror::Error;

/// The request could not be completed (connection refused, reset, TLS, ...).
///
/// A non-2xx redaction response is *not* a transport error: the service hands
/// the raw status and body back so the controller can classify it. Artifact
/// fetches have no such classification and report the status here.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timeout")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("unexpected status {status}")]
    Status { status: u16 },

    #[error("transport error")]
    Other(#[source] anyhow::Error),
}
