use std::fmt;

use bytes::Bytes;
use serde::Serialize;

/// Successful outcome, shaped by the deployment's integration mode.
#[derive(Debug, Clone, PartialEq)]
pub enum RedactionResult {
    Descriptor(JobDescriptor),
    Payload(ProcessedPayload),
}

impl RedactionResult {
    pub fn job_id(&self) -> Option<&str> {
        match self {
            RedactionResult::Descriptor(d) => Some(&d.job_id),
            RedactionResult::Payload(_) => None,
        }
    }
}

/// Server-side job record; previews and downloads are fetched by `job_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDescriptor {
    pub job_id: String,
    pub processing_time_seconds: Option<f64>,
    pub consent_level: Option<String>,
    pub redaction_level: Option<String>,
    pub custom_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedPayload {
    pub bytes: Bytes,
    pub file_name: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// No response was received.
    Transport,
    /// Non-success status.
    Server { status: u16 },
    /// Success status with an undecodable body.
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => f.write_str("transport failure"),
            FailureKind::Server { status } => write!(f, "server failure (status {status})"),
            FailureKind::MalformedResponse => f.write_str("malformed response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
