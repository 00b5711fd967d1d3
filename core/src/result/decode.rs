//! Settled response → terminal outcome.
//!
//! The decoder is chosen once from [`IntegrationMode`]; callers never sniff
//! the body to decide between shapes.

use serde::Deserialize;
use serde_json::Value;

use super::types::{Failure, FailureKind, JobDescriptor, ProcessedPayload, RedactionResult};
use crate::config::IntegrationMode;
use crate::errors::TransportError;
use crate::service::ServiceResponse;

pub const DEFAULT_SERVER_MESSAGE: &str = "Redaction failed";
pub const PAYLOAD_NAME_PREFIX: &str = "deidentified-";

#[derive(Debug, Deserialize)]
struct DescriptorWire {
    id: Value,
    #[serde(default)]
    processing_time: Option<f64>,
    #[serde(default)]
    consent_level: Option<String>,
    #[serde(default)]
    redaction_level: Option<String>,
    #[serde(default)]
    custom_types: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorWire {
    #[serde(default)]
    error: Option<String>,
}

pub fn decode(
    mode: IntegrationMode,
    resp: &ServiceResponse,
    artifact_name: &str,
) -> Result<RedactionResult, Failure> {
    if !resp.is_success() {
        return Err(server_failure(resp));
    }
    match mode {
        IntegrationMode::Descriptor => decode_descriptor(resp).map(RedactionResult::Descriptor),
        IntegrationMode::Payload => decode_payload(resp, artifact_name).map(RedactionResult::Payload),
    }
}

pub fn transport_failure(err: &TransportError) -> Failure {
    Failure::new(FailureKind::Transport, err.to_string())
}

/// Message comes from the JSON `error` field when present.
pub fn server_failure(resp: &ServiceResponse) -> Failure {
    let message = serde_json::from_slice::<ErrorWire>(&resp.body)
        .ok()
        .and_then(|w| w.error)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER_MESSAGE.to_string());
    Failure::new(
        FailureKind::Server {
            status: resp.status,
        },
        message,
    )
}

fn malformed(detail: impl std::fmt::Display) -> Failure {
    Failure::new(
        FailureKind::MalformedResponse,
        format!("Malformed response from redaction service: {detail}"),
    )
}

fn decode_descriptor(resp: &ServiceResponse) -> Result<JobDescriptor, Failure> {
    let wire: DescriptorWire = serde_json::from_slice(&resp.body).map_err(malformed)?;
    let job_id = match wire.id {
        Value::String(s) if !s.trim().is_empty() => s,
        Value::Number(n) => n.to_string(),
        other => return Err(malformed(format!("invalid job id {other}"))),
    };
    Ok(JobDescriptor {
        job_id,
        processing_time_seconds: wire.processing_time,
        consent_level: wire.consent_level,
        redaction_level: wire.redaction_level,
        custom_types: custom_types(wire.custom_types),
    })
}

/// Echoed custom types arrive either as an array or as the JSON text we sent.
fn custom_types(v: Option<Value>) -> Vec<String> {
    match v {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|i| match i {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => match serde_json::from_str::<Vec<String>>(&s) {
            Ok(list) => list,
            Err(_) => s
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        },
        _ => Vec::new(),
    }
}

fn decode_payload(resp: &ServiceResponse, artifact_name: &str) -> Result<ProcessedPayload, Failure> {
    if resp.body.is_empty() {
        return Err(malformed("empty body"));
    }
    Ok(ProcessedPayload {
        bytes: resp.body.clone(),
        file_name: format!("{PAYLOAD_NAME_PREFIX}{artifact_name}"),
        content_type: resp.content_type.clone(),
    })
}
