use serde_json::Value;

use crate::artifact::Artifact;
use crate::configuration::RedactionConfiguration;
use crate::errors::WorkflowError;
use crate::readiness::blockers;
use crate::service::RedactionRequest;

pub const FIELD_REDACTION_LEVEL: &str = "redaction_level";
pub const FIELD_CONSENT_LEVEL: &str = "consent_level";
pub const FIELD_CUSTOM_TYPES: &str = "custom_types";

/// Encode a ready selection as the multipart request. Values go through the
/// vocabulary tables; `custom_types` is sent only for the custom scope.
pub fn build_request(
    artifact: &Artifact,
    cfg: &RedactionConfiguration,
) -> Result<RedactionRequest, WorkflowError> {
    let (Some(scope), Some(tier)) = (cfg.scope, cfg.consent_tier) else {
        return Err(WorkflowError::ValidationBlocked {
            blockers: blockers(Some(artifact), cfg),
        });
    };
    let pending = blockers(Some(artifact), cfg);
    if !pending.is_empty() {
        return Err(WorkflowError::ValidationBlocked { blockers: pending });
    }

    let mut fields = vec![
        (FIELD_REDACTION_LEVEL.to_string(), scope.wire().to_string()),
        (FIELD_CONSENT_LEVEL.to_string(), tier.wire().to_string()),
    ];
    if cfg.is_custom() {
        let tags: Vec<&str> = cfg.custom_entity_types.iter().map(|e| e.tag()).collect();
        fields.push((FIELD_CUSTOM_TYPES.to_string(), Value::from(tags).to_string()));
    }

    Ok(RedactionRequest {
        file_name: artifact.name().to_string(),
        media_type: artifact.media_type(),
        bytes: artifact.bytes().clone(),
        fields,
    })
}
