//! Submission readiness gate. Pure; recompute it whenever inputs change.

use std::fmt;

use serde::Serialize;

use crate::artifact::Artifact;
use crate::configuration::RedactionConfiguration;
use crate::vocabulary::RedactionScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Blocker {
    MissingArtifact,
    MissingScope,
    MissingConsentTier,
    AuthorizationNotAcknowledged,
    EmptyCustomEntityTypes,
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Blocker::MissingArtifact => "no document selected",
            Blocker::MissingScope => "redaction level not set",
            Blocker::MissingConsentTier => "consent level not set",
            Blocker::AuthorizationNotAcknowledged => "authorization not confirmed",
            Blocker::EmptyCustomEntityTypes => "custom scope needs at least one entity",
        };
        f.write_str(s)
    }
}

pub fn blockers(artifact: Option<&Artifact>, cfg: &RedactionConfiguration) -> Vec<Blocker> {
    let mut out = Vec::new();
    if artifact.is_none() {
        out.push(Blocker::MissingArtifact);
    }
    if cfg.scope.is_none() {
        out.push(Blocker::MissingScope);
    }
    if cfg.consent_tier.is_none() {
        out.push(Blocker::MissingConsentTier);
    }
    if !cfg.authorization_acknowledged {
        out.push(Blocker::AuthorizationNotAcknowledged);
    }
    if cfg.scope == Some(RedactionScope::Custom) && cfg.custom_entity_types.is_empty() {
        out.push(Blocker::EmptyCustomEntityTypes);
    }
    out
}

pub fn ready(artifact: Option<&Artifact>, cfg: &RedactionConfiguration) -> bool {
    artifact.is_some()
        && cfg.scope.is_some()
        && cfg.consent_tier.is_some()
        && cfg.authorization_acknowledged
        && (cfg.scope != Some(RedactionScope::Custom) || !cfg.custom_entity_types.is_empty())
}
