//! URL layout of the redaction backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    Original,
    Redacted,
}

impl PreviewKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PreviewKind::Original => "original",
            PreviewKind::Redacted => "redacted",
        }
    }
}

impl fmt::Display for PreviewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreviewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "original" => Ok(PreviewKind::Original),
            "redacted" => Ok(PreviewKind::Redacted),
            other => Err(format!("unknown preview kind '{other}'")),
        }
    }
}

/// A server-side artifact addressed by job id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactRef {
    Preview { job_id: String, kind: PreviewKind },
    Download { job_id: String },
}

impl ArtifactRef {
    pub fn job_id(&self) -> &str {
        match self {
            ArtifactRef::Preview { job_id, .. } | ArtifactRef::Download { job_id } => job_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn redact(&self) -> String {
        format!("{}/redact", self.base_url)
    }

    pub fn history(&self) -> String {
        format!("{}/history", self.base_url)
    }

    /// Job ids come from the server and are encoded as one path segment.
    pub fn preview(&self, job_id: &str, kind: PreviewKind) -> String {
        format!(
            "{}/preview/{}?type={}",
            self.base_url,
            urlencoding::encode(job_id),
            kind
        )
    }

    pub fn download(&self, job_id: &str) -> String {
        format!("{}/download/{}", self.base_url, urlencoding::encode(job_id))
    }

    pub fn resolve(&self, r: &ArtifactRef) -> String {
        match r {
            ArtifactRef::Preview { job_id, kind } => self.preview(job_id, *kind),
            ArtifactRef::Download { job_id } => self.download(job_id),
        }
    }
}
