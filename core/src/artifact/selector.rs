use std::path::Path;

use bytes::Bytes;

use super::media::MediaType;
use crate::errors::SelectError;

pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// A file offered to the selector (drop, picker, or path on disk).
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    /// MIME type as declared by the source, if any.
    pub declared_type: Option<String>,
    pub bytes: Bytes,
}

impl Candidate {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_declared_type(mut self, mime: impl Into<String>) -> Self {
        self.declared_type = Some(mime.into());
        self
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, SelectError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| SelectError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }
}

/// The accepted input. Replaced wholesale on re-selection, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    bytes: Bytes,
    media_type: MediaType,
    size: u64,
    name: String,
}

impl Artifact {
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_image(&self) -> bool {
        self.media_type.is_image()
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == MediaType::Pdf
    }

    pub fn size_display(&self) -> String {
        format!("{:.2} MB", self.size as f64 / (1024.0 * 1024.0))
    }
}

#[derive(Debug, Clone)]
pub struct FileSelector {
    current: Option<Artifact>,
    max_file_bytes: u64,
    disabled: bool,
}

impl Default for FileSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_BYTES)
    }
}

impl FileSelector {
    pub fn new(max_file_bytes: u64) -> Self {
        Self {
            current: None,
            max_file_bytes,
            disabled: false,
        }
    }

    pub fn current(&self) -> Option<&Artifact> {
        self.current.as_ref()
    }

    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_bytes
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Validate a candidate without touching the current selection.
    pub fn validate(&self, candidate: &Candidate) -> Result<Artifact, SelectError> {
        let by_name = MediaType::from_file_name(&candidate.name);
        let by_mime = candidate.declared_type.as_deref().map(MediaType::from_mime);

        let media_type = match (by_name, by_mime) {
            (Some(t), None) => t,
            (Some(t), Some(Some(_))) => t,
            _ => {
                return Err(SelectError::UnsupportedType {
                    name: candidate.name.clone(),
                })
            }
        };

        let size = candidate.bytes.len() as u64;
        if size > self.max_file_bytes {
            return Err(SelectError::OversizedFile {
                size,
                limit: self.max_file_bytes,
            });
        }

        Ok(Artifact {
            bytes: candidate.bytes.clone(),
            media_type,
            size,
            name: candidate.name.clone(),
        })
    }

    pub fn select(&mut self, candidate: Candidate) -> Result<Artifact, SelectError> {
        if self.disabled {
            return Err(SelectError::Disabled);
        }
        let artifact = self.validate(&candidate)?;
        tracing::debug!(
            target: "deid.selector",
            name = %artifact.name,
            media_type = %artifact.media_type,
            size = artifact.size,
            "artifact selected"
        );
        self.current = Some(artifact.clone());
        Ok(artifact)
    }

    /// Only the first candidate of a multi-file drop is considered.
    pub fn select_first(
        &mut self,
        candidates: impl IntoIterator<Item = Candidate>,
    ) -> Result<Artifact, SelectError> {
        let mut iter = candidates.into_iter();
        let first = iter.next().ok_or(SelectError::Empty)?;
        let discarded = iter.count();
        if discarded > 0 {
            tracing::debug!(target: "deid.selector", discarded, "extra dropped files ignored");
        }
        self.select(first)
    }

    pub fn remove(&mut self) -> Result<Option<Artifact>, SelectError> {
        if self.disabled {
            return Err(SelectError::Disabled);
        }
        Ok(self.current.take())
    }
}
