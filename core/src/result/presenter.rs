//! Pure rendering over [`WorkflowState`]. Nothing here mutates the session.

use std::fmt;

use crate::artifact::Artifact;
use crate::endpoints::{Endpoints, PreviewKind};
use crate::workflow::WorkflowState;

use super::types::{FailureKind, RedactionResult};

pub const SUCCESS_NOTICE: &str = "Redaction Complete!";
pub const FAILURE_NOTICE: &str = "Redaction Failed";

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewSource {
    /// Server-side artifact fetched by URL.
    Reference { url: String },
    /// The locally held input artifact.
    Local { name: String },
    /// The processed bytes already held in memory.
    Held { file_name: String, size: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub title: &'static str,
    pub caption: Option<&'static str>,
    pub source: PreviewSource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewPair {
    pub original: Preview,
    pub processed: Preview,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    Success {
        banner: &'static str,
        summary: Vec<SummaryLine>,
        previews: Option<PreviewPair>,
        download_label: &'static str,
    },
    Failure {
        title: &'static str,
        kind: FailureKind,
        message: String,
    },
}

pub fn preview_pair(
    result: &RedactionResult,
    artifact: Option<&Artifact>,
    endpoints: &Endpoints,
) -> Option<PreviewPair> {
    match result {
        RedactionResult::Descriptor(d) => Some(PreviewPair {
            original: Preview {
                title: "Original",
                caption: None,
                source: PreviewSource::Reference {
                    url: endpoints.preview(&d.job_id, PreviewKind::Original),
                },
            },
            processed: Preview {
                title: "Redacted",
                caption: None,
                source: PreviewSource::Reference {
                    url: endpoints.preview(&d.job_id, PreviewKind::Redacted),
                },
            },
        }),
        RedactionResult::Payload(p) => {
            let artifact = artifact?;
            let image = artifact.is_image();
            Some(PreviewPair {
                original: Preview {
                    title: "Original",
                    caption: Some(if image { "Original Image" } else { "Original PDF" }),
                    source: PreviewSource::Local {
                        name: artifact.name().to_string(),
                    },
                },
                processed: Preview {
                    title: "Deidentified",
                    caption: Some(if image { "Protected Image" } else { "Protected PDF" }),
                    source: PreviewSource::Held {
                        file_name: p.file_name.clone(),
                        size: p.bytes.len() as u64,
                    },
                },
            })
        }
    }
}

pub fn present(
    state: &WorkflowState,
    artifact: Option<&Artifact>,
    endpoints: &Endpoints,
) -> Option<Presentation> {
    match state {
        WorkflowState::Succeeded(result) => Some(success(result, artifact, endpoints)),
        WorkflowState::Failed(f) => Some(Presentation::Failure {
            title: FAILURE_NOTICE,
            kind: f.kind,
            message: f.message.clone(),
        }),
        WorkflowState::Idle | WorkflowState::Submitting { .. } => None,
    }
}

fn success(result: &RedactionResult, artifact: Option<&Artifact>, endpoints: &Endpoints) -> Presentation {
    let previews = preview_pair(result, artifact, endpoints);
    match result {
        RedactionResult::Descriptor(d) => {
            let mut summary = Vec::new();
            if let Some(v) = &d.consent_level {
                summary.push(SummaryLine {
                    label: "Consent Level",
                    value: v.clone(),
                });
            }
            if let Some(v) = &d.redaction_level {
                summary.push(SummaryLine {
                    label: "Redaction Level",
                    value: v.clone(),
                });
            }
            if let Some(t) = d.processing_time_seconds {
                summary.push(SummaryLine {
                    label: "Processing Time",
                    value: format!("{t:.2} seconds"),
                });
            }
            if !d.custom_types.is_empty() {
                summary.push(SummaryLine {
                    label: "Custom Entities",
                    value: d.custom_types.join(", "),
                });
            }
            Presentation::Success {
                banner: "Redaction Complete",
                summary,
                previews,
                download_label: "Download Protected Document",
            }
        }
        RedactionResult::Payload(p) => Presentation::Success {
            banner: "Privacy Protected",
            summary: vec![SummaryLine {
                label: "File",
                value: p.file_name.clone(),
            }],
            previews,
            download_label: "Download Protected File",
        },
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Presentation::Failure {
                title,
                kind,
                message,
            } => write!(f, "{title} ({kind}): {message}"),
            Presentation::Success {
                banner,
                summary,
                previews,
                download_label,
            } => {
                writeln!(f, "{banner}")?;
                for line in summary {
                    writeln!(f, "  {}: {}", line.label, line.value)?;
                }
                if let Some(p) = previews {
                    for preview in [&p.original, &p.processed] {
                        write!(f, "  {}: ", preview.title)?;
                        match &preview.source {
                            PreviewSource::Reference { url } => writeln!(f, "{url}")?,
                            PreviewSource::Local { name } => writeln!(f, "{name}")?,
                            PreviewSource::Held { file_name, size } => {
                                writeln!(f, "{file_name} ({size} bytes)")?
                            }
                        }
                    }
                }
                write!(f, "[{download_label}]")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusPanel {
    pub title: &'static str,
    pub description: String,
    pub progress: Option<f64>,
}

pub fn status_panel(state: &WorkflowState) -> Option<StatusPanel> {
    match state {
        WorkflowState::Idle => None,
        WorkflowState::Submitting { progress } => Some(StatusPanel {
            title: "Processing your file...",
            description: "AI is analyzing and removing personal information".into(),
            progress: Some(*progress),
        }),
        WorkflowState::Succeeded(_) => Some(StatusPanel {
            title: "Processing complete!",
            description: "Your file has been safely deidentified".into(),
            progress: Some(crate::progress::COMPLETE),
        }),
        WorkflowState::Failed(failure) => Some(StatusPanel {
            title: "Processing failed",
            description: if failure.message.is_empty() {
                "There was an error processing your file".into()
            } else {
                failure.message.clone()
            },
            progress: None,
        }),
    }
}

impl fmt::Display for StatusPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title, self.description)?;
        if let Some(p) = self.progress {
            write!(f, " ({p:.0}%)")?;
        }
        Ok(())
    }
}
