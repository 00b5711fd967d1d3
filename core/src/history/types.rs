use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::endpoints::{Endpoints, PreviewKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Completed,
    Processing,
    Failed,
    Unknown,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Completed => "completed",
            JobStatus::Processing => "processing",
            JobStatus::Failed => "failed",
            JobStatus::Unknown => "unknown",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            JobStatus::Completed => "Completed",
            JobStatus::Processing => "Processing",
            JobStatus::Failed => "Failed",
            JobStatus::Unknown => "Unknown",
        }
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "completed" => JobStatus::Completed,
            "processing" => JobStatus::Processing,
            "failed" => JobStatus::Failed,
            _ => JobStatus::Unknown,
        }
    }
}

impl From<JobStatus> for String {
    fn from(s: JobStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct HistoryEntryWire {
    id: Value,
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    processing_time: Option<f64>,
    #[serde(default)]
    status: Option<JobStatus>,
}

/// One past job as reported by the history endpoint. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "HistoryEntryWire")]
pub struct HistoryEntry {
    pub id: String,
    #[serde(rename = "file")]
    pub file_name: String,
    pub timestamp: Option<String>,
    #[serde(rename = "processing_time")]
    pub processing_time_seconds: Option<f64>,
    pub status: Option<JobStatus>,
}

impl From<HistoryEntryWire> for HistoryEntry {
    fn from(w: HistoryEntryWire) -> Self {
        let id = match w.id {
            Value::String(s) => s,
            other => other.to_string(),
        };
        Self {
            id,
            file_name: w.file.unwrap_or_default(),
            timestamp: w.timestamp,
            processing_time_seconds: w.processing_time,
            status: w.status,
        }
    }
}

impl HistoryEntry {
    fn parsed(&self) -> Option<NaiveDateTime> {
        let ts = self.timestamp.as_deref()?.trim();
        DateTime::parse_from_rfc3339(ts)
            .map(|d| d.naive_local())
            .or_else(|_| NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
    }

    /// `YYYY-MM-DD`; falls back to the text before `T`.
    pub fn date(&self) -> Option<String> {
        if let Some(dt) = self.parsed() {
            return Some(dt.format("%Y-%m-%d").to_string());
        }
        let ts = self.timestamp.as_deref()?;
        ts.split('T').next().map(str::to_string)
    }

    /// `HH:MM:SS` without fractional seconds.
    pub fn time(&self) -> Option<String> {
        if let Some(dt) = self.parsed() {
            return Some(dt.format("%H:%M:%S").to_string());
        }
        let ts = self.timestamp.as_deref()?;
        let rest = ts.split('T').nth(1)?;
        rest.split('.').next().map(str::to_string)
    }

    pub fn display_timestamp(&self) -> String {
        match (self.date(), self.time()) {
            (Some(d), Some(t)) => format!("{d} {t}"),
            (Some(d), None) => d,
            _ => "-".to_string(),
        }
    }

    pub fn preview_url(&self, endpoints: &Endpoints, kind: PreviewKind) -> String {
        endpoints.preview(&self.id, kind)
    }

    pub fn download_url(&self, endpoints: &Endpoints) -> String {
        endpoints.download(&self.id)
    }
}
