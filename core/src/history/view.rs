use std::fmt;
use std::str::FromStr;

use super::types::{HistoryEntry, JobStatus};
use crate::service::HistoryService;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Processing,
    Failed,
}

impl StatusFilter {
    /// Entries without a status only pass `All`.
    pub fn matches(self, status: Option<JobStatus>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => status == Some(JobStatus::Completed),
            StatusFilter::Processing => status == Some(JobStatus::Processing),
            StatusFilter::Failed => status == Some(JobStatus::Failed),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Completed),
            "processing" => Ok(StatusFilter::Processing),
            "failed" => Ok(StatusFilter::Failed),
            other => Err(format!(
                "unknown status filter '{other}' (expected all, completed, processing or failed)"
            )),
        }
    }
}

/// Loading is the pending `activate` future; there is no stored state for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum HistoryLoad {
    #[default]
    Idle,
    /// Newest first.
    Loaded(Vec<HistoryEntry>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStats {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub average_processing_seconds: f64,
}

impl fmt::Display for HistoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total {}  completed {}  failed {}  avg {:.2}s",
            self.total, self.completed, self.failed, self.average_processing_seconds
        )
    }
}

/// Missing processing times count as zero.
fn average_processing<'a>(entries: impl IntoIterator<Item = &'a HistoryEntry>) -> f64 {
    let (sum, n) = entries.into_iter().fold((0.0, 0usize), |(sum, n), e| {
        (sum + e.processing_time_seconds.unwrap_or(0.0), n + 1)
    });
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compliance {
    Compliant,
    AttentionNeeded,
}

impl fmt::Display for Compliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compliance::Compliant => f.write_str("Compliant"),
            Compliance::AttentionNeeded => f.write_str("Attention Needed"),
        }
    }
}

/// Recent-activity card. Figures cover the recent window only.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub recent: Vec<HistoryEntry>,
    pub total: usize,
    pub average_processing_seconds: f64,
    pub compliance: Compliance,
}

impl DashboardSummary {
    pub fn from_entries(newest_first: &[HistoryEntry], recent_limit: usize) -> Self {
        let recent: Vec<HistoryEntry> = newest_first.iter().take(recent_limit).cloned().collect();
        let compliance = if recent.iter().all(|e| e.processing_time_seconds.is_some()) {
            Compliance::Compliant
        } else {
            Compliance::AttentionNeeded
        };
        Self {
            total: recent.len(),
            average_processing_seconds: average_processing(&recent),
            compliance,
            recent,
        }
    }
}

/// History list with local, non-persistent filters. Refresh is re-activation.
#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    load: HistoryLoad,
    search: String,
    status: StatusFilter,
}

impl HistoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// One fetch per call; failures are kept as an inline message.
    pub async fn activate(&mut self, service: &dyn HistoryService) -> &HistoryLoad {
        self.load = match service.fetch_history().await {
            Ok(mut entries) => {
                entries.reverse();
                tracing::debug!(target: "deid.history", count = entries.len(), "history loaded");
                HistoryLoad::Loaded(entries)
            }
            Err(e) => {
                tracing::warn!(target: "deid.history", error = %e, "history fetch failed");
                HistoryLoad::Error(e.to_string())
            }
        };
        &self.load
    }

    pub fn load(&self) -> &HistoryLoad {
        &self.load
    }

    pub fn error(&self) -> Option<&str> {
        match &self.load {
            HistoryLoad::Error(m) => Some(m),
            _ => None,
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        match &self.load {
            HistoryLoad::Loaded(v) => v,
            _ => &[],
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.status = status;
    }

    pub fn filtered(&self) -> Vec<&HistoryEntry> {
        let needle = self.search.to_lowercase();
        self.entries()
            .iter()
            .filter(|e| e.file_name.to_lowercase().contains(&needle))
            .filter(|e| self.status.matches(e.status))
            .collect()
    }

    pub fn stats(&self) -> HistoryStats {
        let rows = self.filtered();
        HistoryStats {
            total: rows.len(),
            completed: rows
                .iter()
                .filter(|e| e.status == Some(JobStatus::Completed))
                .count(),
            failed: rows
                .iter()
                .filter(|e| e.status == Some(JobStatus::Failed))
                .count(),
            average_processing_seconds: average_processing(rows.iter().copied()),
        }
    }

    pub fn dashboard(&self, recent_limit: usize) -> DashboardSummary {
        DashboardSummary::from_entries(self.entries(), recent_limit)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::HistoryError;

    fn entry(id: &str, file: &str, status: Option<JobStatus>, t: Option<f64>) -> HistoryEntry {
        HistoryEntry {
            id: id.into(),
            file_name: file.into(),
            timestamp: None,
            processing_time_seconds: t,
            status,
        }
    }

    struct Fixed(Vec<HistoryEntry>);

    #[async_trait]
    impl HistoryService for Fixed {
        async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
            Ok(self.0.clone())
        }
    }

    struct Down;

    #[async_trait]
    impl HistoryService for Down {
        async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
            Err(HistoryError::Status { status: 503 })
        }
    }

    fn server_order() -> Vec<HistoryEntry> {
        vec![
            entry("1", "Intake-Form.pdf", Some(JobStatus::Completed), Some(2.0)),
            entry("2", "xray.png", Some(JobStatus::Failed), None),
            entry("3", "discharge_summary.PDF", Some(JobStatus::Processing), Some(4.0)),
            entry("4", "notes.pdf", None, Some(1.0)),
        ]
    }

    #[tokio::test]
    async fn activation_lists_newest_first() {
        let mut view = HistoryView::new();
        view.activate(&Fixed(server_order())).await;
        let ids: Vec<_> = view.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "3", "2", "1"]);
    }

    #[tokio::test]
    async fn failure_is_inline_error() {
        let mut view = HistoryView::new();
        let load = view.activate(&Down).await.clone();
        assert_eq!(load, HistoryLoad::Error("Failed to fetch history (status 503)".into()));
        assert!(view.entries().is_empty());
        assert_eq!(view.error(), Some("Failed to fetch history (status 503)"));
    }

    #[tokio::test]
    async fn reactivation_replaces_previous_error() {
        let mut view = HistoryView::new();
        assert_eq!(view.load(), &HistoryLoad::Idle);

        view.activate(&Down).await;
        assert!(view.error().is_some());

        view.activate(&Fixed(server_order())).await;
        assert_eq!(view.error(), None);
        assert_eq!(view.entries().len(), 4);
    }

    #[tokio::test]
    async fn filters_combine_search_and_status() {
        let mut view = HistoryView::new();
        view.activate(&Fixed(server_order())).await;

        view.set_search("PDF");
        assert_eq!(view.filtered().len(), 3);

        view.set_status_filter(StatusFilter::Completed);
        let ids: Vec<_> = view.filtered().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);

        view.set_search("");
        view.set_status_filter(StatusFilter::Failed);
        assert_eq!(view.filtered().len(), 1);

        // no status only passes All
        view.set_status_filter(StatusFilter::All);
        assert!(view.filtered().iter().any(|e| e.id == "4"));
    }

    #[tokio::test]
    async fn stats_over_filtered_rows() {
        let mut view = HistoryView::new();
        view.activate(&Fixed(server_order())).await;
        let stats = view.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.average_processing_seconds, 7.0 / 4.0);
        assert_eq!(stats.to_string(), "total 4  completed 1  failed 1  avg 1.75s");

        view.set_search("nothing-matches");
        assert_eq!(view.stats().average_processing_seconds, 0.0);
    }

    #[test]
    fn dashboard_window_and_compliance() {
        let mut entries = Vec::new();
        for i in 0..7 {
            entries.push(entry(&i.to_string(), "f.pdf", Some(JobStatus::Completed), Some(1.0)));
        }
        let s = DashboardSummary::from_entries(&entries, 5);
        assert_eq!(s.total, 5);
        assert_eq!(s.compliance, Compliance::Compliant);
        assert_eq!(s.average_processing_seconds, 1.0);

        entries[2].processing_time_seconds = None;
        let s = DashboardSummary::from_entries(&entries, 5);
        assert_eq!(s.compliance.to_string(), "Attention Needed");
        assert_eq!(s.average_processing_seconds, 4.0 / 5.0);

        let empty = DashboardSummary::from_entries(&[], 5);
        assert_eq!(empty.compliance, Compliance::Compliant);
        assert_eq!(empty.average_processing_seconds, 0.0);
    }

    #[test]
    fn status_filter_parses() {
        assert_eq!("Failed".parse::<StatusFilter>(), Ok(StatusFilter::Failed));
        assert!("done".parse::<StatusFilter>().is_err());
    }
}
