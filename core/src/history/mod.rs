//! Past jobs: history list, local filters, dashboard summary.
mod types;
mod view;

pub use types::{HistoryEntry, JobStatus};
pub use view::{
    Compliance, DashboardSummary, HistoryLoad, HistoryStats, HistoryView, StatusFilter,
};
