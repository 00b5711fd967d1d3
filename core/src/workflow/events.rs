use crate::result::{Failure, FAILURE_NOTICE, SUCCESS_NOTICE};

use super::state::WorkflowState;

/// Observer-facing events. `core` stays UI-agnostic: the CLI renders these,
/// nothing in `core` depends on how.
#[derive(Debug, Clone)]
pub enum WorkflowEvent {
    StateChanged(WorkflowState),
    Progress(f64),
    Notice(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub description: String,
}

impl Notice {
    pub(crate) fn redaction_complete() -> Self {
        Self {
            level: NoticeLevel::Success,
            title: SUCCESS_NOTICE,
            description: "Your document has been successfully redacted and is ready for preview/download."
                .into(),
        }
    }

    /// Carries the classified reason, not just the server message.
    pub(crate) fn redaction_failed(failure: &Failure) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: FAILURE_NOTICE,
            description: failure.to_string(),
        }
    }

    pub(crate) fn download_started() -> Self {
        Self {
            level: NoticeLevel::Info,
            title: "Download Started",
            description: "Your protected file is downloading now.".into(),
        }
    }
}
