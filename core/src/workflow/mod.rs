//! Redaction workflow: session ownership, submission, settlement.
mod controller;
mod events;
mod request;
mod state;

pub use controller::{ControllerArgs, DownloadAction, RedactionController, Snapshot};
pub use events::{Notice, NoticeLevel, WorkflowEvent};
pub use request::{build_request, FIELD_CONSENT_LEVEL, FIELD_CUSTOM_TYPES, FIELD_REDACTION_LEVEL};
pub use state::{SubmitOutcome, WorkflowState};
