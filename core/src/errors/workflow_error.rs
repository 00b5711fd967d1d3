// core/src/errors/workflow_error.rs
use thiserror::Error;

use crate::readiness::Blocker;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("submission blocked: {}", describe(.blockers))]
    ValidationBlocked { blockers: Vec<Blocker> },

    #[error("no redaction result is available")]
    NotSucceeded,
}

fn describe(blockers: &[Blocker]) -> String {
    blockers
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
