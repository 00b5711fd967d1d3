use std::fmt;

use crate::progress::COMPLETE;
use crate::result::{Failure, RedactionResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Submitting {
        progress: f64,
    },
    Succeeded(RedactionResult),
    Failed(Failure),
}

impl WorkflowState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowState::Submitting { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Succeeded(_) | WorkflowState::Failed(_))
    }

    pub fn result(&self) -> Option<&RedactionResult> {
        match self {
            WorkflowState::Succeeded(r) => Some(r),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            WorkflowState::Failed(f) => Some(f),
            _ => None,
        }
    }

    /// Displayed progress; `None` when no bar is shown.
    pub fn progress(&self) -> Option<f64> {
        match self {
            WorkflowState::Submitting { progress } => Some(*progress),
            WorkflowState::Succeeded(_) => Some(COMPLETE),
            WorkflowState::Idle | WorkflowState::Failed(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Submitting { .. } => "submitting",
            WorkflowState::Succeeded(_) => "succeeded",
            WorkflowState::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The request settled; carries the terminal state.
    Settled(WorkflowState),
    /// A submission was already in flight; nothing changed.
    Ignored,
}
