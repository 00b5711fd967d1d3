//! Response reconciliation and result presentation.
mod decode;
mod presenter;
mod types;

pub use decode::{decode, server_failure, transport_failure, DEFAULT_SERVER_MESSAGE, PAYLOAD_NAME_PREFIX};
pub use presenter::{
    present, preview_pair, status_panel, Presentation, Preview, PreviewPair, PreviewSource,
    StatusPanel, SummaryLine, FAILURE_NOTICE, SUCCESS_NOTICE,
};
pub use types::{Failure, FailureKind, JobDescriptor, ProcessedPayload, RedactionResult};
