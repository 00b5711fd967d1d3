//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `deid_core::api` instead of reaching into internal modules.

pub use crate::artifact::{Artifact, Candidate, FileSelector, MediaType};
pub use crate::config::{
    load, AppConfig, HistoryConfig, IntegrationMode, LoggingConfig, ProgressConfig,
    ServiceConfig, UploadConfig,
};
pub use crate::configuration::RedactionConfiguration;
pub use crate::endpoints::{ArtifactRef, Endpoints, PreviewKind};
pub use crate::errors::{ConfigError, HistoryError, SelectError, TransportError, WorkflowError};
pub use crate::history::{
    Compliance, DashboardSummary, HistoryEntry, HistoryLoad, HistoryStats, HistoryView, JobStatus,
    StatusFilter,
};
pub use crate::progress::{ProgressEstimator, ProgressModel};
pub use crate::readiness::{blockers, ready, Blocker};
pub use crate::result::{
    present, status_panel, Failure, FailureKind, JobDescriptor, Presentation, PreviewPair,
    PreviewSource, ProcessedPayload, RedactionResult, StatusPanel,
};
pub use crate::service::{
    ArtifactFetcher, FetchedArtifact, HistoryService, RedactionRequest, RedactionService,
    ServiceResponse, Services, ServicesFactory,
};
pub use crate::vocabulary::{ConsentTier, EntityCategory, RedactionScope};
pub use crate::workflow::{
    ControllerArgs, DownloadAction, Notice, NoticeLevel, RedactionController, Snapshot,
    SubmitOutcome, WorkflowEvent, WorkflowState,
};
