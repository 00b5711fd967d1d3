use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use bytes::Bytes;
use tokio::sync::mpsc;

use super::events::{Notice, WorkflowEvent};
use super::request::build_request;
use super::state::{SubmitOutcome, WorkflowState};
use crate::artifact::{Artifact, Candidate, FileSelector};
use crate::config::{AppConfig, IntegrationMode, ProgressConfig};
use crate::configuration::RedactionConfiguration;
use crate::endpoints::Endpoints;
use crate::errors::{SelectError, WorkflowError};
use crate::progress::{ProgressEstimator, COMPLETE};
use crate::readiness::{self, Blocker};
use crate::result::{self, Presentation, PreviewPair, RedactionResult, StatusPanel};
use crate::service::RedactionService;
use crate::vocabulary::{ConsentTier, EntityCategory, RedactionScope};

/// What `download()` asks the front-end to do.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadAction {
    /// Open the server-side reference (descriptor mode).
    OpenReference { url: String },
    /// Write the held bytes, unmodified (payload mode).
    Materialize { file_name: String, bytes: Bytes },
}

/// Point-in-time copy of the session for rendering.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub artifact: Option<Artifact>,
    pub configuration: RedactionConfiguration,
    pub state: WorkflowState,
    pub progress: f64,
    pub ready: bool,
    pub blockers: Vec<Blocker>,
    pub selector_disabled: bool,
}

pub struct ControllerArgs {
    pub service: Arc<dyn RedactionService>,
    pub endpoints: Endpoints,
    pub mode: IntegrationMode,
    pub progress: ProgressConfig,
    pub max_file_bytes: u64,
    pub event_tx: Option<mpsc::UnboundedSender<WorkflowEvent>>,
}

impl ControllerArgs {
    pub fn from_config(
        cfg: &AppConfig,
        service: Arc<dyn RedactionService>,
        event_tx: Option<mpsc::UnboundedSender<WorkflowEvent>>,
    ) -> Self {
        Self {
            service,
            endpoints: Endpoints::new(&cfg.service.base_url),
            mode: cfg.service.mode,
            progress: cfg.progress.clone(),
            max_file_bytes: cfg.upload.max_file_bytes,
            event_tx,
        }
    }
}

#[derive(Debug)]
struct Session {
    selector: FileSelector,
    configuration: RedactionConfiguration,
    state: WorkflowState,
    progress: f64,
}

struct Inner {
    session: Mutex<Session>,
    service: Arc<dyn RedactionService>,
    endpoints: Endpoints,
    mode: IntegrationMode,
    progress_cfg: ProgressConfig,
    event_tx: Option<mpsc::UnboundedSender<WorkflowEvent>>,
    in_flight: AtomicUsize,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, event: WorkflowEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event);
        }
    }

    fn transition(&self, s: &mut Session, next: WorkflowState) {
        if s.state == next {
            return;
        }
        tracing::debug!(target: "deid.workflow", from = s.state.name(), to = next.name(), "state");
        s.state = next;
        self.emit(WorkflowEvent::StateChanged(s.state.clone()));
    }

    fn on_tick(&self, value: f64) {
        let mut s = self.lock();
        if let WorkflowState::Submitting { progress } = &mut s.state {
            if value > *progress {
                *progress = value;
                s.progress = value;
                self.emit(WorkflowEvent::Progress(value));
            }
        }
    }

    /// Any accepted artifact change drops the held result and the settings.
    fn artifact_changed(&self, s: &mut Session) {
        s.configuration.reset();
        s.progress = 0.0;
        self.transition(s, WorkflowState::Idle);
    }
}

/// In-flight bookkeeping for one `submit`. If the future is dropped before
/// settlement the session returns to Idle with its inputs intact.
struct Submission<'a> {
    inner: &'a Inner,
    settled: bool,
}

impl<'a> Submission<'a> {
    fn begin(inner: &'a Inner) -> Self {
        inner.in_flight.fetch_add(1, Ordering::SeqCst);
        Self {
            inner,
            settled: false,
        }
    }

    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.settled {
            return;
        }
        tracing::warn!(target: "deid.workflow", "submission abandoned before settlement");
        let mut s = self.inner.lock();
        s.selector.set_disabled(false);
        s.progress = 0.0;
        self.inner.transition(&mut s, WorkflowState::Idle);
    }
}

/// Owns one redaction session. Cheap to clone; clones share the session.
#[derive(Clone)]
pub struct RedactionController {
    inner: Arc<Inner>,
}

impl RedactionController {
    pub fn new(args: ControllerArgs) -> Self {
        Self {
            inner: Arc::new(Inner {
                session: Mutex::new(Session {
                    selector: FileSelector::new(args.max_file_bytes),
                    configuration: RedactionConfiguration::default(),
                    state: WorkflowState::Idle,
                    progress: 0.0,
                }),
                service: args.service,
                endpoints: args.endpoints,
                mode: args.mode,
                progress_cfg: args.progress,
                event_tx: args.event_tx,
                in_flight: AtomicUsize::new(0),
            }),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    pub fn mode(&self) -> IntegrationMode {
        self.inner.mode
    }

    // ---- file selector ----

    pub fn select(&self, candidate: Candidate) -> Result<Artifact, SelectError> {
        let mut s = self.inner.lock();
        let artifact = s.selector.select(candidate)?;
        self.inner.artifact_changed(&mut s);
        Ok(artifact)
    }

    pub fn select_first(
        &self,
        candidates: impl IntoIterator<Item = Candidate>,
    ) -> Result<Artifact, SelectError> {
        let mut s = self.inner.lock();
        let artifact = s.selector.select_first(candidates)?;
        self.inner.artifact_changed(&mut s);
        Ok(artifact)
    }

    pub fn remove_artifact(&self) -> Result<Option<Artifact>, SelectError> {
        let mut s = self.inner.lock();
        let removed = s.selector.remove()?;
        if removed.is_some() {
            self.inner.artifact_changed(&mut s);
        }
        Ok(removed)
    }

    // ---- configuration panel ----

    fn configure<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut RedactionConfiguration) -> bool,
    {
        let mut s = self.inner.lock();
        if s.state.is_submitting() {
            tracing::debug!(target: "deid.workflow", "configuration locked while submitting");
            return false;
        }
        f(&mut s.configuration)
    }

    pub fn set_scope(&self, scope: RedactionScope) -> bool {
        self.configure(|c| {
            c.set_scope(scope);
            true
        })
    }

    pub fn set_consent_tier(&self, tier: ConsentTier) -> bool {
        self.configure(|c| {
            c.set_consent_tier(tier);
            true
        })
    }

    pub fn set_authorization_acknowledged(&self, acknowledged: bool) -> bool {
        self.configure(|c| {
            c.set_authorization_acknowledged(acknowledged);
            true
        })
    }

    pub fn add_entity_type(&self, entity: EntityCategory) -> bool {
        self.configure(|c| c.add_entity_type(entity))
    }

    pub fn remove_entity_type(&self, entity: EntityCategory) -> bool {
        self.configure(|c| c.remove_entity_type(entity))
    }

    // ---- reads ----

    pub fn artifact(&self) -> Option<Artifact> {
        self.inner.lock().selector.current().cloned()
    }

    pub fn configuration(&self) -> RedactionConfiguration {
        self.inner.lock().configuration.clone()
    }

    pub fn state(&self) -> WorkflowState {
        self.inner.lock().state.clone()
    }

    pub fn ready(&self) -> bool {
        let s = self.inner.lock();
        readiness::ready(s.selector.current(), &s.configuration)
    }

    pub fn blockers(&self) -> Vec<Blocker> {
        let s = self.inner.lock();
        readiness::blockers(s.selector.current(), &s.configuration)
    }

    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Snapshot {
        let s = self.inner.lock();
        let blockers = readiness::blockers(s.selector.current(), &s.configuration);
        Snapshot {
            artifact: s.selector.current().cloned(),
            configuration: s.configuration.clone(),
            state: s.state.clone(),
            progress: s.progress,
            ready: blockers.is_empty(),
            blockers,
            selector_disabled: s.selector.is_disabled(),
        }
    }

    pub fn presentation(&self) -> Option<Presentation> {
        let s = self.inner.lock();
        result::present(&s.state, s.selector.current(), &self.inner.endpoints)
    }

    pub fn status_panel(&self) -> Option<StatusPanel> {
        result::status_panel(&self.inner.lock().state)
    }

    pub fn previews(&self) -> Option<PreviewPair> {
        let s = self.inner.lock();
        let result = s.state.result()?;
        result::preview_pair(result, s.selector.current(), &self.inner.endpoints)
    }

    // ---- workflow ----

    /// Run one submission to settlement.
    ///
    /// The estimator is stopped and joined before the outcome is applied, so
    /// no progress tick can land after the terminal transition.
    pub async fn submit(&self) -> Result<SubmitOutcome, WorkflowError> {
        let inner = &self.inner;

        let (request, artifact_name) = {
            let mut s = inner.lock();
            if s.state.is_submitting() {
                tracing::debug!(target: "deid.workflow", "submit ignored: already submitting");
                return Ok(SubmitOutcome::Ignored);
            }
            let pending = readiness::blockers(s.selector.current(), &s.configuration);
            let artifact = match s.selector.current() {
                Some(a) if pending.is_empty() => a.clone(),
                _ => return Err(WorkflowError::ValidationBlocked { blockers: pending }),
            };
            let request = build_request(&artifact, &s.configuration)?;

            s.selector.set_disabled(true);
            s.progress = 0.0;
            inner.transition(&mut s, WorkflowState::Submitting { progress: 0.0 });
            (request, artifact.name().to_string())
        };
        let submission = Submission::begin(inner);

        tracing::info!(
            target: "deid.workflow",
            file = %artifact_name,
            media_type = %request.media_type,
            size = request.bytes.len(),
            mode = %inner.mode,
            "submitting redaction"
        );

        let ticker_inner = inner.clone();
        let estimator =
            ProgressEstimator::start(&inner.progress_cfg, move |v| ticker_inner.on_tick(v));

        let settled = inner.service.redact(request).await;

        let mut model = estimator.stop().await;
        submission.settle();

        let outcome = match &settled {
            Err(e) => {
                tracing::warn!(target: "deid.workflow", error = %e, "redaction request did not complete");
                Err(result::transport_failure(e))
            }
            Ok(resp) => {
                if resp.is_success() {
                    inner.on_tick(model.finish());
                }
                result::decode(inner.mode, resp, &artifact_name)
            }
        };

        let mut s = inner.lock();
        s.selector.set_disabled(false);
        let next = match outcome {
            Ok(result) => {
                s.progress = COMPLETE;
                if let RedactionResult::Descriptor(d) = &result {
                    tracing::info!(
                        target: "deid.workflow",
                        job_id = %d.job_id,
                        processing_time = ?d.processing_time_seconds,
                        "redaction complete"
                    );
                } else {
                    tracing::info!(target: "deid.workflow", "redaction complete (payload)");
                }
                inner.emit(WorkflowEvent::Notice(Notice::redaction_complete()));
                WorkflowState::Succeeded(result)
            }
            Err(failure) => {
                tracing::warn!(
                    target: "deid.workflow",
                    kind = %failure.kind,
                    message = %failure.message,
                    "redaction failed"
                );
                inner.emit(WorkflowEvent::Notice(Notice::redaction_failed(&failure)));
                WorkflowState::Failed(failure)
            }
        };
        inner.transition(&mut s, next);
        Ok(SubmitOutcome::Settled(s.state.clone()))
    }

    /// Only meaningful in `Succeeded`; `None` otherwise.
    pub fn download(&self) -> Option<DownloadAction> {
        let s = self.inner.lock();
        let action = match s.state.result() {
            Some(RedactionResult::Descriptor(d)) => DownloadAction::OpenReference {
                url: self.inner.endpoints.download(&d.job_id),
            },
            Some(RedactionResult::Payload(p)) => DownloadAction::Materialize {
                file_name: p.file_name.clone(),
                bytes: p.bytes.clone(),
            },
            None => {
                tracing::debug!(target: "deid.workflow", state = s.state.name(), "download ignored");
                return None;
            }
        };
        self.inner.emit(WorkflowEvent::Notice(Notice::download_started()));
        Some(action)
    }
}
