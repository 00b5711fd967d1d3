//! Integration tests for the redaction workflow controller
//!
//! These tests drive the controller end to end against in-process fakes of
//! the redaction service, with tokio time paused so ticker behavior is exact.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use deid_core::api::*;
use tokio::sync::{mpsc, oneshot, Notify};

const TICK: Duration = Duration::from_millis(500);

/// Fake service returning one canned settlement.
struct CannedService {
    reply: Mutex<Option<Result<ServiceResponse, TransportError>>>,
    calls: AtomicUsize,
    last: Mutex<Option<RedactionRequest>>,
}

impl CannedService {
    fn new(reply: Result<ServiceResponse, TransportError>) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Some(reply)),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    fn ok(content_type: Option<&str>, body: impl Into<Bytes>) -> Arc<Self> {
        Self::new(Ok(ServiceResponse {
            status: 200,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }))
    }
}

#[async_trait]
impl RedactionService for CannedService {
    async fn redact(&self, req: RedactionRequest) -> Result<ServiceResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(req);
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(TransportError::Connect("already used".into())))
    }
}

/// Fake service that holds the request open until released.
struct GatedService {
    started: Notify,
    release: Mutex<Option<oneshot::Receiver<ServiceResponse>>>,
    calls: AtomicUsize,
}

impl GatedService {
    fn new() -> (Arc<Self>, oneshot::Sender<ServiceResponse>) {
        let (tx, rx) = oneshot::channel();
        let svc = Arc::new(Self {
            started: Notify::new(),
            release: Mutex::new(Some(rx)),
            calls: AtomicUsize::new(0),
        });
        (svc, tx)
    }
}

#[async_trait]
impl RedactionService for GatedService {
    async fn redact(&self, _req: RedactionRequest) -> Result<ServiceResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let rx = self.release.lock().unwrap().take();
        self.started.notify_one();
        match rx {
            Some(rx) => rx
                .await
                .map_err(|_| TransportError::Connect("gate dropped".into())),
            None => Err(TransportError::Connect("already used".into())),
        }
    }
}

fn controller(
    service: Arc<dyn RedactionService>,
    mode: IntegrationMode,
) -> (RedactionController, mpsc::UnboundedReceiver<WorkflowEvent>) {
    let mut cfg = AppConfig::default();
    cfg.service.base_url = "http://redact.test".into();
    cfg.service.mode = mode;
    cfg.progress.seed = Some(11);
    let (tx, rx) = mpsc::unbounded_channel();
    let ctrl = RedactionController::new(ControllerArgs::from_config(&cfg, service, Some(tx)));
    (ctrl, rx)
}

fn pdf_2mb() -> Candidate {
    Candidate::new("intake.pdf", vec![0x25u8; 2 * 1024 * 1024]).with_declared_type("application/pdf")
}

fn configure_full(ctrl: &RedactionController) {
    ctrl.set_scope(RedactionScope::FullPii);
    ctrl.set_consent_tier(ConsentTier::Full);
    ctrl.set_authorization_acknowledged(true);
}

fn drain(rx: &mut mpsc::UnboundedReceiver<WorkflowEvent>) -> Vec<WorkflowEvent> {
    let mut out = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        out.push(ev);
    }
    out
}

fn progress_values(events: &[WorkflowEvent]) -> Vec<f64> {
    events
        .iter()
        .filter_map(|e| match e {
            WorkflowEvent::Progress(v) => Some(*v),
            _ => None,
        })
        .collect()
}

/// Test: descriptor-mode success and download reference
#[tokio::test(start_paused = true)]
async fn test_descriptor_success() {
    let svc = CannedService::ok(
        Some("application/json"),
        r#"{"id":"abc123","processing_time":3.2,"consent_level":"full","redaction_level":"full","custom_types":[]}"#,
    );
    let (ctrl, _rx) = controller(svc.clone(), IntegrationMode::Descriptor);

    let artifact = ctrl.select(pdf_2mb()).unwrap();
    assert_eq!(artifact.size_display(), "2.00 MB");
    configure_full(&ctrl);
    assert!(ctrl.ready());

    let outcome = ctrl.submit().await.unwrap();
    let SubmitOutcome::Settled(WorkflowState::Succeeded(RedactionResult::Descriptor(d))) = outcome
    else {
        panic!("unexpected outcome: {outcome:?}");
    };
    assert_eq!(d.job_id, "abc123");
    assert_eq!(d.processing_time_seconds, Some(3.2));
    assert_eq!(svc.calls.load(Ordering::SeqCst), 1);

    let sent = svc.last.lock().unwrap().clone().unwrap();
    assert_eq!(sent.field("redaction_level"), Some("full"));
    assert_eq!(sent.field("consent_level"), Some("full"));
    assert_eq!(sent.field("custom_types"), None);

    match ctrl.download() {
        Some(DownloadAction::OpenReference { url }) => {
            assert!(url.contains("abc123"));
            assert_eq!(url, "http://redact.test/download/abc123");
        }
        other => panic!("unexpected download: {other:?}"),
    }

    let previews = ctrl.previews().unwrap();
    assert_eq!(
        previews.original.source,
        PreviewSource::Reference {
            url: "http://redact.test/preview/abc123?type=original".into()
        }
    );
    assert_eq!(ctrl.snapshot().progress, 100.0);
    assert!(!ctrl.snapshot().selector_disabled);
}

/// Test: custom scope with no entities blocks submission
#[tokio::test]
async fn test_custom_scope_without_entities_is_blocked() {
    let svc = CannedService::ok(None, "unused");
    let (ctrl, _rx) = controller(svc.clone(), IntegrationMode::Descriptor);
    ctrl.select(pdf_2mb()).unwrap();
    ctrl.set_scope(RedactionScope::Custom);
    ctrl.set_consent_tier(ConsentTier::Limited);
    ctrl.set_authorization_acknowledged(true);
    assert!(!ctrl.ready());

    match ctrl.submit().await {
        Err(WorkflowError::ValidationBlocked { blockers }) => {
            assert_eq!(blockers, vec![Blocker::EmptyCustomEntityTypes])
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(svc.calls.load(Ordering::SeqCst), 0);
    assert_eq!(ctrl.state(), WorkflowState::Idle);

    ctrl.add_entity_type(EntityCategory::Person);
    ctrl.add_entity_type(EntityCategory::Gpe);
    assert!(ctrl.ready());
}

/// Test: connection error becomes a transport failure
#[tokio::test(start_paused = true)]
async fn test_transport_failure_keeps_inputs() {
    let svc = CannedService::new(Err(TransportError::Connect("connection refused".into())));
    let (ctrl, mut rx) = controller(svc, IntegrationMode::Descriptor);
    ctrl.select(pdf_2mb()).unwrap();
    configure_full(&ctrl);
    let before = ctrl.configuration();

    ctrl.submit().await.unwrap();

    let state = ctrl.state();
    let failure = state.failure().expect("failed state");
    assert_eq!(failure.kind, FailureKind::Transport);
    assert!(failure.message.contains("connection refused"));
    assert_eq!(ctrl.artifact().unwrap().name(), "intake.pdf");
    assert_eq!(ctrl.configuration(), before);
    assert_eq!(ctrl.download(), None);
    assert_eq!(ctrl.in_flight(), 0);

    let events = drain(&mut rx);
    assert!(events.iter().any(|e| matches!(
        e,
        WorkflowEvent::Notice(Notice { title: "Redaction Failed", .. })
    )));
    match ctrl.presentation() {
        Some(Presentation::Failure { title, .. }) => assert_eq!(title, "Redaction Failed"),
        other => panic!("unexpected: {other:?}"),
    }
}

/// Test: server error message comes from the JSON error field
#[tokio::test(start_paused = true)]
async fn test_server_failure_message() {
    let svc = CannedService::new(Ok(ServiceResponse {
        status: 400,
        content_type: Some("application/json".into()),
        body: Bytes::from_static(br#"{"error":"Unsupported file"}"#),
    }));
    let (ctrl, _rx) = controller(svc, IntegrationMode::Descriptor);
    ctrl.select(pdf_2mb()).unwrap();
    configure_full(&ctrl);
    ctrl.submit().await.unwrap();

    let failure = ctrl.state().failure().cloned().unwrap();
    assert_eq!(failure.kind, FailureKind::Server { status: 400 });
    assert_eq!(failure.message, "Unsupported file");
    assert_eq!(
        ctrl.presentation().map(|p| p.to_string()),
        Some("Redaction Failed (server failure (status 400)): Unsupported file".into())
    );

    let svc = CannedService::new(Ok(ServiceResponse {
        status: 500,
        content_type: Some("text/plain".into()),
        body: Bytes::from_static(b"Internal Server Error"),
    }));
    let (ctrl, mut rx) = controller(svc, IntegrationMode::Descriptor);
    ctrl.select(pdf_2mb()).unwrap();
    configure_full(&ctrl);
    ctrl.submit().await.unwrap();

    match ctrl.presentation() {
        Some(Presentation::Failure { kind, message, .. }) => {
            assert_eq!(kind, FailureKind::Server { status: 500 });
            assert_eq!(message, "Redaction failed");
        }
        other => panic!("unexpected: {other:?}"),
    }
    let notice = drain(&mut rx)
        .into_iter()
        .find_map(|e| match e {
            WorkflowEvent::Notice(n) if n.level == NoticeLevel::Error => Some(n),
            _ => None,
        })
        .unwrap();
    assert_eq!(notice.description, "server failure (status 500): Redaction failed");
}

/// Test: success status with an undecodable body is a malformed response
#[tokio::test(start_paused = true)]
async fn test_malformed_descriptor() {
    let svc = CannedService::ok(Some("text/html"), "<html>proxy error</html>");
    let (ctrl, _rx) = controller(svc, IntegrationMode::Descriptor);
    ctrl.select(pdf_2mb()).unwrap();
    configure_full(&ctrl);
    ctrl.submit().await.unwrap();
    assert_eq!(
        ctrl.state().failure().map(|f| f.kind),
        Some(FailureKind::MalformedResponse)
    );
}

/// Test: unsupported type leaves state and configuration alone
#[tokio::test]
async fn test_unsupported_type_changes_nothing() {
    let svc = CannedService::ok(None, "unused");
    let (ctrl, mut rx) = controller(svc, IntegrationMode::Descriptor);
    configure_full(&ctrl);
    let before = ctrl.configuration();
    drain(&mut rx);

    let err = ctrl.select(Candidate::new("notes.txt", b"hello".to_vec())).unwrap_err();
    assert!(matches!(err, SelectError::UnsupportedType { .. }));
    assert_eq!(ctrl.state(), WorkflowState::Idle);
    assert_eq!(ctrl.configuration(), before);
    assert!(ctrl.artifact().is_none());
    assert!(drain(&mut rx).is_empty());

    let err = ctrl
        .select(Candidate::new("huge.pdf", vec![0u8; 10 * 1024 * 1024 + 1]))
        .unwrap_err();
    assert!(matches!(err, SelectError::OversizedFile { .. }));
    assert_eq!(ctrl.configuration(), before);
}

/// Test: payload mode materializes the exact bytes
#[tokio::test(start_paused = true)]
async fn test_payload_round_trip() {
    let blob: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 251) as u8).collect();
    let svc = CannedService::ok(Some("application/pdf"), blob.clone());
    let (ctrl, _rx) = controller(svc, IntegrationMode::Payload);
    ctrl.select(pdf_2mb()).unwrap();
    configure_full(&ctrl);

    ctrl.submit().await.unwrap();
    assert!(matches!(ctrl.state(), WorkflowState::Succeeded(RedactionResult::Payload(_))));

    match ctrl.download() {
        Some(DownloadAction::Materialize { file_name, bytes }) => {
            assert_eq!(file_name, "deidentified-intake.pdf");
            assert_eq!(&bytes[..], &blob[..]);
        }
        other => panic!("unexpected download: {other:?}"),
    }
    let previews = ctrl.previews().unwrap();
    assert_eq!(previews.processed.caption, Some("Protected PDF"));
}

/// Test: changing the artifact from a terminal state returns to Idle
#[tokio::test(start_paused = true)]
async fn test_artifact_change_resets_terminal_state() {
    for reply in [
        CannedService::ok(None, r#"{"id":"j1"}"#),
        CannedService::new(Err(TransportError::Timeout)),
    ] {
        let (ctrl, _rx) = controller(reply, IntegrationMode::Descriptor);
        ctrl.select(pdf_2mb()).unwrap();
        configure_full(&ctrl);
        ctrl.submit().await.unwrap();
        assert!(ctrl.state().is_terminal());

        ctrl.select(Candidate::new("second.png", vec![1u8; 8])).unwrap();
        assert_eq!(ctrl.state(), WorkflowState::Idle);
        assert_eq!(ctrl.download(), None);
        assert_eq!(ctrl.configuration(), RedactionConfiguration::default());
    }

    let (ctrl, _rx) = controller(CannedService::ok(None, r#"{"id":"j2"}"#), IntegrationMode::Descriptor);
    ctrl.select(pdf_2mb()).unwrap();
    configure_full(&ctrl);
    ctrl.submit().await.unwrap();
    assert_eq!(ctrl.remove_artifact().unwrap().map(|a| a.name().to_string()), Some("intake.pdf".into()));
    assert_eq!(ctrl.state(), WorkflowState::Idle);
    assert!(ctrl.presentation().is_none());
}

/// Test: submit while submitting is a no-op
#[tokio::test(start_paused = true)]
async fn test_submit_while_submitting_is_ignored() {
    let (svc, release) = GatedService::new();
    let (ctrl, _rx) = controller(svc.clone(), IntegrationMode::Descriptor);
    ctrl.select(pdf_2mb()).unwrap();
    configure_full(&ctrl);

    let running = {
        let ctrl = ctrl.clone();
        tokio::spawn(async move { ctrl.submit().await })
    };
    svc.started.notified().await;

    let before = ctrl.snapshot();
    assert!(before.state.is_submitting());
    assert!(before.selector_disabled);
    assert_eq!(ctrl.in_flight(), 1);

    assert_eq!(ctrl.submit().await.unwrap(), SubmitOutcome::Ignored);

    let after = ctrl.snapshot();
    assert_eq!(after.state, before.state);
    assert_eq!(after.progress, before.progress);
    assert_eq!(ctrl.in_flight(), 1);
    assert_eq!(svc.calls.load(Ordering::SeqCst), 1);

    // inputs are locked while in flight
    assert!(matches!(
        ctrl.select(Candidate::new("other.pdf", vec![1u8])),
        Err(SelectError::Disabled)
    ));
    assert!(matches!(ctrl.remove_artifact(), Err(SelectError::Disabled)));
    assert!(!ctrl.set_scope(RedactionScope::PartialPii));
    assert_eq!(ctrl.configuration().scope, Some(RedactionScope::FullPii));
    let panel = ctrl.status_panel().unwrap();
    assert_eq!(panel.title, "Processing your file...");

    release
        .send(ServiceResponse {
            status: 200,
            content_type: None,
            body: Bytes::from_static(br#"{"id":"late"}"#),
        })
        .unwrap();
    let outcome = running.await.unwrap().unwrap();
    assert!(matches!(outcome, SubmitOutcome::Settled(WorkflowState::Succeeded(_))));
    assert_eq!(ctrl.in_flight(), 0);
}

/// Test: progress is monotonic, below 100 in flight, exactly 100 on success
#[tokio::test(start_paused = true)]
async fn test_progress_monotonic_then_complete() {
    let (svc, release) = GatedService::new();
    let (ctrl, mut rx) = controller(svc.clone(), IntegrationMode::Descriptor);
    ctrl.select(pdf_2mb()).unwrap();
    configure_full(&ctrl);
    drain(&mut rx);

    let running = {
        let ctrl = ctrl.clone();
        tokio::spawn(async move { ctrl.submit().await })
    };
    svc.started.notified().await;

    for _ in 0..20 {
        tokio::time::sleep(TICK).await;
        let p = ctrl.snapshot().progress;
        assert!(p < 100.0);
        assert!(p <= 90.0);
    }

    release
        .send(ServiceResponse {
            status: 200,
            content_type: None,
            body: Bytes::from_static(br#"{"id":"p1","processing_time":12.5}"#),
        })
        .unwrap();
    running.await.unwrap().unwrap();

    let events = drain(&mut rx);
    let values = progress_values(&events);
    assert!(values.len() > 2, "expected ticks, got {values:?}");
    assert!(values.windows(2).all(|w| w[0] <= w[1]), "{values:?}");
    let (last, in_flight) = values.split_last().unwrap();
    assert_eq!(*last, 100.0);
    assert!(in_flight.iter().all(|v| *v <= 90.0));

    // 100 is reported before the terminal transition
    let hundred = events
        .iter()
        .position(|e| matches!(e, WorkflowEvent::Progress(v) if *v == 100.0))
        .unwrap();
    let succeeded = events
        .iter()
        .position(|e| matches!(e, WorkflowEvent::StateChanged(WorkflowState::Succeeded(_))))
        .unwrap();
    assert!(hundred < succeeded);
}

/// Test: no progress ticks after a terminal transition
#[tokio::test(start_paused = true)]
async fn test_no_ticks_after_terminal_state() {
    for reply in [
        Ok(ServiceResponse {
            status: 200,
            content_type: None,
            body: Bytes::from_static(br#"{"id":"t1"}"#),
        }),
        Err(TransportError::Connect("reset".into())),
    ] {
        let (svc, release) = GatedService::new();
        let (ctrl, mut rx) = controller(svc.clone(), IntegrationMode::Descriptor);
        ctrl.select(pdf_2mb()).unwrap();
        configure_full(&ctrl);

        let running = {
            let ctrl = ctrl.clone();
            tokio::spawn(async move { ctrl.submit().await })
        };
        svc.started.notified().await;
        for _ in 0..3 {
            tokio::time::sleep(TICK).await;
        }
        match reply {
            Ok(resp) => release.send(resp).unwrap(),
            Err(_) => drop(release),
        }
        running.await.unwrap().unwrap();
        assert!(ctrl.state().is_terminal());

        drain(&mut rx);
        let settled = ctrl.snapshot();
        for _ in 0..5 {
            tokio::time::sleep(TICK).await;
        }
        assert!(drain(&mut rx).is_empty());
        let later = ctrl.snapshot();
        assert_eq!(later.state, settled.state);
        assert_eq!(later.progress, settled.progress);
    }
}

/// Test: a new submission is allowed after a failure
#[tokio::test(start_paused = true)]
async fn test_resubmit_after_failure() {
    struct FailThenSucceed(AtomicUsize);

    #[async_trait]
    impl RedactionService for FailThenSucceed {
        async fn redact(&self, _req: RedactionRequest) -> Result<ServiceResponse, TransportError> {
            if self.0.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(TransportError::Timeout);
            }
            Ok(ServiceResponse {
                status: 200,
                content_type: None,
                body: Bytes::from_static(br#"{"id":"second"}"#),
            })
        }
    }

    let (ctrl, _rx) = controller(Arc::new(FailThenSucceed(AtomicUsize::new(0))), IntegrationMode::Descriptor);
    ctrl.select(pdf_2mb()).unwrap();
    configure_full(&ctrl);

    ctrl.submit().await.unwrap();
    assert_eq!(ctrl.state().failure().map(|f| f.kind), Some(FailureKind::Transport));

    ctrl.submit().await.unwrap();
    assert_eq!(ctrl.state().result().and_then(|r| r.job_id()), Some("second"));
}

/// Test: abandoning an in-flight submit stops progress and unlocks the session
#[tokio::test(start_paused = true)]
async fn test_abandoned_submit_releases_session() {
    struct Unresponsive(AtomicUsize);

    #[async_trait]
    impl RedactionService for Unresponsive {
        async fn redact(&self, _req: RedactionRequest) -> Result<ServiceResponse, TransportError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }
    }

    let svc = Arc::new(Unresponsive(AtomicUsize::new(0)));
    let (ctrl, mut rx) = controller(svc.clone(), IntegrationMode::Descriptor);
    ctrl.select(pdf_2mb()).unwrap();
    configure_full(&ctrl);

    let abandoned = tokio::time::timeout(Duration::from_secs(2), ctrl.submit()).await;
    assert!(abandoned.is_err());

    let snap = ctrl.snapshot();
    assert_eq!(snap.state, WorkflowState::Idle);
    assert_eq!(snap.progress, 0.0);
    assert!(!snap.selector_disabled);
    assert_eq!(ctrl.in_flight(), 0);
    assert_eq!(ctrl.configuration().scope, Some(RedactionScope::FullPii));
    assert_eq!(ctrl.artifact().unwrap().name(), "intake.pdf");

    drain(&mut rx);
    for _ in 0..10 {
        tokio::time::sleep(TICK).await;
    }
    assert!(progress_values(&drain(&mut rx)).is_empty());

    // still usable: a second submission reaches the service
    assert!(ctrl.ready());
    let again = tokio::time::timeout(Duration::from_secs(1), ctrl.submit()).await;
    assert!(again.is_err());
    assert_eq!(svc.0.load(Ordering::SeqCst), 2);

    ctrl.select(Candidate::new("next.png", vec![1u8; 8])).unwrap();
    assert_eq!(ctrl.state(), WorkflowState::Idle);
}
