//! Screen flow integration tests with a mock scheduler

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use gfconsole::draft::DraftState;
use gfconsole::errors::ConsoleError;
use gfconsole::flow::confirm::{ConfirmEntry, ConfirmScreen};
use gfconsole::flow::{intake, Navigation};
use gfconsole::handoff::{self, CarrierStore, MemoryCarrier, HANDOFF_SLOT};
use gfconsole::models::namespace::{JobRegisterResponse, Namespace};
use gfconsole::models::request::DeploymentRequest;
use gfconsole::scheduler::api::SchedulerApi;

/// Scriptable in-memory scheduler
struct MockScheduler {
    allow_run_job: bool,
    fail_namespace_fetch: bool,
    fail_submit: bool,
    namespaces: Vec<String>,
    namespace_calls: AtomicUsize,
    submitted: Mutex<Vec<(String, String)>>,
}

impl MockScheduler {
    fn new() -> Self {
        Self {
            allow_run_job: true,
            fail_namespace_fetch: false,
            fail_submit: false,
            namespaces: vec!["default".to_string()],
            namespace_calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SchedulerApi for MockScheduler {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>, ConsoleError> {
        self.namespace_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_namespace_fetch {
            return Err(ConsoleError::Internal("connection refused".to_string()));
        }
        Ok(self
            .namespaces
            .iter()
            .map(|name| Namespace {
                name: name.clone(),
                description: String::new(),
            })
            .collect())
    }

    async fn check_capability(&self, _action: &str, _namespace: &str) -> Result<bool, ConsoleError> {
        Ok(self.allow_run_job)
    }

    async fn submit_job(
        &self,
        namespace: &str,
        spec: &str,
    ) -> Result<JobRegisterResponse, ConsoleError> {
        if self.fail_submit {
            return Err(ConsoleError::Internal("job rejected".to_string()));
        }
        self.submitted
            .lock()
            .unwrap()
            .push((namespace.to_string(), spec.to_string()));
        Ok(JobRegisterResponse {
            eval_id: "eval-1".to_string(),
            job_modify_index: 1,
        })
    }
}

fn filled_request() -> DeploymentRequest {
    DeploymentRequest {
        module_name: "m1".to_string(),
        op_type: "infer".to_string(),
        model_path: "/a/b".to_string(),
        model_md5: "abc123".to_string(),
        model_count: "3".to_string(),
        prefetch: "2".to_string(),
        model_concurrency: "4".to_string(),
        deploy_ip: String::new(),
        samosa_logic_worker_num: "8".to_string(),
        extra_env: String::new(),
    }
}

#[tokio::test]
async fn test_full_flow_submits_compiled_draft() {
    let scheduler = MockScheduler::new();
    let carrier = MemoryCarrier::new();
    let screen = ConfirmScreen::new();

    let nav = intake::submit(&carrier, &filled_request()).await.unwrap();
    assert_eq!(nav, Navigation::Confirm { namespace: None });

    let visit = screen.begin_visit().await;
    let entry = screen.enter(&scheduler, &carrier, None, visit).await.unwrap();
    let mut draft = match entry {
        ConfirmEntry::Ready(draft) => draft,
        other => panic!("expected a compiled draft, got {:?}", other),
    };
    assert_eq!(draft.state(), &DraftState::Compiled);
    assert!(draft.spec().unwrap().starts_with(r#"job "infer@m1" {"#));

    let nav = screen
        .submit_draft(&scheduler, &mut draft, None)
        .await
        .unwrap();
    assert_eq!(
        nav,
        Navigation::JobStatus {
            id: "infer@m1".to_string(),
            namespace: "default".to_string(),
        }
    );
    assert_eq!(draft.state(), &DraftState::Submitted);

    let submitted = scheduler.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].0, "default");
}

#[tokio::test]
async fn test_authorization_denied_before_namespace_load() {
    let mut scheduler = MockScheduler::new();
    scheduler.allow_run_job = false;
    let carrier = MemoryCarrier::new();
    intake::submit(&carrier, &filled_request()).await.unwrap();

    let screen = ConfirmScreen::new();
    let visit = screen.begin_visit().await;
    let err = screen
        .enter(&scheduler, &carrier, None, visit)
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::AuthorizationDenied(_)));
    // Authorization is evaluated before namespace loading
    assert_eq!(scheduler.namespace_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_namespace_fetch_failure_blocks_draft() {
    let mut scheduler = MockScheduler::new();
    scheduler.fail_namespace_fetch = true;
    let carrier = MemoryCarrier::new();
    intake::submit(&carrier, &filled_request()).await.unwrap();

    let screen = ConfirmScreen::new();
    let visit = screen.begin_visit().await;
    let err = screen
        .enter(&scheduler, &carrier, None, visit)
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::NamespaceFetchFailed(_)));
}

#[tokio::test]
async fn test_unknown_namespace_blocks_draft() {
    let scheduler = MockScheduler::new();
    let carrier = MemoryCarrier::new();
    intake::submit(&carrier, &filled_request()).await.unwrap();

    let screen = ConfirmScreen::new();
    let visit = screen.begin_visit().await;
    let err = screen
        .enter(&scheduler, &carrier, Some("staging"), visit)
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::NamespaceUnknown(ref ns) if ns == "staging"));
}

#[tokio::test]
async fn test_first_visit_without_handoff() {
    let scheduler = MockScheduler::new();
    let carrier = MemoryCarrier::new();

    let screen = ConfirmScreen::new();
    let visit = screen.begin_visit().await;
    let entry = screen.enter(&scheduler, &carrier, None, visit).await.unwrap();

    assert!(matches!(entry, ConfirmEntry::NoPendingRequest));
}

#[tokio::test]
async fn test_corrupt_handoff_is_reported() {
    let scheduler = MockScheduler::new();
    let carrier = MemoryCarrier::new();
    carrier
        .put(HANDOFF_SLOT, "{not valid".to_string())
        .await
        .unwrap();

    let screen = ConfirmScreen::new();
    let visit = screen.begin_visit().await;
    let err = screen
        .enter(&scheduler, &carrier, None, visit)
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::HandoffCorrupt(_)));
}

#[tokio::test]
async fn test_stale_visit_is_dropped() {
    let scheduler = MockScheduler::new();
    let carrier = MemoryCarrier::new();
    intake::submit(&carrier, &filled_request()).await.unwrap();

    let screen = ConfirmScreen::new();
    let stale = screen.begin_visit().await;
    // A second visit supersedes the first before its results resolve
    let _current = screen.begin_visit().await;

    let err = screen
        .enter(&scheduler, &carrier, None, stale)
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::VisitSuperseded(_)));
}

#[tokio::test]
async fn test_failed_submission_keeps_draft_resubmittable() {
    let mut failing = MockScheduler::new();
    failing.fail_submit = true;
    let carrier = MemoryCarrier::new();
    intake::submit(&carrier, &filled_request()).await.unwrap();

    let screen = ConfirmScreen::new();
    let visit = screen.begin_visit().await;
    let entry = screen.enter(&failing, &carrier, None, visit).await.unwrap();
    let mut draft = match entry {
        ConfirmEntry::Ready(draft) => draft,
        other => panic!("expected a compiled draft, got {:?}", other),
    };

    let err = screen
        .submit_draft(&failing, &mut draft, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::SubmissionFailed(_)));
    assert_eq!(draft.state(), &DraftState::Compiled);

    // Retrying against a healthy scheduler succeeds
    let healthy = MockScheduler::new();
    let nav = screen
        .submit_draft(&healthy, &mut draft, None)
        .await
        .unwrap();
    assert!(matches!(nav, Navigation::JobStatus { .. }));
    assert_eq!(draft.state(), &DraftState::Submitted);
}

#[tokio::test]
async fn test_leave_discards_unsubmitted_draft() {
    let scheduler = MockScheduler::new();
    let carrier = MemoryCarrier::new();
    intake::submit(&carrier, &filled_request()).await.unwrap();

    let screen = ConfirmScreen::new();
    let visit = screen.begin_visit().await;
    let entry = screen.enter(&scheduler, &carrier, None, visit).await.unwrap();
    let mut draft = match entry {
        ConfirmEntry::Ready(draft) => draft,
        other => panic!("expected a compiled draft, got {:?}", other),
    };

    screen.leave(&mut draft).await;
    assert_eq!(draft.state(), &DraftState::Discarded);
}

#[tokio::test]
async fn test_reentering_recompiles_identically() {
    let scheduler = MockScheduler::new();
    let carrier = MemoryCarrier::new();
    intake::submit(&carrier, &filled_request()).await.unwrap();

    let screen = ConfirmScreen::new();

    let first_visit = screen.begin_visit().await;
    let first = match screen.enter(&scheduler, &carrier, None, first_visit).await.unwrap() {
        ConfirmEntry::Ready(draft) => draft,
        other => panic!("expected a compiled draft, got {:?}", other),
    };

    let second_visit = screen.begin_visit().await;
    let second = match screen.enter(&scheduler, &carrier, None, second_visit).await.unwrap() {
        ConfirmEntry::Ready(draft) => draft,
        other => panic!("expected a compiled draft, got {:?}", other),
    };

    assert_eq!(first.spec(), second.spec());
}

#[tokio::test]
async fn test_carrier_round_trip_preserves_request() {
    let carrier = MemoryCarrier::new();
    let mut request = filled_request();
    request.deploy_ip = "10.0.0.5".to_string();
    request.extra_env = "FOO=1,BAR=2".to_string();

    handoff::write_request(&carrier, &request).await.unwrap();
    let read = handoff::read_request(&carrier).await.unwrap();
    assert_eq!(read, Some(request));
}
