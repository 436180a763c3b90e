//! Confirm screen
//!
//! Entry runs three gates in strict order: the capability check, the
//! namespace load with existence check, then the carrier read and compile.
//! A per-visit token is re-checked after every suspension point so that a
//! resolution arriving after the operator left the screen is dropped
//! instead of applied.

use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::compile::compile;
use crate::draft::{DraftEvent, DraftState, JobDraft};
use crate::errors::ConsoleError;
use crate::flow::{Navigation, DEFAULT_NAMESPACE};
use crate::handoff::{self, CarrierStore};
use crate::scheduler::api::{SchedulerApi, RUN_JOB_CAPABILITY};

/// Result of entering the confirm screen
#[derive(Debug)]
pub enum ConfirmEntry {
    /// A compiled draft, ready for review and submission
    Ready(JobDraft),

    /// The carrier held no pending request (first visit); return to intake
    NoPendingRequest,
}

/// The confirm screen
pub struct ConfirmScreen {
    current_visit: RwLock<Option<Uuid>>,
}

impl ConfirmScreen {
    pub fn new() -> Self {
        Self {
            current_visit: RwLock::new(None),
        }
    }

    /// Begin a new visit, invalidating any visit still in flight
    pub async fn begin_visit(&self) -> Uuid {
        let visit = Uuid::new_v4();
        *self.current_visit.write().await = Some(visit);
        visit
    }

    async fn ensure_current(&self, visit: Uuid) -> Result<(), ConsoleError> {
        if *self.current_visit.read().await == Some(visit) {
            return Ok(());
        }
        warn!("Dropping stale result for visit {}", visit);
        Err(ConsoleError::VisitSuperseded(visit.to_string()))
    }

    /// Enter the confirm screen and build the draft
    ///
    /// Gate order: authorization, then namespace load, then compilation.
    /// Any failure keeps the operator off the review state: an
    /// authorization denial redirects to the job list, a namespace fetch
    /// failure keeps the current screen, and a missing handoff returns to
    /// intake.
    pub async fn enter(
        &self,
        api: &dyn SchedulerApi,
        carrier: &dyn CarrierStore,
        namespace: Option<&str>,
        visit: Uuid,
    ) -> Result<ConfirmEntry, ConsoleError> {
        let namespace = namespace.unwrap_or(DEFAULT_NAMESPACE);

        let allowed = api.check_capability(RUN_JOB_CAPABILITY, namespace).await?;
        self.ensure_current(visit).await?;
        if !allowed {
            return Err(ConsoleError::AuthorizationDenied(format!(
                "missing '{}' capability in namespace '{}'",
                RUN_JOB_CAPABILITY, namespace
            )));
        }

        let namespaces = api
            .list_namespaces()
            .await
            .map_err(|e| ConsoleError::NamespaceFetchFailed(e.to_string()))?;
        self.ensure_current(visit).await?;
        if !namespaces.iter().any(|n| n.name == namespace) {
            return Err(ConsoleError::NamespaceUnknown(namespace.to_string()));
        }

        let request = match handoff::read_request(carrier).await? {
            Some(request) => request,
            None => return Ok(ConfirmEntry::NoPendingRequest),
        };
        self.ensure_current(visit).await?;

        let mut draft = JobDraft::new();
        draft
            .process(DraftEvent::Compile(compile(&request)))
            .map_err(ConsoleError::DraftError)?;
        info!(
            "Compiled draft {} for '{}@{}'",
            draft.id(),
            request.op_type,
            request.module_name
        );

        Ok(ConfirmEntry::Ready(draft))
    }

    /// Submit a compiled draft to the scheduler
    ///
    /// On success the draft becomes submitted and the operator is sent to
    /// the `<id>@<namespace>` status view. On failure the draft stays
    /// compiled and can be resubmitted.
    pub async fn submit_draft(
        &self,
        api: &dyn SchedulerApi,
        draft: &mut JobDraft,
        namespace: Option<&str>,
    ) -> Result<Navigation, ConsoleError> {
        let namespace = namespace.unwrap_or(DEFAULT_NAMESPACE);
        let spec = draft
            .spec()
            .ok_or_else(|| ConsoleError::DraftError("draft is not compiled".to_string()))?
            .to_string();

        let response = api
            .submit_job(namespace, &spec)
            .await
            .map_err(|e| ConsoleError::SubmissionFailed(e.to_string()))?;

        draft
            .process(DraftEvent::Submit)
            .map_err(ConsoleError::DraftError)?;
        info!(
            "Draft {} submitted, evaluation {}",
            draft.id(),
            response.eval_id
        );

        Ok(Navigation::JobStatus {
            id: job_id_from_spec(&spec).unwrap_or_default(),
            namespace: namespace.to_string(),
        })
    }

    /// Leave the screen, releasing a draft that was never submitted
    pub async fn leave(&self, draft: &mut JobDraft) {
        *self.current_visit.write().await = None;
        if matches!(draft.state(), DraftState::Unset | DraftState::Compiled) {
            let _ = draft.process(DraftEvent::Discard);
            info!("Draft {} discarded", draft.id());
        }
    }
}

impl Default for ConfirmScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the job id from the first line of a compiled definition
fn job_id_from_spec(spec: &str) -> Option<String> {
    let first = spec.lines().next()?;
    let start = first.find('"')? + 1;
    let end = first[start..].find('"')? + start;
    Some(first[start..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_from_spec() {
        let spec = "job \"infer@m1\" {\n  type = \"service\"\n}";
        assert_eq!(job_id_from_spec(spec), Some("infer@m1".to_string()));
    }

    #[test]
    fn test_job_id_from_malformed_spec() {
        assert_eq!(job_id_from_spec("nothing here"), None);
        assert_eq!(job_id_from_spec(""), None);
    }
}
