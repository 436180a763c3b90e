//! Scheduler collaborator interface
//!
//! The console consumes exactly three scheduler operations; everything else
//! about the scheduler is out of scope. The trait seam lets the flow tests
//! run against a mock scheduler.

use async_trait::async_trait;

use crate::errors::ConsoleError;
use crate::models::namespace::{JobRegisterResponse, Namespace};

/// Capability required to enter the confirm screen
pub const RUN_JOB_CAPABILITY: &str = "run job";

/// The scheduler operations this console consumes
#[async_trait]
pub trait SchedulerApi: Send + Sync {
    /// List the namespaces known to the scheduler
    async fn list_namespaces(&self) -> Result<Vec<Namespace>, ConsoleError>;

    /// Check whether the caller holds a capability in a namespace
    async fn check_capability(
        &self,
        action: &str,
        namespace: &str,
    ) -> Result<bool, ConsoleError>;

    /// Submit a compiled workload definition into a namespace
    ///
    /// Returns the scheduler's registration response; the job id for the
    /// status view is derived from the definition itself.
    async fn submit_job(
        &self,
        namespace: &str,
        spec: &str,
    ) -> Result<JobRegisterResponse, ConsoleError>;
}
