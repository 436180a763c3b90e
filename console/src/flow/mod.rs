//! Screen flow
//!
//! The console walks two screens in strict sequence: intake collects and
//! validates the request, confirm compiles it into a draft and submits it.

pub mod confirm;
pub mod intake;

/// Namespace used when the navigation context carries none
pub const DEFAULT_NAMESPACE: &str = "default";

/// Where the flow sends the operator next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The intake form
    Intake,

    /// The confirm screen, optionally scoped to a namespace
    Confirm { namespace: Option<String> },

    /// The default job list (safe fallback after an authorization denial)
    JobList,

    /// The status view of a submitted job, keyed by `<id>@<namespace>`
    JobStatus { id: String, namespace: String },
}

impl std::fmt::Display for Navigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Navigation::Intake => write!(f, "generation"),
            Navigation::Confirm { namespace: Some(ns) } => {
                write!(f, "jobs/runmodel?namespace={}", ns)
            }
            Navigation::Confirm { namespace: None } => write!(f, "jobs/runmodel"),
            Navigation::JobList => write!(f, "jobs"),
            Navigation::JobStatus { id, namespace } => {
                write!(f, "jobs/job/{}@{}", id, namespace)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_view_key() {
        let nav = Navigation::JobStatus {
            id: "infer@m1".to_string(),
            namespace: "default".to_string(),
        };
        assert_eq!(nav.to_string(), "jobs/job/infer@m1@default");
    }
}
