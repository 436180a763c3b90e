//! Error types for the workload console

use thiserror::Error;

/// Main error type for the workload console
///
/// No variant is fatal to the process: every error is scoped to the screen
/// that raised it and is recoverable by operator action (re-enter data,
/// retry navigation, resubmit).
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// A required form field was empty; carries the field name
    #[error("{0} must not be empty")]
    EmptyField(String),

    /// The handoff slot held content that could not be parsed
    #[error("Handoff corrupt: {0}")]
    HandoffCorrupt(String),

    /// The operator lacks the capability required for the target namespace
    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    /// The scheduler's namespace list could not be fetched
    #[error("Namespace fetch failed: {0}")]
    NamespaceFetchFailed(String),

    /// The target namespace is not known to the scheduler
    #[error("Unknown namespace: {0}")]
    NamespaceUnknown(String),

    /// The scheduler rejected the submitted draft
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// An async result resolved for a screen visit the operator already left
    #[error("Visit superseded: {0}")]
    VisitSuperseded(String),

    #[error("Draft error: {0}")]
    DraftError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for ConsoleError {
    fn from(err: anyhow::Error) -> Self {
        ConsoleError::Internal(err.to_string())
    }
}
