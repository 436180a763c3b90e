//! Scheduler wire models

use serde::{Deserialize, Serialize};

/// A namespace known to the scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Namespace {
    /// Namespace name
    #[serde(rename = "Name")]
    pub name: String,

    /// Namespace description
    #[serde(rename = "Description", default)]
    pub description: String,
}

/// The caller's own ACL token, as reported by the scheduler
#[derive(Debug, Clone, Deserialize)]
pub struct AclTokenSelf {
    /// Token type: "management" or "client"
    #[serde(rename = "Type")]
    pub token_type: String,

    /// Policies attached to a client token
    #[serde(rename = "Policies", default)]
    pub policies: Vec<String>,
}

/// Response to a job registration
#[derive(Debug, Clone, Deserialize)]
pub struct JobRegisterResponse {
    /// Evaluation created for the registered job
    #[serde(rename = "EvalID", default)]
    pub eval_id: String,

    /// Job modify index after registration
    #[serde(rename = "JobModifyIndex", default)]
    pub job_modify_index: u64,
}
