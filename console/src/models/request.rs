//! Deployment request model

use serde::{Deserialize, Serialize};

use crate::errors::ConsoleError;

/// The operator-entered description of a model-serving workload
///
/// All fields are strings as entered on the intake form; numeric fields are
/// passed through verbatim and validated by the scheduler, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRequest {
    /// Logical module / datacenter identifier
    pub module_name: String,

    /// Task type, used as the job, group and task name
    pub op_type: String,

    /// Remote artifact path of the model
    pub model_path: String,

    /// Content checksum of the artifact
    pub model_md5: String,

    /// Desired instance count
    pub model_count: String,

    /// Model pre-fetch depth
    pub prefetch: String,

    /// Per-instance concurrency
    pub model_concurrency: String,

    /// Optional IP placement constraint
    #[serde(default)]
    pub deploy_ip: String,

    /// Logic workers per daemon
    pub samosa_logic_worker_num: String,

    /// Comma-separated extra `KEY=VALUE` environment lines
    #[serde(default)]
    pub extra_env: String,
}

impl DeploymentRequest {
    /// Fields in declaration order, paired with their values
    ///
    /// The order is a contract: validation reports the first empty field in
    /// this order.
    pub fn fields(&self) -> [(&'static str, &str); 10] {
        [
            ("module_name", &self.module_name),
            ("op_type", &self.op_type),
            ("model_path", &self.model_path),
            ("model_md5", &self.model_md5),
            ("model_count", &self.model_count),
            ("prefetch", &self.prefetch),
            ("model_concurrency", &self.model_concurrency),
            ("deploy_ip", &self.deploy_ip),
            ("samosa_logic_worker_num", &self.samosa_logic_worker_num),
            ("extra_env", &self.extra_env),
        ]
    }
}

/// Fields that are allowed to be empty
const OPTIONAL_FIELDS: [&str; 2] = ["extra_env", "deploy_ip"];

/// Check that every required field is non-empty
///
/// Returns `ConsoleError::EmptyField` naming the first offending field in
/// declaration order.
pub fn validate(request: &DeploymentRequest) -> Result<(), ConsoleError> {
    for (name, value) in request.fields() {
        if OPTIONAL_FIELDS.contains(&name) {
            continue;
        }
        if value.is_empty() {
            return Err(ConsoleError::EmptyField(name.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_validate_accepts_filled_request() {
        assert!(validate(&filled_request()).is_ok());
    }

    #[test]
    fn test_validate_reports_empty_field() {
        let mut request = filled_request();
        request.model_path = String::new();

        let err = validate(&request).unwrap_err();
        assert!(matches!(err, ConsoleError::EmptyField(ref f) if f == "model_path"));
        assert_eq!(err.to_string(), "model_path must not be empty");
    }

    #[test]
    fn test_validate_reports_first_field_in_declaration_order() {
        let mut request = filled_request();
        request.op_type = String::new();
        request.samosa_logic_worker_num = String::new();

        let err = validate(&request).unwrap_err();
        assert!(matches!(err, ConsoleError::EmptyField(ref f) if f == "op_type"));
    }

    #[test]
    fn test_validate_exempts_optional_fields() {
        let request = filled_request();
        assert!(request.deploy_ip.is_empty());
        assert!(request.extra_env.is_empty());
        assert!(validate(&request).is_ok());
    }

    #[test]
    fn test_request_json_round_trip() {
        let request = filled_request();
        let json = serde_json::to_string(&request).unwrap();
        let parsed: DeploymentRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }
}
