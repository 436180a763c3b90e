//! Intake screen

use tracing::info;

use crate::errors::ConsoleError;
use crate::flow::Navigation;
use crate::handoff::{self, CarrierStore};
use crate::models::request::{validate, DeploymentRequest};

/// Submit the intake form
///
/// Validates the request and, on success, writes it to the handoff carrier
/// and navigates to the confirm screen. On a validation failure nothing is
/// written and no navigation happens; the error names the offending field.
pub async fn submit(
    carrier: &dyn CarrierStore,
    request: &DeploymentRequest,
) -> Result<Navigation, ConsoleError> {
    validate(request)?;

    handoff::write_request(carrier, request).await?;
    info!(
        "Deployment request for '{}@{}' handed off",
        request.op_type, request.module_name
    );

    Ok(Navigation::Confirm { namespace: None })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handoff::MemoryCarrier;

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
    async fn test_submit_writes_and_navigates() {
        let carrier = MemoryCarrier::new();
        let nav = submit(&carrier, &filled_request()).await.unwrap();

        assert_eq!(nav, Navigation::Confirm { namespace: None });
        let stored = handoff::read_request(&carrier).await.unwrap();
        assert_eq!(stored, Some(filled_request()));
    }

    #[tokio::test]
    async fn test_invalid_request_writes_nothing() {
        let carrier = MemoryCarrier::new();
        let mut request = filled_request();
        request.model_md5 = String::new();

        let err = submit(&carrier, &request).await.unwrap_err();
        assert!(matches!(err, ConsoleError::EmptyField(ref f) if f == "model_md5"));
        assert_eq!(handoff::read_request(&carrier).await.unwrap(), None);
    }
}
