//! HTTP scheduler client

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};
use url::Url;

use crate::errors::ConsoleError;
use crate::models::namespace::{AclTokenSelf, JobRegisterResponse, Namespace};
use crate::scheduler::api::SchedulerApi;

/// Header carrying the ACL token
const TOKEN_HEADER: &str = "X-Nomad-Token";

/// HTTP client for the scheduler API
pub struct SchedulerClient {
    client: Client,
    base_url: String,
    acl_token: Option<String>,
}

impl SchedulerClient {
    /// Create a new scheduler client
    pub fn new(base_url: &str, acl_token: Option<String>) -> Result<Self, ConsoleError> {
        let base = Url::parse(base_url)
            .map_err(|e| ConsoleError::ConfigError(format!("invalid scheduler URL: {}", e)))?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            acl_token,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConsoleError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.acl_token {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP GET failed: {} - {}", status, body);
            return Err(ConsoleError::Internal(format!("{}: {}", status, body)));
        }

        let body = response.json().await?;
        Ok(body)
    }

    /// Make a POST request
    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ConsoleError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.acl_token {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP POST failed: {} - {}", status, body);
            return Err(ConsoleError::Internal(format!("{}: {}", status, body)));
        }

        let body = response.json().await?;
        Ok(body)
    }
}

#[async_trait]
impl SchedulerApi for SchedulerClient {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>, ConsoleError> {
        self.get("/v1/namespaces").await
    }

    /// Coarse capability lookup against the caller's own ACL token
    ///
    /// A cluster without ACLs (no token configured) allows everything, a
    /// management token allows everything, and a client token must carry at
    /// least one policy. Policy-rule evaluation stays with the scheduler.
    async fn check_capability(
        &self,
        action: &str,
        namespace: &str,
    ) -> Result<bool, ConsoleError> {
        if self.acl_token.is_none() {
            return Ok(true);
        }

        let token: AclTokenSelf = self.get("/v1/acl/token/self").await?;
        if token.token_type == "management" {
            return Ok(true);
        }

        let allowed = !token.policies.is_empty();
        debug!(
            "Capability '{}' in namespace '{}': {}",
            action, namespace, allowed
        );
        Ok(allowed)
    }

    async fn submit_job(
        &self,
        namespace: &str,
        spec: &str,
    ) -> Result<JobRegisterResponse, ConsoleError> {
        // The scheduler registers jobs as JSON; parse the textual definition
        // first, then register the parsed job into the target namespace.
        let parse_body = serde_json::json!({
            "JobHCL": spec,
            "Canonicalize": true,
        });
        let job: serde_json::Value = self.post("/v1/jobs/parse", &parse_body).await?;

        let register_body = serde_json::json!({ "Job": job });
        let path = format!("/v1/jobs?namespace={}", namespace);
        self.post(&path, &register_body).await
    }
}
