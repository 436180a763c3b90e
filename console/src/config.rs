//! Console settings file

use serde::{Deserialize, Serialize};

use crate::logs::LogLevel;
use crate::storage::file::File;

/// Console settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Scheduler API configuration
    #[serde(default)]
    pub scheduler: SchedulerSettings,

    /// Path of the handoff carrier file shared between the intake and
    /// confirm invocations
    #[serde(default = "default_carrier_path")]
    pub carrier_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            scheduler: SchedulerSettings::default(),
            carrier_path: default_carrier_path(),
        }
    }
}

fn default_carrier_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    format!("{}/.gfconsole/handoff.json", home)
}

/// Scheduler API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerSettings {
    /// Base URL of the scheduler HTTP API
    #[serde(default = "default_scheduler_url")]
    pub base_url: String,

    /// ACL token; absent means the cluster runs without ACLs
    #[serde(default)]
    pub acl_token: Option<String>,

    /// Namespace used when the navigation context carries none
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_scheduler_url() -> String {
    "http://localhost:4646".to_string()
}

fn default_namespace() -> String {
    "default".to_string()
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            base_url: default_scheduler_url(),
            acl_token: None,
            namespace: default_namespace(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults when the
    /// file does not exist
    pub async fn load(path: &str) -> Result<Self, crate::errors::ConsoleError> {
        let file = File::new(path);
        if !file.exists().await {
            return Ok(Self::default());
        }
        file.read_json().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.scheduler.base_url, "http://localhost:4646");
        assert_eq!(settings.scheduler.namespace, "default");
        assert!(settings.scheduler.acl_token.is_none());
        assert_eq!(settings.log_level, LogLevel::Info);
    }
}
