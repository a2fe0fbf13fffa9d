//! Configuration for the wallet connector

pub mod backend;

use crate::wallet::adapters::DEFAULT_ALBEDO_SDK_URL;
use crate::wallet::StellarNetwork;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

pub use backend::BackendConfig;

fn default_albedo_sdk_url() -> Url {
    Url::parse(DEFAULT_ALBEDO_SDK_URL).expect("default Albedo SDK URL is valid")
}

fn default_cache_ttl_secs() -> u64 {
    60
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend notification / portfolio service
    #[serde(default)]
    pub backend: BackendConfig,
    /// Script loaded on first Albedo connect
    #[serde(default = "default_albedo_sdk_url")]
    pub albedo_sdk_url: Url,
    /// Network used when signing without an explicit choice
    #[serde(default)]
    pub default_network: StellarNetwork,
    /// Path to audit log file (JSONL); disabled when absent
    #[serde(default)]
    pub audit_log_path: Option<String>,
    /// How long portfolio responses are reused
    #[serde(default = "default_cache_ttl_secs")]
    pub portfolio_cache_ttl_secs: u64,
}

impl Config {
    /// Load a JSON config file; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            albedo_sdk_url: default_albedo_sdk_url(),
            default_network: StellarNetwork::Public,
            audit_log_path: None,
            portfolio_cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_fills_defaults() {
        let value = serde_json::json!({
            "backend": { "base_url": "https://api.example.com" },
            "default_network": "TESTNET"
        });
        let parsed: Config = serde_json::from_value(value).expect("parse config");
        assert_eq!(parsed.backend.base_url.as_str(), "https://api.example.com/");
        assert_eq!(parsed.default_network, StellarNetwork::Testnet);
        assert_eq!(parsed.albedo_sdk_url.as_str(), DEFAULT_ALBEDO_SDK_URL);
        assert_eq!(parsed.portfolio_cache_ttl_secs, 60);
        assert!(parsed.audit_log_path.is_none());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"backend": {{"base_url": "http://backend:9000", "timeout_secs": 3}}, "audit_log_path": "events.jsonl"}}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.backend.timeout_secs, 3);
        assert_eq!(config.audit_log_path.as_deref(), Some("events.jsonl"));
    }

    #[test]
    fn test_from_file_reports_path() {
        let err = Config::from_file(Path::new("/nonexistent/connector.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/connector.json"));
    }
}
