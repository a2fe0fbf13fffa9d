//! Backend endpoint configuration
//!
//! Resolution order:
//! 1. `WALLET_CONNECTOR_API_URL` - explicit base URL
//! 2. Local development backend (`http://localhost:5000`)
//!
//! # Examples
//!
//! ```bash
//! export WALLET_CONNECTOR_API_URL="https://api.example.com"
//! export WALLET_CONNECTOR_HTTP_TIMEOUT_SECS=5
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable names
pub mod env_vars {
    pub const API_URL: &str = "WALLET_CONNECTOR_API_URL";
    pub const HTTP_TIMEOUT_SECS: &str = "WALLET_CONNECTOR_HTTP_TIMEOUT_SECS";
}

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the notification and portfolio endpoints live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: Url,
    /// Per-request timeout for backend calls
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl BackendConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url: Url = base_url
            .parse()
            .map_err(|e| Error::Config(format!("Invalid backend URL {}: {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Backend URL must be http or https, got {}",
                base_url.scheme()
            )));
        }
        Ok(Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    pub fn from_env() -> Self {
        let mut config = match std::env::var(env_vars::API_URL) {
            Ok(url) => match Self::new(&url) {
                Ok(config) => {
                    tracing::debug!(url = %config.base_url, "Using {}", env_vars::API_URL);
                    config
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring {}", env_vars::API_URL);
                    Self::local()
                }
            },
            Err(_) => Self::local(),
        };

        if let Ok(raw) = std::env::var(env_vars::HTTP_TIMEOUT_SECS) {
            match raw.parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => tracing::warn!(
                    value = %raw,
                    "Ignoring invalid {}",
                    env_vars::HTTP_TIMEOUT_SECS
                ),
            }
        }

        config
    }

    fn local() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default backend URL is valid"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `POST` target for connection notifications
    pub fn notify_url(&self) -> Url {
        self.endpoint(&["api", "notify-connection"])
    }

    pub fn portfolio_url(&self, public_key: &str) -> Url {
        self.endpoint(&["api", "portfolio", public_key])
    }

    pub fn opportunities_url(&self, public_key: &str) -> Url {
        self.endpoint(&["api", "opportunities", public_key])
    }

    pub fn health_url(&self) -> Url {
        self.endpoint(&["api", "health"])
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
