//! Execution environment seam
//!
//! In a browser the wallet extensions inject global objects (`window.freighter`,
//! `window.rabet`, `window.xBullSDK`, `window.albedo`). The connector never
//! touches globals directly; it asks an [`Environment`] for each provider
//! object. Each provider keeps its own method names and result shapes, which
//! the adapters in [`super::adapters`] normalize.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// Raw failure reported by a provider (user declined, extension error, ...)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Freighter extension API
#[async_trait]
pub trait FreighterApi: Send + Sync {
    async fn get_public_key(&self) -> Result<String, ProviderError>;

    /// `network` is `PUBLIC` or `TESTNET`
    async fn sign_transaction(&self, xdr: &str, network: &str) -> Result<String, ProviderError>;
}

/// Response to Rabet's `connect()`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RabetConnectResponse {
    #[serde(rename = "publicKey")]
    pub public_key: String,
}

/// Response to Rabet's `sign()`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RabetSignResponse {
    pub xdr: String,
}

/// Rabet extension API
#[async_trait]
pub trait RabetApi: Send + Sync {
    async fn connect(&self) -> Result<RabetConnectResponse, ProviderError>;

    /// `network` is `PUBLIC` or `TESTNET`
    async fn sign(&self, xdr: &str, network: &str) -> Result<RabetSignResponse, ProviderError>;
}

/// xBull extension API
#[async_trait]
pub trait XBullApi: Send + Sync {
    /// Authorization prompt; must succeed before `get_public_key`
    async fn connect(&self) -> Result<(), ProviderError>;

    async fn get_public_key(&self) -> Result<String, ProviderError>;

    /// xBull picks the network itself
    async fn sign_transaction(&self, xdr: &str) -> Result<String, ProviderError>;
}

/// Albedo `publicKey` intent parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbedoPublicKeyIntent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Albedo `publicKey` intent result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbedoPublicKeyResponse {
    pub pubkey: String,
}

/// Albedo `tx` intent parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbedoTxIntent {
    pub xdr: String,
    /// `public` or `testnet`
    pub network: String,
}

/// Albedo `tx` intent result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbedoTxResponse {
    pub signed_envelope_xdr: String,
}

/// Albedo web SDK (`@albedo-link/intent`)
#[async_trait]
pub trait AlbedoApi: Send + Sync {
    async fn public_key(
        &self,
        intent: AlbedoPublicKeyIntent,
    ) -> Result<AlbedoPublicKeyResponse, ProviderError>;

    async fn tx(&self, intent: AlbedoTxIntent) -> Result<AlbedoTxResponse, ProviderError>;
}

/// Registry of injected provider objects.
///
/// Accessors are cheap presence probes: `None` means the provider is not
/// installed, which is a normal condition.
#[async_trait]
pub trait Environment: Send + Sync {
    fn freighter(&self) -> Option<Arc<dyn FreighterApi>>;

    fn rabet(&self) -> Option<Arc<dyn RabetApi>>;

    fn xbull(&self) -> Option<Arc<dyn XBullApi>>;

    /// The Albedo SDK object, once its script has been loaded
    fn albedo(&self) -> Option<Arc<dyn AlbedoApi>>;

    /// Whether `load_script` can work here at all
    fn can_load_scripts(&self) -> bool;

    /// Inject and await a remote script
    async fn load_script(&self, src: &Url) -> Result<(), ProviderError>;
}

/// Environment with no providers and no script loader (CLI, servers)
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessEnvironment;

#[async_trait]
impl Environment for HeadlessEnvironment {
    fn freighter(&self) -> Option<Arc<dyn FreighterApi>> {
        None
    }

    fn rabet(&self) -> Option<Arc<dyn RabetApi>> {
        None
    }

    fn xbull(&self) -> Option<Arc<dyn XBullApi>> {
        None
    }

    fn albedo(&self) -> Option<Arc<dyn AlbedoApi>> {
        None
    }

    fn can_load_scripts(&self) -> bool {
        false
    }

    async fn load_script(&self, src: &Url) -> Result<(), ProviderError> {
        Err(ProviderError::new(format!(
            "Cannot load {} without a browser document",
            src
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_payload_field_names() {
        let rabet: RabetConnectResponse =
            serde_json::from_str(r#"{"publicKey":"GKEY"}"#).unwrap();
        assert_eq!(rabet.public_key, "GKEY");

        let albedo: AlbedoTxResponse =
            serde_json::from_str(r#"{"signed_envelope_xdr":"AAAA"}"#).unwrap();
        assert_eq!(albedo.signed_envelope_xdr, "AAAA");

        let intent = serde_json::to_value(AlbedoPublicKeyIntent::default()).unwrap();
        assert_eq!(intent, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_headless_has_nothing() {
        let env = HeadlessEnvironment;
        assert!(env.freighter().is_none());
        assert!(env.albedo().is_none());
        assert!(!env.can_load_scripts());

        let url: Url = "https://example.com/sdk.js".parse().unwrap();
        assert!(env.load_script(&url).await.is_err());
    }
}
