//! Albedo: web-based signer delivered as a script
//!
//! The SDK is not injected by an extension; it is fetched on first use.
//! Connecting is therefore two-phase: load the SDK (once), then run the
//! `publicKey` intent.

use super::{AdapterError, AdapterSession, SigningHandle, WalletAdapter};
use crate::wallet::address::PublicKey;
use crate::wallet::environment::{
    AlbedoApi, AlbedoPublicKeyIntent, AlbedoTxIntent, Environment, ProviderError,
};
use crate::wallet::kind::{SignedEnvelope, StellarNetwork, TransactionEnvelope, WalletKind};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use url::Url;

/// Pinned `@albedo-link/intent` bundle
pub const DEFAULT_ALBEDO_SDK_URL: &str =
    "https://cdn.jsdelivr.net/npm/@albedo-link/intent@0.11.0/lib/albedo.intent.js";

/// Lifecycle of the Albedo SDK in the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkState {
    NotLoaded,
    Loaded,
}

/// Idempotent loader for the Albedo SDK script
pub struct AlbedoSdk {
    url: Url,
    // Held across the load so concurrent callers inject the script once
    state: Mutex<SdkState>,
}

impl AlbedoSdk {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            state: Mutex::new(SdkState::NotLoaded),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn state(&self) -> SdkState {
        *self.state.lock().await
    }

    /// Return the SDK object, loading the script first if needed.
    ///
    /// A no-op when the SDK is already present.
    pub async fn load(&self, env: &dyn Environment) -> Result<Arc<dyn AlbedoApi>, AdapterError> {
        let mut state = self.state.lock().await;

        if let Some(api) = env.albedo() {
            *state = SdkState::Loaded;
            return Ok(api);
        }

        if *state == SdkState::Loaded {
            tracing::warn!("Albedo SDK was loaded but is no longer present, reloading");
            *state = SdkState::NotLoaded;
        }

        if !env.can_load_scripts() {
            return Err(AdapterError::Unavailable);
        }

        tracing::debug!(url = %self.url, "Loading Albedo SDK");
        env.load_script(&self.url)
            .await
            .map_err(|e| ProviderError::new(format!("Failed to load Albedo SDK: {}", e)))?;

        let api = env.albedo().ok_or_else(|| {
            ProviderError::new("Albedo SDK script loaded but did not register `albedo`")
        })?;

        *state = SdkState::Loaded;
        tracing::info!("Albedo SDK loaded");
        Ok(api)
    }
}

pub struct AlbedoAdapter {
    sdk: AlbedoSdk,
}

impl AlbedoAdapter {
    pub fn new(sdk_url: Url) -> Self {
        Self {
            sdk: AlbedoSdk::new(sdk_url),
        }
    }

    pub fn sdk(&self) -> &AlbedoSdk {
        &self.sdk
    }
}

struct AlbedoHandle {
    api: Arc<dyn AlbedoApi>,
}

#[async_trait]
impl SigningHandle for AlbedoHandle {
    async fn sign(
        &self,
        envelope: &TransactionEnvelope,
        network: StellarNetwork,
    ) -> Result<SignedEnvelope, ProviderError> {
        let response = self
            .api
            .tx(AlbedoTxIntent {
                xdr: envelope.as_xdr().to_string(),
                network: network.lowercase_token().to_string(),
            })
            .await?;
        Ok(SignedEnvelope::new(response.signed_envelope_xdr))
    }
}

#[async_trait]
impl WalletAdapter for AlbedoAdapter {
    fn kind(&self) -> WalletKind {
        WalletKind::Albedo
    }

    fn is_available(&self, env: &dyn Environment) -> bool {
        env.albedo().is_some() || env.can_load_scripts()
    }

    async fn connect(
        &self,
        env: &dyn Environment,
        _manual_address: Option<&str>,
    ) -> Result<AdapterSession, AdapterError> {
        let api = self.sdk.load(env).await?;
        let response = api.public_key(AlbedoPublicKeyIntent::default()).await?;

        Ok(AdapterSession {
            public_key: PublicKey::reported(response.pubkey),
            handle: Some(Arc::new(AlbedoHandle { api })),
        })
    }
}
