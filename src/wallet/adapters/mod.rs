//! One adapter per wallet kind
//!
//! Every adapter exposes the same capability set: a presence probe, a
//! connect sequence that yields a normalized [`AdapterSession`], and (through
//! the session's handle) transaction signing. The connector dispatches on
//! the adapter, never on the kind, so supporting a new wallet means adding a
//! new adapter here.

mod albedo;
mod freighter;
mod manual;
mod rabet;
mod xbull;

pub use albedo::{AlbedoAdapter, AlbedoSdk, SdkState, DEFAULT_ALBEDO_SDK_URL};
pub use freighter::FreighterAdapter;
pub use manual::ManualAdapter;
pub use rabet::RabetAdapter;
pub use xbull::XBullAdapter;

use super::address::{AddressError, PublicKey};
use super::environment::{Environment, ProviderError};
use super::error::ConnectError;
use super::kind::{SignedEnvelope, StellarNetwork, TransactionEnvelope, WalletKind};
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// Signing capability of a live provider session
#[async_trait]
pub trait SigningHandle: Send + Sync {
    async fn sign(
        &self,
        envelope: &TransactionEnvelope,
        network: StellarNetwork,
    ) -> Result<SignedEnvelope, ProviderError>;
}

/// Normalized outcome of an adapter's connect sequence
pub struct AdapterSession {
    pub public_key: PublicKey,
    /// `None` for wallets with no programmatic signing path
    pub handle: Option<Arc<dyn SigningHandle>>,
}

impl std::fmt::Debug for AdapterSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterSession")
            .field("public_key", &self.public_key)
            .field("can_sign", &self.handle.is_some())
            .finish()
    }
}

/// Adapter-level failure, wrapped by the connector with the wallet kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error("provider not present")]
    Unavailable,

    #[error(transparent)]
    Rejected(#[from] ProviderError),

    #[error(transparent)]
    InvalidAddress(#[from] AddressError),
}

impl AdapterError {
    pub(crate) fn into_connect_error(self, kind: WalletKind) -> ConnectError {
        match self {
            AdapterError::Unavailable => ConnectError::ProviderUnavailable(kind),
            AdapterError::Rejected(e) => ConnectError::HandshakeRejected {
                kind,
                message: e.message,
            },
            AdapterError::InvalidAddress(e) => ConnectError::InvalidAddress(e),
        }
    }
}

#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn kind(&self) -> WalletKind;

    /// Presence probe; must not fail or block
    fn is_available(&self, env: &dyn Environment) -> bool;

    /// Run the wallet's connect sequence.
    ///
    /// `manual_address` is only meaningful for the manual adapter.
    async fn connect(
        &self,
        env: &dyn Environment,
        manual_address: Option<&str>,
    ) -> Result<AdapterSession, AdapterError>;
}

/// The standard adapter set, one per [`WalletKind`]
pub fn default_adapters(albedo_sdk_url: Url) -> Vec<Arc<dyn WalletAdapter>> {
    vec![
        Arc::new(FreighterAdapter),
        Arc::new(AlbedoAdapter::new(albedo_sdk_url)),
        Arc::new(RabetAdapter),
        Arc::new(XBullAdapter),
        Arc::new(ManualAdapter),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_covers_every_kind() {
        let url: Url = DEFAULT_ALBEDO_SDK_URL.parse().unwrap();
        let kinds: Vec<WalletKind> = default_adapters(url).iter().map(|a| a.kind()).collect();
        for kind in WalletKind::ALL {
            assert!(kinds.contains(&kind), "missing adapter for {kind}");
        }
    }

    #[test]
    fn test_adapter_error_wrapping() {
        let err = AdapterError::Rejected(ProviderError::new("User declined"));
        assert_eq!(
            err.into_connect_error(WalletKind::XBull),
            ConnectError::HandshakeRejected {
                kind: WalletKind::XBull,
                message: "User declined".into()
            }
        );
        assert_eq!(
            AdapterError::Unavailable.into_connect_error(WalletKind::Rabet),
            ConnectError::ProviderUnavailable(WalletKind::Rabet)
        );
    }
}
