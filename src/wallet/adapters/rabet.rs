//! Rabet: `connect()` returns `{publicKey}`; `sign()` returns `{xdr}`

use super::{AdapterError, AdapterSession, SigningHandle, WalletAdapter};
use crate::wallet::address::PublicKey;
use crate::wallet::environment::{Environment, ProviderError, RabetApi};
use crate::wallet::kind::{SignedEnvelope, StellarNetwork, TransactionEnvelope, WalletKind};
use async_trait::async_trait;
use std::sync::Arc;

pub struct RabetAdapter;

struct RabetHandle {
    api: Arc<dyn RabetApi>,
}

#[async_trait]
impl SigningHandle for RabetHandle {
    async fn sign(
        &self,
        envelope: &TransactionEnvelope,
        network: StellarNetwork,
    ) -> Result<SignedEnvelope, ProviderError> {
        let response = self.api.sign(envelope.as_xdr(), network.as_str()).await?;
        Ok(SignedEnvelope::new(response.xdr))
    }
}

#[async_trait]
impl WalletAdapter for RabetAdapter {
    fn kind(&self) -> WalletKind {
        WalletKind::Rabet
    }

    fn is_available(&self, env: &dyn Environment) -> bool {
        env.rabet().is_some()
    }

    async fn connect(
        &self,
        env: &dyn Environment,
        _manual_address: Option<&str>,
    ) -> Result<AdapterSession, AdapterError> {
        let api = env.rabet().ok_or(AdapterError::Unavailable)?;
        let response = api.connect().await?;

        Ok(AdapterSession {
            public_key: PublicKey::reported(response.public_key),
            handle: Some(Arc::new(RabetHandle { api })),
        })
    }
}
