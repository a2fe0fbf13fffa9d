//! Freighter: `getPublicKey()` then `signTransaction(xdr, network)`

use super::{AdapterError, AdapterSession, SigningHandle, WalletAdapter};
use crate::wallet::address::PublicKey;
use crate::wallet::environment::{Environment, FreighterApi, ProviderError};
use crate::wallet::kind::{SignedEnvelope, StellarNetwork, TransactionEnvelope, WalletKind};
use async_trait::async_trait;
use std::sync::Arc;

pub struct FreighterAdapter;

struct FreighterHandle {
    api: Arc<dyn FreighterApi>,
}

#[async_trait]
impl SigningHandle for FreighterHandle {
    async fn sign(
        &self,
        envelope: &TransactionEnvelope,
        network: StellarNetwork,
    ) -> Result<SignedEnvelope, ProviderError> {
        let signed = self
            .api
            .sign_transaction(envelope.as_xdr(), network.as_str())
            .await?;
        Ok(SignedEnvelope::new(signed))
    }
}

#[async_trait]
impl WalletAdapter for FreighterAdapter {
    fn kind(&self) -> WalletKind {
        WalletKind::Freighter
    }

    fn is_available(&self, env: &dyn Environment) -> bool {
        env.freighter().is_some()
    }

    async fn connect(
        &self,
        env: &dyn Environment,
        _manual_address: Option<&str>,
    ) -> Result<AdapterSession, AdapterError> {
        let api = env.freighter().ok_or(AdapterError::Unavailable)?;
        let public_key = api.get_public_key().await?;

        Ok(AdapterSession {
            public_key: PublicKey::reported(public_key),
            handle: Some(Arc::new(FreighterHandle { api })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::testing::{FakeEnvironment, FakeFreighter, SCENARIO_KEY};

    #[tokio::test]
    async fn test_connect_reports_key_verbatim() {
        let env = FakeEnvironment::new().with_freighter(FakeFreighter::resolving(SCENARIO_KEY));
        let session = FreighterAdapter.connect(&env, None).await.unwrap();
        assert_eq!(session.public_key.as_str(), SCENARIO_KEY);
        assert!(session.handle.is_some());
    }

    #[tokio::test]
    async fn test_sign_passes_uppercase_network() {
        let freighter = FakeFreighter::resolving(SCENARIO_KEY);
        let calls = freighter.sign_calls();
        let env = FakeEnvironment::new().with_freighter(freighter);

        let session = FreighterAdapter.connect(&env, None).await.unwrap();
        let signed = session
            .handle
            .unwrap()
            .sign(&TransactionEnvelope::new("AAAA"), StellarNetwork::Testnet)
            .await
            .unwrap();

        assert_eq!(signed.as_xdr(), "signed:AAAA");
        assert_eq!(
            calls.lock().unwrap().as_slice(),
            &[("AAAA".to_string(), Some("TESTNET".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_absent_provider() {
        let env = FakeEnvironment::new();
        assert!(!FreighterAdapter.is_available(&env));
        let err = FreighterAdapter.connect(&env, None).await.unwrap_err();
        assert_eq!(err, AdapterError::Unavailable);
    }
}
