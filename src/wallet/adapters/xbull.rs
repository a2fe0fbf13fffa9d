//! xBull: authorize with `connect()`, then `getPublicKey()`

use super::{AdapterError, AdapterSession, SigningHandle, WalletAdapter};
use crate::wallet::address::PublicKey;
use crate::wallet::environment::{Environment, ProviderError, XBullApi};
use crate::wallet::kind::{SignedEnvelope, StellarNetwork, TransactionEnvelope, WalletKind};
use async_trait::async_trait;
use std::sync::Arc;

pub struct XBullAdapter;

struct XBullHandle {
    api: Arc<dyn XBullApi>,
}

#[async_trait]
impl SigningHandle for XBullHandle {
    async fn sign(
        &self,
        envelope: &TransactionEnvelope,
        network: StellarNetwork,
    ) -> Result<SignedEnvelope, ProviderError> {
        tracing::debug!(
            network = %network,
            "xBull signs on its own selected network"
        );
        let signed = self.api.sign_transaction(envelope.as_xdr()).await?;
        Ok(SignedEnvelope::new(signed))
    }
}

#[async_trait]
impl WalletAdapter for XBullAdapter {
    fn kind(&self) -> WalletKind {
        WalletKind::XBull
    }

    fn is_available(&self, env: &dyn Environment) -> bool {
        env.xbull().is_some()
    }

    async fn connect(
        &self,
        env: &dyn Environment,
        _manual_address: Option<&str>,
    ) -> Result<AdapterSession, AdapterError> {
        let api = env.xbull().ok_or(AdapterError::Unavailable)?;
        api.connect().await?;
        let public_key = api.get_public_key().await?;

        Ok(AdapterSession {
            public_key: PublicKey::reported(public_key),
            handle: Some(Arc::new(XBullHandle { api })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::testing::{FakeEnvironment, FakeXBull, VALID_KEY};

    #[tokio::test]
    async fn test_authorizes_before_reading_key() {
        let xbull = FakeXBull::resolving(VALID_KEY);
        let log = xbull.call_log();
        let env = FakeEnvironment::new().with_xbull(xbull);

        let session = XBullAdapter.connect(&env, None).await.unwrap();

        assert_eq!(session.public_key.as_str(), VALID_KEY);
        assert_eq!(
            log.lock().unwrap().as_slice(),
            &["connect", "getPublicKey"]
        );
    }

    #[tokio::test]
    async fn test_declined_authorization_skips_key_read() {
        let xbull = FakeXBull::declining("User closed the popup");
        let log = xbull.call_log();
        let env = FakeEnvironment::new().with_xbull(xbull);

        let err = XBullAdapter.connect(&env, None).await.unwrap_err();

        assert_eq!(
            err,
            AdapterError::Rejected(ProviderError::new("User closed the popup"))
        );
        assert_eq!(log.lock().unwrap().as_slice(), &["connect"]);
    }

    #[tokio::test]
    async fn test_sign_has_no_network_argument() {
        let xbull = FakeXBull::resolving(VALID_KEY);
        let calls = xbull.sign_calls();
        let env = FakeEnvironment::new().with_xbull(xbull);

        let session = XBullAdapter.connect(&env, None).await.unwrap();
        let signed = session
            .handle
            .unwrap()
            .sign(&TransactionEnvelope::new("CCCC"), StellarNetwork::Testnet)
            .await
            .unwrap();

        assert_eq!(signed.as_xdr(), "xbull:CCCC");
        assert_eq!(calls.lock().unwrap()[0], ("CCCC".to_string(), None));
    }
}
