//! Backend connection notifier
//!
//! Posts `{publicKey, walletType}` to the backend's notify endpoint after a
//! successful connection. Disconnects are not reported.

use super::{ConnectionEvent, ConnectionEventSink, EventKind, SinkError};
use crate::config::BackendConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Body of `POST /api/notify-connection`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyPayload {
    pub public_key: String,
    pub wallet_type: String,
}

impl From<&ConnectionEvent> for NotifyPayload {
    fn from(event: &ConnectionEvent) -> Self {
        Self {
            public_key: event.public_key.to_string(),
            wallet_type: event.wallet_kind.name().to_string(),
        }
    }
}

pub struct HttpNotifier {
    client: Client,
    endpoint: Url,
}

impl HttpNotifier {
    pub fn new(config: &BackendConfig) -> Result<Self, SinkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.notify_url(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ConnectionEventSink for HttpNotifier {
    async fn on_event(&self, event: &ConnectionEvent) -> Result<(), SinkError> {
        if event.kind != EventKind::Connected {
            return Ok(());
        }

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&NotifyPayload::from(event))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SinkError::Status(response.status().as_u16()));
        }

        tracing::info!(
            wallet_kind = %event.wallet_kind,
            "Connection notification sent"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "HttpNotifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::testing::VALID_KEY;
    use crate::wallet::{PublicKey, WalletKind};

    #[test]
    fn test_payload_shape() {
        let event =
            ConnectionEvent::connected(PublicKey::parse(VALID_KEY).unwrap(), WalletKind::XBull);
        let json = serde_json::to_value(NotifyPayload::from(&event)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "publicKey": VALID_KEY, "walletType": "xBull" })
        );
    }

    #[tokio::test]
    async fn test_disconnect_is_not_posted() {
        // Port 9 (discard) is never contacted for a disconnect
        let config = BackendConfig::new("http://127.0.0.1:9").unwrap();
        let notifier = HttpNotifier::new(&config).unwrap();
        let event =
            ConnectionEvent::disconnected(PublicKey::parse(VALID_KEY).unwrap(), WalletKind::Rabet);
        assert!(notifier.on_event(&event).await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_error_not_a_panic() {
        let config = BackendConfig::new("http://127.0.0.1:9").unwrap();
        let notifier = HttpNotifier::new(&config).unwrap();
        let event =
            ConnectionEvent::connected(PublicKey::parse(VALID_KEY).unwrap(), WalletKind::Rabet);
        assert!(notifier.on_event(&event).await.is_err());
    }
}
