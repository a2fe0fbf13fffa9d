//! Connection event sinks
//!
//! Sinks hear about connects and disconnects after the fact. Delivery is
//! fire-and-forget: the connector never waits on a sink and a sink failure
//! never reaches the caller of `connect`.

mod audit_log;
mod notifier;

pub use audit_log::AuditLogSink;
pub use notifier::{HttpNotifier, NotifyPayload};

use crate::wallet::{PublicKey, WalletKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionEvent {
    pub id: Uuid,
    pub kind: EventKind,
    pub public_key: PublicKey,
    pub wallet_kind: WalletKind,
    pub occurred_at: DateTime<Utc>,
}

impl ConnectionEvent {
    fn new(kind: EventKind, public_key: PublicKey, wallet_kind: WalletKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            public_key,
            wallet_kind,
            occurred_at: Utc::now(),
        }
    }

    pub fn connected(public_key: PublicKey, wallet_kind: WalletKind) -> Self {
        Self::new(EventKind::Connected, public_key, wallet_kind)
    }

    pub fn disconnected(public_key: PublicKey, wallet_kind: WalletKind) -> Self {
        Self::new(EventKind::Disconnected, public_key, wallet_kind)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint returned status {0}")]
    Status(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait]
pub trait ConnectionEventSink: Send + Sync {
    async fn on_event(&self, event: &ConnectionEvent) -> Result<(), SinkError>;

    /// Name used in logs
    fn name(&self) -> &'static str;
}

/// Delivers each event to several sinks concurrently
#[derive(Clone, Default)]
pub struct SinkSet {
    sinks: Vec<Arc<dyn ConnectionEventSink>>,
}

impl SinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn ConnectionEventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl ConnectionEventSink for SinkSet {
    async fn on_event(&self, event: &ConnectionEvent) -> Result<(), SinkError> {
        let results =
            futures::future::join_all(self.sinks.iter().map(|sink| sink.on_event(event))).await;

        // Every sink is attempted; failures are logged per sink
        for (sink, result) in self.sinks.iter().zip(results) {
            if let Err(e) = result {
                tracing::warn!(sink = sink.name(), error = %e, "Event sink failed");
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "SinkSet"
    }
}

/// Hand an event to a sink without waiting for it.
///
/// Requires a tokio runtime; outside one the event is dropped.
pub(crate) fn dispatch(sink: &Arc<dyn ConnectionEventSink>, event: ConnectionEvent) {
    let handle = match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle,
        Err(_) => {
            tracing::debug!(
                kind = ?event.kind,
                "No async runtime, dropping connection event"
            );
            return;
        }
    };

    let sink = Arc::clone(sink);
    handle.spawn(async move {
        if let Err(e) = sink.on_event(&event).await {
            tracing::warn!(
                sink = sink.name(),
                kind = ?event.kind,
                error = %e,
                "Could not deliver connection event"
            );
        }
    });
}
