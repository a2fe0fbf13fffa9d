//! Connection state owned by one connector

use super::adapters::{AdapterSession, SigningHandle};
use super::address::PublicKey;
use super::kind::WalletKind;
use serde::Serialize;
use std::sync::Arc;

/// A live wallet connection
pub struct ActiveConnection {
    pub kind: WalletKind,
    pub public_key: PublicKey,
    pub(crate) handle: Option<Arc<dyn SigningHandle>>,
}

impl ActiveConnection {
    pub fn can_sign(&self) -> bool {
        self.handle.is_some()
    }
}

impl std::fmt::Debug for ActiveConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveConnection")
            .field("kind", &self.kind)
            .field("public_key", &self.public_key)
            .field("can_sign", &self.can_sign())
            .finish()
    }
}

/// Current connection (if any) plus an epoch that changes on every
/// connect and disconnect.
///
/// A connect that started under an older epoch must not be installed.
#[derive(Debug, Default)]
pub struct ConnectionState {
    current: Option<ActiveConnection>,
    epoch: u64,
}

impl ConnectionState {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn current(&self) -> Option<&ActiveConnection> {
        self.current.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.current.is_some()
    }

    /// Replace the connection wholesale
    pub(crate) fn install(&mut self, kind: WalletKind, session: AdapterSession) {
        self.epoch += 1;
        self.current = Some(ActiveConnection {
            kind,
            public_key: session.public_key,
            handle: session.handle,
        });
    }

    /// Drop the connection; bumps the epoch even when already empty
    pub(crate) fn clear(&mut self) -> Option<ActiveConnection> {
        self.epoch += 1;
        self.current.take()
    }

    pub fn info(&self) -> ConnectionInfo {
        match &self.current {
            Some(active) => ConnectionInfo {
                connected: true,
                public_key: Some(active.public_key.clone()),
                wallet_kind: Some(active.kind),
            },
            None => ConnectionInfo::default(),
        }
    }
}

/// Read-only snapshot of the connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    pub connected: bool,
    pub public_key: Option<PublicKey>,
    pub wallet_kind: Option<WalletKind>,
}

/// Returned by a successful connect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionResult {
    pub success: bool,
    pub public_key: PublicKey,
    pub wallet_kind: WalletKind,
}

impl ConnectionResult {
    pub(crate) fn connected(kind: WalletKind, public_key: PublicKey) -> Self {
        Self {
            success: true,
            public_key,
            wallet_kind: kind,
        }
    }
}
