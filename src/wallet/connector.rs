//! Wallet connector
//!
//! Single source of truth for "am I connected, to what, as whom", and the
//! dispatcher for per-wallet operations. One connector per user session.
//!
//! Concurrency rules:
//! - `connect` and `auto_connect` are exclusive; an overlapping call fails
//!   with [`ConnectError::ConnectionInProgress`].
//! - `disconnect` is synchronous and always wins: a connect that resolves
//!   after it is discarded with [`ConnectError::Superseded`].
//! - Provider calls have no timeout here; wrap with `tokio::time::timeout`
//!   when bounded latency is needed.

use super::adapters::{default_adapters, WalletAdapter};
use super::address::PublicKey;
use super::environment::Environment;
use super::error::{ConnectError, SignError};
use super::kind::{
    SignedEnvelope, StellarNetwork, TransactionEnvelope, WalletKind, AUTO_CONNECT_ORDER,
};
use super::state::{ConnectionInfo, ConnectionResult, ConnectionState};
use crate::config::Config;
use crate::events::{self, ConnectionEvent, ConnectionEventSink};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};
use url::Url;

/// Clears the in-flight flag when the connect attempt ends
struct ConnectGuard<'a>(&'a AtomicBool);

impl Drop for ConnectGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct WalletConnector {
    env: Arc<dyn Environment>,
    adapters: Vec<Arc<dyn WalletAdapter>>,
    // Never held across an await
    state: RwLock<ConnectionState>,
    connecting: AtomicBool,
    default_network: StellarNetwork,
    sink: Option<Arc<dyn ConnectionEventSink>>,
}

impl WalletConnector {
    /// Connector with the standard adapter for every wallet kind
    pub fn new(env: Arc<dyn Environment>, albedo_sdk_url: Url) -> Self {
        Self::with_adapters(env, default_adapters(albedo_sdk_url))
    }

    /// Standard adapters, Albedo SDK URL and default network from `config`
    pub fn from_config(env: Arc<dyn Environment>, config: &Config) -> Self {
        Self::new(env, config.albedo_sdk_url.clone()).with_default_network(config.default_network)
    }

    pub fn with_adapters(env: Arc<dyn Environment>, adapters: Vec<Arc<dyn WalletAdapter>>) -> Self {
        Self {
            env,
            adapters,
            state: RwLock::new(ConnectionState::default()),
            connecting: AtomicBool::new(false),
            default_network: StellarNetwork::default(),
            sink: None,
        }
    }

    /// Network used by [`WalletConnector::sign_default`]
    pub fn with_default_network(mut self, network: StellarNetwork) -> Self {
        self.default_network = network;
        self
    }

    /// Report connects and disconnects to `sink` (fire-and-forget)
    pub fn with_sink(mut self, sink: Arc<dyn ConnectionEventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn default_network(&self) -> StellarNetwork {
        self.default_network
    }

    fn adapter(&self, kind: WalletKind) -> Option<&Arc<dyn WalletAdapter>> {
        self.adapters.iter().find(|adapter| adapter.kind() == kind)
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ConnectionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ConnectionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_connect(&self) -> Result<ConnectGuard<'_>, ConnectError> {
        self.connecting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ConnectGuard(&self.connecting))
            .map_err(|_| ConnectError::ConnectionInProgress)
    }

    fn emit(&self, event: ConnectionEvent) {
        if let Some(sink) = &self.sink {
            events::dispatch(sink, event);
        }
    }

    /// Which wallets could be connected right now
    pub fn detect_available(&self) -> BTreeMap<WalletKind, bool> {
        self.adapters
            .iter()
            .map(|adapter| (adapter.kind(), adapter.is_available(self.env.as_ref())))
            .collect()
    }

    /// True while a connect is in flight
    pub fn is_connecting(&self) -> bool {
        self.connecting.load(Ordering::Acquire)
    }

    /// Connect to a specific wallet.
    ///
    /// `manual_address` is required for [`WalletKind::Manual`] and ignored
    /// otherwise. On failure the previous connection (if any) is untouched.
    pub async fn connect(
        &self,
        kind: WalletKind,
        manual_address: Option<&str>,
    ) -> Result<ConnectionResult, ConnectError> {
        let _guard = self.begin_connect()?;
        let adapter = self
            .adapter(kind)
            .ok_or(ConnectError::ProviderUnavailable(kind))?;
        self.connect_with(adapter.as_ref(), manual_address).await
    }

    /// Connect to the first installed wallet in [`AUTO_CONNECT_ORDER`].
    ///
    /// Manual entry is never chosen. If the chosen wallet rejects the
    /// handshake that error is returned; later wallets are not tried.
    pub async fn auto_connect(&self) -> Result<ConnectionResult, ConnectError> {
        let _guard = self.begin_connect()?;

        let chosen = AUTO_CONNECT_ORDER
            .iter()
            .filter_map(|kind| self.adapter(*kind))
            .find(|adapter| adapter.is_available(self.env.as_ref()));

        match chosen {
            Some(adapter) => {
                debug!(wallet_kind = %adapter.kind(), "Auto-connect selected wallet");
                self.connect_with(adapter.as_ref(), None).await
            }
            None => {
                info!("Auto-connect found no installed wallet");
                Err(ConnectError::NoProviderDetected)
            }
        }
    }

    // Caller holds the connect guard
    async fn connect_with(
        &self,
        adapter: &dyn WalletAdapter,
        manual_address: Option<&str>,
    ) -> Result<ConnectionResult, ConnectError> {
        let kind = adapter.kind();
        if !adapter.is_available(self.env.as_ref()) {
            info!(wallet_kind = %kind, "Wallet not installed");
            return Err(ConnectError::ProviderUnavailable(kind));
        }

        let epoch = self.read_state().epoch();
        debug!(wallet_kind = %kind, epoch, "Connecting wallet");

        let session = adapter
            .connect(self.env.as_ref(), manual_address)
            .await
            .map_err(|e| {
                let err = e.into_connect_error(kind);
                warn!(wallet_kind = %kind, error = %err, "Wallet connection failed");
                err
            })?;

        let public_key = session.public_key.clone();
        {
            let mut state = self.write_state();
            if state.epoch() != epoch {
                warn!(
                    wallet_kind = %kind,
                    started_epoch = epoch,
                    current_epoch = state.epoch(),
                    "Discarding connection that resolved after disconnect"
                );
                return Err(ConnectError::Superseded(kind));
            }
            state.install(kind, session);
        }

        info!(wallet_kind = %kind, public_key = %public_key, "Wallet connected");
        self.emit(ConnectionEvent::connected(public_key.clone(), kind));
        Ok(ConnectionResult::connected(kind, public_key))
    }

    /// Sign a transaction with the connected wallet
    pub async fn sign(
        &self,
        envelope: &TransactionEnvelope,
        network: StellarNetwork,
    ) -> Result<SignedEnvelope, SignError> {
        let (kind, handle) = {
            let state = self.read_state();
            let active = state.current().ok_or(SignError::NotConnected)?;
            (active.kind, active.handle.clone())
        };
        let handle = handle.ok_or(SignError::UnsupportedByWallet(kind))?;

        debug!(wallet_kind = %kind, network = %network, "Requesting signature");
        handle.sign(envelope, network).await.map_err(|e| {
            warn!(wallet_kind = %kind, error = %e, "Transaction signing failed");
            SignError::SigningFailed {
                kind,
                message: e.message,
            }
        })
    }

    /// Sign on the connector's default network
    pub async fn sign_default(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SignedEnvelope, SignError> {
        self.sign(envelope, self.default_network).await
    }

    /// Forget the current connection. Idempotent and infallible.
    pub fn disconnect(&self) {
        let previous = self.write_state().clear();
        if let Some(active) = previous {
            info!(wallet_kind = %active.kind, "Wallet disconnected");
            self.emit(ConnectionEvent::disconnected(active.public_key, active.kind));
        }
    }

    pub fn connection_info(&self) -> ConnectionInfo {
        self.read_state().info()
    }

    pub fn public_key(&self) -> Option<PublicKey> {
        self.read_state()
            .current()
            .map(|active| active.public_key.clone())
    }
}
