//! Stellar wallet connection
//!
//! [`WalletConnector`] owns the connection state for one user session and
//! dispatches connect/sign to per-wallet adapters. Providers are reached
//! through an [`Environment`], so the connector itself never touches
//! browser globals.

pub mod adapters;
mod address;
mod connector;
mod environment;
mod error;
mod kind;
mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use address::{is_valid_address, AddressError, PublicKey, PUBLIC_KEY_LEN, PUBLIC_KEY_PREFIX};
pub use connector::WalletConnector;
pub use environment::{
    AlbedoApi, AlbedoPublicKeyIntent, AlbedoPublicKeyResponse, AlbedoTxIntent, AlbedoTxResponse,
    Environment, FreighterApi, HeadlessEnvironment, ProviderError, RabetApi, RabetConnectResponse,
    RabetSignResponse, XBullApi,
};
pub use error::{ConnectError, SignError};
pub use kind::{
    SignedEnvelope, StellarNetwork, TransactionEnvelope, WalletKind, AUTO_CONNECT_ORDER,
};
pub use state::{ActiveConnection, ConnectionInfo, ConnectionResult, ConnectionState};
