//! Stellar Wallet Connector
//!
//! One entry point for the Stellar wallet extensions a user may have
//! installed:
//! - Detect Freighter, Albedo, Rabet and xBull, or accept a pasted address
//! - Connect through a single contract and track who is connected
//! - Delegate transaction signing to the connected wallet
//! - Report connections to the backend and load the account's portfolio
//!
//! # Model
//!
//! - Provider SDKs are reached through an injected [`wallet::Environment`]
//! - One [`WalletConnector`] per user session owns the connection state
//! - Event sinks are fire-and-forget and never fail a connect

pub mod config;
pub mod dashboard;
pub mod events;
pub mod portfolio;
pub mod wallet;

mod error;

// Re-export commonly used types
pub use config::{BackendConfig, Config};
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use error::{Error, Result};
pub use events::{AuditLogSink, ConnectionEvent, ConnectionEventSink, HttpNotifier, SinkSet};
pub use portfolio::{HttpPortfolioClient, PortfolioClient};
pub use wallet::{is_valid_address, PublicKey, WalletConnector, WalletKind};
