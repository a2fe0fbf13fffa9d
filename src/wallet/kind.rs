//! Wallet kinds, networks and transaction envelopes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported wallet kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Freighter,
    Albedo,
    Rabet,
    #[serde(rename = "xbull")]
    XBull,
    /// User-entered address (Lobstr, hardware wallets, paper wallets)
    Manual,
}

/// Order in which `auto_connect` tries installed wallets.
///
/// Only breaks ties when several extensions are installed at once.
pub const AUTO_CONNECT_ORDER: [WalletKind; 4] = [
    WalletKind::Freighter,
    WalletKind::Rabet,
    WalletKind::XBull,
    WalletKind::Albedo,
];

impl WalletKind {
    pub const ALL: [WalletKind; 5] = [
        WalletKind::Freighter,
        WalletKind::Albedo,
        WalletKind::Rabet,
        WalletKind::XBull,
        WalletKind::Manual,
    ];

    /// Display name, also reported to the backend as `walletType`
    pub fn name(&self) -> &'static str {
        match self {
            WalletKind::Freighter => "Freighter",
            WalletKind::Albedo => "Albedo",
            WalletKind::Rabet => "Rabet",
            WalletKind::XBull => "xBull",
            WalletKind::Manual => "Manual",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WalletKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "freighter" => Ok(WalletKind::Freighter),
            "albedo" => Ok(WalletKind::Albedo),
            "rabet" => Ok(WalletKind::Rabet),
            "xbull" => Ok(WalletKind::XBull),
            "manual" | "lobstr" | "custom" => Ok(WalletKind::Manual),
            other => Err(format!("Unknown wallet kind: {}", other)),
        }
    }
}

/// Stellar network selector in the connector's own vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StellarNetwork {
    #[default]
    Public,
    Testnet,
}

impl StellarNetwork {
    /// `PUBLIC` / `TESTNET`, as Freighter and Rabet expect
    pub fn as_str(&self) -> &'static str {
        match self {
            StellarNetwork::Public => "PUBLIC",
            StellarNetwork::Testnet => "TESTNET",
        }
    }

    /// `public` / `testnet`, as Albedo intents expect
    pub fn lowercase_token(&self) -> &'static str {
        match self {
            StellarNetwork::Public => "public",
            StellarNetwork::Testnet => "testnet",
        }
    }
}

impl fmt::Display for StellarNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unsigned transaction envelope (base64 XDR), passed through untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionEnvelope(String);

impl TransactionEnvelope {
    pub fn new(xdr: impl Into<String>) -> Self {
        Self(xdr.into())
    }

    pub fn as_xdr(&self) -> &str {
        &self.0
    }
}

/// Signed transaction envelope (base64 XDR) as returned by the wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedEnvelope(String);

impl SignedEnvelope {
    pub fn new(xdr: impl Into<String>) -> Self {
        Self(xdr.into())
    }

    pub fn as_xdr(&self) -> &str {
        &self.0
    }
}
