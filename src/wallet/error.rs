//! Connection and signing failures

use super::address::AddressError;
use super::kind::WalletKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("{0} wallet not installed")]
    ProviderUnavailable(WalletKind),

    #[error("{kind} connection failed: {message}")]
    HandshakeRejected { kind: WalletKind, message: String },

    #[error("Invalid Stellar public key: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("No wallet detected")]
    NoProviderDetected,

    #[error("Another connection attempt is still in progress")]
    ConnectionInProgress,

    #[error("{0} connection discarded: wallet was disconnected while connecting")]
    Superseded(WalletKind),
}

impl ConnectError {
    /// Message suitable for showing to the user (no raw provider text)
    pub fn user_message(&self) -> &'static str {
        match self {
            ConnectError::ProviderUnavailable(_) => {
                "This wallet is not installed. Install the extension or use manual entry."
            }
            ConnectError::HandshakeRejected { .. } => {
                "The wallet did not approve the connection. Please approve it and try again."
            }
            ConnectError::InvalidAddress(_) => {
                "Invalid Stellar address. Must be 56 characters starting with \"G\"."
            }
            ConnectError::NoProviderDetected => {
                "No wallet detected. Please install a Stellar wallet or use manual connection."
            }
            ConnectError::ConnectionInProgress => {
                "A wallet connection is already in progress. Please wait for it to finish."
            }
            ConnectError::Superseded(_) => "The connection was cancelled.",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    #[error("No wallet connected")]
    NotConnected,

    #[error("{0} wallet cannot sign transactions programmatically")]
    UnsupportedByWallet(WalletKind),

    #[error("Transaction signing failed ({kind}): {message}")]
    SigningFailed { kind: WalletKind, message: String },
}

impl SignError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SignError::NotConnected => "Connect a wallet before signing.",
            SignError::UnsupportedByWallet(_) => {
                "Cannot sign with a manually entered address. Please sign in your wallet app."
            }
            SignError::SigningFailed { .. } => "The wallet could not sign the transaction.",
        }
    }
}
