//! Stellar public key format checks
//!
//! Only the shape of the key is checked (length and leading `G`). The
//! base-32 alphabet and the CRC16 checksum of a real strkey are not verified.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of an encoded Stellar account ID
pub const PUBLIC_KEY_LEN: usize = 56;

/// Version prefix character of an account ID
pub const PUBLIC_KEY_PREFIX: char = 'G';

/// Why a candidate address was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("no address supplied")]
    Empty,

    #[error("expected 56 characters, got {0}")]
    WrongLength(usize),

    #[error("address must start with 'G'")]
    WrongPrefix,
}

/// Returns true iff `candidate` is 56 characters long and starts with `G`.
///
/// `None` and the empty string are simply invalid.
pub fn is_valid_address(candidate: Option<&str>) -> bool {
    candidate.map(check_format).is_some_and(|r| r.is_ok())
}

fn check_format(candidate: &str) -> Result<(), AddressError> {
    if candidate.is_empty() {
        return Err(AddressError::Empty);
    }
    let len = candidate.chars().count();
    if len != PUBLIC_KEY_LEN {
        return Err(AddressError::WrongLength(len));
    }
    if !candidate.starts_with(PUBLIC_KEY_PREFIX) {
        return Err(AddressError::WrongPrefix);
    }
    Ok(())
}

/// A Stellar account public key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(String);

impl PublicKey {
    /// Parse a user-supplied key, applying the format check
    pub fn parse(candidate: &str) -> Result<Self, AddressError> {
        check_format(candidate)?;
        Ok(Self(candidate.to_string()))
    }

    /// Wrap a key exactly as a wallet provider reported it.
    ///
    /// Provider output is trusted and kept byte-for-byte.
    pub(crate) fn reported(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short display form, `GABCDEFG...WXYZ1234`
    pub fn abbreviated(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 16 {
            return self.0.clone();
        }
        let head: String = chars[..8].iter().collect();
        let tail: String = chars[chars.len() - 8..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PublicKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
