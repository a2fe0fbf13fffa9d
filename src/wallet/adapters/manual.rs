//! Manual entry for wallets without an extension (Lobstr, Ledger, paper)

use super::{AdapterError, AdapterSession, WalletAdapter};
use crate::wallet::address::{AddressError, PublicKey};
use crate::wallet::environment::Environment;
use crate::wallet::kind::WalletKind;
use async_trait::async_trait;

pub struct ManualAdapter;

#[async_trait]
impl WalletAdapter for ManualAdapter {
    fn kind(&self) -> WalletKind {
        WalletKind::Manual
    }

    fn is_available(&self, _env: &dyn Environment) -> bool {
        true
    }

    async fn connect(
        &self,
        _env: &dyn Environment,
        manual_address: Option<&str>,
    ) -> Result<AdapterSession, AdapterError> {
        let candidate = manual_address.map(str::trim).ok_or(AddressError::Empty)?;
        let public_key = PublicKey::parse(candidate)?;

        // No signing path: the user signs in their own wallet app
        Ok(AdapterSession {
            public_key,
            handle: None,
        })
    }
}
