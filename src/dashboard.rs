//! Post-connection dashboard loading
//!
//! Once a wallet is connected the portfolio and opportunity panels are
//! loaded side by side. A panel that fails to load is reported on its own
//! and never affects the connection or the other panel.

use crate::portfolio::{Opportunity, Portfolio, PortfolioClient, PortfolioError, PortfolioSummary};
use crate::wallet::{PublicKey, WalletConnector, WalletKind};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything shown after a refresh
#[derive(Debug)]
pub struct DashboardSnapshot {
    pub public_key: PublicKey,
    pub wallet_kind: WalletKind,
    pub portfolio: std::result::Result<Portfolio, PortfolioError>,
    pub opportunities: std::result::Result<Vec<Opportunity>, PortfolioError>,
}

impl DashboardSnapshot {
    pub fn summary(&self) -> Option<PortfolioSummary> {
        self.portfolio.as_ref().ok().map(Portfolio::summary)
    }

    pub fn is_complete(&self) -> bool {
        self.portfolio.is_ok() && self.opportunities.is_ok()
    }
}

pub struct Dashboard {
    connector: Arc<WalletConnector>,
    client: Arc<dyn PortfolioClient>,
}

impl Dashboard {
    pub fn new(connector: Arc<WalletConnector>, client: Arc<dyn PortfolioClient>) -> Self {
        Self { connector, client }
    }

    pub fn connector(&self) -> &Arc<WalletConnector> {
        &self.connector
    }

    /// Reload both panels for the connected account
    pub async fn refresh(&self) -> Result<DashboardSnapshot> {
        let info = self.connector.connection_info();
        let (Some(public_key), Some(wallet_kind)) = (info.public_key, info.wallet_kind) else {
            return Err(Error::NotConnected);
        };

        let (portfolio, opportunities) = tokio::join!(
            self.client.portfolio(&public_key),
            self.client.opportunities(&public_key)
        );

        match &portfolio {
            Ok(p) => info!(
                public_key = %public_key.abbreviated(),
                summary = %p.summary(),
                "Portfolio loaded"
            ),
            Err(e) => warn!(client = self.client.name(), error = %e, "Failed to load portfolio"),
        }
        match &opportunities {
            Ok(o) => info!(count = o.len(), "Opportunities loaded"),
            Err(e) => warn!(
                client = self.client.name(),
                error = %e,
                "Failed to load opportunities"
            ),
        }

        Ok(DashboardSnapshot {
            public_key,
            wallet_kind,
            portfolio,
            opportunities,
        })
    }

    /// Connect, then load the panels for the new account
    pub async fn connect_and_load(
        &self,
        kind: WalletKind,
        manual_address: Option<&str>,
    ) -> Result<DashboardSnapshot> {
        self.connector.connect(kind, manual_address).await?;
        self.refresh().await
    }
}
