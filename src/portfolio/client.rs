//! Backend client for portfolio, opportunity and health data
//!
//! `HttpPortfolioClient` keeps a small in-memory cache per public key so a
//! dashboard refresh right after connect does not hit the backend twice.
//! Health checks are never cached.

use super::{Health, OpportunitiesResponse, Opportunity, Portfolio, PortfolioError};
use crate::config::BackendConfig;
use crate::wallet::PublicKey;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use url::Url;

#[async_trait]
pub trait PortfolioClient: Send + Sync {
    async fn portfolio(&self, public_key: &PublicKey) -> Result<Portfolio, PortfolioError>;

    async fn opportunities(&self, public_key: &PublicKey)
        -> Result<Vec<Opportunity>, PortfolioError>;

    async fn health(&self) -> Result<Health, PortfolioError>;

    /// Client name for logging
    fn name(&self) -> &'static str;
}

struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

type Cache<T> = Arc<RwLock<HashMap<String, CacheEntry<T>>>>;

async fn cached<T: Clone>(cache: &Cache<T>, key: &str) -> Option<T> {
    let cache = cache.read().await;
    cache
        .get(key)
        .filter(|entry| entry.expires_at > Instant::now())
        .map(|entry| entry.value.clone())
}

async fn store<T>(cache: &Cache<T>, key: String, value: T, ttl: Duration) {
    let now = Instant::now();
    let mut cache = cache.write().await;
    cache.retain(|_, entry| entry.expires_at > now);
    cache.insert(
        key,
        CacheEntry {
            value,
            expires_at: now + ttl,
        },
    );
}

#[derive(Clone)]
pub struct HttpPortfolioClient {
    client: Client,
    config: BackendConfig,
    cache_ttl: Duration,
    portfolios: Cache<Portfolio>,
    opportunities: Cache<Vec<Opportunity>>,
}

impl HttpPortfolioClient {
    pub fn new(config: BackendConfig) -> Result<Self, PortfolioError> {
        Self::with_cache_ttl(config, Duration::from_secs(60))
    }

    /// A zero TTL disables caching
    pub fn with_cache_ttl(
        config: BackendConfig,
        cache_ttl: Duration,
    ) -> Result<Self, PortfolioError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            config,
            cache_ttl,
            portfolios: Arc::new(RwLock::new(HashMap::new())),
            opportunities: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Drop every cached response
    pub async fn clear_cache(&self) {
        self.portfolios.write().await.clear();
        self.opportunities.write().await.clear();
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, PortfolioError> {
        let start = Instant::now();
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Backend request failed");
            return Err(PortfolioError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        tracing::debug!(
            url = %url,
            latency_ms = start.elapsed().as_millis() as u64,
            bytes = body.len(),
            "Backend response received"
        );
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl PortfolioClient for HttpPortfolioClient {
    async fn portfolio(&self, public_key: &PublicKey) -> Result<Portfolio, PortfolioError> {
        if let Some(hit) = cached(&self.portfolios, public_key.as_str()).await {
            tracing::debug!(public_key = %public_key.abbreviated(), "Portfolio served from cache");
            return Ok(hit);
        }

        let portfolio: Portfolio = self
            .get_json(self.config.portfolio_url(public_key.as_str()))
            .await?;
        if !self.cache_ttl.is_zero() {
            store(
                &self.portfolios,
                public_key.to_string(),
                portfolio.clone(),
                self.cache_ttl,
            )
            .await;
        }
        Ok(portfolio)
    }

    async fn opportunities(
        &self,
        public_key: &PublicKey,
    ) -> Result<Vec<Opportunity>, PortfolioError> {
        if let Some(hit) = cached(&self.opportunities, public_key.as_str()).await {
            return Ok(hit);
        }

        let response: OpportunitiesResponse = self
            .get_json(self.config.opportunities_url(public_key.as_str()))
            .await?;
        if !self.cache_ttl.is_zero() {
            store(
                &self.opportunities,
                public_key.to_string(),
                response.opportunities.clone(),
                self.cache_ttl,
            )
            .await;
        }
        Ok(response.opportunities)
    }

    async fn health(&self) -> Result<Health, PortfolioError> {
        self.get_json(self.config.health_url()).await
    }

    fn name(&self) -> &'static str {
        "HttpPortfolioClient"
    }
}
