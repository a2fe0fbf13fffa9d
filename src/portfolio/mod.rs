//! Portfolio and opportunity data for a connected account
//!
//! The backend is loosely typed: amounts arrive as numbers or numeric
//! strings and optional collections may be missing entirely. Models here
//! accept both shapes and fall back to zero / empty.

mod client;

pub use client::{HttpPortfolioClient, PortfolioClient};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {0}")]
    Status(u16),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Number, numeric string, or anything else (read as 0)
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_float_prefix(&s),
        _ => 0.0,
    })
}

// Leading numeric prefix, so "12.5 XLM" reads as 12.5
fn parse_float_prefix(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in trimmed.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => seen_digit = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return 0.0;
    }
    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Display value that may be sent as a number or a string
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

fn default_asset_code() -> String {
    "XLM".to_string()
}

fn asset_code_or_native<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let code = Option::<String>::deserialize(deserializer)?;
    Ok(code
        .filter(|c| !c.is_empty())
        .unwrap_or_else(default_asset_code))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(default = "default_asset_code", deserialize_with = "asset_code_or_native")]
    pub asset_code: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub balance: f64,
    /// Value in USD
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_value: f64,
    #[serde(default)]
    pub balances: Vec<Balance>,
    /// Assets the backend considers unproductive; shape is backend-defined
    #[serde(default)]
    pub idle_assets: Vec<Value>,
}

impl Portfolio {
    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary {
            total_value: self.total_value,
            asset_count: self.balances.len(),
            idle_count: self.idle_assets.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub asset_count: usize,
    pub idle_count: usize,
}

impl std::fmt::Display for PortfolioSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "${:.2} across {} assets ({} idle)",
            self.total_value, self.asset_count, self.idle_count
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RiskLevel {
    Known(KnownRisk),
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnownRisk {
    Low,
    Medium,
    High,
}

impl Default for RiskLevel {
    fn default() -> Self {
        RiskLevel::Other(String::new())
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Known(KnownRisk::Low) => f.write_str("Low"),
            RiskLevel::Known(KnownRisk::Medium) => f.write_str("Medium"),
            RiskLevel::Known(KnownRisk::High) => f.write_str("High"),
            RiskLevel::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(default)]
    pub protocol: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub risk: RiskLevel,
    #[serde(default, deserialize_with = "lenient_text")]
    pub apy: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tvl: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub action: String,
}

/// Envelope of `GET /api/opportunities/{key}`
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct OpportunitiesResponse {
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    #[serde(default)]
    pub message: String,
}
