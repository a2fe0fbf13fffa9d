//! Error types for the wallet connector

use crate::events::SinkError;
use crate::portfolio::PortfolioError;
use crate::wallet::{ConnectError, SignError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Sign(#[from] SignError),

    #[error("No wallet connected")]
    NotConnected,

    #[error("Portfolio error: {0}")]
    Portfolio(#[from] PortfolioError),

    #[error("Event sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
