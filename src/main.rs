//! Stellar Wallet Connector CLI
//!
//! Headless front end: validate addresses, connect a pasted address and
//! query the backend for its portfolio.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use stellar_wallet_connector::wallet::HeadlessEnvironment;
use stellar_wallet_connector::{
    AuditLogSink, Config, ConnectionEvent, ConnectionEventSink, Dashboard, Error, HttpNotifier,
    HttpPortfolioClient, PortfolioClient, PublicKey, Result, SinkSet, WalletConnector, WalletKind,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "wallet-connect")]
#[command(about = "Connect Stellar wallets and inspect their portfolio")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that an address looks like a Stellar public key
    Validate {
        address: String,
    },

    /// Show which wallets are available in this environment
    Detect,

    /// Connect a pasted address, notify the backend and load the dashboard
    Connect {
        #[arg(short, long)]
        address: String,

        /// Skip the backend connection notification
        #[arg(long)]
        no_notify: bool,
    },

    /// Fetch the portfolio for an address
    Portfolio {
        address: String,
    },

    /// Fetch DeFi opportunities for an address
    Opportunities {
        address: String,
    },

    /// Check that the backend is reachable
    Health,

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "info" })
    });
    if cli.json_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Validate { address } => run_validate(&address),
        Commands::Detect => run_detect(&config),
        Commands::Connect { address, no_notify } => {
            run_connect(&config, &address, no_notify).await
        }
        Commands::Portfolio { address } => {
            let key = parse_key(&address)?;
            let portfolio = portfolio_client(&config)?.portfolio(&key).await?;
            println!("{}", portfolio.summary());
            println!("{}", serde_json::to_string_pretty(&portfolio)?);
            Ok(())
        }
        Commands::Opportunities { address } => {
            let key = parse_key(&address)?;
            let opportunities = portfolio_client(&config)?.opportunities(&key).await?;
            println!("{}", serde_json::to_string_pretty(&opportunities)?);
            Ok(())
        }
        Commands::Health => {
            let health = portfolio_client(&config)?.health().await?;
            println!("Backend connected: {}", health.message);
            Ok(())
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn parse_key(address: &str) -> Result<PublicKey> {
    PublicKey::parse(address.trim())
        .map_err(|e| Error::InvalidArgument(format!("{}: {}", address, e)))
}

fn portfolio_client(config: &Config) -> Result<HttpPortfolioClient> {
    Ok(HttpPortfolioClient::with_cache_ttl(
        config.backend.clone(),
        Duration::from_secs(config.portfolio_cache_ttl_secs),
    )?)
}

fn run_validate(address: &str) -> Result<()> {
    match PublicKey::parse(address.trim()) {
        Ok(key) => {
            println!("Valid Stellar public key ({})", key.abbreviated());
            Ok(())
        }
        Err(e) => Err(Error::InvalidArgument(e.to_string())),
    }
}

fn run_detect(config: &Config) -> Result<()> {
    let connector = WalletConnector::from_config(Arc::new(HeadlessEnvironment), config);
    for (kind, available) in connector.detect_available() {
        let status = if available { "available" } else { "not installed" };
        println!("{:<10} {}", kind.name(), status);
    }
    Ok(())
}

async fn run_connect(config: &Config, address: &str, no_notify: bool) -> Result<()> {
    let connector = Arc::new(WalletConnector::from_config(Arc::new(HeadlessEnvironment), config));

    let mut sinks = SinkSet::new();
    if !no_notify {
        sinks = sinks.with(Arc::new(HttpNotifier::new(&config.backend)?));
    }
    if let Some(path) = &config.audit_log_path {
        sinks = sinks.with(Arc::new(AuditLogSink::new(path)));
    }

    let client: Arc<dyn PortfolioClient> = Arc::new(portfolio_client(config)?);
    let dashboard = Dashboard::new(Arc::clone(&connector), client);

    let result = connector
        .connect(WalletKind::Manual, Some(address))
        .await
        .map_err(|e| {
            eprintln!("{}", e.user_message());
            Error::from(e)
        })?;
    println!(
        "Connected {} via {}",
        result.public_key.abbreviated(),
        result.wallet_kind.name()
    );

    // Delivered in-line so the process does not exit before it lands
    if !sinks.is_empty() {
        let event = ConnectionEvent::connected(result.public_key.clone(), result.wallet_kind);
        sinks.on_event(&event).await?;
    }

    let snapshot = dashboard.refresh().await?;
    match &snapshot.portfolio {
        Ok(portfolio) => println!("Portfolio: {}", portfolio.summary()),
        Err(e) => println!("Portfolio unavailable: {}", e),
    }
    match &snapshot.opportunities {
        Ok(opportunities) => {
            println!("{} opportunities", opportunities.len());
            for opp in opportunities {
                println!(
                    "  {} ({}) - {} risk, APY {}, TVL {}",
                    opp.protocol, opp.kind, opp.risk, opp.apy, opp.tvl
                );
            }
        }
        Err(e) => println!("Opportunities unavailable: {}", e),
    }

    Ok(())
}
