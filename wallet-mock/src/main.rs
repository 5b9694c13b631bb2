//! Wallet Mock Server
//!
//! A lightweight in-memory implementation of the Ark wallet service HTTP API.
//! Designed for local development and testing of wallet clients.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::sync::Arc;

use wallet_mock::{run_server, LedgerConfig, MockBackend};

/// Server settings read from the environment (and `.env`)
#[derive(Debug)]
struct MockConfig {
    ledger: LedgerConfig,
    /// Sats available at the boarding address on startup
    initial_boarding: u64,
    host: String,
    port: u16,
}

/// Parse an optional variable, failing loudly on garbage
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_value(name, env::var(name).ok())
}

fn parse_value<T>(name: &str, raw: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {}: {:?}", name, raw)),
        None => Ok(None),
    }
}

impl MockConfig {
    fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let defaults = LedgerConfig::default();
        let ledger = LedgerConfig {
            offchain_address: env::var("MOCK_OFFCHAIN_ADDRESS")
                .unwrap_or(defaults.offchain_address),
            boarding_address: env::var("MOCK_BOARDING_ADDRESS")
                .unwrap_or(defaults.boarding_address),
            fee_rate: parse_var("MOCK_FEE_RATE")?.unwrap_or(defaults.fee_rate),
            faucet_amount: parse_var("MOCK_FAUCET_AMOUNT")?.unwrap_or(defaults.faucet_amount),
        };

        Ok(Self {
            ledger,
            initial_boarding: parse_var("MOCK_INITIAL_BOARDING")?.unwrap_or(0),
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("SERVER_PORT")?.unwrap_or(8080),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let config = MockConfig::load().context("Failed to load configuration")?;

    log::info!(
        "Mock wallet: offchain={} boarding={} fee_rate={} sat/vB",
        config.ledger.offchain_address,
        config.ledger.boarding_address,
        config.ledger.fee_rate
    );
    if config.initial_boarding > 0 {
        log::info!("Seeding {} sats of boarding funds", config.initial_boarding);
    }

    let backend = Arc::new(MockBackend::new(config.ledger));
    backend.ledger().set_boarding(config.initial_boarding);

    run_server(backend, config.host, config.port)
        .await
        .context("Server error")
}
