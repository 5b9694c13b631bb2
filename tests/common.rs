//! Common test utilities for orchestrator integration tests
//!
//! Boots the in-memory wallet service on an ephemeral port and builds an
//! orchestrator pointed at it.

#![allow(dead_code)]

use ark_wallet_orchestrator::{ClientConfig, ResponseOrdering, Utxo, WalletOrchestrator};
use std::sync::Arc;
use wallet_mock::{spawn_server, LedgerConfig, MockBackend};

/// Orchestrator wired to a fresh mock backend
pub struct TestEnvironment {
    pub backend: Arc<MockBackend>,
    pub wallet: WalletOrchestrator,
    pub base_url: String,
}

impl TestEnvironment {
    pub async fn new() -> anyhow::Result<Self> {
        Self::build(LedgerConfig::default(), ResponseOrdering::LastWriteWins).await
    }

    pub async fn with_ledger(ledger: LedgerConfig) -> anyhow::Result<Self> {
        Self::build(ledger, ResponseOrdering::LastWriteWins).await
    }

    pub async fn with_ordering(ordering: ResponseOrdering) -> anyhow::Result<Self> {
        Self::build(LedgerConfig::default(), ordering).await
    }

    async fn build(ledger: LedgerConfig, ordering: ResponseOrdering) -> anyhow::Result<Self> {
        init_logging();

        let backend = Arc::new(MockBackend::new(ledger));
        let addr = spawn_server(backend.clone()).await?;
        let base_url = format!("http://{}", addr);
        log::info!("Mock wallet service at {}", base_url);

        let config = ClientConfig::new(base_url.clone()).with_response_ordering(ordering);
        let wallet = WalletOrchestrator::new(config)?;

        Ok(Self {
            backend,
            wallet,
            base_url,
        })
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn utxo(amount: u64, locked: bool, spendable: bool) -> Utxo {
    Utxo {
        amount,
        locked,
        spendable,
    }
}

/// A URL nothing is listening on
pub async fn closed_url() -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}
