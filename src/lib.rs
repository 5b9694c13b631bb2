//! Ark Wallet Orchestrator: client-side operation layer for a hybrid
//! off-chain/on-chain wallet
//!
//! This crate sequences calls against a remote Ark wallet service, keeps the
//! resulting wallet state consistent across independently failing calls, and
//! warns before a payment that would leave a disproportionately large UTXO.
//!
//! # Architecture
//!
//! - **API Client**: typed HTTP wrapper, one attempt per call, publishes failures
//! - **State Store**: addresses, balances, UTXO snapshot, fee quote, txids
//! - **Error Slot**: the most recent failure, kept until acknowledged
//! - **Risk Heuristic**: pure consolidation check over a UTXO snapshot
//! - **Orchestrator**: the named wallet operations
//!
//! # Example
//!
//! ```ignore
//! use ark_wallet_orchestrator::{ClientConfig, Network, WalletOrchestrator};
//!
//! let wallet = WalletOrchestrator::new(ClientConfig::new("http://localhost:8080"))?;
//! wallet.sync().await?;
//!
//! wallet.estimate_fees("1500", Network::Offchain).await?;
//! if let Some(warning) = wallet.state().utxo_warning() {
//!     println!("{}", warning);
//! }
//!
//! let txid = wallet.send_payment(Network::Offchain, "tark1q...", "1500").await?;
//! ```

// Public modules
pub mod api;
pub mod config;
pub mod error;
pub mod error_slot;
pub mod heuristic;
pub mod orchestrator;
pub mod state;
pub mod types;

// Re-exports for convenience
pub use api::{Endpoint, WalletApiClient};
pub use config::{ClientConfig, ResponseOrdering};
pub use error::ApiError;
pub use error_slot::{ErrorSlot, OperationError};
pub use heuristic::{
    needs_consolidation_warning, needs_consolidation_warning_with_factor, ConsolidationWarning,
    CONSOLIDATION_FACTOR,
};
pub use orchestrator::WalletOrchestrator;
pub use state::{StateSlot, Ticket, WalletSnapshot, WalletState};
pub use types::{
    format_sats, AmountInput, Balances, FeeBreakdown, FeeQuote, Network, Utxo, UtxoStatus,
    WalletAddresses,
};

// Common result type
pub type Result<T> = std::result::Result<T, ApiError>;
