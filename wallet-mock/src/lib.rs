//! Wallet Mock Server Library
//!
//! In-memory stand-in for the Ark wallet service. Provides both a standalone
//! binary and library components for embedding the server in tests.

pub mod handlers;
pub mod ledger;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use handlers::{AppState, MockBackend};
pub use ledger::{BackendError, LedgerConfig, MockLedger, Vtxo};
pub use server::{create_router, run_server, spawn_server};
pub use types::*;

// Status codes accepted by the injection hooks
pub use axum::http::StatusCode;
