//! Wallet service API client
//!
//! - `client.rs` - HTTP calls, failure classification, error publishing
//! - `endpoint.rs` - Endpoint identifiers (method + path)
//! - `types.rs` - Request and response bodies

pub mod client;
pub mod endpoint;
pub mod types;

pub use client::WalletApiClient;
pub use endpoint::Endpoint;
