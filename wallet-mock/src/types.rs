//! Wallet service request and response types
//!
//! Field names match the wallet service so clients can consume them
//! transparently.

use serde::{Deserialize, Serialize};

/// Routes served by the mock
pub mod routes {
    pub const CREATE_WALLET: &str = "/wallet/create";
    pub const BALANCE: &str = "/wallet/balance";
    pub const UTXOS: &str = "/wallet/utxos";
    pub const ESTIMATE: &str = "/payment/estimate";
    pub const SEND: &str = "/payment/send";
    pub const DEPOSIT: &str = "/wallet/deposit";
    pub const WITHDRAW: &str = "/wallet/withdraw";
    pub const FAUCET: &str = "/wallet/faucet";
}

/// Response from /wallet/create
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletInfo {
    pub offchain_address: String,
    pub boarding_address: String,
}

/// Response from /wallet/balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceInfo {
    pub offchain_balance: u64,
    pub onchain_balance: u64,
}

/// Entry of the /wallet/utxos list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoEntry {
    pub amount: u64,
    pub locked: bool,
    pub spendable: bool,
}

/// Response from /payment/estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEstimate {
    pub total_fee: u64,
    pub breakdown: FeeBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub network_fee: u64,
    pub service_fee: u64,
}

/// Query of /payment/estimate (accepted but not used for pricing)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimateQuery {
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
}

/// Body of /payment/send
#[derive(Debug, Clone, Deserialize)]
pub struct SendRequest {
    pub network: String,
    pub to: String,
    pub amount: Option<u64>,
}

/// Body of /wallet/withdraw
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawRequest {
    pub to: String,
    pub amount: Option<u64>,
}

/// Body of /wallet/faucet
#[derive(Debug, Clone, Deserialize)]
pub struct FaucetRequest {
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxidResponse {
    pub txid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
