use reqwest::Method;
use std::fmt;

/// Logical endpoint of the wallet service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CreateWallet,
    Balance,
    Utxos,
    EstimateFees,
    SendPayment,
    Deposit,
    Withdraw,
    Faucet,
}

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::CreateWallet,
        Endpoint::Balance,
        Endpoint::Utxos,
        Endpoint::EstimateFees,
        Endpoint::SendPayment,
        Endpoint::Deposit,
        Endpoint::Withdraw,
        Endpoint::Faucet,
    ];

    pub fn method(&self) -> Method {
        match self {
            Endpoint::Balance | Endpoint::Utxos | Endpoint::EstimateFees => Method::GET,
            _ => Method::POST,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::CreateWallet => "/wallet/create",
            Endpoint::Balance => "/wallet/balance",
            Endpoint::Utxos => "/wallet/utxos",
            Endpoint::EstimateFees => "/payment/estimate",
            Endpoint::SendPayment => "/payment/send",
            Endpoint::Deposit => "/wallet/deposit",
            Endpoint::Withdraw => "/wallet/withdraw",
            Endpoint::Faucet => "/wallet/faucet",
        }
    }

    /// Short name used in logs and error reports
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::CreateWallet => "create-wallet",
            Endpoint::Balance => "get-balance",
            Endpoint::Utxos => "get-utxos",
            Endpoint::EstimateFees => "estimate-fees",
            Endpoint::SendPayment => "send-payment",
            Endpoint::Deposit => "deposit",
            Endpoint::Withdraw => "withdraw",
            Endpoint::Faucet => "faucet",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
