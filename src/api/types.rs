use serde::{Deserialize, Serialize};

use crate::types::{Balances, Network};

/// Body of `GET /wallet/balance`
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceResponse {
    #[serde(alias = "offchainBalance")]
    pub offchain_balance: u64,
    #[serde(alias = "onchainBalance")]
    pub onchain_balance: u64,
}

impl From<BalanceResponse> for Balances {
    fn from(resp: BalanceResponse) -> Self {
        Balances {
            offchain: resp.offchain_balance,
            onchain: resp.onchain_balance,
        }
    }
}

/// Body of `POST /payment/send`
///
/// `amount` is `null` when the user typed something that is not an amount;
/// the service rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendPaymentRequest {
    pub network: Network,
    pub to: String,
    pub amount: Option<u64>,
}

/// Body of `POST /wallet/deposit`
///
/// Outer `None` omits the field (settle everything), `Some(None)` sends
/// `null`, `Some(Some(n))` settles `n`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DepositRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Option<u64>>,
}

/// Body of `POST /wallet/withdraw`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub to: String,
    pub amount: Option<u64>,
}

/// Body of `POST /wallet/faucet`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaucetRequest {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxidResponse {
    pub txid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FaucetResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deposit_body_variants() {
        let all = serde_json::to_value(DepositRequest { amount: None }).unwrap();
        assert_eq!(all, json!({}));

        let partial = serde_json::to_value(DepositRequest {
            amount: Some(Some(500)),
        })
        .unwrap();
        assert_eq!(partial, json!({ "amount": 500 }));

        let malformed = serde_json::to_value(DepositRequest { amount: Some(None) }).unwrap();
        assert_eq!(malformed, json!({ "amount": null }));
    }

    #[test]
    fn test_send_body_uses_wire_network() {
        let body = serde_json::to_value(SendPaymentRequest {
            network: Network::Offchain,
            to: "tark1qxyz".to_string(),
            amount: Some(1500),
        })
        .unwrap();
        assert_eq!(body, json!({ "network": "ark", "to": "tark1qxyz", "amount": 1500 }));
    }

    #[test]
    fn test_balance_response_names() {
        let snake: BalanceResponse =
            serde_json::from_value(json!({ "offchain_balance": 7, "onchain_balance": 9 })).unwrap();
        let camel: BalanceResponse =
            serde_json::from_value(json!({ "offchainBalance": 7, "onchainBalance": 9 })).unwrap();
        assert_eq!(Balances::from(snake), Balances::from(camel));
    }
}
