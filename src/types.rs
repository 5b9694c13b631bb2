//! Wallet data model
//!
//! Values held by the state store and exchanged with the wallet service.
//! All amounts are denominated in satoshis.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment network selector
///
/// The off-chain network is called `ark` on the wire, which is the name the
/// wallet service dispatches on. `offchain` is accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Network {
    #[default]
    #[serde(rename = "ark", alias = "offchain")]
    Offchain,
    #[serde(rename = "onchain")]
    Onchain,
}

impl Network {
    /// Wire name of the network
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Offchain => "ark",
            Network::Onchain => "onchain",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ark" | "offchain" => Ok(Network::Offchain),
            "onchain" => Ok(Network::Onchain),
            other => Err(format!("invalid network: {}", other)),
        }
    }
}

/// Address pair issued by the wallet service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAddresses {
    /// Address receiving off-chain (VTXO) payments
    #[serde(alias = "offchainAddress")]
    pub offchain_address: String,
    /// On-chain address used to board funds into the off-chain system
    #[serde(alias = "boardingAddress")]
    pub boarding_address: String,
}

/// Off-chain and on-chain balances, always replaced together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balances {
    pub offchain: u64,
    pub onchain: u64,
}

impl Balances {
    pub fn total(&self) -> u64 {
        self.offchain.saturating_add(self.onchain)
    }
}

/// One entry of the UTXO snapshot
///
/// No identity is tracked across refreshes; the whole list is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub amount: u64,
    pub locked: bool,
    pub spendable: bool,
}

impl Utxo {
    /// Display status; `locked` wins over `spendable`
    pub fn status(&self) -> UtxoStatus {
        if self.locked {
            UtxoStatus::Locked
        } else if self.spendable {
            UtxoStatus::Spendable
        } else {
            UtxoStatus::Pending
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtxoStatus {
    Locked,
    Spendable,
    Pending,
}

impl fmt::Display for UtxoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UtxoStatus::Locked => "Locked",
            UtxoStatus::Spendable => "Spendable",
            UtxoStatus::Pending => "Pending",
        };
        f.write_str(label)
    }
}

/// Fee estimate for a prospective payment
///
/// The service is expected to keep `total == network + service`; the
/// orchestrator never re-derives the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeQuote {
    #[serde(alias = "total_fee")]
    pub total: u64,
    pub breakdown: FeeBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeBreakdown {
    #[serde(alias = "network_fee")]
    pub network: u64,
    #[serde(alias = "service_fee")]
    pub service: u64,
}

impl FeeQuote {
    /// Whether the breakdown adds up to the total
    pub fn is_consistent(&self) -> bool {
        self.breakdown.network.checked_add(self.breakdown.service) == Some(self.total)
    }
}

/// Amount as typed by the user
///
/// Blank input is `Absent`. Anything that is not a non-negative integer is
/// `Malformed`; it is kept distinct from `Absent` so a typo never turns a
/// partial settlement into "settle everything".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountInput {
    Absent,
    Malformed,
    Value(u64),
}

impl AmountInput {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return AmountInput::Absent;
        }
        match trimmed.parse::<u64>() {
            Ok(value) => AmountInput::Value(value),
            Err(_) => AmountInput::Malformed,
        }
    }

    pub fn value(&self) -> Option<u64> {
        match self {
            AmountInput::Value(value) => Some(*value),
            _ => None,
        }
    }
}

/// Format an amount with thousands separators, e.g. `1,000,000`
pub fn format_sats(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_takes_precedence() {
        let utxo = Utxo {
            amount: 1,
            locked: true,
            spendable: true,
        };
        assert_eq!(utxo.status(), UtxoStatus::Locked);
        assert_eq!(utxo.status().to_string(), "Locked");
    }

    #[test]
    fn test_status_spendable_and_pending() {
        let spendable = Utxo {
            amount: 1,
            locked: false,
            spendable: true,
        };
        let pending = Utxo {
            amount: 1,
            locked: false,
            spendable: false,
        };
        assert_eq!(spendable.status(), UtxoStatus::Spendable);
        assert_eq!(pending.status(), UtxoStatus::Pending);
    }

    #[test]
    fn test_fee_quote_accepts_backend_field_names() {
        let json = r#"{"total_fee":500,"breakdown":{"network_fee":400,"service_fee":100}}"#;
        let quote: FeeQuote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.total, 500);
        assert_eq!(quote.breakdown.network, 400);
        assert!(quote.is_consistent());

        let short = r#"{"total":7,"breakdown":{"network":3,"service":3}}"#;
        let quote: FeeQuote = serde_json::from_str(short).unwrap();
        assert!(!quote.is_consistent());
    }

    #[test]
    fn test_addresses_accept_camel_case() {
        let json = r#"{"offchainAddress":"off1","boardingAddress":"brd1"}"#;
        let addrs: WalletAddresses = serde_json::from_str(json).unwrap();
        assert_eq!(addrs.offchain_address, "off1");
        assert_eq!(addrs.boarding_address, "brd1");
    }

    #[test]
    fn test_network_wire_names() {
        assert_eq!(serde_json::to_string(&Network::Offchain).unwrap(), "\"ark\"");
        let parsed: Network = serde_json::from_str("\"offchain\"").unwrap();
        assert_eq!(parsed, Network::Offchain);
        assert_eq!("ONCHAIN".parse::<Network>().unwrap(), Network::Onchain);
        assert!("lightning".parse::<Network>().is_err());
    }

    #[test]
    fn test_amount_input() {
        assert_eq!(AmountInput::parse(""), AmountInput::Absent);
        assert_eq!(AmountInput::parse("   "), AmountInput::Absent);
        assert_eq!(AmountInput::parse("500"), AmountInput::Value(500));
        assert_eq!(AmountInput::parse(" 42 "), AmountInput::Value(42));
        assert_eq!(AmountInput::parse("abc"), AmountInput::Malformed);
        assert_eq!(AmountInput::parse("-5"), AmountInput::Malformed);
        assert_eq!(AmountInput::parse("1.5"), AmountInput::Malformed);
    }

    #[test]
    fn test_format_sats() {
        assert_eq!(format_sats(0), "0");
        assert_eq!(format_sats(999), "999");
        assert_eq!(format_sats(1000), "1,000");
        assert_eq!(format_sats(1234567), "1,234,567");
    }
}
