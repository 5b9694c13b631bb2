//! In-memory wallet ledger
//!
//! Stands in for the wallet SDK behind the real service: off-chain funds are
//! a list of VTXOs, on-chain funds are a single boarding balance. Spending
//! marks VTXOs as spent and returns change as a fresh VTXO.

use thiserror::Error;

use crate::types::{FeeBreakdown, FeeEstimate, UtxoEntry};

/// Assumed transaction size used for fee estimates
const ESTIMATE_VBYTES: f64 = 100.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("invalid network")]
    InvalidNetwork,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("no funds to settle")]
    NothingToSettle,

    #[error("faucet error: {0}")]
    Faucet(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vtxo {
    pub amount: u64,
    pub spent: bool,
}

impl Vtxo {
    pub fn spendable(amount: u64) -> Self {
        Self {
            amount,
            spent: false,
        }
    }

    pub fn spent(amount: u64) -> Self {
        Self { amount, spent: true }
    }
}

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub offchain_address: String,
    pub boarding_address: String,
    /// Fee rate in sat/vB
    pub fee_rate: f64,
    /// Amount credited by one faucet request
    pub faucet_amount: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            offchain_address: "tark1qmockoffchainaddress".to_string(),
            boarding_address: "bcrt1qmockboardingaddress".to_string(),
            fee_rate: 2.0,
            faucet_amount: 100_000,
        }
    }
}

#[derive(Debug)]
pub struct MockLedger {
    config: LedgerConfig,
    vtxos: Vec<Vtxo>,
    /// Confirmed on-chain funds at the boarding address
    boarding: u64,
    tx_counter: u64,
}

impl MockLedger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            vtxos: Vec::new(),
            boarding: 0,
            tx_counter: 0,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn set_fee_rate(&mut self, fee_rate: f64) {
        self.config.fee_rate = fee_rate;
    }

    pub fn set_vtxos(&mut self, vtxos: Vec<Vtxo>) {
        self.vtxos = vtxos;
    }

    pub fn set_boarding(&mut self, amount: u64) {
        self.boarding = amount;
    }

    /// Addresses for receiving off-chain and boarding on-chain
    pub fn receive(&self) -> (String, String) {
        (
            self.config.offchain_address.clone(),
            self.config.boarding_address.clone(),
        )
    }

    /// Off-chain balance counts spendable VTXOs only
    pub fn balance(&self) -> (u64, u64) {
        let offchain = self
            .vtxos
            .iter()
            .filter(|v| !v.spent)
            .map(|v| v.amount)
            .sum();
        (offchain, self.boarding)
    }

    /// Spendable VTXOs first, then spent ones (reported as locked)
    pub fn list_utxos(&self) -> Vec<UtxoEntry> {
        let spendable = self.vtxos.iter().filter(|v| !v.spent).map(|v| UtxoEntry {
            amount: v.amount,
            locked: false,
            spendable: true,
        });
        let spent = self.vtxos.iter().filter(|v| v.spent).map(|v| UtxoEntry {
            amount: v.amount,
            locked: true,
            spendable: false,
        });
        spendable.chain(spent).collect()
    }

    /// Fee for a 100 vbyte transaction; 80% network, the rest service
    pub fn estimate_fee(&self) -> FeeEstimate {
        let total = (self.config.fee_rate * ESTIMATE_VBYTES) as u64;
        let network_fee = total * 8 / 10;
        FeeEstimate {
            total_fee: total,
            breakdown: FeeBreakdown {
                network_fee,
                service_fee: total - network_fee,
            },
        }
    }

    /// Off-chain payment out of spendable VTXOs
    pub fn send_offchain(&mut self, to: &str, amount: u64) -> Result<String, BackendError> {
        self.spend_vtxos(amount)?;
        let txid = self.next_txid();
        log::info!("Off-chain payment of {} sats to {}: {}", amount, to, txid);
        Ok(txid)
    }

    /// Cooperative exit of off-chain funds to an on-chain address
    pub fn collaborative_exit(&mut self, to: &str, amount: u64) -> Result<String, BackendError> {
        self.spend_vtxos(amount)?;
        let txid = self.next_txid();
        log::info!("Collaborative exit of {} sats to {}: {}", amount, to, txid);
        Ok(txid)
    }

    /// Renew every spendable VTXO and board on-chain funds into one new VTXO
    pub fn settle(&mut self) -> Result<String, BackendError> {
        let (offchain, boarding) = self.balance();
        let total = offchain + boarding;
        if total == 0 {
            return Err(BackendError::NothingToSettle);
        }

        for vtxo in self.vtxos.iter_mut().filter(|v| !v.spent) {
            vtxo.spent = true;
        }
        self.vtxos.push(Vtxo::spendable(total));
        self.boarding = 0;

        let txid = self.next_txid();
        log::info!("Settled {} sats ({} boarded): {}", total, boarding, txid);
        Ok(txid)
    }

    /// Send test funds; credited to the boarding balance when addressed to it
    pub fn faucet(&mut self, address: &str) -> Result<String, BackendError> {
        if address.trim().is_empty() {
            return Err(BackendError::Faucet("empty address".to_string()));
        }
        if address == self.config.boarding_address {
            self.boarding += self.config.faucet_amount;
        }
        let txid = self.next_txid();
        Ok(format!("txId: {}", txid))
    }

    fn spend_vtxos(&mut self, amount: u64) -> Result<(), BackendError> {
        if amount == 0 {
            return Err(BackendError::InvalidAmount);
        }

        let (available, _) = self.balance();
        if available < amount {
            return Err(BackendError::InsufficientFunds {
                needed: amount,
                available,
            });
        }

        let mut collected = 0u64;
        for vtxo in self.vtxos.iter_mut().filter(|v| !v.spent) {
            if collected >= amount {
                break;
            }
            vtxo.spent = true;
            collected += vtxo.amount;
        }

        if collected > amount {
            self.vtxos.push(Vtxo::spendable(collected - amount));
        }
        Ok(())
    }

    fn next_txid(&mut self) -> String {
        self.tx_counter += 1;
        format!("{:064x}", self.tx_counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> MockLedger {
        MockLedger::new(LedgerConfig::default())
    }

    #[test]
    fn test_fee_split() {
        let mut ledger = ledger();
        ledger.set_fee_rate(2.5);
        let fee = ledger.estimate_fee();
        assert_eq!(fee.total_fee, 250);
        assert_eq!(fee.breakdown.network_fee, 200);
        assert_eq!(fee.breakdown.service_fee, 50);
    }

    #[test]
    fn test_fee_split_always_adds_up() {
        let mut ledger = ledger();
        for rate in [0.0, 0.01, 1.0, 1.37, 3.3, 12.0] {
            ledger.set_fee_rate(rate);
            let fee = ledger.estimate_fee();
            assert_eq!(
                fee.breakdown.network_fee + fee.breakdown.service_fee,
                fee.total_fee
            );
        }
    }

    #[test]
    fn test_send_spends_and_returns_change() {
        let mut ledger = ledger();
        ledger.set_vtxos(vec![Vtxo::spendable(1000), Vtxo::spendable(500)]);

        ledger.send_offchain("tark1qdest", 300).unwrap();

        assert_eq!(ledger.balance().0, 1200);
        let utxos = ledger.list_utxos();
        assert!(utxos.contains(&UtxoEntry {
            amount: 1000,
            locked: true,
            spendable: false
        }));
        assert!(utxos.contains(&UtxoEntry {
            amount: 700,
            locked: false,
            spendable: true
        }));
    }

    #[test]
    fn test_send_rejects_overspend() {
        let mut ledger = ledger();
        ledger.set_vtxos(vec![Vtxo::spendable(100)]);
        let err = ledger.collaborative_exit("bcrt1qdest", 101).unwrap_err();
        assert_eq!(
            err,
            BackendError::InsufficientFunds {
                needed: 101,
                available: 100
            }
        );
        assert_eq!(ledger.balance().0, 100);
    }

    #[test]
    fn test_settle_boards_onchain_funds() {
        let mut ledger = ledger();
        ledger.set_vtxos(vec![Vtxo::spendable(300)]);
        ledger.set_boarding(700);

        ledger.settle().unwrap();

        assert_eq!(ledger.balance(), (1000, 0));
        assert_eq!(ledger.settle().map(|_| ()), Ok(()));
    }

    #[test]
    fn test_settle_with_no_funds_fails() {
        let mut ledger = ledger();
        assert_eq!(ledger.settle(), Err(BackendError::NothingToSettle));
    }

    #[test]
    fn test_faucet_credits_boarding_address() {
        let mut ledger = ledger();
        let boarding = ledger.config().boarding_address.clone();
        let message = ledger.faucet(&boarding).unwrap();
        assert!(message.starts_with("txId: "));
        assert_eq!(ledger.balance().1, 100_000);

        ledger.faucet("bcrt1qsomeoneelse").unwrap();
        assert_eq!(ledger.balance().1, 100_000);
        assert!(ledger.faucet(" ").is_err());
    }

    #[test]
    fn test_txids_are_unique() {
        let mut ledger = ledger();
        ledger.set_boarding(10);
        let a = ledger.settle().unwrap();
        let b = ledger.settle().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }
}
