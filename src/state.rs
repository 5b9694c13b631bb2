//! Wallet state store
//!
//! Single source of truth for everything the display reads: addresses,
//! balances, the UTXO snapshot, the fee quote with its consolidation warning,
//! and the result of the last send/settle/withdraw/faucet call.
//!
//! Each field group is replaced as a whole. Setters are only called by the
//! orchestrator and take a [`Ticket`] issued when the remote call started,
//! which lets [`ResponseOrdering::DiscardStale`] drop responses that were
//! overtaken by a newer call. Locks are never held across an await.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::ResponseOrdering;
use crate::heuristic::ConsolidationWarning;
use crate::types::{Balances, FeeQuote, Utxo, WalletAddresses};

const SLOT_COUNT: usize = 9;

/// Independently replaced field group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateSlot {
    Addresses,
    DepositAddresses,
    Balances,
    Utxos,
    /// Fee quote together with the consolidation warning derived from it
    FeeQuote,
    PaymentTx,
    SettlementTx,
    WithdrawalTx,
    FaucetMessage,
}

impl StateSlot {
    fn index(self) -> usize {
        self as usize
    }
}

/// Sequence number of a call, issued before the call is made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    slot: StateSlot,
    seq: u64,
}

/// Point-in-time copy of the whole store
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WalletSnapshot {
    pub addresses: Option<WalletAddresses>,
    pub deposit_addresses: Option<WalletAddresses>,
    pub balances: Balances,
    pub utxos: Vec<Utxo>,
    pub fee_quote: FeeQuote,
    pub utxo_warning: Option<ConsolidationWarning>,
    pub payment_txid: Option<String>,
    pub settlement_txid: Option<String>,
    pub withdrawal_txid: Option<String>,
    pub faucet_message: Option<String>,
}

#[derive(Default)]
struct Inner {
    data: WalletSnapshot,
    /// Highest ticket applied per slot
    applied: [u64; SLOT_COUNT],
}

pub struct WalletState {
    inner: RwLock<Inner>,
    issued: [AtomicU64; SLOT_COUNT],
    ordering: ResponseOrdering,
}

impl Default for WalletState {
    fn default() -> Self {
        Self::new(ResponseOrdering::default())
    }
}

impl WalletState {
    pub fn new(ordering: ResponseOrdering) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            issued: Default::default(),
            ordering,
        }
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    /// Issue the next ticket for a slot
    pub(crate) fn ticket(&self, slot: StateSlot) -> Ticket {
        let seq = self.issued[slot.index()].fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { slot, seq }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a mutation for a ticket; returns false if it was dropped as stale
    fn apply(&self, ticket: Ticket, mutate: impl FnOnce(&mut WalletSnapshot)) -> bool {
        let mut inner = self.write();
        let idx = ticket.slot.index();

        if self.ordering == ResponseOrdering::DiscardStale && ticket.seq < inner.applied[idx] {
            log::debug!(
                "Dropping stale {:?} response (ticket {} < applied {})",
                ticket.slot,
                ticket.seq,
                inner.applied[idx]
            );
            return false;
        }

        inner.applied[idx] = inner.applied[idx].max(ticket.seq);
        mutate(&mut inner.data);
        true
    }

    // ========================================================================
    // Setters (orchestrator only)
    // ========================================================================

    pub(crate) fn set_addresses(&self, ticket: Ticket, addresses: WalletAddresses) -> bool {
        debug_assert_eq!(ticket.slot, StateSlot::Addresses);
        self.apply(ticket, |d| d.addresses = Some(addresses))
    }

    pub(crate) fn set_deposit_addresses(&self, ticket: Ticket, addresses: WalletAddresses) -> bool {
        debug_assert_eq!(ticket.slot, StateSlot::DepositAddresses);
        self.apply(ticket, |d| d.deposit_addresses = Some(addresses))
    }

    pub(crate) fn set_balances(&self, ticket: Ticket, balances: Balances) -> bool {
        debug_assert_eq!(ticket.slot, StateSlot::Balances);
        self.apply(ticket, |d| d.balances = balances)
    }

    pub(crate) fn set_utxos(&self, ticket: Ticket, utxos: Vec<Utxo>) -> bool {
        debug_assert_eq!(ticket.slot, StateSlot::Utxos);
        self.apply(ticket, |d| d.utxos = utxos)
    }

    pub(crate) fn set_fee_quote(
        &self,
        ticket: Ticket,
        quote: FeeQuote,
        warning: Option<ConsolidationWarning>,
    ) -> bool {
        debug_assert_eq!(ticket.slot, StateSlot::FeeQuote);
        self.apply(ticket, |d| {
            d.fee_quote = quote;
            d.utxo_warning = warning;
        })
    }

    pub(crate) fn set_payment_txid(&self, ticket: Ticket, txid: String) -> bool {
        debug_assert_eq!(ticket.slot, StateSlot::PaymentTx);
        self.apply(ticket, |d| d.payment_txid = Some(txid))
    }

    pub(crate) fn set_settlement_txid(&self, ticket: Ticket, txid: String) -> bool {
        debug_assert_eq!(ticket.slot, StateSlot::SettlementTx);
        self.apply(ticket, |d| d.settlement_txid = Some(txid))
    }

    pub(crate) fn set_withdrawal_txid(&self, ticket: Ticket, txid: String) -> bool {
        debug_assert_eq!(ticket.slot, StateSlot::WithdrawalTx);
        self.apply(ticket, |d| d.withdrawal_txid = Some(txid))
    }

    pub(crate) fn set_faucet_message(&self, ticket: Ticket, message: String) -> bool {
        debug_assert_eq!(ticket.slot, StateSlot::FaucetMessage);
        self.apply(ticket, |d| d.faucet_message = Some(message))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn snapshot(&self) -> WalletSnapshot {
        self.read().data.clone()
    }

    pub fn addresses(&self) -> Option<WalletAddresses> {
        self.read().data.addresses.clone()
    }

    pub fn deposit_addresses(&self) -> Option<WalletAddresses> {
        self.read().data.deposit_addresses.clone()
    }

    pub fn balances(&self) -> Balances {
        self.read().data.balances
    }

    pub fn utxos(&self) -> Vec<Utxo> {
        self.read().data.utxos.clone()
    }

    pub fn fee_quote(&self) -> FeeQuote {
        self.read().data.fee_quote
    }

    pub fn utxo_warning(&self) -> Option<ConsolidationWarning> {
        self.read().data.utxo_warning
    }

    pub fn payment_txid(&self) -> Option<String> {
        self.read().data.payment_txid.clone()
    }

    pub fn settlement_txid(&self) -> Option<String> {
        self.read().data.settlement_txid.clone()
    }

    pub fn withdrawal_txid(&self) -> Option<String> {
        self.read().data.withdrawal_txid.clone()
    }

    pub fn faucet_message(&self) -> Option<String> {
        self.read().data.faucet_message.clone()
    }
}
