//! Wallet operation orchestrator
//!
//! Each operation issues its remote call(s) through the API client, writes
//! the result into the state store and, on the send path, re-evaluates the
//! consolidation heuristic. Failures are published to the error slot by the
//! client and also returned, so a caller may react; nothing is rolled back.
//!
//! Operations are independent. Several may be in flight at once, including
//! overlapping calls of the same operation, in which case the configured
//! [`ResponseOrdering`](crate::config::ResponseOrdering) decides which
//! response the store keeps.

use crate::api::types::{DepositRequest, SendPaymentRequest, WithdrawRequest};
use crate::api::WalletApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::error_slot::ErrorSlot;
use crate::heuristic::needs_consolidation_warning_with_factor;
use crate::state::{StateSlot, WalletState};
use crate::types::{AmountInput, Balances, FeeQuote, Network, Utxo, WalletAddresses};

pub struct WalletOrchestrator {
    client: WalletApiClient,
    state: WalletState,
    errors: ErrorSlot,
    consolidation_factor: u64,
}

impl WalletOrchestrator {
    // ============================================================================
    // Constructors
    // ============================================================================

    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let errors = ErrorSlot::new();
        let client = WalletApiClient::new(&config, errors.clone())?;

        log::debug!(
            "Wallet orchestrator for {} ({:?}, consolidation factor {})",
            config.base_url,
            config.response_ordering,
            config.consolidation_factor
        );

        Ok(Self {
            client,
            state: WalletState::new(config.response_ordering),
            errors,
            consolidation_factor: config.consolidation_factor,
        })
    }

    /// Create an orchestrator configured from environment variables
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env())
    }

    pub fn state(&self) -> &WalletState {
        &self.state
    }

    pub fn errors(&self) -> &ErrorSlot {
        &self.errors
    }

    // ============================================================================
    // Synchronization
    // ============================================================================

    /// Initial population of the store: balances and UTXOs, concurrently
    ///
    /// Both refreshes run to completion even if one fails; the first failure
    /// is returned.
    pub async fn sync(&self) -> Result<(), ApiError> {
        let (balances, utxos) = tokio::join!(self.refresh_balances(), self.refresh_utxos());
        balances?;
        utxos?;
        Ok(())
    }

    pub async fn refresh_balances(&self) -> Result<Balances, ApiError> {
        let ticket = self.state.ticket(StateSlot::Balances);
        let balances = self.client.balance().await?;
        log::debug!(
            "Balances: offchain={} onchain={}",
            balances.offchain,
            balances.onchain
        );
        self.state.set_balances(ticket, balances);
        Ok(balances)
    }

    pub async fn refresh_utxos(&self) -> Result<Vec<Utxo>, ApiError> {
        let ticket = self.state.ticket(StateSlot::Utxos);
        let utxos = self.client.utxos().await?;
        log::debug!("UTXO snapshot: {} entries", utxos.len());
        self.state.set_utxos(ticket, utxos.clone());
        Ok(utxos)
    }

    // ============================================================================
    // Wallet & addresses
    // ============================================================================

    pub async fn create_wallet(&self) -> Result<WalletAddresses, ApiError> {
        let ticket = self.state.ticket(StateSlot::Addresses);
        let addresses = self.client.create_wallet().await?;
        log::info!(
            "Wallet addresses issued: offchain={} boarding={}",
            addresses.offchain_address,
            addresses.boarding_address
        );
        self.state.set_addresses(ticket, addresses.clone());
        Ok(addresses)
    }

    /// Deposit addresses come from the same issuance call as wallet creation
    pub async fn get_deposit_addresses(&self) -> Result<WalletAddresses, ApiError> {
        let ticket = self.state.ticket(StateSlot::DepositAddresses);
        let addresses = self.client.create_wallet().await?;
        log::info!(
            "Deposit addresses: offchain={} boarding={}",
            addresses.offchain_address,
            addresses.boarding_address
        );
        self.state.set_deposit_addresses(ticket, addresses.clone());
        Ok(addresses)
    }

    // ============================================================================
    // Payments
    // ============================================================================

    /// Fetch a fee quote for the amount being typed
    ///
    /// Returns `Ok(None)` without calling the service when `amount` is not a
    /// non-negative integer. Inputs that are numeric but not whole sats,
    /// such as `"1.5"` or `"1e3"`, are skipped as well, since the service
    /// prices integer amounts only. On success the consolidation warning is
    /// recomputed from the new quote's total and the current UTXO snapshot.
    pub async fn estimate_fees(
        &self,
        amount: &str,
        network: Network,
    ) -> Result<Option<FeeQuote>, ApiError> {
        let amount = match AmountInput::parse(amount) {
            AmountInput::Value(value) => value,
            _ => {
                log::debug!("Skipping fee estimate for amount input {:?}", amount);
                return Ok(None);
            }
        };

        let ticket = self.state.ticket(StateSlot::FeeQuote);
        let quote = self.client.estimate_fees(amount, network).await?;
        if !quote.is_consistent() {
            log::warn!(
                "Fee quote breakdown does not add up: total={} network={} service={}",
                quote.total,
                quote.breakdown.network,
                quote.breakdown.service
            );
        }

        let utxos = self.state.utxos();
        let warning =
            needs_consolidation_warning_with_factor(&utxos, quote.total, self.consolidation_factor);
        if let Some(ref w) = warning {
            log::info!("{}", w);
        }

        self.state.set_fee_quote(ticket, quote, warning);
        Ok(Some(quote))
    }

    /// Send a payment, then refresh balances and UTXOs concurrently
    ///
    /// The amount is not validated here; a malformed amount is sent as
    /// `null` and rejected by the service. A failing refresh does not undo
    /// the recorded txid.
    pub async fn send_payment(
        &self,
        network: Network,
        to: &str,
        amount: &str,
    ) -> Result<String, ApiError> {
        let request = SendPaymentRequest {
            network,
            to: to.to_string(),
            amount: AmountInput::parse(amount).value(),
        };

        let ticket = self.state.ticket(StateSlot::PaymentTx);
        let txid = self.client.send_payment(&request).await?;
        log::info!("Payment sent over {}: txid={}", network, txid);
        self.state.set_payment_txid(ticket, txid.clone());

        let (balances, utxos) = tokio::join!(self.refresh_balances(), self.refresh_utxos());
        if balances.is_err() || utxos.is_err() {
            log::warn!("Post-payment refresh incomplete for txid {}", txid);
        }

        Ok(txid)
    }

    // ============================================================================
    // Settlement & withdrawal
    // ============================================================================

    /// Settle off-chain funds; blank `amount` settles everything
    pub async fn settle_funds(&self, amount: Option<&str>) -> Result<String, ApiError> {
        let amount = match amount.map(AmountInput::parse) {
            None | Some(AmountInput::Absent) => None,
            Some(AmountInput::Value(value)) => Some(Some(value)),
            Some(AmountInput::Malformed) => Some(None),
        };
        let request = DepositRequest { amount };

        let ticket = self.state.ticket(StateSlot::SettlementTx);
        let txid = self.client.deposit(&request).await?;
        match amount {
            Some(Some(value)) => log::info!("Settled {} sats: txid={}", value, txid),
            _ => log::info!("Settled all funds: txid={}", txid),
        }
        self.state.set_settlement_txid(ticket, txid.clone());

        if self.refresh_balances().await.is_err() {
            log::warn!("Post-settlement balance refresh failed for txid {}", txid);
        }

        Ok(txid)
    }

    pub async fn withdraw_funds(&self, to: &str, amount: &str) -> Result<String, ApiError> {
        let request = WithdrawRequest {
            to: to.to_string(),
            amount: AmountInput::parse(amount).value(),
        };

        let ticket = self.state.ticket(StateSlot::WithdrawalTx);
        let txid = self.client.withdraw(&request).await?;
        log::info!("Withdrawal to {}: txid={}", to, txid);
        self.state.set_withdrawal_txid(ticket, txid.clone());

        if self.refresh_balances().await.is_err() {
            log::warn!("Post-withdrawal balance refresh failed for txid {}", txid);
        }

        Ok(txid)
    }

    // ============================================================================
    // Test funds
    // ============================================================================

    pub async fn request_faucet(&self, address: &str) -> Result<String, ApiError> {
        let ticket = self.state.ticket(StateSlot::FaucetMessage);
        let message = self.client.faucet(address).await?;
        log::info!("Faucet funds requested for {}", address);
        self.state.set_faucet_message(ticket, message.clone());
        Ok(message)
    }
}
