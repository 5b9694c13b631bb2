//! Axum HTTP handlers for the wallet service endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::ledger::{BackendError, LedgerConfig, MockLedger};
use crate::types::*;

/// Shared application state
pub type AppState = Arc<MockBackend>;

/// Custom error type for handlers
///
/// Errors are written as plain text terminated by a newline, like the
/// service's `http.Error` responses.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
    Injected(StatusCode, String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Injected(status, msg) => (status, msg),
        };

        (status, format!("{}\n", message)).into_response()
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::InvalidNetwork | BackendError::InvalidAmount => {
                ApiError::BadRequest(err.to_string())
            }
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

/// Test hooks applied per route
#[derive(Debug, Default)]
struct Controls {
    overrides: HashMap<&'static str, VecDeque<(StatusCode, String)>>,
    delays: HashMap<&'static str, VecDeque<Duration>>,
    hits: HashMap<&'static str, usize>,
    last_bodies: HashMap<&'static str, Value>,
}

/// Ledger plus the hooks tests use to steer responses
#[derive(Debug)]
pub struct MockBackend {
    ledger: Mutex<MockLedger>,
    controls: Mutex<Controls>,
}

impl MockBackend {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            ledger: Mutex::new(MockLedger::new(config)),
            controls: Mutex::new(Controls::default()),
        }
    }

    /// Direct access to the ledger for seeding and inspection
    pub fn ledger(&self) -> MutexGuard<'_, MockLedger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn controls(&self) -> MutexGuard<'_, Controls> {
        self.controls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answer the next request to `route` with `status` and a text body
    pub fn fail_next(&self, route: &'static str, status: StatusCode, body: impl Into<String>) {
        self.respond_next(route, status, body);
    }

    /// Answer the next request to `route` with an arbitrary response,
    /// bypassing the ledger (use a success status to serve malformed data)
    pub fn respond_next(&self, route: &'static str, status: StatusCode, body: impl Into<String>) {
        self.controls()
            .overrides
            .entry(route)
            .or_default()
            .push_back((status, body.into()));
    }

    /// Hold the next response of `route` for `delay`
    ///
    /// The response is computed before the delay, so it reflects the ledger
    /// at the time the request arrived.
    pub fn delay_next(&self, route: &'static str, delay: Duration) {
        self.controls()
            .delays
            .entry(route)
            .or_default()
            .push_back(delay);
    }

    /// Number of requests received on `route`, including failed ones
    pub fn hits(&self, route: &'static str) -> usize {
        self.controls().hits.get(route).copied().unwrap_or(0)
    }

    /// JSON body (or query, for GET routes) of the last request to `route`
    pub fn last_body(&self, route: &'static str) -> Option<Value> {
        self.controls().last_bodies.get(route).cloned()
    }

    /// Record the request and pop any injected response or delay
    fn enter(&self, route: &'static str, body: Option<Value>) -> Result<Option<Duration>, ApiError> {
        let mut controls = self.controls();
        *controls.hits.entry(route).or_insert(0) += 1;
        if let Some(body) = body {
            controls.last_bodies.insert(route, body);
        }

        if let Some((status, msg)) = controls.overrides.get_mut(route).and_then(|q| q.pop_front()) {
            log::debug!("Serving injected {} on {}", status, route);
            return Err(ApiError::Injected(status, msg));
        }

        Ok(controls.delays.get_mut(route).and_then(|q| q.pop_front()))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

async fn hold(delay: Option<Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// POST /wallet/create
/// Returns the off-chain and boarding addresses
pub async fn create_wallet(State(state): State<AppState>) -> Result<Json<WalletInfo>, ApiError> {
    let delay = state.enter(routes::CREATE_WALLET, None)?;
    let (offchain_address, boarding_address) = state.ledger().receive();
    hold(delay).await;
    Ok(Json(WalletInfo {
        offchain_address,
        boarding_address,
    }))
}

/// GET /wallet/balance
pub async fn get_balance(State(state): State<AppState>) -> Result<Json<BalanceInfo>, ApiError> {
    let delay = state.enter(routes::BALANCE, None)?;
    let (offchain_balance, onchain_balance) = state.ledger().balance();
    hold(delay).await;
    Ok(Json(BalanceInfo {
        offchain_balance,
        onchain_balance,
    }))
}

/// GET /wallet/utxos
/// An empty list is encoded as `null`, as the service does
pub async fn list_utxos(
    State(state): State<AppState>,
) -> Result<Json<Option<Vec<UtxoEntry>>>, ApiError> {
    let delay = state.enter(routes::UTXOS, None)?;
    let utxos = state.ledger().list_utxos();
    hold(delay).await;
    Ok(Json(if utxos.is_empty() { None } else { Some(utxos) }))
}

/// GET /payment/estimate?amount=..&network=..
/// The quote only depends on the current fee rate
pub async fn estimate_fee(
    State(state): State<AppState>,
    Query(query): Query<EstimateQuery>,
) -> Result<Json<FeeEstimate>, ApiError> {
    let recorded = json!({ "amount": query.amount, "network": query.network });
    let delay = state.enter(routes::ESTIMATE, Some(recorded))?;
    let estimate = state.ledger().estimate_fee();
    hold(delay).await;
    Ok(Json(estimate))
}

/// POST /payment/send
/// `ark` pays off-chain, `onchain` exits cooperatively
pub async fn send_payment(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<TxidResponse>, ApiError> {
    let delay = state.enter(routes::SEND, Some(body.clone()))?;
    let req: SendRequest = parse_body(body)?;
    let amount = req.amount.ok_or(BackendError::InvalidAmount)?;

    let txid = {
        let mut ledger = state.ledger();
        match req.network.to_lowercase().as_str() {
            "ark" | "offchain" => ledger.send_offchain(&req.to, amount)?,
            "onchain" => ledger.collaborative_exit(&req.to, amount)?,
            _ => return Err(BackendError::InvalidNetwork.into()),
        }
    };

    hold(delay).await;
    Ok(Json(TxidResponse { txid }))
}

/// POST /wallet/deposit
/// Settles everything; a requested amount is recorded but not honoured
pub async fn deposit(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<TxidResponse>, ApiError> {
    let body = body.map(|Json(v)| v).unwrap_or_else(|| json!({}));
    let delay = state.enter(routes::DEPOSIT, Some(body.clone()))?;
    if let Some(amount) = body.get("amount") {
        log::debug!("Settlement amount {} requested; settling all funds", amount);
    }

    let txid = state.ledger().settle()?;
    hold(delay).await;
    Ok(Json(TxidResponse { txid }))
}

/// POST /wallet/withdraw
/// Settle first, then exit the requested amount on-chain
pub async fn withdraw(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<TxidResponse>, ApiError> {
    let delay = state.enter(routes::WITHDRAW, Some(body.clone()))?;
    let req: WithdrawRequest = parse_body(body)?;
    let amount = req.amount.ok_or(BackendError::InvalidAmount)?;

    let txid = {
        let mut ledger = state.ledger();
        ledger.settle()?;
        ledger.collaborative_exit(&req.to, amount)?
    };

    hold(delay).await;
    Ok(Json(TxidResponse { txid }))
}

/// POST /wallet/faucet
pub async fn faucet(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<MessageResponse>, ApiError> {
    let delay = state.enter(routes::FAUCET, Some(body.clone()))?;
    let req: FaucetRequest = parse_body(body)?;
    let message = state.ledger().faucet(&req.address)?;
    hold(delay).await;
    Ok(Json(MessageResponse { message }))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
