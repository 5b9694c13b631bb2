use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::endpoint::Endpoint;
use super::types::*;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::error_slot::ErrorSlot;
use crate::types::{Balances, FeeQuote, Network, Utxo, WalletAddresses};

/// HTTP client for the wallet service
///
/// Makes exactly one attempt per call. Every failure is published to the
/// shared error slot before it is returned.
#[derive(Clone)]
pub struct WalletApiClient {
    /// reqwest::Client is internally Arc-based
    http: reqwest::Client,
    base_url: String,
    errors: ErrorSlot,
}

impl WalletApiClient {
    pub fn new(config: &ClientConfig, errors: ErrorSlot) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            errors,
        })
    }

    /// Call an endpoint and return the untyped JSON response
    pub async fn call<B>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let result = self.execute(endpoint, query, body).await;
        if let Err(ref e) = result {
            self.errors.publish(endpoint, e);
        }
        result
    }

    /// Call an endpoint and narrow the response to `T`
    ///
    /// JSON that lacks the fields of `T` is a [`ApiError::Shape`].
    pub async fn call_typed<T, B>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let value = self.call(endpoint, query, body).await?;
        serde_json::from_value(value).map_err(|e| {
            let err = ApiError::shape(format!("{}: {}", endpoint, e));
            self.errors.publish(endpoint, &err);
            err
        })
    }

    async fn execute<B>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint.path());
        log::debug!("{} {}", endpoint.method(), url);

        let mut request = self.http.request(endpoint.method(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::http(status, &text));
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::shape(format!("{} returned invalid JSON: {}", endpoint, e)))
    }

    // ========================================================================
    // Typed endpoint wrappers
    // ========================================================================

    pub async fn create_wallet(&self) -> Result<WalletAddresses, ApiError> {
        self.call_typed(Endpoint::CreateWallet, &[], None::<&()>)
            .await
    }

    pub async fn balance(&self) -> Result<Balances, ApiError> {
        let resp: BalanceResponse = self
            .call_typed(Endpoint::Balance, &[], None::<&()>)
            .await?;
        Ok(resp.into())
    }

    /// The service encodes an empty list as `null`
    pub async fn utxos(&self) -> Result<Vec<Utxo>, ApiError> {
        let utxos: Option<Vec<Utxo>> = self.call_typed(Endpoint::Utxos, &[], None::<&()>).await?;
        Ok(utxos.unwrap_or_default())
    }

    pub async fn estimate_fees(&self, amount: u64, network: Network) -> Result<FeeQuote, ApiError> {
        let query = [
            ("amount", amount.to_string()),
            ("network", network.to_string()),
        ];
        self.call_typed(Endpoint::EstimateFees, &query, None::<&()>)
            .await
    }

    pub async fn send_payment(&self, request: &SendPaymentRequest) -> Result<String, ApiError> {
        let resp: TxidResponse = self
            .call_typed(Endpoint::SendPayment, &[], Some(request))
            .await?;
        Ok(resp.txid)
    }

    pub async fn deposit(&self, request: &DepositRequest) -> Result<String, ApiError> {
        let resp: TxidResponse = self
            .call_typed(Endpoint::Deposit, &[], Some(request))
            .await?;
        Ok(resp.txid)
    }

    pub async fn withdraw(&self, request: &WithdrawRequest) -> Result<String, ApiError> {
        let resp: TxidResponse = self
            .call_typed(Endpoint::Withdraw, &[], Some(request))
            .await?;
        Ok(resp.txid)
    }

    pub async fn faucet(&self, address: &str) -> Result<String, ApiError> {
        let request = FaucetRequest {
            address: address.to_string(),
        };
        let resp: FaucetResponse = self
            .call_typed(Endpoint::Faucet, &[], Some(&request))
            .await?;
        Ok(resp.message)
    }
}
