//! Orchestrator configuration from environment variables
//!
//! Controls the wallet service endpoint, the optional transport timeout,
//! the consolidation heuristic factor and how racing responses are applied.

use std::env;
use std::time::Duration;

use crate::heuristic::CONSOLIDATION_FACTOR;

/// How the state store treats responses of overlapping calls to the same
/// operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Whichever response resolves last overwrites the state
    #[default]
    LastWriteWins,
    /// A response issued before an already applied one is dropped
    DiscardStale,
}

impl ResponseOrdering {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "last-write-wins" | "lww" => Some(Self::LastWriteWins),
            "discard-stale" | "sequenced" => Some(Self::DiscardStale),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the wallet service, without trailing slash
    pub base_url: String,
    /// Transport timeout; `None` lets calls run to completion
    pub request_timeout: Option<Duration>,
    /// Factor used by the consolidation heuristic
    pub consolidation_factor: u64,
    /// Policy for overlapping same-operation responses
    pub response_ordering: ResponseOrdering,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `ARK_WALLET_URL`: wallet service URL (default `http://localhost:8080`)
    /// - `ARK_WALLET_TIMEOUT_SECS`: transport timeout in seconds (unset: none)
    /// - `ARK_CONSOLIDATION_FACTOR`: heuristic factor (default 10)
    /// - `ARK_RESPONSE_ORDERING`: `last-write-wins` (default) or `discard-stale`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = match env::var("ARK_WALLET_URL") {
            Ok(url) => url,
            Err(_) => {
                log::info!("Wallet service URL: {} (default)", defaults.base_url);
                defaults.base_url.clone()
            }
        };

        let request_timeout = timeout_from(env::var("ARK_WALLET_TIMEOUT_SECS").ok());
        let consolidation_factor =
            consolidation_factor_from(env::var("ARK_CONSOLIDATION_FACTOR").ok());
        let response_ordering = response_ordering_from(env::var("ARK_RESPONSE_ORDERING").ok());

        Self::default()
            .with_base_url(base_url)
            .with_request_timeout(request_timeout)
            .with_consolidation_factor(consolidation_factor)
            .with_response_ordering(response_ordering)
    }

    /// Configuration pointing at an explicit service URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_consolidation_factor(mut self, factor: u64) -> Self {
        self.consolidation_factor = factor;
        self
    }

    pub fn with_response_ordering(mut self, ordering: ResponseOrdering) -> Self {
        self.response_ordering = ordering;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout: None,
            consolidation_factor: CONSOLIDATION_FACTOR,
            response_ordering: ResponseOrdering::LastWriteWins,
        }
    }
}

/// `ARK_WALLET_TIMEOUT_SECS`: whole seconds; anything else means no timeout
fn timeout_from(raw: Option<String>) -> Option<Duration> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            log::warn!("Ignoring invalid ARK_WALLET_TIMEOUT_SECS '{}'", raw);
            None
        }
    }
}

/// `ARK_CONSOLIDATION_FACTOR`: a positive integer
///
/// Zero would flag every non-empty UTXO set, so it is rejected too.
fn consolidation_factor_from(raw: Option<String>) -> u64 {
    let Some(raw) = raw else {
        return CONSOLIDATION_FACTOR;
    };
    match raw.trim().parse::<u64>() {
        Ok(factor) if factor > 0 => factor,
        _ => {
            log::warn!(
                "Ignoring invalid ARK_CONSOLIDATION_FACTOR '{}', using {}",
                raw,
                CONSOLIDATION_FACTOR
            );
            CONSOLIDATION_FACTOR
        }
    }
}

fn response_ordering_from(raw: Option<String>) -> ResponseOrdering {
    let Some(raw) = raw else {
        return ResponseOrdering::default();
    };
    ResponseOrdering::parse(&raw).unwrap_or_else(|| {
        log::warn!("Unknown ARK_RESPONSE_ORDERING '{}', using last-write-wins", raw);
        ResponseOrdering::default()
    })
}
