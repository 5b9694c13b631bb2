//! Process-wide error slot
//!
//! Holds the most recent operation failure for display. A new failure of any
//! operation overwrites it; successes never clear it. The display layer
//! removes it with [`ErrorSlot::acknowledge`].

use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};

use crate::api::Endpoint;
use crate::error::ApiError;

/// A failure surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationError {
    pub message: String,
    /// Endpoint whose call failed
    pub endpoint: Endpoint,
    pub occurred_at: DateTime<Utc>,
}

/// Shared handle to the error slot
///
/// Cloning yields another handle to the same slot.
#[derive(Debug, Clone, Default)]
pub struct ErrorSlot {
    inner: Arc<RwLock<Option<OperationError>>>,
}

impl ErrorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure, replacing whatever was there
    pub fn publish(&self, endpoint: Endpoint, error: &ApiError) {
        let entry = OperationError {
            message: error.to_string(),
            endpoint,
            occurred_at: Utc::now(),
        };
        log::warn!("{} failed: {}", endpoint, entry.message);
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(entry);
    }

    pub fn current(&self) -> Option<OperationError> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Message of the current error, if any
    pub fn message(&self) -> Option<String> {
        self.current().map(|e| e.message)
    }

    /// Clear the slot, returning what was displayed
    pub fn acknowledge(&self) -> Option<OperationError> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
