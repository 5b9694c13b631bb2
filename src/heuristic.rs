//! UTXO consolidation heuristic
//!
//! Spending a small amount while holding one disproportionately large UTXO
//! forces an expensive split later. The check below flags that situation
//! before a payment is sent. It looks at every UTXO regardless of status:
//! a large locked output still says where the balance is concentrated.

use crate::types::{format_sats, Utxo};
use std::fmt;

/// Largest UTXO must exceed the required amount by this factor to warn
pub const CONSOLIDATION_FACTOR: u64 = 10;

/// Warning raised when one UTXO dwarfs the amount being spent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsolidationWarning {
    /// Amount of the largest UTXO in the snapshot
    pub largest: u64,
}

impl fmt::Display for ConsolidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Large UTXO detected ({} sats). Consider splitting for better performance.",
            format_sats(self.largest)
        )
    }
}

/// Check a UTXO snapshot against the amount about to be spent
///
/// Returns `None` for an empty snapshot: nothing is known, so nothing is
/// flagged.
pub fn needs_consolidation_warning(
    utxos: &[Utxo],
    required_amount: u64,
) -> Option<ConsolidationWarning> {
    needs_consolidation_warning_with_factor(utxos, required_amount, CONSOLIDATION_FACTOR)
}

/// Same as [`needs_consolidation_warning`] with an explicit factor
pub fn needs_consolidation_warning_with_factor(
    utxos: &[Utxo],
    required_amount: u64,
    factor: u64,
) -> Option<ConsolidationWarning> {
    let largest = utxos.iter().map(|u| u.amount).max()?;

    if largest > required_amount.saturating_mul(factor) {
        Some(ConsolidationWarning { largest })
    } else {
        None
    }
}
