//! Result aggregation.
//!
//! Rolls per-officer results into display rows and a grand total.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::ProrationResult;

use super::round_amount;

/// Display rows plus the grand total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult {
    /// Rows in the order they were supplied.
    pub rows: Vec<ProrationResult>,
    /// Sum of all `net` values, rounded once.
    pub total: Decimal,
}

/// Aggregates results, keeping their order and summing the net amounts.
///
/// The total is rounded once at the end. Per-row nets are already whole
/// units, so this equals the sum of the rows as displayed.
///
/// # Errors
///
/// Returns `CalculationError` if the total exceeds the decimal range.
pub fn aggregate(results: Vec<ProrationResult>) -> EngineResult<AggregateResult> {
    let sum = results
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.net))
        .ok_or_else(|| EngineError::CalculationError {
            message: "report total exceeds the decimal range".to_string(),
        })?;

    Ok(AggregateResult {
        rows: results,
        total: round_amount(sum),
    })
}

/// Stable, case-insensitive sort by officer name.
///
/// Officers with the same name keep their relative order.
pub fn sort_by_name(results: &mut [ProrationResult]) {
    results.sort_by_cached_key(|r| r.person_name.trim().to_lowercase());
}
