//! Rate rules for the allowance rate table.
//!
//! A department is either paid a flat rate or a rate chosen by tenure band.
//! Bands are data, not code: each [`RateRule`] carries a [`TenureBand`]
//! tag and the resolver picks among them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a rule applies with respect to tenure.
///
/// # Example
///
/// ```
/// use allowance_engine::models::TenureBand;
///
/// let band: TenureBand = serde_json::from_str(r#"{"kind": "banded", "min_months": 36}"#).unwrap();
/// assert_eq!(band, TenureBand::Banded { min_months: 36 });
/// assert!(band.covers(40));
/// assert!(!band.covers(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TenureBand {
    /// Applies regardless of tenure.
    Flat,
    /// Applies from `min_months` of tenure up to the next band's threshold.
    Banded {
        /// Lower bound of the band, in whole months.
        min_months: u32,
    },
}

impl TenureBand {
    /// Returns true if a person with the given tenure falls at or above this band.
    pub fn covers(&self, tenure_months: u32) -> bool {
        match self {
            TenureBand::Flat => true,
            TenureBand::Banded { min_months } => *min_months <= tenure_months,
        }
    }
}

/// One row of the allowance rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRule {
    /// The department this rule applies to.
    pub department: String,
    /// Tenure band of the rule.
    pub band: TenureBand,
    /// Base allowance for the period.
    pub base: Decimal,
    /// Per-day proration amount.
    pub per_day: Decimal,
}

/// The full rate table, as supplied by configuration or a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// All rules, in no particular order.
    pub rules: Vec<RateRule>,
}

impl RateTable {
    /// Creates a rate table from a list of rules.
    pub fn new(rules: Vec<RateRule>) -> Self {
        Self { rules }
    }

    /// Returns true if the table holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
