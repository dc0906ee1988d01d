//! Configuration types for allowance proration.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{RateRule, RateTable, StatusCategory};

/// Off-days an officer may take per period before losing the bonus.
pub const DEFAULT_OFF_DAY_ENTITLEMENT: u32 = 4;

/// Metadata about the engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// The organisation the configuration belongs to.
    pub organization: String,
    /// The name of the allowance (e.g., "Meal Allowance").
    pub allowance: String,
    /// The version or effective date of the configuration.
    pub version: String,
    /// Currency label for presentation only; the engine never uses it.
    #[serde(default)]
    pub currency_label: Option<String>,
}

/// How tallies are turned into additions and deductions.
///
/// # Example
///
/// ```
/// use allowance_engine::config::ProrationPolicy;
/// use allowance_engine::models::StatusCategory;
///
/// let policy = ProrationPolicy::default();
/// assert_eq!(policy.off_day_entitlement, 4);
/// assert!(policy.deductible.contains(&StatusCategory::Sick));
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProrationPolicy {
    /// Monthly off-day entitlement.
    #[serde(default = "default_off_day_entitlement")]
    pub off_day_entitlement: u32,
    /// Flat penalty per day of unexcused absence.
    pub absence_penalty_per_day: Decimal,
    /// Categories deducted at the per-day rate.
    #[serde(default = "default_deductible")]
    pub deductible: Vec<StatusCategory>,
}

fn default_off_day_entitlement() -> u32 {
    DEFAULT_OFF_DAY_ENTITLEMENT
}

fn default_deductible() -> Vec<StatusCategory> {
    vec![
        StatusCategory::Sick,
        StatusCategory::Leave,
        StatusCategory::UnpaidLeave,
    ]
}

impl Default for ProrationPolicy {
    fn default() -> Self {
        Self {
            off_day_entitlement: DEFAULT_OFF_DAY_ENTITLEMENT,
            absence_penalty_per_day: Decimal::ZERO,
            deductible: default_deductible(),
        }
    }
}

impl ProrationPolicy {
    /// Checks the policy for categories that cannot be deducted per day.
    ///
    /// Absence carries its own flat penalty, and off/on-duty days are never
    /// deductions, so none of them may appear in `deductible`. Each category
    /// may be listed at most once.
    pub fn validate(&self) -> EngineResult<()> {
        if self.absence_penalty_per_day < Decimal::ZERO {
            return Err(EngineError::InvalidPolicy {
                message: "absence_penalty_per_day cannot be negative".to_string(),
            });
        }

        for (idx, category) in self.deductible.iter().enumerate() {
            if self.deductible[..idx].contains(category) {
                return Err(EngineError::InvalidPolicy {
                    message: format!("{:?} is listed more than once in deductible", category),
                });
            }
            if matches!(
                category,
                StatusCategory::Absence | StatusCategory::Off | StatusCategory::OnDuty
            ) {
                return Err(EngineError::InvalidPolicy {
                    message: format!("{:?} cannot be a per-day deduction", category),
                });
            }
        }

        Ok(())
    }
}

/// Rates configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// All rate rules.
    pub rates: Vec<RateRule>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    policy: ProrationPolicy,
    rate_table: RateTable,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: EngineMetadata, policy: ProrationPolicy, rate_table: RateTable) -> Self {
        Self {
            metadata,
            policy,
            rate_table,
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the proration policy.
    pub fn policy(&self) -> &ProrationPolicy {
        &self.policy
    }

    /// Returns the configured rate table.
    pub fn rate_table(&self) -> &RateTable {
        &self.rate_table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_policy_defaults_when_fields_missing() {
        let yaml = r#"absence_penalty_per_day: "50000""#;
        let policy: ProrationPolicy = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(policy.off_day_entitlement, 4);
        assert_eq!(policy.absence_penalty_per_day, Decimal::from_str("50000").unwrap());
        assert_eq!(
            policy.deductible,
            vec![
                StatusCategory::Sick,
                StatusCategory::Leave,
                StatusCategory::UnpaidLeave
            ]
        );
    }

    #[test]
    fn test_policy_rejects_absence_as_deductible() {
        let policy = ProrationPolicy {
            deductible: vec![StatusCategory::Sick, StatusCategory::Absence],
            ..ProrationPolicy::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(EngineError::InvalidPolicy { .. })
        ));
    }

    #[test]
    fn test_policy_rejects_off_as_deductible() {
        let policy = ProrationPolicy {
            deductible: vec![StatusCategory::Off],
            ..ProrationPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_policy_rejects_repeated_category() {
        let policy = ProrationPolicy {
            deductible: vec![StatusCategory::Sick, StatusCategory::Leave, StatusCategory::Sick],
            ..ProrationPolicy::default()
        };
        match policy.validate() {
            Err(EngineError::InvalidPolicy { message }) => assert!(message.contains("Sick")),
            other => panic!("Expected InvalidPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_policy_rejects_negative_penalty() {
        let policy = ProrationPolicy {
            absence_penalty_per_day: Decimal::from(-1),
            ..ProrationPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_policy_allows_narrower_deductible_set() {
        let policy = ProrationPolicy {
            deductible: vec![StatusCategory::UnpaidLeave],
            ..ProrationPolicy::default()
        };
        assert!(policy.validate().is_ok());
    }
}
