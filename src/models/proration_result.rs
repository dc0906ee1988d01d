//! Proration result models for the Allowance Engine.
//!
//! This module contains the [`ProrationResult`] type produced for each
//! officer, the [`AllowanceReport`] produced for a batch, and the audit
//! structures that record how each amount was reached.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Period, StatusTally};

/// A single step in the calculation audit trail.
///
/// # Example
///
/// ```
/// use allowance_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "rate_resolution".to_string(),
///     rule_name: "Rate Resolution".to_string(),
///     input: serde_json::json!({"department": "AM"}),
///     output: serde_json::json!({"base": "600000"}),
///     reasoning: "Flat rate for department AM".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential number of this step.
    pub step_number: u32,
    /// Identifier for the rule being applied.
    pub rule_id: String,
    /// Human-readable name of the rule.
    pub rule_name: String,
    /// Input values used in this step.
    pub input: serde_json::Value,
    /// Output values produced by this step.
    pub output: serde_json::Value,
    /// Explanation of why this rule was applied.
    pub reasoning: String,
}

/// A warning surfaced during a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// Warning code for programmatic handling.
    pub code: String,
    /// Human-readable warning message.
    pub message: String,
    /// The officer the warning concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
}

/// Audit trace for one officer's calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

/// Marks a result that was computed from incomplete or inconsistent input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultFlag {
    /// No rate rule matched; base and per-day rate were taken as zero.
    RateNotFound,
    /// The join date was after the period end; tenure was clamped to zero.
    InvalidJoinDate,
    /// More than one attendance record existed for the same day.
    DuplicateAttendance,
    /// An amount exceeded the decimal range; the row was paid as zero.
    AmountOverflow,
}

impl ResultFlag {
    /// Warning code used when the flag is surfaced on a report.
    pub fn code(self) -> &'static str {
        match self {
            ResultFlag::RateNotFound => "RATE_NOT_FOUND",
            ResultFlag::InvalidJoinDate => "INVALID_JOIN_DATE",
            ResultFlag::DuplicateAttendance => "DUPLICATE_ATTENDANCE",
            ResultFlag::AmountOverflow => "AMOUNT_OVERFLOW",
        }
    }
}

/// The allowance computed for one officer over one period.
///
/// Invariant: `net == max(0, round(base_amount + additive - subtractive))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProrationResult {
    /// The officer's identifier.
    pub person_id: String,
    /// The officer's name.
    pub person_name: String,
    /// The officer's department.
    pub department: String,
    /// Tenure in whole months at the period end.
    pub tenure_months: u32,
    /// Resolved base allowance.
    pub base_amount: Decimal,
    /// Resolved per-day proration rate.
    pub per_day_rate: Decimal,
    /// Day counts per status category.
    pub tally: StatusTally,
    /// Amount added for unused off-days.
    pub additive: Decimal,
    /// Amount deducted for leave, sickness and absence.
    pub subtractive: Decimal,
    /// Net payable allowance, never negative.
    pub net: Decimal,
    /// Conditions that affected this result.
    #[serde(default)]
    pub flags: Vec<ResultFlag>,
    /// How the result was computed.
    pub audit_trace: AuditTrace,
}

impl ProrationResult {
    /// Returns true if the result carries the given flag.
    pub fn has_flag(&self, flag: ResultFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// The output of one batch calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The period calculated.
    pub period: Period,
    /// One row per officer, ordered by name.
    pub rows: Vec<ProrationResult>,
    /// Sum of all net amounts.
    pub total: Decimal,
    /// Warnings for flagged rows and unmatched data.
    pub warnings: Vec<AuditWarning>,
}
