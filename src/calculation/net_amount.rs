//! Net allowance calculation.
//!
//! This module combines an officer's attendance tally with their resolved
//! rate to produce the net allowance for a period.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::ProrationPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, StatusCategory, StatusTally};

use super::ResolvedRate;

/// The result of computing the net amount, including the audit step.
#[derive(Debug, Clone)]
pub struct NetAmountResult {
    /// Amount added for unused off-days.
    pub additive: Decimal,
    /// Amount deducted for deductible days and absences.
    pub subtractive: Decimal,
    /// Net payable allowance, rounded to a whole unit and never negative.
    pub net: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Rounds to a whole allowance unit, halves away from zero.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the net allowance from a tally and a resolved rate.
///
/// - `additive = max(0, entitlement - off) × per_day`
/// - `subtractive = deductible_days × per_day + absence × absence_penalty`
/// - `net = max(0, round(base + additive - subtractive))`
///
/// Deductible days are the sum of the tally over `policy.deductible`.
/// The result is clamped to zero but intermediate terms are not validated.
///
/// # Errors
///
/// Returns `CalculationError` if any term overflows the decimal range.
///
/// # Examples
///
/// ```
/// use allowance_engine::calculation::{ResolvedRate, compute_net};
/// use allowance_engine::config::ProrationPolicy;
/// use allowance_engine::models::StatusTally;
/// use rust_decimal::Decimal;
///
/// let policy = ProrationPolicy {
///     absence_penalty_per_day: Decimal::from(50),
///     ..ProrationPolicy::default()
/// };
/// let rate = ResolvedRate { base: Decimal::from(500), per_day: Decimal::from(10) };
/// let tally = StatusTally { off: 2, sick: 1, absence: 1, ..StatusTally::default() };
///
/// let result = compute_net(&tally, rate, &policy, 1).unwrap();
/// assert_eq!(result.additive, Decimal::from(20));
/// assert_eq!(result.subtractive, Decimal::from(60));
/// assert_eq!(result.net, Decimal::from(460));
/// ```
pub fn compute_net(
    tally: &StatusTally,
    rate: ResolvedRate,
    policy: &ProrationPolicy,
    step_number: u32,
) -> EngineResult<NetAmountResult> {
    let unused_off_days = policy.off_day_entitlement.saturating_sub(tally.off);
    let additive = checked(
        Decimal::from(unused_off_days).checked_mul(rate.per_day),
        "unused off-day bonus",
    )?;

    let deductible_days: u32 = policy
        .deductible
        .iter()
        .filter(|c| !matches!(c, StatusCategory::Absence))
        .map(|c| tally.count(*c))
        .sum();
    let absence_penalty = checked(
        Decimal::from(tally.absence).checked_mul(policy.absence_penalty_per_day),
        "absence penalty",
    )?;
    let subtractive = checked(
        Decimal::from(deductible_days)
            .checked_mul(rate.per_day)
            .and_then(|d| d.checked_add(absence_penalty)),
        "deductions",
    )?;

    let gross = checked(
        rate.base
            .checked_add(additive)
            .and_then(|g| g.checked_sub(subtractive)),
        "gross amount",
    )?;
    let rounded = round_amount(gross);
    let clamped = rounded < Decimal::ZERO;
    let net = rounded.max(Decimal::ZERO);

    let reasoning = if clamped {
        format!(
            "{} + {} - {} = {} (clamped to 0)",
            rate.base.normalize(),
            additive.normalize(),
            subtractive.normalize(),
            rounded.normalize()
        )
    } else {
        format!(
            "{} + {} - {} = {}",
            rate.base.normalize(),
            additive.normalize(),
            subtractive.normalize(),
            net.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_amount".to_string(),
        rule_name: "Net Amount".to_string(),
        input: serde_json::json!({
            "base": rate.base.normalize().to_string(),
            "per_day": rate.per_day.normalize().to_string(),
            "off_day_entitlement": policy.off_day_entitlement,
            "off": tally.off,
            "deductible_days": deductible_days,
            "absence": tally.absence,
            "absence_penalty_per_day": policy.absence_penalty_per_day.normalize().to_string()
        }),
        output: serde_json::json!({
            "unused_off_days": unused_off_days,
            "additive": additive.normalize().to_string(),
            "subtractive": subtractive.normalize().to_string(),
            "net": net.normalize().to_string(),
            "clamped": clamped
        }),
        reasoning,
    };

    Ok(NetAmountResult {
        additive,
        subtractive,
        net,
        audit_step,
    })
}

fn checked(value: Option<Decimal>, term: &str) -> EngineResult<Decimal> {
    value.ok_or_else(|| EngineError::CalculationError {
        message: format!("{} exceeds the decimal range", term),
    })
}
