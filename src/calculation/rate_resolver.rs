//! Tenure and rate resolution.
//!
//! This module determines how long an officer has been employed at the end
//! of a period, and which rate rule applies to their department and tenure.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, RateRule, RateTable, TenureBand, normalize_department};

/// The base and per-day amounts a calculation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRate {
    /// Base allowance for the period.
    pub base: Decimal,
    /// Per-day proration amount.
    pub per_day: Decimal,
}

impl ResolvedRate {
    /// The rate used when no rule matched.
    pub fn zero() -> Self {
        Self {
            base: Decimal::ZERO,
            per_day: Decimal::ZERO,
        }
    }
}

impl From<&RateRule> for ResolvedRate {
    fn from(rule: &RateRule) -> Self {
        Self {
            base: rule.base,
            per_day: rule.per_day,
        }
    }
}

/// The result of a rate lookup, including the matched rule and audit step.
#[derive(Debug, Clone)]
pub struct RateLookupResult {
    /// The rule that matched.
    pub rule: RateRule,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

impl RateLookupResult {
    /// The amounts of the matched rule.
    pub fn rate(&self) -> ResolvedRate {
        ResolvedRate::from(&self.rule)
    }
}

/// Computes whole calendar months between `join_date` and `period_end`.
///
/// A month counts once the day-of-month of `period_end` has reached the
/// join day, so 2023-01-20 to 2026-01-20 is 36 months and 2023-01-21 to
/// 2026-01-20 is 35. A join day past the end of a shorter month is reached
/// on that month's last day: 2025-01-31 to 2025-02-28 is one month.
///
/// # Errors
///
/// Returns `InvalidDate` if `join_date` is after `period_end`.
///
/// # Examples
///
/// ```
/// use allowance_engine::calculation::tenure_months;
/// use chrono::NaiveDate;
///
/// let joined = NaiveDate::from_ymd_opt(2023, 1, 20).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
/// assert_eq!(tenure_months("off_001", joined, end).unwrap(), 36);
/// ```
pub fn tenure_months(
    person_id: &str,
    join_date: NaiveDate,
    period_end: NaiveDate,
) -> EngineResult<u32> {
    if join_date > period_end {
        return Err(EngineError::InvalidDate {
            person_id: person_id.to_string(),
            join_date,
            period_end,
        });
    }

    let mut months = (period_end.year() - join_date.year()) * 12 + period_end.month() as i32
        - join_date.month() as i32;
    let end_is_month_end = period_end
        .succ_opt()
        .is_none_or(|next| next.month() != period_end.month());
    if period_end.day() < join_date.day() && !end_is_month_end {
        months -= 1;
    }

    Ok(months.max(0) as u32)
}

/// Selects the rate rule for a department and tenure.
///
/// A flat rule for the department wins outright. Otherwise the department's
/// banded rules are examined from the highest threshold down, and the first
/// whose threshold the tenure has reached is selected. Departments are
/// compared after trimming and upper-casing.
///
/// # Errors
///
/// Returns `RateNotFound` when the department has no rules, or when the
/// tenure is below every band's threshold.
///
/// # Examples
///
/// ```
/// use allowance_engine::calculation::resolve_rate;
/// use allowance_engine::models::{RateRule, RateTable, TenureBand};
/// use rust_decimal::Decimal;
///
/// let table = RateTable::new(vec![
///     RateRule {
///         department: "CS-DP-WD".to_string(),
///         band: TenureBand::Banded { min_months: 0 },
///         base: Decimal::from(450),
///         per_day: Decimal::from(15),
///     },
///     RateRule {
///         department: "CS-DP-WD".to_string(),
///         band: TenureBand::Banded { min_months: 12 },
///         base: Decimal::from(550),
///         per_day: Decimal::from(18),
///     },
/// ]);
///
/// let result = resolve_rate("CS-DP-WD", 20, &table, 1).unwrap();
/// assert_eq!(result.rule.base, Decimal::from(550));
/// ```
pub fn resolve_rate(
    department: &str,
    tenure_months: u32,
    table: &RateTable,
    step_number: u32,
) -> EngineResult<RateLookupResult> {
    let key = normalize_department(department);
    let mut candidates: Vec<&RateRule> = table
        .rules
        .iter()
        .filter(|r| normalize_department(&r.department) == key)
        .collect();

    let not_found = || EngineError::RateNotFound {
        department: key.clone(),
        tenure_months,
    };

    if candidates.is_empty() {
        return Err(not_found());
    }

    if let Some(flat) = candidates.iter().find(|r| r.band == TenureBand::Flat) {
        let rule = (*flat).clone();
        let audit_step = rate_audit_step(&key, tenure_months, &rule, step_number, || {
            format!("Department '{}' is paid a flat rate", key)
        });
        return Ok(RateLookupResult { rule, audit_step });
    }

    // Highest threshold first so the most senior matching band wins
    candidates.sort_by_key(|r| std::cmp::Reverse(band_threshold(&r.band)));

    let rule = candidates
        .into_iter()
        .find(|r| r.band.covers(tenure_months))
        .cloned()
        .ok_or_else(not_found)?;

    let threshold = band_threshold(&rule.band);
    let audit_step = rate_audit_step(&key, tenure_months, &rule, step_number, || {
        format!(
            "Tenure of {} months reaches the {}+ month band for '{}'",
            tenure_months, threshold, key
        )
    });

    Ok(RateLookupResult { rule, audit_step })
}

fn band_threshold(band: &TenureBand) -> u32 {
    match band {
        TenureBand::Flat => 0,
        TenureBand::Banded { min_months } => *min_months,
    }
}

fn rate_audit_step(
    department: &str,
    tenure_months: u32,
    rule: &RateRule,
    step_number: u32,
    reasoning: impl FnOnce() -> String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "rate_resolution".to_string(),
        rule_name: "Rate Resolution".to_string(),
        input: serde_json::json!({
            "department": department,
            "tenure_months": tenure_months
        }),
        output: serde_json::json!({
            "band": rule.band,
            "base": rule.base.normalize().to_string(),
            "per_day": rule.per_day.normalize().to_string()
        }),
        reasoning: reasoning(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rule(department: &str, band: TenureBand, base: &str, per_day: &str) -> RateRule {
        RateRule {
            department: department.to_string(),
            band,
            base: dec(base),
            per_day: dec(per_day),
        }
    }

    fn create_test_table() -> RateTable {
        RateTable::new(vec![
            rule("AM", TenureBand::Flat, "750000", "25000"),
            rule("CS-DP-WD", TenureBand::Banded { min_months: 12 }, "550000", "18000"),
            rule("CS-DP-WD", TenureBand::Banded { min_months: 0 }, "450000", "15000"),
            rule("CS-DP-WD", TenureBand::Banded { min_months: 36 }, "650000", "22000"),
            rule("SECURITY", TenureBand::Banded { min_months: 6 }, "400000", "13000"),
        ])
    }

    #[test]
    fn test_tenure_exact_years() {
        assert_eq!(tenure_months("p", date(2023, 1, 20), date(2026, 1, 20)).unwrap(), 36);
    }

    #[test]
    fn test_tenure_incomplete_month_not_counted() {
        assert_eq!(tenure_months("p", date(2023, 1, 21), date(2026, 1, 20)).unwrap(), 35);
        assert_eq!(tenure_months("p", date(2025, 12, 31), date(2026, 1, 20)).unwrap(), 0);
    }

    #[test]
    fn test_tenure_month_end_join_completes_in_shorter_month() {
        assert_eq!(tenure_months("p", date(2025, 1, 31), date(2025, 2, 28)).unwrap(), 1);
        assert_eq!(tenure_months("p", date(2024, 1, 31), date(2024, 2, 29)).unwrap(), 1);
        assert_eq!(tenure_months("p", date(2024, 1, 31), date(2024, 2, 28)).unwrap(), 0);
        assert_eq!(tenure_months("p", date(2025, 8, 31), date(2026, 4, 30)).unwrap(), 8);
    }

    #[test]
    fn test_tenure_same_day_is_zero() {
        assert_eq!(tenure_months("p", date(2026, 1, 20), date(2026, 1, 20)).unwrap(), 0);
    }

    #[test]
    fn test_tenure_join_after_end_is_invalid_date() {
        match tenure_months("off_009", date(2026, 2, 1), date(2026, 1, 20)) {
            Err(EngineError::InvalidDate {
                person_id,
                join_date,
                period_end,
            }) => {
                assert_eq!(person_id, "off_009");
                assert_eq!(join_date, date(2026, 2, 1));
                assert_eq!(period_end, date(2026, 1, 20));
            }
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_flat_department_ignores_tenure() {
        let table = create_test_table();

        let junior = resolve_rate("AM", 0, &table, 1).unwrap();
        let senior = resolve_rate("AM", 120, &table, 1).unwrap();

        assert_eq!(junior.rule.base, dec("750000"));
        assert_eq!(senior.rule.base, dec("750000"));
        assert!(junior.audit_step.reasoning.contains("flat rate"));
    }

    #[test]
    fn test_banded_department_selects_most_senior_band() {
        let table = create_test_table();

        assert_eq!(resolve_rate("CS-DP-WD", 5, &table, 1).unwrap().rule.base, dec("450000"));
        assert_eq!(resolve_rate("CS-DP-WD", 12, &table, 1).unwrap().rule.base, dec("550000"));
        assert_eq!(resolve_rate("CS-DP-WD", 35, &table, 1).unwrap().rule.base, dec("550000"));
        assert_eq!(resolve_rate("CS-DP-WD", 36, &table, 1).unwrap().rule.base, dec("650000"));
        assert_eq!(resolve_rate("CS-DP-WD", 240, &table, 1).unwrap().rule.base, dec("650000"));
    }

    #[test]
    fn test_department_match_is_case_insensitive() {
        let table = create_test_table();
        let result = resolve_rate(" cs-dp-wd ", 40, &table, 2).unwrap();

        assert_eq!(result.rule.per_day, dec("22000"));
        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.input["department"], "CS-DP-WD");
        assert_eq!(result.audit_step.output["base"], "650000");
    }

    #[test]
    fn test_tenure_below_lowest_band_is_rate_not_found() {
        let table = create_test_table();

        match resolve_rate("SECURITY", 5, &table, 1) {
            Err(EngineError::RateNotFound {
                department,
                tenure_months,
            }) => {
                assert_eq!(department, "SECURITY");
                assert_eq!(tenure_months, 5);
            }
            other => panic!("Expected RateNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_department_is_rate_not_found() {
        let table = create_test_table();
        assert!(matches!(
            resolve_rate("KITCHEN", 10, &table, 1),
            Err(EngineError::RateNotFound { .. })
        ));
    }

    #[test]
    fn test_resolved_rate_from_lookup() {
        let table = create_test_table();
        let rate = resolve_rate("AM", 3, &table, 1).unwrap().rate();

        assert_eq!(rate.base, dec("750000"));
        assert_eq!(rate.per_day, dec("25000"));
        assert_eq!(ResolvedRate::zero().base, Decimal::ZERO);
    }
}
