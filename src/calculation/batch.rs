//! Batch allowance calculation.
//!
//! Runs the full pipeline (tenure, rate, attendance, net amount) for every
//! officer on a roster and rolls the results into an [`AllowanceReport`].
//! One officer's bad data never aborts the batch: it is flagged on that
//! officer's row and surfaced as a report warning instead.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ProrationPolicy;
use crate::error::EngineResult;
use crate::models::{
    AllowanceReport, AttendanceRecord, AuditStep, AuditTrace, AuditWarning, Period, Person,
    ProrationResult, RateTable, ResultFlag,
};

use super::{
    NetAmountResult, ResolvedRate, aggregate, classify, compute_net, duplicate_days,
    resolve_period, resolve_rate, sort_by_name, tenure_months,
};

/// Inputs shared by every officer in a batch.
#[derive(Debug, Clone, Copy)]
pub struct BatchInput<'a> {
    /// Eligible officers. Employment status is not re-checked here.
    pub roster: &'a [Person],
    /// Attendance records for any officers, already matched by id.
    pub attendance: &'a [AttendanceRecord],
    /// The rate table for this invocation.
    pub rate_table: &'a RateTable,
    /// The proration policy.
    pub policy: &'a ProrationPolicy,
}

/// Resolves the period for `month`/`year` and calculates the batch.
///
/// # Errors
///
/// Returns `InvalidPeriod` if the month label is not recognised, and
/// `CalculationError` if the report total exceeds the decimal range.
pub fn calculate_allowances(
    month: &str,
    year: i32,
    input: BatchInput<'_>,
) -> EngineResult<AllowanceReport> {
    let period = resolve_period(month, year)?;
    calculate_period(&period, input)
}

/// Calculates allowances for every officer on the roster over `period`.
///
/// # Errors
///
/// Returns `CalculationError` if the report total exceeds the decimal range.
pub fn calculate_period(period: &Period, input: BatchInput<'_>) -> EngineResult<AllowanceReport> {
    let start_time = Instant::now();

    // Group attendance by officer in a single pass
    let mut by_person: HashMap<&str, Vec<&AttendanceRecord>> = HashMap::new();
    for record in input.attendance {
        by_person
            .entry(record.person_id.as_str())
            .or_default()
            .push(record);
    }

    let mut rows: Vec<ProrationResult> = input
        .roster
        .iter()
        .map(|person| {
            let records = by_person
                .get(person.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            calculate_person(person, records, period, input.rate_table, input.policy)
        })
        .collect();

    let mut warnings: Vec<AuditWarning> = rows.iter().flat_map(flag_warnings).collect();

    let roster_ids: HashSet<&str> = input.roster.iter().map(|p| p.id.as_str()).collect();
    let mut unmatched: Vec<&str> = by_person
        .keys()
        .copied()
        .filter(|id| !roster_ids.contains(id))
        .collect();
    unmatched.sort_unstable();
    for person_id in unmatched {
        warn!(person_id = %person_id, "Attendance records for officer not on roster");
        warnings.push(AuditWarning {
            code: "UNMATCHED_ATTENDANCE".to_string(),
            message: format!(
                "Attendance records for '{}' do not match any officer on the roster",
                person_id
            ),
            person_id: Some(person_id.to_string()),
        });
    }

    sort_by_name(&mut rows);
    let aggregate = aggregate(rows)?;

    info!(
        period = %period.label,
        officers = aggregate.rows.len(),
        total = %aggregate.total,
        warnings = warnings.len(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Allowance batch calculated"
    );

    Ok(AllowanceReport {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        period: period.clone(),
        rows: aggregate.rows,
        total: aggregate.total,
        warnings,
    })
}

/// Calculates one officer's allowance.
///
/// `records` may contain entries for other officers or days outside the
/// period; they are filtered out during classification.
pub fn calculate_person(
    person: &Person,
    records: &[&AttendanceRecord],
    period: &Period,
    rate_table: &RateTable,
    policy: &ProrationPolicy,
) -> ProrationResult {
    let mut flags = Vec::new();
    let mut steps = Vec::with_capacity(4);

    let tenure = match tenure_months(&person.id, person.join_date, period.end) {
        Ok(months) => months,
        Err(err) => {
            warn!(person_id = %person.id, error = %err, "Tenure clamped to zero");
            flags.push(ResultFlag::InvalidJoinDate);
            0
        }
    };
    steps.push(AuditStep {
        step_number: 1,
        rule_id: "tenure".to_string(),
        rule_name: "Tenure".to_string(),
        input: serde_json::json!({
            "join_date": person.join_date.to_string(),
            "period_end": period.end.to_string()
        }),
        output: serde_json::json!({ "tenure_months": tenure }),
        reasoning: if flags.contains(&ResultFlag::InvalidJoinDate) {
            "Join date is after the period end; tenure clamped to 0".to_string()
        } else {
            format!("{} whole months from {} to {}", tenure, person.join_date, period.end)
        },
    });

    let rate = match resolve_rate(&person.department, tenure, rate_table, 2) {
        Ok(lookup) => {
            steps.push(lookup.audit_step.clone());
            lookup.rate()
        }
        Err(err) => {
            warn!(person_id = %person.id, error = %err, "No rate rule matched; using zero rate");
            flags.push(ResultFlag::RateNotFound);
            steps.push(AuditStep {
                step_number: 2,
                rule_id: "rate_resolution".to_string(),
                rule_name: "Rate Resolution".to_string(),
                input: serde_json::json!({
                    "department": person.department_key(),
                    "tenure_months": tenure
                }),
                output: serde_json::json!({ "base": "0", "per_day": "0", "found": false }),
                reasoning: err.to_string(),
            });
            ResolvedRate::zero()
        }
    };

    let classification = classify(person, records.iter().copied(), period, 3);
    steps.push(classification.audit_step);

    if !duplicate_days(&person.id, records.iter().copied(), period).is_empty() {
        flags.push(ResultFlag::DuplicateAttendance);
    }

    let net = match compute_net(&classification.tally, rate, policy, 4) {
        Ok(net) => net,
        Err(err) => {
            warn!(person_id = %person.id, error = %err, "Net amount overflowed; paying zero");
            flags.push(ResultFlag::AmountOverflow);
            NetAmountResult {
                additive: Decimal::ZERO,
                subtractive: Decimal::ZERO,
                net: Decimal::ZERO,
                audit_step: AuditStep {
                    step_number: 4,
                    rule_id: "net_amount".to_string(),
                    rule_name: "Net Amount".to_string(),
                    input: serde_json::json!({
                        "base": rate.base.to_string(),
                        "per_day": rate.per_day.to_string()
                    }),
                    output: serde_json::json!({ "net": "0", "overflow": true }),
                    reasoning: err.to_string(),
                },
            }
        }
    };
    steps.push(net.audit_step);

    debug!(
        person_id = %person.id,
        tenure_months = tenure,
        net = %net.net,
        "Officer allowance calculated"
    );

    ProrationResult {
        person_id: person.id.clone(),
        person_name: person.name.clone(),
        department: person.department.clone(),
        tenure_months: tenure,
        base_amount: rate.base,
        per_day_rate: rate.per_day,
        tally: classification.tally,
        additive: net.additive,
        subtractive: net.subtractive,
        net: net.net,
        flags,
        audit_trace: AuditTrace { steps },
    }
}

fn flag_warnings(row: &ProrationResult) -> Vec<AuditWarning> {
    row.flags
        .iter()
        .map(|flag| {
            let message = match flag {
                ResultFlag::RateNotFound => format!(
                    "No rate for department '{}' at {} months; allowance computed from a zero rate",
                    row.department, row.tenure_months
                ),
                ResultFlag::InvalidJoinDate => format!(
                    "Join date for '{}' is after the period end; tenure treated as 0",
                    row.person_name
                ),
                ResultFlag::DuplicateAttendance => format!(
                    "More than one schedule entry on the same day for '{}'",
                    row.person_name
                ),
                ResultFlag::AmountOverflow => format!(
                    "Allowance for '{}' exceeds the representable range; paid as 0",
                    row.person_name
                ),
            };
            AuditWarning {
                code: flag.code().to_string(),
                message,
                person_id: Some(row.person_id.clone()),
            }
        })
        .collect()
}
