//! Attendance classification.
//!
//! This module tallies an officer's schedule entries within a period into
//! per-category day counts.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{AttendanceRecord, AuditStep, Period, Person, StatusTally};

/// The result of classifying an officer's attendance, including the audit step.
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    /// Day counts per category.
    pub tally: StatusTally,
    /// The audit step recording this classification.
    pub audit_step: AuditStep,
}

/// Tallies an officer's attendance within a period.
///
/// Only records belonging to `person` whose day falls within the period
/// (inclusive) are counted. Unrecognised codes add to `unrecognized` only
/// and have no effect on any category. The result does not depend on the
/// order of `records`.
///
/// # Examples
///
/// ```
/// use allowance_engine::calculation::{classify, resolve_period};
/// use allowance_engine::models::{AttendanceRecord, EmploymentStatus, Person};
/// use chrono::NaiveDate;
///
/// let person = Person {
///     id: "off_001".to_string(),
///     name: "Budi Santoso".to_string(),
///     department: "AM".to_string(),
///     join_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
///     status: EmploymentStatus::Regular,
/// };
/// let period = resolve_period("January", 2026).unwrap();
/// let records = vec![
///     AttendanceRecord {
///         person_id: "off_001".to_string(),
///         day: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
///         status: "OFF".to_string(),
///     },
///     AttendanceRecord {
///         person_id: "off_001".to_string(),
///         day: NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(), // after period end
///         status: "OFF".to_string(),
///     },
/// ];
///
/// let result = classify(&person, &records, &period, 1);
/// assert_eq!(result.tally.off, 1);
/// ```
pub fn classify<'a, I>(
    person: &Person,
    records: I,
    period: &Period,
    step_number: u32,
) -> ClassificationResult
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut tally = StatusTally::default();
    let mut outside_period = 0u32;

    for record in records {
        if record.person_id != person.id {
            continue;
        }
        if !period.contains_date(record.day) {
            outside_period += 1;
            continue;
        }
        tally.record(record.category());
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_classification".to_string(),
        rule_name: "Attendance Classification".to_string(),
        input: serde_json::json!({
            "person_id": person.id,
            "period_start": period.start.to_string(),
            "period_end": period.end.to_string(),
            "records_outside_period": outside_period
        }),
        output: serde_json::json!({
            "on_duty": tally.on_duty,
            "off": tally.off,
            "sick": tally.sick,
            "leave": tally.leave,
            "unpaid_leave": tally.unpaid_leave,
            "absence": tally.absence,
            "unrecognized": tally.unrecognized
        }),
        reasoning: format!(
            "{} off, {} sick, {} leave, {} unpaid leave, {} absence between {} and {}",
            tally.off,
            tally.sick,
            tally.leave,
            tally.unpaid_leave,
            tally.absence,
            period.start,
            period.end
        ),
    };

    ClassificationResult { tally, audit_step }
}

/// Returns the days within the period that have more than one record for `person_id`.
pub fn duplicate_days<'a, I>(person_id: &str, records: I, period: &Period) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for record in records {
        if record.person_id == person_id && period.contains_date(record.day) {
            *per_day.entry(record.day).or_insert(0) += 1;
        }
    }

    per_day
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(day, _)| day)
        .collect()
}
