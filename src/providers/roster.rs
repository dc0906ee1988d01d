//! Roster filtering.
//!
//! The batch pipeline assumes every officer it receives is eligible. This
//! module applies that filter on the way in.

use crate::models::{Person, normalize_department};

/// Keeps officers whose employment status receives allowances.
///
/// When `departments` is non-empty, only officers in one of those
/// departments are kept (compared case-insensitively).
///
/// # Examples
///
/// ```
/// use allowance_engine::models::{EmploymentStatus, Person};
/// use allowance_engine::providers::eligible_roster;
/// use chrono::NaiveDate;
///
/// let officer = |id: &str, status| Person {
///     id: id.to_string(),
///     name: id.to_string(),
///     department: "AM".to_string(),
///     join_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
///     status,
/// };
/// let roster = vec![
///     officer("a", EmploymentStatus::Regular),
///     officer("b", EmploymentStatus::Resign),
/// ];
///
/// let eligible = eligible_roster(roster, &[]);
/// assert_eq!(eligible.len(), 1);
/// ```
pub fn eligible_roster(persons: Vec<Person>, departments: &[String]) -> Vec<Person> {
    let allowed: Vec<String> = departments
        .iter()
        .map(|d| normalize_department(d))
        .collect();

    persons
        .into_iter()
        .filter(|p| p.is_eligible())
        .filter(|p| allowed.is_empty() || allowed.contains(&p.department_key()))
        .collect()
}
