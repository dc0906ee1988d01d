//! Person model and related types.
//!
//! This module defines the [`Person`] struct and [`EmploymentStatus`] enum
//! for representing officers on the allowance roster.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an officer's employment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    /// Regular, permanent staff.
    Regular,
    /// Staff still in their training period.
    Training,
    /// Resigned; no longer paid allowances.
    Resign,
    /// Terminated; no longer paid allowances.
    Terminated,
}

impl EmploymentStatus {
    /// Returns true for statuses that receive allowances.
    pub fn is_active(self) -> bool {
        matches!(self, EmploymentStatus::Regular | EmploymentStatus::Training)
    }
}

/// Represents an officer eligible for the allowance calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier for the officer.
    pub id: String,
    /// The officer's full name, as used on the shift schedule.
    pub name: String,
    /// Department label (e.g., "AM", "CAPTAIN", "CS-DP-WD").
    pub department: String,
    /// The date the officer joined.
    pub join_date: NaiveDate,
    /// The officer's employment status.
    pub status: EmploymentStatus,
}

impl Person {
    /// Returns true if the officer should appear on the allowance roster.
    ///
    /// # Examples
    ///
    /// ```
    /// use allowance_engine::models::{EmploymentStatus, Person};
    /// use chrono::NaiveDate;
    ///
    /// let officer = Person {
    ///     id: "off_001".to_string(),
    ///     name: "Budi Santoso".to_string(),
    ///     department: "AM".to_string(),
    ///     join_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
    ///     status: EmploymentStatus::Training,
    /// };
    /// assert!(officer.is_eligible());
    /// ```
    pub fn is_eligible(&self) -> bool {
        self.status.is_active()
    }

    /// Department label normalised for rate table lookups.
    pub fn department_key(&self) -> String {
        normalize_department(&self.department)
    }
}

/// Normalises a department label: trimmed and upper-cased.
pub fn normalize_department(department: &str) -> String {
    department.trim().to_uppercase()
}
