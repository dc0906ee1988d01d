//! Attendance records and status categories.
//!
//! Schedule rows carry a raw status code per officer per day. The codes are
//! mapped onto a small set of [`StatusCategory`] values; anything outside the
//! recognised set has no attendance impact.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The attendance category a daily status code falls into.
///
/// # Example
///
/// ```
/// use allowance_engine::models::StatusCategory;
///
/// assert_eq!(StatusCategory::from_code(" off "), Some(StatusCategory::Off));
/// assert_eq!(StatusCategory::from_code("NIGHT"), Some(StatusCategory::OnDuty));
/// assert_eq!(StatusCategory::from_code("TRAINING"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// Any on-duty shift variant.
    OnDuty,
    /// Scheduled day off.
    Off,
    /// Sick day.
    Sick,
    /// Approved paid leave.
    Leave,
    /// Approved unpaid leave.
    UnpaidLeave,
    /// Unexcused absence.
    Absence,
}

impl StatusCategory {
    /// Maps a raw schedule code onto its category.
    ///
    /// Codes are trimmed and compared case-insensitively. Unrecognised codes,
    /// including administrative ones, return `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_uppercase();
        let category = match code.as_str() {
            "ON" | "DAY" | "MIDDLE" | "NIGHT" | "P" | "S" | "M" => StatusCategory::OnDuty,
            "OFF" => StatusCategory::Off,
            "SICK" | "SKT" => StatusCategory::Sick,
            "LEAVE" | "CUTI" => StatusCategory::Leave,
            "UNPAID-LEAVE" | "UNPAID_LEAVE" | "UNPAID" => StatusCategory::UnpaidLeave,
            "ABSENCE" | "ABSENT" | "A" => StatusCategory::Absence,
            _ => return None,
        };
        Some(category)
    }
}

/// One status entry for one officer on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The officer the entry belongs to.
    pub person_id: String,
    /// The calendar day.
    pub day: NaiveDate,
    /// The raw status code from the schedule.
    pub status: String,
}

impl AttendanceRecord {
    /// Returns the category of this record's status code, if recognised.
    pub fn category(&self) -> Option<StatusCategory> {
        StatusCategory::from_code(&self.status)
    }
}

/// Day counts per status category for one officer over one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTally {
    /// Days on any duty shift.
    pub on_duty: u32,
    /// Days off.
    pub off: u32,
    /// Sick days.
    pub sick: u32,
    /// Paid leave days.
    pub leave: u32,
    /// Unpaid leave days.
    pub unpaid_leave: u32,
    /// Unexcused absences.
    pub absence: u32,
    /// Days whose code was not recognised.
    pub unrecognized: u32,
}

impl StatusTally {
    /// Adds one day to the given category.
    pub fn record(&mut self, category: Option<StatusCategory>) {
        match category {
            Some(StatusCategory::OnDuty) => self.on_duty += 1,
            Some(StatusCategory::Off) => self.off += 1,
            Some(StatusCategory::Sick) => self.sick += 1,
            Some(StatusCategory::Leave) => self.leave += 1,
            Some(StatusCategory::UnpaidLeave) => self.unpaid_leave += 1,
            Some(StatusCategory::Absence) => self.absence += 1,
            None => self.unrecognized += 1,
        }
    }

    /// Returns the count for a category.
    pub fn count(&self, category: StatusCategory) -> u32 {
        match category {
            StatusCategory::OnDuty => self.on_duty,
            StatusCategory::Off => self.off,
            StatusCategory::Sick => self.sick,
            StatusCategory::Leave => self.leave,
            StatusCategory::UnpaidLeave => self.unpaid_leave,
            StatusCategory::Absence => self.absence,
        }
    }
}
