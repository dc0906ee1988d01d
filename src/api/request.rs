//! Request types for the Allowance Engine API.
//!
//! This module defines the JSON request structure for the
//! `/allowances/calculate` endpoint.

use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, Person, RateRule, RateTable};

/// Request body for the `/allowances/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Month the period is named after (e.g., "January").
    pub month: String,
    /// Year the period is named after.
    pub year: i32,
    /// Officers to calculate. Ineligible statuses are filtered out.
    pub roster: Vec<Person>,
    /// Attendance records already matched to officer ids.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// Schedule export CSV text, matched to the roster by id or name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_csv: Option<String>,
    /// Restricts the roster to these departments when non-empty.
    #[serde(default)]
    pub departments: Vec<String>,
    /// Overrides the configured rate table for this request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_table: Option<Vec<RateRule>>,
}

impl CalculationRequest {
    /// Returns the request's rate table override, if any.
    pub fn rate_table_override(&self) -> Option<RateTable> {
        self.rate_table.clone().map(RateTable::new)
    }
}
