//! Core data models for the Allowance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod period;
mod person;
mod proration_result;
mod rate_rule;

pub use attendance::{AttendanceRecord, StatusCategory, StatusTally};
pub use period::{Month, Period, UnknownMonth};
pub use person::{EmploymentStatus, Person, normalize_department};
pub use proration_result::{
    AllowanceReport, AuditStep, AuditTrace, AuditWarning, ProrationResult, ResultFlag,
};
pub use rate_rule::{RateRule, RateTable, TenureBand};
