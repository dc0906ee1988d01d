//! Error types for the Allowance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while prorating allowances.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Allowance Engine.
///
/// Per-person conditions (`InvalidDate`, `RateNotFound`) are turned into
/// result flags by the batch pipeline rather than aborting the whole batch.
///
/// # Example
///
/// ```
/// use allowance_engine::error::EngineError;
///
/// let error = EngineError::InvalidPeriod {
///     month: "Smarch".to_string(),
///     year: 2026,
/// };
/// assert_eq!(error.to_string(), "Invalid period: month 'Smarch' of year 2026");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The proration policy is internally inconsistent.
    #[error("Invalid proration policy: {message}")]
    InvalidPolicy {
        /// What made the policy invalid.
        message: String,
    },

    /// The month/year pair does not name a reporting period.
    #[error("Invalid period: month '{month}' of year {year}")]
    InvalidPeriod {
        /// The month label as supplied.
        month: String,
        /// The year as supplied.
        year: i32,
    },

    /// A person's join date falls after the period end.
    #[error("Invalid join date for '{person_id}': {join_date} is after period end {period_end}")]
    InvalidDate {
        /// The person whose record is inconsistent.
        person_id: String,
        /// The recorded join date.
        join_date: NaiveDate,
        /// The end of the period tenure was measured against.
        period_end: NaiveDate,
    },

    /// No rate rule matches the department and tenure.
    #[error("Rate not found for department '{department}' with tenure of {tenure_months} months")]
    RateNotFound {
        /// The department that was looked up.
        department: String,
        /// The tenure in whole months.
        tenure_months: u32,
    },

    /// A schedule export could not be read.
    #[error("Invalid schedule export: {message}")]
    InvalidSchedule {
        /// A description of the problem.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        EngineError::InvalidSchedule {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/policy.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/policy.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/rates.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/rates.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_period_displays_month_and_year() {
        let error = EngineError::InvalidPeriod {
            month: "Smarch".to_string(),
            year: 2026,
        };
        assert_eq!(error.to_string(), "Invalid period: month 'Smarch' of year 2026");
    }

    #[test]
    fn test_invalid_date_displays_person_and_dates() {
        let error = EngineError::InvalidDate {
            person_id: "off_007".to_string(),
            join_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid join date for 'off_007': 2026-02-01 is after period end 2026-01-20"
        );
    }

    #[test]
    fn test_rate_not_found_displays_department_and_tenure() {
        let error = EngineError::RateNotFound {
            department: "CS-DP-WD".to_string(),
            tenure_months: 5,
        };
        assert_eq!(
            error.to_string(),
            "Rate not found for department 'CS-DP-WD' with tenure of 5 months"
        );
    }

    #[test]
    fn test_invalid_policy_displays_message() {
        let error = EngineError::InvalidPolicy {
            message: "absence cannot be deductible".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid proration policy: absence cannot be deductible"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_period() -> EngineResult<()> {
            Err(EngineError::InvalidPeriod {
                month: "Undecember".to_string(),
                year: 2026,
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_period()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
