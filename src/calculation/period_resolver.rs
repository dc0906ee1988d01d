//! Reporting period resolution.
//!
//! Allowance periods run from the 21st of the previous month through the
//! 20th of the named month. The January period therefore starts in December
//! of the previous year.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{Month, Period};

/// First day of a period, in the month before the named month.
pub const PERIOD_START_DAY: u32 = 21;

/// Last day of a period, in the named month.
pub const PERIOD_END_DAY: u32 = 20;

/// Resolves a month label and year into a reporting period.
///
/// # Errors
///
/// Returns `InvalidPeriod` if the month label is not one of the twelve
/// recognised names (full or three-letter, any case) or the year is out of
/// the representable range.
///
/// # Examples
///
/// ```
/// use allowance_engine::calculation::resolve_period;
/// use chrono::NaiveDate;
///
/// let period = resolve_period("January", 2026).unwrap();
/// assert_eq!(period.start, NaiveDate::from_ymd_opt(2025, 12, 21).unwrap());
/// assert_eq!(period.end, NaiveDate::from_ymd_opt(2026, 1, 20).unwrap());
/// assert_eq!(period.label, "21 December 2025 - 20 January 2026");
/// ```
pub fn resolve_period(month: &str, year: i32) -> EngineResult<Period> {
    let parsed: Month = month.parse().map_err(|_| EngineError::InvalidPeriod {
        month: month.to_string(),
        year,
    })?;
    Period::for_month(parsed, year)
}

impl Period {
    /// Builds the period named after `month` of `year`.
    pub fn for_month(month: Month, year: i32) -> EngineResult<Period> {
        let invalid = || EngineError::InvalidPeriod {
            month: month.to_string(),
            year,
        };

        let previous = month.previous();
        let start_year = if month == Month::January {
            year.checked_sub(1).ok_or_else(invalid)?
        } else {
            year
        };

        let start = NaiveDate::from_ymd_opt(start_year, previous.number(), PERIOD_START_DAY)
            .ok_or_else(invalid)?;
        let end =
            NaiveDate::from_ymd_opt(year, month.number(), PERIOD_END_DAY).ok_or_else(invalid)?;

        let label = format!(
            "{} {} {} - {} {} {}",
            PERIOD_START_DAY, previous, start_year, PERIOD_END_DAY, month, year
        );

        Ok(Period {
            month,
            year,
            start,
            end,
            label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Months};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_january_spans_previous_year() {
        let period = resolve_period("January", 2026).unwrap();

        assert_eq!(period.start, date(2025, 12, 21));
        assert_eq!(period.end, date(2026, 1, 20));
        assert_eq!(period.month, Month::January);
        assert_eq!(period.year, 2026);
        assert_eq!(period.label, "21 December 2025 - 20 January 2026");
    }

    #[test]
    fn test_march_period() {
        let period = resolve_period("march", 2024).unwrap();

        assert_eq!(period.start, date(2024, 2, 21));
        assert_eq!(period.end, date(2024, 3, 20));
        assert_eq!(period.label, "21 February 2024 - 20 March 2024");
        // 2024 is a leap year: 9 days of February plus 20 of March
        assert_eq!(period.days(), 29);
    }

    #[test]
    fn test_december_period_stays_in_year() {
        let period = resolve_period("Dec", 2025).unwrap();

        assert_eq!(period.start, date(2025, 11, 21));
        assert_eq!(period.end, date(2025, 12, 20));
    }

    #[test]
    fn test_unknown_month_is_invalid_period() {
        match resolve_period("Smarch", 2026) {
            Err(EngineError::InvalidPeriod { month, year }) => {
                assert_eq!(month, "Smarch");
                assert_eq!(year, 2026);
            }
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_unrepresentable_year_is_invalid_period() {
        assert!(matches!(
            resolve_period("June", i32::MAX),
            Err(EngineError::InvalidPeriod { .. })
        ));
        assert!(matches!(
            Period::for_month(Month::January, i32::MIN),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_non_january_periods_are_one_month_long(
            month_idx in 1usize..12,
            year in 1900i32..2200,
        ) {
            let period = Period::for_month(Month::ALL[month_idx], year).unwrap();

            prop_assert_eq!(period.start.day(), 21);
            prop_assert_eq!(period.end.day(), 20);
            prop_assert_eq!(period.start.year(), year);
            prop_assert_eq!(
                period.start.checked_add_months(Months::new(1)).unwrap()
                    - chrono::Duration::days(1),
                period.end
            );
        }

        #[test]
        fn prop_every_period_ends_in_named_month(month_idx in 0usize..12, year in 1900i32..2200) {
            let month = Month::ALL[month_idx];
            let period = Period::for_month(month, year).unwrap();

            prop_assert_eq!(period.end.month(), month.number());
            prop_assert_eq!(period.end.year(), year);
            prop_assert!(period.contains_date(period.start));
            prop_assert!(period.contains_date(period.end));
        }
    }
}
