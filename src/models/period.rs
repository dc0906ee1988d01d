//! Reporting period and month models.
//!
//! This module contains the [`Month`] and [`Period`] types. A period runs
//! from the 21st of the previous month to the 20th of the named month.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A calendar month, as used to name a reporting period.
///
/// # Example
///
/// ```
/// use allowance_engine::models::Month;
///
/// let month: Month = "january".parse().unwrap();
/// assert_eq!(month, Month::January);
/// assert_eq!(month.previous(), Month::December);
/// assert_eq!(Month::March.to_string(), "March");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    /// January.
    January,
    /// February.
    February,
    /// March.
    March,
    /// April.
    April,
    /// May.
    May,
    /// June.
    June,
    /// July.
    July,
    /// August.
    August,
    /// September.
    September,
    /// October.
    October,
    /// November.
    November,
    /// December.
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based index, January = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Calendar month number, January = 1.
    pub fn number(self) -> u32 {
        self.index() as u32 + 1
    }

    /// The month before this one, wrapping January to December.
    pub fn previous(self) -> Month {
        Month::ALL[(self.index() + 11) % 12]
    }

    /// Full English name.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a month label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMonth(pub String);

impl FromStr for Month {
    type Err = UnknownMonth;

    /// Accepts full names and three-letter abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted.len() < 3 {
            return Err(UnknownMonth(s.to_string()));
        }
        Month::ALL
            .into_iter()
            .find(|m| {
                let name = m.name().to_lowercase();
                name == wanted || (wanted.len() == 3 && name.starts_with(&wanted))
            })
            .ok_or_else(|| UnknownMonth(s.to_string()))
    }
}

/// A resolved reporting period.
///
/// # Example
///
/// ```
/// use allowance_engine::models::{Month, Period};
/// use chrono::NaiveDate;
///
/// let period = Period::for_month(Month::March, 2026).unwrap();
/// assert_eq!(period.start, NaiveDate::from_ymd_opt(2026, 2, 21).unwrap());
/// assert_eq!(period.end, NaiveDate::from_ymd_opt(2026, 3, 20).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// The month the period is named after.
    pub month: Month,
    /// The year the period is named after (the year of `end`).
    pub year: i32,
    /// First day of the period (inclusive).
    pub start: NaiveDate,
    /// Last day of the period (inclusive).
    pub end: NaiveDate,
    /// Human-readable label, e.g. "21 December 2025 - 20 January 2026".
    pub label: String,
}

impl Period {
    /// Checks if a given date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days in the period.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
