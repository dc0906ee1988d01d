//! Shift schedule export reader.
//!
//! The schedule is published as a spreadsheet with one row per officer and
//! one column per day:
//!
//! ```text
//! name,id,2025-12-21,2025-12-22,...
//! Budi Santoso,off_001,DAY,OFF,...
//! ```
//!
//! The `id` column is optional. Every other header must be a date in
//! `YYYY-MM-DD` form. Blank cells are skipped.

use std::collections::{HashMap, HashSet};
use std::io::Read;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Person};

/// One non-blank cell of the schedule export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// The officer's name as written on the schedule.
    pub name: String,
    /// The officer's id, if the export has an id column.
    pub id: Option<String>,
    /// The day of the cell.
    pub day: NaiveDate,
    /// The raw status code in the cell.
    pub status: String,
}

/// Schedule entries resolved against a roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedAttendance {
    /// Records for officers found on the roster.
    pub records: Vec<AttendanceRecord>,
    /// Schedule names that matched no officer, or more than one.
    pub unmatched_names: Vec<String>,
}

enum Column {
    Name,
    Id,
    Day(NaiveDate),
}

/// Reads a schedule export into entries.
///
/// # Errors
///
/// Returns `InvalidSchedule` if the CSV is malformed, the header has no
/// `name` column, or a day header is not a `YYYY-MM-DD` date.
///
/// # Examples
///
/// ```
/// use allowance_engine::providers::read_schedule;
///
/// let csv = "name,2026-01-02,2026-01-03\nBudi Santoso,OFF,DAY\n";
/// let entries = read_schedule(csv.as_bytes()).unwrap();
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].status, "OFF");
/// ```
pub fn read_schedule<R: Read>(reader: R) -> EngineResult<Vec<ScheduleEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = csv_reader
        .headers()?
        .iter()
        .map(parse_column)
        .collect::<EngineResult<Vec<Column>>>()?;

    let name_idx = columns
        .iter()
        .position(|c| matches!(c, Column::Name))
        .ok_or_else(|| EngineError::InvalidSchedule {
            message: "header has no 'name' column".to_string(),
        })?;
    let id_idx = columns.iter().position(|c| matches!(c, Column::Id));

    let mut entries = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let name = row.get(name_idx).unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        let id = id_idx
            .and_then(|idx| row.get(idx))
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        for (column, cell) in columns.iter().zip(row.iter()) {
            if let Column::Day(day) = column {
                if cell.is_empty() {
                    continue;
                }
                entries.push(ScheduleEntry {
                    name: name.to_string(),
                    id: id.clone(),
                    day: *day,
                    status: cell.to_string(),
                });
            }
        }
    }

    Ok(entries)
}

fn parse_column(header: &str) -> EngineResult<Column> {
    match header.trim().to_lowercase().as_str() {
        "name" => Ok(Column::Name),
        "id" => Ok(Column::Id),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map(Column::Day)
            .map_err(|_| EngineError::InvalidSchedule {
                message: format!("column header '{}' is not a date", header),
            }),
    }
}

/// Resolves schedule entries to roster officers.
///
/// An entry with an id that is on the roster matches that officer. Otherwise
/// the name is compared, trimmed and case-insensitively; a name shared by
/// several officers is treated as unmatched rather than guessed.
pub fn match_to_roster(entries: &[ScheduleEntry], roster: &[Person]) -> MatchedAttendance {
    let ids: HashSet<&str> = roster.iter().map(|p| p.id.as_str()).collect();

    let mut by_name: HashMap<String, Vec<&str>> = HashMap::new();
    for person in roster {
        by_name
            .entry(name_key(&person.name))
            .or_default()
            .push(person.id.as_str());
    }

    let mut matched = MatchedAttendance::default();
    let mut unmatched: HashSet<String> = HashSet::new();

    for entry in entries {
        let person_id = match entry.id.as_deref() {
            Some(id) if ids.contains(id) => Some(id),
            _ => match by_name.get(&name_key(&entry.name)).map(Vec::as_slice) {
                Some([only]) => Some(*only),
                _ => None,
            },
        };

        match person_id {
            Some(person_id) => matched.records.push(AttendanceRecord {
                person_id: person_id.to_string(),
                day: entry.day,
                status: entry.status.clone(),
            }),
            None => {
                unmatched.insert(entry.name.clone());
            }
        }
    }

    matched.unmatched_names = unmatched.into_iter().collect();
    matched.unmatched_names.sort();
    matched
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
