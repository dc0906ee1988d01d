//! Input adapters for the Allowance Engine.
//!
//! The engine itself only consumes typed rosters and attendance records.
//! These helpers prepare them from the roster and from the shift schedule
//! export. Fetching the export is left to the caller.

mod roster;
mod schedule_csv;

pub use roster::eligible_roster;
pub use schedule_csv::{MatchedAttendance, ScheduleEntry, match_to_roster, read_schedule};
