//! Drop temporary entries that have already ended today.
//!
//! Regular entries recur weekly and are never dropped by time of day.
//! Temporary entries are date-bound overrides; once their end time passes they
//! no longer describe the room. Runs once per fetch, before the grid is built.

use crate::clock::parse_clock;
use crate::schedule::{RoomSchedule, ScheduleEntry};

fn still_running(entry: &ScheduleEntry, now_minutes: u32) -> bool {
    if !entry.is_temporary() {
        return true;
    }
    match parse_clock(&entry.end_time) {
        Ok(end) => end > now_minutes,
        // Left in; the matcher drops and reports it.
        Err(_) => true,
    }
}

/// Keep regular entries, and temporary entries ending after `now_minutes`.
pub fn filter_expired(entries: &[ScheduleEntry], now_minutes: u32) -> Vec<ScheduleEntry> {
    entries
        .iter()
        .filter(|e| still_running(e, now_minutes))
        .cloned()
        .collect()
}

impl RoomSchedule {
    /// This schedule with expired temporary entries removed.
    pub fn without_expired(&self, now_minutes: u32) -> RoomSchedule {
        let temporary = filter_expired(&self.temporary, now_minutes);
        let dropped = self.temporary.len() - temporary.len();
        if dropped > 0 {
            tracing::debug!(dropped, now_minutes, "dropped expired temporary entries");
        }
        RoomSchedule {
            regular: self.regular.clone(),
            temporary,
        }
    }
}
