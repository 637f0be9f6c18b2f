//! Select the schedule entries that intersect a (day, slot) pair.
//!
//! Kind never filters: a temporary override and the regular class it replaces
//! both match, so the grid can show the conflict. Entries whose clock strings
//! do not parse are treated as unmatched and logged.

use crate::schedule::ScheduleEntry;
use crate::slots::TimeSlot;

/// An entry whose clock strings have already been parsed.
#[derive(Debug, Clone)]
pub(crate) struct TimedEntry<'a> {
    pub entry: &'a ScheduleEntry,
    /// Trimmed, lowercased day.
    pub day: String,
    pub start: u32,
    pub end: u32,
}

/// Parse every entry's interval once, dropping (and logging) malformed ones.
/// Input order is preserved.
pub(crate) fn prepare(entries: &[ScheduleEntry]) -> Vec<TimedEntry<'_>> {
    entries
        .iter()
        .filter_map(|entry| match entry.interval() {
            Ok((start, end)) => Some(TimedEntry {
                entry,
                day: normalize_day(&entry.day),
                start,
                end,
            }),
            Err(e) => {
                tracing::warn!(
                    day = %entry.day,
                    class_name = entry.class_name.as_deref().unwrap_or(""),
                    error = %e,
                    "skipping schedule entry with malformed time"
                );
                None
            }
        })
        .collect()
}

pub(crate) fn normalize_day(day: &str) -> String {
    day.trim().to_lowercase()
}

/// Matches among prepared entries; `day` must already be normalized.
pub(crate) fn match_prepared<'e, 'a>(
    timed: &'e [TimedEntry<'a>],
    day: &str,
    slot: &TimeSlot,
) -> Vec<&'e TimedEntry<'a>> {
    timed
        .iter()
        .filter(|t| t.day == day && slot.overlaps(t.start, t.end))
        .collect()
}

/// Entries on `day` whose `[start, end)` strictly overlaps `slot`.
///
/// Days compare trimmed and case-insensitively. Adjacent entries (ending
/// exactly at `slot.start` or starting exactly at `slot.end`) do not match.
/// The result keeps input order.
pub fn match_slot<'a>(entries: &'a [ScheduleEntry], day: &str, slot: &TimeSlot) -> Vec<&'a ScheduleEntry> {
    let timed = prepare(entries);
    match_prepared(&timed, &normalize_day(day), slot)
        .into_iter()
        .map(|t| t.entry)
        .collect()
}
