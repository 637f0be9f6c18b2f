//! Fixed-width time slots covering the kiosk's display window.

use serde::Serialize;

use crate::clock::{format_clock, parse_clock};
use crate::error::{GridError, Result};

/// One grid row: the half-open interval `[start, end)` in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub start: u32,
    pub end: u32,
    /// `"07:30 AM - 08:00 AM"`.
    pub label: String,
}

impl TimeSlot {
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start,
            end,
            label: format!("{} - {}", format_clock(start), format_clock(end)),
        }
    }

    /// Strict overlap: an interval ending exactly at `self.start` (or starting
    /// exactly at `self.end`) does not overlap.
    pub fn overlaps(&self, start: u32, end: u32) -> bool {
        start < self.end && end > self.start
    }
}

/// Generate the slot sequence for a window given as 12-hour clock strings.
///
/// See [`generate_slots_minutes`] for the sequence rules.
///
/// # Errors
/// Returns `GridError::Format` if either clock string is malformed, and
/// `GridError::Config` if the window or step is unusable.
pub fn generate_slots(start_clock: &str, end_clock: &str, step_minutes: i64) -> Result<Vec<TimeSlot>> {
    let start = parse_clock(start_clock)?;
    let end = parse_clock(end_clock)?;
    generate_slots_minutes(start, end, step_minutes)
}

/// Generate contiguous slots of `step_minutes` starting at `start`.
///
/// A slot is emitted for every start strictly before `end`, so the last slot
/// may run past `end` when the window is not a multiple of the step. The
/// sequence length is `ceil((end - start) / step)`.
///
/// # Errors
/// Returns `GridError::Config` if `step_minutes <= 0` or `start >= end`.
pub fn generate_slots_minutes(start: u32, end: u32, step_minutes: i64) -> Result<Vec<TimeSlot>> {
    if step_minutes <= 0 {
        return Err(GridError::Config(format!(
            "step must be positive, got {} minutes",
            step_minutes
        )));
    }
    if start >= end {
        return Err(GridError::Config(format!(
            "window start {} is not before end {}",
            format_clock(start),
            format_clock(end)
        )));
    }
    let step = u32::try_from(step_minutes)
        .map_err(|_| GridError::Config(format!("step of {} minutes is too large", step_minutes)))?;

    let mut slots = Vec::with_capacity((end - start).div_ceil(step) as usize);
    let mut cursor = start;
    while cursor < end {
        let next = cursor.saturating_add(step);
        slots.push(TimeSlot::new(cursor, next));
        cursor = next;
    }
    Ok(slots)
}
