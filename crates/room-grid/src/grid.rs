//! Grid builder and span merger.
//!
//! Each day column is walked top to bottom. The first slot an entry touches
//! becomes an [`Cell::Occupied`] cell whose `span` follows the primary entry's
//! duration; the slots below it inside that span become [`Cell::Covered`] and
//! are never rendered on their own.
//!
//! Every entry that overlaps the merged run is listed in the occupied cell, so
//! a temporary override starting halfway through a class still shows up next
//! to it. The run's height only ever follows the primary entry: a longer
//! secondary entry is cut off at the end of the run and picked up again by
//! the next uncovered slot.

use serde::Serialize;

use crate::clock::{format_clock, parse_clock};
use crate::error::{GridError, Result};
use crate::matcher::{match_prepared, normalize_day, prepare, TimedEntry};
use crate::schedule::{Day, ScheduleEntry};
use crate::slots::{generate_slots_minutes, TimeSlot};

/// Display window, step and columns for one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPolicy {
    /// First slot start, minutes since midnight.
    pub start: u32,
    /// No slot starts at or after this minute.
    pub end: u32,
    pub step_minutes: i64,
    /// Columns, left to right.
    pub days: Vec<Day>,
    /// When false every occupied cell spans exactly one slot.
    pub merge: bool,
}

impl Default for GridPolicy {
    /// 07:30 AM to 09:00 PM in 30-minute steps, Monday through Saturday.
    fn default() -> Self {
        Self {
            start: 7 * 60 + 30,
            end: 21 * 60,
            step_minutes: 30,
            days: Day::TEACHING_WEEK.to_vec(),
            merge: true,
        }
    }
}

impl GridPolicy {
    /// Policy for a window given as 12-hour clock strings, default columns.
    pub fn from_clocks(start: &str, end: &str, step_minutes: i64) -> Result<Self> {
        Ok(Self {
            start: parse_clock(start)?,
            end: parse_clock(end)?,
            step_minutes,
            ..Self::default()
        })
    }

    pub fn with_days(mut self, days: Vec<Day>) -> Self {
        self.days = days;
        self
    }

    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// The slot rows this policy produces.
    pub fn slots(&self) -> Result<Vec<TimeSlot>> {
        generate_slots_minutes(self.start, self.end, self.step_minutes)
    }

    fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(GridError::Config("no day columns configured".to_string()));
        }
        Ok(())
    }
}

/// State of one (slot, day) position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Cell {
    /// Nothing scheduled.
    Empty,
    /// Top cell of a merge run covering `span` slots.
    Occupied {
        entries: Vec<ScheduleEntry>,
        span: usize,
    },
    /// Inside the run started at slot index `owner` of the same column.
    Covered { owner: usize },
}

/// A weekly grid, rebuilt from scratch on every render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    slots: Vec<TimeSlot>,
    days: Vec<Day>,
    /// `cells[slot][day]`.
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn cell(&self, slot: usize, day: usize) -> Option<&Cell> {
        self.cells.get(slot).and_then(|row| row.get(day))
    }

    /// Rows in slot order, each with one cell per day column.
    pub fn rows(&self) -> impl Iterator<Item = (&TimeSlot, &[Cell])> {
        self.slots
            .iter()
            .zip(self.cells.iter().map(|row| row.as_slice()))
    }

    /// Occupied cells as `(slot index, day index, entries, span)`, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &[ScheduleEntry], usize)> {
        self.cells.iter().enumerate().flat_map(|(s, row)| {
            row.iter().enumerate().filter_map(move |(d, cell)| match cell {
                Cell::Occupied { entries, span } => Some((s, d, entries.as_slice(), *span)),
                _ => None,
            })
        })
    }

    /// True when nothing at all is scheduled in the window.
    pub fn is_blank(&self) -> bool {
        self.occupied().next().is_none()
    }
}

/// Earliest-starting match; ties keep matching order (regular first).
fn primary<'e, 'a>(matches: &[&'e TimedEntry<'a>]) -> Option<&'e TimedEntry<'a>> {
    matches.iter().copied().min_by_key(|t| t.start)
}

/// Number of slots, starting at `slot`, that `entry` still covers.
fn span_for(entry: &TimedEntry<'_>, slot: &TimeSlot, step: u32, remaining_slots: usize) -> usize {
    let covered = entry.end.saturating_sub(slot.start).div_ceil(step) as usize;
    covered.clamp(1, remaining_slots.max(1))
}

/// Build the grid for `entries` under `policy`.
///
/// Entries with malformed clock strings are skipped (and logged); they never
/// abort the build.
///
/// # Errors
/// Returns `GridError::Config` if the policy's window, step or columns are
/// unusable.
pub fn build_grid(entries: &[ScheduleEntry], policy: &GridPolicy) -> Result<Grid> {
    policy.validate()?;
    let slots = policy.slots()?;
    let step = u32::try_from(policy.step_minutes)
        .map_err(|_| GridError::Config(format!("unusable step {}", policy.step_minutes)))?;

    let timed = prepare(entries);
    let mut cells = vec![vec![Cell::Empty; policy.days.len()]; slots.len()];

    for (col, day) in policy.days.iter().enumerate() {
        let day_key = normalize_day(day.name());
        let mut row = 0;
        while row < slots.len() {
            let slot = &slots[row];
            let matches = match_prepared(&timed, &day_key, slot);
            let Some(lead) = primary(&matches) else {
                row += 1;
                continue;
            };

            let span = if policy.merge {
                span_for(lead, slot, step, slots.len() - row)
            } else {
                1
            };
            let run_end = slots[row + span - 1].end;
            let run = TimeSlot {
                start: slot.start,
                end: run_end,
                label: String::new(),
            };
            let entries: Vec<ScheduleEntry> = match_prepared(&timed, &day_key, &run)
                .into_iter()
                .map(|t| t.entry.clone())
                .collect();

            tracing::trace!(
                day = %day,
                slot = %slot.label,
                span,
                entries = entries.len(),
                until = %format_clock(run_end),
                "merged cell"
            );

            cells[row][col] = Cell::Occupied { entries, span };
            for cell_row in cells.iter_mut().skip(row + 1).take(span - 1) {
                cell_row[col] = Cell::Covered { owner: row };
            }
            row += span;
        }
    }

    Ok(Grid {
        slots,
        days: policy.days.clone(),
        cells,
    })
}
