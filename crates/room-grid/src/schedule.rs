//! Schedule entries and the room-schedule payload.
//!
//! The backend sends regular and temporary entries in two separate arrays and
//! neither carries its kind; [`RoomSchedule::from_json`] stamps the kind from
//! the array it came from.

use serde::{Deserialize, Serialize};

use crate::clock::parse_clock;
use crate::error::Result;

/// Weekday of a grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Monday through Saturday, the columns the kiosk shows by default.
    pub const TEACHING_WEEK: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// Case-insensitive, whitespace-trimmed comparison against a raw day
    /// string as received from the backend.
    pub fn matches(self, raw: &str) -> bool {
        raw.trim().eq_ignore_ascii_case(self.name())
    }

    /// Parse a day name leniently (trimmed, any case).
    pub fn parse(raw: &str) -> Option<Day> {
        [Day::Sunday]
            .into_iter()
            .chain(Day::TEACHING_WEEK)
            .find(|d| d.matches(raw))
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an entry recurs weekly or overrides the room for a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Regular,
    Temporary,
}

/// One scheduled occupation of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Day as received; compared case-insensitively when matching.
    #[serde(default)]
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, alias = "subject_name")]
    pub class_name: Option<String>,
    #[serde(default, alias = "section_name")]
    pub section: Option<String>,
    #[serde(default, alias = "professor_name")]
    pub professor: Option<String>,
    #[serde(default, alias = "type", alias = "schedule_type")]
    pub kind: EntryKind,
    /// Set by the backend on a regular entry that a temporary one overrides.
    #[serde(default)]
    pub overridden: bool,
}

impl ScheduleEntry {
    /// `[start, end)` in minutes since midnight.
    ///
    /// # Errors
    /// Returns `GridError::Format` if either clock string is malformed.
    pub fn interval(&self) -> Result<(u32, u32)> {
        Ok((parse_clock(&self.start_time)?, parse_clock(&self.end_time)?))
    }

    pub fn is_temporary(&self) -> bool {
        self.kind == EntryKind::Temporary
    }
}

#[derive(Deserialize)]
struct RoomSchedulePayload {
    #[serde(default, rename = "regularSchedules")]
    regular: Vec<ScheduleEntry>,
    #[serde(default, rename = "temporarySchedules")]
    temporary: Vec<ScheduleEntry>,
}

/// Everything the backend knows about one room's week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomSchedule {
    pub regular: Vec<ScheduleEntry>,
    pub temporary: Vec<ScheduleEntry>,
}

impl RoomSchedule {
    /// Build a schedule, stamping each entry with the kind of its list.
    pub fn new(regular: Vec<ScheduleEntry>, temporary: Vec<ScheduleEntry>) -> Self {
        let regular = regular
            .into_iter()
            .map(|e| ScheduleEntry {
                kind: EntryKind::Regular,
                ..e
            })
            .collect();
        let temporary = temporary
            .into_iter()
            .map(|e| ScheduleEntry {
                kind: EntryKind::Temporary,
                ..e
            })
            .collect();
        Self { regular, temporary }
    }

    /// Decode a `{ regularSchedules, temporarySchedules }` payload.
    ///
    /// # Errors
    /// Returns `GridError::Payload` if the JSON does not decode.
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: RoomSchedulePayload = serde_json::from_str(json)?;
        Ok(Self::new(payload.regular, payload.temporary))
    }

    /// Regular entries followed by temporary ones. The matcher relies on
    /// this order to list a class before its override.
    pub fn entries(&self) -> Vec<ScheduleEntry> {
        self.regular
            .iter()
            .chain(self.temporary.iter())
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.temporary.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regular.len() + self.temporary.len()
    }
}
