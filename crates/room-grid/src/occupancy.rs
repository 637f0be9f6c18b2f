//! Room occupancy board.
//!
//! The room list poll reports each room's motion-sensor state. An occupied
//! report is trusted for a hold window, refreshed by every further occupied
//! report; if no report arrives before the window lapses (the backend is
//! unreachable, say) the room falls back to free. A free report clears the
//! hold at once.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default hold window for an occupied report.
pub const DEFAULT_HOLD_SECS: i64 = 300;

/// Room as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub occupied: bool,
}

/// `{ "rooms": [...] }` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomList {
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl RoomList {
    /// # Errors
    /// Returns `GridError::Payload` if the JSON does not decode.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One button on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomStatus {
    pub id: u64,
    pub name: String,
    pub occupied: bool,
    /// When the occupied display lapses without a fresh report.
    pub held_until: Option<DateTime<Utc>>,
}

/// The set of room buttons, in backend order.
#[derive(Debug, Clone)]
pub struct OccupancyBoard {
    hold: Duration,
    rooms: Vec<RoomStatus>,
}

impl Default for OccupancyBoard {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_HOLD_SECS))
    }
}

impl OccupancyBoard {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            rooms: Vec::new(),
        }
    }

    /// Replace the board with the latest room list.
    ///
    /// Rooms missing from `list` disappear. Occupied rooms get a fresh hold;
    /// free rooms are shown free immediately.
    pub fn apply(&mut self, list: &RoomList, now: DateTime<Utc>) {
        let mut previous: HashMap<u64, RoomStatus> =
            self.rooms.drain(..).map(|r| (r.id, r)).collect();

        self.rooms = list
            .rooms
            .iter()
            .map(|room| {
                let was_occupied = previous.remove(&room.id).is_some_and(|r| r.occupied);
                let held_until = room.occupied.then(|| now + self.hold);
                if room.occupied != was_occupied {
                    tracing::info!(room = room.id, name = %room.name, occupied = room.occupied, "room occupancy changed");
                }
                RoomStatus {
                    id: room.id,
                    name: room.name.clone(),
                    occupied: room.occupied,
                    held_until,
                }
            })
            .collect();
    }

    /// Flip rooms whose hold has lapsed back to free.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        for room in &mut self.rooms {
            if room.held_until.is_some_and(|until| until <= now) {
                tracing::info!(room = room.id, name = %room.name, "occupancy hold expired");
                room.occupied = false;
                room.held_until = None;
            }
        }
    }

    pub fn rooms(&self) -> &[RoomStatus] {
        &self.rooms
    }

    pub fn room(&self, id: u64) -> Option<&RoomStatus> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// True when the board should show the "no classrooms" placeholder.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
