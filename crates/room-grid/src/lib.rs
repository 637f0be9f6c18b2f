//! # room-grid
//!
//! Weekly classroom schedule grid for university information kiosks.
//!
//! A room's regular (recurring) and temporary (override) schedule entries are
//! laid out on a grid of fixed-width time slots × weekdays. Consecutive slots
//! covered by one entry collapse into a single spanning cell, and every entry
//! overlapping that cell's first slot is kept inside it so an override stays
//! visible next to the class it replaces.
//!
//! ## Quick start
//!
//! ```rust
//! use room_grid::{build_grid, Cell, GridPolicy, RoomSchedule};
//!
//! let json = r#"{
//!     "regularSchedules": [
//!         {"day": "Monday", "start_time": "09:00 AM", "end_time": "10:00 AM",
//!          "class_name": "CS101", "section": "A", "professor": "Reyes"}
//!     ],
//!     "temporarySchedules": []
//! }"#;
//!
//! let schedule = RoomSchedule::from_json(json).unwrap();
//! let grid = build_grid(&schedule.entries(), &GridPolicy::default()).unwrap();
//!
//! // 09:00 AM is the fourth slot after 07:30 AM; Monday is column 0.
//! assert!(matches!(grid.cell(3, 0), Some(Cell::Occupied { span: 2, .. })));
//! assert!(matches!(grid.cell(4, 0), Some(Cell::Covered { owner: 3 })));
//! ```
//!
//! ## Modules
//!
//! - [`clock`] — 12-hour clock strings ↔ minute of day
//! - [`slots`] — Fixed-width slot sequence for the display window
//! - [`schedule`] — Schedule entries and backend payloads
//! - [`matcher`] — Entries overlapping a (day, slot) pair
//! - [`grid`] — Grid builder and span merger
//! - [`expiry`] — Drop temporary entries that already ended today
//! - [`occupancy`] — Room occupancy board with hold windows
//! - [`view`] — Explicit view state for a polled schedule panel
//! - [`render`] — HTML and plain-text rendering of a grid
//! - [`error`] — Error types

pub mod clock;
pub mod error;
pub mod expiry;
pub mod grid;
pub mod matcher;
pub mod occupancy;
pub mod render;
pub mod schedule;
pub mod slots;
pub mod view;

pub use clock::{format_clock, parse_clock};
pub use error::{FetchError, GridError};
pub use expiry::filter_expired;
pub use grid::{build_grid, Cell, Grid, GridPolicy};
pub use matcher::match_slot;
pub use occupancy::{OccupancyBoard, Room, RoomList};
pub use schedule::{Day, EntryKind, RoomSchedule, ScheduleEntry};
pub use slots::{generate_slots, TimeSlot};
pub use view::{ApplyOutcome, FetchTicket, Panel, ScheduleView};
