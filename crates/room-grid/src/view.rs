//! View state for one polled schedule panel.
//!
//! Everything a schedule modal needs between polls lives in [`ScheduleView`]:
//! which room it shows, the policy, what is on screen, and the fetch sequence.
//! Each fetch takes a [`FetchTicket`]; a response is applied only if no newer
//! response has been applied already, so a slow reply can never paint old
//! data over fresh data.

use serde::Serialize;

use crate::error::{FetchError, Result};
use crate::grid::{build_grid, Grid, GridPolicy};
use crate::schedule::RoomSchedule;

/// Sequence number of one fetch, issued by [`ScheduleView::begin_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

/// What the panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "panel", rename_all = "lowercase")]
pub enum Panel {
    /// Opened, nothing received yet.
    Loading,
    Grid(Grid),
    /// A valid response with no entries left to show.
    Empty,
}

/// What [`ScheduleView::apply`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Rendered,
    Empty,
    /// The fetch failed; the previous panel is still shown.
    Retained,
    /// A newer response was already applied; this one was dropped.
    Stale,
}

/// Session object for a schedule modal.
#[derive(Debug, Clone)]
pub struct ScheduleView {
    room_id: u64,
    room_name: String,
    policy: GridPolicy,
    panel: Panel,
    issued: u64,
    applied: Option<FetchTicket>,
    last_error: Option<FetchError>,
}

impl ScheduleView {
    pub fn open(room_id: u64, room_name: impl Into<String>, policy: GridPolicy) -> Self {
        Self {
            room_id,
            room_name: room_name.into(),
            policy,
            panel: Panel::Loading,
            issued: 0,
            applied: None,
            last_error: None,
        }
    }

    pub fn room_id(&self) -> u64 {
        self.room_id
    }

    /// `"Weekly Schedule for <room>"`.
    pub fn title(&self) -> String {
        format!("Weekly Schedule for {}", self.room_name)
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn policy(&self) -> &GridPolicy {
        &self.policy
    }

    /// Error of the most recent failed fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Take a ticket for a fetch about to be issued.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Apply the outcome of the fetch holding `ticket`.
    ///
    /// Expired temporary entries are dropped against `now_minutes` before the
    /// grid is built.
    ///
    /// # Errors
    /// Returns `GridError::Config` if the view's policy cannot produce a grid.
    /// The panel is left untouched in that case.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: std::result::Result<RoomSchedule, FetchError>,
        now_minutes: u32,
    ) -> Result<ApplyOutcome> {
        if self.applied.is_some_and(|applied| ticket <= applied) {
            tracing::debug!(room = self.room_id, ticket = ticket.0, "dropping stale schedule response");
            return Ok(ApplyOutcome::Stale);
        }

        let schedule = match result {
            Ok(schedule) => schedule,
            Err(e) => {
                tracing::error!(room = self.room_id, error = %e, "schedule fetch failed; keeping previous panel");
                self.last_error = Some(e);
                return Ok(ApplyOutcome::Retained);
            }
        };

        let live = schedule.without_expired(now_minutes);
        let (panel, outcome) = if live.is_empty() {
            (Panel::Empty, ApplyOutcome::Empty)
        } else {
            let grid = build_grid(&live.entries(), &self.policy)?;
            (Panel::Grid(grid), ApplyOutcome::Rendered)
        };
        tracing::debug!(room = self.room_id, entries = live.len(), ?outcome, "schedule applied");

        self.panel = panel;
        self.applied = Some(ticket);
        self.last_error = None;
        Ok(outcome)
    }
}
