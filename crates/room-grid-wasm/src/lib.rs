//! WASM bindings for room-grid.
//!
//! Exposes clock parsing, slot generation and the weekly schedule grid to the
//! kiosk page via `wasm-bindgen`. Complex values cross the boundary as JSON
//! strings: the page passes the backend's room-schedule payload through
//! untouched and gets back either the grid as JSON or a ready `<tbody>` body.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p room-grid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir static/js/wasm/ \
//!   target/wasm32-unknown-unknown/release/room_grid_wasm.wasm
//! ```

use room_grid::render::{render_empty_html, render_html};
use room_grid::{build_grid, Day, Grid, GridPolicy, RoomSchedule};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Grid options passed from JavaScript
// ---------------------------------------------------------------------------

/// Optional `{start, end, step_minutes, days, merge}` object; missing keys
/// fall back to the kiosk defaults.
#[derive(Deserialize, Default)]
#[serde(default)]
struct GridOptions {
    start: Option<String>,
    end: Option<String>,
    step_minutes: Option<i64>,
    days: Option<Vec<String>>,
    merge: Option<bool>,
}

fn policy_from_options(options_json: Option<&str>) -> Result<GridPolicy, String> {
    let options: GridOptions = match options_json {
        Some(json) if !json.trim().is_empty() => {
            serde_json::from_str(json).map_err(|e| format!("Invalid grid options JSON: {}", e))?
        }
        _ => GridOptions::default(),
    };

    let mut policy = GridPolicy::default();
    if let Some(start) = &options.start {
        policy.start = room_grid::parse_clock(start).map_err(|e| e.to_string())?;
    }
    if let Some(end) = &options.end {
        policy.end = room_grid::parse_clock(end).map_err(|e| e.to_string())?;
    }
    if let Some(step) = options.step_minutes {
        policy.step_minutes = step;
    }
    if let Some(days) = options.days {
        policy.days = days
            .iter()
            .map(|raw| Day::parse(raw).ok_or_else(|| format!("Unknown day: '{}'", raw)))
            .collect::<Result<Vec<_>, _>>()?;
    }
    if let Some(merge) = options.merge {
        policy.merge = merge;
    }
    Ok(policy)
}

/// Decode the payload, drop expired overrides, and build the grid. `None`
/// means nothing is left to show.
fn grid_for_payload(
    payload_json: &str,
    now_minutes: u32,
    options_json: Option<&str>,
) -> Result<Option<Grid>, String> {
    let policy = policy_from_options(options_json)?;
    let schedule = RoomSchedule::from_json(payload_json).map_err(|e| e.to_string())?;
    let live = schedule.without_expired(now_minutes);
    if live.is_empty() {
        return Ok(None);
    }
    build_grid(&live.entries(), &policy)
        .map(Some)
        .map_err(|e| e.to_string())
}

fn weekly_grid_json(
    payload_json: &str,
    now_minutes: u32,
    options_json: Option<&str>,
) -> Result<String, String> {
    let value = match grid_for_payload(payload_json, now_minutes, options_json)? {
        Some(grid) => serde_json::to_value(&grid),
        None => Ok(serde_json::Value::Null),
    }
    .map_err(|e| format!("Serialization error: {}", e))?;
    Ok(value.to_string())
}

fn weekly_table_html(
    payload_json: &str,
    now_minutes: u32,
    options_json: Option<&str>,
) -> Result<String, String> {
    Ok(match grid_for_payload(payload_json, now_minutes, options_json)? {
        Some(grid) => render_html(&grid),
        None => render_empty_html(policy_from_options(options_json)?.days.len() + 1),
    })
}

fn slots_json(start: &str, end: &str, step_minutes: i64) -> Result<String, String> {
    let slots = room_grid::generate_slots(start, end, step_minutes).map_err(|e| e.to_string())?;
    serde_json::to_string(&slots).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Parse `"hh:mm AM"` / `"hh:mm PM"` into minutes since midnight.
#[wasm_bindgen(js_name = "parseClock")]
pub fn parse_clock(clock: &str) -> Result<u32, JsValue> {
    room_grid::parse_clock(clock).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Format minutes since midnight as `"hh:mm AM"` / `"hh:mm PM"`.
#[wasm_bindgen(js_name = "formatClock")]
pub fn format_clock(minutes: u32) -> String {
    room_grid::format_clock(minutes)
}

/// Generate the slot rows for a display window.
///
/// Returns a JSON array of `{start, end, label}` objects, minutes since
/// midnight for `start`/`end`.
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(start: &str, end: &str, step_minutes: i64) -> Result<String, JsValue> {
    slots_json(start, end, step_minutes).map_err(|e| JsValue::from_str(&e))
}

/// Build the weekly grid for a room-schedule payload.
///
/// `payload_json` is the backend's `{regularSchedules, temporarySchedules}`
/// body. Temporary entries ending at or before `now_minutes` are dropped.
/// Returns the grid as JSON (`{slots, days, cells}`), or `null` when no entry
/// is left to show.
#[wasm_bindgen(js_name = "buildWeeklyGrid")]
pub fn build_weekly_grid(
    payload_json: &str,
    now_minutes: u32,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    weekly_grid_json(payload_json, now_minutes, options_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Render the weekly grid for a room-schedule payload as `<tr>` rows.
///
/// Same inputs as [`build_weekly_grid`]; an empty schedule renders a single
/// placeholder row.
#[wasm_bindgen(js_name = "renderWeeklyTable")]
pub fn render_weekly_table(
    payload_json: &str,
    now_minutes: u32,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    weekly_table_html(payload_json, now_minutes, options_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}
