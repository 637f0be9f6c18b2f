//! 12-hour clock strings ↔ minute of day.
//!
//! The backend and the kiosk UI both speak `hh:mm AM` / `hh:mm PM`. Internally
//! every time of day is a `u32` count of minutes since midnight, which makes
//! overlap checks plain integer comparisons.

use crate::error::{GridError, Result};
use chrono::{Local, NaiveTime, Timelike};

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse a 12-hour clock string into minutes since midnight.
///
/// Accepts one or two hour digits, two minute digits, an optional single
/// space, then `AM` or `PM`: `"7:30 AM"`, `"07:30AM"`, `"12:00 PM"`.
/// Surrounding whitespace is ignored.
///
/// `12:xx AM` is just after midnight and `12:xx PM` is just after noon. Any
/// other hour maps to `hour % 12`, so `"00:15 AM"` is 15 and `"13:00 PM"` is
/// 13:00. Minutes are added as written.
///
/// # Errors
/// Returns `GridError::Format` if the string does not have that shape.
pub fn parse_clock(s: &str) -> Result<u32> {
    let invalid = || GridError::Format(s.to_string());
    let text = s.trim();

    let (hours, rest) = text.split_once(':').ok_or_else(invalid)?;
    if hours.is_empty() || hours.len() > 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    if rest.len() < 4 || !rest.is_char_boundary(2) {
        return Err(invalid());
    }
    let (minutes, period) = rest.split_at(2);
    if !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    // At most one whitespace character between the minutes and the period.
    let period = match period.strip_prefix(char::is_whitespace) {
        Some(p) => p,
        None => period,
    };
    let pm = match period {
        "AM" => false,
        "PM" => true,
        _ => return Err(invalid()),
    };

    let hour: u32 = hours.parse().map_err(|_| invalid())?;
    let minute: u32 = minutes.parse().map_err(|_| invalid())?;

    let mut total = (hour % 12) * 60 + minute;
    if pm {
        total += 12 * 60;
    }
    Ok(total)
}

/// Format minutes since midnight as a zero-padded 12-hour clock string.
///
/// Values at or past midnight wrap, so a slot ending at 24:00 is labelled
/// `"12:00 AM"`.
pub fn format_clock(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    let hour24 = minutes / 60;
    let minute = minutes % 60;
    let period = if hour24 < 12 { "AM" } else { "PM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{:02}:{:02} {}", hour12, minute, period)
}

/// Minute of day for a wall-clock time, ignoring seconds.
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Current local minute of day.
pub fn now_minutes() -> u32 {
    minutes_of_day(Local::now().time())
}
