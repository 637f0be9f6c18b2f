//! HTML and plain-text rendering of grids and room boards.
//!
//! The HTML output is a `<tbody>` fragment the kiosk page drops into its
//! schedule table: a time-label column, one `<td rowspan>` per merge run, no
//! cell at all for covered positions, and a `No Schedule` placeholder for
//! empty ones. A grid with nothing occupied renders as a single placeholder
//! row, the same row shown when a room has no schedule at all.

use crate::clock::format_clock;
use crate::grid::{Cell, Grid};
use crate::occupancy::OccupancyBoard;
use crate::schedule::ScheduleEntry;

/// Shown instead of a grid when a room has nothing scheduled.
pub const NO_SCHEDULE_PLACEHOLDER: &str = "NO SCHEDULE AVAILABLE";
/// Shown instead of the room board when the backend lists no rooms.
pub const NO_ROOMS_PLACEHOLDER: &str = "NO CLASSROOMS AVAILABLE";

const NOT_AVAILABLE: &str = "N/A";
const NO_PROFESSOR: &str = "No Professor Assigned";

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

fn entry_block(out: &mut String, entry: &ScheduleEntry) {
    let (class, label) = if entry.is_temporary() {
        ("temporary-schedule", r#" <span class="text-danger">(Temporary)</span>"#)
    } else {
        ("regular-schedule", "")
    };
    let overridden = if entry.overridden {
        r#"<span class="badge bg-danger">Overridden</span>"#
    } else {
        ""
    };
    out.push_str(&format!(
        r#"<div class="text-center {class} p-2 mb-2"><strong>{name} ({section})</strong><br>{start} - {end}<br>{professor}<br>{overridden}{label}</div>"#,
        name = escape_html(or_placeholder(&entry.class_name, NOT_AVAILABLE)),
        section = escape_html(or_placeholder(&entry.section, NOT_AVAILABLE)),
        start = escape_html(entry.start_time.trim()),
        end = escape_html(entry.end_time.trim()),
        professor = escape_html(or_placeholder(&entry.professor, NO_PROFESSOR)),
    ));
}

/// Placeholder `<tr>` spanning `columns` table columns (time label included).
pub fn render_empty_html(columns: usize) -> String {
    format!(
        "<tr><td colspan=\"{}\" class=\"text-center text-muted\">{}</td></tr>\n",
        columns.max(1),
        NO_SCHEDULE_PLACEHOLDER
    )
}

/// Render the grid as `<tr>` rows for the schedule table body.
///
/// A blank grid renders as [`render_empty_html`] across all its columns.
pub fn render_html(grid: &Grid) -> String {
    if grid.is_blank() {
        return render_empty_html(grid.days().len() + 1);
    }

    let mut out = String::new();
    for (slot, cells) in grid.rows() {
        out.push_str(&format!("<tr><td>{}</td>", escape_html(&slot.label)));
        for cell in cells {
            match cell {
                Cell::Empty => out.push_str(r#"<td><span class="text-muted">No Schedule</span></td>"#),
                Cell::Occupied { entries, span } => {
                    out.push_str(&format!(r#"<td rowspan="{}">"#, span));
                    for entry in entries {
                        entry_block(&mut out, entry);
                    }
                    out.push_str("</td>");
                }
                Cell::Covered { .. } => {}
            }
        }
        out.push_str("</tr>\n");
    }
    out
}

fn entry_line(entry: &ScheduleEntry) -> String {
    let mut line = format!(
        "{} ({})  {} - {}  {}",
        or_placeholder(&entry.class_name, NOT_AVAILABLE),
        or_placeholder(&entry.section, NOT_AVAILABLE),
        entry.start_time.trim(),
        entry.end_time.trim(),
        or_placeholder(&entry.professor, NO_PROFESSOR),
    );
    if entry.is_temporary() {
        line.push_str("  [temporary]");
    }
    if entry.overridden {
        line.push_str("  [overridden]");
    }
    line
}

/// Render the grid as a per-day listing of merge runs.
pub fn render_text(grid: &Grid) -> String {
    if grid.is_blank() {
        return format!("{}\n", NO_SCHEDULE_PLACEHOLDER);
    }

    let mut out = String::new();
    for (col, day) in grid.days().iter().enumerate() {
        out.push_str(&format!("{}\n", day));
        let mut any = false;
        for (row, d, entries, span) in grid.occupied() {
            if d != col {
                continue;
            }
            any = true;
            let start = grid.slots()[row].start;
            let end = grid.slots()[row + span - 1].end;
            out.push_str(&format!(
                "  {} - {}  ({} slot{})\n",
                format_clock(start),
                format_clock(end),
                span,
                if span == 1 { "" } else { "s" }
            ));
            for entry in entries {
                out.push_str(&format!("    {}\n", entry_line(entry)));
            }
        }
        if !any {
            out.push_str("  No Schedule\n");
        }
    }
    out
}

/// Render the room board, one room per line.
pub fn render_rooms_text(board: &OccupancyBoard) -> String {
    if board.is_empty() {
        return format!("{}\n", NO_ROOMS_PLACEHOLDER);
    }
    let mut out = String::new();
    for room in board.rooms() {
        let state = if room.occupied { "occupied" } else { "free" };
        out.push_str(&format!("{:>6}  {:<24} {}\n", room.id, room.name, state));
    }
    out
}
