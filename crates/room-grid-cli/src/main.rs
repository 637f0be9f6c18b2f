//! `kiosk-grid` CLI: render weekly room schedules and poll the kiosk backend.
//!
//! ## Usage
//!
//! ```sh
//! # Slot labels for the default 07:30 AM – 09:00 PM window
//! kiosk-grid slots
//!
//! # Render a saved room-schedule payload as the kiosk's HTML table body
//! kiosk-grid render -i schedule.json --format html --now "01:00 PM"
//!
//! # Same payload piped in, rendered for the terminal
//! curl -s http://kiosk.local/api/room-schedule/4/ | kiosk-grid render
//!
//! # Room board from a saved room list
//! kiosk-grid rooms -i rooms.json
//!
//! # Poll one room's schedule every few seconds until Ctrl-C
//! kiosk-grid watch --room-id 4 --base-url http://kiosk.local
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=room_grid=debug`) to
//! change the level.

mod config;
mod fetch;
mod poll;

use std::io::{self, Read};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use room_grid::clock::now_minutes;
use room_grid::render::{
    render_empty_html, render_html, render_rooms_text, render_text, NO_SCHEDULE_PLACEHOLDER,
};
use room_grid::{
    generate_slots, parse_clock, ApplyOutcome, GridPolicy, OccupancyBoard, Panel, RoomList,
    RoomSchedule, ScheduleView,
};
use tokio::sync::{mpsc, Mutex};
use tracing_subscriber::EnvFilter;

use crate::config::KioskConfig;
use crate::fetch::ApiClient;
use crate::poll::spawn_poll;

#[derive(Parser)]
#[command(
    name = "kiosk-grid",
    version,
    about = "Weekly classroom schedule grid for information kiosks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the time-slot labels of the grid window
    Slots {
        /// First slot start, e.g. "07:30 AM"
        #[arg(long)]
        start: Option<String>,
        /// No slot starts at or after this time, e.g. "09:00 PM"
        #[arg(long)]
        end: Option<String>,
        /// Slot width in minutes
        #[arg(long, allow_negative_numbers = true)]
        step: Option<i64>,
    },
    /// Render a room-schedule payload ({regularSchedules, temporarySchedules})
    Render {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Current time of day for expiring temporary entries (defaults to now)
        #[arg(long)]
        now: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the room board for a room-list payload ({rooms: [...]})
    Rooms {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Poll the backend and re-render on every cycle until Ctrl-C
    Watch {
        /// Poll this room's schedule; polls the room list when omitted
        #[arg(long)]
        room_id: Option<u64>,
        /// Backend base URL (overrides the config file)
        #[arg(long)]
        base_url: Option<String>,
        /// Stop after this many poll cycles
        #[arg(long)]
        cycles: Option<u64>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Html,
    Json,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = KioskConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Slots { start, end, step } => {
            let start = start.unwrap_or_else(|| config.grid.start.clone());
            let end = end.unwrap_or_else(|| config.grid.end.clone());
            let step = step.unwrap_or(config.grid.step_minutes);
            let slots = generate_slots(&start, &end, step).context("Failed to generate slots")?;
            for slot in slots {
                println!("{}", slot.label);
            }
        }
        Commands::Render {
            input,
            output,
            now,
            format,
        } => {
            let json = read_input(input.as_deref())?;
            let schedule =
                RoomSchedule::from_json(&json).context("Failed to decode room schedule")?;
            let now = match now {
                Some(clock) => parse_clock(&clock).context("Invalid --now time")?,
                None => now_minutes(),
            };

            let mut view = ScheduleView::open(0, "input", config.grid.policy()?);
            let ticket = view.begin_fetch();
            view.apply(ticket, Ok(schedule), now)
                .context("Failed to build schedule grid")?;

            write_output(output.as_deref(), &render_panel(&view, format)?)?;
        }
        Commands::Rooms { input } => {
            let json = read_input(input.as_deref())?;
            let rooms = RoomList::from_json(&json).context("Failed to decode room list")?;
            let mut board = OccupancyBoard::new(hold_window(&config)?);
            board.apply(&rooms, Utc::now());
            print!("{}", render_rooms_text(&board));
        }
        Commands::Watch {
            room_id,
            base_url,
            cycles,
            format,
        } => {
            let base_url = base_url.unwrap_or_else(|| config.base_url.clone());
            let api = ApiClient::new(&base_url, config.request_timeout())?;
            match room_id {
                Some(room_id) => watch_schedule(&config, api, room_id, cycles, format).await?,
                None => watch_rooms(&config, api, cycles).await?,
            }
        }
    }

    Ok(())
}

fn hold_window(config: &KioskConfig) -> Result<chrono::Duration> {
    let secs = i64::try_from(config.occupancy_hold_secs).context("occupancy_hold_secs is too large")?;
    Ok(chrono::Duration::seconds(secs))
}

fn render_panel(view: &ScheduleView, format: Format) -> Result<String> {
    if format == Format::Json {
        let mut json = serde_json::to_string_pretty(view.panel())?;
        json.push('\n');
        return Ok(json);
    }
    Ok(match (view.panel(), format) {
        (Panel::Grid(grid), Format::Html) => render_html(grid),
        (Panel::Grid(grid), _) => render_text(grid),
        (Panel::Empty, Format::Html) => render_empty_html(view.policy().days.len() + 1),
        (Panel::Empty, _) => format!("{}\n", NO_SCHEDULE_PLACEHOLDER),
        (Panel::Loading, _) => "Loading...\n".to_string(),
    })
}

/// Wait for Ctrl-C, or for `cycles` completed poll cycles when given.
async fn wait_for_end(mut done: mpsc::UnboundedReceiver<()>, cycles: Option<u64>) -> Result<()> {
    let Some(limit) = cycles else {
        tokio::signal::ctrl_c().await.context("Failed to listen for Ctrl-C")?;
        return Ok(());
    };
    let mut seen = 0;
    while seen < limit {
        tokio::select! {
            cycle = done.recv() => match cycle {
                Some(()) => seen += 1,
                None => break,
            },
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                break;
            }
        }
    }
    Ok(())
}

async fn watch_schedule(
    config: &KioskConfig,
    api: ApiClient,
    room_id: u64,
    cycles: Option<u64>,
    format: Format,
) -> Result<()> {
    let room_name = match api.rooms().await {
        Ok(list) => list.rooms.into_iter().find(|r| r.id == room_id).map(|r| r.name),
        Err(e) => {
            tracing::warn!(error = %e, "could not look up room name");
            None
        }
    }
    .unwrap_or_else(|| format!("Room {}", room_id));

    let policy: GridPolicy = config.grid.policy()?;
    let view = Arc::new(Mutex::new(ScheduleView::open(room_id, room_name, policy)));
    tracing::info!(room = room_id, period = ?config.schedule_poll(), "watching room schedule");

    let (done_tx, done_rx) = mpsc::unbounded_channel();
    let handle = spawn_poll(config.schedule_poll(), move || {
        let api = api.clone();
        let view = Arc::clone(&view);
        let done_tx = done_tx.clone();
        async move {
            let ticket = view.lock().await.begin_fetch();
            let result = api.room_schedule(room_id).await;

            let mut view = view.lock().await;
            match view.apply(ticket, result, now_minutes()) {
                Ok(ApplyOutcome::Rendered | ApplyOutcome::Empty) => {
                    match render_panel(&view, format) {
                        Ok(out) => print!("{}\n{}", view.title(), out),
                        Err(e) => tracing::error!(error = %e, "failed to render panel"),
                    }
                }
                Ok(ApplyOutcome::Retained | ApplyOutcome::Stale) => {}
                Err(e) => tracing::error!(error = %e, "failed to build schedule grid"),
            }
            let _ = done_tx.send(());
        }
    });

    wait_for_end(done_rx, cycles).await?;
    handle.stop().await;
    Ok(())
}

async fn watch_rooms(config: &KioskConfig, api: ApiClient, cycles: Option<u64>) -> Result<()> {
    let board = Arc::new(Mutex::new(OccupancyBoard::new(hold_window(config)?)));
    tracing::info!(period = ?config.room_poll(), "watching room list");

    let (done_tx, done_rx) = mpsc::unbounded_channel();
    let handle = spawn_poll(config.room_poll(), move || {
        let api = api.clone();
        let board = Arc::clone(&board);
        let done_tx = done_tx.clone();
        async move {
            let result = api.rooms().await;
            let mut board = board.lock().await;
            match result {
                Ok(list) => board.apply(&list, Utc::now()),
                Err(e) => tracing::error!(error = %e, "room list fetch failed; keeping previous board"),
            }
            board.tick(Utc::now());
            print!("{}", render_rooms_text(&board));
            let _ = done_tx.send(());
        }
    });

    wait_for_end(done_rx, cycles).await?;
    handle.stop().await;
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
