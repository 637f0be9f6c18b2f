//! Kiosk configuration file.
//!
//! Optional TOML file; every key has a default, and command-line flags
//! override whatever the file says.
//!
//! ```toml
//! base_url = "http://kiosk.local:8000"
//! schedule_poll_secs = 5
//!
//! [grid]
//! start = "07:30 AM"
//! end = "09:00 PM"
//! step_minutes = 30
//! days = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
//! merge = true
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use room_grid::{Day, GridPolicy};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KioskConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_poll_secs")]
    pub room_poll_secs: u64,
    #[serde(default = "default_poll_secs")]
    pub schedule_poll_secs: u64,
    #[serde(default = "default_hold_secs")]
    pub occupancy_hold_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub grid: GridSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSettings {
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_end")]
    pub end: String,
    #[serde(default = "default_step")]
    pub step_minutes: i64,
    #[serde(default = "default_days")]
    pub days: Vec<String>,
    #[serde(default = "default_merge")]
    pub merge: bool,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_poll_secs() -> u64 {
    5
}

fn default_hold_secs() -> u64 {
    300
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_start() -> String {
    "07:30 AM".to_string()
}

fn default_end() -> String {
    "09:00 PM".to_string()
}

fn default_step() -> i64 {
    30
}

fn default_days() -> Vec<String> {
    Day::TEACHING_WEEK.iter().map(|d| d.name().to_string()).collect()
}

fn default_merge() -> bool {
    true
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            step_minutes: default_step(),
            days: default_days(),
            merge: default_merge(),
        }
    }
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            room_poll_secs: default_poll_secs(),
            schedule_poll_secs: default_poll_secs(),
            occupancy_hold_secs: default_hold_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            grid: GridSettings::default(),
        }
    }
}

impl KioskConfig {
    /// Read the file at `path`, or defaults when no path is given.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path))?;
                Self::parse(&text)
                    .with_context(|| format!("Invalid config file: {}", Path::new(path).display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn room_poll(&self) -> Duration {
        Duration::from_secs(self.room_poll_secs.max(1))
    }

    pub fn schedule_poll(&self) -> Duration {
        Duration::from_secs(self.schedule_poll_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl GridSettings {
    /// Resolve clock strings and day names into a grid policy.
    pub fn policy(&self) -> Result<GridPolicy> {
        let days = self
            .days
            .iter()
            .map(|raw| Day::parse(raw).with_context(|| format!("Unknown day in [grid].days: '{}'", raw)))
            .collect::<Result<Vec<_>>>()?;
        let policy = GridPolicy::from_clocks(&self.start, &self.end, self.step_minutes)
            .context("Invalid [grid] window")?
            .with_days(days)
            .with_merge(self.merge);
        policy.slots().context("Invalid [grid] window")?;
        Ok(policy)
    }
}
