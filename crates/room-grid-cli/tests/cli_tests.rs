//! Integration tests for the `kiosk-grid` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the slots, render,
//! rooms and watch subcommands through the actual binary, including stdin
//! piping, file I/O, config files and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn kiosk() -> Command {
    let mut cmd = Command::cargo_bin("kiosk-grid").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn render_json(args: &[&str]) -> serde_json::Value {
    let output = kiosk()
        .arg("render")
        .args(args)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "render failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// slots
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn slots_default_window() {
    let output = kiosk().arg("slots").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 27);
    assert_eq!(lines[0], "07:30 AM - 08:00 AM");
    assert_eq!(lines[26], "08:30 PM - 09:00 PM");
}

#[test]
fn slots_custom_window() {
    kiosk()
        .args(["slots", "--start", "08:00 AM", "--end", "10:00 AM", "--step", "60"])
        .assert()
        .success()
        .stdout("08:00 AM - 09:00 AM\n09:00 AM - 10:00 AM\n");
}

#[test]
fn slots_zero_step_fails() {
    kiosk()
        .args(["slots", "--step", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("step must be positive"));
}

#[test]
fn slots_negative_step_fails() {
    kiosk()
        .args(["slots", "--step", "-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("step must be positive"));
}

#[test]
fn slots_use_config_window() {
    kiosk()
        .args(["slots", "--config", &fixture("hourly.toml")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("08:00 AM - 09:00 AM\n"))
        .stdout(predicate::str::ends_with("11:00 AM - 12:00 PM\n"));
}

// ─────────────────────────────────────────────────────────────────────────────
// render
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn render_text_from_file() {
    kiosk()
        .args(["render", "-i", &fixture("schedule.json"), "--now", "07:00 AM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("09:00 AM - 10:00 AM  (2 slots)"))
        .stdout(predicate::str::contains("CS101 (A)"))
        .stdout(predicate::str::contains("Room Closed (N/A)"))
        .stdout(predicate::str::contains("01:00 PM - 02:30 PM  (3 slots)"))
        .stdout(predicate::str::contains("Board Exam"));
}

#[test]
fn render_drops_expired_temporary_entries() {
    kiosk()
        .args(["render", "-i", &fixture("schedule.json"), "--now", "01:00 PM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Board Exam").not())
        .stdout(predicate::str::contains("Room Closed").not())
        .stdout(predicate::str::contains("CS101 (A)"))
        .stdout(predicate::str::contains("MATH201 (B)"));
}

#[test]
fn render_logs_malformed_entry_and_continues() {
    kiosk()
        .args(["render", "-i", &fixture("schedule.json"), "--now", "07:00 AM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Broken").not())
        .stderr(predicate::str::contains("malformed time"));
}

#[test]
fn render_html_table_body() {
    kiosk()
        .args([
            "render",
            "-i",
            &fixture("schedule.json"),
            "--now",
            "07:00 AM",
            "--format",
            "html",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<tr><td>07:30 AM - 08:00 AM</td>"))
        .stdout(predicate::str::contains(r#"<td rowspan="2">"#))
        .stdout(predicate::str::contains(r#"<td rowspan="3">"#))
        .stdout(predicate::str::contains(r#"<span class="badge bg-danger">Overridden</span>"#));
}

#[test]
fn render_json_grid() {
    let json = render_json(&["-i", &fixture("schedule.json"), "--now", "07:00 AM"]);

    assert_eq!(json["panel"], "grid");
    assert_eq!(json["slots"].as_array().unwrap().len(), 27);
    assert_eq!(json["days"].as_array().unwrap().len(), 6);

    // 09:00 AM is row 3, Monday column 0.
    let cell = &json["cells"][3][0];
    assert_eq!(cell["state"], "occupied");
    assert_eq!(cell["span"], 2);
    assert_eq!(cell["entries"].as_array().unwrap().len(), 2);
    assert_eq!(cell["entries"][1]["kind"], "temporary");
    assert_eq!(json["cells"][4][0]["state"], "covered");
    assert_eq!(json["cells"][4][0]["owner"], 3);
}

#[test]
fn render_with_config_policy() {
    let json = render_json(&[
        "-i",
        &fixture("schedule.json"),
        "--now",
        "07:00 AM",
        "--config",
        &fixture("hourly.toml"),
    ]);

    assert_eq!(json["slots"].as_array().unwrap().len(), 4);
    assert_eq!(json["days"], serde_json::json!(["Monday", "Thursday"]));
    // Monday 09:00 hour holds CS101 and its override in a single-slot cell.
    let monday_nine = &json["cells"][1][0];
    assert_eq!(monday_nine["span"], 1);
    assert_eq!(monday_nine["entries"].as_array().unwrap().len(), 2);
    // Thursday's board exam fills the whole morning.
    assert_eq!(json["cells"][0][1]["span"], 4);
}

#[test]
fn render_from_stdin() {
    let input = r#"{"regularSchedules":[{"day":"tuesday","start_time":"10:00 AM","end_time":"11:00 AM","class_name":"PE"}]}"#;
    kiosk()
        .args(["render", "--now", "07:00 AM"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tuesday\n  10:00 AM - 11:00 AM  (2 slots)\n    PE (N/A)"));
}

#[test]
fn render_empty_schedule_shows_placeholder() {
    kiosk()
        .args(["render", "-i", &fixture("empty_schedule.json")])
        .assert()
        .success()
        .stdout("NO SCHEDULE AVAILABLE\n");

    let json = render_json(&["-i", &fixture("empty_schedule.json")]);
    assert_eq!(json, serde_json::json!({"panel": "empty"}));
}

#[test]
fn render_empty_schedule_html_is_table_row() {
    kiosk()
        .args(["render", "-i", &fixture("empty_schedule.json"), "--format", "html"])
        .assert()
        .success()
        .stdout(
            "<tr><td colspan=\"7\" class=\"text-center text-muted\">NO SCHEDULE AVAILABLE</td></tr>\n",
        );

    kiosk()
        .args([
            "render",
            "-i",
            &fixture("empty_schedule.json"),
            "--format",
            "html",
            "--config",
            &fixture("hourly.toml"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"colspan="3""#));
}

#[test]
fn render_to_file() {
    let output_path = std::env::temp_dir().join("kiosk-grid-render-test.html");
    let _ = std::fs::remove_file(&output_path);

    kiosk()
        .args([
            "render",
            "-i",
            &fixture("schedule.json"),
            "--now",
            "07:00 AM",
            "--format",
            "html",
            "-o",
            output_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert_eq!(content.lines().count(), 27);
    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn render_invalid_json_fails() {
    kiosk()
        .arg("render")
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode room schedule"));
}

#[test]
fn render_invalid_now_fails() {
    kiosk()
        .args(["render", "-i", &fixture("schedule.json"), "--now", "13:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --now time"));
}

#[test]
fn render_missing_file_fails() {
    kiosk()
        .args(["render", "-i", "/nonexistent/schedule.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// rooms
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn rooms_board_from_file() {
    let output = kiosk()
        .args(["rooms", "-i", &fixture("rooms.json")])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Room 301") && lines[0].ends_with("free"));
    assert!(lines[1].contains("Room 302") && lines[1].ends_with("occupied"));
    assert!(lines[2].contains("Computer Lab"));
}

#[test]
fn rooms_empty_list_shows_placeholder() {
    kiosk()
        .arg("rooms")
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("NO CLASSROOMS AVAILABLE\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// watch
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn watch_rooms_survives_unreachable_backend() {
    kiosk()
        .args(["watch", "--base-url", "http://127.0.0.1:9", "--cycles", "1"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("NO CLASSROOMS AVAILABLE"))
        .stderr(predicate::str::contains("room list fetch failed"));
}

#[test]
fn watch_schedule_keeps_panel_when_backend_unreachable() {
    kiosk()
        .args([
            "watch",
            "--room-id",
            "4",
            "--base-url",
            "http://127.0.0.1:9",
            "--cycles",
            "1",
        ])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("could not look up room name"))
        .stderr(predicate::str::contains("schedule fetch failed"));
}

#[test]
fn watch_rejects_invalid_base_url() {
    kiosk()
        .args(["watch", "--base-url", "not a url", "--cycles", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Misc
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    kiosk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("slots"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("rooms"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn bad_config_file_fails() {
    kiosk()
        .args(["slots", "--config", "/nonexistent/kiosk.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
