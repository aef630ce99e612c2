//! Integration tests for the agenda CLI
//!
//! Runs the real binary against small event files.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a CLI command
fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_agenda"))
}

const EVENTS: &str = r#"[
  {"id": "a", "title": "Algebra", "date": "2026-03-16", "time": "09:00", "duration": 60},
  {"id": "b", "title": "Biology", "date": "2026-03-16", "time": "09:30", "duration": 30},
  {"id": "c", "title": "Chemistry", "date": "2026-03-16", "time": "11:00", "duration": 30},
  {"id": "d", "title": "Drawing", "date": "2026-03-17", "time": "10:00", "duration": 45},
  {"id": "e", "title": "English", "date": "2026-03-15", "time": "08:00", "duration": 50}
]"#;

/// Write `EVENTS` into a temp dir and return its path
fn events_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("events.json");
    fs::write(&path, EVENTS).unwrap();
    path
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout is JSON")
}

// ============ LAYOUT COMMAND TESTS ============

#[test]
fn test_layout_help() {
    cli()
        .arg("layout")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lay out one day"));
}

#[test]
fn test_layout_packs_overlaps_into_columns() {
    let dir = TempDir::new().unwrap();
    let output = cli()
        .arg("layout")
        .arg(events_file(&dir))
        .args(["--date", "2026-03-16"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let layout = stdout_json(&output.stdout);
    assert_eq!(layout["canvasHeight"], 1920.0);
    let items = layout["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);

    assert_eq!(items[0]["id"], "a");
    assert_eq!(items[0]["rect"]["left"], 0.0);
    assert_eq!(items[0]["rect"]["width"], 50.0);
    assert_eq!(items[1]["id"], "b");
    assert_eq!(items[1]["rect"]["left"], 50.0);
    assert_eq!(items[2]["id"], "c");
    assert_eq!(items[2]["rect"]["width"], 100.0);
}

#[test]
fn test_layout_empty_day() {
    let dir = TempDir::new().unwrap();
    let output = cli()
        .arg("layout")
        .arg(events_file(&dir))
        .args(["--date", "2026-04-01"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output.stdout)["items"].as_array().unwrap().len(), 0);
}

#[test]
fn test_layout_reads_stdin() {
    cli()
        .args(["layout", "-", "--date", "2026-03-17"])
        .write_stdin(EVENTS)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Drawing\""));
}

#[test]
fn test_layout_rejects_bad_date() {
    let dir = TempDir::new().unwrap();
    cli()
        .arg("layout")
        .arg(events_file(&dir))
        .args(["--date", "16/03/2026"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_layout_missing_file() {
    cli()
        .args(["layout", "/nonexistent/events.json", "--date", "2026-03-16"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read events"));
}

#[test]
fn test_layout_honours_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("agenda.toml");
    fs::write(&config, "[timeline]\npixels_per_hour = 60.0\n").unwrap();

    let output = cli()
        .arg("--config")
        .arg(&config)
        .arg("layout")
        .arg(events_file(&dir))
        .args(["--date", "2026-03-16"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let layout = stdout_json(&output.stdout);
    assert_eq!(layout["canvasHeight"], 1440.0);
    assert_eq!(layout["items"][0]["rect"]["top"], 540.0);
}

// ============ WEEK COMMAND TESTS ============

#[test]
fn test_week_monday_start() {
    let dir = TempDir::new().unwrap();
    let output = cli()
        .arg("week")
        .arg(events_file(&dir))
        .args(["--date", "2026-03-18"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let week = stdout_json(&output.stdout);
    let days = week["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "2026-03-16");
    assert_eq!(days[0]["items"].as_array().unwrap().len(), 3);
    assert_eq!(days[1]["items"].as_array().unwrap().len(), 1);
}

#[test]
fn test_week_sunday_start() {
    let dir = TempDir::new().unwrap();
    let output = cli()
        .arg("week")
        .arg(events_file(&dir))
        .args(["--date", "2026-03-18", "--week-start", "sunday"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let week = stdout_json(&output.stdout);
    assert_eq!(week["weekStart"], "sunday");
    assert_eq!(week["days"][0]["date"], "2026-03-15");
    assert_eq!(week["days"][0]["items"][0]["id"], "e");
}

#[test]
fn test_week_rejects_unknown_start() {
    let dir = TempDir::new().unwrap();
    cli()
        .arg("week")
        .arg(events_file(&dir))
        .args(["--date", "2026-03-18", "--week-start", "friday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown week start"));
}

// ============ LIST COMMAND TESTS ============

#[test]
fn test_list_groups_and_labels() {
    let dir = TempDir::new().unwrap();
    let output = cli()
        .arg("list")
        .arg(events_file(&dir))
        .args(["--today", "2026-03-16"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let days = stdout_json(&output.stdout);
    let days = days.as_array().unwrap();
    let summary: Vec<(&str, &str, usize)> = days
        .iter()
        .map(|d| {
            (
                d["date"].as_str().unwrap(),
                d["label"].as_str().unwrap(),
                d["events"].as_array().unwrap().len(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        [
            ("2026-03-15", "Yesterday", 1),
            ("2026-03-16", "Today", 3),
            ("2026-03-17", "Tomorrow", 1),
        ]
    );
}

#[test]
fn test_list_from_date() {
    let dir = TempDir::new().unwrap();
    let output = cli()
        .arg("list")
        .arg(events_file(&dir))
        .args(["--from", "2026-03-17", "--today", "2026-03-01"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let days = stdout_json(&output.stdout);
    assert_eq!(days.as_array().unwrap().len(), 1);
    assert_eq!(days[0]["label"], "Tue, Mar 17");
}

// ============ CONFLICTS COMMAND TESTS ============

#[test]
fn test_conflicts_reports_overlap() {
    let dir = TempDir::new().unwrap();
    let output = cli()
        .arg("conflicts")
        .arg(events_file(&dir))
        .args(["--date", "2026-03-16"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let conflicts = stdout_json(&output.stdout);
    let conflicts = conflicts.as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["firstId"], "a");
    assert_eq!(conflicts[0]["secondId"], "b");
    assert_eq!(conflicts[0]["overlapStart"], "09:30");
    assert_eq!(conflicts[0]["overlapMinutes"], 30);
}

#[test]
fn test_conflicts_none_on_quiet_day() {
    let dir = TempDir::new().unwrap();
    cli()
        .arg("conflicts")
        .arg(events_file(&dir))
        .args(["--date", "2026-03-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

// ============ NOW COMMAND TESTS ============

#[test]
fn test_now_in_timezone() {
    let output = cli()
        .args(["now", "--timezone", "America/Sao_Paulo", "--at", "2026-03-15T14:00:00Z"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let position = stdout_json(&output.stdout);
    assert_eq!(position["minutes"], 660);
    assert_eq!(position["top"], 880.0);
    assert_eq!(position["fallback"], false);
}

#[test]
fn test_now_defaults_to_config_timezone() {
    let output = cli()
        .args(["now", "--at", "2026-03-15T14:00:00Z"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let position = stdout_json(&output.stdout);
    assert_eq!(position["timezone"], "America/Sao_Paulo");
    assert_eq!(position["minutes"], 660);
}

#[test]
fn test_now_invalid_zone_falls_back() {
    let output = cli()
        .args(["now", "--timezone", "Invalid/Zone", "--at", "2026-03-15T14:00:00Z"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let position = stdout_json(&output.stdout);
    assert_eq!(position["fallback"], true);
    assert!(position["minutes"].as_u64().unwrap() < 1440);
    assert!(String::from_utf8_lossy(&output.stderr).contains("timezone resolution failed"));
}

#[test]
fn test_now_quiet_silences_fallback_warning() {
    cli()
        .args(["-qq", "now", "--timezone", "Invalid/Zone", "--at", "2026-03-15T14:00:00Z"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_now_rejects_bad_instant() {
    cli()
        .args(["now", "--at", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --at instant"));
}

// ============ VALIDATE COMMAND TESTS ============

#[test]
fn test_validate_accepts_and_assigns_id() {
    let output = cli()
        .args([
            "validate", "--title", "  Physics  ", "--date", "2026-03-16", "--time", "14:00",
            "--duration", "90",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let event = stdout_json(&output.stdout);
    assert_eq!(event["title"], "Physics");
    assert_eq!(event["duration"], 90);
    assert!(!event["id"].as_str().unwrap().is_empty());
}

#[test]
fn test_validate_rejects_negative_duration() {
    cli()
        .args([
            "validate", "--title", "Physics", "--date", "2026-03-16", "--time", "14:00",
            "--duration", "-5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn test_validate_rejects_bad_time() {
    cli()
        .args([
            "validate", "--title", "Physics", "--date", "2026-03-16", "--time", "2pm",
            "--duration", "60",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time"));
}

#[test]
fn test_validate_rejects_blank_title() {
    cli()
        .args([
            "validate", "--title", "   ", "--date", "2026-03-16", "--time", "14:00",
            "--duration", "60",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid title"));
}
