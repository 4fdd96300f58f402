use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{mtl, setup_test_log, write_log};

#[test]
fn test_init_creates_log() {
    let log = setup_test_log("cli_init");

    mtl()
        .args(["--log", &log, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Meal log ready"));

    assert_eq!(fs::read_to_string(&log).unwrap(), "start_time,end_time\n");
}

#[test]
fn test_start_end_undo_cycle() {
    let log = setup_test_log("cli_cycle");

    mtl()
        .args(["--log", &log, "start"])
        .assert()
        .success()
        .stdout(contains("Meal started at"));

    let content = fs::read_to_string(&log).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.lines().nth(1).unwrap().ends_with(','));

    mtl()
        .args(["--log", &log, "end"])
        .assert()
        .success()
        .stdout(contains("Meal ended at"));

    let content = fs::read_to_string(&log).unwrap();
    assert!(!content.lines().nth(1).unwrap().ends_with(','));

    mtl()
        .args(["--log", &log, "undo"])
        .assert()
        .success()
        .stdout(contains("in progress again"));

    mtl()
        .args(["--log", &log, "undo"])
        .assert()
        .success()
        .stdout(contains("Last meal removed"));

    mtl()
        .args(["--log", &log, "undo"])
        .assert()
        .failure()
        .stderr(contains("No log entry to undo"));

    assert_eq!(fs::read_to_string(&log).unwrap(), "start_time,end_time\n");
}

#[test]
fn test_end_on_empty_log_is_not_an_error() {
    let log = setup_test_log("cli_end_empty");

    mtl()
        .args(["--log", &log, "end"])
        .assert()
        .success()
        .stdout(contains("No meal to end"));
}

#[test]
fn test_list_shows_history_newest_first() {
    let log = setup_test_log("cli_list");
    write_log(
        &log,
        &[
            ("2025-06-01T08:00:00", "2025-06-01T08:20:00"),
            ("2025-06-01T12:00:00", "2025-06-01T12:45:00"),
            ("2025-06-02T07:30:00", ""),
        ],
    );

    let out = mtl().args(["--log", &log, "list"]).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);

    let newest = stdout.find("06/02 07:30:00").expect("newest row");
    let oldest = stdout.find("06/01 08:00:00").expect("oldest row");
    assert!(newest < oldest);
    assert!(stdout.contains("00:45:00"));
    assert!(stdout.contains("19:30:00"));
    assert!(stdout.contains("--:--:--"));
    assert!(stdout.contains("first"));
}

#[test]
fn test_list_limit() {
    let log = setup_test_log("cli_list_limit");
    write_log(
        &log,
        &[
            ("2025-06-01T08:00:00", "2025-06-01T08:20:00"),
            ("2025-06-01T12:00:00", "2025-06-01T12:45:00"),
        ],
    );

    mtl()
        .args(["--log", &log, "list", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("06/01 12:00:00"))
        .stdout(contains("04:00:00"))
        .stdout(contains("06/01 08:00:00").not());
}

#[test]
fn test_stats_output() {
    let log = setup_test_log("cli_stats");
    write_log(
        &log,
        &[
            ("2025-06-01T08:00:00", "2025-06-01T08:20:00"),
            ("2025-06-01T12:00:00", "2025-06-01T12:40:00"),
            ("2025-06-01T19:00:00", ""),
        ],
    );

    mtl()
        .args(["--log", &log, "stats"])
        .assert()
        .success()
        .stdout(contains("05:30:00"))
        .stdout(contains("00:30:00"));
}

#[test]
fn test_status_empty_and_in_progress() {
    let log = setup_test_log("cli_status");

    mtl()
        .args(["--log", &log, "status"])
        .assert()
        .success()
        .stdout(contains("No meals recorded yet."));

    mtl().args(["--log", &log, "start"]).assert().success();

    mtl()
        .args(["--log", &log, "status"])
        .assert()
        .success()
        .stdout(contains("Eating for"));
}

#[test]
fn test_backup_list_after_mutations() {
    let log = setup_test_log("cli_backup_list");

    mtl().args(["--log", &log, "start"]).assert().success();
    mtl().args(["--log", &log, "end"]).assert().success();

    mtl()
        .args(["--log", &log, "backup", "--list"])
        .assert()
        .success()
        .stdout(contains(".bak1"))
        .stdout(contains(".bak2"))
        .stdout(contains(".bak3").not());
}
