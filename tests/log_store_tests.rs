use mealtimelogger::errors::AppError;
use mealtimelogger::store::log::replace_file;
use mealtimelogger::store::{EndOutcome, LogStore, UndoOutcome};
use std::fs;
use std::path::Path;

mod common;
use common::{setup_test_log, ts, write_log};

#[test]
fn test_open_creates_log_with_header() {
    let log = setup_test_log("store_create");
    let store = LogStore::open(&log);

    assert!(Path::new(&log).exists());
    assert_eq!(fs::read_to_string(&log).unwrap(), "start_time,end_time\n");
    assert!(store.read_all().unwrap().is_empty());
}

#[test]
fn test_start_appends_exactly_one_record() {
    let log = setup_test_log("store_start");
    let store = LogStore::open(&log);

    for (i, t) in ["2025-06-01T08:00:00", "2025-06-01T12:30:00", "2025-06-01T19:00:00"]
        .iter()
        .enumerate()
    {
        store.append_start(ts(t)).unwrap();
        let all = store.read_all().unwrap();
        assert_eq!(all.len(), i + 1);
        assert_eq!(all.last().unwrap().start_time, ts(t));
        assert!(all.last().unwrap().in_progress());
    }
}

#[test]
fn test_end_sets_end_of_last_record_only() {
    let log = setup_test_log("store_end");
    let store = LogStore::open(&log);

    store.append_start(ts("2025-06-01T08:00:00")).unwrap();
    store.set_end(ts("2025-06-01T08:20:00")).unwrap();
    store.append_start(ts("2025-06-01T12:00:00")).unwrap();

    let ended = store.set_end(ts("2025-06-01T12:45:00")).unwrap();
    let EndOutcome::Ended(record) = ended else {
        panic!("expected an ended meal, got {ended:?}");
    };
    assert_eq!(record.end_time, Some(ts("2025-06-01T12:45:00")));

    let all = store.read_all().unwrap();
    assert_eq!(all[0].end_time, Some(ts("2025-06-01T08:20:00")));
    assert_eq!(all[1].end_time, Some(ts("2025-06-01T12:45:00")));
}

#[test]
fn test_end_overwrites_existing_end() {
    let log = setup_test_log("store_end_overwrite");
    let store = LogStore::open(&log);

    store.append_start(ts("2025-06-01T08:00:00")).unwrap();
    store.set_end(ts("2025-06-01T08:10:00")).unwrap();
    store.set_end(ts("2025-06-01T08:25:00")).unwrap();

    let all = store.read_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].end_time, Some(ts("2025-06-01T08:25:00")));
}

#[test]
fn test_end_on_empty_log_is_noop() {
    let log = setup_test_log("store_end_empty");
    let store = LogStore::open(&log);

    let out = store.set_end(ts("2025-06-01T08:10:00")).unwrap();
    assert_eq!(out, EndOutcome::Empty);
    assert!(store.read_all().unwrap().is_empty());
}

#[test]
fn test_start_then_undo_restores_count() {
    let log = setup_test_log("store_undo_start");
    let store = LogStore::open(&log);

    store.append_start(ts("2025-06-01T08:00:00")).unwrap();
    store.set_end(ts("2025-06-01T08:30:00")).unwrap();
    let before = store.read_all().unwrap();

    store.append_start(ts("2025-06-01T12:00:00")).unwrap();
    assert_eq!(store.undo_last().unwrap(), UndoOutcome::Removed);

    assert_eq!(store.read_all().unwrap(), before);
}

#[test]
fn test_end_then_undo_clears_end() {
    let log = setup_test_log("store_undo_end");
    let store = LogStore::open(&log);

    store.append_start(ts("2025-06-01T08:00:00")).unwrap();
    store.set_end(ts("2025-06-01T08:30:00")).unwrap();

    assert_eq!(store.undo_last().unwrap(), UndoOutcome::EndCleared);
    let all = store.read_all().unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].end_time.is_none());
}

#[test]
fn test_undo_on_empty_log_fails_without_mutation() {
    let log = setup_test_log("store_undo_empty");
    let store = LogStore::open(&log);
    let before = fs::read_to_string(&log).unwrap();

    let err = store.undo_last().unwrap_err();
    assert!(matches!(err, AppError::EmptyLog));
    assert_eq!(fs::read_to_string(&log).unwrap(), before);
}

#[test]
fn test_start_end_undo_undo_round_trip() {
    let log = setup_test_log("store_e2e");
    let store = LogStore::open(&log);

    store.append_start(ts("2025-06-01T08:00:00")).unwrap();
    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        "start_time,end_time\n2025-06-01T08:00:00,\n"
    );

    store.set_end(ts("2025-06-01T08:20:00")).unwrap();
    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        "start_time,end_time\n2025-06-01T08:00:00,2025-06-01T08:20:00\n"
    );

    store.undo_last().unwrap();
    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        "start_time,end_time\n2025-06-01T08:00:00,\n"
    );

    store.undo_last().unwrap();
    assert!(store.read_all().unwrap().is_empty());
    assert!(matches!(store.undo_last(), Err(AppError::EmptyLog)));
}

#[test]
fn test_read_tolerates_malformed_rows() {
    let log = setup_test_log("store_malformed");
    write_log(
        &log,
        &[
            ("2025-06-01T08:00:00", "not-a-time"),
            ("", "2025-06-01T09:00:00"),
            ("garbage", ""),
            ("2025-06-01T12:00:00", "2025-06-01T12:30:00"),
        ],
    );
    // Row with a single field (no trailing comma).
    fs::write(
        &log,
        fs::read_to_string(&log).unwrap() + "2025-06-01 19:00:00\n",
    )
    .unwrap();

    let store = LogStore::open(&log);
    let all = store.read_all().unwrap();

    assert_eq!(all.len(), 3);
    assert_eq!(all[0].start_time, ts("2025-06-01T08:00:00"));
    assert!(all[0].end_time.is_none());
    assert_eq!(all[1].end_time, Some(ts("2025-06-01T12:30:00")));
    assert_eq!(all[2].start_time, ts("2025-06-01T19:00:00"));
    assert!(all[2].in_progress());
}

#[test]
fn test_newest_first_is_reverse_of_storage_order() {
    let log = setup_test_log("store_order");
    write_log(
        &log,
        &[
            ("2025-06-01T08:00:00", "2025-06-01T08:20:00"),
            ("2025-06-01T12:00:00", ""),
        ],
    );

    let store = LogStore::open(&log);
    let newest = store.read_newest_first().unwrap();
    assert_eq!(newest[0].start_time, ts("2025-06-01T12:00:00"));
    assert_eq!(newest[1].start_time, ts("2025-06-01T08:00:00"));
}

#[test]
fn test_mutation_on_unwritable_location_reports_io_error() {
    let mut dir = std::env::temp_dir();
    dir.push("mealtimelogger_missing_dir_for_test");
    fs::remove_dir_all(&dir).ok();
    let log = dir.join("log.csv");

    // Parent directory does not exist: creation fails quietly, mutation fails loudly.
    let store = LogStore::open(&log);
    assert!(store.read_all().unwrap().is_empty());

    let err = store.append_start(ts("2025-06-01T08:00:00")).unwrap_err();
    assert!(matches!(err, AppError::Io(_)));
}

/// A log whose middle and last rows are not readable by the parser.
fn write_messy_log(log: &str) -> String {
    let content = "start_time,end_time\n\
                   2025-06-01T08:00:00,2025-06-01 08:20\n\
                   2025/06/01 12:00,2025/06/01 12:30\n\
                   2025-06-01T18:00:00,2025-06-01T18:40:00\n";
    fs::write(log, content).unwrap();
    content.to_string()
}

#[test]
fn test_start_keeps_unreadable_rows_verbatim() {
    let log = setup_test_log("store_messy_start");
    let before = write_messy_log(&log);
    let store = LogStore::open(&log);

    store.append_start(ts("2025-06-02T07:00:00")).unwrap();

    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        format!("{before}2025-06-02T07:00:00,\n")
    );
}

#[test]
fn test_end_and_undo_touch_only_the_last_line() {
    let log = setup_test_log("store_messy_end");
    let before = write_messy_log(&log);
    let store = LogStore::open(&log);
    let earlier = before.rsplitn(3, '\n').nth(2).unwrap().to_string() + "\n";

    store.set_end(ts("2025-06-01T18:50:00")).unwrap();
    let content = fs::read_to_string(&log).unwrap();
    assert!(content.starts_with(&earlier));
    assert!(content.ends_with("2025-06-01T18:00:00,2025-06-01T18:50:00\n"));

    assert_eq!(store.undo_last().unwrap(), UndoOutcome::EndCleared);
    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        format!("{earlier}2025-06-01T18:00:00,\n")
    );

    assert_eq!(store.undo_last().unwrap(), UndoOutcome::Removed);
    assert_eq!(fs::read_to_string(&log).unwrap(), earlier);
}

#[test]
fn test_undo_on_unreadable_last_row_removes_only_that_row() {
    let log = setup_test_log("store_messy_undo");
    write_log(
        &log,
        &[
            ("2025-06-01T08:00:00", "2025-06-01T08:20:00"),
            ("2025/06/01 12:00", ""),
        ],
    );
    let store = LogStore::open(&log);

    assert_eq!(store.undo_last().unwrap(), UndoOutcome::Removed);
    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        "start_time,end_time\n2025-06-01T08:00:00,2025-06-01T08:20:00\n"
    );
}

#[test]
fn test_end_on_unreadable_last_row_amends_that_row() {
    let log = setup_test_log("store_messy_end_last");
    write_log(
        &log,
        &[
            ("2025-06-01T08:00:00", "2025-06-01T08:20:00"),
            ("2025/06/01 12:00", ""),
        ],
    );
    let store = LogStore::open(&log);

    let out = store.set_end(ts("2025-06-01T12:30:00")).unwrap();
    assert_eq!(out, EndOutcome::EndedUnreadable);
    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        "start_time,end_time\n\
         2025-06-01T08:00:00,2025-06-01T08:20:00\n\
         2025/06/01 12:00,2025-06-01T12:30:00\n"
    );
    // The completed meal before it is untouched.
    let all = store.read_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].end_time, Some(ts("2025-06-01T08:20:00")));
}

#[test]
fn test_replace_file_cleans_temp_file_on_failure() {
    let mut target = std::env::temp_dir();
    target.push("mealtimelogger_replace_target_dir");
    fs::remove_dir_all(&target).ok();
    fs::create_dir_all(target.join("occupied")).unwrap();

    // Renaming a file over a non-empty directory fails.
    assert!(replace_file(&target, "start_time,end_time\n").is_err());

    let mut tmp = target.as_os_str().to_os_string();
    tmp.push(".tmp");
    assert!(!Path::new(&tmp).exists());
    fs::remove_dir_all(&target).ok();
}
