#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use mealtimelogger::core::backup::{BACKUP_DEPTH, backup_path};
use mealtimelogger::service::Clock;
use mealtimelogger::utils::time::parse_timestamp;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub fn mtl() -> Command {
    cargo_bin_cmd!("mealtimelogger")
}

/// Unique meal log path inside the system temp dir; removes any leftovers
/// (log, temp file and rotated snapshots).
pub fn setup_test_log(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_mealtime_log.csv", name));
    cleanup(&path);
    path.to_string_lossy().to_string()
}

pub fn cleanup(path: &Path) {
    fs::remove_file(path).ok();
    for n in 1..=BACKUP_DEPTH + 1 {
        fs::remove_file(backup_path(path, n)).ok();
    }
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    fs::remove_file(PathBuf::from(tmp)).ok();
}

/// Temporary output file path inside tempdir, removed if present
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn ts(s: &str) -> NaiveDateTime {
    parse_timestamp(s).expect("valid test timestamp")
}

/// Write a log file by hand, header included.
pub fn write_log(path: &str, rows: &[(&str, &str)]) {
    let mut content = String::from("start_time,end_time\n");
    for (start, end) in rows {
        content.push_str(&format!("{start},{end}\n"));
    }
    fs::write(path, content).expect("write test log");
}

/// Clock returning a settable instant.
#[derive(Clone)]
pub struct FixedClock(Arc<Mutex<NaiveDateTime>>);

impl FixedClock {
    pub fn at(s: &str) -> Self {
        Self(Arc::new(Mutex::new(ts(s))))
    }

    pub fn set(&self, s: &str) {
        *self.0.lock().unwrap() = ts(s);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.0.lock().unwrap()
    }
}
