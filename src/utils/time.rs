//! Time utilities: parsing/formatting log timestamps and HH:MM:SS durations.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, Timelike};

/// On-disk timestamp format (`YYYY-MM-DDTHH:MM:SS`, local wall-clock time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Accepted on read only; older files were sometimes edited by hand.
const LENIENT_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| {
            LENIENT_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        })
        .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))
}

/// Empty or unparsable values mean "not set".
pub fn parse_optional_timestamp(s: Option<&str>) -> Option<NaiveDateTime> {
    match s {
        Some(v) if !v.trim().is_empty() => parse_timestamp(v).ok(),
        _ => None,
    }
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Short form used in history tables: `MM/DD HH:MM:SS`.
pub fn format_short(ts: &NaiveDateTime) -> String {
    ts.format("%m/%d %H:%M:%S").to_string()
}

/// Current local time, truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Format a number of seconds as `HH:MM:SS`.
///
/// Hours are padded to two digits but not capped (`100:00:00` is valid).
/// Fractions are truncated; negative values get a leading `-`.
pub fn format_hms(seconds: f64) -> String {
    let total = seconds.trunc() as i64;
    let sign = if total < 0 { "-" } else { "" };
    let abs = total.abs();
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        abs / 3600,
        (abs % 3600) / 60,
        abs % 60
    )
}
