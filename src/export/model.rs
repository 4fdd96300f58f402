// src/export/model.rs

use crate::core::history::HistoryRow;
use crate::utils::time::format_hms;
use serde::Serialize;

/// Flat export row: one meal with its derived duration and interval.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MealExport {
    pub start_time: String,
    pub end_time: String,
    pub duration_secs: Option<i64>,
    pub duration: String,
    pub interval_secs: Option<i64>,
    pub interval: String,
}

impl From<&HistoryRow> for MealExport {
    fn from(row: &HistoryRow) -> Self {
        let hms = |s: Option<i64>| s.map(|v| format_hms(v as f64)).unwrap_or_default();
        Self {
            start_time: row.meal.start_str(),
            end_time: row.meal.end_str(),
            duration_secs: row.duration_secs,
            duration: hms(row.duration_secs),
            interval_secs: row.interval_secs,
            interval: hms(row.interval_secs),
        }
    }
}

/// CSV header, in field order.
pub(crate) fn get_headers() -> [&'static str; 6] {
    [
        "start_time",
        "end_time",
        "duration_secs",
        "duration",
        "interval_secs",
        "interval",
    ]
}

pub(crate) fn meal_to_row(e: &MealExport) -> [String; 6] {
    let opt = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
    [
        e.start_time.clone(),
        e.end_time.clone(),
        opt(e.duration_secs),
        e.duration.clone(),
        opt(e.interval_secs),
        e.interval.clone(),
    ]
}
