use crate::utils::time::format_timestamp;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One eating session: a start timestamp and, once finished, an end timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MealRecord {
    #[serde(serialize_with = "ser_timestamp")]
    pub start_time: NaiveDateTime, // ⇔ csv column `start_time`
    #[serde(serialize_with = "ser_opt_timestamp")]
    pub end_time: Option<NaiveDateTime>, // ⇔ csv column `end_time` ("" = in progress)
}

impl MealRecord {
    pub fn started(start_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            end_time: None,
        }
    }

    pub fn in_progress(&self) -> bool {
        self.end_time.is_none()
    }

    /// Seconds between start and end, `None` while the meal is in progress.
    pub fn duration_secs(&self) -> Option<i64> {
        self.end_time
            .map(|end| (end - self.start_time).num_seconds())
    }

    pub fn start_str(&self) -> String {
        format_timestamp(&self.start_time)
    }

    /// End time as stored on disk: empty while in progress.
    pub fn end_str(&self) -> String {
        self.end_time
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_default()
    }
}

fn ser_timestamp<S: serde::Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_timestamp(ts))
}

fn ser_opt_timestamp<S: serde::Serializer>(
    ts: &Option<NaiveDateTime>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match ts {
        Some(t) => s.serialize_str(&format_timestamp(t)),
        None => s.serialize_none(),
    }
}
