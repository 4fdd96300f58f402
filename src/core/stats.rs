//! Interval and duration statistics over the most recent meals.

use crate::models::meal::MealRecord;
use crate::utils::time::format_hms;
use serde::Serialize;

/// Number of recent meals considered by default.
pub const DEFAULT_WINDOW: usize = 30;

/// Raw samples, in seconds, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Samples {
    pub durations: Vec<i64>,
    pub intervals: Vec<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MealStats {
    pub interval_avg: f64,
    pub interval_median: f64,
    pub duration_avg: f64,
    pub duration_median: f64,
    pub interval_count: usize,
    pub duration_count: usize,
}

impl MealStats {
    /// The four aggregates rendered as `HH:MM:SS`, in display order.
    pub fn formatted(&self) -> [(&'static str, String); 4] {
        [
            ("interval_avg", format_hms(self.interval_avg)),
            ("interval_median", format_hms(self.interval_median)),
            ("duration_avg", format_hms(self.duration_avg)),
            ("duration_median", format_hms(self.duration_median)),
        ]
    }
}

/// Collect samples from `newest_first`, restricted to its first `window`
/// records. In-progress meals contribute no duration; intervals are taken
/// between neighbours inside the window only.
pub fn collect_samples(newest_first: &[MealRecord], window: usize) -> Samples {
    let recent = &newest_first[..newest_first.len().min(window)];

    let durations = recent.iter().filter_map(MealRecord::duration_secs).collect();
    let intervals = recent
        .windows(2)
        .map(|pair| (pair[0].start_time - pair[1].start_time).num_seconds())
        .collect();

    Samples {
        durations,
        intervals,
    }
}

pub fn compute(newest_first: &[MealRecord], window: usize) -> MealStats {
    let samples = collect_samples(newest_first, window);
    MealStats {
        interval_avg: mean(&samples.intervals),
        interval_median: median(&samples.intervals),
        duration_avg: mean(&samples.durations),
        duration_median: median(&samples.durations),
        interval_count: samples.intervals.len(),
        duration_count: samples.durations.len(),
    }
}

/// Arithmetic mean; 0 for an empty set.
pub fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

/// Median; mean of the two middle values for even counts, 0 when empty.
pub fn median(values: &[i64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 0 => (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0,
        _ => sorted[n / 2] as f64,
    }
}
