use crate::models::band::{DurationBand, IntervalBand};
use crate::models::meal::MealRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// Number of distinct date colours cycled through by a history.
pub const DATE_COLOURS: usize = 4;

/// One rendered line of the meal history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    #[serde(flatten)]
    pub meal: MealRecord,
    pub duration_secs: Option<i64>,
    pub duration_band: Option<DurationBand>,
    /// Seconds since the previous meal started; `None` for the first meal ever.
    pub interval_secs: Option<i64>,
    pub interval_band: Option<IntervalBand>,
    /// Changes every time the calendar date changes from one row to the next.
    pub date_colour: usize,
}

/// Build up to `limit` rows from newest-first records.
///
/// The interval of the last visible row is measured against the record
/// just past the limit, so a truncated history still shows it.
pub fn build_rows(newest_first: &[MealRecord], limit: usize) -> Vec<HistoryRow> {
    let mut rows = Vec::with_capacity(limit.min(newest_first.len()));
    let mut current_date: Option<NaiveDate> = None;
    let mut colour = 0usize;

    for (i, meal) in newest_first.iter().take(limit).enumerate() {
        let date = meal.start_time.date();
        if current_date != Some(date) {
            current_date = Some(date);
            colour = (colour + 1) % DATE_COLOURS;
        }

        let duration_secs = meal.duration_secs();
        let interval_secs = newest_first
            .get(i + 1)
            .map(|prev| (meal.start_time - prev.start_time).num_seconds());

        rows.push(HistoryRow {
            meal: *meal,
            duration_secs,
            duration_band: duration_secs.map(DurationBand::classify),
            interval_secs,
            interval_band: interval_secs.map(IntervalBand::classify),
            date_colour: colour,
        });
    }

    rows
}
