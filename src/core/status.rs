use crate::models::band::{DurationBand, ElapsedBand, IntervalBand};
use crate::models::meal::MealRecord;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Snapshot of "where are we now": latest meal and time elapsed since it began.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealStatus {
    pub latest: Option<MealRecord>,
    pub in_progress: bool,
    pub elapsed_secs: Option<i64>,
    pub band: Option<ElapsedBand>,
}

impl MealStatus {
    pub fn from_latest(latest: Option<&MealRecord>, now: NaiveDateTime) -> Self {
        let Some(meal) = latest else {
            return Self {
                latest: None,
                in_progress: false,
                elapsed_secs: None,
                band: None,
            };
        };

        let elapsed = (now - meal.start_time).num_seconds();
        let band = if meal.in_progress() {
            ElapsedBand::Eating(DurationBand::classify(elapsed))
        } else {
            ElapsedBand::Waiting(IntervalBand::classify(elapsed))
        };

        Self {
            latest: Some(*meal),
            in_progress: meal.in_progress(),
            elapsed_secs: Some(elapsed),
            band: Some(band),
        }
    }
}
