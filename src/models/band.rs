//! Colour bands used when rendering durations and intervals.

use serde::Serialize;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationBand {
    Insufficient, // < 15 min
    Short,        // < 30 min
    Medium,       // < 60 min
    Long,         // >= 60 min
}

impl DurationBand {
    pub fn classify(secs: i64) -> Self {
        if secs < 15 * MINUTE {
            DurationBand::Insufficient
        } else if secs < 30 * MINUTE {
            DurationBand::Short
        } else if secs < 60 * MINUTE {
            DurationBand::Medium
        } else {
            DurationBand::Long
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBand::Insufficient => "insufficient",
            DurationBand::Short => "short",
            DurationBand::Medium => "medium",
            DurationBand::Long => "long",
        }
    }
}

/// Interval bands. No `Medium` variant: the historical thresholds checked
/// `< 16h` twice, so a medium interval never occurred.
// TODO: add `Medium` once its upper boundary (likely 24h) is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalBand {
    Insufficient, // < 5 h
    Short,        // < 16 h
    Long,         // >= 16 h
}

impl IntervalBand {
    pub fn classify(secs: i64) -> Self {
        if secs < 5 * HOUR {
            IntervalBand::Insufficient
        } else if secs < 16 * HOUR {
            IntervalBand::Short
        } else {
            IntervalBand::Long
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalBand::Insufficient => "insufficient",
            IntervalBand::Short => "short",
            IntervalBand::Long => "long",
        }
    }
}

/// Band of a live elapsed-time display: meal bands while eating,
/// interval bands between meals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ElapsedBand {
    Eating(DurationBand),
    Waiting(IntervalBand),
}

impl ElapsedBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElapsedBand::Eating(b) => b.as_str(),
            ElapsedBand::Waiting(b) => b.as_str(),
        }
    }
}
