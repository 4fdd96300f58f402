//! ANSI colour helpers for terminal output.

use crate::models::band::{DurationBand, ElapsedBand, IntervalBand};
use ansi_term::Colour;

pub const RESET: &str = "\x1b[0m";
pub const GREY: &str = "\x1b[90m";
pub const CYAN: &str = "\x1b[36m";
pub const YELLOW: &str = "\x1b[33m";
pub const GREEN: &str = "\x1b[32m";

const INSUFFICIENT: Colour = Colour::RGB(0x88, 0x88, 0x88);
const SHORT: Colour = Colour::RGB(0x33, 0xC8, 0x88);
const MEDIUM: Colour = Colour::RGB(0xEF, 0x96, 0x3C);
const LONG: Colour = Colour::RGB(0xDC, 0x35, 0x45);

/// Colours cycled through whenever the calendar date changes in a history.
const DATE_COLOURS: [Colour; 4] = [
    Colour::RGB(0x86, 0x3A, 0x14),
    Colour::RGB(0x27, 0x86, 0x14),
    Colour::RGB(0x14, 0x60, 0x86),
    Colour::RGB(0x73, 0x14, 0x86),
];

pub fn duration_colour(band: DurationBand) -> Colour {
    match band {
        DurationBand::Insufficient => INSUFFICIENT,
        DurationBand::Short => SHORT,
        DurationBand::Medium => MEDIUM,
        DurationBand::Long => LONG,
    }
}

pub fn interval_colour(band: IntervalBand) -> Colour {
    match band {
        IntervalBand::Insufficient => INSUFFICIENT,
        IntervalBand::Short => SHORT,
        IntervalBand::Long => LONG,
    }
}

pub fn paint_elapsed(band: ElapsedBand, value: &str) -> String {
    let colour = match band {
        ElapsedBand::Eating(b) => duration_colour(b),
        ElapsedBand::Waiting(b) => interval_colour(b),
    };
    colour.paint(value).to_string()
}

pub fn paint_date(index: usize, value: &str) -> String {
    DATE_COLOURS[index % DATE_COLOURS.len()]
        .paint(value)
        .to_string()
}

/// Grey for placeholders ("--:--:--", empty), unchanged otherwise.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
