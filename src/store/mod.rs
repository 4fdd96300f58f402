//! Persistence of the meal log.

pub mod log;

pub use log::{EndOutcome, LogStore, UndoOutcome};
