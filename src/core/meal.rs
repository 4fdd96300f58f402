use crate::errors::AppResult;
use crate::store::{EndOutcome, LogStore, UndoOutcome};
use crate::ui::messages::{info, success, warning};
use crate::utils::time::{format_timestamp, now};

/// Local (CLI) mutations of the meal log.
pub struct MealLogic;

impl MealLogic {
    pub fn start(store: &LogStore) -> AppResult<()> {
        let last = store.read_all()?.last().copied();
        if let Some(meal) = last.filter(|m| m.in_progress()) {
            warning(format!(
                "A meal started at {} is still in progress; starting a new one anyway.",
                meal.start_str()
            ));
        }

        let record = store.append_start(now())?;
        success(format!("Meal started at {}", record.start_str()));
        Ok(())
    }

    pub fn end(store: &LogStore) -> AppResult<()> {
        match store.set_end(now())? {
            EndOutcome::Ended(record) => success(format!(
                "Meal ended at {} (started {})",
                record.end_str(),
                record.start_str()
            )),
            EndOutcome::EndedUnreadable => warning(
                "Meal ended, but the last row of the log has an unreadable start time",
            ),
            EndOutcome::Empty => info(format!(
                "No meal to end; nothing recorded at {}",
                format_timestamp(&now())
            )),
        }
        Ok(())
    }

    pub fn undo(store: &LogStore) -> AppResult<()> {
        match store.undo_last()? {
            UndoOutcome::EndCleared => success("Last end time cleared: the meal is in progress again"),
            UndoOutcome::Removed => success("Last meal removed"),
        }
        Ok(())
    }
}
