use super::model::{MealExport, get_headers, meal_to_row};
use crate::errors::AppResult;
use std::path::Path;

/// Write the meals as CSV to the given file.
pub fn write_csv(path: &Path, meals: &[MealExport]) -> AppResult<()> {
    let mut wtr = ::csv::Writer::from_path(path)?;

    wtr.write_record(get_headers())?;
    for m in meals {
        wtr.write_record(meal_to_row(m))?;
    }

    wtr.flush()?;
    Ok(())
}
