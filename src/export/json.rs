use super::model::MealExport;
use crate::errors::AppResult;
use std::path::Path;

/// Write the meals as pretty-printed JSON.
pub fn write_json(path: &Path, meals: &[MealExport]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(meals)?;
    std::fs::write(path, json)?;
    Ok(())
}
