use super::fs_utils::ensure_writable;
use super::model::MealExport;
use super::{ExportFormat, csv, json, notify_export_success};
use crate::core::history;
use crate::errors::{AppError, AppResult};
use crate::store::LogStore;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the whole meal history, newest first.
    ///
    /// - `format`: csv | json
    /// - `file`: absolute path of the output file
    pub fn export(store: &LogStore, format: ExportFormat, file: &str, force: bool) -> AppResult<()> {
        let path = Path::new(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let meals = Self::collect(store)?;
        if meals.is_empty() {
            warning("No meals recorded yet. Nothing to export.");
            return Ok(());
        }

        match format {
            ExportFormat::Csv => csv::write_csv(path, &meals)?,
            ExportFormat::Json => json::write_json(path, &meals)?,
        }

        notify_export_success(&format.as_str().to_uppercase(), path);
        Ok(())
    }

    pub fn collect(store: &LogStore) -> AppResult<Vec<MealExport>> {
        let newest_first = store.read_newest_first()?;
        Ok(history::build_rows(&newest_first, newest_first.len())
            .iter()
            .map(MealExport::from)
            .collect())
    }
}
