// src/export/logic.rs

use crate::db::store::TimeEntryStore;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::TimeEntryExport;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::models::time_entry::TimeEntryFilter;
use crate::ui::messages::warning;
use crate::utils::date::{DayBoundary, period_bounds};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export completed time entries.
    ///
    /// `range`: `None`, `"all"` or a period (`YYYY`, `YYYY-MM`,
    /// `YYYY-MM-DD`, `A:B`). Returns the number of rows written.
    pub fn export<S: TimeEntryStore>(
        store: &mut S,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
        boundary: &DayBoundary,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        let filter = match range {
            None => TimeEntryFilter::all(),
            Some(r) if r.eq_ignore_ascii_case("all") => TimeEntryFilter::all(),
            Some(r) => {
                let (from, to) = period_bounds(r).map_err(AppError::InvalidDate)?;
                TimeEntryFilter::between(from, to)
            }
        };

        let rows: Vec<TimeEntryExport> = store
            .list(&filter)?
            .iter()
            .map(|e| TimeEntryExport::from_entry(e, boundary))
            .collect();

        if rows.is_empty() {
            warning("No time entries found for selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}
