// src/export/logic.rs

use crate::config::Config;
use crate::core::history::HistoryFilter;
use crate::db::Repository;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::AttendanceExport;
use crate::export::xlsx::export_xlsx;
use crate::models::AttendanceEvent;
use crate::ui::messages::warning;
use crate::utils::date;
use crate::utils::path::resolve_output;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{debug, warn};

/// High-level export of the (filtered) attendance history.
pub struct ExportLogic;

impl ExportLogic {
    /// Flatten events using the configured date/time formats.
    pub fn rows(events: &[AttendanceEvent], cfg: &Config) -> AppResult<Vec<AttendanceExport>> {
        cfg.validate()?;
        Ok(events
            .iter()
            .map(|e| AttendanceExport::from_event(e, &cfg.date_format, &cfg.time_format))
            .collect())
    }

    /// Export the history matching `filter`.
    ///
    /// - `file`: output path; `None` → `attendance_history_<today>.<ext>`
    ///   in the current directory
    /// - `force`: overwrite an existing file without asking
    ///
    /// Returns the path written.
    pub fn export(
        repo: &Repository,
        cfg: &Config,
        format: ExportFormat,
        file: Option<&str>,
        filter: &HistoryFilter,
        force: bool,
    ) -> AppResult<PathBuf> {
        let file_name = match file {
            Some(f) => f.to_string(),
            None => default_file_name(format, date::today()),
        };
        let path = resolve_output(&file_name)?;

        ensure_writable(&path, force)?;

        let events = filter.apply(&repo.attendance()?);
        debug!(count = events.len(), format = format.as_str(), "exporting attendance");

        if events.is_empty() {
            warning("No attendance records match the selected filters; the export will be empty.");
        }

        let rows = Self::rows(&events, cfg)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, &path)?,
        }

        if let Err(e) = repo.log(
            "export",
            &path.to_string_lossy(),
            &format!("Exported {} records as {}", rows.len(), format.as_str()),
        ) {
            warn!(error = %e, "failed to write internal log");
        }

        Ok(path)
    }
}

pub fn default_file_name(format: ExportFormat, day: NaiveDate) -> String {
    format!(
        "attendance_history_{}.{}",
        day.format("%Y-%m-%d"),
        format.extension()
    )
}
