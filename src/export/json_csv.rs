// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{AttendanceExport, EXPORT_HEADERS};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed.
pub(crate) fn export_json(rows: &[AttendanceExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(rows)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path, rows.len());
    Ok(())
}

/// Write the header and one record per row.
///
/// The header is written explicitly so an empty export still has it.
fn write_csv<W: Write>(wtr: &mut csv::Writer<W>, rows: &[AttendanceExport]) -> AppResult<()> {
    wtr.write_record(EXPORT_HEADERS)?;
    for row in rows {
        wtr.write_record(row.to_row())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the CSV document in memory.
pub fn render_csv(rows: &[AttendanceExport]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    write_csv(&mut wtr, rows)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}

/// Export CSV with the fixed header row.
pub(crate) fn export_csv(rows: &[AttendanceExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    write_csv(&mut wtr, rows)?;

    notify_export_success("CSV", path, rows.len());
    Ok(())
}
