// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{AttendanceExport, EXPORT_HEADERS};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const HEADER_FG: u32 = 0xFFFFFF;
const HEADER_BG: u32 = 0x2F75B5;
const CHECK_IN_FG: u32 = 0x1E7B34;
const CHECK_OUT_FG: u32 = 0xB02A37;

/// Export XLSX with styled header, banded rows and auto column widths.
pub(crate) fn export_xlsx(rows: &[AttendanceExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Attendance").map_err(to_app_error)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(HEADER_FG))
        .set_background_color(Color::RGB(HEADER_BG))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_app_error)?;

    let mut col_widths: Vec<usize> = EXPORT_HEADERS.iter().map(|h| h.width()).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, record) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in record.to_row().iter().enumerate() {
            write_cell(worksheet, row, col as u16, value, band, col == 2)?;
            col_widths[col] = col_widths[col].max(value.width());
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path, rows.len());
    Ok(())
}

/// Write one text cell; the type column is coloured by kind.
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &str,
    band: Color,
    is_kind: bool,
) -> AppResult<()> {
    let mut fmt = Format::new()
        .set_background_color(band)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if is_kind {
        let fg = if value == "check-in" {
            CHECK_IN_FG
        } else {
            CHECK_OUT_FG
        };
        fmt = fmt.set_font_color(Color::RGB(fg)).set_bold();
    }

    worksheet
        .write_with_format(row, col, value, &fmt)
        .map_err(to_app_error)?;
    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
