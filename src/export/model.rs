// src/export/model.rs

use crate::models::AttendanceEvent;
use serde::Serialize;

/// Fixed column order of every export.
pub const EXPORT_HEADERS: [&str; 5] = ["Member ID", "Member Name", "Type", "Date", "Time"];

/// Flat row for attendance exports; date and time are already localized.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceExport {
    pub member_id: String,
    pub member_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub time: String,
}

impl AttendanceExport {
    pub fn from_event(ev: &AttendanceEvent, date_format: &str, time_format: &str) -> Self {
        Self {
            member_id: ev.member_id.clone(),
            member_name: ev.member_name.clone(),
            kind: ev.kind.as_str().to_string(),
            date: ev.date_str(date_format),
            time: ev.time_str(time_format),
        }
    }

    /// Cells in [`EXPORT_HEADERS`] order.
    pub fn to_row(&self) -> [&str; 5] {
        [
            self.member_id.as_str(),
            self.member_name.as_str(),
            self.kind.as_str(),
            self.date.as_str(),
            self.time.as_str(),
        ]
    }
}
