use super::event_kind::EventKind;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single check-in or check-out record.
///
/// `member_name` is a copy taken at scan time and is never re-synced with
/// the registry; `member_id` is not checked against it either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEvent {
    pub id: String,
    pub member_id: String,
    pub member_name: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: EventKind,
}

impl AttendanceEvent {
    pub fn local_time(&self) -> DateTime<Local> {
        self.timestamp.with_timezone(&Local)
    }

    /// Local calendar day the event belongs to.
    pub fn local_date(&self) -> NaiveDate {
        self.local_time().date_naive()
    }

    pub fn date_str(&self, fmt: &str) -> String {
        self.local_time().format(fmt).to_string()
    }

    pub fn time_str(&self, fmt: &str) -> String {
        self.local_time().format(fmt).to_string()
    }

    /// Case-insensitive match on member name or member id.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.member_name.to_lowercase().contains(&needle)
            || self.member_id.to_lowercase().contains(&needle)
    }
}
