//! Attendance history filtering.

use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceEvent, EventKind};
use crate::utils::date::{parse_date, parse_range};
use chrono::NaiveDate;

/// Filters applied to the full history. Empty filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    /// Case-insensitive substring of member name or id.
    pub search: Option<String>,
    pub kind: Option<EventKind>,
    /// Exact local date.
    pub date: Option<NaiveDate>,
    /// Inclusive local date bounds.
    pub range: Option<(NaiveDate, NaiveDate)>,
}

impl HistoryFilter {
    /// Build a filter from raw CLI values.
    ///
    /// `kind` accepts `all`, `check-in` or `check-out`.
    pub fn from_args(
        search: Option<&str>,
        kind: Option<&str>,
        date: Option<&str>,
        range: Option<&str>,
    ) -> AppResult<Self> {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let kind = match kind.map(str::trim) {
            None => None,
            Some(k) if k.eq_ignore_ascii_case("all") => None,
            Some(k) => Some(
                EventKind::from_input(k).ok_or_else(|| AppError::InvalidEventKind(k.to_string()))?,
            ),
        };

        let date = match date {
            None => None,
            Some(d) => Some(parse_date(d).ok_or_else(|| AppError::InvalidDate(d.to_string()))?),
        };

        let range = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        Ok(Self {
            search,
            kind,
            date,
            range,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.kind.is_none() && self.date.is_none() && self.range.is_none()
    }

    pub fn matches(&self, event: &AttendanceEvent) -> bool {
        if let Some(term) = &self.search
            && !event.matches(term)
        {
            return false;
        }

        if let Some(kind) = self.kind
            && event.kind != kind
        {
            return false;
        }

        if self.date.is_some() || self.range.is_some() {
            let day = event.local_date();

            if let Some(d) = self.date
                && day != d
            {
                return false;
            }

            if let Some((start, end)) = self.range
                && (day < start || day > end)
            {
                return false;
            }
        }

        true
    }

    /// Matching events, preserving history order.
    pub fn apply(&self, events: &[AttendanceEvent]) -> Vec<AttendanceEvent> {
        events.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}
