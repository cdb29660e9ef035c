use crate::core::stats::DayStats;
use crate::db::Repository;
use crate::errors::AppResult;
use crate::models::AttendanceEvent;
use chrono::NaiveDate;

/// What the front desk sees for one day.
#[derive(Debug, Clone)]
pub struct DayOverview {
    pub day: NaiveDate,
    pub stats: DayStats,
    /// Most recent events first, at most `limit`.
    pub recent: Vec<AttendanceEvent>,
}

pub struct TodayLogic;

impl TodayLogic {
    pub fn overview(repo: &Repository, day: NaiveDate, limit: usize) -> AppResult<DayOverview> {
        let events = repo.attendance_for_day(day)?;
        let stats = DayStats::from_events(&events);
        let recent = events.iter().rev().take(limit).cloned().collect();

        Ok(DayOverview { day, stats, recent })
    }
}
