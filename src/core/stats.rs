//! Counters shown by `today`, `history` and `members`.

use crate::models::{AttendanceEvent, EventKind, Member, Membership};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

fn count_kinds<'a>(events: impl IntoIterator<Item = &'a AttendanceEvent>) -> (usize, usize) {
    events.into_iter().fold((0, 0), |(i, o), e| match e.kind {
        EventKind::CheckIn => (i + 1, o),
        EventKind::CheckOut => (i, o + 1),
    })
}

/// Counters for one day's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayStats {
    pub check_ins: usize,
    pub check_outs: usize,
    pub currently_in: usize,
}

impl DayStats {
    pub fn from_events(events: &[AttendanceEvent]) -> Self {
        let (check_ins, check_outs) = count_kinds(events);
        Self {
            check_ins,
            check_outs,
            currently_in: check_ins.saturating_sub(check_outs),
        }
    }
}

/// Counters over a (filtered) slice of history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryStats {
    pub check_ins: usize,
    pub check_outs: usize,
    pub unique_members: usize,
}

impl HistoryStats {
    pub fn from_events(events: &[AttendanceEvent]) -> Self {
        let (check_ins, check_outs) = count_kinds(events);
        let unique_members = events
            .iter()
            .map(|e| e.member_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        Self {
            check_ins,
            check_outs,
            unique_members,
        }
    }
}

/// Roster size, overall and per membership category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RosterStats {
    pub total: usize,
    pub by_membership: Vec<(Membership, usize)>,
}

impl RosterStats {
    pub fn from_members(members: &[Member]) -> Self {
        let by_membership = Membership::ALL
            .iter()
            .map(|m| {
                (
                    *m,
                    members.iter().filter(|x| x.membership_type == *m).count(),
                )
            })
            .collect();
        Self {
            total: members.len(),
            by_membership,
        }
    }

    pub fn count(&self, membership: Membership) -> usize {
        self.by_membership
            .iter()
            .find(|(m, _)| *m == membership)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Attendance summary of one member over the full history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberSummary {
    pub check_ins: usize,
    pub check_outs: usize,
    /// Timestamp of the member's most recently stored event.
    pub last_visit: Option<DateTime<Utc>>,
}

impl MemberSummary {
    pub fn for_member(member_id: &str, history: &[AttendanceEvent]) -> Self {
        let own: Vec<&AttendanceEvent> = history
            .iter()
            .filter(|e| e.member_id == member_id)
            .collect();
        let (check_ins, check_outs) = count_kinds(own.iter().copied());
        Self {
            check_ins,
            check_outs,
            last_visit: own.last().map(|e| e.timestamp),
        }
    }
}
