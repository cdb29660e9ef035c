//! Check-in / check-out derivation.

use crate::db::Repository;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceEvent, EventKind, Member};
use chrono::{DateTime, Local, Utc};
use tracing::{info, warn};

/// Kind of the next event for `member_id`, given that day's events.
///
/// A check-in that has no matching check-out yet means the member is inside,
/// so the scan checks them out. Anything else starts a new visit.
pub fn derive_kind(member_id: &str, day_events: &[AttendanceEvent]) -> EventKind {
    let (ins, outs) = day_events
        .iter()
        .filter(|e| e.member_id == member_id)
        .fold((0usize, 0usize), |(i, o), e| match e.kind {
            EventKind::CheckIn => (i + 1, o),
            EventKind::CheckOut => (i, o + 1),
        });

    if ins > outs {
        EventKind::CheckOut
    } else {
        EventKind::CheckIn
    }
}

/// `<member id>_<millis>`, with a `_<n>` suffix if the day already has it.
pub fn event_id(member_id: &str, now: DateTime<Utc>, day_events: &[AttendanceEvent]) -> String {
    let base = format!("{}_{}", member_id, now.timestamp_millis());
    if !day_events.iter().any(|e| e.id == base) {
        return base;
    }

    let mut n = 1;
    loop {
        let candidate = format!("{base}_{n}");
        if !day_events.iter().any(|e| e.id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub member: Member,
    pub event: AttendanceEvent,
}

pub struct ScanLogic;

impl ScanLogic {
    /// Record a scan of `code` at `now`.
    ///
    /// `code` is compared verbatim against member ids. An unknown code
    /// returns `AppError::MemberNotFound` and records nothing.
    pub fn scan(repo: &mut Repository, code: &str, now: DateTime<Local>) -> AppResult<ScanOutcome> {
        let member = repo
            .find_member(code)?
            .ok_or_else(|| AppError::MemberNotFound(code.to_string()))?;

        let day = now.date_naive();
        let at = now.with_timezone(&Utc);

        let event = repo.append_attendance(day, |today| {
            Ok(AttendanceEvent {
                id: event_id(&member.id, at, today),
                member_id: member.id.clone(),
                member_name: member.name.clone(),
                timestamp: at,
                kind: derive_kind(&member.id, today),
            })
        })?;

        info!(member = %member.id, kind = %event.kind, "scan recorded");

        if let Err(e) = repo.log(
            "scan",
            &member.id,
            &format!("{} {}", member.name, event.kind),
        ) {
            warn!(error = %e, "failed to write internal log");
        }

        Ok(ScanOutcome { member, event })
    }
}
