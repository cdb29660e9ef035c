mod common;
use common::{at, mem_repo, register};
use libattend::core::members::MemberLogic;
use libattend::core::scan::ScanLogic;
use libattend::core::stats::{DayStats, HistoryStats, RosterStats};
use libattend::core::today::TodayLogic;
use libattend::errors::AppError;
use libattend::models::{EventKind, Membership};

#[test]
fn test_search_members() {
    let mut repo = mem_repo();
    register(&mut repo, "Ann Lee", "ann@x.org", "student");
    register(&mut repo, "Bob", "bob@lib.edu", "staff");

    let all = repo.members().unwrap();
    assert_eq!(MemberLogic::search(&all, None).len(), 2);
    assert_eq!(MemberLogic::search(&all, Some("  ")).len(), 2);
    assert_eq!(MemberLogic::search(&all, Some("ann"))[0].name, "Ann Lee");
    assert_eq!(MemberLogic::search(&all, Some("LIB.EDU"))[0].name, "Bob");
    assert!(MemberLogic::search(&all, Some("zed")).is_empty());
}

#[test]
fn test_roster_stats() {
    let mut repo = mem_repo();
    register(&mut repo, "A", "a@x.org", "student");
    register(&mut repo, "B", "b@x.org", "student");
    register(&mut repo, "C", "c@x.org", "premium");

    let stats = RosterStats::from_members(&repo.members().unwrap());
    assert_eq!(stats.total, 3);
    assert_eq!(stats.count(Membership::Student), 2);
    assert_eq!(stats.count(Membership::Premium), 1);
    assert_eq!(stats.count(Membership::Faculty), 0);
}

#[test]
fn test_member_details_summary() {
    let mut repo = mem_repo();
    let ann = register(&mut repo, "Ann", "ann@x.org", "student");

    let (_, summary) = MemberLogic::details(&repo, &ann.id).unwrap();
    assert_eq!(summary.check_ins, 0);
    assert!(summary.last_visit.is_none());

    ScanLogic::scan(&mut repo, &ann.id, at(2026, 3, 2, 9, 0)).unwrap();
    let last = ScanLogic::scan(&mut repo, &ann.id, at(2026, 3, 2, 11, 0)).unwrap();

    let (member, summary) = MemberLogic::details(&repo, &ann.id).unwrap();
    assert_eq!(member.id, ann.id);
    assert_eq!(summary.check_ins, 1);
    assert_eq!(summary.check_outs, 1);
    assert_eq!(summary.last_visit, Some(last.event.timestamp));
}

#[test]
fn test_delete_member_keeps_attendance() {
    let mut repo = mem_repo();
    let ann = register(&mut repo, "Ann", "ann@x.org", "student");
    ScanLogic::scan(&mut repo, &ann.id, at(2026, 3, 2, 9, 0)).unwrap();

    let removed = MemberLogic::delete(&mut repo, &ann.id).unwrap();
    assert_eq!(removed.id, ann.id);
    assert!(repo.find_member(&ann.id).unwrap().is_none());

    let history = repo.attendance().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].member_name, "Ann");

    // the card no longer scans
    let err = ScanLogic::scan(&mut repo, &ann.id, at(2026, 3, 2, 10, 0)).unwrap_err();
    assert!(matches!(err, AppError::MemberNotFound(_)));
}

#[test]
fn test_delete_unknown_member() {
    let mut repo = mem_repo();
    let err = MemberLogic::delete(&mut repo, "LIB0").unwrap_err();
    assert!(matches!(err, AppError::MemberNotFound(_)));
}

#[test]
fn test_today_overview() {
    let mut repo = mem_repo();
    let ann = register(&mut repo, "Ann", "ann@x.org", "student");
    let bob = register(&mut repo, "Bob", "bob@x.org", "staff");

    ScanLogic::scan(&mut repo, &ann.id, at(2026, 3, 2, 9, 0)).unwrap();
    ScanLogic::scan(&mut repo, &bob.id, at(2026, 3, 2, 9, 30)).unwrap();
    ScanLogic::scan(&mut repo, &ann.id, at(2026, 3, 2, 12, 0)).unwrap();
    ScanLogic::scan(&mut repo, &bob.id, at(2026, 3, 3, 9, 0)).unwrap();

    let day = at(2026, 3, 2, 0, 0).date_naive();
    let overview = TodayLogic::overview(&repo, day, 2).unwrap();

    assert_eq!(
        overview.stats,
        DayStats {
            check_ins: 2,
            check_outs: 1,
            currently_in: 1
        }
    );
    assert_eq!(overview.recent.len(), 2);
    // newest first
    assert_eq!(overview.recent[0].member_id, ann.id);
    assert_eq!(overview.recent[0].kind, EventKind::CheckOut);
    assert_eq!(overview.recent[1].member_id, bob.id);
}

#[test]
fn test_history_stats_unique_members() {
    let mut repo = mem_repo();
    let ann = register(&mut repo, "Ann", "ann@x.org", "student");
    let bob = register(&mut repo, "Bob", "bob@x.org", "staff");

    ScanLogic::scan(&mut repo, &ann.id, at(2026, 3, 2, 9, 0)).unwrap();
    ScanLogic::scan(&mut repo, &ann.id, at(2026, 3, 2, 10, 0)).unwrap();
    ScanLogic::scan(&mut repo, &bob.id, at(2026, 3, 2, 11, 0)).unwrap();

    let stats = HistoryStats::from_events(&repo.attendance().unwrap());
    assert_eq!(stats.check_ins, 2);
    assert_eq!(stats.check_outs, 1);
    assert_eq!(stats.unique_members, 2);
}
