mod common;
use common::{at, mem_repo, register, temp_out};
use libattend::config::Config;
use libattend::core::history::HistoryFilter;
use libattend::core::scan::ScanLogic;
use libattend::db::Repository;
use libattend::errors::AppError;
use libattend::export::logic::default_file_name;
use libattend::export::{ExportFormat, ExportLogic, render_csv};
use libattend::models::EventKind;
use std::fs;

/// Ann: in/out on 2026-03-02, in on 2026-04-10. Bob: in on 2026-03-02.
fn seeded() -> Repository {
    let mut repo = mem_repo();
    let ann = register(&mut repo, "Ann Lee", "ann@x.org", "student");
    let bob = register(&mut repo, "Bob", "bob@x.org", "staff");

    ScanLogic::scan(&mut repo, &ann.id, at(2026, 3, 2, 9, 0)).unwrap();
    ScanLogic::scan(&mut repo, &bob.id, at(2026, 3, 2, 9, 30)).unwrap();
    ScanLogic::scan(&mut repo, &ann.id, at(2026, 3, 2, 12, 0)).unwrap();
    ScanLogic::scan(&mut repo, &ann.id, at(2026, 4, 10, 15, 0)).unwrap();
    repo
}

#[test]
fn test_empty_filter_keeps_everything() {
    let repo = seeded();
    let filter = HistoryFilter::from_args(None, Some("all"), None, Some("all")).unwrap();

    assert!(filter.is_empty());
    assert_eq!(filter.apply(&repo.attendance().unwrap()).len(), 4);
}

#[test]
fn test_filter_by_search_kind_and_dates() {
    let repo = seeded();
    let all = repo.attendance().unwrap();

    let by_name = HistoryFilter::from_args(Some("ann"), None, None, None).unwrap();
    assert_eq!(by_name.apply(&all).len(), 3);

    let outs = HistoryFilter::from_args(None, Some("check-out"), None, None).unwrap();
    let outs = outs.apply(&all);
    assert_eq!(outs.len(), 1);
    assert_eq!(outs[0].kind, EventKind::CheckOut);

    let day = HistoryFilter::from_args(None, None, Some("2026-03-02"), None).unwrap();
    assert_eq!(day.apply(&all).len(), 3);

    let april = HistoryFilter::from_args(None, None, None, Some("2026-04")).unwrap();
    assert_eq!(april.apply(&all).len(), 1);

    let span = HistoryFilter::from_args(Some("bob"), Some("in"), None, Some("2026-03:2026-04"))
        .unwrap();
    assert_eq!(span.apply(&all).len(), 1);
}

#[test]
fn test_filter_rejects_bad_values() {
    assert!(matches!(
        HistoryFilter::from_args(None, Some("sideways"), None, None),
        Err(AppError::InvalidEventKind(_))
    ));
    assert!(matches!(
        HistoryFilter::from_args(None, None, Some("02/03/2026"), None),
        Err(AppError::InvalidDate(_))
    ));
    assert!(matches!(
        HistoryFilter::from_args(None, None, None, Some("2026-05:2026-04")),
        Err(AppError::InvalidRange(_))
    ));
}

#[test]
fn test_render_csv_has_header_plus_one_row_per_event() {
    let repo = seeded();
    let rows = ExportLogic::rows(&repo.attendance().unwrap(), &Config::default()).unwrap();

    let csv = render_csv(&rows).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "Member ID,Member Name,Type,Date,Time");
    assert!(lines[1].contains(",Ann Lee,check-in,2026-03-02,09:00:00"));

    let empty = render_csv(&[]).unwrap();
    assert_eq!(empty.lines().count(), 1);
}

#[test]
fn test_export_csv_and_json_files() {
    let repo = seeded();
    let cfg = Config::default();
    let filter = HistoryFilter::from_args(Some("ann"), None, None, None).unwrap();

    let out = temp_out("history_export_csv", "csv");
    let path = ExportLogic::export(&repo, &cfg, ExportFormat::Csv, Some(out.as_str()), &filter, true)
        .unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 4);

    let out = temp_out("history_export_json", "json");
    ExportLogic::export(&repo, &cfg, ExportFormat::Json, Some(out.as_str()), &filter, true).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[0]["memberName"], "Ann Lee");
    assert_eq!(arr[0]["type"], "check-in");
    assert_eq!(arr[0]["date"], "2026-03-02");
}

#[test]
fn test_export_xlsx_file() {
    let repo = seeded();
    let out = temp_out("history_export_xlsx", "xlsx");

    ExportLogic::export(
        &repo,
        &Config::default(),
        ExportFormat::Xlsx,
        Some(out.as_str()),
        &HistoryFilter::default(),
        true,
    )
    .unwrap();

    let bytes = fs::read(&out).unwrap();
    // xlsx is a zip container
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_default_export_file_name() {
    let day = chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    assert_eq!(
        default_file_name(ExportFormat::Csv, day),
        "attendance_history_2026-03-02.csv"
    );
    assert_eq!(
        default_file_name(ExportFormat::Xlsx, day),
        "attendance_history_2026-03-02.xlsx"
    );
}

#[test]
fn test_export_with_unusable_format_is_an_error() {
    let repo = seeded();
    let cfg = Config {
        date_format: "%Q".into(),
        ..Config::default()
    };

    let err = ExportLogic::rows(&repo.attendance().unwrap(), &cfg).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));

    let out = temp_out("history_export_bad_format", "csv");
    let res = ExportLogic::export(
        &repo,
        &cfg,
        ExportFormat::Csv,
        Some(out.as_str()),
        &HistoryFilter::default(),
        true,
    );
    assert!(matches!(res, Err(AppError::Config(_))));
}
