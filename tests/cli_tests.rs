mod common;
use common::{init_db, lat, register_cli, setup_test_db, temp_out};
use libattend::config::CorruptPolicy;
use libattend::db::Repository;
use libattend::models::EventKind;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");
    init_db(&db_path);
    assert!(Path::new(&db_path).exists());
}

#[test]
fn test_scan_unknown_member_fails() {
    let db_path = setup_test_db("cli_scan_unknown");
    init_db(&db_path);

    lat()
        .args(["--db", &db_path, "--test", "scan", "LIB999"])
        .assert()
        .failure()
        .stderr(contains("Member not found: LIB999"));

    let repo = Repository::open(&db_path, CorruptPolicy::Fail).unwrap();
    assert!(repo.attendance().unwrap().is_empty());
}

#[test]
fn test_register_requires_all_fields() {
    let db_path = setup_test_db("cli_register_missing");
    init_db(&db_path);

    lat()
        .args(["--db", &db_path, "--test", "register", "--name", "Ann"])
        .assert()
        .failure()
        .stderr(contains("Missing required field: email"));
}

#[test]
fn test_register_then_scan_and_history() {
    let db_path = setup_test_db("cli_register_scan");
    init_db(&db_path);
    let ann = register_cli(&db_path, "Ann", "ann@x.org", "student");

    lat()
        .args(["--db", &db_path, "--test", "scan", &ann.id])
        .assert()
        .success()
        .stdout(contains("check-in").and(contains("Ann")));

    lat()
        .args(["--db", &db_path, "--test", "history", "--search", "ann"])
        .assert()
        .success()
        .stdout(contains(ann.id.as_str()));

    lat()
        .args(["--db", &db_path, "--test", "today"])
        .assert()
        .success()
        .stdout(contains("Recent activity"));
}

#[test]
fn test_scan_stream_from_stdin() {
    let db_path = setup_test_db("cli_scan_stream");
    init_db(&db_path);
    let ann = register_cli(&db_path, "Ann", "ann@x.org", "student");

    lat()
        .args(["--db", &db_path, "--test", "scan"])
        .write_stdin(format!("{id}\n\nLIB999\n  {id}  \n{id}\n", id = ann.id))
        .assert()
        .success()
        .stderr(contains("Member not found: LIB999"));

    let repo = Repository::open(&db_path, CorruptPolicy::Fail).unwrap();
    let kinds: Vec<EventKind> = repo.attendance().unwrap().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![EventKind::CheckIn, EventKind::CheckOut, EventKind::CheckIn]
    );
}

#[test]
fn test_export_csv_row_count() {
    let db_path = setup_test_db("cli_export_csv");
    init_db(&db_path);
    let ann = register_cli(&db_path, "Ann", "ann@x.org", "student");
    let bob = register_cli(&db_path, "Bob", "bob@x.org", "faculty");

    for id in [&ann.id, &bob.id, &ann.id] {
        lat()
            .args(["--db", &db_path, "--test", "scan", id])
            .assert()
            .success();
    }

    let out = temp_out("cli_export_csv", "csv");
    lat()
        .args([
            "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 4);

    let out = temp_out("cli_export_csv_outs", "csv");
    lat()
        .args([
            "--db", &db_path, "--test", "export", "--file", &out, "--kind", "check-out",
        ])
        .assert()
        .success();
    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("check-out"));
}

#[test]
fn test_members_delete_keeps_history() {
    let db_path = setup_test_db("cli_members_delete");
    init_db(&db_path);
    let ann = register_cli(&db_path, "Ann", "ann@x.org", "student");

    lat()
        .args(["--db", &db_path, "--test", "scan", &ann.id])
        .assert()
        .success();

    lat()
        .args(["--db", &db_path, "--test", "members", "--delete", &ann.id, "--yes"])
        .assert()
        .success()
        .stdout(contains("Member deleted"));

    lat()
        .args(["--db", &db_path, "--test", "members", "--show", &ann.id])
        .assert()
        .failure()
        .stderr(contains("Member not found"));

    lat()
        .args(["--db", &db_path, "--test", "history"])
        .assert()
        .success()
        .stdout(contains(ann.id.as_str()));
}

#[test]
fn test_members_show_never_visited() {
    let db_path = setup_test_db("cli_members_show");
    init_db(&db_path);
    let ann = register_cli(&db_path, "Ann", "ann@x.org", "premium");

    lat()
        .args(["--db", &db_path, "--test", "members", "--show", &ann.id])
        .assert()
        .success()
        .stdout(contains("Never").and(contains("ann@x.org")));

    lat()
        .args(["--db", &db_path, "--test", "members", "--search", "zed"])
        .assert()
        .success()
        .stdout(contains("No members found"));
}

#[test]
fn test_db_check_reports_corrupt_collection() {
    let db_path = setup_test_db("cli_db_check");
    init_db(&db_path);

    {
        let repo = Repository::open(&db_path, CorruptPolicy::Reset).unwrap();
        libattend::db::blobs::write_blob(repo.conn(), "attendance_2026-03-02", "oops").unwrap();
    }

    lat()
        .args(["--db", &db_path, "--test", "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Corrupt collection:").and(contains("attendance_2026-03-02")));

    lat()
        .args([
            "--db",
            &db_path,
            "--test",
            "db",
            "--reset",
            "attendance_2026-03-02",
            "--yes",
        ])
        .assert()
        .success();

    lat()
        .args(["--db", &db_path, "--test", "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("All stored collections parse"));

    lat()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("reset").and(contains("Stored collection deleted")));
}

#[test]
fn test_backup_compressed() {
    let db_path = setup_test_db("cli_backup");
    init_db(&db_path);
    register_cli(&db_path, "Ann", "ann@x.org", "student");

    let out = temp_out("cli_backup", "sqlite");
    let zip = out.replace(".sqlite", ".zip");
    fs::remove_file(&zip).ok();

    lat()
        .args([
            "--db", &db_path, "--test", "backup", "--file", &out, "--compress", "--force",
        ])
        .assert()
        .success();

    assert!(Path::new(&zip).exists());
    assert!(!Path::new(&out).exists());
}

#[test]
fn test_log_print_lists_operations() {
    let db_path = setup_test_db("cli_log");
    init_db(&db_path);
    register_cli(&db_path, "Ann", "ann@x.org", "student");

    lat()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("register").and(contains("init")));
}

#[test]
fn test_db_check_reports_wrong_shaped_members() {
    let db_path = setup_test_db("cli_db_check_shape");
    init_db(&db_path);

    {
        let repo = Repository::open(&db_path, CorruptPolicy::Reset).unwrap();
        libattend::db::blobs::write_blob(repo.conn(), "library_members", "[1,2,3]").unwrap();
    }

    lat()
        .args(["--db", &db_path, "--test", "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Corrupt collection:").and(contains("library_members")))
        .stdout(contains("All stored collections parse").not());
}
