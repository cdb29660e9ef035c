#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, TimeZone, Utc};
use libattend::config::CorruptPolicy;
use libattend::core::register::{RegisterLogic, Registration};
use libattend::db::Repository;
use libattend::models::Member;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn lat() -> Command {
    cargo_bin_cmd!("libattend")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_libattend.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a DB through the CLI (test mode leaves the config file alone)
pub fn init_db(db_path: &str) {
    lat()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Register a member through the CLI and return it as stored
pub fn register_cli(db_path: &str, name: &str, email: &str, membership: &str) -> Member {
    lat()
        .args([
            "--db", db_path, "--test", "register", "--name", name, "--email", email, "--type",
            membership,
        ])
        .assert()
        .success();

    let repo = Repository::open(db_path, CorruptPolicy::Fail).expect("open db");
    repo.members()
        .expect("members")
        .into_iter()
        .rev()
        .find(|m| m.email == email)
        .expect("registered member")
}

pub fn mem_repo() -> Repository {
    Repository::in_memory(CorruptPolicy::Reset).expect("in-memory repo")
}

/// Local wall-clock instant
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("unambiguous local time")
}

pub fn register(repo: &mut Repository, name: &str, email: &str, membership: &str) -> Member {
    RegisterLogic::register(
        repo,
        &Registration::new(name, email, membership),
        "LIB",
        Utc::now(),
    )
    .expect("register")
}
