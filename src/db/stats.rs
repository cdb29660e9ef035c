use crate::config::CorruptPolicy;
use crate::db::Repository;
use crate::db::blobs::{blob_len, keys_with_prefix, read_blob};
use crate::db::repository::{ALL_ATTENDANCE_KEY, DAY_KEY_PREFIX, MEMBERS_KEY, decode_collection};
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceEvent, Member};
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use std::fs;

pub fn print_db_info(repo: &Repository, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) COLLECTIONS
    //
    let members = repo.members()?;
    let events = repo.attendance()?;
    let days = repo.stored_days()?;

    println!(
        "{}• Members:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        members.len(),
        RESET
    );
    println!(
        "{}• Total events:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        events.len(),
        RESET
    );
    println!("{}• Stored days:{} {}", CYAN, RESET, days.len());

    //
    // 3) DATE RANGE
    //
    let fmt_first = days
        .first()
        .map(|d| d.to_string())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = days
        .last()
        .map(|d| d.to_string())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE EVENTS/DAY
    //
    if !days.is_empty() {
        let avg = events.len() as f64 / days.len() as f64;
        println!("{}• Average events/day:{} {:.2}", CYAN, RESET, avg);
    }

    //
    // 5) BLOB SIZES
    //
    let conn = repo.conn();
    println!("{}• Blob sizes:{}", CYAN, RESET);
    println!("    {:<24} {}", MEMBERS_KEY, blob_len(conn, MEMBERS_KEY)?);
    println!(
        "    {:<24} {}",
        ALL_ATTENDANCE_KEY,
        blob_len(conn, ALL_ATTENDANCE_KEY)?
    );

    println!();
    Ok(())
}

/// Keys of stored collections that do not decode into their record type.
pub fn corrupt_collections(repo: &Repository) -> AppResult<Vec<String>> {
    let conn = repo.conn();
    let mut bad = Vec::new();

    if !decodes::<Member>(conn, MEMBERS_KEY)? {
        bad.push(MEMBERS_KEY.to_string());
    }

    let mut event_keys = vec![ALL_ATTENDANCE_KEY.to_string()];
    event_keys.extend(keys_with_prefix(conn, DAY_KEY_PREFIX)?);

    for key in event_keys {
        if !decodes::<AttendanceEvent>(conn, &key)? {
            bad.push(key);
        }
    }
    Ok(bad)
}

fn decodes<T: DeserializeOwned>(conn: &Connection, key: &str) -> AppResult<bool> {
    let raw = read_blob(conn, key)?;
    match decode_collection::<T>(key, raw.as_deref(), CorruptPolicy::Fail) {
        Ok(_) => Ok(true),
        Err(AppError::CorruptCollection { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Print the result of [`corrupt_collections`].
pub fn print_collection_check(repo: &Repository) -> AppResult<bool> {
    let bad = corrupt_collections(repo)?;

    if bad.is_empty() {
        println!("{}✔ All stored collections parse.{}", GREEN, RESET);
        return Ok(true);
    }

    for key in &bad {
        println!("{}✘ Corrupt collection:{} {}", RED, RESET, key);
    }
    Ok(false)
}
