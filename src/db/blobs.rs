//! Name-keyed text blob store on top of the `storage` table.
//!
//! Functions take a plain `&Connection` so they work both on the pool
//! connection and inside a `Transaction` (which derefs to `Connection`).

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

pub fn read_blob(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let value = conn
        .prepare_cached("SELECT value FROM storage WHERE key = ?1")?
        .query_row([key], |row| row.get::<_, String>(0))
        .optional()?;
    Ok(value)
}

/// Replace the whole blob stored under `key`.
pub fn write_blob(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();
    conn.prepare_cached(
        "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )?
    .execute(params![key, value, now])?;
    Ok(())
}

pub fn delete_blob(conn: &Connection, key: &str) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM storage WHERE key = ?1", [key])?;
    Ok(n > 0)
}

/// All keys starting with `prefix`, sorted ascending.
pub fn keys_with_prefix(conn: &Connection, prefix: &str) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT key FROM storage WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key ASC",
    )?;
    let rows = stmt.query_map([prefix], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Length in characters of the blob under `key` (0 when absent).
pub fn blob_len(conn: &Connection, key: &str) -> AppResult<usize> {
    let len: Option<i64> = conn
        .query_row(
            "SELECT length(value) FROM storage WHERE key = ?1",
            [key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(len.unwrap_or(0).max(0) as usize)
}
