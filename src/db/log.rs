use chrono::Local;
use rusqlite::{Connection, Result, params};

/// Append an audit row to the `log` table, dated in RFC 3339 local time.
///
/// Shared by the schema steps and every recorded operation so the `date`
/// column has a single format.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> Result<()> {
    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message) VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![Local::now().to_rfc3339(), operation, target, message])?;
    Ok(())
}
