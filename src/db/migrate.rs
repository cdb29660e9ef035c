use crate::db::log::ttlog;
use rusqlite::{Connection, OptionalExtension, Result};
use tracing::debug;

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Has the migration `version` already been recorded in the log table?
fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    ttlog(conn, "migration_applied", version, message)
}

/// Key/value blob store holding the JSON collections.
fn create_storage_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS storage (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Index the log by operation so `migration_applied` lookups stay cheap.
fn create_log_operation_index(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_log_operation ON log(operation, target);")?;
    Ok(())
}

type Step = fn(&Connection) -> Result<()>;

const MIGRATIONS: [(&str, &str, Step); 2] = [
    (
        "20260301_0001_create_storage",
        "Created storage table for member and attendance collections",
        create_storage_table,
    ),
    (
        "20260301_0002_index_log_operation",
        "Indexed log(operation, target)",
        create_log_operation_index,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Every step is idempotent; applied versions are recorded in `log`.
/// Returns the versions applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();

    for (version, message, step) in MIGRATIONS {
        if is_applied(conn, version)? {
            // Steps are cheap and idempotent; re-run them in case the table was dropped.
            step(conn)?;
            continue;
        }

        step(conn)?;
        mark_applied(conn, version, message)?;
        debug!(version, "migration applied");
        applied.push(version);
    }

    Ok(applied)
}
