//! Repository over the three persisted collections.
//!
//! Layout of the `storage` table:
//! - `library_members`          → JSON array of [`Member`]
//! - `all_attendance`           → JSON array of every [`AttendanceEvent`]
//! - `attendance_<YYYY-MM-DD>`  → JSON array of that local day's events
//!
//! Every write replaces a whole collection. Operations touching more than
//! one blob run in a single `BEGIN IMMEDIATE` transaction, so the day blob and
//! the full history move together and concurrent processes queue on the
//! SQLite write lock instead of overwriting each other.

use crate::config::{Config, CorruptPolicy};
use crate::db::blobs::{keys_with_prefix, read_blob, write_blob};
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceEvent, Member};
use chrono::NaiveDate;
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub const MEMBERS_KEY: &str = "library_members";
pub const ALL_ATTENDANCE_KEY: &str = "all_attendance";
pub const DAY_KEY_PREFIX: &str = "attendance_";

/// Storage key of the day-scoped attendance collection.
pub fn day_key(day: NaiveDate) -> String {
    format!("{DAY_KEY_PREFIX}{}", day.format("%Y-%m-%d"))
}

/// Inverse of [`day_key`]; `None` for unrelated keys.
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    let raw = key.strip_prefix(DAY_KEY_PREFIX)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

pub struct Repository {
    pool: DbPool,
    policy: CorruptPolicy,
}

impl Repository {
    /// Open (and bootstrap) the database at `path`.
    pub fn open(path: &str, policy: CorruptPolicy) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        debug!(path, "repository opened");
        Ok(Self { pool, policy })
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::open(&cfg.database, cfg.corrupt_policy)
    }

    pub fn in_memory(policy: CorruptPolicy) -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool, policy })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    pub fn policy(&self) -> CorruptPolicy {
        self.policy
    }

    /// Record an entry in the internal log table.
    pub fn log(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.pool.conn, operation, target, message)?;
        Ok(())
    }

    // ---------------------------
    // Member registry
    // ---------------------------

    pub fn members(&self) -> AppResult<Vec<Member>> {
        load_collection(&self.pool.conn, MEMBERS_KEY, self.policy)
    }

    pub fn find_member(&self, id: &str) -> AppResult<Option<Member>> {
        Ok(self.members()?.into_iter().find(|m| m.id == id))
    }

    /// Replace the whole registry.
    pub fn write_members(&mut self, members: &[Member]) -> AppResult<()> {
        store_collection(&self.pool.conn, MEMBERS_KEY, members)
    }

    /// Append a member built from the current registry, atomically.
    ///
    /// `build` sees the registry as stored at the time the write lock was
    /// taken, which is what makes id generation collision-free.
    pub fn insert_member<F>(&mut self, build: F) -> AppResult<Member>
    where
        F: FnOnce(&[Member]) -> AppResult<Member>,
    {
        let policy = self.policy;
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut members: Vec<Member> = load_collection(&tx, MEMBERS_KEY, policy)?;
        let member = build(&members)?;
        members.push(member.clone());
        store_collection(&tx, MEMBERS_KEY, &members)?;

        tx.commit()?;
        debug!(id = %member.id, total = members.len(), "member appended");
        Ok(member)
    }

    /// Hard-remove a member. Attendance events are left untouched.
    pub fn remove_member(&mut self, id: &str) -> AppResult<Option<Member>> {
        let policy = self.policy;
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut members: Vec<Member> = load_collection(&tx, MEMBERS_KEY, policy)?;
        let removed = members
            .iter()
            .position(|m| m.id == id)
            .map(|idx| members.remove(idx));

        if removed.is_some() {
            store_collection(&tx, MEMBERS_KEY, &members)?;
        }

        tx.commit()?;
        Ok(removed)
    }

    // ---------------------------
    // Attendance log
    // ---------------------------

    /// Full attendance history, in insertion order.
    pub fn attendance(&self) -> AppResult<Vec<AttendanceEvent>> {
        load_collection(&self.pool.conn, ALL_ATTENDANCE_KEY, self.policy)
    }

    pub fn attendance_for_day(&self, day: NaiveDate) -> AppResult<Vec<AttendanceEvent>> {
        load_collection(&self.pool.conn, &day_key(day), self.policy)
    }

    /// Replace the full history.
    pub fn write_attendance(&mut self, events: &[AttendanceEvent]) -> AppResult<()> {
        store_collection(&self.pool.conn, ALL_ATTENDANCE_KEY, events)
    }

    /// Replace one day-scoped collection.
    pub fn write_day(&mut self, day: NaiveDate, events: &[AttendanceEvent]) -> AppResult<()> {
        store_collection(&self.pool.conn, &day_key(day), events)
    }

    /// Days that have a stored day-scoped collection, ascending.
    pub fn stored_days(&self) -> AppResult<Vec<NaiveDate>> {
        Ok(keys_with_prefix(&self.pool.conn, DAY_KEY_PREFIX)?
            .iter()
            .filter_map(|k| parse_day_key(k))
            .collect())
    }

    /// Derive a new event from the day's collection and append it to both the
    /// day collection and the full history in one transaction.
    pub fn append_attendance<F>(&mut self, day: NaiveDate, derive: F) -> AppResult<AttendanceEvent>
    where
        F: FnOnce(&[AttendanceEvent]) -> AppResult<AttendanceEvent>,
    {
        let policy = self.policy;
        let key = day_key(day);
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut today: Vec<AttendanceEvent> = load_collection(&tx, &key, policy)?;
        let event = derive(&today)?;

        today.push(event.clone());
        store_collection(&tx, &key, &today)?;

        let mut all: Vec<AttendanceEvent> = load_collection(&tx, ALL_ATTENDANCE_KEY, policy)?;
        all.push(event.clone());
        store_collection(&tx, ALL_ATTENDANCE_KEY, &all)?;

        tx.commit()?;
        debug!(id = %event.id, kind = %event.kind, day = %day, "attendance appended");
        Ok(event)
    }
}

/// Load a JSON collection. A missing blob is an empty collection; a corrupt
/// one follows `policy`.
pub fn load_collection<T: DeserializeOwned>(
    conn: &Connection,
    key: &str,
    policy: CorruptPolicy,
) -> AppResult<Vec<T>> {
    decode_collection(key, read_blob(conn, key)?.as_deref(), policy)
}

pub fn decode_collection<T: DeserializeOwned>(
    key: &str,
    raw: Option<&str>,
    policy: CorruptPolicy,
) -> AppResult<Vec<T>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(raw) {
        Ok(items) => Ok(items),
        Err(e) => match policy {
            CorruptPolicy::Reset => {
                warn!(key, error = %e, "corrupt collection treated as empty");
                Ok(Vec::new())
            }
            CorruptPolicy::Fail => Err(AppError::CorruptCollection {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        },
    }
}

fn store_collection<T: Serialize>(conn: &Connection, key: &str, items: &[T]) -> AppResult<()> {
    let json = serde_json::to_string(items)?;
    write_blob(conn, key, &json)
}
