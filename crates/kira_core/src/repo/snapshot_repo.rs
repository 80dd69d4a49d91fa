//! Snapshot repository contracts, SQLite and in-memory implementations.
//!
//! # Invariants
//! - `read_snapshot` returns `Ok(None)` for a key that was never written.
//! - `write_snapshot` is an upsert keyed by slot name.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Backend is unusable (e.g. a poisoned lock).
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "snapshot storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value slot used by the schedule store.
pub trait SnapshotRepository {
    fn read_snapshot(&self, key: &str) -> RepoResult<Option<String>>;
    fn write_snapshot(&self, key: &str, value: &str) -> RepoResult<()>;
}

impl<T: SnapshotRepository + ?Sized> SnapshotRepository for &T {
    fn read_snapshot(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_snapshot(key)
    }

    fn write_snapshot(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write_snapshot(key, value)
    }
}

/// SQLite-backed slot storage over the `kv_slots` table.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn read_snapshot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_snapshot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local slot storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySnapshotRepository {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage with one pre-populated slot.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            slots: Mutex::new(HashMap::from([(key.into(), value.into())])),
        }
    }
}

impl SnapshotRepository for MemorySnapshotRepository {
    fn read_snapshot(&self, key: &str) -> RepoResult<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|err| RepoError::Unavailable(format!("slot lock poisoned: {err}")))?;
        Ok(slots.get(key).cloned())
    }

    fn write_snapshot(&self, key: &str, value: &str) -> RepoResult<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|err| RepoError::Unavailable(format!("slot lock poisoned: {err}")))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
