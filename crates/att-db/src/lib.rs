//! Storage layer for the attendance tracker.
//!
//! Persists the whole [`Snapshot`] as one JSON blob under a fixed key in a
//! small key-value table, using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A single operator session owns one `Database`; there is exactly one writer.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE kv (key TEXT PRIMARY KEY, value BLOB NOT NULL, updated_at TEXT NOT NULL);
//! ```
//!
//! `updated_at` is ISO 8601 UTC (e.g., `2025-01-15T10:30:00.000Z`).
//!
//! ## Snapshot Evolution
//!
//! The snapshot is stored as JSON. Missing record fields load with defaults,
//! so adding optional fields is safe. A blob that no longer parses loads as
//! absent through [`StateStore`], and the tracker starts from the seed.

use std::path::Path;

use att_core::{Snapshot, StateStore};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Key the snapshot blob is stored under.
pub const SNAPSHOT_KEY: &str = "attendance_snapshot";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// The stored snapshot could not be encoded or decoded.
    #[error("invalid snapshot data: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Reads the raw bytes stored under `key`.
    pub fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>, DbError> {
        let blob = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| row.get(0))
            .optional()?;
        Ok(blob)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn put_blob(&mut self, key: &str, value: &[u8]) -> Result<(), DbError> {
        self.put_blob_at(key, value, Utc::now())
    }

    fn put_blob_at(&mut self, key: &str, value: &[u8], now: DateTime<Utc>) -> Result<(), DbError> {
        self.conn.execute(
            "
            INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
            params![key, value, format_timestamp(now)],
        )?;
        Ok(())
    }

    /// When the value under `key` was last written.
    pub fn updated_at(&self, key: &str) -> Result<Option<String>, DbError> {
        let updated_at = self
            .conn
            .query_row("SELECT updated_at FROM kv WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(updated_at)
    }

    /// Reads and decodes the stored snapshot.
    ///
    /// Unlike [`StateStore::load`], a corrupt blob is reported as an error.
    pub fn read_snapshot(&self) -> Result<Option<Snapshot>, DbError> {
        self.get_blob(SNAPSHOT_KEY)?
            .map(|blob| serde_json::from_slice(&blob))
            .transpose()
            .map_err(DbError::from)
    }

    /// Encodes and stores the snapshot.
    pub fn write_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), DbError> {
        let blob = serde_json::to_vec(snapshot)?;
        self.put_blob(SNAPSHOT_KEY, &blob)?;
        tracing::debug!(
            bytes = blob.len(),
            children = snapshot.children.len(),
            "snapshot saved"
        );
        Ok(())
    }
}

impl StateStore for Database {
    fn load(&self) -> Option<Snapshot> {
        self.read_snapshot()
            .inspect_err(|e| tracing::warn!(error = %e, "could not load snapshot, treating as absent"))
            .ok()
            .flatten()
    }

    fn save(&mut self, snapshot: &Snapshot) {
        if let Err(e) = self.write_snapshot(snapshot) {
            tracing::error!(error = %e, "failed to save snapshot");
        }
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
