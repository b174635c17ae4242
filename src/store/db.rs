//! SQLite stash database
//!
//! One embedded database file holds both storage areas: the artifact table
//! (latest payload per name) and the append-only download history.

use std::fmt;
use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

use super::artifact::ArtifactStore;
use super::history::HistoryLedger;
use crate::db_path;

/// Schema version stamped into `PRAGMA user_version` when the database is
/// first created.
const SCHEMA_VERSION: i64 = 1;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The database could not be opened or its schema initialized. Nothing
    /// can be read or written until the cause is fixed.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Open handle to the stash database.
///
/// Opening is lazy and idempotent: the file and schema are created on first
/// use, and re-opening an existing database leaves its contents untouched.
/// The handle is not shared; each action opens its own.
#[derive(Debug)]
pub struct Db {
    pub(crate) conn: Connection,
}

impl Db {
    /// Open or create the stash database at the default location.
    pub fn open() -> Result<Self, StoreError> {
        let path = db_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        Self::open_at(&path)
    }

    /// Open the database at a specific path (for testing)
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| unavailable(path, &e))?;

        // WAL: a reader (share/export) does not block the writer (fetch).
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| unavailable(path, &e))?;

        let db = Self { conn };
        db.init_schema(path)?;
        Ok(db)
    }

    /// Initialize the schema.
    ///
    /// Both storage areas are created together on first open. Re-running
    /// against an initialized database is a no-op.
    fn init_schema(&self, path: &Path) -> Result<(), StoreError> {
        let version: i64 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(|e| unavailable(path, &e))?;

        if version > SCHEMA_VERSION {
            return Err(StoreError::Unavailable(format!(
                "{}: schema v{version} is newer than this build understands (v{SCHEMA_VERSION})",
                path.display()
            )));
        }

        self.conn
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS artifacts (
                    name         TEXT PRIMARY KEY,
                    content_type TEXT NOT NULL,
                    size         INTEGER NOT NULL,
                    sha256       TEXT NOT NULL,
                    stored_at    INTEGER NOT NULL,
                    data         BLOB NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_artifacts_stored_at ON artifacts(stored_at);

                CREATE TABLE IF NOT EXISTS history (
                    id   INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    size INTEGER NOT NULL,
                    url  TEXT NOT NULL,
                    date INTEGER NOT NULL
                );
                ",
            )
            .map_err(|e| unavailable(path, &e))?;

        if version < SCHEMA_VERSION {
            self.conn
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .map_err(|e| unavailable(path, &e))?;
        }

        Ok(())
    }

    /// View over the artifact table.
    pub fn artifacts(&self) -> ArtifactStore<'_> {
        ArtifactStore::new(self)
    }

    /// View over the download history.
    pub fn history(&self) -> HistoryLedger<'_> {
        HistoryLedger::new(self)
    }
}

fn unavailable(path: &Path, cause: &dyn fmt::Display) -> StoreError {
    StoreError::Unavailable(format!("{}: {cause}", path.display()))
}
