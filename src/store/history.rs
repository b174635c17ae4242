use chrono::Utc;
use rusqlite::params;
use serde::Serialize;

use super::db::{Db, StoreError};

/// One immutable download record.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// Assigned by the ledger, monotonically increasing.
    pub id: i64,
    pub name: String,
    pub size: u64,
    pub url: String,
    /// Unix milliseconds, assigned at append time.
    pub date: i64,
}

/// Append-only view over the download history of an open [`Db`].
///
/// Entries are never updated or deleted; repeated downloads of the same
/// name append distinct records.
#[derive(Debug)]
pub struct HistoryLedger<'a> {
    db: &'a Db,
}

impl<'a> HistoryLedger<'a> {
    pub(crate) fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Append one download record and return its assigned id.
    pub fn append(&self, name: &str, size: u64, url: &str) -> Result<i64, StoreError> {
        self.db.conn.execute(
            "INSERT INTO history (name, size, url, date) VALUES (?1, ?2, ?3, ?4)",
            params![name, size as i64, url, Utc::now().timestamp_millis()],
        )?;

        Ok(self.db.conn.last_insert_rowid())
    }

    /// Every recorded download, oldest first.
    pub fn get_all(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        let mut stmt = self
            .db
            .conn
            .prepare("SELECT id, name, size, url, date FROM history ORDER BY id ASC")?;

        let entries = stmt.query_map([], |row| {
            Ok(HistoryEntry {
                id: row.get(0)?,
                name: row.get(1)?,
                size: row.get::<_, i64>(2)? as u64,
                url: row.get(3)?,
                date: row.get(4)?,
            })
        })?;

        entries.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use crate::store::Db;
    use tempfile::tempdir;

    fn open_db(dir: &tempfile::TempDir) -> Db {
        Db::open_at(&dir.path().join("stash.db")).unwrap()
    }

    #[test]
    fn test_append_keeps_every_record() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);
        let ledger = db.history();

        ledger.append("app.apk", 100, "https://x.dev/app.apk").unwrap();
        ledger.append("app.apk", 120, "https://x.dev/app.apk").unwrap();

        // Same name twice: both events stay.
        let entries = ledger.get_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].size, 100);
        assert_eq!(entries[1].size, 120);
    }

    #[test]
    fn test_ids_increase_in_append_order() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);
        let ledger = db.history();

        let a = ledger.append("a.apk", 1, "https://x.dev/a.apk").unwrap();
        let b = ledger.append("b.apk", 2, "https://x.dev/b.apk").unwrap();
        let c = ledger.append("c.apk", 3, "https://x.dev/c.apk").unwrap();
        assert!(a < b && b < c);

        let ids: Vec<_> = ledger.get_all().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, [a, b, c]);
    }

    #[test]
    fn test_entries_round_trip_fields() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);
        let ledger = db.history();

        let id = ledger.append("tool.apk", 4096, "https://x.dev/dl/tool.apk").unwrap();

        let entries = ledger.get_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);
        assert_eq!(entries[0].name, "tool.apk");
        assert_eq!(entries[0].size, 4096);
        assert_eq!(entries[0].url, "https://x.dev/dl/tool.apk");
        assert!(entries[0].date > 0);
    }
}
