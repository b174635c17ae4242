//! Artifact store
//!
//! Keeps the latest stored payload per package name. A `put` under an
//! existing name replaces that payload; there is at most one row per name.

use chrono::Utc;
use rusqlite::{OptionalExtension, Row, params};
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::db::{Db, StoreError};
use crate::types::ArtifactName;

/// Metadata for one stored artifact.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactMeta {
    pub name: String,
    pub content_type: String,
    pub size: u64,
    /// Hex digest of the payload, computed at store time.
    pub sha256: String,
    /// Unix milliseconds, assigned by the store at write time.
    pub stored_at: i64,
}

/// A stored artifact, payload included.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub meta: ArtifactMeta,
    pub data: Vec<u8>,
}

/// View over the artifact table of an open [`Db`].
#[derive(Debug)]
pub struct ArtifactStore<'a> {
    db: &'a Db,
}

impl<'a> ArtifactStore<'a> {
    pub(crate) fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Insert or overwrite the payload stored under `name`.
    ///
    /// Size, digest, and the recency timestamp are assigned here, not by
    /// the caller. Returns the metadata as written.
    pub fn put(
        &self,
        name: &ArtifactName,
        content_type: &str,
        data: &[u8],
    ) -> Result<ArtifactMeta, StoreError> {
        let meta = ArtifactMeta {
            name: name.as_str().to_string(),
            content_type: content_type.to_string(),
            size: data.len() as u64,
            sha256: hex::encode(Sha256::digest(data)),
            stored_at: Utc::now().timestamp_millis(),
        };

        self.db.conn.execute(
            "INSERT OR REPLACE INTO artifacts (name, content_type, size, sha256, stored_at, data)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                meta.name,
                meta.content_type,
                meta.size as i64,
                meta.sha256,
                meta.stored_at,
                data
            ],
        )?;

        Ok(meta)
    }

    /// Fetch one artifact with its payload. `None` when nothing is stored
    /// under `name`.
    pub fn get(&self, name: &str) -> Result<Option<Artifact>, StoreError> {
        self.db
            .conn
            .query_row(
                "SELECT name, content_type, size, sha256, stored_at, data
                 FROM artifacts WHERE name = ?1",
                params![name],
                row_to_artifact,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Metadata for one artifact, without loading its payload.
    pub fn stat(&self, name: &str) -> Result<Option<ArtifactMeta>, StoreError> {
        self.db
            .conn
            .query_row(
                "SELECT name, content_type, size, sha256, stored_at
                 FROM artifacts WHERE name = ?1",
                params![name],
                row_to_meta,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Every stored artifact with its payload, oldest first. The last
    /// element is the most recently stored one.
    pub fn get_all(&self) -> Result<Vec<Artifact>, StoreError> {
        let mut stmt = self.db.conn.prepare(
            "SELECT name, content_type, size, sha256, stored_at, data
             FROM artifacts ORDER BY stored_at ASC, rowid ASC",
        )?;

        let artifacts = stmt.query_map([], row_to_artifact)?;

        artifacts.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Metadata for every stored artifact, oldest first.
    pub fn list(&self) -> Result<Vec<ArtifactMeta>, StoreError> {
        let mut stmt = self.db.conn.prepare(
            "SELECT name, content_type, size, sha256, stored_at
             FROM artifacts ORDER BY stored_at ASC, rowid ASC",
        )?;

        let metas = stmt.query_map([], row_to_meta)?;

        metas.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// The most recently stored artifact, or `None` for an empty store.
    ///
    /// Recency is the tracked `stored_at` column; rowid breaks ties between
    /// writes that land on the same millisecond.
    pub fn latest(&self) -> Result<Option<Artifact>, StoreError> {
        self.db
            .conn
            .query_row(
                "SELECT name, content_type, size, sha256, stored_at, data
                 FROM artifacts ORDER BY stored_at DESC, rowid DESC LIMIT 1",
                [],
                row_to_artifact,
            )
            .optional()
            .map_err(Into::into)
    }
}

fn row_to_meta(row: &Row<'_>) -> rusqlite::Result<ArtifactMeta> {
    Ok(ArtifactMeta {
        name: row.get(0)?,
        content_type: row.get(1)?,
        size: row.get::<_, i64>(2)? as u64,
        sha256: row.get(3)?,
        stored_at: row.get(4)?,
    })
}

fn row_to_artifact(row: &Row<'_>) -> rusqlite::Result<Artifact> {
    Ok(Artifact {
        meta: row_to_meta(row)?,
        data: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::APK_CONTENT_TYPE;
    use crate::store::Db;
    use tempfile::tempdir;

    fn open_db(dir: &tempfile::TempDir) -> Db {
        Db::open_at(&dir.path().join("stash.db")).unwrap()
    }

    fn name(s: &str) -> ArtifactName {
        ArtifactName::new(s).unwrap()
    }

    #[test]
    fn test_put_then_enumerate() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);
        let store = db.artifacts();

        store.put(&name("app.apk"), APK_CONTENT_TYPE, &[7u8; 1024]).unwrap();

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].meta.name, "app.apk");
        assert_eq!(all[0].meta.size, 1024);
        assert_eq!(all[0].meta.content_type, APK_CONTENT_TYPE);
        assert_eq!(all[0].data, vec![7u8; 1024]);
    }

    #[test]
    fn test_put_overwrites_same_name() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);
        let store = db.artifacts();

        let first = store.put(&name("app.apk"), APK_CONTENT_TYPE, b"first payload").unwrap();
        let second = store.put(&name("app.apk"), APK_CONTENT_TYPE, b"second").unwrap();

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].data, b"second");
        assert_eq!(all[0].meta.size, 6);
        assert_ne!(first.sha256, second.sha256);
    }

    #[test]
    fn test_latest_follows_writes() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);
        let store = db.artifacts();

        store.put(&name("a.apk"), APK_CONTENT_TYPE, b"aaa").unwrap();
        store.put(&name("b.apk"), APK_CONTENT_TYPE, b"bbb").unwrap();
        assert_eq!(store.latest().unwrap().unwrap().meta.name, "b.apk");

        // Overwriting an older name refreshes its recency.
        store.put(&name("a.apk"), APK_CONTENT_TYPE, b"aaa2").unwrap();
        assert_eq!(store.latest().unwrap().unwrap().meta.name, "a.apk");
    }

    #[test]
    fn test_enumeration_is_oldest_first() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);
        let store = db.artifacts();

        store.put(&name("a.apk"), APK_CONTENT_TYPE, b"aaa").unwrap();
        store.put(&name("b.apk"), APK_CONTENT_TYPE, b"bbb").unwrap();
        store.put(&name("c.apk"), APK_CONTENT_TYPE, b"ccc").unwrap();

        let names: Vec<_> = store.list().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["a.apk", "b.apk", "c.apk"]);
    }

    #[test]
    fn test_get_and_stat_miss_return_none() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);

        assert!(db.artifacts().get("missing.apk").unwrap().is_none());
        assert!(db.artifacts().stat("missing.apk").unwrap().is_none());
    }

    #[test]
    fn test_put_records_payload_digest() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);
        let store = db.artifacts();

        let meta = store.put(&name("app.apk"), APK_CONTENT_TYPE, b"hello").unwrap();
        assert_eq!(meta.sha256, hex::encode(Sha256::digest(b"hello")));

        let stat = store.stat("app.apk").unwrap().unwrap();
        assert_eq!(stat.sha256, meta.sha256);
        assert_eq!(stat.stored_at, meta.stored_at);
    }
}
