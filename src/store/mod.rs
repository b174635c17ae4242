//! Persistent state: one SQLite database, two storage areas.

pub mod artifact;
pub mod db;
pub mod history;

pub use artifact::{Artifact, ArtifactMeta, ArtifactStore};
pub use db::{Db, StoreError};
pub use history::{HistoryEntry, HistoryLedger};
