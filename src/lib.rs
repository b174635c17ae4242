//! apkstash - a local stash for Android packages
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
//!
//! Fetch APKs by URL, keep them in a single-file stash, and hand them back
//! out to whatever installer or opener should receive them next.
//!
//! # Architecture
//!
//! - **Explicit handle**: the database is opened per action and threaded
//!   into its [`store::ArtifactStore`] and [`store::HistoryLedger`] views.
//!   There is no global connection.
//! - **Tracked recency**: "the latest package" reads an indexed timestamp
//!   column assigned at write time, never the engine's enumeration order.
//! - **Typed errors**: each collaborator (download, store, share) reports
//!   its own error enum; commands translate them at the action boundary.
//!
//! # Directory Layout
//!
//! ```text
//! ~/.apkstash/
//! ├── stash.db    # SQLite database: artifacts + download history
//! └── exports/    # packages staged for sharing or export
//! ```

pub mod cmd;
pub mod io;
pub mod ops;
pub mod store;
pub mod types;
pub mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dirs::home_dir;

/// User agent sent with every download request.
pub const USER_AGENT: &str = concat!("apkstash/", env!("CARGO_PKG_VERSION"));

/// Content type recorded for every stored artifact.
pub const APK_CONTENT_TYPE: &str = "application/vnd.android.package-archive";

/// Fallback artifact name when a URL has no usable final path segment.
pub const DEFAULT_ARTIFACT_NAME: &str = "app.apk";

/// Returns the stash home directory, or `None` if it cannot be determined.
///
/// `APKSTASH_HOME` overrides the default of `~/.apkstash`.
pub fn try_stash_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("APKSTASH_HOME") {
        return Some(PathBuf::from(home));
    }
    home_dir().map(|home| home.join(".apkstash"))
}

/// Returns the canonical stash home directory (`~/.apkstash`).
///
/// # Panics
/// Panics if the home directory cannot be determined.
pub fn stash_home() -> PathBuf {
    try_stash_home().expect("Could not determine home directory")
}

/// SQLite database path: ~/.apkstash/stash.db
pub fn db_path() -> PathBuf {
    stash_home().join("stash.db")
}

/// Staging directory for shared and exported packages: ~/.apkstash/exports
pub fn exports_path() -> PathBuf {
    stash_home().join("exports")
}

/// Command-line interface for apkstash
#[derive(Debug, Parser)]
#[command(name = "apkstash")]
#[command(version, about = "Fetch, stash, and share Android packages")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download a package and save it to the stash
    Fetch {
        /// Package URL (e.g. https://example.com/app.apk)
        url: String,

        /// Store under this name instead of the one derived from the URL
        #[arg(long)]
        name: Option<String>,

        /// Refuse payloads larger than this many MiB
        #[arg(long, value_name = "MIB")]
        max_size: Option<u64>,

        /// Fetch even if the URL does not point at an .apk file
        #[arg(long)]
        force: bool,
    },

    /// Hand a stashed package to the system opener
    Share {
        /// Package name (defaults to the most recently stored)
        name: Option<String>,

        /// Opener program to use instead of the platform default
        #[arg(long, env = "APKSTASH_OPENER")]
        via: Option<String>,
    },

    /// Write a stashed package back to disk
    Export {
        /// Package name (defaults to the most recently stored)
        name: Option<String>,

        /// Destination file or directory (defaults to the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List stashed packages
    List {
        /// Machine-readable JSON output
        #[arg(long)]
        json: bool,
    },

    /// Show the download history
    History {
        /// Machine-readable JSON output
        #[arg(long)]
        json: bool,
    },

    /// Show details for one stashed package
    Info {
        /// Package name
        name: String,
    },

    /// Re-hash a stashed package and compare against the recorded digest
    Verify {
        /// Package name (defaults to the most recently stored)
        name: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
