//! Info command

use anyhow::{Context, Result, bail};

use crate::store::Db;
use crate::ui::{format_size, format_timestamp};

/// Show details for one stashed package
pub fn info(name: &str) -> Result<()> {
    let db = Db::open().context("Failed to open stash database")?;

    let Some(meta) = db.artifacts().stat(name)? else {
        bail!("No package named '{name}' in the stash");
    };

    println!("📦 {}", meta.name);
    println!("  Size: {}", format_size(meta.size));
    println!("  Content type: {}", meta.content_type);
    println!("  SHA-256: {}", meta.sha256);
    println!("  Stored: {}", format_timestamp(meta.stored_at));

    Ok(())
}
