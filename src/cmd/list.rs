//! List command

use anyhow::{Context, Result};

use crate::store::Db;
use crate::ui::{format_relative_time, format_size};

/// List all stashed packages
pub fn list(json: bool) -> Result<()> {
    let db = Db::open().context("Failed to open stash database")?;

    let packages = db.artifacts().list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&packages)?);
        return Ok(());
    }

    if packages.is_empty() {
        println!("No packages saved.");
        println!("Run 'apkstash fetch <url>' to get started.");
        return Ok(());
    }

    println!("📋 Stashed packages:");
    for pkg in packages {
        let ago = format_relative_time(pkg.stored_at);
        println!("  {} {} (stored {ago})", pkg.name, format_size(pkg.size));
    }

    Ok(())
}
