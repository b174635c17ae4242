//! History command

use anyhow::{Context, Result};

use crate::store::Db;
use crate::ui::{format_size, format_timestamp};

/// Show the download history, oldest first
pub fn history(json: bool) -> Result<()> {
    let db = Db::open().context("Failed to open stash database")?;

    let entries = db.history().get_all()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No downloads recorded yet.");
        return Ok(());
    }

    println!("Download history:");
    println!("{}", str::repeat("-", 60));

    for entry in entries {
        println!(
            "[{}] {} ({}) from {}",
            format_timestamp(entry.date),
            entry.name,
            format_size(entry.size),
            entry.url
        );
    }
    println!();

    Ok(())
}
