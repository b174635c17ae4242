//! Export command

use std::path::Path;

use anyhow::{Context, Result};

use crate::io::export::write_artifact;
use crate::store::Db;
use crate::ui::format_size;

/// Write a stashed package (the latest one by default) back to disk
pub fn export(name: Option<&str>, out: Option<&Path>) -> Result<()> {
    let db = Db::open().context("Failed to open stash database")?;
    let store = db.artifacts();

    let artifact = match name {
        Some(n) => Some(
            store
                .get(n)?
                .with_context(|| format!("No package named '{n}' in the stash"))?,
        ),
        None => store.latest()?,
    };

    let Some(artifact) = artifact else {
        println!("No packages saved yet.");
        println!("Run 'apkstash fetch <url>' to get started.");
        return Ok(());
    };

    let dest = out.unwrap_or_else(|| Path::new("."));
    let written = write_artifact(&artifact, dest)
        .with_context(|| format!("Failed to write under {}", dest.display()))?;

    println!(
        "Exported {} ({}) to {}",
        artifact.meta.name,
        format_size(artifact.meta.size),
        written.display()
    );

    Ok(())
}
