//! Verify command

use anyhow::{Context, Result, bail};
use sha2::{Digest, Sha256};

use crate::store::Db;

/// Re-hash a stashed package and compare against the recorded digest
pub fn verify(name: Option<&str>) -> Result<()> {
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

    let actual = hex::encode(Sha256::digest(&artifact.data));

    if actual != artifact.meta.sha256 {
        bail!(
            "Digest mismatch for '{}': recorded {}, recomputed {actual}",
            artifact.meta.name,
            artifact.meta.sha256
        );
    }

    println!("{}: OK ({actual})", artifact.meta.name);

    Ok(())
}
