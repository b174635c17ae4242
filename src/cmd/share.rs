//! Share command

use anyhow::{Context, Result};

use crate::io::export::stage_for_share;
use crate::io::share::{ShareError, share_file};
use crate::store::Db;

/// Hand a stashed package (the latest one by default) to the system opener
pub fn share(name: Option<&str>, via: Option<&str>) -> Result<()> {
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

    let staged = stage_for_share(&artifact).context("Failed to stage package for sharing")?;

    match share_file(via, &staged) {
        Ok(()) => {
            println!("Handed {} to the system opener.", artifact.meta.name);
            println!("Pick an installer there to finish.");
            Ok(())
        }
        // No opener on this system: the staged copy is the fallback.
        Err(ShareError::Unsupported) => {
            tracing::warn!("no share handler found, falling back to the staged copy");
            println!("No share handler available on this system.");
            println!("A copy of {} is ready at {}", artifact.meta.name, staged.display());
            Ok(())
        }
        // User interrupt is a normal outcome, not a failure.
        Err(ShareError::Cancelled) => {
            println!("Share cancelled.");
            Ok(())
        }
        Err(e) => {
            println!("A copy of {} is ready at {}", artifact.meta.name, staged.display());
            Err(e).context("Share failed")
        }
    }
}
