//! Fetch pipeline: download a package, stash it, record the download.

use crate::APK_CONTENT_TYPE;
use crate::io::download;
use crate::ops::{Context, FetchError};
use crate::store::ArtifactMeta;
use crate::types::ArtifactName;

/// Caller-side knobs for one fetch.
#[derive(Debug, Default)]
pub struct FetchOptions {
    /// Store under this name instead of the URL-derived one.
    pub name: Option<String>,
    /// Refuse payloads larger than this many bytes.
    pub max_size: Option<u64>,
}

/// What a completed fetch produced.
#[derive(Debug)]
pub struct FetchOutcome {
    pub meta: ArtifactMeta,
    /// Id the ledger assigned to the download record.
    pub history_id: i64,
}

/// Download `url` and record the result: one upsert into the artifact
/// store, one append to the history ledger.
///
/// The two writes are independent. The ledger logs download events; it is
/// not a projection of the store, so an overwrite leaves earlier history
/// intact.
pub async fn fetch_and_store(
    ctx: &Context,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchOutcome, FetchError> {
    let name = match &opts.name {
        Some(explicit) => ArtifactName::new(explicit)?,
        None => ArtifactName::derive(url),
    };

    tracing::debug!(%name, url, "fetching package");
    let payload = download::fetch_package(&ctx.client, url, opts.max_size).await?;

    let meta = ctx.db.artifacts().put(&name, APK_CONTENT_TYPE, &payload)?;
    let history_id = ctx.db.history().append(&meta.name, meta.size, url)?;

    tracing::info!(name = %meta.name, size = meta.size, history_id, "package stashed");

    Ok(FetchOutcome { meta, history_id })
}
