//! Fetch command

use anyhow::{Context, Result, bail};

use crate::ops::{self, FetchOptions};
use crate::ui::format_size;

/// Download a package by URL and save it to the stash
pub async fn fetch(
    url: &str,
    name: Option<&str>,
    max_size_mib: Option<u64>,
    force: bool,
) -> Result<()> {
    if !force && !looks_like_apk_url(url) {
        bail!("'{url}' does not point at an .apk file - pass --force to fetch it anyway");
    }

    println!("Fetching {url}...");

    let ctx = ops::Context::open().context("Failed to open stash database")?;
    let opts = FetchOptions {
        name: name.map(str::to_string),
        max_size: max_size_mib.map(mib_to_bytes),
    };

    let outcome = ops::fetch::fetch_and_store(&ctx, url, &opts)
        .await
        .context("Fetch failed")?;

    println!("Saved {} ({})", outcome.meta.name, format_size(outcome.meta.size));
    println!("Run 'apkstash share' to hand it to an installer.");

    Ok(())
}

/// True when the URL's path (query and fragment aside) names an .apk file.
fn looks_like_apk_url(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or("");
    path.to_ascii_lowercase().ends_with(".apk")
}

/// MiB from the command line to bytes; absurd values cap at `u64::MAX`.
fn mib_to_bytes(mib: u64) -> u64 {
    mib.saturating_mul(1024 * 1024)
}
