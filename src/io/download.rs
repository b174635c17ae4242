//! Download module
//!
//! Streams a remote package into memory with an optional caller-imposed
//! size ceiling. Redirect handling and TLS stay inside the HTTP client.

use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;

use crate::{APK_CONTENT_TYPE, USER_AGENT};

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Payload too large: {actual} bytes exceeds the {limit} byte limit")]
    TooLarge { limit: u64, actual: u64 },
}

/// Never pre-size the buffer past this; the length header is only a hint.
const PREALLOC_CEILING: u64 = 32 * 1024 * 1024;

/// Fetch a package into memory.
///
/// When the server announces a content length it is used to pre-size the
/// buffer and to fail early against `max_size`; the ceiling is enforced
/// again while streaming for servers that lie or omit the header.
pub async fn fetch_package(
    client: &Client,
    url: &str,
    max_size: Option<u64>,
) -> Result<Vec<u8>, DownloadError> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .header(reqwest::header::ACCEPT, APK_CONTENT_TYPE)
        .send()
        .await?
        .error_for_status()?;

    let announced = response.content_length();
    if let (Some(limit), Some(actual)) = (max_size, announced) {
        if actual > limit {
            return Err(DownloadError::TooLarge { limit, actual });
        }
    }

    let capacity = announced.unwrap_or(0).min(PREALLOC_CEILING) as usize;
    let mut payload = Vec::with_capacity(capacity);
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let received = payload.len() as u64 + chunk.len() as u64;
        if let Some(limit) = max_size {
            if received > limit {
                return Err(DownloadError::TooLarge { limit, actual: received });
            }
        }
        payload.extend_from_slice(&chunk);
    }

    tracing::debug!(url, bytes = payload.len(), "download complete");

    Ok(payload)
}
