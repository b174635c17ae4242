//! Domain-specific errors for stash operations

use thiserror::Error;

use crate::io::download::DownloadError;
use crate::store::StoreError;
use crate::types::InvalidName;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("Storage failed: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Name(#[from] InvalidName),
}
