//! Shared operation context.
//!
//! Groups the open database handle and the HTTP client so operations take
//! one argument instead of a growing list.

use reqwest::Client;

use crate::store::{Db, StoreError};

/// State threaded through stash operations.
///
/// Owns the database handle for the duration of one action; nothing here
/// is global or shared across threads.
#[derive(Debug)]
pub struct Context {
    pub db: Db,
    pub client: Client,
}

impl Context {
    pub fn new(db: Db, client: Client) -> Self {
        Self { db, client }
    }

    /// Open the default database and a fresh HTTP client.
    pub fn open() -> Result<Self, StoreError> {
        Ok(Self::new(Db::open()?, Client::new()))
    }
}
