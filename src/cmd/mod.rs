//! Command modules - one file per CLI command

pub mod completions;
pub mod export;
pub mod fetch;
pub mod history;
pub mod info;
pub mod list;
pub mod share;
pub mod verify;
