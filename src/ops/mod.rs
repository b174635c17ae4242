pub mod context;
pub mod error;
pub mod fetch;

pub use context::Context;
pub use error::FetchError;
pub use fetch::{FetchOptions, FetchOutcome};
