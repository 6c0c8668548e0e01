//! Error types for crossbench-fetch

use thiserror::Error;

/// Errors raised while retrieving the raw payload.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure or non-success status
    #[error("HTTP error: {0}")]
    Http(String),

    /// Local snapshot could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source answered with no bytes
    #[error("empty response body")]
    EmptyBody,

    /// A single attempt exceeded its time limit
    #[error("attempt timed out after {limit_ms}ms")]
    Timeout { limit_ms: u64 },

    /// Every attempt failed
    #[error("fetch failed after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<FetchError>,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err.to_string())
    }
}

/// Result type for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;
