//! CrossBench record retrieval
//!
//! Fetches the raw leaderboard payload over HTTP (or from a saved snapshot)
//! with a fixed-delay retry policy and a per-attempt timeout.

pub mod config;
pub mod error;
pub mod retry;
pub mod source;

pub use config::{FetchConfig, DEFAULT_ENDPOINT, ENDPOINT_ENV};
pub use error::{FetchError, FetchResult};
pub use retry::{fetch_with_retry, Fetched};
pub use source::{FileSource, HttpSource, RecordSource};
