//! Fixed-delay retry around a [`RecordSource`].

use std::time::Duration;

use tracing::{info, warn};

use crate::config::FetchConfig;
use crate::error::{FetchError, FetchResult};
use crate::source::RecordSource;

/// Payload plus the number of attempts it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub bytes: Vec<u8>,
    pub attempts: u32,
}

/// Fetch with up to `max_attempts` tries, `retry_delay_ms` apart.
///
/// Each attempt is bounded by `timeout_ms`. An empty body counts as a failed
/// attempt. No delay follows the last attempt.
pub async fn fetch_with_retry<S>(config: &FetchConfig, source: &S) -> FetchResult<Fetched>
where
    S: RecordSource + ?Sized,
{
    let max_attempts = config.max_attempts.max(1);
    let limit = Duration::from_millis(config.timeout_ms);
    let delay = Duration::from_millis(config.retry_delay_ms);
    let mut last = FetchError::EmptyBody;

    for attempt in 1..=max_attempts {
        let outcome = match tokio::time::timeout(limit, source.fetch()).await {
            Ok(Ok(bytes)) if bytes.is_empty() => Err(FetchError::EmptyBody),
            Ok(result) => result,
            Err(_elapsed) => Err(FetchError::Timeout {
                limit_ms: config.timeout_ms,
            }),
        };

        match outcome {
            Ok(bytes) => {
                info!(
                    event = "fetch.completed",
                    source = %source.describe(),
                    attempts = attempt,
                    bytes = bytes.len(),
                );
                return Ok(Fetched {
                    bytes,
                    attempts: attempt,
                });
            }
            Err(err) => {
                warn!(
                    event = "fetch.attempt_failed",
                    attempt = attempt,
                    max_attempts = max_attempts,
                    error = %err,
                );
                last = err;
                if attempt < max_attempts {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    Err(FetchError::Exhausted {
        attempts: max_attempts,
        last: Box::new(last),
    })
}
