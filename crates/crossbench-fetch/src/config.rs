//! Retrieval settings.

use serde::{Deserialize, Serialize};

/// Live leaderboard endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://api.zeroeval.com/leaderboard/models/full?justCanonicals=true";

pub const ENDPOINT_ENV: &str = "CROSSBENCH_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    pub endpoint: String,
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Fixed pause between attempts (milliseconds).
    pub retry_delay_ms: u64,
    /// Limit for a single attempt (milliseconds).
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_attempts: 3,
            retry_delay_ms: 2_000,
            timeout_ms: 30_000,
            user_agent: concat!("crossbench/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    /// Defaults, with the endpoint taken from `CROSSBENCH_ENDPOINT` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint;
            }
        }
        config
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = FetchConfig::default();
        assert_eq!(cfg.max_attempts, 3);
        assert_eq!(cfg.retry_delay_ms, 2_000);
        assert_eq!(cfg.timeout_ms, 30_000);
        assert!(cfg.endpoint.starts_with("https://api.zeroeval.com/"));
        assert!(cfg.user_agent.starts_with("crossbench/"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: FetchConfig = serde_json::from_str(r#"{"max_attempts": 5}"#).unwrap();
        assert_eq!(cfg.max_attempts, 5);
        assert_eq!(cfg.retry_delay_ms, 2_000);
    }
}
