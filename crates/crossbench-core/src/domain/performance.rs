//! Enriched per-model attributes and the recency tier derived from them.

use serde::{Deserialize, Serialize};

/// Price value meaning "unknown"; such records are excluded from price views.
pub const PRICE_UNKNOWN: f64 = 999_999.0;

/// Whether a price is the unknown sentinel.
pub fn is_price_unknown(price: f64) -> bool {
    price >= PRICE_UNKNOWN
}

/// Coarse freshness bucket: 3 (≤30 days) down to 0 (>180 days).
///
/// Both the confidence recency bonus and the ranking tie-break read this.
pub fn recency_tier_for(staleness_days: u32) -> u8 {
    match staleness_days {
        0..=30 => 3,
        31..=90 => 2,
        91..=180 => 1,
        _ => 0,
    }
}

/// Attributes supplied by the enrichment collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PerformanceMetrics {
    /// Reasoning aptitude in [0,1].
    pub reasoning_score: f64,
    /// Coding aptitude in [0,1].
    pub coding_score: f64,
    /// Creative/generation aptitude in [0,1].
    pub creative_score: f64,
    /// Context window in tokens.
    pub context_window: f64,
    /// USD per million input tokens; [`PRICE_UNKNOWN`] when not known.
    pub price_per_million_input: f64,
    pub tokens_per_second: f64,
    pub is_open_source: bool,
    pub is_enterprise_ready: bool,
    /// Organization maturity in [0,1].
    pub org_maturity: f64,
    /// Uptime SLA in [0,1].
    pub uptime_sla: f64,
    /// Days since the model was last updated or released.
    pub staleness_days: u32,
}

impl PerformanceMetrics {
    pub fn recency_tier(&self) -> u8 {
        recency_tier_for(self.staleness_days)
    }

    pub fn price_known(&self) -> bool {
        !is_price_unknown(self.price_per_million_input)
    }
}
