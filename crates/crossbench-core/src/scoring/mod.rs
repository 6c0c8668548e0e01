//! Scoring engine: confidence, the eight ranking views, and view ordering.
//!
//! # Modules
//!
//! - [`config`]: `ScoringConfig` and its weight groups
//! - [`confidence`]: `estimate_confidence()` (10–99 trust estimate)
//! - [`ranking`]: `compute_rankings()` (eight view scores)
//! - [`ordering`]: `rank_by_view()` with the recency tie-break

pub mod config;
pub mod confidence;
pub mod ordering;
pub mod ranking;

pub use confidence::{
    estimate_confidence, ConfidenceEstimate, CONFIDENCE_CEILING, CONFIDENCE_FLOOR,
};
pub use config::{
    Ceilings, CodingWeights, ConfidenceWeights, EcosystemWeights, EnterpriseWeights,
    GenerationWeights, OverallWeights, QualityStep, ScoringConfig, SignalSource, SpeedWeights,
    ValueWeights,
};
pub use ordering::{listed_in_view, outranks, rank_by_price, rank_by_view, view_table};
pub use ranking::{compute_rankings, price_factor};
