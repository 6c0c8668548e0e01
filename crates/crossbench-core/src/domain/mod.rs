//! Domain models for CrossBench.
//!
//! Canonical definitions for the core entities:
//! - `ModelEntity`: one evaluated model with its evidence and derived scores
//! - `Evidence` / `Signal`: weighted quality observations
//! - `PerformanceMetrics`: attributes supplied by enrichment
//! - `View` / `RankScores`: the eight ranking perspectives

pub mod entity;
pub mod error;
pub mod modality;
pub mod performance;
pub mod signal;
pub mod view;

// Re-export main types and errors
pub use entity::{Enrichment, ModelEntity, UNKNOWN_ORGANIZATION};
pub use error::{CrossbenchError, IngestError, Result};
pub use modality::{Modality, ModalitySet};
pub use performance::{is_price_unknown, recency_tier_for, PerformanceMetrics, PRICE_UNKNOWN};
pub use signal::{Evidence, Signal};
pub use view::{RankScores, ScoreScale, View, DISPLAY_MAX, TIE_THRESHOLD};
