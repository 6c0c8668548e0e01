//! Scoring weights and thresholds.
//!
//! [`ScoringConfig`] is an immutable value passed into every scoring call.
//! Nothing in the engine reads weights from global state, so tests and
//! alternate weight sets can run side by side.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::confidence::{CONFIDENCE_CEILING, CONFIDENCE_FLOOR};
use crate::domain::{CrossbenchError, Result};

/// A raw field that is offered as quality evidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalSource {
    /// Key in the raw record.
    pub field: String,
    /// Label stored on the resulting signal.
    pub label: String,
    pub weight: f64,
}

impl SignalSource {
    pub fn new(field: &str, label: &str, weight: f64) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            weight,
        }
    }
}

/// Overall view weights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverallWeights {
    pub core: f64,
    pub coding: f64,
    pub creative: f64,
    pub confidence: f64,
    pub price: f64,
}

impl Default for OverallWeights {
    fn default() -> Self {
        Self {
            core: 0.40,
            coding: 0.20,
            creative: 0.15,
            confidence: 0.15,
            price: 0.10,
        }
    }
}

/// Value view constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValueWeights {
    /// Multiplier applied to the aggregate score of free models.
    pub free_multiplier: f64,
    /// Added to `log10(price + 1)` to keep the denominator positive.
    pub log_offset: f64,
}

impl Default for ValueWeights {
    fn default() -> Self {
        Self {
            free_multiplier: 1000.0,
            log_offset: 0.1,
        }
    }
}

/// Coding view weights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodingWeights {
    pub coding: f64,
    pub reasoning: f64,
    pub context: f64,
    pub confidence: f64,
}

impl Default for CodingWeights {
    fn default() -> Self {
        Self {
            coding: 0.6,
            reasoning: 0.2,
            context: 0.1,
            confidence: 0.1,
        }
    }
}

/// Image and video view weights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationWeights {
    pub core: f64,
    pub creative: f64,
    pub speed: f64,
    pub confidence: f64,
    /// Factor applied to the video score of models without native video.
    pub video_fallback_factor: f64,
}

impl Default for GenerationWeights {
    fn default() -> Self {
        Self {
            core: 0.5,
            creative: 0.3,
            speed: 0.1,
            confidence: 0.1,
            video_fallback_factor: 0.3,
        }
    }
}

/// Speed view weights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpeedWeights {
    pub throughput: f64,
    pub confidence: f64,
    pub price: f64,
}

impl Default for SpeedWeights {
    fn default() -> Self {
        Self {
            throughput: 0.7,
            confidence: 0.2,
            price: 0.1,
        }
    }
}

/// Enterprise view weights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnterpriseWeights {
    pub confidence: f64,
    pub uptime: f64,
    pub maturity: f64,
}

impl Default for EnterpriseWeights {
    fn default() -> Self {
        Self {
            confidence: 0.4,
            uptime: 0.3,
            maturity: 0.3,
        }
    }
}

/// Normalization ceilings ("assumed maxima").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Ceilings {
    /// Context window (tokens) that maps to 1.0.
    pub context_tokens: f64,
    /// Throughput that maps to 1.0 in the image/video views.
    pub generation_tokens_per_sec: f64,
    /// Throughput that maps to 1.0 in the speed view.
    pub speed_tokens_per_sec: f64,
    /// Price divisor in `1 / (1 + price / scale)`.
    pub price_scale: f64,
}

impl Default for Ceilings {
    fn default() -> Self {
        Self {
            context_tokens: 200_000.0,
            generation_tokens_per_sec: 150.0,
            speed_tokens_per_sec: 200.0,
            price_scale: 10.0,
        }
    }
}

/// One rung of the aggregate-score quality ladder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityStep {
    /// Applies when the aggregate is strictly above this value.
    pub above: f64,
    pub bonus: f64,
}

/// Confidence estimator constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfidenceWeights {
    pub base: f64,
    pub per_signal: f64,
    /// Bonus at recency tier 3.
    pub recent_bonus: f64,
    /// Bonus at recency tier 2.
    pub fresh_bonus: f64,
    pub versatile_threshold: f64,
    pub versatile_bonus: f64,
    /// Checked top-down; first match wins. Must be sorted by `above` descending.
    pub quality_ladder: Vec<QualityStep>,
    pub low_quality_below: f64,
    pub low_quality_penalty: f64,
    pub dispersion_penalty: f64,
    pub enterprise_bonus: f64,
    pub high_consensus_signals: usize,
    pub floor: f64,
    pub ceiling: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            base: 50.0,
            per_signal: 10.0,
            recent_bonus: 5.0,
            fresh_bonus: 2.5,
            versatile_threshold: 0.75,
            versatile_bonus: 10.0,
            quality_ladder: vec![
                QualityStep {
                    above: 0.85,
                    bonus: 15.0,
                },
                QualityStep {
                    above: 0.75,
                    bonus: 10.0,
                },
                QualityStep {
                    above: 0.65,
                    bonus: 5.0,
                },
            ],
            low_quality_below: 0.40,
            low_quality_penalty: 10.0,
            dispersion_penalty: 50.0,
            enterprise_bonus: 5.0,
            high_consensus_signals: 3,
            floor: CONFIDENCE_FLOOR,
            ceiling: CONFIDENCE_CEILING,
        }
    }
}

/// Ecosystem composite weights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EcosystemWeights {
    pub model_count: f64,
    pub mean_score: f64,
    /// Scale applied to the mean aggregate before weighting.
    pub mean_scale: f64,
}

impl Default for EcosystemWeights {
    fn default() -> Self {
        Self {
            model_count: 0.4,
            mean_score: 0.3,
            mean_scale: 10.0,
        }
    }
}

/// Complete scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub signal_sources: Vec<SignalSource>,
    pub overall: OverallWeights,
    pub value: ValueWeights,
    pub coding: CodingWeights,
    pub generation: GenerationWeights,
    pub speed: SpeedWeights,
    pub enterprise: EnterpriseWeights,
    pub ceilings: Ceilings,
    pub confidence: ConfidenceWeights,
    pub ecosystem: EcosystemWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            signal_sources: vec![
                SignalSource::new("gpqa_score", "ZeroEval GPQA", 0.50),
                SignalSource::new("average_score", "Avg Score", 0.40),
            ],
            overall: OverallWeights::default(),
            value: ValueWeights::default(),
            coding: CodingWeights::default(),
            generation: GenerationWeights::default(),
            speed: SpeedWeights::default(),
            enterprise: EnterpriseWeights::default(),
            ceilings: Ceilings::default(),
            confidence: ConfidenceWeights::default(),
            ecosystem: EcosystemWeights::default(),
        }
    }
}

impl ScoringConfig {
    /// Load a config from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: ScoringConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot score with.
    pub fn validate(&self) -> Result<()> {
        for source in &self.signal_sources {
            if !(source.weight > 0.0) {
                return Err(CrossbenchError::InvalidConfig(format!(
                    "signal source '{}' must have a positive weight",
                    source.field
                )));
            }
        }

        let c = &self.confidence;
        if c.floor > c.ceiling {
            return Err(CrossbenchError::InvalidConfig(format!(
                "confidence floor {} exceeds ceiling {}",
                c.floor, c.ceiling
            )));
        }
        if c.quality_ladder.windows(2).any(|w| w[0].above < w[1].above) {
            return Err(CrossbenchError::InvalidConfig(
                "quality ladder must be sorted by threshold, highest first".to_string(),
            ));
        }

        let ceilings = [
            ("context_tokens", self.ceilings.context_tokens),
            (
                "generation_tokens_per_sec",
                self.ceilings.generation_tokens_per_sec,
            ),
            ("speed_tokens_per_sec", self.ceilings.speed_tokens_per_sec),
            ("price_scale", self.ceilings.price_scale),
        ];
        if let Some((name, _)) = ceilings.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(CrossbenchError::InvalidConfig(format!(
                "ceiling {name} must be positive"
            )));
        }
        Ok(())
    }
}
