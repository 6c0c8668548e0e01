//! Ranking views and the per-record score vector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Scores within this distance on a unit (0–1) scale count as tied.
///
/// Views on the 0–100 scale use `TIE_THRESHOLD * 100.0`; see
/// [`View::tie_threshold`]. Every ordering path reads it from here.
pub const TIE_THRESHOLD: f64 = 0.005;

/// Upper bound of the display scale every exported rank is clamped into.
pub const DISPLAY_MAX: f64 = 100.0;

/// The numeric scale a view's raw score lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreScale {
    /// 0–100 display points.
    Percent,
    /// Unbounded ratio; only clamped for display.
    Ratio,
}

/// One ranking perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Overall,
    Value,
    Coding,
    Image,
    Video,
    Speed,
    Confidence,
    Enterprise,
}

impl View {
    pub const ALL: [View; 8] = [
        View::Overall,
        View::Value,
        View::Coding,
        View::Image,
        View::Video,
        View::Speed,
        View::Confidence,
        View::Enterprise,
    ];

    /// Lowercase key used in file names and JSON.
    pub fn key(self) -> &'static str {
        match self {
            View::Overall => "overall",
            View::Value => "value",
            View::Coding => "coding",
            View::Image => "image",
            View::Video => "video",
            View::Speed => "speed",
            View::Confidence => "confidence",
            View::Enterprise => "enterprise",
        }
    }

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            View::Overall => "Overall",
            View::Value => "Value",
            View::Coding => "Coding",
            View::Image => "Image",
            View::Video => "Video",
            View::Speed => "Speed",
            View::Confidence => "Confidence",
            View::Enterprise => "Enterprise",
        }
    }

    pub fn scale(self) -> ScoreScale {
        match self {
            View::Value => ScoreScale::Ratio,
            _ => ScoreScale::Percent,
        }
    }

    /// [`TIE_THRESHOLD`] expressed on this view's scale.
    pub fn tie_threshold(self) -> f64 {
        match self.scale() {
            ScoreScale::Percent => TIE_THRESHOLD * DISPLAY_MAX,
            ScoreScale::Ratio => TIE_THRESHOLD,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown view: {s}"))
    }
}

/// The eight view scores of one record, unclamped.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RankScores {
    pub overall: f64,
    pub value: f64,
    pub coding: f64,
    pub image: f64,
    pub video: f64,
    pub speed: f64,
    pub confidence: f64,
    pub enterprise: f64,
}

impl RankScores {
    pub fn get(&self, view: View) -> f64 {
        match view {
            View::Overall => self.overall,
            View::Value => self.value,
            View::Coding => self.coding,
            View::Image => self.image,
            View::Video => self.video,
            View::Speed => self.speed,
            View::Confidence => self.confidence,
            View::Enterprise => self.enterprise,
        }
    }

    /// Projection used at every export boundary: each value in [0,100].
    pub fn clamped(&self) -> RankScores {
        let c = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, DISPLAY_MAX) };
        RankScores {
            overall: c(self.overall),
            value: c(self.value),
            coding: c(self.coding),
            image: c(self.image),
            video: c(self.video),
            speed: c(self.speed),
            confidence: c(self.confidence),
            enterprise: c(self.enterprise),
        }
    }
}
