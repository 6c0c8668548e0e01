//! Per-organization visibility summary.
//!
//! [`summarize_ecosystem`] groups records by organization and produces one
//! composite per group:
//!
//! ```text
//! composite = model_count_weight · model_count + mean_score_weight · (mean_aggregate · mean_scale)
//! ```
//!
//! The composite only orders organizations against each other; it is not on
//! the per-record ranking scale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::ModelEntity;
use crate::scoring::EcosystemWeights;

/// Group label for records with an empty organization.
pub const OTHER_ORGANIZATION: &str = "Other";

/// Summary for one organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrgSummary {
    pub organization: String,
    pub model_count: usize,
    /// Arithmetic mean of aggregate scores in the group.
    pub mean_score: f64,
    pub composite: f64,
}

/// Summarize records by organization, highest composite first, then by name.
pub fn summarize_ecosystem<'a, I>(entities: I, weights: &EcosystemWeights) -> Vec<OrgSummary>
where
    I: IntoIterator<Item = &'a ModelEntity>,
{
    let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for entity in entities {
        let org = match entity.organization().trim() {
            "" => OTHER_ORGANIZATION,
            org => org,
        };
        let slot = groups.entry(org).or_insert((0, 0.0));
        slot.0 += 1;
        slot.1 += entity.aggregate_score();
    }

    let mut summary: Vec<OrgSummary> = groups
        .into_iter()
        .map(|(org, (count, total))| {
            let mean = if count > 0 { total / count as f64 } else { 0.0 };
            OrgSummary {
                organization: org.to_string(),
                model_count: count,
                mean_score: mean,
                composite: weights.model_count * count as f64
                    + weights.mean_score * (mean * weights.mean_scale),
            }
        })
        .collect();

    summary.sort_by(|a, b| {
        b.composite
            .total_cmp(&a.composite)
            .then_with(|| a.organization.cmp(&b.organization))
    });
    summary
}
