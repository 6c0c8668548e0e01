//! Ordering and recency tie-break.
//!
//! Records are ordered by view score, highest first. When two scores are
//! within [`View::tie_threshold`] of each other, the record with the higher
//! recency tier goes first.
//!
//! That pairwise rule is not transitive on its own, so the order is built in
//! two passes: a strict sort on `(score desc, tier desc, name asc)`, then a
//! settle pass that swaps adjacent near-ties until no lower-tier record sits
//! directly ahead of a higher-tier one within the band. Each swap removes one
//! tier inversion, so the pass terminates.

use std::cmp::Ordering;

use crate::domain::{Modality, ModelEntity, View};

/// Pairwise tie-break rule: does `a` rank ahead of `b`?
pub fn outranks(a_score: f64, a_tier: u8, b_score: f64, b_tier: u8, threshold: f64) -> bool {
    if (a_score - b_score).abs() <= threshold {
        a_tier > b_tier
    } else {
        a_score > b_score
    }
}

fn strict_order(a: &ModelEntity, b: &ModelEntity, view: View) -> Ordering {
    b.score(view)
        .total_cmp(&a.score(view))
        .then_with(|| b.recency_tier().cmp(&a.recency_tier()))
        .then_with(|| a.name().cmp(b.name()))
}

/// Move higher-tier items ahead of adjacent near-ties.
fn settle_near_ties<T>(
    items: &mut [T],
    threshold: f64,
    score: impl Fn(&T) -> f64,
    tier: impl Fn(&T) -> u8,
) {
    let mut swapped = true;
    while swapped {
        swapped = false;
        for i in 1..items.len() {
            let near = (score(&items[i - 1]) - score(&items[i])).abs() <= threshold;
            if near && tier(&items[i]) > tier(&items[i - 1]) {
                items.swap(i - 1, i);
                swapped = true;
            }
        }
    }
}

/// Order records for `view`. Every record is kept.
pub fn rank_by_view<'a, I>(entities: I, view: View) -> Vec<&'a ModelEntity>
where
    I: IntoIterator<Item = &'a ModelEntity>,
{
    let mut ranked: Vec<&ModelEntity> = entities.into_iter().collect();
    ranked.sort_by(|a, b| strict_order(a, b, view));
    settle_near_ties(
        &mut ranked,
        view.tie_threshold(),
        |e| e.score(view),
        |e| e.recency_tier(),
    );
    ranked
}

/// Whether a record belongs in the published table for `view`.
///
/// Value drops records with no value (unknown price or zero score); Image
/// only lists image-capable models. Other views list everything.
pub fn listed_in_view(entity: &ModelEntity, view: View) -> bool {
    match view {
        View::Value => entity.score(View::Value) > 0.0,
        View::Image => entity.modalities().contains(Modality::Image),
        _ => true,
    }
}

/// Ranked, filtered and truncated table for `view`.
pub fn view_table<'a, I>(entities: I, view: View, limit: usize) -> Vec<&'a ModelEntity>
where
    I: IntoIterator<Item = &'a ModelEntity>,
{
    rank_by_view(
        entities.into_iter().filter(|e| listed_in_view(e, view)),
        view,
    )
    .into_iter()
    .take(limit)
    .collect()
}

/// Cheapest first; unknown prices are excluded.
pub fn rank_by_price<'a, I>(entities: I, limit: usize) -> Vec<&'a ModelEntity>
where
    I: IntoIterator<Item = &'a ModelEntity>,
{
    let mut ranked: Vec<&ModelEntity> = entities
        .into_iter()
        .filter(|e| e.metrics().price_known())
        .collect();
    ranked.sort_by(|a, b| {
        a.metrics()
            .price_per_million_input
            .total_cmp(&b.metrics().price_per_million_input)
            .then_with(|| a.name().cmp(b.name()))
    });
    ranked.truncate(limit);
    ranked
}
