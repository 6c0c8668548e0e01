//! Scoring invariants checked over a grid of records.

use crossbench_core::domain::recency_tier_for;
use crossbench_core::{
    Enrichment, Evidence, Modality, ModalitySet, ModelEntity, PerformanceMetrics, Registry,
    ScoringConfig, View,
};

fn metrics(staleness_days: u32) -> PerformanceMetrics {
    PerformanceMetrics {
        reasoning_score: 0.7,
        coding_score: 0.8,
        creative_score: 0.8,
        context_window: 128_000.0,
        price_per_million_input: 3.0,
        tokens_per_second: 90.0,
        is_enterprise_ready: true,
        org_maturity: 0.95,
        uptime_sla: 0.99,
        staleness_days,
        ..Default::default()
    }
}

fn entity(name: &str, signals: &[(f64, f64)], m: PerformanceMetrics) -> ModelEntity {
    let mut e = ModelEntity::new(name, "Org");
    for (i, (score, weight)) in signals.iter().enumerate() {
        e.add_signal(format!("source-{i}"), *score, *weight);
    }
    e.apply_enrichment(
        Enrichment {
            modalities: ModalitySet::text_only(),
            metrics: m,
        },
        &ScoringConfig::default(),
    );
    e
}

const SCORES: [f64; 7] = [0.0, 0.01, 0.25, 0.5, 0.75, 0.99, 1.0];

#[test]
fn aggregate_is_bounded_and_zero_only_when_empty() {
    for a in SCORES {
        for b in SCORES {
            let mut ev = Evidence::new();
            ev.add_signal("a", a, 0.5);
            ev.add_signal("b", b, 0.4);
            let agg = ev.aggregate();
            assert!((0.0..=1.0).contains(&agg), "aggregate {agg} for {a}/{b}");
            assert_eq!(agg == 0.0, ev.is_empty(), "{a}/{b}");
        }
    }
    // Out-of-range inputs are clamped on the way in.
    let mut ev = Evidence::new();
    ev.add_signal("hot", 1.7, 1.0);
    assert_eq!(ev.aggregate(), 1.0);
}

#[test]
fn confidence_is_bounded_and_floor_only_without_signals() {
    for stale in [0, 45, 120, 400] {
        for a in SCORES {
            for b in SCORES {
                let e = entity("m", &[(a, 0.5), (b, 0.4)], metrics(stale));
                let c = e.confidence();
                assert!((10.0..=99.0).contains(&c), "confidence {c}");
                assert_eq!(c == 10.0, e.evidence().is_empty(), "{a}/{b}/{stale}");
            }
        }
    }
}

#[test]
fn higher_dispersion_never_raises_confidence() {
    let m = metrics(10);
    let tight = entity("tight", &[(0.62, 1.0), (0.58, 1.0)], m.clone());
    let loose = entity("loose", &[(0.80, 1.0), (0.40, 1.0)], m);
    assert!((tight.aggregate_score() - loose.aggregate_score()).abs() < 1e-12);
    assert!(loose.confidence() <= tight.confidence());
}

#[test]
fn clamped_ranks_stay_in_display_range() {
    let prices = [0.0, 0.01, 1.0, 30.0, 999_999.0];
    for s in SCORES {
        for price in prices {
            let mut m = metrics(10);
            m.price_per_million_input = price;
            m.tokens_per_second = 10_000.0;
            let e = entity("m", &[(s, 1.0)], m);
            let clamped = e.ranks().clamped();
            for view in View::ALL {
                let v = clamped.get(view);
                assert!((0.0..=100.0).contains(&v), "{view} = {v}");
                if view != View::Value {
                    assert!(
                        e.score(view) <= 100.0 + 1e-9,
                        "{view} unclamped {}",
                        e.score(view)
                    );
                }
            }
        }
    }
}

#[test]
fn recent_record_wins_near_tie_even_with_lower_score() {
    let mut fresh_m = metrics(5);
    fresh_m.price_per_million_input = 1.0;
    let mut stale_m = metrics(365);
    stale_m.price_per_million_input = 1.0;

    let mut reg = Registry::new();
    reg.admit(entity("stale", &[(0.801, 1.0)], stale_m)).expect("admit");
    reg.admit(entity("fresh", &[(0.800, 1.0)], fresh_m)).expect("admit");

    let stale = reg.get("stale").expect("present");
    let fresh = reg.get("fresh").expect("present");
    assert!(stale.score(View::Value) > fresh.score(View::Value));
    assert!(stale.score(View::Value) - fresh.score(View::Value) <= 0.005);

    let ranked: Vec<&str> = reg.ranked(View::Value).iter().map(|e| e.name()).collect();
    assert_eq!(ranked, vec!["fresh", "stale"]);
}

#[test]
fn clear_score_gap_beats_recency() {
    let mut reg = Registry::new();
    reg.admit(entity("strong", &[(0.95, 1.0)], metrics(365))).expect("admit");
    reg.admit(entity("weak", &[(0.40, 1.0)], metrics(5))).expect("admit");
    let ranked: Vec<&str> = reg.ranked(View::Overall).iter().map(|e| e.name()).collect();
    assert_eq!(ranked, vec!["strong", "weak"]);
}

#[test]
fn recompute_twice_is_bit_identical() {
    let config = ScoringConfig::default();
    let mut e = entity("m", &[(0.9, 0.5), (0.7, 0.4)], metrics(10));
    let before = *e.ranks();
    e.recompute(&config);
    e.recompute(&config);
    for view in View::ALL {
        assert_eq!(before.get(view).to_bits(), e.ranks().get(view).to_bits(), "{view}");
    }
}

#[test]
fn worked_example_confidence() {
    let e = entity("m", &[(0.90, 0.5), (0.70, 0.4)], metrics(10));
    assert!((e.aggregate_score() - 0.8111).abs() < 1e-4);
    assert_eq!(e.recency_tier(), recency_tier_for(10));
    // 50 + 20 + 5 + 10 + 10 + 5 - 50 * 0.1006
    assert!((e.confidence() - 94.97).abs() < 0.01, "{}", e.confidence());
}

#[test]
fn zero_signal_record_never_reaches_registry() {
    let mut reg = Registry::new();
    let e = entity("empty", &[], metrics(10));
    reg.admit(e).expect("admit");
    assert!(reg.is_empty());
}

#[test]
fn free_model_value_example() {
    let mut m = metrics(10);
    m.price_per_million_input = 0.0;
    let free = entity("free", &[(0.6, 1.0)], m);
    assert!((free.score(View::Value) - 600.0).abs() < 1e-9);

    let mut cheap = metrics(10);
    cheap.price_per_million_input = 0.001;
    let priced = entity("priced", &[(1.0, 1.0)], cheap);
    assert!(priced.score(View::Value) < free.score(View::Value));
}

#[test]
fn image_view_requires_image_modality() {
    let mut e = ModelEntity::new("vision", "Org");
    e.add_signal("gpqa", 0.7, 1.0);
    e.apply_enrichment(
        Enrichment {
            modalities: ModalitySet::text_only().with(Modality::Image),
            metrics: metrics(10),
        },
        &ScoringConfig::default(),
    );
    let text = entity("text", &[(0.9, 1.0)], metrics(10));
    let table = crossbench_core::view_table([&e, &text], View::Image, 10);
    assert_eq!(table.len(), 1);
    assert_eq!(table[0].name(), "vision");
}
