// tests/core.rs
mod common;

use loot_odds::config::{MeltProbabilityRow, PityScope, TierWeights};
use loot_odds::mechanics::{control, stoch, weighted};
use loot_odds::{OddsConfig, OddsError, QualityTier, WeightedCandidate, refine_det};
use std::cell::RefCell;
use std::rc::Rc;

/* ──────────────────────────────────────────────────────────────────────────
1) refine_det: tune a White weight until White makes up 30% of draws
────────────────────────────────────────────────────────────────────────── */

fn white_share(white_weight: f64, draws: usize, seed: u64) -> f64 {
    let mut w = TierWeights::default();
    w.0[QualityTier::White.index()] = white_weight;
    let c: Vec<_> = QualityTier::ALL.iter().map(|&t| WeightedCandidate::new(t, w.base(t))).collect();
    let mut rng = stoch::seeded(seed);
    let hits = (0..draws)
        .filter(|_| weighted::sample(&c, &mut rng) == Some(QualityTier::White))
        .count();
    hits as f64 / draws as f64
}

#[test]
fn refine_det_tunes_a_tier_weight_to_target_share() {
    // others sum to 600: share = w / (w + 600), so 30% lands near w = 257
    let target = 0.30;
    let passes = Rc::new(RefCell::new(0usize));

    let simulate = |w: &f64| white_share(*w, 20_000, 99);
    let measure = |share: &f64| *share;
    let update = |w: &f64, share: &f64| control::p_against_error(*w, share - target, 800.0, 0.0, 1000.0);
    let converged = {
        let passes = Rc::clone(&passes);
        move |a: &f64, b: &f64| {
            *passes.borrow_mut() += 1;
            (a - b).abs() < 0.5
        }
    };

    let w = refine_det(400.0, simulate, measure, update, converged, 200);

    assert!(*passes.borrow() < 200, "did not settle");
    assert!((w - 257.0).abs() < 20.0, "w = {w}");
    assert!((white_share(w, 50_000, 7) - target).abs() < 0.02);
}

#[test]
fn refine_det_stops_after_max_iters() {
    let calls = Rc::new(RefCell::new(0usize));
    let simulate = {
        let calls = Rc::clone(&calls);
        move |x: &u32| {
            *calls.borrow_mut() += 1;
            *x
        }
    };
    let out = refine_det(0u32, simulate, |d: &u32| *d, |x: &u32, _m: &u32| x + 1, |_: &u32, _: &u32| false, 5);
    assert_eq!(out, 5);
    assert_eq!(*calls.borrow(), 5);

    let untouched = refine_det(9u32, |x: &u32| *x, |d: &u32| *d, |x: &u32, _m: &u32| x + 1, |_: &u32, _: &u32| true, 0);
    assert_eq!(untouched, 9);
}

#[test]
fn refine_det_returns_the_converging_step() {
    // halve toward 0; stop once the step is below 1
    let out = refine_det(
        64.0_f64,
        |x: &f64| *x,
        |d: &f64| *d,
        |x: &f64, _m: &f64| x / 2.0,
        |a: &f64, b: &f64| a - b < 1.0,
        100,
    );
    assert_eq!(out, 0.5);
}

/* ──────────────────────────────────────────────────────────────────────────
2) Configuration loading
────────────────────────────────────────────────────────────────────────── */

#[test]
fn empty_json_yields_defaults() {
    let cfg = OddsConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, OddsConfig::default());
    assert_eq!(cfg.tier_weights.base(QualityTier::White), 400.0);
    assert_eq!(cfg.lottery.pity_threshold, 5);
    assert_eq!(cfg.melt.pity_scope, PityScope::Persistent);
    assert_eq!(cfg.recyclable_categories, vec!["Weapon", "Armor", "Bullet"]);
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let cfg = OddsConfig::from_json_str(
        r#"{
            "lottery": { "pity_threshold": 8, "high_tier_threshold": 5 },
            "melt": { "pity_scope": "PerBatch", "pity": { "regime_threshold": 20 } },
            "recyclable_categories": ["Weapon"]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.lottery.pity_threshold, 8);
    assert_eq!(cfg.lottery.high_tier_threshold, QualityTier::Red);
    assert_eq!(cfg.lottery.bonus_per_excess, 50.0);
    assert_eq!(cfg.melt.pity_scope, PityScope::PerBatch);
    assert_eq!(cfg.melt.pity.regime_threshold, 20);
    assert_eq!(cfg.melt.pity.destroyed_weight, 6);
    assert_eq!(cfg.recyclable_categories, vec!["Weapon"]);
}

#[test]
fn config_round_trips_through_json() {
    let mut cfg = OddsConfig::default();
    cfg.tier_weights = TierWeights::uniform();
    cfg.lottery.bonus_per_excess = 72.5;
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(OddsConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn invalid_tables_and_weights_are_rejected() {
    let mut cfg = OddsConfig::default();
    cfg.melt.table.0[2] = MeltProbabilityRow { level_up: 500, level_down: 400, same_level: 200, mutation: 0 };
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(matches!(OddsConfig::from_json_str(&json), Err(OddsError::MeltRowOverBudget(1100))));

    let mut cfg = OddsConfig::default();
    cfg.tier_weights.0[QualityTier::Purple.index()] = -1.0;
    assert!(matches!(cfg.validate(), Err(OddsError::InvalidTierWeight(QualityTier::Purple))));

    assert!(matches!(OddsConfig::from_json_str("{\"lottery\": 3}"), Err(OddsError::Json(_))));
    assert!(matches!(
        OddsConfig::from_json_str(r#"{"lottery": {"high_tier_threshold": 7}}"#),
        Err(OddsError::Json(_))
    ));
}
