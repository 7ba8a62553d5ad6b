// tests/balance.rs
#![cfg(feature = "balance-tools")]

mod common;

use loot_odds::sessions::calibrate::{self, CalibrationTarget};
use loot_odds::sessions::sim;
use loot_odds::systems::melt_pity::MeltOutcome;
use loot_odds::{OddsConfig, OddsError, QualityTier};

/* ──────────────────────────────────────────────────────────────────────────
1) Lottery simulation
────────────────────────────────────────────────────────────────────────── */

#[test]
fn same_seed_same_histogram() {
    let cat = common::catalog();
    let cfg = OddsConfig::default();
    let a = sim::simulate_lottery(&common::WEAPON, &cat, &cfg, 5_000, 42);
    let b = sim::simulate_lottery(&common::WEAPON, &cat, &cfg, 5_000, 42);
    assert_eq!(a, b);
    assert_eq!(a.hits() + a.misses, a.draws);
    assert_eq!(a.misses, 0);
}

#[test]
fn empty_pool_counts_only_misses() {
    let cat = common::catalog();
    let hist = sim::simulate_lottery(&[], &cat, &OddsConfig::default(), 100, 1);
    assert_eq!(hist.draws, 100);
    assert_eq!(hist.misses, 100);
    assert_eq!(hist.hits(), 0);
    assert_eq!(hist.rate(QualityTier::White), 0.0);
    assert_eq!(hist.high_tier_rate(), 0.0);
}

#[test]
fn pity_keeps_droughts_short_and_lifts_high_tier_rate() {
    let cat = common::catalog();
    let mut cfg = OddsConfig::default();

    cfg.lottery.bonus_per_excess = 0.0;
    let flat = sim::simulate_lottery(&common::WEAPON, &cat, &cfg, 40_000, 7);
    cfg.lottery.bonus_per_excess = 1_000.0;
    let boosted = sim::simulate_lottery(&common::WEAPON, &cat, &cfg, 40_000, 7);

    assert!((flat.high_tier_rate() - 0.08).abs() < 0.01, "flat {}", flat.high_tier_rate());
    assert!(boosted.high_tier_rate() > flat.high_tier_rate() + 0.05);
    assert!(boosted.longest_drought < flat.longest_drought);
}

/* ──────────────────────────────────────────────────────────────────────────
2) Melt simulation
────────────────────────────────────────────────────────────────────────── */

#[test]
fn melt_outcomes_sum_to_units() {
    let cat = common::catalog();
    let stats = sim::simulate_melt(102, 3_000, &cat, &OddsConfig::default(), 5).unwrap();
    let total: u64 = MeltOutcome::ALL.iter().map(|&o| stats.count(o)).sum();
    assert_eq!(total, 3_000);
    assert_eq!(stats.rewards_by_tier.iter().sum::<u64>(), 3_000 - stats.destroyed);
    assert!(stats.mutated > 0);
    assert!(stats.peak_pity > 0);
    let rates: f64 = MeltOutcome::ALL.iter().map(|&o| stats.rate(o)).sum();
    assert!((rates - 1.0).abs() < 1e-9);
}

#[test]
fn boundary_tiers_clamp_their_outcomes() {
    let cat = common::catalog();
    let cfg = OddsConfig::default();
    let top = sim::simulate_melt(106, 2_000, &cat, &cfg, 6).unwrap();
    assert_eq!(top.level_up, 0);
    let bottom = sim::simulate_melt(100, 2_000, &cat, &cfg, 6).unwrap();
    assert_eq!(bottom.level_down, 0);
    assert_eq!(bottom.rewards_by_tier[QualityTier::White.index()] + bottom.rewards_by_tier[QualityTier::Green.index()],
        2_000 - bottom.destroyed);
}

#[test]
fn melt_simulation_surfaces_bad_items() {
    let cat = common::catalog();
    let err = sim::simulate_melt(900, 10, &cat, &OddsConfig::default(), 0).unwrap_err();
    assert!(matches!(err, OddsError::NotRecyclable(_)));
    assert!(sim::simulate_melt(100, 0, &cat, &OddsConfig::default(), 0).unwrap().units == 0);
}

/* ──────────────────────────────────────────────────────────────────────────
3) Bonus calibration
────────────────────────────────────────────────────────────────────────── */

fn quick(rate: f64) -> CalibrationTarget {
    CalibrationTarget { draws: 4_000, ..CalibrationTarget::new(rate) }
}

#[test]
fn unreachable_low_target_pins_bonus_at_zero() {
    let cat = common::catalog();
    let out = calibrate::calibrate_bonus(&common::WEAPON, &cat, &OddsConfig::default(), quick(0.0));
    assert_eq!(out.bonus_per_excess, 0.0);
    assert!(!out.converged);
    assert!(out.observed_high_tier_rate > 0.0);
}

#[test]
fn unreachable_high_target_pins_bonus_at_max() {
    let cat = common::catalog();
    let target = quick(0.99);
    let out = calibrate::calibrate_bonus(&common::WEAPON, &cat, &OddsConfig::default(), target);
    assert_eq!(out.bonus_per_excess, target.max_bonus);
    assert!(!out.converged);
    assert!(out.iters <= target.max_iters);
}

#[test]
fn calibration_is_deterministic_for_a_seed() {
    let cat = common::catalog();
    let cfg = OddsConfig::default();
    let a = calibrate::calibrate_bonus(&common::WEAPON, &cat, &cfg, quick(0.12));
    let b = calibrate::calibrate_bonus(&common::WEAPON, &cat, &cfg, quick(0.12));
    assert_eq!(a, b);
    assert!(a.bonus_per_excess >= 0.0 && a.bonus_per_excess <= 1_000.0);
    if a.converged {
        assert!((a.observed_high_tier_rate - 0.12).abs() <= 0.005);
    }
}

#[test]
fn reported_bonus_is_the_one_that_was_measured() {
    let cat = common::catalog();
    let cfg = OddsConfig::default();
    for rate in [0.0, 0.12, 0.99] {
        let target = quick(rate);
        let out = calibrate::calibrate_bonus(&common::WEAPON, &cat, &cfg, target);

        let mut replay = cfg.clone();
        replay.lottery.bonus_per_excess = out.bonus_per_excess;
        let hist = sim::simulate_lottery(&common::WEAPON, &cat, &replay, target.draws, target.seed);
        assert_eq!(hist.high_tier_rate(), out.observed_high_tier_rate, "target {rate}");
    }
}
