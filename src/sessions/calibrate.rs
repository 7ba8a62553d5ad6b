//! Drop-rate calibration: tune the lottery pity bonus until the simulated
//! long-run high-tier rate meets a target.
//!
//! Runs [`refine_det`] over one knob, `bonus_per_excess`:
//! simulate (Monte Carlo draws) → measure (high-tier rate) → update
//! (proportional step against the rate error, clamped to `[0, max_bonus]`).
//! Each pass reuses the same seed, so the loop is deterministic and the
//! measured rate only moves because the bonus moved.

use std::cell::Cell;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::OddsConfig;
use crate::mechanics::control;
use crate::refine_det;
use crate::sessions::sim::{self, TierHistogram};
use crate::systems::catalog::{ItemCatalogIndex, ItemId};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationTarget {
    /// Desired share of draws at or above the high tier.
    pub high_tier_rate: f64,
    pub tolerance: f64,
    /// Per-mille of bonus per unit of rate error.
    pub gain: f64,
    pub max_bonus: f64,
    pub draws: u64,
    pub seed: u64,
    pub max_iters: usize,
}

impl CalibrationTarget {
    pub fn new(high_tier_rate: f64) -> Self {
        Self { high_tier_rate, ..Self::default() }
    }
}

impl Default for CalibrationTarget {
    fn default() -> Self {
        Self {
            high_tier_rate: 0.1,
            tolerance: 0.005,
            gain: 2000.0,
            max_bonus: 1000.0,
            draws: 20_000,
            seed: 0x5EED,
            max_iters: 64,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Bonus that produced `observed_high_tier_rate`.
    pub bonus_per_excess: f64,
    pub observed_high_tier_rate: f64,
    pub iters: usize,
    pub converged: bool,
}

/// Starts from `cfg.lottery.bonus_per_excess`. Stops when the rate is within
/// tolerance, when the knob is pinned at a bound, or after `max_iters`.
pub fn calibrate_bonus(
    pool: &[ItemId],
    catalog: &ItemCatalogIndex,
    cfg: &OddsConfig,
    target: CalibrationTarget,
) -> Calibration {
    let measured_bonus = Cell::new(cfg.lottery.bonus_per_excess);
    let measured_rate = Cell::new(0.0_f64);
    let iters = Cell::new(0usize);
    let converged = Cell::new(false);

    let simulate = |bonus: &f64| -> TierHistogram {
        let mut trial = cfg.clone();
        trial.lottery.bonus_per_excess = *bonus;
        measured_bonus.set(*bonus);
        sim::simulate_lottery(pool, catalog, &trial, target.draws, target.seed)
    };

    let measure = |hist: &TierHistogram| -> f64 {
        let rate = hist.high_tier_rate();
        measured_rate.set(rate);
        rate
    };

    let update = |bonus: &f64, rate: &f64| -> f64 {
        control::p_against_error(*bonus, rate - target.high_tier_rate, target.gain, 0.0, target.max_bonus)
    };

    let done = |before: &f64, after: &f64| -> bool {
        iters.set(iters.get() + 1);
        let rate = measured_rate.get();
        debug!("calibrate: pass {} bonus={before:.2} rate={rate:.4} next={after:.2}", iters.get());
        if (rate - target.high_tier_rate).abs() <= target.tolerance {
            converged.set(true);
            return true;
        }
        control::stalled(*before, *after)
    };

    // refine_det hands back the next, never-simulated step; the reported
    // bonus is the last one actually measured.
    let next = refine_det(cfg.lottery.bonus_per_excess, simulate, measure, update, done, target.max_iters);
    if !control::stalled(next, measured_bonus.get()) {
        debug!(
            "calibrate: stopped before simulating bonus={next:.2}, reporting measured bonus={:.2}",
            measured_bonus.get()
        );
    }

    if !converged.get() {
        warn!(
            "calibrate: target rate {:.4} not reached, best effort bonus={:.2} rate={:.4}",
            target.high_tier_rate,
            measured_bonus.get(),
            measured_rate.get()
        );
    }

    Calibration {
        bonus_per_excess: measured_bonus.get(),
        observed_high_tier_rate: measured_rate.get(),
        iters: iters.get(),
        converged: converged.get(),
    }
}
