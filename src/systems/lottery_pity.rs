//! Lottery pity: a streak counter of draws since the last high-tier result.
//!
//! Once the streak reaches `pity_threshold`, every high-tier bucket gains an
//! additive per-mille bonus that grows by `bonus_per_excess` per extra draw.
//! There is no explicit cap; the weighted sampler's normalisation bounds the
//! effective probability below 1.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::LotteryPityConfig;
use crate::mechanics::tier::QualityTier;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryPityState {
    pub consecutive_non_high_tier_draws: u32,
}

impl LotteryPityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call exactly once per completed draw, after the final item is known.
    /// Aborted draws (empty pool, failed payment) must not call this.
    pub fn on_draw_completed(&mut self, selected: QualityTier, cfg: &LotteryPityConfig) {
        if selected >= cfg.high_tier_threshold {
            if self.consecutive_non_high_tier_draws > 0 {
                debug!(
                    "lottery pity: {selected:?} ends a streak of {}",
                    self.consecutive_non_high_tier_draws
                );
            }
            self.consecutive_non_high_tier_draws = 0;
        } else {
            self.consecutive_non_high_tier_draws = self.consecutive_non_high_tier_draws.saturating_add(1);
        }
    }

    /// Draws at or beyond the threshold (0 below it).
    #[inline]
    pub fn excess(&self, cfg: &LotteryPityConfig) -> u32 {
        if self.consecutive_non_high_tier_draws >= cfg.pity_threshold {
            self.consecutive_non_high_tier_draws - cfg.pity_threshold + 1
        } else {
            0
        }
    }

    /// Additive per-mille bonus for `tier` on the next draw.
    #[inline]
    pub fn bonus_for(&self, tier: QualityTier, cfg: &LotteryPityConfig) -> f64 {
        if tier >= cfg.high_tier_threshold {
            self.excess(cfg) as f64 * cfg.bonus_per_excess
        } else {
            0.0
        }
    }
}
