//! Monte Carlo runs over the real session code, for checking drop rates and
//! grind pacing against a config before shipping it.

use serde::{Deserialize, Serialize};

use crate::config::OddsConfig;
use crate::error::Result;
use crate::mechanics::stoch;
use crate::mechanics::tier::{QualityTier, TIER_COUNT};
use crate::sessions::lottery::LotteryMachine;
use crate::sessions::melt::MeltFurnace;
use crate::systems::catalog::{ItemCatalogIndex, ItemId};
use crate::systems::melt_pity::MeltOutcome;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TierHistogram {
    pub counts: [u64; TIER_COUNT],
    pub draws: u64,
    /// Draws that returned nothing (empty pool).
    pub misses: u64,
    /// Longest run of non-high-tier draws observed.
    pub longest_drought: u32,
    pub high_tier_threshold: Option<QualityTier>,
}

impl TierHistogram {
    pub fn hits(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn rate(&self, tier: QualityTier) -> f64 {
        let hits = self.hits();
        if hits == 0 { 0.0 } else { self.counts[tier.index()] as f64 / hits as f64 }
    }

    pub fn high_tier_rate(&self) -> f64 {
        let Some(threshold) = self.high_tier_threshold else { return 0.0 };
        QualityTier::ALL.iter().filter(|&&t| t >= threshold).map(|&t| self.rate(t)).sum()
    }
}

pub fn simulate_lottery(
    pool: &[ItemId],
    catalog: &ItemCatalogIndex,
    cfg: &OddsConfig,
    draws: u64,
    seed: u64,
) -> TierHistogram {
    let mut rng = stoch::seeded(seed);
    let mut machine = LotteryMachine::from_config(cfg);
    let mut hist = TierHistogram {
        high_tier_threshold: Some(cfg.lottery.high_tier_threshold),
        ..TierHistogram::default()
    };

    for _ in 0..draws {
        hist.draws += 1;
        match machine.draw(pool, catalog, &mut rng).and_then(|id| catalog.tier_of(id)) {
            Some(tier) => hist.counts[tier.index()] += 1,
            None => hist.misses += 1,
        }
        hist.longest_drought = hist.longest_drought.max(machine.pity().consecutive_non_high_tier_draws);
    }
    hist
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeltStats {
    pub units: u64,
    pub level_up: u64,
    pub level_down: u64,
    pub same_level: u64,
    pub destroyed: u64,
    pub mutated: u64,
    pub peak_pity: u32,
    pub rewards_by_tier: [u64; TIER_COUNT],
}

impl MeltStats {
    pub fn count(&self, outcome: MeltOutcome) -> u64 {
        match outcome {
            MeltOutcome::LevelUp => self.level_up,
            MeltOutcome::LevelDown => self.level_down,
            MeltOutcome::SameLevel => self.same_level,
            MeltOutcome::Destroyed => self.destroyed,
        }
    }

    pub fn rate(&self, outcome: MeltOutcome) -> f64 {
        if self.units == 0 { 0.0 } else { self.count(outcome) as f64 / self.units as f64 }
    }
}

/// Melts `units` copies of `item` one at a time through a single furnace.
pub fn simulate_melt(
    item: ItemId,
    units: u64,
    catalog: &ItemCatalogIndex,
    cfg: &OddsConfig,
    seed: u64,
) -> Result<MeltStats> {
    let mut rng = stoch::seeded(seed);
    let mut furnace = MeltFurnace::from_config(cfg);
    let mut stats = MeltStats::default();

    for _ in 0..units {
        let step = furnace.melt_one(item, catalog, &mut rng)?;
        stats.units += 1;
        match step.outcome {
            MeltOutcome::LevelUp => stats.level_up += 1,
            MeltOutcome::LevelDown => stats.level_down += 1,
            MeltOutcome::SameLevel => stats.same_level += 1,
            MeltOutcome::Destroyed => stats.destroyed += 1,
        }
        if step.is_mutated {
            stats.mutated += 1;
        }
        if let Some(tier) = step.reward.and_then(|id| catalog.tier_of(id)) {
            stats.rewards_by_tier[tier.index()] += 1;
        }
        stats.peak_pity = stats.peak_pity.max(step.pity_after.cumulative_negative_weight);
    }
    Ok(stats)
}
