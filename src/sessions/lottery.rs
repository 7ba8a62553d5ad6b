//! Lottery session: one player's draw machine.
//!
//! Owns the lottery pity streak for its session. The economy layer calls
//! [`LotteryMachine::draw`] only after payment succeeded; animation and
//! inventory placement consume the returned id.

use log::debug;
use rand_core::RngCore;

use crate::config::{LotteryPityConfig, OddsConfig, TierWeights};
use crate::systems::bucket::BucketSampler;
use crate::systems::catalog::{ItemCatalogIndex, ItemId};
use crate::systems::lottery_pity::LotteryPityState;

#[derive(Clone, Debug)]
pub struct LotteryMachine {
    weights: TierWeights,
    cfg: LotteryPityConfig,
    pity: LotteryPityState,
}

impl LotteryMachine {
    pub fn new(weights: TierWeights, cfg: LotteryPityConfig) -> Self {
        Self { weights, cfg, pity: LotteryPityState::new() }
    }

    pub fn from_config(cfg: &OddsConfig) -> Self {
        Self::new(cfg.tier_weights, cfg.lottery)
    }

    pub fn pity(&self) -> LotteryPityState {
        self.pity
    }

    /// Reload a streak saved by the persistence layer.
    pub fn restore_pity(&mut self, pity: LotteryPityState) {
        self.pity = pity;
    }

    pub fn pity_config(&self) -> &LotteryPityConfig {
        &self.cfg
    }

    fn sampler<'a>(&'a self, catalog: &'a ItemCatalogIndex) -> BucketSampler<'a> {
        BucketSampler::new(catalog, &self.weights, &self.cfg)
    }

    /// One weighted draw. The streak advances exactly once, and only when an
    /// item was actually drawn; an empty pool leaves it untouched.
    pub fn draw<R: RngCore + ?Sized>(
        &mut self,
        pool: &[ItemId],
        catalog: &ItemCatalogIndex,
        rng: &mut R,
    ) -> Option<ItemId> {
        let id = self.sampler(catalog).sample_one(pool, true, &self.pity, rng)?;
        if let Some(tier) = catalog.tier_of(id) {
            self.pity.on_draw_completed(tier, &self.cfg);
            debug!(
                "lottery: drew {id} ({tier:?}), streak now {}",
                self.pity.consecutive_non_high_tier_draws
            );
        }
        Some(id)
    }

    /// Multi-item reward generation. Reads the current streak (so the pity
    /// boost applies) but does not advance it. Check the length: fewer than
    /// `n` ids means the pool ran dry.
    pub fn reward_bundle<R: RngCore + ?Sized>(
        &self,
        pool: &[ItemId],
        n: usize,
        use_weighted: bool,
        catalog: &ItemCatalogIndex,
        rng: &mut R,
    ) -> Vec<ItemId> {
        self.sampler(catalog).sample_n(pool, n, use_weighted, &self.pity, rng)
    }
}
