//! Melt session: resolves units of a stack and turns outcomes into rewards.

use log::debug;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::{MeltConfig, OddsConfig, PityScope};
use crate::error::{OddsError, Result};
use crate::mechanics::stoch;
use crate::mechanics::tier::QualityTier;
use crate::systems::catalog::{ItemCatalogEntry, ItemCatalogIndex, ItemId};
use crate::systems::melt;
use crate::systems::melt_pity::{MeltOutcome, MeltPityState};

/// What one melted unit turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeltStep {
    pub outcome: MeltOutcome,
    pub is_mutated: bool,
    pub from_tier: QualityTier,
    /// `None` when destroyed.
    pub reward: Option<ItemId>,
    pub pity_after: MeltPityState,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeltBatch {
    pub item: ItemId,
    pub steps: Vec<MeltStep>,
}

impl MeltBatch {
    pub fn rewards(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.steps.iter().filter_map(|s| s.reward)
    }

    pub fn count(&self, outcome: MeltOutcome) -> usize {
        self.steps.iter().filter(|s| s.outcome == outcome).count()
    }
}

#[derive(Clone, Debug)]
pub struct MeltFurnace {
    cfg: MeltConfig,
    pity: MeltPityState,
}

impl MeltFurnace {
    pub fn new(cfg: MeltConfig) -> Self {
        Self { cfg, pity: MeltPityState::new() }
    }

    pub fn from_config(cfg: &OddsConfig) -> Self {
        Self::new(cfg.melt)
    }

    pub fn pity(&self) -> MeltPityState {
        self.pity
    }

    pub fn restore_pity(&mut self, pity: MeltPityState) {
        self.pity = pity;
    }

    fn source<'c>(catalog: &'c ItemCatalogIndex, item: ItemId) -> Result<&'c ItemCatalogEntry> {
        let entry = catalog.entry(item).ok_or(OddsError::UnknownItem(item))?;
        if !catalog.is_recyclable(&entry.category) {
            return Err(OddsError::NotRecyclable(entry.category.clone()));
        }
        Ok(entry)
    }

    /// Melts one unit of `item`. Pity is recorded before returning, so a
    /// caller that stops between steps keeps every completed step.
    pub fn melt_one<R: RngCore + ?Sized>(
        &mut self,
        item: ItemId,
        catalog: &ItemCatalogIndex,
        rng: &mut R,
    ) -> Result<MeltStep> {
        let entry = Self::source(catalog, item)?;
        let source = entry.category.as_str();
        let others: Vec<&str> = catalog.recyclable_categories().filter(|c| *c != source).collect();

        let resolution = melt::resolve(
            entry.tier,
            self.cfg.table.row(entry.tier),
            &self.pity,
            &self.cfg.pity,
            rng,
            |tier, is_mutated| {
                if is_mutated {
                    catalog.has_item_at_tier(others.iter().copied(), tier)
                } else {
                    catalog.has_item_at_tier([source], tier)
                }
            },
        );

        let mut is_mutated = resolution.is_mutated;
        let reward = resolution.target_tier.and_then(|tier| {
            let mut pool = if is_mutated {
                catalog.items_in_categories_at_tier(others.iter().copied(), tier)
            } else {
                Vec::new()
            };
            // a mutated SameLevel can land on a tier the other categories lack;
            // the reward then stays in the source category and is not mutated
            if pool.is_empty() {
                if is_mutated {
                    debug!("melt: no other category has {tier:?}, mutation dropped");
                    is_mutated = false;
                }
                pool = catalog.items_by_category_and_tier(source, tier).to_vec();
            }
            stoch::pick(rng, &pool).copied()
        });

        self.pity.record(resolution.outcome, &self.cfg.pity);
        debug!(
            "melt: {item} ({:?}) -> {:?} mutated={is_mutated} reward={reward:?}",
            entry.tier, resolution.outcome
        );

        Ok(MeltStep {
            outcome: resolution.outcome,
            is_mutated,
            from_tier: entry.tier,
            reward,
            pity_after: self.pity,
        })
    }

    /// Melts `count` units of the same stack, one independent step each.
    pub fn melt_stack<R: RngCore + ?Sized>(
        &mut self,
        item: ItemId,
        count: usize,
        catalog: &ItemCatalogIndex,
        rng: &mut R,
    ) -> Result<MeltBatch> {
        Self::source(catalog, item)?;
        if self.cfg.pity_scope == PityScope::PerBatch {
            self.pity.reset();
        }

        let mut steps = Vec::with_capacity(count);
        for _ in 0..count {
            steps.push(self.melt_one(item, catalog, rng)?);
        }
        Ok(MeltBatch { item, steps })
    }
}
