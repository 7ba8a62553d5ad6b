//! Quality-bucket sampling (lottery draws and multi-item rewards).
//!
//! Candidates are grouped by tier. In weighted mode a tier is chosen first
//! (base tier weight + lottery pity bonus) and then an id is picked uniformly
//! inside that tier's bucket; otherwise the pick is uniform over all
//! candidates. Draws are independent, so an id can repeat across the `n`
//! results.

use std::collections::BTreeMap;

use log::{trace, warn};
use rand_core::RngCore;

use crate::config::{LotteryPityConfig, TierWeights};
use crate::mechanics::stoch;
use crate::mechanics::tier::QualityTier;
use crate::mechanics::weighted::{self, WeightedCandidate};
use crate::systems::catalog::{ItemCatalogIndex, ItemId};
use crate::systems::lottery_pity::LotteryPityState;

/// Candidate ids grouped by tier; only non-empty buckets are kept.
/// Ids the catalog does not know are dropped.
#[derive(Clone, Debug, Default)]
pub struct TierBuckets {
    buckets: BTreeMap<QualityTier, Vec<ItemId>>,
    flat: Vec<ItemId>,
}

impl TierBuckets {
    pub fn partition(candidate_ids: &[ItemId], catalog: &ItemCatalogIndex) -> Self {
        let mut out = Self::default();
        for &id in candidate_ids {
            match catalog.tier_of(id) {
                Some(tier) => {
                    out.buckets.entry(tier).or_default().push(id);
                    out.flat.push(id);
                }
                None => trace!("bucket: id {id} not in catalog, skipped"),
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    pub fn tiers(&self) -> impl Iterator<Item = QualityTier> + '_ {
        self.buckets.keys().copied()
    }

    pub fn bucket(&self, tier: QualityTier) -> &[ItemId] {
        self.buckets.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// One weighted candidate per non-empty tier.
    pub fn tier_weights(
        &self,
        weights: &TierWeights,
        pity: &LotteryPityState,
        cfg: &LotteryPityConfig,
    ) -> Vec<WeightedCandidate<QualityTier>> {
        self.tiers()
            .map(|tier| WeightedCandidate::new(tier, weights.base(tier) + pity.bonus_for(tier, cfg)))
            .collect()
    }
}

/// Draw parameters shared by every call in a session.
#[derive(Clone, Copy, Debug)]
pub struct BucketSampler<'a> {
    pub catalog: &'a ItemCatalogIndex,
    pub weights: &'a TierWeights,
    pub pity_cfg: &'a LotteryPityConfig,
}

impl<'a> BucketSampler<'a> {
    pub fn new(
        catalog: &'a ItemCatalogIndex,
        weights: &'a TierWeights,
        pity_cfg: &'a LotteryPityConfig,
    ) -> Self {
        Self { catalog, weights, pity_cfg }
    }

    /// Up to `n` independent draws. A short result means no tier could be
    /// selected (empty pool, or every present tier carries zero weight); the
    /// caller treats that as a partial failure.
    pub fn sample_n<R: RngCore + ?Sized>(
        &self,
        candidate_ids: &[ItemId],
        n: usize,
        use_weighted: bool,
        pity: &LotteryPityState,
        rng: &mut R,
    ) -> Vec<ItemId> {
        let buckets = TierBuckets::partition(candidate_ids, self.catalog);
        let mut out = Vec::with_capacity(n);
        if buckets.is_empty() {
            if n > 0 {
                warn!("bucket: empty candidate pool ({} ids offered)", candidate_ids.len());
            }
            return out;
        }

        let tier_weights = if use_weighted {
            buckets.tier_weights(self.weights, pity, self.pity_cfg)
        } else {
            Vec::new()
        };

        for _ in 0..n {
            let picked = if use_weighted {
                weighted::sample(&tier_weights, rng)
                    .and_then(|tier| stoch::pick(rng, buckets.bucket(tier)).copied())
            } else {
                stoch::pick(rng, &buckets.flat).copied()
            };
            match picked {
                Some(id) => out.push(id),
                None => break,
            }
        }

        if out.len() < n {
            warn!("bucket: partial sampling, {} of {} drawn", out.len(), n);
        }
        out
    }

    /// Single draw (`n = 1`).
    pub fn sample_one<R: RngCore + ?Sized>(
        &self,
        candidate_ids: &[ItemId],
        use_weighted: bool,
        pity: &LotteryPityState,
        rng: &mut R,
    ) -> Option<ItemId> {
        self.sample_n(candidate_ids, 1, use_weighted, pity, rng).pop()
    }
}
