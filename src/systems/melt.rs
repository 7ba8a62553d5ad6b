//! # Melt outcome resolver
//!
//! Decides what happens to one unit of an item thrown into the furnace:
//!
//! 1. **Mutation roll** `r1 ∈ [0,1000)`: `r1 < row.mutation` marks the result
//!    as mutated (reward drawn from another recyclable category). Independent
//!    of the outcome roll.
//! 2. **Outcome roll** `r2 ∈ [0,1000)` against cumulative per-mille odds in the
//!    order LevelUp, LevelDown, SameLevel, Destroyed. Above the pity threshold
//!    the odds are redistributed first (see [`MeltOdds::adjusted`]).
//! 3. **Boundary translation**: LevelDown from the lowest tier is Destroyed,
//!    LevelUp from the highest is SameLevel, and a target tier with no
//!    eligible item becomes SameLevel.
//!
//! Nothing here fails; every roll lands on a defined outcome. Picking the
//! concrete reward item and recording pity is the caller's job.

use log::{debug, trace};
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::{MeltPityConfig, MeltProbabilityRow};
use crate::mechanics::stoch::{self, PER_MILLE};
use crate::mechanics::tier::QualityTier;
use crate::systems::melt_pity::{MeltOutcome, MeltPityState};

/// Effective per-mille odds for one roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeltOdds {
    pub level_up: u32,
    pub level_down: u32,
    pub same_level: u32,
    pub destroyed: u32,
}

impl MeltOdds {
    pub fn base(row: &MeltProbabilityRow) -> Self {
        Self {
            level_up: row.level_up,
            level_down: row.level_down,
            same_level: row.same_level,
            destroyed: row.destroyed(),
        }
    }

    /// Base odds in the low-pity regime, redistributed odds above it.
    ///
    /// With `excess = weight - threshold`:
    /// LevelUp gains `up_step*excess`, SameLevel gains `same_step*excess` (each
    /// capped at 1000); a quarter (`divisor`) of the combined gain comes out of
    /// LevelDown and out of the implicit destroy chance (each floored at 0).
    /// If the four still sum past 1000 the overflow is taken from Destroyed,
    /// then LevelDown, then SameLevel, in that order.
    pub fn adjusted(row: &MeltProbabilityRow, pity: &MeltPityState, cfg: &MeltPityConfig) -> Self {
        let excess = pity.excess(cfg) as i64;
        if excess == 0 {
            return Self::base(row);
        }

        let cap = PER_MILLE as i64;
        let (up, down, same) = (row.level_up as i64, row.level_down as i64, row.same_level as i64);
        let up_gain = cfg.level_up_step as i64 * excess;
        let same_gain = cfg.same_level_step as i64 * excess;
        let shift = (up_gain + same_gain) / (cfg.level_down_divisor.max(1) as i64);

        let mut odds = [
            (up + up_gain).min(cap),
            (down - shift).max(0),
            (same + same_gain).min(cap),
            (cap - up - down - same - shift).max(0),
        ];

        let mut over = odds.iter().sum::<i64>() - cap;
        // Destroyed, then LevelDown, then SameLevel. The last trim only fires
        // when LevelUp + SameLevel alone exceed 1000, where SameLevel is
        // already unreachable by an r2 < 1000.
        for slot in [3usize, 1, 2] {
            if over <= 0 {
                break;
            }
            let take = over.min(odds[slot]);
            odds[slot] -= take;
            over -= take;
        }

        let adjusted = Self {
            level_up: odds[0] as u32,
            level_down: odds[1] as u32,
            same_level: odds[2] as u32,
            destroyed: odds[3] as u32,
        };
        trace!("melt odds: excess={excess} base={row:?} adjusted={adjusted:?}");
        adjusted
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.level_up
            .saturating_add(self.level_down)
            .saturating_add(self.same_level)
            .saturating_add(self.destroyed)
    }

    /// Cumulative test of a per-mille roll.
    pub fn classify(&self, r2: u32) -> MeltOutcome {
        let up = self.level_up;
        let down = up.saturating_add(self.level_down);
        let same = down.saturating_add(self.same_level);
        if r2 < up {
            MeltOutcome::LevelUp
        } else if r2 < down {
            MeltOutcome::LevelDown
        } else if r2 < same {
            MeltOutcome::SameLevel
        } else {
            MeltOutcome::Destroyed
        }
    }
}

/// Outcome straight off the dice, before boundary translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeltRoll {
    pub outcome: MeltOutcome,
    pub is_mutated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeltResolution {
    pub outcome: MeltOutcome,
    pub is_mutated: bool,
    /// Tier the reward is drawn from; `None` when destroyed.
    pub target_tier: Option<QualityTier>,
}

/// Steps 1 and 2: mutation roll, then outcome roll. `r1` is always drawn
/// before `r2`.
pub fn roll<R: RngCore + ?Sized>(
    row: &MeltProbabilityRow,
    pity: &MeltPityState,
    cfg: &MeltPityConfig,
    rng: &mut R,
) -> MeltRoll {
    let r1 = stoch::per_mille(rng);
    let is_mutated = r1 < row.mutation;
    let odds = MeltOdds::adjusted(row, pity, cfg);
    let r2 = stoch::per_mille(rng);
    let outcome = odds.classify(r2);
    trace!("melt roll: r1={r1} r2={r2} odds={odds:?} -> {outcome:?} mutated={is_mutated}");
    MeltRoll { outcome, is_mutated }
}

/// Step 3: map a raw roll onto the tier ladder and catalog availability.
/// `has_item_at(tier, is_mutated)` reports whether the reward pool for that
/// roll holds anything at `tier`.
pub fn translate(
    current: QualityTier,
    raw: MeltRoll,
    has_item_at: impl FnOnce(QualityTier, bool) -> bool,
) -> MeltResolution {
    let same = |is_mutated| MeltResolution {
        outcome: MeltOutcome::SameLevel,
        is_mutated,
        target_tier: Some(current),
    };
    let MeltRoll { outcome, is_mutated } = raw;

    let stepped = match outcome {
        MeltOutcome::SameLevel => return same(is_mutated),
        MeltOutcome::Destroyed => {
            return MeltResolution { outcome, is_mutated, target_tier: None };
        }
        MeltOutcome::LevelUp => match current.up() {
            Some(t) => t,
            None => {
                debug!("melt: LevelUp past {current:?}, kept at SameLevel");
                return same(is_mutated);
            }
        },
        MeltOutcome::LevelDown => match current.down() {
            Some(t) => t,
            None => {
                debug!("melt: LevelDown below {current:?}, item destroyed");
                return MeltResolution { outcome: MeltOutcome::Destroyed, is_mutated, target_tier: None };
            }
        },
    };

    if has_item_at(stepped, is_mutated) {
        MeltResolution { outcome, is_mutated, target_tier: Some(stepped) }
    } else {
        debug!("melt: no eligible item at {stepped:?} (mutated={is_mutated}), kept at SameLevel");
        same(is_mutated)
    }
}

/// Full resolution of one melt unit.
pub fn resolve<R: RngCore + ?Sized>(
    current: QualityTier,
    row: &MeltProbabilityRow,
    pity: &MeltPityState,
    cfg: &MeltPityConfig,
    rng: &mut R,
    has_item_at: impl FnOnce(QualityTier, bool) -> bool,
) -> MeltResolution {
    translate(current, roll(row, pity, cfg, rng), has_item_at)
}
