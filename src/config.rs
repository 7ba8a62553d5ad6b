//! Engine configuration: tier weights, pity tuning and the melt table.
//!
//! Every field has a default, so a partial JSON document (or `{}`) is a valid
//! config. All probabilities are per-mille (units of 1/1000).

use serde::{Deserialize, Serialize};

use crate::error::{OddsError, Result};
use crate::mechanics::stoch::PER_MILLE;
use crate::mechanics::tier::{QualityTier, TIER_COUNT};

/// Base per-mille weight of each tier when the lottery picks a bucket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierWeights(pub [f64; TIER_COUNT]);

impl TierWeights {
    #[inline]
    pub fn base(&self, tier: QualityTier) -> f64 {
        self.0[tier.index()]
    }

    pub fn uniform() -> Self {
        Self([1.0; TIER_COUNT])
    }
}

impl Default for TierWeights {
    fn default() -> Self {
        Self([400.0, 250.0, 170.0, 100.0, 50.0, 25.0, 5.0])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotteryPityConfig {
    /// Streak length at which high tiers start gaining weight.
    pub pity_threshold: u32,
    /// Per-mille bonus per draw at or beyond the threshold.
    pub bonus_per_excess: f64,
    pub high_tier_threshold: QualityTier,
}

impl Default for LotteryPityConfig {
    fn default() -> Self {
        Self { pity_threshold: 5, bonus_per_excess: 50.0, high_tier_threshold: QualityTier::Orange }
    }
}

/// Per-tier melt odds. `level_up + level_down + same_level <= 1000`; the
/// remainder is the destroy chance. `mutation` is rolled independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeltProbabilityRow {
    pub level_up: u32,
    pub level_down: u32,
    pub same_level: u32,
    pub mutation: u32,
}

impl MeltProbabilityRow {
    pub fn new(level_up: u32, level_down: u32, same_level: u32, mutation: u32) -> Result<Self> {
        let row = Self { level_up, level_down, same_level, mutation };
        row.validate()?;
        Ok(row)
    }

    pub fn validate(&self) -> Result<()> {
        let spent = self.level_up.saturating_add(self.level_down).saturating_add(self.same_level);
        if spent > PER_MILLE {
            return Err(OddsError::MeltRowOverBudget(spent));
        }
        if self.mutation > PER_MILLE {
            return Err(OddsError::MutationOverBudget(self.mutation));
        }
        Ok(())
    }

    /// Implicit destroy chance.
    #[inline]
    pub fn destroyed(&self) -> u32 {
        PER_MILLE
            .saturating_sub(self.level_up)
            .saturating_sub(self.level_down)
            .saturating_sub(self.same_level)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeltTable(pub [MeltProbabilityRow; TIER_COUNT]);

impl MeltTable {
    #[inline]
    pub fn row(&self, tier: QualityTier) -> &MeltProbabilityRow {
        &self.0[tier.index()]
    }

    pub fn validate(&self) -> Result<()> {
        self.0.iter().try_for_each(MeltProbabilityRow::validate)
    }
}

impl Default for MeltTable {
    fn default() -> Self {
        let r = |level_up, level_down, same_level, mutation| MeltProbabilityRow {
            level_up,
            level_down,
            same_level,
            mutation,
        };
        Self([
            r(300, 0, 500, 100),
            r(250, 150, 400, 100),
            r(200, 200, 350, 100),
            r(150, 200, 350, 80),
            r(100, 250, 300, 60),
            r(50, 300, 300, 50),
            r(0, 300, 500, 30),
        ])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeltPityConfig {
    /// Accumulated weight above which odds get redistributed.
    pub regime_threshold: u32,
    /// LevelUp gain per point of excess.
    pub level_up_step: u32,
    /// SameLevel gain per point of excess.
    pub same_level_step: u32,
    /// Total gain is divided by this before it is taken from LevelDown/Destroyed.
    pub level_down_divisor: u32,
    pub same_level_weight: u32,
    pub level_down_weight: u32,
    pub destroyed_weight: u32,
}

impl Default for MeltPityConfig {
    fn default() -> Self {
        Self {
            regime_threshold: 10,
            level_up_step: 3,
            same_level_step: 5,
            level_down_divisor: 4,
            same_level_weight: 1,
            level_down_weight: 3,
            destroyed_weight: 6,
        }
    }
}

/// Lifetime of the melt pity counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PityScope {
    /// Carries across batches; only a LevelUp clears it.
    #[default]
    Persistent,
    /// Zeroed at the start of every melt batch.
    PerBatch,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeltConfig {
    pub table: MeltTable,
    pub pity: MeltPityConfig,
    pub pity_scope: PityScope,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsConfig {
    pub tier_weights: TierWeights,
    pub lottery: LotteryPityConfig,
    pub melt: MeltConfig,
    pub recyclable_categories: Vec<String>,
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            tier_weights: TierWeights::default(),
            lottery: LotteryPityConfig::default(),
            melt: MeltConfig::default(),
            recyclable_categories: ["Weapon", "Armor", "Bullet"].map(String::from).to_vec(),
        }
    }
}

impl OddsConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        for tier in QualityTier::ALL {
            let w = self.tier_weights.base(tier);
            if !w.is_finite() || w < 0.0 {
                return Err(OddsError::InvalidTierWeight(tier));
            }
        }
        self.melt.table.validate()
    }
}
