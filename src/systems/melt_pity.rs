//! Melt pity accumulator.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::MeltPityConfig;

/// Final result of one melt step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeltOutcome {
    LevelUp,
    LevelDown,
    SameLevel,
    Destroyed,
}

impl MeltOutcome {
    pub const ALL: [MeltOutcome; 4] = [
        MeltOutcome::LevelUp,
        MeltOutcome::LevelDown,
        MeltOutcome::SameLevel,
        MeltOutcome::Destroyed,
    ];

    #[inline]
    pub fn is_favorable(self) -> bool {
        matches!(self, MeltOutcome::LevelUp)
    }
}

/// Grows by an outcome-specific weight on every unfavorable step and drops to
/// zero on a LevelUp. Mutated only through [`MeltPityState::record`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeltPityState {
    pub cumulative_negative_weight: u32,
}

impl MeltPityState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weight_of(outcome: MeltOutcome, cfg: &MeltPityConfig) -> u32 {
        match outcome {
            MeltOutcome::LevelUp => 0,
            MeltOutcome::SameLevel => cfg.same_level_weight,
            MeltOutcome::LevelDown => cfg.level_down_weight,
            MeltOutcome::Destroyed => cfg.destroyed_weight,
        }
    }

    pub fn record(&mut self, outcome: MeltOutcome, cfg: &MeltPityConfig) {
        if outcome.is_favorable() {
            self.cumulative_negative_weight = 0;
        } else {
            self.cumulative_negative_weight =
                self.cumulative_negative_weight.saturating_add(Self::weight_of(outcome, cfg));
        }
        debug!("melt pity: {outcome:?} -> {}", self.cumulative_negative_weight);
    }

    /// Weight above the redistribution threshold (0 in the low-pity regime).
    #[inline]
    pub fn excess(&self, cfg: &MeltPityConfig) -> u32 {
        self.cumulative_negative_weight.saturating_sub(cfg.regime_threshold)
    }

    pub fn reset(&mut self) {
        self.cumulative_negative_weight = 0;
    }
}
