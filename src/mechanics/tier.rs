//! Quality tiers: ordinal rarity rank 0 (White) ..= 6 (LightRed).
//! Tier arithmetic is checked; stepping past either end yields `None`.

use serde::{Deserialize, Serialize};

use crate::error::OddsError;

pub const TIER_COUNT: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum QualityTier {
    White = 0,
    Green = 1,
    Blue = 2,
    Purple = 3,
    Orange = 4,
    Red = 5,
    LightRed = 6,
}

impl QualityTier {
    pub const ALL: [QualityTier; TIER_COUNT] = [
        QualityTier::White,
        QualityTier::Green,
        QualityTier::Blue,
        QualityTier::Purple,
        QualityTier::Orange,
        QualityTier::Red,
        QualityTier::LightRed,
    ];
    pub const MAX: QualityTier = QualityTier::LightRed;

    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Next tier up, `None` above `MAX`.
    #[inline]
    pub fn up(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Next tier down, `None` below White.
    #[inline]
    pub fn down(self) -> Option<Self> {
        self.ordinal().checked_sub(1).and_then(Self::from_ordinal)
    }
}

impl TryFrom<u8> for QualityTier {
    type Error = OddsError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(ordinal).ok_or(OddsError::InvalidTier(ordinal))
    }
}

impl From<QualityTier> for u8 {
    fn from(tier: QualityTier) -> u8 {
        tier.ordinal()
    }
}
