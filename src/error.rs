//! Errors raised at construction and session boundaries.
//!
//! The probability core never fails: empty pools come back as `None` or a
//! short `Vec`, and out-of-range tier arithmetic resolves to a named outcome.
//! `OddsError` only shows up when building tables/configs/catalogs, or when a
//! session is asked to melt something it cannot.

use crate::mechanics::tier::QualityTier;
use crate::systems::catalog::ItemId;

#[derive(Debug, thiserror::Error)]
pub enum OddsError {
    #[error("invalid quality tier ordinal: {0} (expected 0..=6)")]
    InvalidTier(u8),

    #[error("melt row spends {0} per-mille on up/down/same (budget is 1000)")]
    MeltRowOverBudget(u32),

    #[error("mutation chance {0} per-mille exceeds 1000")]
    MutationOverBudget(u32),

    #[error("tier weight for {0:?} must be finite and non-negative")]
    InvalidTierWeight(QualityTier),

    #[error("unknown item id: {0}")]
    UnknownItem(ItemId),

    #[error("category `{0}` is not recyclable")]
    NotRecyclable(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OddsError>;
