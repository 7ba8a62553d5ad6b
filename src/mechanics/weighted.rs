//! Weighted sampling: pick one id with probability proportional to weight.
//! Stateless and reentrant; the only state is the caller's RNG.

use log::trace;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::mechanics::stoch;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedCandidate<T> {
    pub id: T,
    pub weight: f64,
}

impl<T> WeightedCandidate<T> {
    pub fn new(id: T, weight: f64) -> Self {
        Self { id, weight }
    }

    /// Usable weight: strictly positive and finite.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.weight > 0.0 && self.weight.is_finite()
    }
}

/// Draws one id. Non-positive (and non-finite) weights are filtered out first;
/// `None` when nothing survives the filter.
///
/// `r` is uniform in `[0, total)` and the walk selects the first candidate with
/// `r <= cumulative`, so a roll landing exactly on a boundary resolves to the
/// candidate being examined rather than skipping it.
pub fn sample<T: Copy, R: RngCore + ?Sized>(
    candidates: &[WeightedCandidate<T>],
    rng: &mut R,
) -> Option<T> {
    // weights are walked relative to the largest one so huge finite weights
    // cannot sum to infinity
    let scale = candidates.iter().filter(|c| c.is_live()).map(|c| c.weight).fold(0.0, f64::max);
    if scale <= 0.0 {
        return None;
    }
    let total: f64 = candidates.iter().filter(|c| c.is_live()).map(|c| c.weight / scale).sum();

    let r = stoch::unit_f64(rng) * total;
    let mut cumulative = 0.0;
    let mut last = None;
    for c in candidates.iter().filter(|c| c.is_live()) {
        cumulative += c.weight / scale;
        last = Some(c.id);
        if r <= cumulative {
            trace!("weighted pick: r={r:.4} cumulative={cumulative:.4} total={total:.4}");
            return Some(c.id);
        }
    }
    // float drift: r can sit a hair above the final running sum
    last
}
