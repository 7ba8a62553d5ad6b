/*!
`loot_odds`: reward-probability engine for loot-box draws and item melting.

What it does
- **Lottery**: draws one reward from a weighted, quality-tiered pool. A tier
  is chosen by per-mille weight, then an item uniformly inside that tier.
- **Melt**: mutates an item's tier up, down, sideways or into nothing, with
  an independent chance of the reward coming from another category.
- **Pity**: two streak counters shift odds after runs of bad luck. The
  lottery streak boosts high tiers; the melt accumulator redistributes odds
  toward LevelUp/SameLevel.

How to use (call surface only)
- Build an [`ItemCatalogIndex`] once from catalog rows.
- Load an [`OddsConfig`] (or use `OddsConfig::default()`).
- Per player session, keep a `LotteryMachine` and/or `MeltFurnace` and call
  `draw` / `melt_stack` with an injected `rand_core::RngCore`.
- For balancing, `sessions::sim` runs Monte Carlo batches and
  `sessions::calibrate` tunes the lottery pity bonus through [`refine_det`].

What it does NOT do
- No rendering, payment, inventory or persistence. Pity states are plain
  serde values; saving them is the caller's business.
*/

pub mod config;
pub mod error;
pub mod mechanics;
pub mod systems;
#[cfg(feature = "sessions")]
pub mod sessions;

pub use config::OddsConfig;
pub use error::{OddsError, Result};
pub use mechanics::{QualityTier, WeightedCandidate};
pub use systems::catalog::{CatalogRow, ItemCatalogIndex, ItemId};

/// Deterministic refinement: θ_{t+1} = update(θ_t, measure(simulate(θ_t))).
/// Returns the first θ for which `converged(θ_t, θ_{t+1})` holds, or the last
/// one after `max_iters`.
pub fn refine_det<P, D, M, Sim, Meas, Upd, Conv>(
    mut theta: P,
    mut simulate: Sim,
    mut measure: Meas,
    mut update: Upd,
    converged: Conv,
    max_iters: usize,
) -> P
where
    Sim: FnMut(&P) -> D,
    Meas: FnMut(&D) -> M,
    Upd: FnMut(&P, &M) -> P,
    Conv: Fn(&P, &P) -> bool,
{
    for _ in 0..max_iters {
        let data = simulate(&theta);
        let pi = measure(&data);
        let theta_next = update(&theta, &pi);
        if converged(&theta, &theta_next) {
            return theta_next;
        }
        theta = theta_next;
    }
    theta
}
