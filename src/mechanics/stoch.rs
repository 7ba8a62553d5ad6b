//! Stochastic mechanics: uniform draws over an injected `RngCore`.
//! Note: helpers take `&mut R` with `R: ?Sized` so callers can pass either a
//! concrete `WyRand` or a `&mut dyn RngCore` from the surrounding game.

use bevy_prng::WyRand;
use rand_core::{RngCore, SeedableRng};

/// Per-mille denominator used by every probability table in the crate.
pub const PER_MILLE: u32 = 1000;

/// Seeded WyRand; the generator the session and simulation helpers use.
#[inline]
pub fn seeded(seed: u64) -> WyRand {
    WyRand::from_seed(seed.to_le_bytes())
}

/// Uniform in [0, 1) from the top 53 bits of one `next_u64`.
#[inline]
pub fn unit_f64<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    ((rng.next_u64() >> 11) as f64) / ((1u64 << 53) as f64)
}

/// Uniform integer in [0, n). `n == 0` yields 0.
#[inline]
pub fn below<R: RngCore + ?Sized>(rng: &mut R, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    ((unit_f64(rng) * n as f64) as usize).min(n - 1)
}

/// Uniform per-mille roll in [0, 1000).
#[inline]
pub fn per_mille<R: RngCore + ?Sized>(rng: &mut R) -> u32 {
    below(rng, PER_MILLE as usize) as u32
}

/// Uniform pick from a slice (repetition across calls is allowed).
#[inline]
pub fn pick<'a, T, R: RngCore + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(below(rng, items.len()))
    }
}
