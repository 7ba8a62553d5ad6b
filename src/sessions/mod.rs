// src/sessions/mod.rs

// Caller-facing flows composed from the systems. Each session owns its pity
// state; the surrounding game owns the session's lifetime and persistence.

pub mod lottery;
pub mod melt;

pub use lottery::*;
pub use melt::*;

#[cfg(feature = "balance-tools")]
pub mod sim;
#[cfg(feature = "balance-tools")]
pub mod calibrate;
