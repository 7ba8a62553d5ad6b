// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::VecDeque;

use loot_odds::{CatalogRow, ItemCatalogIndex, QualityTier};
use rand_core::RngCore;

/// Replays a fixed list of `next_u64` words; panics when it runs dry so a
/// test can't silently consume more randomness than it scripted.
pub struct ScriptedRng {
    words: VecDeque<u64>,
}

impl ScriptedRng {
    pub fn new(words: impl IntoIterator<Item = u64>) -> Self {
        Self { words: words.into_iter().collect() }
    }

    /// Scripts a sequence of per-mille rolls.
    pub fn per_mille(rolls: &[u32]) -> Self {
        Self::new(rolls.iter().map(|&k| per_mille_word(k)))
    }

    pub fn remaining(&self) -> usize {
        self.words.len()
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.words.pop_front().expect("scripted rng exhausted")
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dst)
    }
}

/// Word that `stoch::unit_f64` maps to exactly `u` (for dyadic `u`).
pub fn unit_word(u: f64) -> u64 {
    ((u * (1u64 << 53) as f64) as u64) << 11
}

/// Word that `stoch::per_mille` maps to `k`.
pub fn per_mille_word(k: u32) -> u64 {
    unit_word((k as f64 + 0.5) / 1000.0)
}

pub const WEAPON: [u32; 7] = [100, 101, 102, 103, 104, 105, 106];

/// Weapon: one item per tier.
/// Armor: White, Green, Blue, Orange.
/// Bullet: White, Red.
/// Quest: not recyclable; one excluded placeholder row.
pub fn catalog_rows() -> Vec<CatalogRow> {
    let mut rows: Vec<CatalogRow> = QualityTier::ALL
        .iter()
        .zip(WEAPON)
        .map(|(&tier, id)| CatalogRow::new(id, "Weapon", tier))
        .collect();
    rows.extend([
        CatalogRow::new(200, "Armor", QualityTier::White),
        CatalogRow::new(201, "Armor", QualityTier::Green),
        CatalogRow::new(202, "Armor", QualityTier::Blue),
        CatalogRow::new(204, "Armor", QualityTier::Orange),
        CatalogRow::new(300, "Bullet", QualityTier::White),
        CatalogRow::new(305, "Bullet", QualityTier::Red),
        CatalogRow::new(900, "Quest", QualityTier::Blue),
        CatalogRow::new(901, "Quest", QualityTier::Purple).excluded(),
    ]);
    rows
}

pub fn catalog() -> ItemCatalogIndex {
    ItemCatalogIndex::build(catalog_rows(), ["Weapon", "Armor", "Bullet"])
}
