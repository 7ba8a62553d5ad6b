// Run with:
//   RUST_LOG=info cargo run --example melt --features balance-tools

use loot_odds::mechanics::stoch;
use loot_odds::sessions::calibrate::{self, CalibrationTarget};
use loot_odds::sessions::{MeltFurnace, sim};
use loot_odds::systems::melt_pity::MeltOutcome;
use loot_odds::{CatalogRow, ItemCatalogIndex, OddsConfig, QualityTier};

fn catalog(cfg: &OddsConfig) -> ItemCatalogIndex {
    let mut rows = Vec::new();
    for (base, category) in [(100, "Weapon"), (200, "Armor"), (300, "Bullet")] {
        for (i, &tier) in QualityTier::ALL.iter().enumerate() {
            rows.push(CatalogRow::new(base + i as u32, category, tier));
        }
    }
    ItemCatalogIndex::build(rows, cfg.recyclable_categories.iter().map(String::as_str))
}

fn main() -> loot_odds::Result<()> {
    env_logger::init();

    let cfg = OddsConfig::default();
    let catalog = catalog(&cfg);

    // 1) Melt a stack of ten Blue swords
    let mut furnace = MeltFurnace::from_config(&cfg);
    let mut rng = stoch::seeded(7);
    let batch = furnace.melt_stack(102, 10, &catalog, &mut rng)?;
    for step in &batch.steps {
        println!(
            "{:?}{:<10} -> {:?}  pity {}",
            step.outcome,
            if step.is_mutated { " (mutated)" } else { "" },
            step.reward,
            step.pity_after.cumulative_negative_weight
        );
    }

    // 2) Long-run rates per source tier
    println!("\ntier       up     down   same   gone   peak pity");
    for (i, &tier) in QualityTier::ALL.iter().enumerate() {
        let stats = sim::simulate_melt(100 + i as u32, 20_000, &catalog, &cfg, 11)?;
        println!(
            "{:<9} {:>6.3} {:>6.3} {:>6.3} {:>6.3} {:>6}",
            format!("{tier:?}"),
            stats.rate(MeltOutcome::LevelUp),
            stats.rate(MeltOutcome::LevelDown),
            stats.rate(MeltOutcome::SameLevel),
            stats.rate(MeltOutcome::Destroyed),
            stats.peak_pity
        );
    }

    // 3) Tune the lottery pity bonus for a 12% high-tier rate
    let weapons = catalog.items_in_categories(["Weapon"]);
    let out = calibrate::calibrate_bonus(&weapons, &catalog, &cfg, CalibrationTarget::new(0.12));
    println!(
        "\nbonus_per_excess {:.1} -> high-tier rate {:.4} ({} passes, converged: {})",
        out.bonus_per_excess, out.observed_high_tier_rate, out.iters, out.converged
    );
    Ok(())
}
