// Run with:
//   RUST_LOG=debug cargo run --example lottery --features sessions

use loot_odds::mechanics::stoch;
use loot_odds::sessions::LotteryMachine;
use loot_odds::{CatalogRow, ItemCatalogIndex, OddsConfig, QualityTier};

fn main() {
    env_logger::init();

    // 1) A small catalog: one sword per tier, plus two shields
    let mut rows: Vec<CatalogRow> = QualityTier::ALL
        .iter()
        .enumerate()
        .map(|(i, &tier)| CatalogRow::new(10 + i as u32, "Weapon", tier))
        .collect();
    rows.push(CatalogRow::new(50, "Armor", QualityTier::Green));
    rows.push(CatalogRow::new(51, "Armor", QualityTier::Red));

    let cfg = OddsConfig::default();
    let catalog = ItemCatalogIndex::build(rows, cfg.recyclable_categories.iter().map(String::as_str));
    let pool: Vec<u32> = catalog.items_in_categories(["Weapon", "Armor"]);

    // 2) Thirty paid draws through one session
    let mut machine = LotteryMachine::from_config(&cfg);
    let mut rng = stoch::seeded(2024);
    println!("draw  item  tier        streak");
    for n in 1..=30 {
        let Some(id) = machine.draw(&pool, &catalog, &mut rng) else {
            println!("{n:>4}  pool exhausted");
            break;
        };
        let tier = catalog.tier_of(id).map(|t| format!("{t:?}")).unwrap_or_default();
        println!("{n:>4}  {id:>4}  {tier:<10}  {}", machine.pity().consecutive_non_high_tier_draws);
    }

    // 3) A chest reward: five items, pity boost applied but not consumed
    let bundle = machine.reward_bundle(&pool, 5, true, &catalog, &mut rng);
    println!("\nchest: {bundle:?}");

    // 4) The streak is what the game would persist
    match serde_json::to_string(&machine.pity()) {
        Ok(json) => println!("saved pity: {json}"),
        Err(e) => eprintln!("could not save pity: {e}"),
    }
}
