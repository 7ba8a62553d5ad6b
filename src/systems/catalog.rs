//! # Item catalog index
//!
//! Read-only lookup cache built once from the full item catalog:
//! - item → (category, tier)
//! - category × tier → item ids
//! - recyclable-category membership
//!
//! Excluded rows (quest items, placeholder icons, …) never make it into the
//! index, so every id it hands out is an eligible candidate. Queries never
//! fail: a missing category or tier is an empty result.

use std::collections::{BTreeSet, HashMap};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mechanics::tier::{QualityTier, TIER_COUNT};

pub type ItemId = u32;

/// One catalog row as supplied by the catalog provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub id: ItemId,
    pub category: String,
    pub tier: QualityTier,
    #[serde(default)]
    pub excluded: bool,
}

impl CatalogRow {
    pub fn new(id: ItemId, category: impl Into<String>, tier: QualityTier) -> Self {
        Self { id, category: category.into(), tier, excluded: false }
    }

    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }
}

/// Immutable per-item record kept by the index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemCatalogEntry {
    pub id: ItemId,
    pub category: String,
    pub tier: QualityTier,
}

type TierBuckets = [Vec<ItemId>; TIER_COUNT];

#[derive(Clone, Debug, Default)]
pub struct ItemCatalogIndex {
    entries: HashMap<ItemId, ItemCatalogEntry>,
    by_category: HashMap<String, TierBuckets>,
    recyclable: BTreeSet<String>,
}

impl ItemCatalogIndex {
    /// O(catalog) build. Duplicate ids keep the first row.
    pub fn build<I, S>(rows: impl IntoIterator<Item = CatalogRow>, recyclable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self {
            recyclable: recyclable.into_iter().map(Into::into).collect(),
            ..Self::default()
        };
        let mut skipped = 0usize;

        for row in rows {
            if row.excluded {
                skipped += 1;
                continue;
            }
            if index.entries.contains_key(&row.id) {
                warn!("catalog: duplicate item id {} ignored (category `{}`)", row.id, row.category);
                continue;
            }
            index
                .by_category
                .entry(row.category.clone())
                .or_default()[row.tier.index()]
                .push(row.id);
            index.entries.insert(
                row.id,
                ItemCatalogEntry { id: row.id, category: row.category, tier: row.tier },
            );
        }

        debug!(
            "catalog: indexed {} items over {} categories ({} excluded)",
            index.entries.len(),
            index.by_category.len(),
            skipped
        );
        index
    }

    /// Builds from a JSON array of [`CatalogRow`].
    pub fn from_json_str<I, S>(json: &str, recyclable: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<CatalogRow> = serde_json::from_str(json)?;
        Ok(Self::build(rows, recyclable))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: ItemId) -> Option<&ItemCatalogEntry> {
        self.entries.get(&id)
    }

    pub fn category_of(&self, id: ItemId) -> Option<&str> {
        self.entries.get(&id).map(|e| e.category.as_str())
    }

    pub fn tier_of(&self, id: ItemId) -> Option<QualityTier> {
        self.entries.get(&id).map(|e| e.tier)
    }

    pub fn items_by_category_and_tier(&self, category: &str, tier: QualityTier) -> &[ItemId] {
        self.by_category
            .get(category)
            .map(|buckets| buckets[tier.index()].as_slice())
            .unwrap_or(&[])
    }

    pub fn has_item_at_tier<'a>(
        &self,
        categories: impl IntoIterator<Item = &'a str>,
        tier: QualityTier,
    ) -> bool {
        categories
            .into_iter()
            .any(|c| !self.items_by_category_and_tier(c, tier).is_empty())
    }

    pub fn items_in_categories_at_tier<'a>(
        &self,
        categories: impl IntoIterator<Item = &'a str>,
        tier: QualityTier,
    ) -> Vec<ItemId> {
        categories
            .into_iter()
            .flat_map(|c| self.items_by_category_and_tier(c, tier).iter().copied())
            .collect()
    }

    /// Every id in the given categories, lowest tier first. Lottery pools are
    /// usually built from this.
    pub fn items_in_categories<'a>(&self, categories: impl IntoIterator<Item = &'a str>) -> Vec<ItemId> {
        let categories: Vec<&str> = categories.into_iter().collect();
        QualityTier::ALL
            .iter()
            .flat_map(|&tier| self.items_in_categories_at_tier(categories.iter().copied(), tier))
            .collect()
    }

    pub fn is_recyclable(&self, category: &str) -> bool {
        self.recyclable.contains(category)
    }

    pub fn recyclable_categories(&self) -> impl Iterator<Item = &str> {
        self.recyclable.iter().map(String::as_str)
    }
}
