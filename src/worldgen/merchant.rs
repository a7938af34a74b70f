//! Merchant stock drawn from the catalog by building kind

use rand::Rng;
use serde::Serialize;

use crate::catalog::{Catalog, ItemStack};
use crate::core::config::BuildingConfig;
use crate::core::random::{pick, roll};
use crate::core::types::ItemId;
use crate::worldgen::building::BuildingKind;

/// A building's proprietor and the goods they hold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Merchant {
    pub name: String,
    pub stock: Vec<ItemStack>,
}

impl Merchant {
    /// Stock a merchant for a building kind; `None` for homes
    ///
    /// Weapon and armour merchants roll once per rarity tier and take one
    /// random item from each tier that passes. Grocers carry every food and
    /// taverns every drink.
    pub fn stock<R: Rng + ?Sized>(
        kind: BuildingKind,
        owner: &str,
        catalog: &Catalog,
        config: &BuildingConfig,
        rng: &mut R,
    ) -> Option<Self> {
        let stock = match kind {
            BuildingKind::Weapons => {
                tiered_stock(&catalog.weapon_tiers, config.weapon_tier_chance, rng)
            }
            BuildingKind::Armour => {
                tiered_stock(&catalog.armour_tiers, config.armour_tier_chance, rng)
            }
            BuildingKind::Food => bulk_stock(&catalog.foods, rng),
            BuildingKind::Tavern => bulk_stock(&catalog.drinks, rng),
            BuildingKind::Home => return None,
        };

        Some(Self {
            name: owner.to_string(),
            stock,
        })
    }

    /// Units of an item on offer
    pub fn quantity_of(&self, item: ItemId) -> u32 {
        self.stock
            .iter()
            .filter(|stack| stack.item == item)
            .map(|stack| stack.count)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.iter().all(|stack| stack.count == 0)
    }
}

fn tiered_stock<R: Rng + ?Sized>(tiers: &[Vec<ItemId>], chance: f64, rng: &mut R) -> Vec<ItemStack> {
    let mut stock = Vec::new();
    for tier in tiers {
        if !roll(rng, chance) {
            continue;
        }
        if let Some(&item) = pick(tier, rng) {
            stock.push(ItemStack::new(item, rng.gen_range(1..=2)));
        }
    }
    stock
}

fn bulk_stock<R: Rng + ?Sized>(items: &[ItemId], rng: &mut R) -> Vec<ItemStack> {
    items
        .iter()
        .map(|&item| ItemStack::new(item, rng.gen_range(4..=8)))
        .collect()
}
