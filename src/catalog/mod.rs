//! Item, enemy, name and vocabulary tables loaded once at start-up
//!
//! Generation only ever reads the catalog. Item and enemy tables are ordered
//! lists addressed by [`ItemId`] / [`EnemyId`]; the weapon and armour tables
//! are additionally grouped into rarity tiers for weighted selection.

pub mod names;
pub mod source;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SludgeError};
use crate::core::types::{EnemyId, ItemId};

pub use names::NamePool;
pub use source::{CatalogSource, Habitat, Vocabulary};

/// What an item is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon { attack: i32 },
    Armour { defence: i32 },
    Food,
    Drink,
    Forage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
}

impl Item {
    pub fn attack(&self) -> i32 {
        match self.kind {
            ItemKind::Weapon { attack } => attack,
            _ => 0,
        }
    }
}

/// A pile of identical items lying on a cell or held by a merchant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: ItemId,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: ItemId, count: u32) -> Self {
        Self { item, count }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    pub verbs: Vec<String>,
    pub limb: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub damage: i32,
    pub max_health: i32,
    pub habitat: Habitat,
    pub attacks: Vec<Attack>,
}

/// A transient enemy occupying a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyInstance {
    pub enemy: EnemyId,
    pub health: i32,
}

/// Compiled catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    pub items: Vec<Item>,
    /// Weapon item IDs grouped by quality, most common tier first
    pub weapon_tiers: Vec<Vec<ItemId>>,
    /// Armour item IDs grouped by quality, most common tier first
    pub armour_tiers: Vec<Vec<ItemId>>,
    pub foods: Vec<ItemId>,
    pub drinks: Vec<ItemId>,
    pub forage: ItemId,
    pub enemies: Vec<EnemyTemplate>,
    pub cave_enemies: Vec<EnemyId>,
    pub wild_enemies: Vec<EnemyId>,
    pub settlement_names: Vec<String>,
    pub person_names: Vec<String>,
    pub vocabulary: Vocabulary,
}

fn require<T>(table: &'static str, entries: &[T]) -> Result<()> {
    if entries.is_empty() {
        return Err(SludgeError::EmptyCatalogTable(table));
    }
    Ok(())
}

impl Catalog {
    /// The catalog compiled from built-in content
    pub fn builtin() -> Self {
        // The built-in source always satisfies `validate_source`
        match Self::from_source(CatalogSource::default()) {
            Ok(catalog) => catalog,
            Err(e) => panic!("built-in catalog is invalid: {}", e),
        }
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let source: CatalogSource = toml::from_str(content)?;
        Self::from_source(source)
    }

    /// Load a catalog from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Compile a source into tiered tables
    pub fn from_source(source: CatalogSource) -> Result<Self> {
        validate_source(&source)?;

        let mut items = Vec::new();
        let mut push = |item: Item| {
            items.push(item);
            ItemId((items.len() - 1) as u32)
        };

        // Tier order follows quality order; stats climb with both indices
        let mut weapon_tiers = Vec::with_capacity(source.weapons.qualities.len());
        for (q, quality) in source.weapons.qualities.iter().enumerate() {
            let tier = source
                .weapons
                .forms
                .iter()
                .enumerate()
                .map(|(f, form)| {
                    push(Item {
                        name: format!("{} {}", quality.name, form),
                        description: quality.blurb.clone(),
                        kind: ItemKind::Weapon {
                            attack: (f * 10 + q) as i32,
                        },
                    })
                })
                .collect();
            weapon_tiers.push(tier);
        }

        let mut armour_tiers = Vec::with_capacity(source.armour.qualities.len());
        for (q, quality) in source.armour.qualities.iter().enumerate() {
            let tier = source
                .armour
                .forms
                .iter()
                .enumerate()
                .map(|(f, form)| {
                    push(Item {
                        name: format!("{} {}", quality.name, form),
                        description: quality.blurb.clone(),
                        kind: ItemKind::Armour {
                            defence: (f * 5 + q) as i32,
                        },
                    })
                })
                .collect();
            armour_tiers.push(tier);
        }

        let foods = source
            .foods
            .iter()
            .map(|food| {
                push(Item {
                    name: food.name.clone(),
                    description: food.description.clone(),
                    kind: ItemKind::Food,
                })
            })
            .collect();
        let drinks = source
            .drinks
            .iter()
            .map(|drink| {
                push(Item {
                    name: drink.name.clone(),
                    description: drink.description.clone(),
                    kind: ItemKind::Drink,
                })
            })
            .collect();
        let forage = push(Item {
            name: source.forage.name.clone(),
            description: source.forage.description.clone(),
            kind: ItemKind::Forage,
        });

        let mut enemies = Vec::with_capacity(source.enemies.len());
        let mut cave_enemies = Vec::new();
        let mut wild_enemies = Vec::new();
        for def in source.enemies {
            let id = EnemyId(enemies.len() as u32);
            match def.habitat {
                Habitat::Cave => cave_enemies.push(id),
                Habitat::Wilds => wild_enemies.push(id),
            }
            enemies.push(EnemyTemplate {
                name: def.name,
                damage: def.damage,
                max_health: def.health,
                habitat: def.habitat,
                attacks: def
                    .attacks
                    .into_iter()
                    .map(|a| Attack {
                        verbs: a.verbs,
                        limb: a.limb,
                    })
                    .collect(),
            });
        }

        require("enemies (cave habitat)", &cave_enemies)?;

        Ok(Self {
            items,
            weapon_tiers,
            armour_tiers,
            foods,
            drinks,
            forage,
            enemies,
            cave_enemies,
            wild_enemies,
            settlement_names: source.settlement_names,
            person_names: source.person_names,
            vocabulary: source.vocabulary,
        })
    }

    /// Item definition; panics on an ID this catalog never issued
    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id.0 as usize]
    }

    /// Enemy template; panics on an ID this catalog never issued
    pub fn enemy(&self, id: EnemyId) -> &EnemyTemplate {
        &self.enemies[id.0 as usize]
    }

    /// Fresh instance of a template at full health
    pub fn spawn_enemy(&self, id: EnemyId) -> EnemyInstance {
        EnemyInstance {
            enemy: id,
            health: self.enemy(id).max_health,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_source(source: &CatalogSource) -> Result<()> {
    require("weapons.qualities", &source.weapons.qualities)?;
    require("weapons.forms", &source.weapons.forms)?;
    require("armour.qualities", &source.armour.qualities)?;
    require("armour.forms", &source.armour.forms)?;
    require("foods", &source.foods)?;
    require("drinks", &source.drinks)?;
    require("enemies", &source.enemies)?;
    require("settlement_names", &source.settlement_names)?;
    require("person_names", &source.person_names)?;

    for enemy in &source.enemies {
        if enemy.health <= 0 {
            return Err(SludgeError::Catalog(format!(
                "enemy '{}' must have positive health",
                enemy.name
            )));
        }
    }

    let v = &source.vocabulary;
    require("vocabulary.grand_furniture", &v.grand_furniture)?;
    require("vocabulary.grand_floors", &v.grand_floors)?;
    require("vocabulary.grand_walls", &v.grand_walls)?;
    require("vocabulary.humble_furniture", &v.humble_furniture)?;
    require("vocabulary.humble_floors", &v.humble_floors)?;
    require("vocabulary.humble_walls", &v.humble_walls)?;
    require("vocabulary.tavern_adjectives", &v.tavern_adjectives)?;
    require("vocabulary.tavern_nouns", &v.tavern_nouns)?;
    require("vocabulary.food_shop_nouns", &v.food_shop_nouns)?;
    require("vocabulary.weapon_shop_nouns", &v.weapon_shop_nouns)?;
    require("vocabulary.armour_shop_nouns", &v.armour_shop_nouns)?;
    require("vocabulary.home_nouns", &v.home_nouns)?;
    Ok(())
}
