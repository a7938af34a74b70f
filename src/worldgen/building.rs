//! Single-cell buildings inside settlements

use derive_more::Display;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::area::{AreaBase, GenContext, Player, Portal, Spawn, WorldView};
use crate::catalog::Vocabulary;
use crate::core::random::{look_rng, pick};
use crate::worldgen::merchant::Merchant;

/// What a building is used for
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    #[display(fmt = "tavern")]
    Tavern,
    #[display(fmt = "food")]
    Food,
    #[display(fmt = "weapons")]
    Weapons,
    #[display(fmt = "armour")]
    Armour,
    #[display(fmt = "home")]
    Home,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 5] = [
        BuildingKind::Tavern,
        BuildingKind::Food,
        BuildingKind::Weapons,
        BuildingKind::Armour,
        BuildingKind::Home,
    ];

    pub fn is_commercial(self) -> bool {
        self != BuildingKind::Home
    }

    fn nouns(self, vocabulary: &Vocabulary) -> &[String] {
        match self {
            BuildingKind::Tavern => &vocabulary.tavern_nouns,
            BuildingKind::Food => &vocabulary.food_shop_nouns,
            BuildingKind::Weapons => &vocabulary.weapon_shop_nouns,
            BuildingKind::Armour => &vocabulary.armour_shop_nouns,
            BuildingKind::Home => &vocabulary.home_nouns,
        }
    }

    fn details(self, vocabulary: &Vocabulary) -> &[String] {
        match self {
            BuildingKind::Tavern => &vocabulary.tavern_details,
            BuildingKind::Food => &vocabulary.food_details,
            BuildingKind::Weapons => &vocabulary.weapon_details,
            BuildingKind::Armour => &vocabulary.armour_details,
            BuildingKind::Home => &vocabulary.home_details,
        }
    }
}

#[derive(Debug)]
pub struct BuildingArea {
    pub(crate) base: AreaBase,
    name: String,
    kind: BuildingKind,
    grand: bool,
    owner: String,
}

impl BuildingArea {
    /// Build a named building whose only cell leads back out through `exit`
    pub fn generate(
        kind: BuildingKind,
        grand: bool,
        seed: u64,
        exit: Portal,
        ctx: &GenContext<'_>,
    ) -> Self {
        let mut base = AreaBase::new(seed);
        let vocabulary = &ctx.catalog.vocabulary;

        let owner = pick(&ctx.catalog.person_names, &mut base.rng)
            .cloned()
            .unwrap_or_else(|| "Nobody".to_string());
        let noun = pick(kind.nouns(vocabulary), &mut base.rng)
            .cloned()
            .unwrap_or_else(|| kind.to_string());
        let name = match kind {
            BuildingKind::Tavern => {
                let adjective = pick(&vocabulary.tavern_adjectives, &mut base.rng)
                    .map(String::as_str)
                    .unwrap_or("Old");
                format!("The {} {}", adjective, noun)
            }
            _ => format!("{}'s {}", owner, noun),
        };

        base.add_portal(0, exit);
        Self {
            base,
            name,
            kind,
            grand,
            owner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BuildingKind {
        self.kind
    }

    pub fn is_grand(&self) -> bool {
        self.grand
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn portal_text(&self) -> String {
        format!("You stand by the doorway to {}...", self.name)
    }

    pub fn describe(&self, player: &mut Player, view: WorldView<'_>) {
        let cell = player.position.cell;
        let vocabulary = &view.catalog.vocabulary;
        let mut rng = look_rng(self.base.seed(), cell);

        let (walls, furniture, floors) = if self.grand {
            (
                &vocabulary.grand_walls,
                &vocabulary.grand_furniture,
                &vocabulary.grand_floors,
            )
        } else {
            (
                &vocabulary.humble_walls,
                &vocabulary.humble_furniture,
                &vocabulary.humble_floors,
            )
        };

        player.say(format!("You are in {}.", self.name));
        for list in [walls, furniture, floors] {
            if let Some(line) = list.choose(&mut rng) {
                player.say(format!("- {}", line));
            }
        }
        if let Some(detail) = self.kind.details(vocabulary).choose(&mut rng) {
            player.say(format!("- {}", detail));
        }

        if self.base.contents().merchants.contains_key(&cell) {
            player.say(format!(
                "- The building's proprietor, {}, invites you to trade...",
                self.owner
            ));
        }
        if self.base.portal_at(cell).is_some() {
            player.say("- The doorway back outside is here");
        }
    }

    pub(crate) fn populate(&mut self, ctx: &mut GenContext<'_>) -> Vec<Spawn> {
        let merchant = Merchant::stock(
            self.kind,
            &self.owner,
            ctx.catalog,
            &ctx.config.buildings,
            &mut self.base.rng,
        );
        if let Some(merchant) = merchant {
            self.base.contents_mut().merchants.insert(0, merchant);
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{Area, AreaRegistry};
    use crate::catalog::Catalog;
    use crate::core::config::WorldConfig;
    use crate::core::types::{AreaId, Position};

    fn exit() -> Portal {
        Portal::to_cell(AreaId::from_index(0), 4)
    }

    #[test]
    fn test_tavern_name_pattern() {
        let config = WorldConfig::default();
        let catalog = Catalog::builtin();
        let ctx = GenContext::new(&config, &catalog);
        let tavern = BuildingArea::generate(BuildingKind::Tavern, false, 9, exit(), &ctx);
        assert!(tavern.name().starts_with("The "));
    }

    #[test]
    fn test_shop_named_after_owner() {
        let config = WorldConfig::default();
        let catalog = Catalog::builtin();
        let ctx = GenContext::new(&config, &catalog);
        let shop = BuildingArea::generate(BuildingKind::Weapons, true, 9, exit(), &ctx);
        assert!(shop.name().starts_with(&format!("{}'s ", shop.owner())));
        assert!(shop.is_grand());
        assert_eq!(shop.base.portal_at(0), Some(exit()));
    }

    #[test]
    fn test_merchant_only_for_commercial_kinds() {
        let config = WorldConfig::default();
        let catalog = Catalog::builtin();
        let mut ctx = GenContext::new(&config, &catalog);
        let mut registry = AreaRegistry::new();

        for (seed, kind) in BuildingKind::ALL.into_iter().enumerate() {
            let building = BuildingArea::generate(kind, false, seed as u64, exit(), &ctx);
            let id = registry.register(Area::Building(building), &mut ctx);
            let has_merchant = registry.get(id).merchant_at(0).is_some();
            assert_eq!(has_merchant, kind.is_commercial(), "{}", kind);
        }
    }

    #[test]
    fn test_look_is_repeatable_and_mentions_proprietor() {
        let config = WorldConfig::default();
        let catalog = Catalog::builtin();
        let mut ctx = GenContext::new(&config, &catalog);
        let mut registry = AreaRegistry::new();
        let building = BuildingArea::generate(BuildingKind::Food, true, 31, exit(), &ctx);
        let id = registry.register(Area::Building(building), &mut ctx);
        let area = registry.get(id);
        let view = WorldView::new(&registry, &catalog);

        let mut player = Player::new("Tester", Position::new(id, 0));
        area.describe(&mut player, view);
        let first = player.take_output();
        area.describe(&mut player, view);
        assert_eq!(first, player.take_output());
        assert!(first.contains("invites you to trade"));
    }
}
