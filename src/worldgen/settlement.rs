//! Settlements: a small grid of plots, some of which hold buildings
//!
//! The entrance is the bottom-centre plot. Building slots are rolled onto
//! random plots; a slot that lands on the entrance or on a plot that is
//! already built is dropped rather than rerolled.

use rand::Rng;

use crate::area::{Area, AreaBase, GenContext, Player, Portal, Spawn, WorldView};
use crate::core::config::SettlementConfig;
use crate::core::random::roll;
use crate::core::types::{AreaId, Cell, Direction};
use crate::spatial::Grid;
use crate::worldgen::building::{BuildingArea, BuildingKind};

const EXIT_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Down,
    Direction::Right,
];

/// Occupancy of one settlement plot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Plot {
    #[default]
    Vacant,
    Built { name: String, kind: BuildingKind },
}

#[derive(Debug)]
pub struct SettlementArea {
    pub(crate) base: AreaBase,
    name: String,
    pub(crate) plots: Grid<Plot>,
    start: Cell,
    slot_collisions: usize,
}

impl SettlementArea {
    /// Lay out a settlement with dimensions drawn from `config`
    pub fn generate(config: &SettlementConfig, seed: u64, exit: Portal, name: String) -> Self {
        let mut base = AreaBase::new(seed);
        let width = base.rng.gen_range(config.min_width..=config.max_width.max(config.min_width));
        let height = base
            .rng
            .gen_range(config.min_height..=config.max_height.max(config.min_height));
        Self::layout(base, width, height, exit, name)
    }

    /// Lay out a settlement of a fixed size
    pub fn with_dimensions(
        width: usize,
        height: usize,
        seed: u64,
        exit: Portal,
        name: String,
    ) -> Self {
        Self::layout(AreaBase::new(seed), width, height, exit, name)
    }

    fn layout(mut base: AreaBase, width: usize, height: usize, exit: Portal, name: String) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let plots = Grid::new(width, height);
        let start = (height - 1) * width + width / 2;
        base.add_portal(start, exit);

        Self {
            base,
            name,
            plots,
            start,
            slot_collisions: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plots(&self) -> &Grid<Plot> {
        &self.plots
    }

    /// Building slots dropped because they landed on the entrance or an
    /// already built plot
    pub fn slot_collisions(&self) -> usize {
        self.slot_collisions
    }

    pub fn building_count(&self) -> usize {
        self.plots
            .iter()
            .filter(|(_, plot)| matches!(plot, Plot::Built { .. }))
            .count()
    }

    pub fn starting_cell(&self) -> Cell {
        self.start
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.plots.contains(cell)
    }

    pub fn portal_text(&self) -> String {
        format!("The settlement of {} stands here...", self.name)
    }

    pub fn describe(&self, player: &mut Player, view: WorldView<'_>) {
        let cell = player.position.cell;

        if cell == self.start {
            player.say(format!(
                "You stand at the entrance to the settlement of {}.",
                self.name
            ));
            player.say("A weathered signpost lists the buildings found here:");
            let mut listed = 0;
            for (_, plot) in self.plots.iter() {
                if let Plot::Built { name, .. } = plot {
                    player.say(format!("- {}", name));
                    listed += 1;
                }
            }
            if listed == 0 {
                player.say("- The signpost is blank");
            }
        } else if let Some(portal) = self.base.portal_at(cell) {
            player.say(view.portal_text(portal));
        } else {
            player.say(format!("You walk along a quiet lane of {}.", self.name));
        }

        player.blank_line();
        player.say("A path stretches out in each of these directions:");
        for direction in EXIT_ORDER {
            if self.plots.step(cell, direction, 1).is_some() {
                player.say(format!("- {}", direction.key()));
            }
        }
    }

    pub(crate) fn populate(&mut self, id: AreaId, ctx: &mut GenContext<'_>) -> Vec<Spawn> {
        let slots = ctx.config.settlements.slots_per_width * self.plots.width();
        let mut spawns = Vec::new();

        for _ in 0..slots {
            let plot = self.base.rng.gen_range(0..self.plots.len());
            let built = matches!(self.plots.get(plot), Some(Plot::Built { .. }));
            if plot == self.start || built {
                self.slot_collisions += 1;
                continue;
            }

            let seed = self.base.rng.gen::<u64>();
            let grand = roll(&mut self.base.rng, ctx.config.buildings.grand_chance);
            let kind = BuildingKind::ALL[self.base.rng.gen_range(0..BuildingKind::ALL.len())];
            let building = BuildingArea::generate(kind, grand, seed, Portal::to_cell(id, plot), ctx);

            self.plots.set(
                plot,
                Plot::Built {
                    name: building.name().to_string(),
                    kind,
                },
            );
            spawns.push(Spawn {
                origin: plot,
                area: Area::Building(building),
                entry: Some(0),
            });
        }

        tracing::debug!(
            "{} laid out {}x{} with {} buildings ({} slot collisions)",
            self.name,
            self.plots.width(),
            self.plots.height(),
            spawns.len(),
            self.slot_collisions
        );
        spawns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{AreaKind, AreaRegistry};
    use crate::catalog::Catalog;
    use crate::core::config::WorldConfig;
    use crate::core::types::Position;

    fn outside() -> Portal {
        Portal::to_cell(AreaId::from_index(0), 100)
    }

    #[test]
    fn test_entrance_is_bottom_centre() {
        let settlement = SettlementArea::with_dimensions(5, 4, 1, outside(), "Ashford".into());
        assert_eq!(settlement.plots.xy(settlement.starting_cell()), (2, 3));
        assert_eq!(settlement.base.portal_at(settlement.starting_cell()), Some(outside()));
    }

    #[test]
    fn test_generated_dimensions_in_range() {
        let config = SettlementConfig::default();
        for seed in 0..50 {
            let s = SettlementArea::generate(&config, seed, outside(), "Dunmere".into());
            assert!((3..=5).contains(&s.plots.width()));
            assert!((4..=7).contains(&s.plots.height()));
        }
    }

    #[test]
    fn test_scenario_width_5_building_count() {
        let config = WorldConfig::default();
        let catalog = Catalog::builtin();

        for seed in 0..20 {
            let mut ctx = GenContext::new(&config, &catalog);
            let mut registry = AreaRegistry::new();
            let settlement =
                SettlementArea::with_dimensions(5, 6, seed, outside(), "Fallowby".into());
            let id = registry.register(Area::Settlement(settlement), &mut ctx);

            let Area::Settlement(settlement) = registry.get(id) else {
                panic!("expected settlement");
            };
            let buildings = registry
                .iter()
                .filter(|(_, a)| a.kind() == AreaKind::Building)
                .count();
            assert_eq!(buildings, 2 * 5 - settlement.slot_collisions());
            assert_eq!(settlement.building_count(), buildings);
        }
    }

    #[test]
    fn test_building_portals_are_two_way() {
        let config = WorldConfig::default();
        let catalog = Catalog::builtin();
        let mut ctx = GenContext::new(&config, &catalog);
        let mut registry = AreaRegistry::new();
        let settlement = SettlementArea::with_dimensions(4, 4, 8, outside(), "Lowmarsh".into());
        let id = registry.register(Area::Settlement(settlement), &mut ctx);

        for (plot, portal) in registry.get(id).portals() {
            if portal.target_area == AreaId::from_index(0) {
                continue;
            }
            assert_eq!(portal.target_cell, Some(0));
            let back = registry.get(portal.target_area).portal_at(0).unwrap();
            assert_eq!(back, Portal::to_cell(id, plot));
        }
    }

    #[test]
    fn test_look_at_entrance_lists_buildings() {
        let config = WorldConfig::default();
        let catalog = Catalog::builtin();
        let mut ctx = GenContext::new(&config, &catalog);
        let mut registry = AreaRegistry::new();
        let settlement = SettlementArea::with_dimensions(5, 5, 2, outside(), "Mirewick".into());
        let id = registry.register(Area::Settlement(settlement), &mut ctx);
        let area = registry.get(id);

        let mut player = Player::new("Tester", Position::new(id, area.starting_cell()));
        area.describe(&mut player, WorldView::new(&registry, &catalog));
        let text = player.take_output();

        assert!(text.contains("settlement of Mirewick"));
        for (_, building) in registry.iter().filter(|(_, a)| a.kind() == AreaKind::Building) {
            let Area::Building(building) = building else {
                unreachable!()
            };
            assert!(text.contains(building.name()));
        }
        // Bottom-centre: no way down
        assert!(text.lines().any(|line| line == "- W"));
        assert!(!text.lines().any(|line| line == "- S"));
    }
}
