//! A fully generated world and the entry points sessions use to explore it
//!
//! Generation runs to completion inside [`World::generate`]; no partially
//! built world is ever handed out. Afterwards the world is shared read-only
//! (typically behind an `Arc`) and only per-area contents change.

pub mod navigation;

use serde::Serialize;

use crate::area::{Area, AreaKind, AreaRegistry, GenContext, Player, WorldView};
use crate::catalog::Catalog;
use crate::core::config::WorldConfig;
use crate::core::error::Result;
use crate::core::types::{AreaId, Position};
use crate::worldgen::terrain::{TerrainArea, Tile};

pub use navigation::TransitOutcome;

/// Counts describing a generated world
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorldSummary {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub areas: usize,
    pub caves: usize,
    pub settlements: usize,
    pub buildings: usize,
    pub merchants: usize,
    pub enemies: usize,
    pub item_stacks: usize,
    pub water_tiles: usize,
    pub grass_tiles: usize,
    pub rock_tiles: usize,
    pub path_tiles: usize,
}

pub struct World {
    config: WorldConfig,
    catalog: Catalog,
    registry: AreaRegistry,
    root: AreaId,
}

impl World {
    /// Validate the config and build every area, starting from the root
    /// terrain
    pub fn generate(config: WorldConfig, catalog: Catalog) -> Result<Self> {
        config.validate()?;

        let mut registry = AreaRegistry::new();
        let root = {
            let mut ctx = GenContext::new(&config, &catalog);
            let terrain =
                TerrainArea::generate(&config.terrain, config.width, config.height, config.seed);
            registry.register(Area::Terrain(terrain), &mut ctx)
        };

        let world = Self {
            config,
            catalog,
            registry,
            root,
        };

        let summary = world.summary();
        tracing::info!(
            "Generated world (seed {}): {} areas, {} caves, {} settlements, {} buildings",
            summary.seed,
            summary.areas,
            summary.caves,
            summary.settlements,
            summary.buildings
        );
        Ok(world)
    }

    /// Generate with the built-in catalog
    pub fn from_config(config: WorldConfig) -> Result<Self> {
        Self::generate(config, Catalog::builtin())
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &AreaRegistry {
        &self.registry
    }

    pub fn root(&self) -> AreaId {
        self.root
    }

    pub fn area(&self, id: AreaId) -> &Area {
        self.registry.get(id)
    }

    pub fn view(&self) -> WorldView<'_> {
        WorldView::new(&self.registry, &self.catalog)
    }

    /// A new player standing on the root terrain's starting cell
    pub fn spawn_player(&self, name: impl Into<String>) -> Player {
        let start = self.area(self.root).starting_cell();
        Player::new(name, Position::new(self.root, start))
    }

    /// ASCII map of the root terrain
    pub fn render_map(&self) -> String {
        match self.area(self.root) {
            Area::Terrain(terrain) => terrain.render(&self.registry),
            _ => String::new(),
        }
    }

    pub fn summary(&self) -> WorldSummary {
        let mut summary = WorldSummary {
            seed: self.config.seed,
            width: self.config.width,
            height: self.config.height,
            areas: self.registry.len(),
            ..WorldSummary::default()
        };

        for (_, area) in self.registry.iter() {
            match area.kind() {
                AreaKind::Terrain => {}
                AreaKind::Cave => summary.caves += 1,
                AreaKind::Settlement => summary.settlements += 1,
                AreaKind::Building => summary.buildings += 1,
            }
            let contents = area.base().contents();
            summary.merchants += contents.merchants.len();
            summary.enemies += contents.enemies.len();
            summary.item_stacks += contents.items.values().map(Vec::len).sum::<usize>();
        }

        if let Area::Terrain(terrain) = self.area(self.root) {
            for (_, tile) in terrain.tiles().iter() {
                match tile {
                    Tile::Water => summary.water_tiles += 1,
                    Tile::Grass => summary.grass_tiles += 1,
                    Tile::Rock => summary.rock_tiles += 1,
                    Tile::Path => summary.path_tiles += 1,
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SludgeError;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_world_is_shareable() {
        assert_send_sync::<World>();
    }

    #[test]
    fn test_invalid_config_builds_nothing() {
        let config = WorldConfig {
            height: 0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            World::from_config(config),
            Err(SludgeError::InvalidDimensions { height: 0, .. })
        ));
    }

    #[test]
    fn test_default_world_summary() {
        let world = World::from_config(WorldConfig::default()).unwrap();
        let summary = world.summary();

        assert_eq!(world.root().index(), 0);
        assert_eq!(summary.areas, world.registry().len());
        assert_eq!(
            summary.areas,
            1 + summary.caves + summary.settlements + summary.buildings
        );
        assert_eq!(
            summary.water_tiles + summary.grass_tiles + summary.rock_tiles + summary.path_tiles,
            64 * 32
        );
        assert!(summary.caves > 0);
    }

    #[test]
    fn test_spawn_player_at_root_start() {
        let world = World::from_config(WorldConfig::default()).unwrap();
        let player = world.spawn_player("Agnes");
        assert_eq!(player.position, Position::new(world.root(), 16 * 64 + 32));
    }

    #[test]
    fn test_render_map_dimensions() {
        let world = World::from_config(WorldConfig::default()).unwrap();
        let map = world.render_map();
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines.len(), 34);
        assert!(lines.iter().all(|line| line.chars().count() == 66));
    }
}
