//! Root terrain: fractal noise island plus cave and settlement placement
//!
//! Height at each cell is multi-octave Perlin noise, pulled down by a radial
//! penalty that grows with distance from the map centre, so the land gathers
//! into an island. The penalty is divided by map width so the island keeps
//! its shape at any resolution.

use ahash::AHashSet;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::area::{Area, AreaBase, AreaRegistry, GenContext, Player, Portal, Spawn, WorldView};
use crate::core::config::TerrainConfig;
use crate::core::random::{pick, roll};
use crate::core::types::{AreaId, Cell};
use crate::spatial::Grid;
use crate::worldgen::cave::CaveArea;
use crate::worldgen::road;
use crate::worldgen::settlement::SettlementArea;

/// Viewport half-extents around the player on a terrain look
const VIEW_HALF_WIDTH: i64 = 4;
const VIEW_HALF_HEIGHT: i64 = 2;

/// Tile classification of a root terrain cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tile {
    Water,
    Grass,
    Rock,
    Path,
}

impl Tile {
    pub fn glyph(self) -> char {
        match self {
            Tile::Water => '~',
            Tile::Grass => '/',
            Tile::Rock => '+',
            Tile::Path => '=',
        }
    }

    pub fn is_walkable(self) -> bool {
        self != Tile::Water
    }
}

/// Fold a 64-bit world seed into the 32-bit seed the noise functions take
fn noise_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// Classify every cell of a `width × height` map
pub fn generate_tiles(config: &TerrainConfig, width: usize, height: usize, seed: u64) -> Grid<Tile> {
    let fbm: Fbm<Perlin> = Fbm::new(noise_seed(seed)).set_octaves(config.octaves);
    let cx = (width / 2) as f64;
    let cy = (height / 2) as f64;

    Grid::from_fn(width, height, |x, y| {
        let raw = fbm.get([x as f64 * config.noise_scale, y as f64 * config.noise_scale]);
        let mut height_value = (0.5 + 0.5 * raw).clamp(0.0, 1.0);

        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        let distance = (dx * dx + dy * dy).sqrt();
        height_value -= config.falloff * distance / width as f64;
        height_value *= config.rescale;

        if height_value > config.rock_threshold {
            Tile::Rock
        } else if height_value > config.grass_threshold {
            Tile::Grass
        } else {
            Tile::Water
        }
    })
}

/// Sub-areas to place for a rate per thousand cells
///
/// Any positive rate places at least one.
fn placement_count(per_thousand: f64, cells: usize) -> usize {
    if per_thousand <= 0.0 {
        return 0;
    }
    ((per_thousand * cells as f64 / 1000.0).round() as usize).max(1)
}

/// Random walkable cell not yet used as an origin, within `attempts` tries
fn find_site(
    tiles: &Grid<Tile>,
    rng: &mut ChaCha8Rng,
    occupied: &AHashSet<Cell>,
    attempts: usize,
    accept: impl Fn(Cell) -> bool,
) -> Option<Cell> {
    if tiles.is_empty() {
        return None;
    }
    for _ in 0..attempts {
        let cell = rng.gen_range(0..tiles.len());
        let walkable = tiles.get(cell).map_or(false, |t| t.is_walkable());
        if walkable && !occupied.contains(&cell) && accept(cell) {
            return Some(cell);
        }
    }
    None
}

/// The root area of the world
#[derive(Debug)]
pub struct TerrainArea {
    pub(crate) base: AreaBase,
    pub(crate) tiles: Grid<Tile>,
}

impl TerrainArea {
    pub fn generate(config: &TerrainConfig, width: usize, height: usize, seed: u64) -> Self {
        Self::from_tiles(generate_tiles(config, width, height, seed), seed)
    }

    /// Terrain over a prepared tile grid
    pub fn from_tiles(tiles: Grid<Tile>, seed: u64) -> Self {
        Self {
            base: AreaBase::new(seed),
            tiles,
        }
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        self.tiles.get(cell).copied()
    }

    pub fn starting_cell(&self) -> Cell {
        self.tiles.center()
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.tile(cell).map_or(false, Tile::is_walkable)
    }

    pub fn portal_text(&self) -> String {
        "The open wilds stretch away before you...".to_string()
    }

    /// Map glyph of a cell: the kind of area a portal leads to, else the tile
    fn glyph_at(&self, cell: Cell, registry: &AreaRegistry) -> char {
        match self.base.portal_at(cell) {
            Some(portal) => registry.get(portal.target_area).kind().glyph(),
            None => self.tiles.get(cell).map_or(' ', |t| t.glyph()),
        }
    }

    pub fn describe(&self, player: &mut Player, view: WorldView<'_>) {
        let cell = player.position.cell;
        let (x, y) = self.tiles.xy(cell);
        player.say(format!(
            "- Glancing at your map you determine your position to be [{},{}]",
            x, y
        ));
        if let Some(portal) = self.base.portal_at(cell) {
            player.say(format!("- {}", view.portal_text(portal)));
        }

        player.blank_line();
        for dy in -VIEW_HALF_HEIGHT..=VIEW_HALF_HEIGHT {
            let row: String = (-VIEW_HALF_WIDTH..=VIEW_HALF_WIDTH)
                .map(|dx| {
                    if dx == 0 && dy == 0 {
                        return 'X';
                    }
                    match self.tiles.cell_at(x as i64 + dx, y as i64 + dy) {
                        Some(c) => self.glyph_at(c, view.registry),
                        None => '#',
                    }
                })
                .collect();
            player.say(row);
        }
    }

    /// Whole map as ASCII with a `#` border
    pub fn render(&self, registry: &AreaRegistry) -> String {
        let border = "#".repeat(self.tiles.width() + 2);
        let mut out = String::with_capacity((self.tiles.width() + 3) * (self.tiles.height() + 2));
        out.push_str(&border);
        out.push('\n');
        for y in 0..self.tiles.height() {
            out.push('#');
            for x in 0..self.tiles.width() {
                let cell = y * self.tiles.width() + x;
                out.push(self.glyph_at(cell, registry));
            }
            out.push('#');
            out.push('\n');
        }
        out.push_str(&border);
        out.push('\n');
        out
    }

    pub(crate) fn populate(&mut self, id: AreaId, ctx: &mut GenContext<'_>) -> Vec<Spawn> {
        let cfg = &ctx.config.terrain;
        let cells = self.tiles.len();
        let centre = self.starting_cell();
        let min_distance = cfg.settlement_min_center_distance;

        let mut occupied = AHashSet::new();
        occupied.insert(centre);
        let mut spawns = Vec::new();

        let cave_count = placement_count(cfg.caves_per_thousand, cells);
        for placed in 0..cave_count {
            let Some(origin) = find_site(
                &self.tiles,
                &mut self.base.rng,
                &occupied,
                cfg.placement_attempts,
                |_| true,
            ) else {
                tracing::warn!("Placed {} of {} caves before running out of sites", placed, cave_count);
                break;
            };
            occupied.insert(origin);

            let seed = self.base.rng.gen::<u64>();
            let cave = CaveArea::generate(&ctx.config.caves, seed, Portal::to_cell(id, origin));
            tracing::debug!("Cave at cell {} (seed {})", origin, seed);
            spawns.push(Spawn {
                origin,
                area: Area::Cave(cave),
                entry: None,
            });
        }

        let settlement_count = placement_count(cfg.settlements_per_thousand, cells);
        for placed in 0..settlement_count {
            let tiles = &self.tiles;
            let Some(origin) = find_site(
                tiles,
                &mut self.base.rng,
                &occupied,
                cfg.placement_attempts,
                |cell| tiles.distance(cell, centre) >= min_distance,
            ) else {
                tracing::warn!(
                    "Placed {} of {} settlements before running out of sites",
                    placed,
                    settlement_count
                );
                break;
            };
            occupied.insert(origin);

            road::connect(&mut self.tiles, origin, centre);

            let seed = self.base.rng.gen::<u64>();
            let name = ctx
                .settlement_names
                .draw(&mut self.base.rng)
                .unwrap_or_else(|| format!("Settlement {}", placed + 1));
            tracing::debug!("Settlement {} at cell {} (seed {})", name, origin, seed);
            let settlement = SettlementArea::generate(
                &ctx.config.settlements,
                seed,
                Portal::to_cell(id, origin),
                name,
            );
            spawns.push(Spawn {
                origin,
                area: Area::Settlement(settlement),
                entry: None,
            });
        }

        if !ctx.catalog.wild_enemies.is_empty() {
            let mut wild = 0;
            for cell in self.tiles.cells() {
                if self.tiles.get(cell) != Some(&Tile::Grass) || occupied.contains(&cell) {
                    continue;
                }
                if !roll(&mut self.base.rng, cfg.wild_enemy_chance) {
                    continue;
                }
                if let Some(&enemy) = pick(&ctx.catalog.wild_enemies, &mut self.base.rng) {
                    let instance = ctx.catalog.spawn_enemy(enemy);
                    self.base.contents_mut().enemies.insert(cell, instance);
                    wild += 1;
                }
            }
            tracing::debug!("{} wild enemies roam the terrain", wild);
        }

        spawns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::AreaKind;
    use crate::catalog::Catalog;
    use crate::core::config::WorldConfig;
    use crate::core::types::Position;

    #[test]
    fn test_scenario_island_bias() {
        let tiles = generate_tiles(&TerrainConfig::default(), 64, 32, 123);
        let corner = tiles.get_xy(0, 0).copied();
        let centre = tiles.get_xy(32, 16).copied();
        assert_eq!(corner, Some(Tile::Water));
        assert_ne!(centre, Some(Tile::Water));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = TerrainConfig::default();
        let a = generate_tiles(&config, 48, 24, 99);
        let b = generate_tiles(&config, 48, 24, 99);
        assert_eq!(a, b);
    }

    #[test]
    fn test_high_seed_bits_change_the_tiles() {
        let config = TerrainConfig::default();
        let low = generate_tiles(&config, 64, 32, 123);
        let high = generate_tiles(&config, 64, 32, 123 | (1 << 32));
        assert_ne!(noise_seed(123), noise_seed(123 | (1 << 32)));
        assert_ne!(low, high);
    }

    #[test]
    fn test_falloff_drowns_the_corners() {
        for seed in [1, 5, 77] {
            let tiles = generate_tiles(&TerrainConfig::default(), 64, 32, seed);
            for (x, y) in [(0, 0), (63, 0), (0, 31), (63, 31)] {
                assert_eq!(tiles.get_xy(x, y), Some(&Tile::Water));
            }
        }
    }

    #[test]
    fn test_placement_count() {
        assert_eq!(placement_count(20.0, 2048), 41);
        assert_eq!(placement_count(3.0, 100), 1);
        assert_eq!(placement_count(0.0, 100_000), 0);
    }

    #[test]
    fn test_render_has_border() {
        let config = WorldConfig::default();
        let catalog = Catalog::builtin();
        let mut ctx = GenContext::new(&config, &catalog);
        let mut registry = AreaRegistry::new();
        let tiles = Grid::filled(6, 3, Tile::Water);
        let id = registry.register(Area::Terrain(TerrainArea::from_tiles(tiles, 1)), &mut ctx);

        let Area::Terrain(terrain) = registry.get(id) else {
            panic!("expected terrain");
        };
        let map = terrain.render(&registry);
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "########");
        assert_eq!(lines[1], "#~~~~~~#");
    }

    #[test]
    fn test_all_water_populates_nothing() {
        let config = WorldConfig::default();
        let catalog = Catalog::builtin();
        let mut ctx = GenContext::new(&config, &catalog);
        let mut registry = AreaRegistry::new();
        let tiles = Grid::filled(40, 40, Tile::Water);
        registry.register(Area::Terrain(TerrainArea::from_tiles(tiles, 3)), &mut ctx);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_placements_respect_terrain() {
        let config = WorldConfig::default();
        let catalog = Catalog::builtin();
        let mut ctx = GenContext::new(&config, &catalog);
        let mut registry = AreaRegistry::new();
        let terrain = TerrainArea::generate(&config.terrain, 64, 32, 123);
        let root = registry.register(Area::Terrain(terrain), &mut ctx);

        let Area::Terrain(terrain) = registry.get(root) else {
            panic!("expected terrain");
        };
        let centre = terrain.starting_cell();
        let portals: Vec<(Cell, Portal)> = registry.get(root).portals().collect();
        assert!(!portals.is_empty());

        for (origin, portal) in portals {
            assert!(terrain.is_walkable(origin));
            assert_ne!(origin, centre);
            let target = registry.get(portal.target_area);
            if target.kind() == AreaKind::Settlement {
                assert!(terrain.tiles.distance(origin, centre) >= 6.0);
            }
        }
    }

    #[test]
    fn test_look_shows_position_and_viewport() {
        let mut config = WorldConfig::default();
        config.terrain.caves_per_thousand = 0.0;
        config.terrain.settlements_per_thousand = 0.0;
        let catalog = Catalog::builtin();
        let mut ctx = GenContext::new(&config, &catalog);
        let mut registry = AreaRegistry::new();
        let tiles = Grid::filled(20, 10, Tile::Rock);
        let id = registry.register(Area::Terrain(TerrainArea::from_tiles(tiles, 4)), &mut ctx);

        let mut player = Player::new("Tester", Position::new(id, 0));
        registry
            .get(id)
            .describe(&mut player, WorldView::new(&registry, &catalog));
        let text = player.take_output();
        assert!(text.contains("[0,0]"));
        // Top-left corner: the view is clipped by the map edge
        assert!(text.contains("####X++++"));
    }
}
