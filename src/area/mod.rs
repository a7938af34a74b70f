//! The area graph: the closed set of area kinds and their shared contract
//!
//! Every area owns its own geometry, a portal map and a locked bag of
//! per-cell contents (item stacks, transient enemies, merchants). Geometry is
//! fixed once the area has been populated; only the contents change during
//! play, and only under the area's lock.

pub mod movement;
pub mod player;
pub mod portal;
pub mod registry;

use ahash::AHashMap;
use derive_more::Display;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::catalog::{Catalog, EnemyInstance, ItemStack};
use crate::core::random::area_rng;
use crate::core::types::{AreaId, Cell, Direction};
use crate::worldgen::building::BuildingArea;
use crate::worldgen::cave::CaveArea;
use crate::worldgen::merchant::Merchant;
use crate::worldgen::settlement::SettlementArea;
use crate::worldgen::terrain::TerrainArea;

pub use movement::{resolve_move, MoveOutcome};
pub use player::Player;
pub use portal::{Portal, PortalMap};
pub use registry::{AreaRegistry, GenContext, Spawn};

/// Discriminant of [`Area`]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AreaKind {
    #[display(fmt = "terrain")]
    Terrain,
    #[display(fmt = "cave")]
    Cave,
    #[display(fmt = "settlement")]
    Settlement,
    #[display(fmt = "building")]
    Building,
}

impl AreaKind {
    /// Map glyph for a portal leading into an area of this kind
    pub fn glyph(self) -> char {
        match self {
            AreaKind::Terrain => '^',
            AreaKind::Cave => 'C',
            AreaKind::Settlement => 'T',
            AreaKind::Building => 'B',
        }
    }
}

/// Mutable per-cell contents, guarded by the owning area's lock
#[derive(Debug, Default)]
pub struct AreaContents {
    pub(crate) items: AHashMap<Cell, Vec<ItemStack>>,
    pub(crate) enemies: AHashMap<Cell, EnemyInstance>,
    pub(crate) merchants: AHashMap<Cell, Merchant>,
}

/// State every area kind carries
#[derive(Debug)]
pub struct AreaBase {
    seed: u64,
    pub(crate) rng: ChaCha8Rng,
    portals: PortalMap,
    contents: Mutex<AreaContents>,
}

impl AreaBase {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: area_rng(seed),
            portals: PortalMap::default(),
            contents: Mutex::new(AreaContents::default()),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn portal_at(&self, cell: Cell) -> Option<Portal> {
        self.portals.get(&cell).copied()
    }

    pub(crate) fn add_portal(&mut self, cell: Cell, portal: Portal) -> Option<Portal> {
        self.portals.insert(cell, portal)
    }

    pub(crate) fn contents(&self) -> MutexGuard<'_, AreaContents> {
        self.contents.lock()
    }

    /// Unlocked access while the area is still exclusively owned by generation
    pub(crate) fn contents_mut(&mut self) -> &mut AreaContents {
        self.contents.get_mut()
    }
}

/// Read-only handles a description may consult
#[derive(Clone, Copy)]
pub struct WorldView<'a> {
    pub registry: &'a AreaRegistry,
    pub catalog: &'a Catalog,
}

impl<'a> WorldView<'a> {
    pub fn new(registry: &'a AreaRegistry, catalog: &'a Catalog) -> Self {
        Self { registry, catalog }
    }

    /// Entrance text of the area a portal leads to
    pub fn portal_text(&self, portal: Portal) -> String {
        self.registry.get(portal.target_area).portal_text()
    }
}

/// A generated area
#[derive(Debug)]
pub enum Area {
    Terrain(TerrainArea),
    Cave(CaveArea),
    Settlement(SettlementArea),
    Building(BuildingArea),
}

impl Area {
    pub fn kind(&self) -> AreaKind {
        match self {
            Area::Terrain(_) => AreaKind::Terrain,
            Area::Cave(_) => AreaKind::Cave,
            Area::Settlement(_) => AreaKind::Settlement,
            Area::Building(_) => AreaKind::Building,
        }
    }

    pub fn base(&self) -> &AreaBase {
        match self {
            Area::Terrain(a) => &a.base,
            Area::Cave(a) => &a.base,
            Area::Settlement(a) => &a.base,
            Area::Building(a) => &a.base,
        }
    }

    fn base_mut(&mut self) -> &mut AreaBase {
        match self {
            Area::Terrain(a) => &mut a.base,
            Area::Cave(a) => &mut a.base,
            Area::Settlement(a) => &mut a.base,
            Area::Building(a) => &mut a.base,
        }
    }

    pub fn starting_cell(&self) -> Cell {
        match self {
            Area::Terrain(a) => a.starting_cell(),
            Area::Cave(a) => a.starting_cell(),
            Area::Settlement(a) => a.starting_cell(),
            Area::Building(_) => 0,
        }
    }

    /// Number of cells in the area's grid
    pub fn cell_count(&self) -> usize {
        match self {
            Area::Terrain(a) => a.tiles.len(),
            Area::Cave(a) => a.cells.len(),
            Area::Settlement(a) => a.plots.len(),
            Area::Building(_) => 1,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell < self.cell_count()
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        match self {
            Area::Terrain(a) => a.is_walkable(cell),
            Area::Cave(a) => a.is_walkable(cell),
            Area::Settlement(a) => a.is_walkable(cell),
            Area::Building(_) => cell == 0,
        }
    }

    /// Text shown to a player standing on a portal that leads here
    pub fn portal_text(&self) -> String {
        match self {
            Area::Terrain(a) => a.portal_text(),
            Area::Cave(a) => a.portal_text(),
            Area::Settlement(a) => a.portal_text(),
            Area::Building(a) => a.portal_text(),
        }
    }

    /// Describe the player's surroundings, then whatever lies on their cell
    pub fn describe(&self, player: &mut Player, view: WorldView<'_>) {
        match self {
            Area::Terrain(a) => a.describe(player, view),
            Area::Cave(a) => a.describe(player, view),
            Area::Settlement(a) => a.describe(player, view),
            Area::Building(a) => a.describe(player, view),
        }
        self.describe_contents(player, view.catalog);
    }

    /// Move up to `max_distance` cells, shortening the hop until it lands
    /// somewhere walkable
    pub fn move_player(
        &self,
        player: &mut Player,
        direction: Direction,
        max_distance: usize,
        view: WorldView<'_>,
    ) -> MoveOutcome {
        let from = player.position.cell;
        let outcome = match self {
            Area::Terrain(a) => resolve_move(&a.tiles, from, direction, max_distance, |c| {
                a.is_walkable(c)
            }),
            Area::Cave(a) => resolve_move(&a.cells, from, direction, max_distance, |c| {
                a.is_walkable(c)
            }),
            Area::Settlement(a) => resolve_move(&a.plots, from, direction, max_distance, |c| {
                a.is_walkable(c)
            }),
            Area::Building(_) => {
                player.say("There is nowhere else to move to");
                return MoveOutcome::DeadEnd;
            }
        };

        match outcome {
            MoveOutcome::Moved { to, .. } => {
                player.position.cell = to;
                self.describe(player, view);
            }
            MoveOutcome::DeadEnd => player.say("You have hit a dead end"),
        }
        outcome
    }

    pub fn portal_at(&self, cell: Cell) -> Option<Portal> {
        self.base().portal_at(cell)
    }

    pub fn portals(&self) -> impl Iterator<Item = (Cell, Portal)> + '_ {
        self.base().portals.iter().map(|(cell, portal)| (*cell, *portal))
    }

    /// Locked, mutable item list of a cell
    ///
    /// The area's contents stay locked until the guard is dropped, so keep it
    /// for a single read-modify-write.
    pub fn items_at(&self, cell: Cell) -> MappedMutexGuard<'_, Vec<ItemStack>> {
        assert!(self.contains(cell), "cell {} outside area", cell);
        MutexGuard::map(self.base().contents(), |contents| {
            contents.items.entry(cell).or_default()
        })
    }

    pub fn merchant_at(&self, cell: Cell) -> Option<MappedMutexGuard<'_, Merchant>> {
        MutexGuard::try_map(self.base().contents(), |contents| {
            contents.merchants.get_mut(&cell)
        })
        .ok()
    }

    pub fn enemy_at(&self, cell: Cell) -> Option<EnemyInstance> {
        self.base().contents().enemies.get(&cell).copied()
    }

    /// Remove (defeat) the enemy on a cell, returning it if one was there
    pub fn remove_enemy_at(&self, cell: Cell) -> Option<EnemyInstance> {
        self.base().contents().enemies.remove(&cell)
    }

    /// Generation step run once, right after registration
    pub(crate) fn populate(&mut self, id: AreaId, ctx: &mut GenContext<'_>) -> Vec<Spawn> {
        match self {
            Area::Terrain(a) => a.populate(id, ctx),
            Area::Cave(a) => a.populate(ctx),
            Area::Settlement(a) => a.populate(id, ctx),
            Area::Building(a) => a.populate(ctx),
        }
    }

    pub(crate) fn add_portal(&mut self, cell: Cell, portal: Portal) -> Option<Portal> {
        self.base_mut().add_portal(cell, portal)
    }

    fn describe_contents(&self, player: &mut Player, catalog: &Catalog) {
        let cell = player.position.cell;
        let (stacks, enemy) = {
            let contents = self.base().contents();
            let stacks: Vec<ItemStack> = contents
                .items
                .get(&cell)
                .map(|stacks| stacks.iter().filter(|s| s.count > 0).copied().collect())
                .unwrap_or_default();
            (stacks, contents.enemies.get(&cell).copied())
        };

        if !stacks.is_empty() {
            player.blank_line();
            player.say("Items:");
            for (n, stack) in stacks.iter().enumerate() {
                let item = catalog.item(stack.item);
                player.say(format!(
                    "- {} - {}: {} (x{})",
                    n + 1,
                    item.name,
                    item.description,
                    stack.count
                ));
            }
        }

        if let Some(enemy) = enemy {
            let template = catalog.enemy(enemy.enemy);
            player.blank_line();
            player.say(format!(
                "A {} blocks your way! ({}/{} health)",
                template.name, enemy.health, template.max_health
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WorldConfig;
    use crate::core::types::{ItemId, Position};
    use crate::worldgen::cave::CaveArea;

    fn cave_world() -> (AreaRegistry, Catalog, AreaId) {
        let config = WorldConfig::default();
        let catalog = Catalog::builtin();
        let mut registry = AreaRegistry::new();
        let id = {
            let mut ctx = GenContext::new(&config, &catalog);
            let exit = Portal::to_cell(AreaId::from_index(0), 0);
            let cave = CaveArea::generate(&config.caves, 7, exit);
            registry.register(Area::Cave(cave), &mut ctx)
        };
        (registry, catalog, id)
    }

    #[test]
    fn test_items_at_is_shared_between_guards() {
        let (registry, _catalog, id) = cave_world();
        let area = registry.get(id);
        let cell = area.starting_cell();

        area.items_at(cell).push(ItemStack::new(ItemId(0), 3));
        let total: u32 = area.items_at(cell).iter().map(|s| s.count).sum();
        assert!(total >= 3);
    }

    #[test]
    fn test_remove_enemy_clears_cell() {
        let (registry, _catalog, id) = cave_world();
        let area = registry.get(id);
        let occupied: Vec<Cell> = (0..area.cell_count())
            .filter(|c| area.enemy_at(*c).is_some())
            .collect();

        for cell in occupied {
            assert!(area.remove_enemy_at(cell).is_some());
            assert!(area.enemy_at(cell).is_none());
            assert!(area.remove_enemy_at(cell).is_none());
        }
    }

    #[test]
    fn test_describe_lists_items() {
        let (registry, catalog, id) = cave_world();
        let area = registry.get(id);
        let cell = area.starting_cell();
        let mut player = Player::new("Tester", Position::new(id, cell));

        area.describe(&mut player, WorldView::new(&registry, &catalog));
        let text = player.take_output();
        assert!(text.contains("Items:"));
        assert!(text.contains("Cave Mushroom"));
    }

    #[test]
    fn test_no_merchant_in_cave() {
        let (registry, _catalog, id) = cave_world();
        let area = registry.get(id);
        assert!(area.merchant_at(area.starting_cell()).is_none());
    }

    #[test]
    #[should_panic]
    fn test_items_at_out_of_range_panics() {
        let (registry, _catalog, id) = cave_world();
        let area = registry.get(id);
        let _ = area.items_at(area.cell_count());
    }
}
