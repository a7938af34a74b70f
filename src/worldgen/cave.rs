//! Random-walk caves
//!
//! Walks start from the grid centre and stumble about for a fixed number of
//! steps, carving every cell they land on. Whole walks repeat until enough of
//! the cave has been carved.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::area::{AreaBase, GenContext, Player, Portal, Spawn, WorldView};
use crate::catalog::ItemStack;
use crate::core::config::CaveConfig;
use crate::core::random::{look_rng, pick, roll, weighted_pick};
use crate::core::types::{Cell, Direction};
use crate::spatial::Grid;

/// Order exits are listed in on a look
const EXIT_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Down,
    Direction::Right,
];

/// Carve a cave layout; `true` marks a present cell
pub fn carve<R: Rng + ?Sized>(config: &CaveConfig, rng: &mut R) -> Grid<bool> {
    let width = config.width.max(1);
    let height = config.height.max(1);
    let mut cells = Grid::filled(width, height, false);

    let steps = config.walk_steps.max(1);
    let target = config.min_cells.clamp(1, cells.len());
    let (cx, cy) = cells.xy(cells.center());
    let mut present = 0;

    while present < target {
        let (mut x, mut y) = (cx as i64, cy as i64);
        for _ in 0..steps {
            let (dx, dy) = Direction::ALL[rng.gen_range(0..Direction::ALL.len())].offset();
            x = (x + dx).clamp(0, width as i64 - 1);
            y = (y + dy).clamp(0, height as i64 - 1);

            let cell = y as usize * width + x as usize;
            if let Some(slot) = cells.get_mut(cell) {
                if !*slot {
                    *slot = true;
                    present += 1;
                }
            }
        }
    }

    cells
}

#[derive(Debug)]
pub struct CaveArea {
    pub(crate) base: AreaBase,
    pub(crate) cells: Grid<bool>,
    start: Cell,
}

impl CaveArea {
    /// Carve a cave whose starting cell leads back through `exit`
    pub fn generate(config: &CaveConfig, seed: u64, exit: Portal) -> Self {
        let mut base = AreaBase::new(seed);
        let cells = carve(config, &mut base.rng);
        let start = cells
            .iter()
            .find(|(_, present)| **present)
            .map(|(cell, _)| cell)
            .unwrap_or(0);
        base.add_portal(start, exit);

        Self { base, cells, start }
    }

    pub fn cells(&self) -> &Grid<bool> {
        &self.cells
    }

    pub fn present_count(&self) -> usize {
        self.cells.iter().filter(|(_, present)| **present).count()
    }

    pub fn starting_cell(&self) -> Cell {
        self.start
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.cells.get(cell) == Some(&true)
    }

    pub fn portal_text(&self) -> String {
        "You stand amidst the entrance of a mysterious cave...".to_string()
    }

    pub fn describe(&self, player: &mut Player, view: WorldView<'_>) {
        let cell = player.position.cell;
        let mut rng = look_rng(self.base.seed(), cell);

        player.say("You stand in a cave:");
        if self.base.portal_at(cell).is_some() {
            player.say("- You see a crack of light emanating from a crevice - the way out is here...");
        }

        let descriptions: Vec<&String> = view
            .catalog
            .vocabulary
            .cave_descriptions
            .choose_multiple(&mut rng, 2)
            .collect();
        if descriptions.is_empty() {
            player.say("- It appears this place is simply indescribable...");
        }
        for description in descriptions {
            player.say(format!("- {}", description));
        }

        player.blank_line();
        player.say("Ways forward:");
        for direction in EXIT_ORDER {
            let open = self
                .cells
                .step(cell, direction, 1)
                .map_or(false, |next| self.is_walkable(next));
            if open {
                player.say(format!("- {}", direction.key()));
            }
        }
    }

    pub(crate) fn populate(&mut self, ctx: &mut GenContext<'_>) -> Vec<Spawn> {
        let cfg = &ctx.config.caves;
        let catalog = ctx.catalog;
        let mut loot = 0;
        let mut enemies = 0;

        let present: Vec<Cell> = self
            .cells
            .iter()
            .filter(|(_, present)| **present)
            .map(|(cell, _)| cell)
            .collect();

        for cell in present {
            let mut stacks = Vec::new();
            if cfg.forage_per_cell > 0 {
                stacks.push(ItemStack::new(catalog.forage, cfg.forage_per_cell));
            }
            if roll(&mut self.base.rng, cfg.item_chance) {
                if let Some(&item) = weighted_pick(&catalog.weapon_tiers, &mut self.base.rng) {
                    stacks.push(ItemStack::new(item, 1));
                    loot += 1;
                }
            }
            let enemy = if roll(&mut self.base.rng, cfg.enemy_chance) {
                pick(&catalog.cave_enemies, &mut self.base.rng).map(|&id| catalog.spawn_enemy(id))
            } else {
                None
            };

            let contents = self.base.contents_mut();
            if !stacks.is_empty() {
                contents.items.insert(cell, stacks);
            }
            if let Some(enemy) = enemy {
                contents.enemies.insert(cell, enemy);
                enemies += 1;
            }
        }

        tracing::debug!(
            "Cave of {} cells stocked with {} weapons and {} enemies",
            self.present_count(),
            loot,
            enemies
        );
        Vec::new()
    }
}
