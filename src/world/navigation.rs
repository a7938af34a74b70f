//! Player-facing navigation: looking, walking and passing through portals
//!
//! Movement inside an area is delegated to the area itself. Portal transit
//! happens here because it spans two areas: only the two endpoints of a
//! portal are correlated, never the coordinate systems of the areas.

use crate::area::{MoveOutcome, Player, Portal};
use crate::core::types::{AreaId, Direction, Position};
use crate::world::World;

/// Result of trying to pass through a portal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitOutcome {
    Entered { from: Position, to: Position },
    NoPortal,
}

impl TransitOutcome {
    pub fn entered(&self) -> bool {
        matches!(self, TransitOutcome::Entered { .. })
    }
}

impl World {
    /// Describe the player's current surroundings
    pub fn look(&self, player: &mut Player) {
        self.area(player.position.area).describe(player, self.view());
    }

    /// Walk up to `distance` cells within the current area
    pub fn move_player(
        &self,
        player: &mut Player,
        direction: Direction,
        distance: usize,
    ) -> MoveOutcome {
        let area = player.position.area;
        self.area(area)
            .move_player(player, direction, distance, self.view())
    }

    /// Where a portal lands: its target cell, or the target's starting cell
    pub fn resolve_portal(&self, portal: Portal) -> Position {
        let target = self.area(portal.target_area);
        let cell = portal
            .target_cell
            .unwrap_or_else(|| target.starting_cell());
        assert!(
            target.contains(cell),
            "portal into {} lands outside it at cell {}",
            portal.target_area,
            cell
        );
        Position::new(portal.target_area, cell)
    }

    /// Destination of the portal at `position`, if there is one
    pub fn portal_destination(&self, position: Position) -> Option<Position> {
        self.area(position.area)
            .portal_at(position.cell)
            .map(|portal| self.resolve_portal(portal))
    }

    /// Pass through the portal under the player, describing where they land
    pub fn enter_portal(&self, player: &mut Player) -> TransitOutcome {
        let from = player.position;
        match self.portal_destination(from) {
            Some(to) => {
                tracing::debug!(
                    "{} passes from {} cell {} to {} cell {}",
                    player.name,
                    from.area,
                    from.cell,
                    to.area,
                    to.cell
                );
                player.position = to;
                self.look(player);
                TransitOutcome::Entered { from, to }
            }
            None => {
                player.say("You'll find no entrance or exit here!");
                TransitOutcome::NoPortal
            }
        }
    }

    /// Every portal in the world as `(origin, destination)` pairs
    pub fn portal_links(&self) -> Vec<(Position, Position)> {
        self.registry()
            .iter()
            .flat_map(|(id, area)| {
                area.portals()
                    .map(move |(cell, portal)| (Position::new(id, cell), portal))
            })
            .map(|(origin, portal)| (origin, self.resolve_portal(portal)))
            .collect()
    }

    /// Areas reachable from the root by following portals
    pub fn reachable_areas(&self) -> Vec<AreaId> {
        let mut seen = vec![false; self.registry().len()];
        let mut stack = vec![self.root()];
        let mut reached = Vec::new();

        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.index()], true) {
                continue;
            }
            reached.push(id);
            for (_, portal) in self.area(id).portals() {
                if !seen[portal.target_area.index()] {
                    stack.push(portal.target_area);
                }
            }
        }

        reached.sort();
        reached
    }
}
