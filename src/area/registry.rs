//! Area registry for assigning stable IDs during recursive generation.
//!
//! Areas live in an append-only arena addressed by [`AreaId`]. Registering an
//! area immediately runs its populate step, which may hand back further areas
//! to register; those are registered (and populated) before the parent's
//! outbound portals are linked. Because the arena only ever grows and IDs are
//! plain indices, reentrant registration never invalidates an issued ID.

use crate::area::portal::Portal;
use crate::area::Area;
use crate::catalog::{Catalog, NamePool};
use crate::core::config::WorldConfig;
use crate::core::types::{AreaId, Cell};

/// Shared state threaded through every populate step
pub struct GenContext<'a> {
    pub config: &'a WorldConfig,
    pub catalog: &'a Catalog,
    /// Settlement names, drawn without replacement across the whole world
    pub settlement_names: NamePool,
}

impl<'a> GenContext<'a> {
    pub fn new(config: &'a WorldConfig, catalog: &'a Catalog) -> Self {
        Self {
            config,
            catalog,
            settlement_names: NamePool::new(catalog.settlement_names.clone()),
        }
    }
}

/// A sub-area produced by a populate step, waiting to be registered
///
/// The child already holds its back-portal (built from the parent's known
/// ID). After registration the parent gets a portal at `origin` leading to
/// `entry` in the child (`None` = child's starting cell).
pub struct Spawn {
    pub origin: Cell,
    pub area: Area,
    pub entry: Option<Cell>,
}

/// Registry owning every area in the world
#[derive(Default)]
pub struct AreaRegistry {
    areas: Vec<Area>,
}

impl AreaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { areas: Vec::new() }
    }

    /// Register an area, returning its ID after it has been fully populated
    ///
    /// Reentrant: sub-areas spawned by the populate step are registered
    /// recursively.
    pub fn register(&mut self, area: Area, ctx: &mut GenContext<'_>) -> AreaId {
        let id = AreaId::from_index(self.areas.len());
        let kind = area.kind();
        self.areas.push(area);
        tracing::debug!("Registered {} as {:?}", id, kind);

        let spawns = self.areas[id.index()].populate(id, ctx);

        for spawn in spawns {
            let child = self.register(spawn.area, ctx);
            let portal = Portal::new(child, spawn.entry);
            if let Some(previous) = self.areas[id.index()].add_portal(spawn.origin, portal) {
                tracing::warn!(
                    "{} cell {} already linked to {}; relinked to {}",
                    id,
                    spawn.origin,
                    previous.target_area,
                    child
                );
            }
        }

        id
    }

    /// Look up an area by ID
    ///
    /// Panics on an ID this registry never issued: that means the area graph
    /// is corrupt.
    pub fn get(&self, id: AreaId) -> &Area {
        match self.areas.get(id.index()) {
            Some(area) => area,
            None => panic!(
                "{} was never issued ({} areas registered)",
                id,
                self.areas.len()
            ),
        }
    }

    /// Look up an area by ID without panicking
    pub fn try_get(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(id.index())
    }

    /// Reverse lookup by identity
    pub fn id_of(&self, area: &Area) -> Option<AreaId> {
        self.areas
            .iter()
            .position(|candidate| std::ptr::eq(candidate, area))
            .map(AreaId::from_index)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// All areas in registration order
    pub fn iter(&self) -> impl Iterator<Item = (AreaId, &Area)> {
        self.areas
            .iter()
            .enumerate()
            .map(|(index, area)| (AreaId::from_index(index), area))
    }
}
