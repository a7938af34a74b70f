//! Directed links between areas

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{AreaId, Cell};

/// Directed link from one area's cell to another area
///
/// `target_cell: None` means "the target area's starting cell".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Portal {
    pub target_area: AreaId,
    pub target_cell: Option<Cell>,
}

impl Portal {
    pub fn new(target_area: AreaId, target_cell: Option<Cell>) -> Self {
        Self {
            target_area,
            target_cell,
        }
    }

    /// Portal landing on the target's starting cell
    pub fn to_start(target_area: AreaId) -> Self {
        Self::new(target_area, None)
    }

    /// Portal landing on a specific cell
    pub fn to_cell(target_area: AreaId, cell: Cell) -> Self {
        Self::new(target_area, Some(cell))
    }
}

/// Origin cell → portal; at most one portal per cell
pub type PortalMap = AHashMap<Cell, Portal>;
