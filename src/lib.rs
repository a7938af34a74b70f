//! Sludge - procedural area-graph world engine for a text exploration game
//!
//! A root terrain island spawns caves and settlements, settlements spawn
//! buildings, and portals link them all. Players walk cell by cell and step
//! through portals between areas.

pub mod area;
pub mod catalog;
pub mod core;
pub mod spatial;
pub mod world;
pub mod worldgen;

pub use crate::area::{Area, AreaKind, AreaRegistry, MoveOutcome, Player, Portal};
pub use crate::catalog::Catalog;
pub use crate::core::{AreaId, Cell, Direction, Position, Result, SludgeError, WorldConfig};
pub use crate::world::{TransitOutcome, World, WorldSummary};
