//! Generators for every area kind
//!
//! Each generator builds its area in two phases: construction (geometry and
//! the back-portal to whoever spawned it) and a populate step run by the
//! registry once the area has an ID.

pub mod building;
pub mod cave;
pub mod merchant;
pub mod road;
pub mod settlement;
pub mod terrain;

pub use building::{BuildingArea, BuildingKind};
pub use cave::CaveArea;
pub use merchant::Merchant;
pub use settlement::{Plot, SettlementArea};
pub use terrain::{generate_tiles, TerrainArea, Tile};
