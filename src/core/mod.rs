pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::WorldConfig;
pub use error::{Result, SludgeError};
pub use types::{AreaId, Cell, Direction, EnemyId, ItemId, Position};
