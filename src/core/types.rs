//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Row-major index into an area's grid
pub type Cell = usize;

/// Stable handle into the area registry
///
/// Issued sequentially by [`crate::area::AreaRegistry::register`]; an ID never
/// changes and never refers to a different area once handed out.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[display(fmt = "area#{}", _0)]
pub struct AreaId(u32);

impl AreaId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the area inside the registry arena
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into the catalog's item table
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(fmt = "item#{}", _0)]
pub struct ItemId(pub u32);

/// Index into the catalog's enemy templates
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(fmt = "enemy#{}", _0)]
pub struct EnemyId(pub u32);

/// Where a player stands: an area and a cell inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub area: AreaId,
    pub cell: Cell,
}

impl Position {
    pub fn new(area: AreaId, cell: Cell) -> Self {
        Self { area, cell }
    }
}

/// Cardinal movement direction (screen space: up is -y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step as (dx, dy)
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Keyboard key shown to players for this direction
    pub fn key(self) -> char {
        match self {
            Direction::Up => 'W',
            Direction::Left => 'A',
            Direction::Down => 'S',
            Direction::Right => 'D',
        }
    }

    /// Parse a `w/a/s/d` key (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "w" => Some(Direction::Up),
            "a" => Some(Direction::Left),
            "s" => Some(Direction::Down),
            "d" => Some(Direction::Right),
            _ => None,
        }
    }
}
