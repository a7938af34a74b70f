//! Spatial indexing

pub mod grid;

pub use grid::Grid;
