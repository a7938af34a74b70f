//! Row-major grid shared by every spatial area kind

use crate::core::types::{Cell, Direction};

/// Fixed-size 2D grid addressed by row-major cell index
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Grid with every cell set to `fill`
    pub fn filled(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            data: vec![fill; width * height],
        }
    }
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f(x, y)` for every cell in row-major order
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell < self.data.len()
    }

    /// `(x, y)` of a cell
    #[inline]
    pub fn xy(&self, cell: Cell) -> (usize, usize) {
        (cell % self.width, cell / self.width)
    }

    /// Cell at signed coordinates, or `None` when outside the grid
    #[inline]
    pub fn cell_at(&self, x: i64, y: i64) -> Option<Cell> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.data.get(cell)
    }

    #[inline]
    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut T> {
        self.data.get_mut(cell)
    }

    #[inline]
    pub fn get_xy(&self, x: i64, y: i64) -> Option<&T> {
        self.cell_at(x, y).and_then(|cell| self.data.get(cell))
    }

    #[inline]
    pub fn set(&mut self, cell: Cell, value: T) {
        if let Some(slot) = self.data.get_mut(cell) {
            *slot = value;
        }
    }

    /// Cell reached by stepping `distance` cells in `direction`
    ///
    /// `None` when the step leaves the grid, however large `distance` is.
    pub fn step(&self, cell: Cell, direction: Direction, distance: usize) -> Option<Cell> {
        let (x, y) = self.xy(cell);
        let (dx, dy) = direction.offset();
        let d = i64::try_from(distance).ok()?;
        let nx = (x as i64).checked_add(dx.checked_mul(d)?)?;
        let ny = (y as i64).checked_add(dy.checked_mul(d)?)?;
        self.cell_at(nx, ny)
    }

    /// In-bounds 4-neighbours of a cell
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.step(cell, dir, 1))
    }

    /// Straight-line distance between two cells
    pub fn distance(&self, a: Cell, b: Cell) -> f64 {
        let (ax, ay) = self.xy(a);
        let (bx, by) = self.xy(b);
        let dx = ax as f64 - bx as f64;
        let dy = ay as f64 - by as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Centre cell, `(height / 2) * width + width / 2`
    pub fn center(&self) -> Cell {
        (self.height / 2) * self.width + self.width / 2
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> {
        self.data.iter().enumerate()
    }

    pub fn cells(&self) -> std::ops::Range<Cell> {
        0..self.data.len()
    }
}
