//! A* road connector for the root terrain
//!
//! Water is impassable; every other tile may carry a road. The route found is
//! stamped into the terrain as [`Tile::Path`], a one-off mutation made while
//! the terrain populates itself.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashMap;
use ordered_float::OrderedFloat;

use crate::core::types::Cell;
use crate::spatial::Grid;
use crate::worldgen::terrain::Tile;

/// Node in the A* open set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PathNode {
    cell: Cell,
    f_cost: OrderedFloat<f64>, // g_cost + heuristic
}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn passable(tiles: &Grid<Tile>, cell: Cell) -> bool {
    matches!(tiles.get(cell), Some(tile) if *tile != Tile::Water)
}

/// Find a walkable 4-directional route from `start` to `goal`
///
/// The returned path includes both endpoints. `None` when either endpoint is
/// water or outside the grid, or when the frontier empties before reaching
/// the goal.
pub fn find_path(tiles: &Grid<Tile>, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    if !passable(tiles, start) || !passable(tiles, goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: AHashMap<Cell, Cell> = AHashMap::new();
    let mut g_scores: AHashMap<Cell, f64> = AHashMap::new();

    g_scores.insert(start, 0.0);
    open_set.push(PathNode {
        cell: start,
        f_cost: OrderedFloat(tiles.distance(start, goal)),
    });

    while let Some(current) = open_set.pop() {
        if current.cell == goal {
            return Some(reconstruct_path(&came_from, goal));
        }

        let current_g = *g_scores.get(&current.cell).unwrap_or(&f64::INFINITY);

        for neighbor in tiles.neighbors(current.cell) {
            if !passable(tiles, neighbor) {
                continue;
            }

            let tentative_g = current_g + tiles.distance(current.cell, neighbor);
            let neighbor_g = *g_scores.get(&neighbor).unwrap_or(&f64::INFINITY);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.cell);
                g_scores.insert(neighbor, tentative_g);
                open_set.push(PathNode {
                    cell: neighbor,
                    f_cost: OrderedFloat(tentative_g + tiles.distance(neighbor, goal)),
                });
            }
        }
    }

    None
}

fn reconstruct_path(came_from: &AHashMap<Cell, Cell>, mut current: Cell) -> Vec<Cell> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Stamp a road between two cells
///
/// Returns `false` (and leaves the terrain untouched) when no route exists.
pub fn connect(tiles: &mut Grid<Tile>, start: Cell, goal: Cell) -> bool {
    match find_path(tiles, start, goal) {
        Some(path) => {
            tracing::debug!("Road {} -> {} over {} cells", start, goal, path.len());
            for cell in path {
                tiles.set(cell, Tile::Path);
            }
            true
        }
        None => {
            tracing::warn!("No walkable road from cell {} to cell {}", start, goal);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grass(width: usize, height: usize) -> Grid<Tile> {
        Grid::filled(width, height, Tile::Grass)
    }

    fn assert_contiguous(tiles: &Grid<Tile>, path: &[Cell]) {
        for pair in path.windows(2) {
            assert_eq!(tiles.distance(pair[0], pair[1]), 1.0);
        }
    }

    #[test]
    fn test_straight_route() {
        let tiles = grass(8, 3);
        let start = tiles.cell_at(0, 1).unwrap();
        let goal = tiles.cell_at(7, 1).unwrap();
        let path = find_path(&tiles, start, goal).unwrap();

        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(path.len(), 8);
        assert_contiguous(&tiles, &path);
    }

    #[test]
    fn test_routes_around_water() {
        // Vertical water wall at x=3 with a gap at the bottom row
        let tiles = Grid::from_fn(7, 5, |x, y| {
            if x == 3 && y < 4 {
                Tile::Water
            } else {
                Tile::Grass
            }
        });
        let start = tiles.cell_at(0, 0).unwrap();
        let goal = tiles.cell_at(6, 0).unwrap();
        let path = find_path(&tiles, start, goal).unwrap();

        assert!(path.iter().all(|c| tiles.get(*c) != Some(&Tile::Water)));
        assert!(path.contains(&tiles.cell_at(3, 4).unwrap()));
        assert_contiguous(&tiles, &path);
    }

    #[test]
    fn test_unreachable_leaves_terrain_untouched() {
        let mut tiles = Grid::from_fn(5, 3, |x, _| if x == 2 { Tile::Water } else { Tile::Grass });
        let before = tiles.clone();
        assert!(!connect(&mut tiles, 0, 4));
        assert_eq!(tiles, before);
    }

    #[test]
    fn test_water_endpoint_is_unreachable() {
        let mut tiles = grass(4, 4);
        tiles.set(15, Tile::Water);
        assert!(find_path(&tiles, 0, 15).is_none());
    }

    #[test]
    fn test_connect_marks_path() {
        let mut tiles = grass(6, 6);
        tiles.set(14, Tile::Rock);
        assert!(connect(&mut tiles, 0, 35));
        assert_eq!(tiles.get(0), Some(&Tile::Path));
        assert_eq!(tiles.get(35), Some(&Tile::Path));
        let stamped = tiles.iter().filter(|(_, t)| **t == Tile::Path).count();
        // 4-directional shortest route across a 6x6 grid
        assert_eq!(stamped, 11);
    }

    proptest! {
        #[test]
        fn prop_finds_route_when_row_is_clear(
            width in 2usize..24,
            height in 1usize..12,
            row in 0usize..12,
            water in proptest::collection::vec(any::<bool>(), 24 * 12),
        ) {
            let row = row % height;
            let tiles = Grid::from_fn(width, height, |x, y| {
                if y != row && water[y * width + x] { Tile::Water } else { Tile::Grass }
            });
            let start = tiles.cell_at(0, row as i64).unwrap();
            let goal = tiles.cell_at(width as i64 - 1, row as i64).unwrap();

            let path = find_path(&tiles, start, goal);
            prop_assert!(path.is_some());
            let path = path.unwrap();
            prop_assert_eq!(path[0], start);
            prop_assert_eq!(*path.last().unwrap(), goal);
            prop_assert!(path.iter().all(|c| tiles.get(*c) != Some(&Tile::Water)));
        }
    }
}
