//! Shared movement resolution for every spatial area kind
//!
//! A move asks for `max_distance` cells in one direction. If the destination
//! is not walkable the hop is shortened by one and retried, so a player asking
//! for five cells when only three are clear still travels three.

use crate::core::types::{Cell, Direction};
use crate::spatial::Grid;

/// Result of a movement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved {
        from: Cell,
        to: Cell,
        distance: usize,
    },
    DeadEnd,
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }

    pub fn distance(&self) -> usize {
        match self {
            MoveOutcome::Moved { distance, .. } => *distance,
            MoveOutcome::DeadEnd => 0,
        }
    }
}

/// Find the longest walkable hop of at most `max_distance` cells
///
/// Only the destination of each hop is tested; cells jumped over are not.
pub fn resolve_move<T>(
    grid: &Grid<T>,
    from: Cell,
    direction: Direction,
    max_distance: usize,
    walkable: impl Fn(Cell) -> bool,
) -> MoveOutcome {
    // No hop longer than the grid's longest side can land inside it
    let mut distance = max_distance.min(grid.width().max(grid.height()));
    while distance > 0 {
        if let Some(to) = grid.step(from, direction, distance) {
            if walkable(to) {
                return MoveOutcome::Moved { from, to, distance };
            }
        }
        distance -= 1;
    }
    MoveOutcome::DeadEnd
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// 1 x n corridor where the first `open` cells to the right of 0 are walkable
    fn corridor(len: usize, open: usize) -> Grid<bool> {
        Grid::from_fn(len, 1, |x, _| x <= open)
    }

    #[test]
    fn test_full_distance_when_clear() {
        let grid = corridor(10, 9);
        let outcome = resolve_move(&grid, 0, Direction::Right, 5, |c| grid.get(c) == Some(&true));
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: 0,
                to: 5,
                distance: 5
            }
        );
    }

    #[test]
    fn test_degrades_to_walkable_distance() {
        let grid = corridor(10, 3);
        let outcome = resolve_move(&grid, 0, Direction::Right, 5, |c| grid.get(c) == Some(&true));
        assert_eq!(outcome.distance(), 3);
    }

    #[test]
    fn test_dead_end_against_edge() {
        let grid = corridor(10, 9);
        let outcome = resolve_move(&grid, 0, Direction::Left, 4, |_| true);
        assert_eq!(outcome, MoveOutcome::DeadEnd);
        assert!(!outcome.moved());
    }

    #[test]
    fn test_zero_distance_is_dead_end() {
        let grid = corridor(10, 9);
        assert_eq!(
            resolve_move(&grid, 0, Direction::Right, 0, |_| true),
            MoveOutcome::DeadEnd
        );
    }

    #[test]
    fn test_vertical_moves_use_row_stride() {
        let grid: Grid<bool> = Grid::filled(3, 4, true);
        let outcome = resolve_move(&grid, 10, Direction::Up, 3, |_| true);
        // From (1,3) up three rows to (1,0)
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: 10,
                to: 1,
                distance: 3
            }
        );
    }

    #[test]
    fn test_huge_request_travels_clear_distance() {
        let grid: Grid<bool> = Grid::filled(5, 1, true);
        for request in [usize::MAX, i64::MAX as usize, 1_000_000_000_000] {
            let outcome = resolve_move(&grid, 2, Direction::Right, request, |_| true);
            assert_eq!(
                outcome,
                MoveOutcome::Moved {
                    from: 2,
                    to: 4,
                    distance: 2
                }
            );
        }
    }

    #[test]
    fn test_huge_request_against_edge_is_dead_end() {
        let grid: Grid<bool> = Grid::filled(5, 1, true);
        assert_eq!(
            resolve_move(&grid, 4, Direction::Right, usize::MAX, |_| true),
            MoveOutcome::DeadEnd
        );
    }

    proptest! {
        #[test]
        fn prop_travel_is_min_of_request_and_clearance(
            len in 2usize..40,
            open in 0usize..40,
            request in 0usize..50,
        ) {
            let open = open.min(len - 1);
            let grid = corridor(len, open);
            let outcome = resolve_move(&grid, 0, Direction::Right, request, |c| grid.get(c) == Some(&true));
            let expected = request.min(open);
            prop_assert_eq!(outcome.distance(), expected);
            prop_assert_eq!(outcome.moved(), expected > 0);
        }
    }
}
