//! Where the maze is entered and left.

use serde::{Deserialize, Serialize};

use maze_grid::{Grid, Portal, Pos, Side};

use crate::distance::farthest_cell;

/// Side opened for the entrance
pub const ENTRANCE_SIDE: Side = Side::West;
/// Side opened for a corner exit, and the preferred one for a farthest exit
pub const EXIT_SIDE: Side = Side::East;

/// Perimeter sides tried, in order, when opening a farthest exit
const OUTWARD_PREFERENCE: [Side; 4] = [Side::East, Side::North, Side::South, Side::West];

/// How the exit cell is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitPolicy {
    /// The corner opposite to the start, opened on [`EXIT_SIDE`]
    OppositeCorner,
    /// The cell with the longest path from the start
    Farthest,
}

/// Entrance of the maze, on the start cell
pub fn entrance(grid: &Grid, start: Pos) -> Portal {
    debug_assert!(grid.contains(start));
    Portal {
        cell: start,
        side: outward(grid, start, ENTRANCE_SIDE),
    }
}

/// Exit of the maze
pub fn exit(grid: &Grid, start: Pos, policy: ExitPolicy) -> Portal {
    match policy {
        ExitPolicy::OppositeCorner => {
            let cell = [grid.width() - 1, grid.height() - 1];
            Portal {
                cell,
                side: outward(grid, cell, EXIT_SIDE),
            }
        }
        ExitPolicy::Farthest => {
            let (cell, distance) = farthest_cell(grid, start);
            log::debug!("Farthest cell from {start:?} is {cell:?}, {distance} steps away");
            let side = OUTWARD_PREFERENCE
                .into_iter()
                .find(|side| grid.neighbour(cell, *side).is_none());
            if side.is_none() {
                log::debug!("{cell:?} is inside the maze, leaving the perimeter closed");
            }
            Portal { cell, side }
        }
    }
}

/// `side` if it faces the outside of the grid
fn outward(grid: &Grid, pos: Pos, side: Side) -> Option<Side> {
    grid.neighbour(pos, side).is_none().then_some(side)
}

#[cfg(test)]
mod tests {
    use maze_grid::{Grid, Portal, Side};

    use super::{entrance, exit, ExitPolicy};

    /// A 4x3 maze whose longest path from the origin ends at (2,0)
    ///
    /// ```text
    /// (0,2)-(1,2)-(2,2)-(3,2)
    ///   |                 |
    /// (0,1) (1,1)-(2,1) (3,1)
    ///   |     |           |
    /// (0,0)-(1,0) (2,0)-(3,0)
    /// ```
    fn spiral() -> Grid {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.open_wall([0, 0], Side::North);
        grid.open_wall([0, 1], Side::North);
        grid.open_wall([0, 2], Side::East);
        grid.open_wall([1, 2], Side::East);
        grid.open_wall([2, 2], Side::East);
        grid.open_wall([3, 2], Side::South);
        grid.open_wall([3, 1], Side::South);
        grid.open_wall([3, 0], Side::West);
        grid.open_wall([0, 0], Side::East);
        grid.open_wall([1, 0], Side::North);
        grid.open_wall([1, 1], Side::East);
        grid
    }

    #[test]
    fn entrance_is_west_of_start() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(
            entrance(&grid, [0, 0]),
            Portal {
                cell: [0, 0],
                side: Some(Side::West)
            }
        );
    }

    #[test]
    fn opposite_corner() {
        let grid = spiral();
        assert_eq!(
            exit(&grid, [0, 0], ExitPolicy::OppositeCorner),
            Portal {
                cell: [3, 2],
                side: Some(Side::East)
            }
        );
    }

    #[test]
    fn farthest_on_perimeter() {
        // (2,0) is 8 steps away, south is its only outward side
        assert_eq!(
            exit(&spiral(), [0, 0], ExitPolicy::Farthest),
            Portal {
                cell: [2, 0],
                side: Some(Side::South)
            }
        );
    }

    #[test]
    fn outward_side_order() {
        for (path, cell, side) in [
            // ends in the top right corner: east wins over north
            (
                [
                    ([0, 0], Side::North),
                    ([0, 1], Side::East),
                    ([1, 1], Side::South),
                    ([1, 0], Side::East),
                    ([2, 0], Side::North),
                ],
                [2, 1],
                Side::East,
            ),
            // ends in the top left corner: north wins over west
            (
                [
                    ([0, 0], Side::East),
                    ([1, 0], Side::East),
                    ([2, 0], Side::North),
                    ([2, 1], Side::West),
                    ([1, 1], Side::West),
                ],
                [0, 1],
                Side::North,
            ),
            // ends in the middle of the bottom row
            (
                [
                    ([0, 0], Side::North),
                    ([0, 1], Side::East),
                    ([1, 1], Side::East),
                    ([2, 1], Side::South),
                    ([2, 0], Side::West),
                ],
                [1, 0],
                Side::South,
            ),
        ] {
            let mut grid = Grid::new(3, 2).unwrap();
            for (pos, s) in path {
                grid.open_wall(pos, s);
            }
            assert_eq!(
                exit(&grid, [0, 0], ExitPolicy::Farthest),
                Portal {
                    cell,
                    side: Some(side)
                }
            );
        }
    }

    #[test]
    fn farthest_inside_is_not_punctured() {
        // a 3x3 spiral ending in the center cell
        let mut grid = Grid::new(3, 3).unwrap();
        for (pos, side) in [
            ([0, 0], Side::East),
            ([1, 0], Side::East),
            ([2, 0], Side::North),
            ([2, 1], Side::North),
            ([2, 2], Side::West),
            ([1, 2], Side::West),
            ([0, 2], Side::South),
            ([0, 1], Side::East),
        ] {
            grid.open_wall(pos, side);
        }
        assert_eq!(
            exit(&grid, [0, 0], ExitPolicy::Farthest),
            Portal {
                cell: [1, 1],
                side: None
            }
        );
    }

    #[test]
    fn uncarved_exit_is_start() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(
            exit(&grid, [0, 0], ExitPolicy::Farthest),
            Portal {
                cell: [0, 0],
                side: Some(Side::South)
            }
        );
    }
}
