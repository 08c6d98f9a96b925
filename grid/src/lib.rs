use bincode::{Decode, Encode};
use deepsize::DeepSizeOf;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod topology;
pub use topology::{Portal, Topology, TopologyError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub type Coord = u32;
/// Position of a cell, as `[x, y]`
pub type Pos = [Coord; 2];

/// A side of a cell
///
/// Declaration order gives the indices into [`Cell::walls`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Encode,
    Decode,
    DeepSizeOf,
    Serialize,
    Deserialize,
)]
pub enum Side {
    /// Towards +y
    North,
    /// Towards +x
    East,
    /// Towards -y
    South,
    /// Towards -x
    West,
}
impl Side {
    /// All the sides, in wall index order
    pub const ALL: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

    #[inline(always)]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// ```
    /// use maze_grid::Side;
    ///
    /// assert_eq!(Side::from_index(3), Some(Side::West));
    /// assert_eq!(Side::from_index(4), None);
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Side> {
        if index < 4 {
            Some(Side::ALL[index])
        } else {
            None
        }
    }

    /// The side facing this one across a shared edge
    ///
    /// ```
    /// use maze_grid::Side;
    ///
    /// assert_eq!(Side::North.opposite(), Side::South);
    /// assert_eq!(Side::West.opposite(), Side::East);
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn opposite(self) -> Side {
        Side::ALL[(self.index() + 2) % 4]
    }
}

/// A single cell of the grid
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, DeepSizeOf, Serialize, Deserialize,
)]
pub struct Cell {
    /// Carving bookkeeping, meaningless once the carve is complete
    pub visited: bool,
    /// Wall flags, indexed by [`Side::index`]
    pub walls: [bool; 4],
}
impl Cell {
    /// A fully walled, unvisited cell
    pub const CLOSED: Cell = Cell {
        visited: false,
        walls: [true; 4],
    };

    #[inline(always)]
    #[must_use]
    pub const fn has_wall(&self, side: Side) -> bool {
        self.walls[side.index()]
    }
}
impl Default for Cell {
    fn default() -> Self {
        Self::CLOSED
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Grid must have at least one cell, got {width}x{height}")]
    Empty { width: Coord, height: Coord },
    #[error("Grid of {width}x{height} cells cannot be addressed in memory")]
    TooLarge { width: Coord, height: Coord },
    #[error("Grid of {width}x{height} cells stores {len} of them")]
    Malformed {
        width: Coord,
        height: Coord,
        len: usize,
    },
}

/// A rectangular grid of cells
///
/// Cells are stored row-major, with a stride of `width`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Encode, Decode, DeepSizeOf, Serialize, Deserialize,
)]
#[serde(try_from = "UncheckedGrid")]
pub struct Grid {
    shape: [Coord; 2],
    cells: Box<[Cell]>,
}

/// A deserialized [`Grid`] whose storage was not checked yet
#[derive(Deserialize)]
struct UncheckedGrid {
    shape: [Coord; 2],
    cells: Box<[Cell]>,
}

impl TryFrom<UncheckedGrid> for Grid {
    type Error = GridError;

    fn try_from(UncheckedGrid { shape, cells }: UncheckedGrid) -> Result<Self, Self::Error> {
        let grid = Self { shape, cells };
        grid.check()?;
        Ok(grid)
    }
}

impl Grid {
    /// Create a fully walled grid
    ///
    /// ```
    /// use maze_grid::{Grid, Side};
    ///
    /// let grid = Grid::new(3, 2).unwrap();
    /// assert_eq!(grid.len(), 6);
    /// assert!(grid.cell([2, 1]).has_wall(Side::East));
    /// ```
    pub fn new(width: Coord, height: Coord) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        let len = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .ok_or(GridError::TooLarge { width, height })?;
        log::trace!("Allocating a {width}x{height} grid");
        Ok(Self {
            shape: [width, height],
            cells: vec![Cell::CLOSED; len].into_boxed_slice(),
        })
    }

    #[inline(always)]
    #[must_use]
    pub const fn shape(&self) -> [Coord; 2] {
        self.shape
    }

    #[inline(always)]
    #[must_use]
    pub const fn width(&self) -> Coord {
        self.shape[0]
    }

    #[inline(always)]
    #[must_use]
    pub const fn height(&self) -> Coord {
        self.shape[1]
    }

    /// Number of cells
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline(always)]
    #[must_use]
    pub const fn contains(&self, [x, y]: Pos) -> bool {
        x < self.shape[0] && y < self.shape[1]
    }

    /// Linear index of a position
    ///
    /// ```
    /// use maze_grid::Grid;
    ///
    /// let grid = Grid::new(4, 3).unwrap();
    /// assert_eq!(grid.index([2, 1]), 6);
    /// assert_eq!(grid.position(6), [2, 1]);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn index(&self, pos: Pos) -> usize {
        debug_assert!(self.contains(pos), "{pos:?} is outside the grid");
        let [x, y] = pos;
        y as usize * self.shape[0] as usize + x as usize
    }

    #[inline(always)]
    #[must_use]
    pub fn position(&self, index: usize) -> Pos {
        debug_assert!(index < self.len());
        let stride = self.shape[0] as usize;
        [(index % stride) as Coord, (index / stride) as Coord]
    }

    /// All the positions, in linear order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.len()).map(|i| self.position(i))
    }

    #[inline(always)]
    #[must_use]
    pub fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[self.index(pos)]
    }

    /// The in-bounds position across `side`, if any
    #[must_use]
    pub fn neighbour(&self, pos: Pos, side: Side) -> Option<Pos> {
        debug_assert!(self.contains(pos), "{pos:?} is outside the grid");
        let [x, y] = pos;
        let [w, h] = self.shape;
        match side {
            Side::North => (y + 1 < h).then(|| [x, y + 1]),
            Side::East => (x + 1 < w).then(|| [x + 1, y]),
            Side::South => y.checked_sub(1).map(|y| [x, y]),
            Side::West => x.checked_sub(1).map(|x| [x, y]),
        }
    }

    /// Orthogonal neighbours, tagged with the side separating them from `pos`
    ///
    /// Sides are visited in N, E, S, W order.
    pub fn neighbours(&self, pos: Pos) -> impl Iterator<Item = (Side, Pos)> + '_ {
        Side::ALL
            .into_iter()
            .filter_map(move |side| self.neighbour(pos, side).map(|n| (side, n)))
    }

    /// Neighbours reachable through an open wall
    pub fn passages(&self, pos: Pos) -> impl Iterator<Item = (Side, Pos)> + '_ {
        self.neighbours(pos)
            .filter(move |(side, _)| self.is_open(pos, *side))
    }

    #[inline(always)]
    #[must_use]
    pub fn is_open(&self, pos: Pos, side: Side) -> bool {
        !self.cell(pos).has_wall(side)
    }

    /// Open the wall on `side` of `pos`, and the mirrored wall of the neighbour
    ///
    /// Returns the neighbour. Without a neighbour the grid is left untouched.
    pub fn open_wall(&mut self, pos: Pos, side: Side) -> Option<Pos> {
        let next = self.neighbour(pos, side)?;
        let (a, b) = (self.index(pos), self.index(next));
        self.cells[a].walls[side.index()] = false;
        self.cells[b].walls[side.opposite().index()] = false;
        Some(next)
    }

    /// Mark a cell as visited, returning `true` if it was not already
    pub fn visit(&mut self, pos: Pos) -> bool {
        let i = self.index(pos);
        !std::mem::replace(&mut self.cells[i].visited, true)
    }

    #[inline(always)]
    #[must_use]
    pub fn is_visited(&self, pos: Pos) -> bool {
        self.cell(pos).visited
    }

    /// Number of open wall flags between in-bounds cells
    ///
    /// Every opened edge counts twice, once per side.
    #[must_use]
    pub fn open_sides(&self) -> usize {
        self.positions()
            .map(|pos| self.passages(pos).count())
            .sum()
    }

    /// Check that every shared edge has the same wall state on both sides
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.positions().all(|pos| {
            self.neighbours(pos).all(|(side, n)| {
                self.cell(pos).has_wall(side) == self.cell(n).has_wall(side.opposite())
            })
        })
    }

    /// Check that the cell storage matches the declared shape
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let [w, h] = self.shape;
        w > 0 && h > 0 && (w as usize).checked_mul(h as usize) == Some(self.cells.len())
    }

    /// Error out if the storage does not match the shape
    pub fn check(&self) -> Result<(), GridError> {
        if self.is_well_formed() {
            Ok(())
        } else {
            let [width, height] = self.shape;
            Err(GridError::Malformed {
                width,
                height,
                len: self.cells.len(),
            })
        }
    }
}
