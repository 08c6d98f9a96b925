//! Errors raised while generating a maze.

use maze_grid::{Coord, GridError, TopologyError};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// One of the sides is below [`crate::config::MIN_SIDE`].
    #[error("Maze must be at least {min}x{min}, got {width}x{height}")]
    InvalidDimensions {
        width: Coord,
        height: Coord,
        min: Coord,
    },

    /// Cell size must be a positive, finite length.
    #[error("Invalid cell size: {0}")]
    InvalidCellSize(f32),

    /// The grid could not be allocated.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The carved grid and its portals disagree.
    #[error(transparent)]
    Topology(#[from] TopologyError),
}
