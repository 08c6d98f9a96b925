use std::fmt::{self, Display};
use std::io;

use bincode::error::DecodeError;
use bincode::{Decode, Encode};
use deepsize::DeepSizeOf;
use flate2::Compression;
use flate2::{bufread, read, write};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Grid, GridError, Pos, Side};

/// An opening of the maze towards the outside
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, DeepSizeOf, Serialize, Deserialize,
)]
pub struct Portal {
    pub cell: Pos,
    /// Perimeter wall to remove.
    /// `None` marks a cell inside the maze, where nothing is punctured
    pub side: Option<Side>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("Wall flags of neighbouring cells disagree")]
    Asymmetric,
    #[error("Portal {0:?} is outside of the grid")]
    PortalOutside(Portal),
    #[error("Portal {0:?} opens towards another cell")]
    InwardPortal(Portal),
}

/// A finished maze
///
/// The wall flags are exactly the carved ones: the portals are recorded
/// separately, and [`Topology::has_wall`] combines the two.
#[derive(Debug, Clone, PartialEq, Encode, Decode, DeepSizeOf, Serialize, Deserialize)]
#[serde(try_from = "UncheckedTopology")]
pub struct Topology {
    grid: Grid,
    /// Linear size of a cell, in world units
    cell_size: f32,
    entrance: Portal,
    exit: Portal,
    /// Seed that generated this maze
    seed: u64,
}

#[derive(Deserialize)]
struct UncheckedTopology {
    grid: Grid,
    cell_size: f32,
    entrance: Portal,
    exit: Portal,
    seed: u64,
}

impl TryFrom<UncheckedTopology> for Topology {
    type Error = TopologyError;

    fn try_from(raw: UncheckedTopology) -> Result<Self, Self::Error> {
        Self::new(raw.grid, raw.cell_size, raw.entrance, raw.exit, raw.seed)
    }
}

impl Topology {
    /// Assemble a maze, checking walls and portals agree
    ///
    /// ```
    /// use maze_grid::{Grid, Portal, Side, Topology, TopologyError};
    ///
    /// let grid = Grid::new(2, 1).unwrap();
    /// let west = Portal { cell: [0, 0], side: Some(Side::West) };
    /// let east = Portal { cell: [0, 0], side: Some(Side::East) };
    /// assert!(Topology::new(grid.clone(), 1., west, west, 0).is_ok());
    /// assert_eq!(
    ///     Topology::new(grid, 1., west, east, 0),
    ///     Err(TopologyError::InwardPortal(east))
    /// );
    /// ```
    pub fn new(
        grid: Grid,
        cell_size: f32,
        entrance: Portal,
        exit: Portal,
        seed: u64,
    ) -> Result<Self, TopologyError> {
        let topology = Self {
            grid,
            cell_size,
            entrance,
            exit,
            seed,
        };
        topology.check()?;
        Ok(topology)
    }

    fn check(&self) -> Result<(), TopologyError> {
        self.grid.check()?;
        for portal in [self.entrance, self.exit] {
            if !self.grid.contains(portal.cell) {
                return Err(TopologyError::PortalOutside(portal));
            }
            // a portal must only puncture the perimeter
            if let Some(side) = portal.side {
                if self.grid.neighbour(portal.cell, side).is_some() {
                    return Err(TopologyError::InwardPortal(portal));
                }
            }
        }
        if !self.grid.is_symmetric() {
            return Err(TopologyError::Asymmetric);
        }
        Ok(())
    }

    #[inline(always)]
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline(always)]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    #[inline(always)]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    #[inline(always)]
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Carved wall flags of a cell, indexed by [`Side::index`]
    #[inline(always)]
    #[must_use]
    pub fn walls(&self, pos: Pos) -> [bool; 4] {
        self.grid.cell(pos).walls
    }

    #[inline(always)]
    #[must_use]
    pub fn entrance(&self) -> Portal {
        self.entrance
    }

    #[inline(always)]
    #[must_use]
    pub fn exit(&self) -> Portal {
        self.exit
    }

    #[inline(always)]
    #[must_use]
    pub fn start(&self) -> Pos {
        self.entrance.cell
    }

    #[inline(always)]
    #[must_use]
    pub fn exit_cell(&self) -> Pos {
        self.exit.cell
    }

    #[inline(always)]
    #[must_use]
    pub fn entrance_side(&self) -> Option<Side> {
        self.entrance.side
    }

    #[inline(always)]
    #[must_use]
    pub fn exit_side(&self) -> Option<Side> {
        self.exit.side
    }

    #[inline(always)]
    #[must_use]
    pub fn seed_used(&self) -> u64 {
        self.seed
    }

    /// Check if `side` of `pos` is the entrance or the exit
    #[must_use]
    pub fn is_portal(&self, pos: Pos, side: Side) -> bool {
        [self.entrance, self.exit]
            .into_iter()
            .any(|p| p.cell == pos && p.side == Some(side))
    }

    /// Check if a wall has to be built on `side` of `pos`
    #[must_use]
    pub fn has_wall(&self, pos: Pos, side: Side) -> bool {
        self.grid.cell(pos).has_wall(side) && !self.is_portal(pos, side)
    }

    fn validated(self) -> Result<Self, DecodeError> {
        self.check()
            .map_err(|err| DecodeError::OtherString(err.to_string()))?;
        Ok(self)
    }

    pub fn write(&self, writer: impl io::Write) -> io::Result<()> {
        let mut writer = write::DeflateEncoder::new(writer, Compression::best());
        bincode::encode_into_std_write(self, &mut writer, bincode::config::standard()).map_err(
            |err| match err {
                bincode::error::EncodeError::Io { inner, .. } => inner,
                other => panic!("Topology should not fail to serialize: {other}"),
            },
        )?;
        writer.finish()?;
        Ok(())
    }
    pub fn read(reader: impl io::Read) -> Result<Self, DecodeError> {
        let mut reader = read::DeflateDecoder::new(reader);
        bincode::decode_from_std_read::<Self, _, _>(&mut reader, bincode::config::standard())?
            .validated()
    }
    pub fn bufread(reader: impl io::BufRead) -> Result<Self, DecodeError> {
        let mut reader = bufread::DeflateDecoder::new(reader);
        bincode::decode_from_std_read::<Self, _, _>(&mut reader, bincode::config::standard())?
            .validated()
    }
}

impl Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w, h] = self.grid.shape().map(|s| s as usize);
        let stride = 2 * w + 1;
        let mut screen = vec![b'#'; stride * (2 * h + 1)].into_boxed_slice();
        for pos in self.grid.positions() {
            let [x, y] = pos.map(|c| c as usize);
            // north at the top
            let col = 2 * x + 1;
            let row = 2 * (h - 1 - y) + 1;
            screen[row * stride + col] = if pos == self.entrance.cell {
                b'S'
            } else if pos == self.exit.cell {
                b'E'
            } else {
                b'.'
            };
            for side in Side::ALL {
                if !self.has_wall(pos, side) {
                    let (r, c) = match side {
                        Side::North => (row - 1, col),
                        Side::East => (row, col + 1),
                        Side::South => (row + 1, col),
                        Side::West => (row, col - 1),
                    };
                    screen[r * stride + c] = b'.';
                }
            }
        }
        for row in screen.chunks(stride) {
            for ch in row {
                write!(f, "{}", *ch as char)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
