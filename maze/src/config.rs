use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use maze_grid::Coord;

use crate::{placement::ExitPolicy, Error};

/// Smallest accepted side of a maze
pub const MIN_SIDE: Coord = 2;

/// Difficulty tier of a maze
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}
impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Size of the maze, as `[width, height]`
    #[must_use]
    pub const fn shape(self) -> [Coord; 2] {
        match self {
            Difficulty::Easy => [8, 8],
            Difficulty::Normal => [15, 15],
            Difficulty::Hard => [25, 25],
        }
    }

    #[must_use]
    pub const fn exit_policy(self) -> ExitPolicy {
        match self {
            Difficulty::Easy | Difficulty::Normal => ExitPolicy::OppositeCorner,
            Difficulty::Hard => ExitPolicy::Farthest,
        }
    }
}

/// Config for a maze
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Number of cells along x
    pub width: Coord,
    /// Number of cells along y
    pub height: Coord,
    /// Seed of the maze, 0 means a random one
    pub seed: u64,
    /// Difficulty tier, selecting the exit placement
    pub difficulty: Difficulty,
    /// Linear size of a cell, in world units
    pub cell_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

impl Config {
    /// Default config for a difficulty tier
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let [width, height] = difficulty.shape();
        Self {
            width,
            height,
            seed: 0,
            difficulty,
            cell_size: 3.,
        }
    }

    /// Check the config can be generated
    pub fn validate(&self) -> Result<(), Error> {
        if self.width < MIN_SIDE || self.height < MIN_SIDE {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
                min: MIN_SIDE,
            });
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.) {
            return Err(Error::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }
}

/// Partial config for a maze
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Parser, Default)]
pub struct PartialConfig {
    /// Number of cells along x [default: from the difficulty]
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Coord>,
    /// Number of cells along y [default: from the difficulty]
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Coord>,
    /// Seed of the maze, 0 means a random one
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Difficulty tier
    #[clap(long, value_enum)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Linear size of a cell, in world units
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<f32>,
}
impl PartialConfig {
    pub fn merge(self, other: PartialConfig) -> Self {
        Self {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            seed: other.seed.or(self.seed),
            difficulty: other.difficulty.or(self.difficulty),
            cell_size: other.cell_size.or(self.cell_size),
        }
    }
    /// Fill in the missing values
    ///
    /// Sides below [`MIN_SIDE`] are raised to it.
    pub fn or_defaults(self) -> Config {
        let difficulty = self.difficulty.unwrap_or_default();
        let default = Config::for_difficulty(difficulty);
        let clamp = |name: &str, side: Coord| {
            if side < MIN_SIDE {
                log::warn!("Maze {name} {side} is too small, raising it to {MIN_SIDE}");
                MIN_SIDE
            } else {
                side
            }
        };
        Config {
            width: clamp("width", self.width.unwrap_or(default.width)),
            height: clamp("height", self.height.unwrap_or(default.height)),
            seed: self.seed.unwrap_or(default.seed),
            difficulty,
            cell_size: self.cell_size.unwrap_or(default.cell_size),
        }
    }
}
