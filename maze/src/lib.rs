//! Perfect maze generation.
//!
//! A [`MazeGenerator`] turns a [`Config`] into a [`Topology`]: a fully walled
//! grid is carved into a spanning tree from the origin, then an entrance and
//! an exit are placed according to the difficulty.

use rand::{Rng, SeedableRng};
use rand_wyrand::WyRand;

pub use maze_grid::{Cell, Coord, Grid, GridError, Portal, Pos, Side, Topology, TopologyError};

pub mod carve;
pub mod distance;
pub mod layout;
pub mod placement;

pub mod config;
pub use config::{Config, Difficulty, PartialConfig};

mod error;
pub use error::Error;

/// Cell the carve starts from, and where the entrance is
pub const START: Pos = [0, 0];

/// A maze generator
#[derive(Debug, Clone, Default)]
pub struct MazeGenerator {
    /// Config of the next generation
    config: Config,
}

impl MazeGenerator {
    /// Create a new generator with a given config
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Switch tier, resizing the maze to the tier shape
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config = Config {
            seed: self.config.seed,
            cell_size: self.config.cell_size,
            ..Config::for_difficulty(difficulty)
        };
    }

    /// Change the seed, 0 draws a fresh one on the next generation
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
    }

    /// Generate a maze
    ///
    /// An unset seed is drawn from system entropy and kept, so generating
    /// again gives back the same maze until [`MazeGenerator::reseed`].
    pub fn generate(&mut self) -> Result<Topology, Error> {
        self.config.validate()?;
        if self.config.seed == 0 {
            self.config.seed = rand::thread_rng().gen_range(1..=u64::MAX);
            log::info!("Drawn maze seed {}", self.config.seed);
        }
        let seed = self.config.seed;
        self.generate_with(seed, &mut WyRand::seed_from_u64(seed))
    }

    /// Generate a maze consuming a given random source
    ///
    /// `seed` is only recorded in the topology.
    pub fn generate_with<R>(&self, seed: u64, rng: &mut R) -> Result<Topology, Error>
    where
        R: Rng + ?Sized,
    {
        let config = &self.config;
        config.validate()?;
        log::debug!(
            "Generating a {}x{} {:?} maze with seed {seed}",
            config.width,
            config.height,
            config.difficulty
        );

        let mut grid = Grid::new(config.width, config.height)?;
        let opened = carve::carve(&mut grid, START, rng);
        debug_assert_eq!(opened, grid.len() - 1);

        let entrance = placement::entrance(&grid, START);
        let exit = placement::exit(&grid, START, config.difficulty.exit_policy());
        log::debug!("Entrance at {entrance:?}, exit at {exit:?}");

        Ok(Topology::new(grid, config.cell_size, entrance, exit, seed)?)
    }
}
