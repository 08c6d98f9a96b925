//! World-space geometry of a maze, for the layer that builds the scene.
//!
//! Cell `(x, y)` is centered on `(x * cell_size, 0, y * cell_size)`: x grows
//! east, z grows north and y points up.

use serde::{Deserialize, Serialize};

use maze_grid::{Pos, Side, Topology};

pub type Vec3 = [f32; 3];

/// Height of the player spawn point above the floor
const SPAWN_LIFT: f32 = 0.25;
/// Height of the exit marker above the floor
const EXIT_LIFT: f32 = 0.01;

/// Sizes of the maze pieces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub wall_thickness: f32,
    pub wall_height: f32,
    pub floor_thickness: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wall_thickness: 0.25,
            wall_height: 2.5,
            floor_thickness: 0.1,
        }
    }
}

/// An axis aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub center: Vec3,
    pub size: Vec3,
}

/// Center of a cell, on the floor plane
#[must_use]
pub fn cell_to_world(topology: &Topology, [x, y]: Pos) -> Vec3 {
    let s = topology.cell_size();
    [x as f32 * s, 0., y as f32 * s]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub floor: Block,
    /// One block per wall edge, shared edges included once
    pub walls: Vec<Block>,
    pub spawn: Vec3,
    pub exit_marker: Vec3,
}

impl Layout {
    pub fn new(topology: &Topology, config: &LayoutConfig) -> Self {
        let s = topology.cell_size();
        let [mw, mh] = [topology.width() as f32 * s, topology.height() as f32 * s];
        let floor = Block {
            center: [mw / 2. - s / 2., -config.floor_thickness / 2., mh / 2. - s / 2.],
            size: [mw, config.floor_thickness, mh],
        };

        let grid = topology.grid();
        let mut walls = Vec::new();
        for pos in grid.positions() {
            for side in Side::ALL {
                if !topology.has_wall(pos, side) {
                    continue;
                }
                // shared edges belong to the cell on their south or west
                if matches!(side, Side::South | Side::West) && grid.neighbour(pos, side).is_some()
                {
                    continue;
                }
                walls.push(wall_block(topology, config, pos, side));
            }
        }
        log::debug!("Laid out {} wall blocks", walls.len());

        let lift = |pos, dy| {
            let [x, y, z] = cell_to_world(topology, pos);
            [x, y + dy, z]
        };
        Self {
            floor,
            walls,
            spawn: lift(topology.start(), SPAWN_LIFT),
            exit_marker: lift(topology.exit_cell(), EXIT_LIFT),
        }
    }
}

fn wall_block(topology: &Topology, config: &LayoutConfig, pos: Pos, side: Side) -> Block {
    let s = topology.cell_size();
    let [cx, _, cz] = cell_to_world(topology, pos);
    let y = config.wall_height / 2.;
    let (t, h) = (config.wall_thickness, config.wall_height);
    match side {
        Side::North => Block {
            center: [cx, y, cz + s / 2.],
            size: [s, h, t],
        },
        Side::South => Block {
            center: [cx, y, cz - s / 2.],
            size: [s, h, t],
        },
        Side::East => Block {
            center: [cx + s / 2., y, cz],
            size: [t, h, s],
        },
        Side::West => Block {
            center: [cx - s / 2., y, cz],
            size: [t, h, s],
        },
    }
}

/// Framing of the whole maze, for an overview camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub center: Vec3,
    /// Longest side of the maze
    pub size: f32,
}

impl Overview {
    pub fn new(topology: &Topology) -> Self {
        let s = topology.cell_size();
        let [w, h] = [topology.width() as f32, topology.height() as f32];
        Self {
            center: [w * s / 2., 0., h * s / 2.],
            size: w.max(h) * s,
        }
    }
}
