//! Path lengths through the carved passages.

use std::collections::VecDeque;

use maze_grid::{Grid, Pos};

/// Breadth-first distances from a start cell
#[derive(Debug, Clone)]
pub struct Distances {
    shape: [u32; 2],
    dist: Box<[Option<u32>]>,
    farthest: (Pos, u32),
}

impl Distances {
    /// Explore the passages from `start`
    ///
    /// Walls are only crossed where open. The farthest cell is the first one,
    /// in BFS order, to reach the largest distance.
    pub fn from(grid: &Grid, start: Pos) -> Self {
        debug_assert!(grid.contains(start));
        let mut dist = vec![None; grid.len()].into_boxed_slice();
        let mut queue = VecDeque::new();
        let mut farthest = (start, 0);

        dist[grid.index(start)] = Some(0);
        queue.push_back(start);
        while let Some(pos) = queue.pop_front() {
            let d = dist[grid.index(pos)].expect("Queued cells have a distance");
            if d > farthest.1 {
                farthest = (pos, d);
            }
            for (_, next) in grid.passages(pos) {
                let slot = &mut dist[grid.index(next)];
                if slot.is_none() {
                    *slot = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }

        Self {
            shape: grid.shape(),
            dist,
            farthest,
        }
    }

    /// Distance of `pos`, if reachable
    #[must_use]
    pub fn get(&self, [x, y]: Pos) -> Option<u32> {
        let [w, h] = self.shape;
        if x < w && y < h {
            self.dist[y as usize * w as usize + x as usize]
        } else {
            None
        }
    }

    /// Number of reachable cells, start included
    #[must_use]
    pub fn reached(&self) -> usize {
        self.dist.iter().filter(|d| d.is_some()).count()
    }

    /// Most distant cell and its distance
    #[must_use]
    pub fn farthest(&self) -> (Pos, u32) {
        self.farthest
    }
}

/// The cell with the longest shortest path from `start`
///
/// On a grid that was never carved this is `start` itself, at distance 0.
pub fn farthest_cell(grid: &Grid, start: Pos) -> (Pos, u32) {
    Distances::from(grid, start).farthest()
}

/// Endpoints and length of the longest path of a carved maze
///
/// Two passes: the farthest cell from the origin, then the farthest from it.
/// Exact on perfect mazes.
pub fn diameter(grid: &Grid) -> (Pos, Pos, u32) {
    let (a, _) = farthest_cell(grid, [0, 0]);
    let (b, len) = farthest_cell(grid, a);
    (a, b, len)
}
