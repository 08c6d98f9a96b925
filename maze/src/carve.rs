//! Randomized depth-first carving.

use rand::Rng;

use maze_grid::{Grid, Pos, Side};

/// Carve a perfect maze into a fully walled grid, starting from `start`
///
/// The walk keeps its own backtracking stack, so grids of any size are safe.
/// Unvisited neighbours are collected in N, E, S, W order and one is drawn
/// with `rng.gen_range` over `u32`, making the result a function of the grid
/// shape, the start and the random stream, whatever the pointer width.
///
/// Returns the number of opened edges.
pub fn carve<R>(grid: &mut Grid, start: Pos, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    debug_assert!(grid.contains(start));
    debug_assert!(grid.positions().all(|p| !grid.is_visited(p)));

    let mut stack: Vec<Pos> = Vec::new();
    let mut candidates: Vec<(Side, Pos)> = Vec::with_capacity(4);
    let mut opened = 0;

    let mut current = start;
    grid.visit(current);
    loop {
        candidates.clear();
        candidates.extend(
            grid.neighbours(current)
                .filter(|(_, n)| !grid.is_visited(*n)),
        );
        if !candidates.is_empty() {
            let pick = rng.gen_range(0..candidates.len() as u32);
            let (side, _) = candidates[pick as usize];
            let next = grid
                .open_wall(current, side)
                .expect("Candidates are in-bounds neighbours");
            opened += 1;
            stack.push(current);
            current = next;
            grid.visit(current);
        } else if let Some(prev) = stack.pop() {
            current = prev;
        } else {
            break;
        }
    }

    log::trace!("Carved {opened} passages from {start:?}");
    debug_assert!(grid.is_symmetric());
    opened
}

#[cfg(test)]
mod tests {
    use rand::{rngs::mock::StepRng, SeedableRng};
    use rand_wyrand::WyRand;

    use maze_grid::{Grid, Side};

    use super::carve;

    #[test]
    fn spanning_tree() {
        for seed in 0..20 {
            let mut grid = Grid::new(7, 4).unwrap();
            let opened = carve(&mut grid, [0, 0], &mut WyRand::seed_from_u64(seed));
            assert_eq!(opened, 7 * 4 - 1);
            assert_eq!(grid.open_sides(), 2 * (7 * 4 - 1));
            assert!(grid.positions().all(|p| grid.is_visited(p)));
            assert!(grid.is_symmetric());
        }
    }

    #[test]
    fn perimeter_stays_closed() {
        let mut grid = Grid::new(6, 6).unwrap();
        carve(&mut grid, [0, 0], &mut WyRand::seed_from_u64(3));
        for pos in grid.positions() {
            for side in Side::ALL {
                if grid.neighbour(pos, side).is_none() {
                    assert!(grid.cell(pos).has_wall(side));
                }
            }
        }
    }

    #[test]
    fn same_stream_same_maze() {
        let mut a = Grid::new(10, 10).unwrap();
        let mut b = a.clone();
        carve(&mut a, [0, 0], &mut WyRand::seed_from_u64(99));
        carve(&mut b, [0, 0], &mut WyRand::seed_from_u64(99));
        assert_eq!(a, b);
    }

    /// Always drawing the first candidate follows N, then E, then S, then W
    #[test]
    fn first_candidate_walk() {
        let mut grid = Grid::new(3, 2).unwrap();
        carve(&mut grid, [0, 0], &mut StepRng::new(0, 0));
        // (0,0) -N-> (0,1) -E-> (1,1) -E-> (2,1) -S-> (2,0) -W-> (1,0)
        assert!(grid.is_open([0, 0], Side::North));
        assert!(grid.is_open([0, 1], Side::East));
        assert!(grid.is_open([1, 1], Side::East));
        assert!(grid.is_open([2, 1], Side::South));
        assert!(grid.is_open([2, 0], Side::West));
        assert_eq!(grid.open_sides(), 10);
    }

    /// Draws only read the low 32 bits of the stream
    #[test]
    fn draws_are_u32() {
        let mut low = Grid::new(3, 2).unwrap();
        let mut high = low.clone();
        carve(&mut low, [0, 0], &mut StepRng::new(0, 0));
        // a 64 bit draw would take the last candidate out of (0,0)
        carve(&mut high, [0, 0], &mut StepRng::new(1 << 63, 0));
        assert_eq!(low, high);
    }

    #[test]
    fn large_grid_does_not_recurse() {
        let mut grid = Grid::new(300, 300).unwrap();
        let opened = carve(&mut grid, [0, 0], &mut StepRng::new(0, 0));
        assert_eq!(opened, 300 * 300 - 1);
    }
}
