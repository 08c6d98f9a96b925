use std::collections::VecDeque;

use rand::{thread_rng, Rng};

use maze_gen::distance::Distances;
use maze_gen::layout::{Layout, LayoutConfig};
use maze_gen::{Config, Difficulty, MazeGenerator, Pos, Side, Topology};

fn random_config(rng: &mut impl Rng) -> Config {
    Config {
        width: rng.gen_range(2..30),
        height: rng.gen_range(2..30),
        seed: rng.gen_range(1..=u64::MAX),
        difficulty: Difficulty::ALL[rng.gen_range(0..3)],
        cell_size: rng.gen_range(0.5..5.),
    }
}

/// Flood fill through open walls, without going through the library queries
fn reachable(t: &Topology) -> usize {
    let [w, h] = [t.width(), t.height()];
    let mut seen = vec![false; (w * h) as usize];
    let mut queue = VecDeque::from([t.start()]);
    seen[0] = true;
    let mut count = 0;
    while let Some([x, y]) = queue.pop_front() {
        count += 1;
        let walls = t.walls([x, y]);
        let mut push = |side: Side, next: Pos| {
            let i = (next[1] * w + next[0]) as usize;
            if !walls[side.index()] && !seen[i] {
                seen[i] = true;
                queue.push_back(next);
            }
        };
        if y + 1 < h {
            push(Side::North, [x, y + 1]);
        }
        if x + 1 < w {
            push(Side::East, [x + 1, y]);
        }
        if y > 0 {
            push(Side::South, [x, y - 1]);
        }
        if x > 0 {
            push(Side::West, [x - 1, y]);
        }
    }
    count
}

#[test]
fn spanning_tree() {
    let mut rng = thread_rng();
    for _ in 0..50 {
        let config = random_config(&mut rng);
        let t = MazeGenerator::new(config).generate().unwrap();
        let cells = (config.width * config.height) as usize;
        // connected with cells - 1 edges: a tree
        assert_eq!(t.grid().open_sides(), 2 * (cells - 1), "{config:?}");
        assert_eq!(reachable(&t), cells, "{config:?}");
        assert!(t.grid().is_symmetric(), "{config:?}");
    }
}

#[test]
fn deterministic() {
    let mut rng = thread_rng();
    for _ in 0..20 {
        let config = random_config(&mut rng);
        let a = MazeGenerator::new(config).generate().unwrap();
        let b = MazeGenerator::new(config).generate().unwrap();
        assert_eq!(a, b, "{config:?}");
    }
}

#[test]
fn exit_placement() {
    let mut rng = thread_rng();
    for _ in 0..50 {
        let config = random_config(&mut rng);
        let t = MazeGenerator::new(config).generate().unwrap();
        assert_eq!(t.start(), [0, 0]);
        assert_eq!(t.entrance_side(), Some(Side::West));
        match config.difficulty {
            Difficulty::Easy | Difficulty::Normal => {
                assert_eq!(t.exit_cell(), [config.width - 1, config.height - 1]);
                assert_eq!(t.exit_side(), Some(Side::East));
            }
            Difficulty::Hard => {
                let d = Distances::from(t.grid(), t.start());
                let max = t.grid().positions().filter_map(|p| d.get(p)).max();
                assert_eq!(d.get(t.exit_cell()), max, "{config:?}");
                let [x, y] = t.exit_cell();
                let on_border = x == 0 || y == 0 || x + 1 == config.width || y + 1 == config.height;
                assert_eq!(t.exit_side().is_some(), on_border, "{config:?}");
                if let Some(side) = t.exit_side() {
                    assert!(t.grid().neighbour(t.exit_cell(), side).is_none());
                }
            }
        }
    }
}

#[test]
fn stored_mazes_are_identical() {
    let t = MazeGenerator::new(random_config(&mut thread_rng()))
        .generate()
        .unwrap();
    let mut buf = vec![];
    t.write(&mut buf).unwrap();
    assert_eq!(Topology::read(&buf[..]).unwrap(), t);
}

#[test]
fn layout_wall_count() {
    let mut rng = thread_rng();
    for _ in 0..10 {
        let config = random_config(&mut rng);
        let t = MazeGenerator::new(config).generate().unwrap();
        let [w, h] = [config.width as usize, config.height as usize];
        // every grid edge, minus the carved passages and the open portals
        let edges = w * (h + 1) + h * (w + 1);
        let portals = [t.entrance_side(), t.exit_side()]
            .into_iter()
            .filter(Option::is_some)
            .count();
        let layout = Layout::new(&t, &LayoutConfig::default());
        assert_eq!(layout.walls.len(), edges - (w * h - 1) - portals, "{config:?}");
    }
}
