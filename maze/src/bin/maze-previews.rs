use anyhow::Context;
use clap::Parser;
use futures::future::join_all;
use log::LevelFilter::Info;
use simple_logger::SimpleLogger;

use maze_gen::{Config, Difficulty, MazeGenerator};

#[derive(Parser)]
struct Args {
    /// Base seed, each tier gets its own offset. Random if missing
    #[clap(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Args { seed } = Args::parse();
    SimpleLogger::new()
        .without_timestamps()
        .with_level(Info)
        .env()
        .init()
        .expect("Failed to init logger");

    let tasks = Difficulty::ALL.into_iter().enumerate().map(|(i, difficulty)| {
        tokio::task::spawn_blocking(move || {
            log::info!("Generating {difficulty:?} preview");
            let mut generator = MazeGenerator::new(Config {
                // a zero seed is drawn at random
                seed: seed.map_or(0, |s| s.wrapping_add(i as u64)),
                ..Config::for_difficulty(difficulty)
            });
            (difficulty, generator.generate())
        })
    });

    for task in join_all(tasks).await {
        let (difficulty, topology) = task.context("Preview task failed")?;
        let topology =
            topology.with_context(|| format!("While generating the {difficulty:?} preview"))?;
        println!(
            "{difficulty:?}: {}x{}, seed {}, exit {:?}",
            topology.width(),
            topology.height(),
            topology.seed_used(),
            topology.exit()
        );
        print!("{topology}");
    }
    Ok(())
}
