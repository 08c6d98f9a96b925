use std::{
    fs::{read_to_string, File},
    io::BufWriter,
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use simple_logger::SimpleLogger;

use maze_gen::layout::{Layout, LayoutConfig};
use maze_gen::{MazeGenerator, PartialConfig};

#[derive(Debug, Parser)]
struct Args {
    /// Configuration file for the maze
    #[clap(short)]
    config: Option<PathBuf>,
    /// Maze parameters, overriding the configuration file
    #[clap(flatten)]
    maze: PartialConfig,
    /// Write the compressed maze to this file
    #[clap(short, long)]
    output: Option<PathBuf>,
    /// Print the world geometry summary
    #[clap(long)]
    layout: bool,
    /// Do not print the maze
    #[clap(short, long)]
    quiet: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Config {
    maze: PartialConfig,
    layout: LayoutConfig,
}

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .without_timestamps()
        .with_level(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .env()
        .init()
        .context("While initializing logging")?;

    let Args {
        config,
        maze,
        output,
        layout,
        quiet,
    } = Args::parse();
    let config: Config = config
        .map(|path| {
            read_to_string(path)
                .context("Cannot read config file")
                .and_then(|s| toml::from_str(&s).context("Cannot parse config file"))
        })
        .transpose()
        .context("While loading configs")?
        .unwrap_or_default();

    let mut generator = MazeGenerator::new(config.maze.merge(maze).or_defaults());
    let topology = generator.generate().context("While generating the maze")?;

    if !quiet {
        print!("{topology}");
        println!(
            "Seed: {}, entrance: {:?}, exit: {:?}",
            topology.seed_used(),
            topology.entrance(),
            topology.exit()
        );
    }
    if layout {
        let layout = Layout::new(&topology, &config.layout);
        println!("Floor: {:?}", layout.floor);
        println!("Wall blocks: {}", layout.walls.len());
        println!("Spawn point: {:?}", layout.spawn);
        println!("Exit marker: {:?}", layout.exit_marker);
    }
    if let Some(output) = output {
        let file = File::create(&output).context("Cannot create output file")?;
        topology
            .write(BufWriter::new(file))
            .context("While saving the maze")?;
        log::info!("Maze saved to {}", output.display());
    }
    Ok(())
}
