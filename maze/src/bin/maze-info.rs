use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Parser;

use deepsize::DeepSizeOf;
use humansize::{format_size, BINARY};
use log::LevelFilter::Info;
use simple_logger::SimpleLogger;

use maze_gen::distance::{diameter, Distances};
use maze_gen::layout::Overview;
use maze_gen::Topology;

#[derive(Parser)]
struct Args {
    /// File to show info for
    infile: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let Args { infile } = Args::parse();
    SimpleLogger::new()
        .without_timestamps()
        .with_level(Info)
        .env()
        .init()
        .expect("Failed to init logger");
    let topology = Topology::bufread(BufReader::new(File::open(&infile)?))?;

    let distances = Distances::from(topology.grid(), topology.start());
    let (a, b, longest) = diameter(topology.grid());
    let overview = Overview::new(&topology);

    println!("File: {}", infile.to_string_lossy());
    println!("Size: {}x{}", topology.width(), topology.height());
    println!("Cell size: {}", topology.cell_size());
    println!("Seed: {}", topology.seed_used());
    println!("Entrance: {:?}", topology.entrance());
    println!("Exit: {:?}", topology.exit());
    match distances.get(topology.exit_cell()) {
        Some(d) => println!("Exit path length: {d}"),
        None => println!("Exit path length: unreachable"),
    }
    println!("Longest path: {longest}, from {a:?} to {b:?}");
    println!(
        "Overview: center {:?}, size {}",
        overview.center, overview.size
    );
    println!(
        "Unpacked memory: {}",
        format_size(topology.deep_size_of(), BINARY)
    );

    Ok(())
}
