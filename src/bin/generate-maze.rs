//! CLI for maze generation

use clap::Parser;
use maze_pathfinder::{Coordinate, MazeGenerator};

/// Maze generator printing an emoji grid
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated grid height
    #[arg(long, default_value_t = 40)]
    rows: usize,

    /// Generated grid width
    #[arg(long, default_value_t = 80)]
    cols: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Place the start marker at `row,col`
    #[arg(long)]
    start: Option<Coordinate>,

    /// Place the end marker at `row,col`
    #[arg(long)]
    end: Option<Coordinate>,
}

/// Generate maze, print it
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut generator = MazeGenerator::new(args.seed);
    let mut grid = generator.generate_maze(args.rows, args.cols)?;
    if let Some(start) = args.start {
        grid.set_start(start)?;
    }
    if let Some(end) = args.end {
        grid.set_end(end)?;
    }
    println!("{}", grid);
    Ok(())
}
