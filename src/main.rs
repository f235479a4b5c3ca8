//! CLI for grid solving

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use log::info;
use maze_pathfinder::{playback, Algorithm, Coordinate, Grid, Pacing};

/// Find a route from start to end through a grid of walls
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Search algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::Bfs)]
    algorithm: Algorithm,

    /// Run every algorithm and print one summary line each
    #[arg(long, conflicts_with = "playback")]
    compare: bool,

    /// Move the start marker to `row,col`
    #[arg(long)]
    start: Option<Coordinate>,

    /// Move the end marker to `row,col`
    #[arg(long)]
    end: Option<Coordinate>,

    /// Replay the search on the terminal
    #[arg(short, long)]
    playback: bool,

    /// Multiply the playback delays by this factor
    #[arg(short, long, default_value_t = 1)]
    slowdown: u32,

    /// File, where to read the grid. Use `-` for stdin.
    file: PathBuf,
}

/// Read grid from file, print output
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let emojis = if args.file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.file)
            .with_context(|| format!("Cannot read {}", args.file.display()))?
    };
    let mut grid = Grid::parse_emojis(&emojis)?;
    if let Some(start) = args.start {
        grid.set_start(start)?;
    }
    if let Some(end) = args.end {
        grid.set_end(end)?;
    }
    grid.reset_transient();
    info!("Loaded {}x{} grid", grid.rows(), grid.cols());

    if args.compare {
        for algorithm in Algorithm::ALL {
            let result = grid.search(algorithm)?;
            println!("{:>3}: {}", algorithm, result.summary());
        }
        return Ok(());
    }

    let result = grid.search(args.algorithm)?;
    if args.playback {
        let pacing = Pacing::for_algorithm(args.algorithm).scaled(args.slowdown);
        playback(&mut io::stdout().lock(), &grid, result.frames(pacing))?;
    }
    result.print_report();
    Ok(())
}
