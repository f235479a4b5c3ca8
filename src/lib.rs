//! Find a route through a grid of walls, and generate grids to search
//!
//! A [Grid] holds free cells, walls and one start and one end marker.
//! [Grid::search] runs breadth-first search, depth-first search or A* on
//! it and returns a [SearchResult] with the visited cells in expansion
//! order and, if the end was reached, the path. [Sequencer] replays that
//! result as timed cell updates for display.
//!
//! # Examples
//! ## Shortest path around a wall (8 steps)
//! ```
//! use maze_pathfinder::{Algorithm, Grid};
//!
//! let maze_emojis = "
//! 🟫🟫🟫🟫🟫🟫🟫
//! 🟫🏃🟩🟫🟩❎🟫
//! 🟫🟩🟩🟫🟩🟩🟫
//! 🟫🟩🟩🟩🟩🟩🟫
//! 🟫🟫🟫🟫🟫🟫🟫";
//! let grid = Grid::parse_emojis(maze_emojis).unwrap();
//! let result = grid.search(Algorithm::AStar).unwrap();
//! result.print_report();
//! assert_eq!(result.steps(), Some(8));
//! ```
//!
//! ## Generated maze, replayed onto the grid
//! ```
//! use maze_pathfinder::{Algorithm, Coordinate, Frame, MazeGenerator, Pacing};
//!
//! let mut grid = MazeGenerator::new(Some(7)).generate_maze(19, 31).unwrap();
//! grid.set_start(Coordinate::new(1, 1)).unwrap();
//! grid.set_end(Coordinate::new(13, 25)).unwrap();
//!
//! let result = grid.search(Algorithm::Bfs).unwrap();
//! for frame in result.frames(Pacing::instant()) {
//!     match frame {
//!         Frame::Update { transition, .. } => grid.apply(&transition).unwrap(),
//!         Frame::NotFound => println!("No path found."),
//!     }
//! }
//! println!("{}", grid);
//! ```

pub mod animation;
mod error;
pub mod grid;
pub mod maze_generator;
pub mod search;

pub use animation::{playback, Frame, Pacing, Sequencer};
pub use error::GridError;
pub use grid::{CellKind, Coordinate, Grid, Transition};
pub use maze_generator::{generate_maze, MazeGenerator};
pub use search::{find_path, Algorithm, SearchResult, Trace};
