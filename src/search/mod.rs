//! Route finding between the start and end cells
//!
//! All strategies move in four directions at unit cost and never step onto
//! a wall. They read the grid without modifying it: the visited cells are
//! recorded in a [Trace] instead, to be replayed by
//! [Sequencer](crate::Sequencer). Stale visited and path cells in the input
//! count as free.

mod astar;
mod uninformed;

use std::fmt;

use log::{debug, info};

use crate::error::GridError;
use crate::grid::{CellKind, Coordinate, Grid, Transition};

/// Search strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    /// Breadth-first search, finds a shortest path
    Bfs,
    /// Depth-first search, finds some path
    Dfs,
    /// A* with Manhattan distance heuristic, finds a shortest path
    #[value(name = "astar", alias = "a-star")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::AStar];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::AStar => "A*",
        })
    }
}

/// Cells marked visited by one search, in expansion order
///
/// Start and end cells never appear here, and each coordinate appears at
/// most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace(Vec<Transition>);

impl Trace {
    fn record(&mut self, coordinate: Coordinate) {
        self.0.push(Transition {
            coordinate,
            kind: CellKind::Visited,
        });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transition> {
        self.0.iter()
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.0.iter().map(|transition| transition.coordinate)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Transition;
    type IntoIter = std::slice::Iter<'a, Transition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Outcome of a single search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// End was reached. `path` runs from start to end, both included.
    /// `highlight` is the part of it that may be painted as path.
    Found {
        trace: Trace,
        path: Vec<Coordinate>,
        highlight: Vec<Coordinate>,
    },
    /// Every reachable cell was expanded without meeting the end
    NotFound { trace: Trace },
}

impl SearchResult {
    pub fn trace(&self) -> &Trace {
        match self {
            SearchResult::Found { trace, .. } | SearchResult::NotFound { trace } => trace,
        }
    }

    pub fn path(&self) -> Option<&[Coordinate]> {
        match self {
            SearchResult::Found { path, .. } => Some(path),
            SearchResult::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found { .. })
    }

    /// Number of moves along the path
    pub fn steps(&self) -> Option<usize> {
        self.path().map(|path| path.len().saturating_sub(1))
    }

    /// Path cells to highlight: the path without its endpoints and without
    /// any start or end marker cell it crosses
    pub fn highlight(&self) -> &[Coordinate] {
        match self {
            SearchResult::Found { highlight, .. } => highlight,
            SearchResult::NotFound { .. } => &[],
        }
    }

    pub fn summary(&self) -> String {
        match self.steps() {
            Some(steps) => format!(
                "Found a path of {} steps after visiting {} cells.",
                steps,
                self.trace().len()
            ),
            None => format!("No path found after visiting {} cells.", self.trace().len()),
        }
    }

    /// Print report
    pub fn print_report(&self) {
        println!("{}", self.summary())
    }
}

/// Search a route from `start` to `end` on `grid`
///
/// The endpoints are taken as given, independently of the markers stored
/// in the grid. Fails if either lies outside the grid or on a wall, or if
/// they coincide. Marker cells crossed on the way are neither traced nor
/// highlighted.
pub fn find_path(
    grid: &Grid,
    start: Coordinate,
    end: Coordinate,
    algorithm: Algorithm,
) -> Result<SearchResult, GridError> {
    let start_idx = grid.checked_index(start)?;
    let end_idx = grid.checked_index(end)?;
    if start_idx == end_idx {
        return Err(GridError::StartEqualsEnd(start));
    }
    for (endpoint, idx) in [(start, start_idx), (end, end_idx)] {
        if !grid.kind_at(idx).is_enterable() {
            return Err(GridError::BlockedEndpoint(endpoint));
        }
    }

    debug!(
        "{} search from {} to {} on {}x{} grid",
        algorithm,
        start,
        end,
        grid.rows(),
        grid.cols()
    );
    let explorer = Explorer::new(grid, start_idx, end_idx);
    let result = match algorithm {
        Algorithm::Bfs => uninformed::search::<uninformed::Queue>(explorer),
        Algorithm::Dfs => uninformed::search::<uninformed::Stack>(explorer),
        Algorithm::AStar => astar::AStar::new(explorer).search(),
    };
    info!("{}: {}", algorithm, result.summary());
    Ok(result)
}

impl Grid {
    /// Search a route between the grid's own start and end markers
    ///
    /// # Examples
    /// ```
    /// use maze_pathfinder::{Algorithm, Coordinate, Grid, GridError};
    ///
    /// let mut grid = Grid::new(5, 5).unwrap();
    /// assert_eq!(grid.search(Algorithm::Bfs), Err(GridError::MissingEndpoints));
    ///
    /// grid.set_start(Coordinate::new(1, 1)).unwrap();
    /// grid.set_end(Coordinate::new(1, 3)).unwrap();
    /// assert_eq!(grid.search(Algorithm::Bfs).unwrap().steps(), Some(2));
    /// ```
    pub fn search(&self, algorithm: Algorithm) -> Result<SearchResult, GridError> {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => find_path(self, start, end, algorithm),
            _ => Err(GridError::MissingEndpoints),
        }
    }
}

/// Per-cell bookkeeping shared by the strategies, indexed row-major
struct Explorer<'g> {
    grid: &'g Grid,
    start: usize,
    end: usize,
    /// Cells already expanded; expansion is final
    settled: Vec<bool>,
    came_from: Vec<Option<usize>>,
    trace: Trace,
}

impl<'g> Explorer<'g> {
    fn new(grid: &'g Grid, start: usize, end: usize) -> Self {
        let n = grid.cell_count();
        Explorer {
            grid,
            start,
            end,
            settled: vec![false; n],
            came_from: vec![None; n],
            trace: Trace::default(),
        }
    }

    /// Cell that may receive a visited or path annotation
    fn is_paintable(&self, idx: usize) -> bool {
        let kind = self.grid.kind_at(idx);
        idx != self.start && idx != self.end && kind.is_enterable() && !kind.is_endpoint()
    }

    /// Mark `idx` expanded, returning `false` if it already was
    fn settle(&mut self, idx: usize) -> bool {
        if self.settled[idx] {
            return false;
        }
        self.settled[idx] = true;
        if self.is_paintable(idx) {
            self.trace.record(self.grid.coordinate(idx));
        }
        true
    }

    /// Walk `came_from` back from the end
    fn reconstruct_indices(&self) -> Vec<usize> {
        let mut path = vec![self.end];
        let mut current = self.end;
        while let Some(previous) = self.came_from[current] {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    }

    #[cfg(test)]
    fn reconstruct(&self) -> Vec<Coordinate> {
        self.reconstruct_indices()
            .into_iter()
            .map(|idx| self.grid.coordinate(idx))
            .collect()
    }

    fn into_result(self, found: bool) -> SearchResult {
        if found {
            let indices = self.reconstruct_indices();
            let highlight = indices
                .iter()
                .filter(|&&idx| self.is_paintable(idx))
                .map(|&idx| self.grid.coordinate(idx))
                .collect();
            let path = indices
                .into_iter()
                .map(|idx| self.grid.coordinate(idx))
                .collect();
            SearchResult::Found {
                trace: self.trace,
                path,
                highlight,
            }
        } else {
            SearchResult::NotFound { trace: self.trace }
        }
    }
}

/// Enterable neighbours of `idx` that have not been expanded yet
fn open_neighbors<'a>(
    grid: &'a Grid,
    settled: &'a [bool],
    idx: usize,
) -> impl Iterator<Item = usize> + 'a {
    grid.neighbors(grid.coordinate(idx))
        .filter_map(move |coordinate| grid.index(coordinate))
        .filter(move |&next| !settled[next] && grid.kind_at(next).is_enterable())
}
