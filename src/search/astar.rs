//! A* search with the Manhattan distance heuristic
//!
//! The heuristic is consistent for unit-cost 4-directional moves, so the
//! first time the end is taken from the open set its path is shortest.
//! The open set is a binary heap with lazy deletion: relaxing a cell pushes
//! a new entry and the superseded one is skipped when popped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::trace;

use crate::grid::Coordinate;

use super::{open_neighbors, Explorer, SearchResult};

const UNREACHED: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: usize,
    g: usize,
    idx: usize,
}

/// Lowest `f` first; among equal `f` the deeper node, then the lower index
impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub(super) struct AStar<'g> {
    explorer: Explorer<'g>,
    goal: Coordinate,
    /// Best known cost from start
    g_score: Vec<usize>,
    open: BinaryHeap<OpenNode>,
}

impl<'g> AStar<'g> {
    pub(super) fn new(explorer: Explorer<'g>) -> Self {
        let goal = explorer.grid.coordinate(explorer.end);
        let mut g_score = vec![UNREACHED; explorer.grid.cell_count()];
        g_score[explorer.start] = 0;

        let mut astar = AStar {
            explorer,
            goal,
            g_score,
            open: BinaryHeap::new(),
        };
        let start = astar.explorer.start;
        astar.open.push(OpenNode {
            f: astar.estimate(start),
            g: 0,
            idx: start,
        });
        astar
    }

    fn estimate(&self, idx: usize) -> usize {
        self.explorer.grid.coordinate(idx).manhattan(self.goal)
    }

    /// Expand until the end is taken from the open set or the set runs dry
    fn run(&mut self) -> bool {
        while let Some(OpenNode { g, idx, .. }) = self.open.pop() {
            if g != self.g_score[idx] || self.explorer.settled[idx] {
                continue;
            }
            if idx == self.explorer.end {
                return true;
            }
            self.explorer.settle(idx);

            let tentative = g + 1;
            for next in open_neighbors(self.explorer.grid, &self.explorer.settled, idx) {
                if tentative >= self.g_score[next] {
                    continue;
                }
                trace!(
                    "relax {} to g={}",
                    self.explorer.grid.coordinate(next),
                    tentative
                );
                let f = tentative + self.estimate(next);
                self.explorer.came_from[next] = Some(idx);
                self.g_score[next] = tentative;
                self.open.push(OpenNode {
                    f,
                    g: tentative,
                    idx: next,
                });
            }
        }
        false
    }

    pub(super) fn search(mut self) -> SearchResult {
        let found = self.run();
        self.explorer.into_result(found)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::{AStar, OpenNode};
    use crate::search::Explorer;
    use crate::{Algorithm, Coordinate, Grid, MazeGenerator};

    fn astar(grid: &Grid) -> AStar<'_> {
        let start = grid.start().and_then(|c| grid.index(c)).unwrap();
        let end = grid.end().and_then(|c| grid.index(c)).unwrap();
        AStar::new(Explorer::new(grid, start, end))
    }

    #[test]
    fn heap_pops_lowest_estimate() {
        let mut open = BinaryHeap::new();
        open.push(OpenNode { f: 7, g: 1, idx: 0 });
        open.push(OpenNode { f: 5, g: 1, idx: 1 });
        open.push(OpenNode { f: 5, g: 3, idx: 2 });
        open.push(OpenNode { f: 9, g: 0, idx: 3 });

        let order: Vec<usize> = std::iter::from_fn(|| open.pop().map(|node| node.idx)).collect();
        assert_eq!(order, vec![2, 1, 0, 3]);
    }

    #[test]
    fn path_cost_matches_final_score() {
        for seed in 0..10 {
            let mut grid = MazeGenerator::new(Some(seed)).generate_maze(25, 37).unwrap();
            grid.set_start(Coordinate::new(1, 1)).unwrap();
            grid.set_end(Coordinate::new(19, 31)).unwrap();
            let end = grid.index(Coordinate::new(19, 31)).unwrap();

            let mut search = astar(&grid);
            if search.run() {
                let path = search.explorer.reconstruct();
                assert_eq!(path.len() - 1, search.g_score[end], "seed {}", seed);
            } else {
                assert!(!grid.search(Algorithm::Bfs).unwrap().is_found());
            }
        }
    }

    #[test]
    fn open_grid_expands_only_the_corridor() {
        let grid = Grid::parse_emojis(
            "
🟩🟩🟩🟩🟩🟩🟩
🟩🏃🟩🟩🟩❎🟩
🟩🟩🟩🟩🟩🟩🟩
🟩🟩🟩🟩🟩🟩🟩",
        )
        .unwrap();
        let result = astar(&grid).search();
        assert_eq!(result.steps(), Some(4));
        assert_eq!(
            result.trace().coordinates().collect::<Vec<_>>(),
            vec![
                Coordinate::new(1, 2),
                Coordinate::new(1, 3),
                Coordinate::new(1, 4),
            ]
        );

        let bfs = grid.search(Algorithm::Bfs).unwrap();
        assert!(bfs.trace().len() > result.trace().len());
    }

    #[test]
    fn walled_detour_is_shortest() {
        let grid = Grid::parse_emojis(
            "
🟫🟫🟫🟫🟫🟫🟫
🟫🏃🟩🟫🟩❎🟫
🟫🟩🟩🟫🟩🟩🟫
🟫🟩🟩🟩🟩🟩🟫
🟫🟫🟫🟫🟫🟫🟫",
        )
        .unwrap();
        let result = astar(&grid).search();
        assert_eq!(result.steps(), Some(8));
        assert_eq!(result.steps(), grid.search(Algorithm::Bfs).unwrap().steps());
    }
}
