//! Frame-by-frame replay of a search
//!
//! A [Sequencer] turns a [SearchResult] into cell updates, each carrying an
//! advisory delay for pacing the display. It never touches a grid; the
//! caller applies each frame with [Grid::apply]. Every frame is a single
//! idempotent write, so the caller may stop after any of them.

use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::grid::{CellKind, Coordinate, Grid, Transition};
use crate::search::{Algorithm, SearchResult};

/// Delay suggested after each kind of frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub visit: Duration,
    pub path: Duration,
}

impl Pacing {
    const PATH_MS: u64 = 20;

    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        let visit_ms = match algorithm {
            Algorithm::Dfs => 5,
            Algorithm::Bfs | Algorithm::AStar => 10,
        };
        Pacing {
            visit: Duration::from_millis(visit_ms),
            path: Duration::from_millis(Self::PATH_MS),
        }
    }

    /// No delays at all
    pub fn instant() -> Self {
        Pacing {
            visit: Duration::ZERO,
            path: Duration::ZERO,
        }
    }

    /// Stretch every delay by `factor`
    pub fn scaled(self, factor: u32) -> Self {
        Pacing {
            visit: self.visit * factor,
            path: self.path * factor,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::for_algorithm(Algorithm::Bfs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Update {
        transition: Transition,
        delay: Duration,
    },
    /// Replay finished without reaching the end
    NotFound,
}

/// Visited cells in search order, then the path between the endpoints
pub struct Sequencer<'r> {
    visits: std::slice::Iter<'r, Transition>,
    path: std::slice::Iter<'r, Coordinate>,
    pacing: Pacing,
    not_found: bool,
}

impl<'r> Sequencer<'r> {
    pub fn new(result: &'r SearchResult, pacing: Pacing) -> Self {
        Sequencer {
            visits: result.trace().iter(),
            path: result.highlight().iter(),
            pacing,
            not_found: !result.is_found(),
        }
    }
}

impl Iterator for Sequencer<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if let Some(&transition) = self.visits.next() {
            return Some(Frame::Update {
                transition,
                delay: self.pacing.visit,
            });
        }
        if let Some(&coordinate) = self.path.next() {
            return Some(Frame::Update {
                transition: Transition {
                    coordinate,
                    kind: CellKind::Path,
                },
                delay: self.pacing.path,
            });
        }
        std::mem::take(&mut self.not_found).then_some(Frame::NotFound)
    }
}

impl SearchResult {
    pub fn frames(&self, pacing: Pacing) -> Sequencer<'_> {
        Sequencer::new(self, pacing)
    }
}

/// Print replay to the terminal
///
/// Starts from `grid` with earlier search marks removed, redraws it after
/// each frame and sleeps for the frame's delay. Returns the grid as left by
/// the last frame.
pub fn playback<W: Write>(
    out: &mut W,
    grid: &Grid,
    frames: impl IntoIterator<Item = Frame>,
) -> anyhow::Result<Grid> {
    let mut grid = grid.clone();
    grid.reset_transient();
    redraw(out, &grid)?;

    for frame in frames {
        match frame {
            Frame::Update { transition, delay } => {
                grid.apply(&transition)?;
                redraw(out, &grid)?;
                thread::sleep(delay);
            }
            Frame::NotFound => writeln!(out, "No path found.")?,
        }
    }
    Ok(grid)
}

fn redraw<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    write!(out, "\x1B[2J\x1B[1;1H")?;
    writeln!(out, "{}", grid)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{playback, Algorithm, CellKind, Coordinate, Frame, Grid, Pacing};

    fn maze() -> Grid {
        Grid::parse_emojis(
            "
🟫🟫🟫🟫🟫🟫🟫
🟫🏃🟩🟫🟩❎🟫
🟫🟩🟩🟫🟩🟩🟫
🟫🟩🟩🟩🟩🟩🟫
🟫🟫🟫🟫🟫🟫🟫",
        )
        .unwrap()
    }

    #[test]
    fn visits_come_before_path() {
        let result = maze().search(Algorithm::Bfs).unwrap();
        let pacing = Pacing::for_algorithm(Algorithm::Bfs);
        let frames: Vec<Frame> = result.frames(pacing).collect();

        assert_eq!(frames.len(), result.trace().len() + result.highlight().len());
        let (visits, path) = frames.split_at(result.trace().len());
        for (frame, expected) in visits.iter().zip(result.trace()) {
            assert_eq!(
                *frame,
                Frame::Update {
                    transition: *expected,
                    delay: Duration::from_millis(10),
                }
            );
        }
        for (frame, &coordinate) in path.iter().zip(result.highlight()) {
            match frame {
                Frame::Update { transition, delay } => {
                    assert_eq!(transition.coordinate, coordinate);
                    assert_eq!(transition.kind, CellKind::Path);
                    assert_eq!(*delay, Duration::from_millis(20));
                }
                Frame::NotFound => panic!("unexpected end of replay"),
            }
        }
    }

    #[test]
    fn replay_marks_grid() {
        let grid = maze();
        for algorithm in Algorithm::ALL {
            let result = grid.search(algorithm).unwrap();
            let mut replayed = grid.clone();
            for frame in result.frames(Pacing::instant()) {
                if let Frame::Update { transition, .. } = frame {
                    replayed.apply(&transition).unwrap();
                }
            }

            let path_cells = result.highlight().len();
            assert_eq!(path_cells, result.steps().unwrap() - 1);
            assert_eq!(replayed.count(CellKind::Path), path_cells);
            assert_eq!(
                replayed.count(CellKind::Visited),
                result.trace().len() - path_cells
            );
            assert_eq!(replayed.start(), grid.start());
            assert_eq!(replayed.end(), grid.end());

            replayed.reset_transient();
            assert_eq!(replayed, grid);
        }
    }

    #[test]
    fn not_found_is_signalled_last() {
        let grid = Grid::parse_emojis(
            "
🏃🟩🟫🟩
🟩🟩🟫🟩
🟩🟩🟫❎",
        )
        .unwrap();
        let result = grid.search(Algorithm::Dfs).unwrap();
        let frames: Vec<Frame> = result.frames(Pacing::instant()).collect();

        assert_eq!(frames.len(), result.trace().len() + 1);
        assert_eq!(frames.last(), Some(&Frame::NotFound));
        assert_eq!(
            frames.iter().filter(|f| **f == Frame::NotFound).count(),
            1
        );
    }

    #[test]
    fn abandoned_replay_leaves_consistent_grid() {
        let grid = maze();
        let result = grid.search(Algorithm::AStar).unwrap();
        let mut partial = grid.clone();
        for frame in result.frames(Pacing::instant()).take(3) {
            if let Frame::Update { transition, .. } = frame {
                partial.apply(&transition).unwrap();
            }
        }
        assert_eq!(partial.count(CellKind::Visited), 3);
        assert_eq!(partial.get(Coordinate::new(1, 1)), Some(CellKind::Start));

        partial.reset_transient();
        assert_eq!(partial, grid);
    }

    #[test]
    fn pacing_per_algorithm() {
        assert_eq!(Pacing::for_algorithm(Algorithm::Dfs).visit, Duration::from_millis(5));
        assert_eq!(Pacing::default(), Pacing::for_algorithm(Algorithm::AStar));
        let slow = Pacing::for_algorithm(Algorithm::Bfs).scaled(3);
        assert_eq!(slow.visit, Duration::from_millis(30));
        assert_eq!(slow.path, Duration::from_millis(60));
    }

    #[test]
    fn playback_redraws_every_frame() {
        let grid = Grid::parse_emojis(
            "
🏃🟩🟫🟩
🟩🟩🟫❎
🟩🟩🟫🟩",
        )
        .unwrap();
        let result = grid.search(Algorithm::Bfs).unwrap();
        let mut out = Vec::new();
        let last = playback(&mut out, &grid, result.frames(Pacing::instant())).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\x1B[2J").count(), result.trace().len() + 1);
        assert!(text.ends_with("No path found.\n"));
        assert!(text.contains(&last.to_string()));
        assert_eq!(last.count(CellKind::Visited), 5);
    }
}
