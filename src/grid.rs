//! Cell matrix with a single start and a single end marker

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail};
use itertools::Itertools;

use crate::error::GridError;

/// Location in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Number of 4-directional steps between two coordinates, ignoring walls
    pub fn manhattan(self, other: Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Coordinate {
    type Err = GridError;

    /// Parse `row,col`, e.g. `3,14`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridError::InvalidCoordinate(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        Ok(Coordinate {
            row: row.trim().parse().map_err(|_| invalid())?,
            col: col.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// What a single cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellKind {
    #[default]
    Free,
    Start,
    End,
    Wall,
    /// Expanded by a search run
    Visited,
    /// Part of the route found by a search run
    Path,
}

impl CellKind {
    const S_FREE: char = '🟩';
    const S_START: char = '🏃';
    const S_END: char = '❎';
    const S_WALL: char = '🟫';
    const S_VISITED: char = '🟨';
    const S_PATH: char = '🟦';

    pub const ALL: [CellKind; 6] = [
        CellKind::Free,
        CellKind::Start,
        CellKind::End,
        CellKind::Wall,
        CellKind::Visited,
        CellKind::Path,
    ];

    /// Emoji used for this kind in the text format
    pub fn symbol(self) -> char {
        match self {
            CellKind::Free => Self::S_FREE,
            CellKind::Start => Self::S_START,
            CellKind::End => Self::S_END,
            CellKind::Wall => Self::S_WALL,
            CellKind::Visited => Self::S_VISITED,
            CellKind::Path => Self::S_PATH,
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.symbol() == symbol)
    }

    /// Search may step onto this cell
    pub fn is_enterable(self) -> bool {
        self != CellKind::Wall
    }

    /// Written by a search run, cleared before the next one
    pub fn is_transient(self) -> bool {
        matches!(self, CellKind::Visited | CellKind::Path)
    }

    pub fn is_endpoint(self) -> bool {
        matches!(self, CellKind::Start | CellKind::End)
    }
}

/// A single cell write, as recorded by a search and replayed onto a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub coordinate: Coordinate,
    pub kind: CellKind,
}

#[derive(Clone, Copy)]
enum Marker {
    Start,
    End,
}

/// Rectangular `rows x cols` grid of cells
///
/// Cells are stored row-major. The start and end positions are cached next
/// to the cells, so that at most one cell holds each marker and the two
/// never coincide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
    start: Option<Coordinate>,
    end: Option<Coordinate>,
}

impl Grid {
    /// Neighbour order: north, south, west, east
    const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    /// Create a grid of free cells without start or end
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows <= 2 || cols <= 2 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        Ok(Grid {
            rows,
            cols,
            cells: vec![CellKind::Free; rows * cols],
            start: None,
            end: None,
        })
    }

    /// Parse grid from its emoji representation
    ///
    /// Every row must have the same number of cells, and at most one start
    /// (`🏃`) and one end (`❎`) may be present.
    ///
    /// # Examples
    /// ```
    /// use maze_pathfinder::{CellKind, Coordinate, Grid};
    ///
    /// let grid = Grid::parse_emojis(
    ///     "
    /// 🟫🟫🟫🟫
    /// 🟫🏃❎🟫
    /// 🟫🟫🟫🟫",
    /// )
    /// .unwrap();
    /// assert_eq!(grid.start(), Some(Coordinate::new(1, 1)));
    /// assert_eq!(grid.get(Coordinate::new(0, 0)), Some(CellKind::Wall));
    /// ```
    pub fn parse_emojis(emojis: &str) -> anyhow::Result<Self> {
        let squares: Vec<Vec<char>> = emojis
            .trim()
            .lines()
            .map(|row| row.trim().chars().collect())
            .collect();
        let cols = squares.first().map_or(0, Vec::len);
        let mut grid = Grid::new(squares.len(), cols)?;

        for (row, symbols) in squares.iter().enumerate() {
            if symbols.len() != cols {
                bail!(
                    "Row {} has {} cells, expected {}",
                    row,
                    symbols.len(),
                    cols
                );
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                let coordinate = Coordinate::new(row, col);
                let kind = CellKind::from_symbol(symbol).ok_or_else(|| {
                    anyhow!("Unexpected character `{}` at row={}, col={}", symbol, row, col)
                })?;
                match kind {
                    CellKind::Start if grid.start.is_some() => {
                        bail!("Second start marker at {}", coordinate)
                    }
                    CellKind::End if grid.end.is_some() => {
                        bail!("Second end marker at {}", coordinate)
                    }
                    CellKind::Start => grid.set_start(coordinate)?,
                    CellKind::End => grid.set_end(coordinate)?,
                    kind => grid.set_cell(coordinate, kind),
                }
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.start
    }

    pub fn end(&self) -> Option<Coordinate> {
        self.end
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.row < self.rows && coordinate.col < self.cols
    }

    pub fn get(&self, coordinate: Coordinate) -> Option<CellKind> {
        self.index(coordinate).map(|idx| self.cells[idx])
    }

    /// Number of cells holding `kind`
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    /// Row-major index of `coordinate`, if it lies in the grid
    pub(crate) fn index(&self, coordinate: Coordinate) -> Option<usize> {
        self.contains(coordinate)
            .then_some(coordinate.row * self.cols + coordinate.col)
    }

    pub(crate) fn coordinate(&self, idx: usize) -> Coordinate {
        Coordinate::new(idx / self.cols, idx % self.cols)
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn kind_at(&self, idx: usize) -> CellKind {
        self.cells[idx]
    }

    /// Overwrite a cell without any marker bookkeeping
    ///
    /// Callers must not pass `Start`/`End` nor target a marked cell.
    pub(crate) fn set_cell(&mut self, coordinate: Coordinate, kind: CellKind) {
        if let Some(idx) = self.index(coordinate) {
            self.cells[idx] = kind;
        }
    }

    pub(crate) fn checked_index(&self, coordinate: Coordinate) -> Result<usize, GridError> {
        self.index(coordinate).ok_or(GridError::OutOfBounds {
            coordinate,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Move the start marker to `coordinate`
    ///
    /// The previous start cell becomes free. Fails without changes if
    /// `coordinate` is out of bounds or holds the end marker.
    pub fn set_start(&mut self, coordinate: Coordinate) -> Result<(), GridError> {
        self.place_marker(Marker::Start, coordinate)
    }

    /// Move the end marker to `coordinate`, see [Self::set_start]
    pub fn set_end(&mut self, coordinate: Coordinate) -> Result<(), GridError> {
        self.place_marker(Marker::End, coordinate)
    }

    fn place_marker(&mut self, marker: Marker, coordinate: Coordinate) -> Result<(), GridError> {
        let idx = self.checked_index(coordinate)?;
        let (own, other, kind) = match marker {
            Marker::Start => (self.start, self.end, CellKind::Start),
            Marker::End => (self.end, self.start, CellKind::End),
        };
        if other == Some(coordinate) {
            return Err(GridError::StartEqualsEnd(coordinate));
        }

        if let Some(previous) = own.and_then(|c| self.index(c)) {
            self.cells[previous] = CellKind::Free;
        }
        self.cells[idx] = kind;
        match marker {
            Marker::Start => self.start = Some(coordinate),
            Marker::End => self.end = Some(coordinate),
        }
        Ok(())
    }

    /// Flip a cell between free and wall
    ///
    /// Start and end cells are left untouched. Visited and path cells count
    /// as free.
    pub fn toggle_wall(&mut self, coordinate: Coordinate) -> Result<(), GridError> {
        let idx = self.checked_index(coordinate)?;
        self.cells[idx] = match self.cells[idx] {
            CellKind::Start | CellKind::End => return Ok(()),
            CellKind::Wall => CellKind::Free,
            CellKind::Free | CellKind::Visited | CellKind::Path => CellKind::Wall,
        };
        Ok(())
    }

    /// Turn a cell into wall, as when dragging across the grid
    pub fn paint_wall(&mut self, coordinate: Coordinate) -> Result<(), GridError> {
        let idx = self.checked_index(coordinate)?;
        if !self.cells[idx].is_endpoint() {
            self.cells[idx] = CellKind::Wall;
        }
        Ok(())
    }

    /// Clear every visited and path cell left by an earlier search
    pub fn reset_transient(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_transient()) {
            *cell = CellKind::Free;
        }
    }

    /// Replay a single recorded cell write
    ///
    /// Start and end cells keep their marker. Writing `Start`/`End` moves
    /// the corresponding marker.
    pub fn apply(&mut self, transition: &Transition) -> Result<(), GridError> {
        let idx = self.checked_index(transition.coordinate)?;
        match transition.kind {
            CellKind::Start => self.set_start(transition.coordinate),
            CellKind::End => self.set_end(transition.coordinate),
            _ if self.cells[idx].is_endpoint() => Ok(()),
            kind => {
                self.cells[idx] = kind;
                Ok(())
            }
        }
    }

    /// In-bounds orthogonal neighbours of `coordinate`
    pub fn neighbors(&self, coordinate: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        Self::DIRECTIONS.into_iter().filter_map(move |(dr, dc)| {
            let next = Coordinate::new(
                coordinate.row.checked_add_signed(dr)?,
                coordinate.col.checked_add_signed(dc)?,
            );
            self.contains(next).then_some(next)
        })
    }
}

impl FromStr for Grid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grid::parse_emojis(s)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.symbol()).join(""))
            .join("\n");
        write!(f, "{}", text)
    }
}
