//! Map generation

use std::f64::consts::PI;

use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::GridError;
use crate::grid::{CellKind, Coordinate, Grid};

/// Maze generator laying rings and spiral arms of walls over an open lattice
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    /// Spacing of the lattice cells that are always kept free
    const LATTICE: usize = 6;
    /// No obstacles this close to the centre
    const CLEAR_RADIUS: f64 = 5.0;

    const RING_SPACING: f64 = 8.0;
    const RING_WIDTH: f64 = 0.8;
    const RING_DENSITY: f64 = 0.7;

    const SPIRAL_SECTOR: f64 = PI / 6.0;
    const SPIRAL_TWIST: f64 = 3.0;
    const SPIRAL_WIDTH: f64 = 0.2;
    const SPIRAL_DENSITY: f64 = 0.6;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate a walled maze without start or end
    ///
    /// The outer ring is solid wall. Inside, concentric rings and spiral
    /// arms around the centre are randomly turned into walls, then every
    /// sixth interior row and column crossing is cleared together with its
    /// right and lower neighbour, so that the maze does not fall apart into
    /// sealed pockets.
    pub fn generate_maze(&mut self, rows: usize, cols: usize) -> Result<Grid, GridError> {
        let mut grid = Grid::new(rows, cols)?;
        let center_row = rows as f64 / 2.0;
        let center_col = cols as f64 / 2.0;

        for row in 0..rows {
            for col in 0..cols {
                let border = row == 0 || row == rows - 1 || col == 0 || col == cols - 1;
                if border || self.is_obstacle(row as f64 - center_row, col as f64 - center_col) {
                    grid.set_cell(Coordinate::new(row, col), CellKind::Wall);
                }
            }
        }
        Self::open_lattice(&mut grid);

        debug!(
            "Generated {}x{} maze with {} walls",
            rows,
            cols,
            grid.count(CellKind::Wall)
        );
        Ok(grid)
    }

    /// Ring rule, then spiral rule, for the cell at offset (`drow`, `dcol`)
    /// from the centre
    ///
    /// A random number is only drawn where the shape matches.
    fn is_obstacle(&mut self, drow: f64, dcol: f64) -> bool {
        let distance = drow.hypot(dcol);
        if distance <= Self::CLEAR_RADIUS {
            return false;
        }

        let on_ring = distance % Self::RING_SPACING < Self::RING_WIDTH;
        if on_ring && self.random.gen_bool(Self::RING_DENSITY) {
            return true;
        }

        let angle = dcol.atan2(drow);
        let on_spiral =
            ((angle + distance / Self::SPIRAL_TWIST) % Self::SPIRAL_SECTOR).abs() < Self::SPIRAL_WIDTH;
        on_spiral && self.random.gen_bool(Self::SPIRAL_DENSITY)
    }

    /// Free lattice cells and their right and lower neighbours, never
    /// touching the outer ring
    fn open_lattice(grid: &mut Grid) {
        let (rows, cols) = (grid.rows(), grid.cols());
        for row in (1..rows - 1).step_by(Self::LATTICE) {
            for col in (1..cols - 1).step_by(Self::LATTICE) {
                grid.set_cell(Coordinate::new(row, col), CellKind::Free);
                if row + 1 < rows - 1 {
                    grid.set_cell(Coordinate::new(row + 1, col), CellKind::Free);
                }
                if col + 1 < cols - 1 {
                    grid.set_cell(Coordinate::new(row, col + 1), CellKind::Free);
                }
            }
        }
    }
}

/// Generate a maze from system entropy, see [MazeGenerator::generate_maze]
pub fn generate_maze(rows: usize, cols: usize) -> Result<Grid, GridError> {
    MazeGenerator::new(None).generate_maze(rows, cols)
}

#[cfg(test)]
mod tests {
    use crate::{generate_maze, maze_generator::MazeGenerator, CellKind, Coordinate, Grid};

    fn lattice_cells(grid: &Grid) -> Vec<Coordinate> {
        let mut cells = Vec::new();
        for row in (1..grid.rows() - 1).step_by(6) {
            for col in (1..grid.cols() - 1).step_by(6) {
                cells.push(Coordinate::new(row, col));
                if row + 1 < grid.rows() - 1 {
                    cells.push(Coordinate::new(row + 1, col));
                }
                if col + 1 < grid.cols() - 1 {
                    cells.push(Coordinate::new(row, col + 1));
                }
            }
        }
        cells
    }

    #[test]
    fn border_is_walled_and_lattice_is_free() {
        let mut generator = MazeGenerator::new(Some(0));
        for (rows, cols) in [(3, 3), (9, 17), (40, 80), (31, 20)] {
            let grid = generator.generate_maze(rows, cols).unwrap();

            for row in 0..rows {
                for col in 0..cols {
                    if row == 0 || row == rows - 1 || col == 0 || col == cols - 1 {
                        assert_eq!(grid.get(Coordinate::new(row, col)), Some(CellKind::Wall));
                    }
                }
            }
            for cell in lattice_cells(&grid) {
                assert_eq!(grid.get(cell), Some(CellKind::Free), "{} in {}x{}", cell, rows, cols);
            }
            assert_eq!(grid.start(), None);
            assert_eq!(grid.end(), None);
        }
    }

    #[test]
    fn centre_stays_open() {
        let grid = MazeGenerator::new(Some(3)).generate_maze(40, 80).unwrap();
        for row in 15..=25 {
            for col in 35..=45 {
                let (drow, dcol) = (row as f64 - 20.0, col as f64 - 40.0);
                if drow.hypot(dcol) <= 5.0 {
                    assert_eq!(grid.get(Coordinate::new(row, col)), Some(CellKind::Free));
                }
            }
        }
    }

    #[test]
    fn interior_gets_obstacles() {
        let grid = MazeGenerator::new(Some(1)).generate_maze(40, 80).unwrap();
        let border = 2 * 40 + 2 * 78;
        assert!(grid.count(CellKind::Wall) > border);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = MazeGenerator::new(Some(42)).generate_maze(30, 45).unwrap();
        let b = MazeGenerator::new(Some(42)).generate_maze(30, 45).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_thin_mazes() {
        assert!(generate_maze(2, 40).is_err());
        assert!(MazeGenerator::new(None).generate_maze(40, 1).is_err());
    }

    #[test]
    fn generate_parseable_emoji_maze() {
        let mut generator = MazeGenerator::new(Some(0));
        let res = generator.generate_maze(15, 15).unwrap();

        let parsed_result = Grid::parse_emojis(&res.to_string());
        assert_eq!(parsed_result.unwrap(), res);
    }
}
