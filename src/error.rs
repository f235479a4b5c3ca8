//! Errors raised by grid edits and search requests

use thiserror::Error;

use crate::grid::Coordinate;

/// Recoverable precondition failures.
///
/// None of these leave a grid half-modified: an operation either applies
/// fully or is rejected before any cell is written. A search that finds no
/// route is not an error, see [`crate::SearchResult::NotFound`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GridError {
    /// Grid must be at least 3x3 to hold anything inside its outer ring
    #[error("Invalid grid dimensions {rows}x{cols}: both must be greater than 2")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Coordinate {coordinate} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        coordinate: Coordinate,
        rows: usize,
        cols: usize,
    },

    /// Search was requested without both a start and an end marker
    #[error("Start and end positions must be set")]
    MissingEndpoints,

    #[error("Start and end cannot share coordinate {0}")]
    StartEqualsEnd(Coordinate),

    /// Search endpoint given explicitly on a wall cell
    #[error("Search endpoint {0} is a wall")]
    BlockedEndpoint(Coordinate),

    #[error("Cannot parse coordinate `{0}`, expected `row,col`")]
    InvalidCoordinate(String),
}
