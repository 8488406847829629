use thiserror::Error;

use crate::maze::Coord;

/// Configuration errors. Raised when a maze or a search is set up, never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze must have at least one row and one column, got {rows}x{columns}")]
    EmptyGrid { rows: usize, columns: usize },

    #[error("cell size must be greater than zero")]
    ZeroCellSize,

    #[error(
        "surface {width}x{height} with padding {padding} has no room for a {cell_size}-unit cell"
    )]
    SurfaceTooSmall {
        width: usize,
        height: usize,
        cell_size: usize,
        padding: usize,
    },

    #[error("{role} cell {coord:?} is outside the {rows}x{columns} maze")]
    OutOfBounds {
        role: &'static str,
        coord: Coord,
        rows: usize,
        columns: usize,
    },
}

/// Returned by [`crate::solvers::frontier::Frontier::remove`] when nothing is pending.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrontierError {
    #[error("cannot remove from an empty frontier")]
    Empty,
}
