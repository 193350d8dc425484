use std::fmt;

use thiserror::Error;

use crate::grid::Position;

/// Which end of the search a configuration problem refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

/// Invalid grid configuration. Fatal to the call that produced it.
///
/// "No path" is never reported through this type; see
/// [`Outcome`](crate::algorithms::Outcome).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    Empty { rows: usize, cols: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{0} position is not set")]
    MissingEndpoint(Endpoint),

    #[error("{which} position {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        which: Endpoint,
        pos: Position,
        rows: usize,
        cols: usize,
    },

    #[error("wall {pos} is outside the {rows}x{cols} grid")]
    WallOutOfBounds {
        pos: Position,
        rows: usize,
        cols: usize,
    },

    #[error("obstacle density {0} must be within [0, 1]")]
    Density(f64),

    #[error("requested {rows}x{cols} grid exceeds the {max}x{max} limit")]
    TooLarge { rows: usize, cols: usize, max: usize },
}

/// A command-line position that is not of the form `row,col`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected a position as `row,col`, got {0:?}")]
pub struct ParsePositionError(pub String);

/// An algorithm name that none of the engines answers to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);
