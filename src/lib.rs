//! Shortest-path search on 4-connected grid mazes.
//!
//! [`grid`] holds the maze model, [`algorithms`] the seven search engines
//! behind a single [`algorithms::run`] entry point. The remaining modules
//! wrap those for the command line and for JSON clients.

pub mod algorithms;
pub mod api;
pub mod compare;
pub mod config;
pub mod error;
pub mod grid;
pub mod maze;
pub mod statistics;

pub use algorithms::{run, run_with_limits, Algorithm, Heuristic, Outcome, Path, SearchLimits, SearchResult};
pub use error::GridError;
pub use grid::{build_grid, Cell, Grid, Obstacles, Position};
