use std::fmt;
use std::time::{Duration, Instant};

use pathfinding::prelude::astar;

use crate::algorithms::{run_with_limits, Algorithm, Heuristic, SearchLimits, SearchResult};
use crate::grid::{Grid, Position};

/// Summary of one search run.
#[derive(Debug, Clone)]
pub struct SearchStats {
    pub algorithm: Algorithm,
    /// Cells explored, per [`SearchResult::visited`].
    pub nodes_visited: usize,
    /// Steps in the path; `None` when no path was found.
    pub path_length: Option<usize>,
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn from_result(algorithm: Algorithm, result: &SearchResult, elapsed: Duration) -> Self {
        SearchStats {
            algorithm,
            nodes_visited: result.visited().len(),
            path_length: result.path().map(|path| path.len()),
            elapsed,
        }
    }

    /// Milliseconds rounded to two decimals.
    pub fn elapsed_ms(&self) -> f64 {
        (self.elapsed.as_secs_f64() * 1000.0 * 100.0).round() / 100.0
    }

    /// Path length over the optimal one; 1.0 is optimal. `None` without a
    /// path on either side.
    pub fn efficiency(&self, optimal: Option<usize>) -> Option<f64> {
        match (self.path_length, optimal) {
            (Some(_), Some(0)) => Some(1.0),
            (Some(length), Some(optimal)) => Some(length as f64 / optimal as f64),
            _ => None,
        }
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Nodes Visited: {}", self.nodes_visited)?;
        match self.path_length {
            Some(length) => writeln!(f, "Path Length: {}", length)?,
            None => writeln!(f, "Path Length: no path")?,
        }
        writeln!(f, "Time Taken: {:.2?}", self.elapsed)?;
        Ok(())
    }
}

/// Run and time a search.
pub fn timed_run(
    algorithm: Algorithm,
    grid: &Grid,
    heuristic: Heuristic,
    limits: SearchLimits,
) -> (SearchResult, SearchStats) {
    let started = Instant::now();
    let result = run_with_limits(algorithm, grid, heuristic, limits);
    let stats = SearchStats::from_result(algorithm, &result, started.elapsed());
    (result, stats)
}

/// Shortest start-to-end step count, computed independently of the engines
/// in this crate.
pub fn optimal_path_length(grid: &Grid) -> Option<usize> {
    let end = grid.end();
    astar(
        &grid.start(),
        |&pos: &Position| grid.neighbors(pos).into_iter().map(|next| (next, 1usize)),
        |&pos: &Position| pos.manhattan(end),
        |&pos: &Position| pos == end,
    )
    .map(|(_, cost)| cost)
}
