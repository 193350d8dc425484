pub mod a_star;
pub mod bfs;
pub mod bidirectional;
pub mod common;
pub mod dfs;
pub mod dijkstra;
pub mod frontier;
pub mod greedy;
pub mod heuristic;
pub mod jps;

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::UnknownAlgorithm;
use crate::grid::Grid;

pub use common::{Outcome, Path, SearchLimits, SearchResult, Trace};
pub use heuristic::Heuristic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Dfs,
    Bfs,
    Dijkstra,
    Greedy,
    AStar,
    Bidirectional,
    Jps,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Dfs,
        Algorithm::Bfs,
        Algorithm::Dijkstra,
        Algorithm::Greedy,
        Algorithm::AStar,
        Algorithm::Bidirectional,
        Algorithm::Jps,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dfs => "dfs",
            Algorithm::Bfs => "bfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Greedy => "greedy",
            Algorithm::AStar => "astar",
            Algorithm::Bidirectional => "bidirectional",
            Algorithm::Jps => "jps",
        }
    }

    /// Whether the heuristic argument of [`run`] affects this algorithm.
    pub fn uses_heuristic(self) -> bool {
        matches!(
            self,
            Algorithm::Greedy | Algorithm::AStar | Algorithm::Bidirectional | Algorithm::Jps
        )
    }

    /// Shortest-path guarantee with an admissible heuristic.
    pub fn is_optimal(self) -> bool {
        !matches!(self, Algorithm::Dfs | Algorithm::Greedy)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Run `algorithm` without an expansion budget.
pub fn run(algorithm: Algorithm, grid: &Grid, heuristic: Heuristic) -> SearchResult {
    run_with_limits(algorithm, grid, heuristic, SearchLimits::unbounded())
}

pub fn run_with_limits(
    algorithm: Algorithm,
    grid: &Grid,
    heuristic: Heuristic,
    limits: SearchLimits,
) -> SearchResult {
    let result = match algorithm {
        Algorithm::Dfs => dfs::depth_first(grid, limits),
        Algorithm::Bfs => bfs::breadth_first(grid, limits),
        Algorithm::Dijkstra => dijkstra::dijkstra(grid, limits),
        Algorithm::Greedy => greedy::greedy_best_first(grid, heuristic, limits),
        Algorithm::AStar => a_star::a_star(grid, heuristic, limits),
        Algorithm::Bidirectional => bidirectional::bidirectional(grid, heuristic, limits),
        Algorithm::Jps => jps::jump_point_search(grid, heuristic, limits),
    };
    debug!(
        "{} finished with {} after {} expansions",
        algorithm,
        result.outcome,
        result.trace.expansions()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!(
            "a_star".parse::<Algorithm>(),
            Err(UnknownAlgorithm("a_star".to_string()))
        );
        assert_eq!(
            UnknownAlgorithm("foo".into()).to_string(),
            "Unknown algorithm: foo"
        );
    }

    #[test]
    fn dispatch_reaches_every_engine() {
        let grid = Grid::default();
        for algorithm in Algorithm::ALL {
            let result = run(algorithm, &grid, Heuristic::Manhattan);
            let path = result.path().unwrap();
            assert!(path.is_contiguous(), "{algorithm}");
            if algorithm.is_optimal() {
                assert_eq!(path.len(), 9, "{algorithm}");
            }
        }
    }

    #[test]
    fn dijkstra_ignores_the_heuristic() {
        let grid = Grid::default();
        let zero = run(Algorithm::Dijkstra, &grid, Heuristic::Zero);
        let manhattan = run(Algorithm::Dijkstra, &grid, Heuristic::Manhattan);
        assert_eq!(zero.trace, manhattan.trace);
        assert!(!Algorithm::Dijkstra.uses_heuristic());
    }

    #[test]
    fn every_engine_honours_the_budget() {
        let grid = Grid::default();
        for algorithm in Algorithm::ALL {
            let result = run_with_limits(algorithm, &grid, Heuristic::Manhattan, SearchLimits::expansions(1));
            assert_eq!(result.outcome, Outcome::BudgetExhausted, "{algorithm}");
            assert_eq!(result.trace.expansions(), 1, "{algorithm}");
        }
    }
}
