use crate::algorithms::a_star::a_star;
use crate::algorithms::common::{SearchLimits, SearchResult};
use crate::algorithms::heuristic::Heuristic;
use crate::grid::Grid;

/// Dijkstra's algorithm, expressed as A* with a heuristic that is always zero.
pub fn dijkstra(grid: &Grid, limits: SearchLimits) -> SearchResult {
    a_star(grid, Heuristic::Zero, limits)
}
