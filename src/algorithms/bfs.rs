use crate::algorithms::common::{uninformed_search, SearchLimits, SearchResult};
use crate::algorithms::frontier::Queue;
use crate::grid::Grid;

/// Breadth-first search: shortest path in number of steps.
pub fn breadth_first(grid: &Grid, limits: SearchLimits) -> SearchResult {
    uninformed_search(grid, Queue::default(), limits)
}
