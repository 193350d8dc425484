use crate::algorithms::common::{uninformed_search, SearchLimits, SearchResult};
use crate::algorithms::frontier::Stack;
use crate::grid::Grid;

/// Depth-first search. Finds *a* path, not necessarily a short one.
///
/// Neighbors are pushed up, left, right, down, so the downward neighbor is
/// explored first.
pub fn depth_first(grid: &Grid, limits: SearchLimits) -> SearchResult {
    uninformed_search(grid, Stack::default(), limits)
}
