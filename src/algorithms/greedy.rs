use rustc_hash::FxHashSet;

use crate::algorithms::common::{
    BudgetExhausted, Move, MoveArena, Path, SearchLimits, SearchResult, Trace,
};
use crate::algorithms::frontier::{Frontier, PriorityQueue};
use crate::algorithms::heuristic::Heuristic;
use crate::grid::Grid;

/// Greedy best-first search, ordered by the heuristic alone.
///
/// A cell is marked on first reach and never enqueued again, even if a
/// cheaper route to it turns up later. The path can therefore be longer
/// than the one BFS or A* would return.
pub fn greedy_best_first(grid: &Grid, heuristic: Heuristic, limits: SearchLimits) -> SearchResult {
    let mut trace = Trace::new(limits);
    let outcome = search(grid, heuristic, &mut trace).into();
    SearchResult {
        outcome,
        trace,
        weights: None,
    }
}

fn search(
    grid: &Grid,
    heuristic: Heuristic,
    trace: &mut Trace,
) -> Result<Option<Path>, BudgetExhausted> {
    let goal = grid.end();
    let mut arena = MoveArena::new();
    let mut frontier = PriorityQueue::new();
    let mut marked = FxHashSet::default();

    let start = grid.start();
    arena.enqueue(&mut frontier, Move::root(start, heuristic.estimate(start, goal)));
    marked.insert(start);

    while let Some(id) = frontier.pop() {
        let current = arena[id].current;
        trace.record(current)?;

        if grid.is_end(current) {
            return Ok(Some(arena.path(id)));
        }

        for next in grid.neighbors(current) {
            if marked.insert(next) {
                // Cost stays at zero so the heap key is the estimate alone.
                let step = Move::step(next, id, 0.0, heuristic.estimate(next, goal));
                arena.enqueue(&mut frontier, step);
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::bfs::breadth_first;
    use crate::grid::Position;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn can_be_longer_than_bfs() {
        let grid = Grid::with_walls(5, 3, [p(3, 0), p(3, 2)], p(0, 0), p(4, 2)).unwrap();

        let greedy = greedy_best_first(&grid, Heuristic::Manhattan, SearchLimits::unbounded());
        let path = greedy.path().unwrap();
        assert_eq!(
            path.cells(),
            &[
                p(0, 0), p(0, 1), p(0, 2), p(1, 2), p(2, 2), p(2, 1), p(3, 1), p(4, 1),
                p(4, 2),
            ]
        );
        assert!(path.is_contiguous());

        let bfs = breadth_first(&grid, SearchLimits::unbounded());
        assert_eq!(bfs.path().unwrap().len(), 6);
        assert!(path.len() > 6);
    }

    #[test]
    fn heads_straight_for_the_end_on_the_default_maze() {
        let result = greedy_best_first(&Grid::default(), Heuristic::Manhattan, SearchLimits::unbounded());
        let path = result.path().unwrap();
        assert_eq!(path.len(), 9);
        // Nothing off the final route gets expanded here.
        assert_eq!(result.trace.positions(), path.cells());
    }
}
