use rustc_hash::FxHashMap;

use crate::algorithms::common::{
    BudgetExhausted, Move, MoveArena, Path, SearchLimits, SearchResult, Trace,
};
use crate::algorithms::frontier::{Frontier, PriorityQueue};
use crate::algorithms::heuristic::Heuristic;
use crate::grid::{Grid, Position};

/// A* search with unit step cost.
///
/// There is no closed set. A neighbor is pushed again whenever its tentative
/// cost beats the best one recorded for it, so a coordinate may be popped
/// more than once and every pop shows up in the trace.
///
/// The returned weights hold the best cost seen for every reached cell.
pub fn a_star(grid: &Grid, heuristic: Heuristic, limits: SearchLimits) -> SearchResult {
    let mut trace = Trace::new(limits);
    let mut weights = FxHashMap::default();
    let outcome = search(grid, heuristic, &mut trace, &mut weights).into();
    SearchResult {
        outcome,
        trace,
        weights: Some(weights),
    }
}

fn search(
    grid: &Grid,
    heuristic: Heuristic,
    trace: &mut Trace,
    weights: &mut FxHashMap<Position, f64>,
) -> Result<Option<Path>, BudgetExhausted> {
    let goal = grid.end();
    let mut arena = MoveArena::new();
    let mut frontier = PriorityQueue::new();

    let start = grid.start();
    arena.enqueue(&mut frontier, Move::root(start, heuristic.estimate(start, goal)));
    weights.insert(start, 0.0);

    while let Some(id) = frontier.pop() {
        let mv = arena[id];
        trace.record(mv.current)?;

        if grid.is_end(mv.current) {
            return Ok(Some(arena.path(id)));
        }

        for next in grid.neighbors(mv.current) {
            let cost = mv.cost + 1.0;
            if weights.get(&next).map_or(true, |&best| cost < best) {
                weights.insert(next, cost);
                let step = Move::step(next, id, cost, heuristic.estimate(next, goal));
                arena.enqueue(&mut frontier, step);
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::common::Outcome;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn default_maze_with_manhattan() {
        let result = a_star(&Grid::default(), Heuristic::Manhattan, SearchLimits::unbounded());
        let path = result.path().unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(
            path.steps(),
            &[
                p(1, 0), p(1, 1), p(1, 2), p(1, 3), p(1, 4), p(1, 5), p(2, 5), p(3, 5),
                p(4, 5),
            ]
        );
        assert_eq!(
            result.trace.positions(),
            &[
                p(0, 0), p(1, 0), p(1, 1), p(2, 0), p(1, 2), p(3, 0), p(1, 3), p(2, 2),
                p(4, 0), p(1, 4), p(3, 2), p(4, 1), p(1, 5), p(2, 4), p(3, 3), p(4, 2),
                p(2, 5), p(4, 3), p(3, 5), p(4, 5),
            ]
        );
    }

    #[test]
    fn euclidean_takes_a_different_optimal_route() {
        let result = a_star(&Grid::default(), Heuristic::Euclidean, SearchLimits::unbounded());
        let path = result.path().unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(
            path.steps(),
            &[
                p(1, 0), p(1, 1), p(1, 2), p(1, 3), p(1, 4), p(2, 4), p(2, 5), p(3, 5),
                p(4, 5),
            ]
        );
        assert_eq!(result.trace.len(), 21);
    }

    #[test]
    fn start_equal_to_end_is_an_empty_path() {
        let grid = Grid::with_walls(3, 3, [p(1, 1)], p(1, 0), p(1, 0)).unwrap();
        let result = a_star(&grid, Heuristic::Manhattan, SearchLimits::unbounded());
        let path = result.path().unwrap();
        assert!(path.is_empty());
        assert!(path.steps().is_empty());
        assert_eq!(result.trace.positions(), &[p(1, 0)]);
    }

    #[test]
    fn sealed_start_reports_no_path_with_weights() {
        let grid = Grid::with_walls(5, 5, [p(0, 2), p(1, 0), p(1, 1), p(1, 2)], p(0, 0), p(4, 4))
            .unwrap();
        let result = a_star(&grid, Heuristic::Manhattan, SearchLimits::unbounded());
        assert_eq!(result.outcome, Outcome::NoPath);
        assert_eq!(result.trace.positions(), &[p(0, 0), p(0, 1)]);
        let weights = result.weights.unwrap();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[&p(0, 1)], 1.0);
    }
}
