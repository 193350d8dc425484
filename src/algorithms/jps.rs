//! Jump Point Search for 4-connected grids with unit step cost.
//!
//! Instead of pushing every neighbor, each expansion scans straight lines in
//! the four cardinal directions and only enqueues the cells where a turn may
//! be needed (jump points). The cost of a jump is the number of cells it
//! covers, so path costs match plain A*.

use rustc_hash::FxHashMap;

use crate::algorithms::common::{
    BudgetExhausted, Move, MoveArena, Path, SearchLimits, SearchResult, Trace,
};
use crate::algorithms::frontier::{Frontier, PriorityQueue};
use crate::algorithms::heuristic::Heuristic;
use crate::grid::{Grid, Position};

/// Scan order: up, left, right, down.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Search over jump points, then expand the result into single steps.
///
/// The trace only lists popped jump points. Weights are kept for jump
/// points only.
pub fn jump_point_search(grid: &Grid, heuristic: Heuristic, limits: SearchLimits) -> SearchResult {
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
            return Ok(Some(Path::new(interpolate(&arena.chain(id)))));
        }

        for direction in DIRECTIONS {
            let Some((point, distance)) = jump(grid, mv.current, direction) else {
                continue;
            };
            let cost = mv.cost + distance as f64;
            if weights.get(&point).map_or(true, |&best| cost < best) {
                weights.insert(point, cost);
                let step = Move::step(point, id, cost, heuristic.estimate(point, goal));
                arena.enqueue(&mut frontier, step);
            }
        }
    }

    Ok(None)
}

/// Walk from `from` along `direction` until a jump point, returning it with
/// the number of cells travelled. `None` when a wall or the border comes
/// first.
///
/// A cell is a jump point if it is the end, if it has a forced neighbor, or
/// (for vertical scans only) if a horizontal scan from it finds a jump point.
fn jump(grid: &Grid, from: Position, (d_row, d_col): (isize, isize)) -> Option<(Position, usize)> {
    let mut row = from.row as isize;
    let mut col = from.col as isize;
    let mut distance = 0;

    loop {
        row += d_row;
        col += d_col;
        distance += 1;

        if !grid.is_open_at(row, col) {
            return None;
        }
        let here = Position::new(row as usize, col as usize);
        if grid.is_end(here) || has_forced_neighbor(grid, row, col, (d_row, d_col)) {
            return Some((here, distance));
        }
        if d_row != 0 && (jump(grid, here, (0, -1)).is_some() || jump(grid, here, (0, 1)).is_some())
        {
            return Some((here, distance));
        }
    }
}

/// A perpendicular neighbor is forced when it is open but the cell behind
/// it (on the side we came from) is blocked: the turn only becomes possible
/// at this cell.
fn has_forced_neighbor(grid: &Grid, row: isize, col: isize, (d_row, d_col): (isize, isize)) -> bool {
    let sides = if d_row != 0 {
        [(0, -1), (0, 1)]
    } else {
        [(-1, 0), (1, 0)]
    };
    sides.iter().any(|&(s_row, s_col)| {
        grid.is_open_at(row + s_row, col + s_col)
            && !grid.is_open_at(row + s_row - d_row, col + s_col - d_col)
    })
}

/// Expand a chain of collinear jump points into unit steps.
fn interpolate(points: &[Position]) -> Vec<Position> {
    let mut cells = Vec::with_capacity(points.len());
    if let Some(&first) = points.first() {
        cells.push(first);
    }
    for pair in points.windows(2) {
        let (mut at, to) = (pair[0], pair[1]);
        while at != to {
            at = if at.row < to.row {
                Position::new(at.row + 1, at.col)
            } else if at.row > to.row {
                Position::new(at.row - 1, at.col)
            } else if at.col < to.col {
                Position::new(at.row, at.col + 1)
            } else {
                Position::new(at.row, at.col - 1)
            };
            cells.push(at);
        }
    }
    cells
}
