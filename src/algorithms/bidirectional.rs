//! Bidirectional A*: one search from the start towards the end, one from the
//! end back towards the start, alternating one pop each.
//!
//! Once the two searches touch, the side that made contact keeps draining
//! its frontier until nothing left in it can beat the best meeting found so
//! far. The result is then stitched from both halves.

use log::trace;
use rustc_hash::FxHashMap;

use crate::algorithms::common::{
    BudgetExhausted, Move, MoveArena, MoveId, Path, SearchLimits, SearchResult, Trace,
};
use crate::algorithms::frontier::{Frontier, PriorityQueue};
use crate::algorithms::heuristic::Heuristic;
use crate::grid::{Grid, Position};

/// Run bidirectional A* with `heuristic` on both halves.
///
/// The trace interleaves pops from both directions and keeps only the first
/// visit of each coordinate. No weights are returned.
pub fn bidirectional(grid: &Grid, heuristic: Heuristic, limits: SearchLimits) -> SearchResult {
    let mut trace = Trace::deduplicated(limits);
    let outcome = search(grid, heuristic, &mut trace).into();
    SearchResult {
        outcome,
        trace,
        weights: None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Forward,
    Backward,
}

/// Cheapest known junction between the two trees.
#[derive(Debug, Clone, Copy)]
struct Meeting {
    cost: f64,
    forward: MoveId,
    backward: MoveId,
}

/// One direction of the search.
struct Half {
    target: Position,
    heuristic: Heuristic,
    arena: MoveArena,
    frontier: PriorityQueue,
    /// Best cost reached per cell, with the move that reached it.
    best: FxHashMap<Position, (f64, MoveId)>,
}

impl Half {
    fn new(origin: Position, target: Position, heuristic: Heuristic) -> Self {
        let mut arena = MoveArena::new();
        let mut frontier = PriorityQueue::new();
        let root = arena.enqueue(&mut frontier, Move::root(origin, heuristic.estimate(origin, target)));
        let mut best = FxHashMap::default();
        best.insert(origin, (0.0, root));
        Half {
            target,
            heuristic,
            arena,
            frontier,
            best,
        }
    }

    /// Relax the neighbors of `id`, offering a meeting whenever a relaxed
    /// cell is already known to `other`.
    fn expand(
        &mut self,
        grid: &Grid,
        id: MoveId,
        other: &Half,
        meeting: &mut Option<Meeting>,
        side: Side,
    ) {
        let mv = self.arena[id];
        for next in grid.neighbors(mv.current) {
            let cost = mv.cost + 1.0;
            if self.best.get(&next).is_some_and(|&(best, _)| cost >= best) {
                continue;
            }
            let h = self.heuristic.estimate(next, self.target);
            let step = self.arena.enqueue(&mut self.frontier, Move::step(next, id, cost, h));
            self.best.insert(next, (cost, step));
            if let Some(&(there, their)) = other.best.get(&next) {
                offer(meeting, side, cost + there, step, their);
            }
        }
    }

    /// Keep popping after contact until the frontier cannot improve on the
    /// best meeting.
    fn drain(
        &mut self,
        grid: &Grid,
        other: &Half,
        meeting: &mut Option<Meeting>,
        side: Side,
        trace: &mut Trace,
    ) -> Result<(), BudgetExhausted> {
        let mut matched = false;
        loop {
            let bound = meeting.map(|m| m.cost);
            match (self.frontier.peek_priority(), bound) {
                (None, _) => return Ok(()),
                (Some(top), Some(bound)) if matched && top >= bound => return Ok(()),
                _ => {}
            }
            let Some(id) = self.frontier.pop() else {
                return Ok(());
            };
            let mv = self.arena[id];
            trace.record(mv.current)?;
            if let Some(&(there, their)) = other.best.get(&mv.current) {
                matched = true;
                offer(meeting, side, mv.cost + there, id, their);
            }
            self.expand(grid, id, other, meeting, side);
        }
    }
}

/// Replace the current meeting if `cost` is strictly lower. `mine` belongs
/// to the half on `side`, `theirs` to the opposite one.
fn offer(meeting: &mut Option<Meeting>, side: Side, cost: f64, mine: MoveId, theirs: MoveId) {
    if meeting.is_some_and(|m| m.cost <= cost) {
        return;
    }
    let (forward, backward) = match side {
        Side::Forward => (mine, theirs),
        Side::Backward => (theirs, mine),
    };
    *meeting = Some(Meeting {
        cost,
        forward,
        backward,
    });
}

fn search(grid: &Grid, heuristic: Heuristic, trace: &mut Trace) -> Result<Option<Path>, BudgetExhausted> {
    let (start, end) = (grid.start(), grid.end());
    let mut forward = Half::new(start, end, heuristic);
    let mut backward = Half::new(end, start, heuristic);
    let mut meeting = None;

    loop {
        let Some(f) = forward.frontier.pop() else {
            return Ok(None);
        };
        let f_mv = forward.arena[f];
        trace.record(f_mv.current)?;
        if f_mv.current == end {
            return Ok(Some(forward.arena.path(f)));
        }
        forward.expand(grid, f, &backward, &mut meeting, Side::Forward);

        let Some(b) = backward.frontier.pop() else {
            return Ok(None);
        };
        let b_mv = backward.arena[b];
        trace.record(b_mv.current)?;
        if b_mv.current == start {
            let mut cells = backward.arena.chain(b);
            cells.reverse();
            return Ok(Some(Path::new(cells)));
        }
        backward.expand(grid, b, &forward, &mut meeting, Side::Backward);

        if let Some(&(cost, theirs)) = backward.best.get(&f_mv.current) {
            trace!("halves met at {} from the forward side", f_mv.current);
            offer(&mut meeting, Side::Forward, f_mv.cost + cost, f, theirs);
            backward.drain(grid, &forward, &mut meeting, Side::Backward, trace)?;
            return Ok(meeting.map(|m| stitch(&forward, &backward, m)));
        }
        if let Some(&(cost, theirs)) = forward.best.get(&b_mv.current) {
            trace!("halves met at {} from the backward side", b_mv.current);
            offer(&mut meeting, Side::Backward, b_mv.cost + cost, b, theirs);
            forward.drain(grid, &backward, &mut meeting, Side::Forward, trace)?;
            return Ok(meeting.map(|m| stitch(&forward, &backward, m)));
        }
    }
}

/// Forward chain up to the junction, then the backward chain walked from
/// the junction to the end.
fn stitch(forward: &Half, backward: &Half, meeting: Meeting) -> Path {
    let mut cells = forward.arena.chain(meeting.forward);
    let mut tail = backward.arena.chain(meeting.backward);
    tail.reverse();
    cells.extend(tail.into_iter().skip(1));
    Path::new(cells)
}
