use std::fmt;
use std::ops::Index;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::algorithms::frontier::Frontier;
use crate::grid::{Grid, Position};

/// Handle to a [`Move`] stored in a [`MoveArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveId(usize);

/// One node of a search tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub current: Position,
    pub previous: Option<MoveId>,
    /// Accumulated path cost from the search origin.
    pub cost: f64,
    /// Estimated remaining cost to the search target.
    pub heuristic: f64,
}

impl Move {
    pub fn root(current: Position, heuristic: f64) -> Self {
        Move {
            current,
            previous: None,
            cost: 0.0,
            heuristic,
        }
    }

    pub fn step(current: Position, previous: MoveId, cost: f64, heuristic: f64) -> Self {
        Move {
            current,
            previous: Some(previous),
            cost,
            heuristic,
        }
    }

    /// Ordering key for priority frontiers.
    pub fn priority(&self) -> f64 {
        self.cost + self.heuristic
    }
}

/// Owns every move created by one search call.
#[derive(Debug, Default)]
pub struct MoveArena {
    moves: Vec<Move>,
}

impl MoveArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) -> MoveId {
        self.moves.push(mv);
        MoveId(self.moves.len() - 1)
    }

    /// Store `mv` and hand it to `frontier` in one step.
    pub fn enqueue<F: Frontier + ?Sized>(&mut self, frontier: &mut F, mv: Move) -> MoveId {
        let id = self.push(mv);
        frontier.push(id, &mv);
        id
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Positions from the root of the tree to `id`, inclusive at both ends.
    pub fn chain(&self, id: MoveId) -> Vec<Position> {
        let mut cells = Vec::new();
        let mut cursor = Some(id);
        while let Some(at) = cursor {
            let mv = &self[at];
            cells.push(mv.current);
            cursor = mv.previous;
        }
        cells.reverse();
        cells
    }

    pub fn path(&self, id: MoveId) -> Path {
        Path::new(self.chain(id))
    }
}

impl Index<MoveId> for MoveArena {
    type Output = Move;

    fn index(&self, id: MoveId) -> &Move {
        &self.moves[id.0]
    }
}

/// A start-to-end route.
///
/// [`cells`](Path::cells) is the full chain including the start;
/// [`steps`](Path::steps) leaves the start out, which is the convention used
/// on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Position>,
}

impl Path {
    pub(crate) fn new(cells: Vec<Position>) -> Self {
        debug_assert!(!cells.is_empty());
        Path { cells }
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn steps(&self) -> &[Position] {
        self.cells.get(1..).unwrap_or(&[])
    }

    /// Number of moves, i.e. cells minus one.
    pub fn len(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_cells(self) -> Vec<Position> {
        self.cells
    }

    /// Every consecutive pair differs by exactly one cardinal step.
    pub fn is_contiguous(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].manhattan(w[1]) == 1)
    }
}

/// Upper bound on the work a single search may do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of frontier pops; `None` is unbounded.
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn expansions(max: usize) -> Self {
        SearchLimits {
            max_expansions: Some(max),
        }
    }
}

/// Raised by [`Trace::record`] once the expansion budget is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetExhausted;

/// Coordinates in the order they were popped from the frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    visited: Vec<Position>,
    seen: Option<FxHashSet<Position>>,
    limit: Option<usize>,
    expansions: usize,
}

impl Trace {
    pub(crate) fn new(limits: SearchLimits) -> Self {
        Trace {
            visited: Vec::new(),
            seen: None,
            limit: limits.max_expansions,
            expansions: 0,
        }
    }

    /// A trace that keeps only the first visit of each coordinate.
    pub(crate) fn deduplicated(limits: SearchLimits) -> Self {
        Trace {
            seen: Some(FxHashSet::default()),
            ..Self::new(limits)
        }
    }

    /// Count one frontier pop at `pos`.
    pub(crate) fn record(&mut self, pos: Position) -> Result<(), BudgetExhausted> {
        if self.limit.is_some_and(|limit| self.expansions >= limit) {
            return Err(BudgetExhausted);
        }
        self.expansions += 1;
        let fresh = match &mut self.seen {
            Some(seen) => seen.insert(pos),
            None => true,
        };
        if fresh {
            self.visited.push(pos);
        }
        Ok(())
    }

    pub fn positions(&self) -> &[Position] {
        &self.visited
    }

    /// The trace without its first and last entries.
    pub fn trimmed(&self) -> &[Position] {
        match self.visited.len() {
            0..=2 => &[],
            n => &self.visited[1..n - 1],
        }
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// Frontier pops performed, including repeats that a deduplicated trace hides.
    pub fn expansions(&self) -> usize {
        self.expansions
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(Path),
    /// The frontier ran dry: start and end are not connected.
    NoPath,
    /// The expansion budget ran out before the search could decide.
    BudgetExhausted,
}

impl From<Result<Option<Path>, BudgetExhausted>> for Outcome {
    fn from(result: Result<Option<Path>, BudgetExhausted>) -> Self {
        match result {
            Ok(Some(path)) => Outcome::Found(path),
            Ok(None) => Outcome::NoPath,
            Err(BudgetExhausted) => Outcome::BudgetExhausted,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Found(path) => write!(f, "path of {} steps", path.len()),
            Outcome::NoPath => write!(f, "no path"),
            Outcome::BudgetExhausted => write!(f, "budget exhausted"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub outcome: Outcome,
    pub trace: Trace,
    /// Best known cost per reached coordinate, for engines that keep one.
    pub weights: Option<FxHashMap<Position, f64>>,
}

impl SearchResult {
    pub fn path(&self) -> Option<&Path> {
        match &self.outcome {
            Outcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.outcome, Outcome::Found(_))
    }

    /// Explored cells as reported to clients. A found search drops its
    /// start and end pops; any other outcome keeps the whole trace, since
    /// its last pop is an ordinary explored cell.
    pub fn visited(&self) -> &[Position] {
        if self.is_found() {
            self.trace.trimmed()
        } else {
            self.trace.positions()
        }
    }
}

/// Shared skeleton of depth-first and breadth-first search.
///
/// A cell is marked when it is first pushed and never pushed again, so the
/// frontier discipline alone decides the exploration order.
pub(crate) fn uninformed_search<F: Frontier>(
    grid: &Grid,
    mut frontier: F,
    limits: SearchLimits,
) -> SearchResult {
    let mut trace = Trace::new(limits);
    let outcome = explore(grid, &mut frontier, &mut trace).into();
    SearchResult {
        outcome,
        trace,
        weights: None,
    }
}

fn explore<F: Frontier>(
    grid: &Grid,
    frontier: &mut F,
    trace: &mut Trace,
) -> Result<Option<Path>, BudgetExhausted> {
    let mut arena = MoveArena::new();
    let mut marked = FxHashSet::default();

    arena.enqueue(frontier, Move::root(grid.start(), 0.0));
    marked.insert(grid.start());

    while let Some(id) = frontier.pop() {
        let current = arena[id].current;
        trace.record(current)?;
        if grid.is_end(current) {
            return Ok(Some(arena.path(id)));
        }
        for next in grid.neighbors(current) {
            if marked.insert(next) {
                arena.enqueue(frontier, Move::step(next, id, 0.0, 0.0));
            }
        }
    }
    Ok(None)
}
