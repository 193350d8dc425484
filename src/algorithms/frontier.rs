//! Exploration orders for the search engines.
//!
//! Every engine talks to its working set through [`Frontier`], so the same
//! search skeleton can run depth-first, breadth-first or best-first just by
//! swapping the backing collection.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::algorithms::common::{Move, MoveId};

pub trait Frontier {
    fn push(&mut self, id: MoveId, mv: &Move);
    fn pop(&mut self) -> Option<MoveId>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last in, first out.
#[derive(Debug, Default)]
pub struct Stack {
    moves: Vec<MoveId>,
}

impl Frontier for Stack {
    fn push(&mut self, id: MoveId, _mv: &Move) {
        self.moves.push(id);
    }

    fn pop(&mut self) -> Option<MoveId> {
        self.moves.pop()
    }

    fn len(&self) -> usize {
        self.moves.len()
    }
}

/// First in, first out.
#[derive(Debug, Default)]
pub struct Queue {
    moves: VecDeque<MoveId>,
}

impl Frontier for Queue {
    fn push(&mut self, id: MoveId, _mv: &Move) {
        self.moves.push_back(id);
    }

    fn pop(&mut self) -> Option<MoveId> {
        self.moves.pop_front()
    }

    fn len(&self) -> usize {
        self.moves.len()
    }
}

/// Heap entry ordered by priority, then by insertion order.
#[derive(Debug, Clone, Copy)]
struct Entry {
    priority: f64,
    seq: u64,
    id: MoveId,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest priority, oldest first.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap on [`Move::priority`]. Ties pop in insertion order.
#[derive(Debug, Default)]
pub struct PriorityQueue {
    heap: BinaryHeap<Entry>,
    pushed: u64,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Priority of the entry that the next `pop` returns.
    pub fn peek_priority(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.priority)
    }
}

impl Frontier for PriorityQueue {
    fn push(&mut self, id: MoveId, mv: &Move) {
        self.heap.push(Entry {
            priority: mv.priority(),
            seq: self.pushed,
            id,
        });
        self.pushed += 1;
    }

    fn pop(&mut self) -> Option<MoveId> {
        self.heap.pop().map(|entry| entry.id)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
