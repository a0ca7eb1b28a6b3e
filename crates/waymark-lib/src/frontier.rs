//! Ordered open set for the A* search.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::NodeIndex;

/// Open set ordered by ascending `f`.
///
/// Among entries with equal `f` the one pushed first is popped first, which is
/// the same order a sorted list gives when a new entry is inserted after every
/// existing entry whose `f` is not greater than its own.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `node` with total estimated cost `f`.
    pub fn push(&mut self, node: NodeIndex, f: f64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            node,
            f: FloatOrd(f),
            sequence,
        });
    }

    /// Remove and return the entry with the smallest `f`, or `None` when empty.
    pub fn pop(&mut self) -> Option<NodeIndex> {
        self.pop_entry().map(|(node, _)| node)
    }

    /// Like [`Frontier::pop`] but also returns the `f` the node was pushed with.
    pub fn pop_entry(&mut self) -> Option<(NodeIndex, f64)> {
        self.heap.pop().map(|entry| (entry.node, entry.f.0))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_sequence = 0;
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    node: NodeIndex,
    f: FloatOrd,
    sequence: u64,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by (f, sequence).
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
