use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pathgrid_core::Point;

use crate::error::SearchError;

/// One queued cell. Ordered by `(priority, seq)` only; the position never
/// takes part in comparisons.
#[derive(Clone, Copy, Debug)]
struct Entry {
    priority: i32,
    seq: u64,
    pos: Point,
}

impl Entry {
    #[inline]
    fn key(&self) -> (i32, u64) {
        (self.priority, self.seq)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest key first.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of cells with FIFO tie-breaking.
///
/// Every push is stamped with the next value of a strictly increasing
/// sequence counter, so among equal priorities the earliest push pops first.
/// Pushes are not deduplicated: a cell may be queued more than once.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl PriorityFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `pos` with `priority`. Returns the sequence number assigned.
    pub fn push(&mut self, priority: i32, pos: Point) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { priority, seq, pos });
        seq
    }

    /// Remove and return the cell with the smallest `(priority, seq)`.
    pub fn pop_min(&mut self) -> Result<Point, SearchError> {
        self.heap
            .pop()
            .map(|e| e.pos)
            .ok_or(SearchError::EmptyFrontier)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries held, stale duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
