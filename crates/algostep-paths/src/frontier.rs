//! Stable priority frontier for the grid searches.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A min-priority queue with FIFO ordering among equal priorities.
///
/// Each push is stamped with a monotonically increasing sequence number;
/// entries compare by `(priority, sequence)`, so the first-inserted of two
/// equal-priority items dequeues first. The searches rely on exactly this
/// ordering and on nothing else about the representation.
pub struct Frontier<T> {
    heap: BinaryHeap<Entry<T>>,
    seq: u64,
}

struct Entry<T> {
    priority: i32,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (a max-heap) pops the smallest priority,
        // and the earliest sequence among equals.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Frontier<T> {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Insert an item with the given priority.
    pub fn push(&mut self, item: T, priority: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            item,
        });
    }

    /// Remove and return the lowest-priority item and its priority.
    pub fn pop(&mut self) -> Option<(T, i32)> {
        self.heap.pop().map(|e| (e.item, e.priority))
    }

    /// Whether the frontier holds no items.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_priority_first() {
        let mut f = Frontier::new();
        f.push("high", 9);
        f.push("low", 1);
        f.push("mid", 5);
        assert_eq!(f.pop(), Some(("low", 1)));
        assert_eq!(f.pop(), Some(("mid", 5)));
        assert_eq!(f.pop(), Some(("high", 9)));
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn equal_priorities_are_fifo() {
        let mut f = Frontier::new();
        for name in ["first", "second", "third"] {
            f.push(name, 3);
        }
        f.push("earlier", 1);
        assert_eq!(f.pop(), Some(("earlier", 1)));
        assert_eq!(f.pop(), Some(("first", 3)));
        assert_eq!(f.pop(), Some(("second", 3)));
        assert_eq!(f.pop(), Some(("third", 3)));
    }

    #[test]
    fn len_and_is_empty() {
        let mut f = Frontier::new();
        assert!(f.is_empty());
        f.push(0, 0);
        f.push(1, 0);
        assert_eq!(f.len(), 2);
        f.pop();
        f.pop();
        assert!(f.is_empty());
    }
}
