//! Ordering containers used by the traversal and pathfinding frontiers.
//!
//! [`Fifo`] backs BFS; [`MinQueue`] backs Dijkstra and A*. The priority
//! queue is stored as a min-heap keyed by `(priority, insertion_order)`,
//! so equal priorities dequeue in FIFO order (stable).

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

// ---------------------------------------------------------------------------
// Fifo
// ---------------------------------------------------------------------------

/// A first-in, first-out queue. O(1) amortized per operation.
#[derive(Debug, Clone, Default)]
pub struct Fifo<T> {
    items: VecDeque<T>,
}

impl<T> Fifo<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append an element at the back.
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Remove and return the earliest-enqueued element.
    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Whether the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

// ---------------------------------------------------------------------------
// MinQueue
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Entry<T> {
    item: T,
    priority: u32,
    /// Monotonically increasing counter used to break priority ties.
    /// Lower = inserted earlier = dequeued first.
    seq: u64,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Natural ordering: smaller priority first, then smaller seq.
        // The heap wraps entries in `Reverse` to pop the minimum.
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-first priority queue with stable FIFO tie-breaking.
#[derive(Debug)]
pub struct MinQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    seq: u64,
}

impl<T> MinQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Insert an element with the given priority.
    pub fn enqueue(&mut self, item: T, priority: u32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            item,
            priority,
            seq,
        }));
    }

    /// Remove and return the element with the smallest priority. Among
    /// equal priorities, the earliest-inserted element is returned.
    pub fn dequeue(&mut self) -> Option<T> {
        self.heap.pop().map(|Reverse(e)| e.item)
    }

    /// Whether the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for MinQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut q = Fifo::new();
        assert!(q.is_empty());
        q.enqueue(1);
        q.enqueue(2);
        q.enqueue(3);
        assert_eq!(q.len(), 3);
        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.dequeue(), Some(2));
        assert_eq!(q.dequeue(), Some(3));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn min_queue_pops_smallest_priority() {
        let mut q = MinQueue::new();
        q.enqueue("high", 9);
        q.enqueue("low", 1);
        q.enqueue("mid", 5);
        assert_eq!(q.dequeue(), Some("low"));
        assert_eq!(q.dequeue(), Some("mid"));
        assert_eq!(q.dequeue(), Some("high"));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn min_queue_ties_break_by_insertion_order() {
        let mut q = MinQueue::new();
        q.enqueue("A", 5);
        q.enqueue("B", 2);
        q.enqueue("C", 2);
        assert_eq!(q.dequeue(), Some("B"));
        assert_eq!(q.dequeue(), Some("C"));
        assert_eq!(q.dequeue(), Some("A"));
    }

    #[test]
    fn min_queue_stability_under_interleaving() {
        let mut q = MinQueue::new();
        for i in 0..10u32 {
            q.enqueue(i, i % 3);
        }
        // Priority 0 entries: 0, 3, 6, 9 — must come out in that order.
        assert_eq!(q.dequeue(), Some(0));
        assert_eq!(q.dequeue(), Some(3));
        assert_eq!(q.dequeue(), Some(6));
        assert_eq!(q.dequeue(), Some(9));
        // Then priority 1 entries.
        assert_eq!(q.dequeue(), Some(1));
    }
}
