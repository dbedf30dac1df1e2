//! Due-time scheduler
//!
//! A priority queue of items keyed by their due timestamp. Replaces
//! timer-callback chains: callers schedule work, then drive the queue
//! with `pop_due(now)` from whatever loop owns the clock.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use chrono::{DateTime, Utc};

/// One scheduled item
struct Entry<T> {
    due: DateTime<Utc>,
    /// Insertion sequence, tie-breaker so equal due-times pop FIFO
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want earliest due first
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of items ordered by due time
pub struct Scheduler<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Schedule an item for the given due time
    pub fn schedule(&mut self, due: DateTime<Utc>, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { due, seq, item });
    }

    /// Pop every item whose due time is at or before `now`, in due order
    pub fn pop_due(&mut self, now: DateTime<Utc>) -> Vec<T> {
        let mut due = Vec::new();
        while let Some(entry) = self.heap.peek() {
            if entry.due > now {
                break;
            }
            // peek() guarantees the heap is non-empty
            let entry = self.heap.pop().expect("heap is non-empty");
            due.push(entry.item);
        }
        due
    }

    /// Earliest due time, if anything is pending
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.heap.peek().map(|e| e.due)
    }

    /// Number of pending items
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop all pending items
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_empty_scheduler() {
        let mut scheduler: Scheduler<u32> = Scheduler::new();

        assert!(scheduler.is_empty());
        assert_eq!(scheduler.next_due(), None);
        assert!(scheduler.pop_due(Utc::now()).is_empty());
    }

    #[test]
    fn test_pop_due_only_returns_ripe_items() {
        let mut scheduler = Scheduler::new();
        let now = Utc::now();

        scheduler.schedule(now + Duration::seconds(5), "soon");
        scheduler.schedule(now + Duration::seconds(500), "later");

        assert!(scheduler.pop_due(now).is_empty());

        let due = scheduler.pop_due(now + Duration::seconds(10));
        assert_eq!(due, vec!["soon"]);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_pop_due_orders_by_due_time() {
        let mut scheduler = Scheduler::new();
        let now = Utc::now();

        scheduler.schedule(now + Duration::seconds(30), 3);
        scheduler.schedule(now + Duration::seconds(10), 1);
        scheduler.schedule(now + Duration::seconds(20), 2);

        let due = scheduler.pop_due(now + Duration::minutes(1));
        assert_eq!(due, vec![1, 2, 3]);
    }

    #[test]
    fn test_equal_due_times_pop_fifo() {
        let mut scheduler = Scheduler::new();
        let due = Utc::now() + Duration::seconds(5);

        scheduler.schedule(due, "first");
        scheduler.schedule(due, "second");
        scheduler.schedule(due, "third");

        let items = scheduler.pop_due(due);
        assert_eq!(items, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_next_due() {
        let mut scheduler = Scheduler::new();
        let now = Utc::now();

        scheduler.schedule(now + Duration::seconds(60), "b");
        scheduler.schedule(now + Duration::seconds(30), "a");

        assert_eq!(scheduler.next_due(), Some(now + Duration::seconds(30)));
    }

    #[test]
    fn test_clear() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Utc::now(), 1);
        scheduler.schedule(Utc::now(), 2);

        scheduler.clear();

        assert!(scheduler.is_empty());
    }
}
