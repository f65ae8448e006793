//! Binary min-heap keyed by an `f64` priority.
//!
//! Only priority order is guaranteed; equal priorities come out in whatever
//! order the heap produces, which is stable for a given insertion sequence.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<T> {
    priority: f64,
    item: T,
}

// Reversed so `BinaryHeap` (a max-heap) pops the smallest priority first.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.total_cmp(&self.priority)
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

/// Min-priority queue supporting duplicate insertion.
#[derive(Debug)]
pub struct MinHeap<T> {
    entries: BinaryHeap<Entry<T>>,
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self {
            entries: BinaryHeap::new(),
        }
    }

    pub fn insert(&mut self, item: T, priority: f64) {
        self.entries.push(Entry { priority, item });
    }

    /// Remove and return the item with the smallest priority.
    pub fn extract_min(&mut self) -> Option<(T, f64)> {
        self.entries.pop().map(|entry| (entry.item, entry.priority))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
