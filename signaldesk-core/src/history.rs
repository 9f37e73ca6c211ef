//! Bounded, insertion-ordered history buffers.
//!
//! Price history (cap 100) and signal history (cap 50) both use this capped
//! deque. Eviction is an explicit push-time operation: once the cap is
//! reached, every push drops the oldest entry. Entries are never removed
//! any other way.

use std::collections::VecDeque;

/// Insertion-ordered buffer that never grows past its capacity.
#[derive(Debug, Clone)]
pub struct CappedHistory<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> CappedHistory<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest if the buffer is full.
    pub fn push(&mut self, entry: T) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&T> {
        self.entries.back()
    }

    /// The most recent `n` entries, oldest first. Shorter when fewer exist.
    pub fn last_n(&self, n: usize) -> Vec<&T> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).collect()
    }

    /// Oldest-first iteration over everything retained.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}
