//! # Buffer
//!
//! Bounded max-priority queue. `take` always returns the highest-priority
//! entry; among equal priorities the earliest inserted wins. When full, the
//! lowest-priority (and among those, the latest) entry is dropped.

use crate::primitives::BUDGET_CEILING;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Ordering key: priority, then insertion order (earlier first).
///
/// Priorities are clamped to `[0, BUDGET_CEILING]`, where the IEEE bit
/// pattern of a non-negative float orders like its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Slot {
    priority: u64,
    order: Reverse<u64>,
}

/// Bounded max-priority queue.
#[derive(Debug, Clone)]
pub struct Buffer<T> {
    capacity: usize,
    next_order: u64,
    entries: BTreeMap<Slot, T>,
}

impl<T> Buffer<T> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            next_order: 0,
            entries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert; returns the entry dropped to make room, if any.
    pub fn put(&mut self, value: T, priority: f64) -> Option<T> {
        let priority = if priority.is_nan() {
            0.0
        } else {
            priority.clamp(0.0, BUDGET_CEILING)
        };
        let slot = Slot {
            priority: priority.to_bits(),
            order: Reverse(self.next_order),
        };
        self.next_order = self.next_order.wrapping_add(1);
        self.entries.insert(slot, value);

        if self.entries.len() > self.capacity {
            self.entries.pop_first().map(|(_, v)| v)
        } else {
            None
        }
    }

    /// Remove the highest-priority entry.
    pub fn take(&mut self) -> Option<T> {
        self.entries.pop_last().map(|(_, v)| v)
    }

    /// The entry `take` would return.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.entries.last_key_value().map(|(_, v)| v)
    }

    /// Entries from highest to lowest priority.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_highest_priority_first() {
        let mut buffer = Buffer::new(10);
        buffer.put("low", 0.1);
        buffer.put("high", 0.9);
        buffer.put("mid", 0.5);
        assert_eq!(buffer.peek(), Some(&"high"));
        assert_eq!(buffer.take(), Some("high"));
        assert_eq!(buffer.take(), Some("mid"));
        assert_eq!(buffer.take(), Some("low"));
        assert_eq!(buffer.take(), None);
    }

    #[test]
    fn equal_priorities_are_fifo() {
        let mut buffer = Buffer::new(10);
        for name in ["a", "b", "c"] {
            buffer.put(name, 0.99);
        }
        let order: Vec<_> = std::iter::from_fn(|| buffer.take()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn overflow_drops_lowest() {
        let mut buffer = Buffer::new(2);
        buffer.put("keep", 0.9);
        buffer.put("drop", 0.1);
        assert_eq!(buffer.put("also", 0.5), Some("drop"));
        assert_eq!(buffer.len(), 2);
        // a tie at the bottom drops the newcomer
        assert_eq!(buffer.put("late", 0.5), Some("late"));
    }
}
