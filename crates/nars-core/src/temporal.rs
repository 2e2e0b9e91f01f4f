//! # Event Buffer
//!
//! FIFO window over the most recent input events, used to pair each new
//! event with the ones before it. The oldest event falls out on overflow.

use crate::sentence::Sentence;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct EventBuffer {
    capacity: usize,
    events: VecDeque<Sentence>,
}

impl EventBuffer {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: VecDeque::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an event; returns the oldest one when it was pushed out.
    ///
    /// Eternal sentences are not events and are ignored.
    pub fn push(&mut self, event: Sentence) -> Option<Sentence> {
        if !event.is_event() {
            return None;
        }
        self.events.push_back(event);
        if self.events.len() > self.capacity {
            self.events.pop_front()
        } else {
            None
        }
    }

    /// Buffered events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sentence> {
        self.events.iter()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
