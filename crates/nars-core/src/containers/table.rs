//! # Table
//!
//! Per-concept bounded store of judgments (beliefs) or goals (desires),
//! ordered by confidence projected to the current cycle, highest first.
//!
//! Putting a sentence revises rather than duplicates when it can:
//! - an event is revised against the current top entry;
//! - an eternal sentence is revised against the highest entry it may
//!   interact with.
//!
//! The revision replaces the entry it was merged with. Otherwise the sentence
//! is inserted as-is. Overflow drops the lowest entry.

use crate::rules::local::revision;
use crate::rules::InferenceContext;
use crate::sentence::{may_interact, Sentence};
use rand::Rng;

/// Confidence-ordered, revising store of sentences about one statement.
#[derive(Debug, Clone)]
pub struct Table {
    capacity: usize,
    entries: Vec<Sentence>,
}

impl Table {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::with_capacity(capacity.max(1)),
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

    /// Entries, highest confidence first.
    pub fn iter(&self) -> impl Iterator<Item = &Sentence> {
        self.entries.iter()
    }

    /// Insert `sentence`, revising it with an existing entry when possible.
    ///
    /// Returns the revision, when one was made.
    pub fn put(&mut self, sentence: Sentence, ctx: &mut InferenceContext<'_>) -> Option<Sentence> {
        let partner = if sentence.is_event() {
            (!self.entries.is_empty()).then_some(0)
        } else {
            self.entries.iter().position(|e| may_interact(&sentence, e))
        };

        let revised = partner.and_then(|index| {
            let merged = revision(ctx, &sentence, &self.entries[index])?;
            self.entries.remove(index);
            Some(merged)
        });

        match revised {
            Some(merged) => {
                self.insert(merged.clone(), ctx);
                Some(merged)
            }
            None => {
                self.insert(sentence, ctx);
                None
            }
        }
    }

    /// Insert without attempting revision.
    pub fn insert(&mut self, sentence: Sentence, ctx: &InferenceContext<'_>) {
        self.entries.push(sentence);
        self.entries.sort_by(|a, b| {
            let ca = ctx.decayed_value(a).map_or(0.0, |v| v.confidence());
            let cb = ctx.decayed_value(b).map_or(0.0, |v| v.confidence());
            cb.total_cmp(&ca)
        });
        self.entries.truncate(self.capacity);
    }

    /// The highest-confidence entry.
    #[must_use]
    pub fn peek(&self) -> Option<&Sentence> {
        self.entries.first()
    }

    /// A uniformly random entry.
    pub fn peek_random<R: Rng>(&self, rng: &mut R) -> Option<&Sentence> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get(rng.gen_range(0..self.entries.len()))
    }

    /// The highest entry `j` may interact with.
    #[must_use]
    pub fn peek_interactable(&self, j: &Sentence) -> Option<&Sentence> {
        self.entries.iter().find(|e| may_interact(j, e))
    }
}
