//! # Core Type Definitions
//!
//! Shared identifiers and the error type for the reasoning engine:
//! - Sentence identifiers (`SentenceId`) and their generator (`IdSequence`)
//! - Error types (`NarsError`)
//!
//! ## Ownership
//!
//! There is no global counter. Every `Engine` owns exactly one `IdSequence`
//! and threads it through parsing and inference, so independent engines never
//! share or race on identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier of a sentence, assigned from the engine's `IdSequence`.
///
/// Ids are strictly increasing in creation order within one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SentenceId(pub u64);

impl SentenceId {
    /// Get the raw id value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic generator of `SentenceId`s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Create a sequence starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequence whose next id is `start`.
    #[must_use]
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }

    /// Take the next id.
    pub fn next_id(&mut self) -> SentenceId {
        let id = SentenceId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// Peek at the id the next call to `next_id` will return.
    #[must_use]
    pub const fn peek(&self) -> u64 {
        self.next
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the reasoning engine.
///
/// - `Syntax` is the only error an external caller of `submit` can trigger
/// - `NoInteraction` and `VacuousPremise` are routine "no result" outcomes
///   of the dispatcher; the control loop absorbs them
/// - Everything else belongs to configuration and persistence
#[derive(Debug, Error)]
pub enum NarsError {
    /// Malformed Narsese text.
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// The premises share evidence, or one was derived from the other.
    #[error("Premises may not interact")]
    NoInteraction,

    /// A premise carries no usable evidence (zero confidence or frequency).
    #[error("Vacuous premise")]
    VacuousPremise,

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl NarsError {
    /// Shorthand for building a syntax error.
    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    /// Whether this error is a routine "rule not applicable" outcome.
    #[must_use]
    pub const fn is_no_result(&self) -> bool {
        matches!(self, Self::NoInteraction | Self::VacuousPremise)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_sequence_is_monotonic() {
        let mut ids = IdSequence::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert!(a < b && b < c);
        assert_eq!(ids.peek(), 3);
    }

    #[test]
    fn independent_sequences_do_not_share_state() {
        let mut first = IdSequence::new();
        let mut second = IdSequence::new();
        first.next_id();
        first.next_id();
        assert_eq!(second.next_id(), SentenceId(0));
    }

    #[test]
    fn no_result_errors_are_classified() {
        assert!(NarsError::NoInteraction.is_no_result());
        assert!(NarsError::VacuousPremise.is_no_result());
        assert!(!NarsError::syntax("x").is_no_result());
    }
}
