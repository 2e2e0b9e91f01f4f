//! # nars-core
//!
//! A resource-bounded non-axiomatic reasoning engine.
//!
//! Knowledge is a set of Narsese sentences, each carrying a
//! (frequency, confidence) value. The engine stores them in a bounded,
//! priority-governed memory of concepts, derives new sentences with a
//! catalogue of term-logic rules, pursues goals by deciding on and executing
//! operations, and answers questions from its best beliefs.
//!
//! ## Layout
//!
//! - `syntax`, `term`: Narsese grammar, the term sum type and its parser
//! - `sentence`, `truth`: evidence model and truth calculus
//! - `containers`, `memory`: bags, buffers, tables and concepts
//! - `rules`, `inference`: rule catalogue and dispatcher
//! - `engine`, `temporal`: the control loop
//! - `formats`: belief snapshot encoding
//!
//! ## Constraints
//!
//! - Synchronous and single-owner: an `Engine` owns all of its state and is
//!   driven one `step()` at a time
//! - Bounded: every container has a fixed capacity and evicts silently
//! - Reproducible: all randomness comes from one seedable RNG
//! - No I/O, no async, no network

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod containers;
pub mod engine;
pub mod formats;
pub mod inference;
pub mod memory;
pub mod primitives;
pub mod rules;
pub mod sentence;
pub mod syntax;
pub mod temporal;
pub mod term;
pub mod truth;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use config::NarsConfig;
pub use types::{IdSequence, NarsError, SentenceId};

// =============================================================================
// RE-EXPORTS: Language
// =============================================================================

pub use sentence::{EvidentialBase, Sentence, SentenceKind, Stamp, may_interact, parse_sentence};
pub use syntax::{Connector, Copula, Punctuation, Tense};
pub use term::{Term, parse_term};
pub use truth::{EvidentialValue, TruthFunction};

// =============================================================================
// RE-EXPORTS: Reasoning
// =============================================================================

pub use containers::{Bag, Buffer, Budget, Item, Table};
pub use engine::{Actuator, Engine, EngineEvent, NullActuator};
pub use inference::{infer, infer_one_premise, infer_temporal};
pub use memory::{Concept, LinkKind, Memory};
pub use rules::{InferenceContext, Rule};
pub use temporal::EventBuffer;

// =============================================================================
// RE-EXPORTS: Formats
// =============================================================================

pub use formats::{BeliefSnapshot, SnapshotEntry, snapshot_from_bytes, snapshot_to_bytes};
