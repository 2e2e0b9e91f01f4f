//! # Innate Primitives
//!
//! Hardcoded constants of the reasoning engine.
//!
//! Tunable, per-engine settings live in [`crate::config::NarsConfig`]; the
//! values here are fixed properties of the logic and the formats.

// =============================================================================
// EVIDENCE
// =============================================================================

/// Maximum number of ids kept in an evidential base.
///
/// Merging beyond this purges the oldest ids first.
pub const MAX_EVIDENTIAL_BASE_LENGTH: usize = 30;

/// Smallest confidence a value may carry. Lower inputs are clamped up.
pub const MIN_CONFIDENCE: f64 = 0.0001;

/// Largest confidence a value may carry. Inputs at or above 1 are clamped down.
pub const MAX_CONFIDENCE: f64 = 0.9999;

/// Frequency of an input judgment or goal that has no truth-value block.
pub const DEFAULT_FREQUENCY: f64 = 1.0;

/// Confidence of an input judgment or goal that has no truth-value block.
pub const DEFAULT_CONFIDENCE: f64 = 0.9;

// =============================================================================
// BUDGETS
// =============================================================================

/// Priority given to a freshly inserted item.
pub const DEFAULT_ITEM_PRIORITY: f64 = 0.99;

/// Quality given to a freshly inserted item.
pub const DEFAULT_ITEM_QUALITY: f64 = 0.01;

/// Budget values are clamped into `[BUDGET_FLOOR, BUDGET_CEILING]`.
pub const BUDGET_CEILING: f64 = 0.999_999_99;

/// Smallest budget value. Keeps every budget strictly above zero.
pub const BUDGET_FLOOR: f64 = 0.000_000_01;

/// Priority of a term, subterm or superterm link.
pub const TERM_LINK_PRIORITY: f64 = 0.5;

/// Priority of a prediction or explanation link.
pub const IMPLICATION_LINK_PRIORITY: f64 = 0.99;

/// OR-multiplier applied to a concept's quality when a judgment or question
/// reaches it.
pub const QUALITY_STRENGTHEN_VALUE: f64 = 0.1;

/// Quality assigned to a concept when a goal reaches it.
pub const GOAL_CONCEPT_QUALITY: f64 = 0.999;

// =============================================================================
// CONTROL
// =============================================================================

/// Term-link hops a Consider step may take to reach a statement concept.
pub const CONSIDER_MAX_HOPS: usize = 2;

/// Cycles between now and the occurrence of a past- or future-tense input.
pub const TENSE_DURATION: u64 = 5;

/// Goal and evidence ids the engine remembers as already acted upon.
///
/// The oldest ids are forgotten first.
pub const ACTED_GOAL_MEMORY: usize = 1000;

/// Name of the self term that marks an operation: `((*,{SELF}) --> ^op)`.
pub const SELF_TERM_NAME: &str = "SELF";

// =============================================================================
// FORMATS
// =============================================================================

/// Magic bytes for the belief snapshot header.
///
/// - File Header = Magic Bytes ("NARS") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"NARS";

/// Current snapshot format version.
///
/// Increment this when making breaking changes to the snapshot layout.
pub const FORMAT_VERSION: u8 = 1;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length of one Narsese input line.
///
/// Longer input is rejected before parsing.
pub const MAX_SENTENCE_LENGTH: usize = 4096;

/// Maximum bracket nesting depth accepted by the parser.
pub const MAX_TERM_DEPTH: usize = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_bounds_are_strictly_inside_unit_interval() {
        assert!(MIN_CONFIDENCE > 0.0);
        assert!(MAX_CONFIDENCE < 1.0);
    }

    #[test]
    fn magic_bytes_correct() {
        assert_eq!(MAGIC_BYTES, b"NARS");
    }
}
