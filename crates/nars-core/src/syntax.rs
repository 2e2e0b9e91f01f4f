//! # Narsese Syntax Tables
//!
//! Fixed symbol tables the parser and the renderer consult: copulas, term
//! connectors, punctuation and tense markers, plus the structural delimiters.
//!
//! Every enum maps to exactly one textual symbol and back; nothing here holds
//! state.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// STRUCTURAL DELIMITERS
// =============================================================================

pub const STATEMENT_START: char = '(';
pub const STATEMENT_END: char = ')';
pub const TERM_DIVIDER: char = ',';
pub const TRUTH_VALUE_MARKER: char = '%';
pub const VALUE_SEPARATOR: char = ';';
pub const EXPECTATION_MARKER: char = '#';
pub const VARIABLE_SYMBOL: char = '#';
pub const QUERY_SYMBOL: char = '?';
pub const IMAGE_PLACEHOLDER: &str = "_";

/// Whether `c` may appear in an atomic term name.
#[must_use]
pub fn is_valid_atom_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '^'
}

// =============================================================================
// COPULA
// =============================================================================

/// The relation between subject and predicate of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Copula {
    Inheritance,
    Similarity,
    Implication,
    Equivalence,
    Instance,
    Property,
    InstanceProperty,
    PredictiveImplication,
    RetrospectiveImplication,
    ConcurrentImplication,
    PredictiveEquivalence,
    ConcurrentEquivalence,
}

impl Copula {
    /// All copulas, in symbol-table order.
    pub const ALL: [Self; 12] = [
        Self::Inheritance,
        Self::Similarity,
        Self::Implication,
        Self::Equivalence,
        Self::Instance,
        Self::Property,
        Self::InstanceProperty,
        Self::PredictiveImplication,
        Self::RetrospectiveImplication,
        Self::ConcurrentImplication,
        Self::PredictiveEquivalence,
        Self::ConcurrentEquivalence,
    ];

    /// Three-character textual symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Inheritance => "-->",
            Self::Similarity => "<->",
            Self::Implication => "==>",
            Self::Equivalence => "<=>",
            Self::Instance => ":--",
            Self::Property => "--]",
            Self::InstanceProperty => ":-]",
            Self::PredictiveImplication => "=/>",
            Self::RetrospectiveImplication => "=\\>",
            Self::ConcurrentImplication => "=|>",
            Self::PredictiveEquivalence => "</>",
            Self::ConcurrentEquivalence => "<|>",
        }
    }

    /// Look up a copula by its symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == symbol)
    }

    /// Inheritance, similarity and their instance/property specializations.
    #[must_use]
    pub const fn is_first_order(self) -> bool {
        matches!(
            self,
            Self::Inheritance
                | Self::Similarity
                | Self::Instance
                | Self::Property
                | Self::InstanceProperty
        )
    }

    #[must_use]
    pub const fn is_symmetric(self) -> bool {
        matches!(
            self,
            Self::Similarity
                | Self::Equivalence
                | Self::PredictiveEquivalence
                | Self::ConcurrentEquivalence
        )
    }

    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(
            self,
            Self::PredictiveImplication
                | Self::RetrospectiveImplication
                | Self::ConcurrentImplication
                | Self::PredictiveEquivalence
                | Self::ConcurrentEquivalence
        )
    }

    #[must_use]
    pub const fn is_implication(self) -> bool {
        matches!(
            self,
            Self::Implication
                | Self::PredictiveImplication
                | Self::RetrospectiveImplication
                | Self::ConcurrentImplication
        )
    }

    #[must_use]
    pub const fn is_equivalence(self) -> bool {
        matches!(
            self,
            Self::Equivalence | Self::PredictiveEquivalence | Self::ConcurrentEquivalence
        )
    }
}

impl fmt::Display for Copula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// =============================================================================
// TERM CONNECTOR
// =============================================================================

/// The operator heading a compound term.
///
/// Sets are represented by their opening bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Connector {
    ExtensionalSet,
    IntensionalSet,
    ExtensionalIntersection,
    IntensionalIntersection,
    ExtensionalDifference,
    IntensionalDifference,
    Product,
    ExtensionalImage,
    IntensionalImage,
    Negation,
    Conjunction,
    Disjunction,
    SequentialConjunction,
    ParallelConjunction,
}

impl Connector {
    /// All connectors, in symbol-table order.
    pub const ALL: [Self; 14] = [
        Self::ExtensionalSet,
        Self::IntensionalSet,
        Self::ExtensionalIntersection,
        Self::IntensionalIntersection,
        Self::ExtensionalDifference,
        Self::IntensionalDifference,
        Self::Product,
        Self::ExtensionalImage,
        Self::IntensionalImage,
        Self::Negation,
        Self::Conjunction,
        Self::Disjunction,
        Self::SequentialConjunction,
        Self::ParallelConjunction,
    ];

    /// Textual symbol. For sets this is the opening bracket.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::ExtensionalSet => "{",
            Self::IntensionalSet => "[",
            Self::ExtensionalIntersection => "&",
            Self::IntensionalIntersection => "|",
            Self::ExtensionalDifference => "-",
            Self::IntensionalDifference => "~",
            Self::Product => "*",
            Self::ExtensionalImage => "/",
            Self::IntensionalImage => "\\",
            Self::Negation => "--",
            Self::Conjunction => "&&",
            Self::Disjunction => "||",
            Self::SequentialConjunction => "&/",
            Self::ParallelConjunction => "&|",
        }
    }

    /// Look up a connector by its symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == symbol)
    }

    /// Set connector for an opening bracket character.
    #[must_use]
    pub const fn set_from_bracket(c: char) -> Option<Self> {
        match c {
            '{' => Some(Self::ExtensionalSet),
            '[' => Some(Self::IntensionalSet),
            _ => None,
        }
    }

    /// Closing bracket of a set connector.
    #[must_use]
    pub const fn set_end(self) -> Option<char> {
        match self {
            Self::ExtensionalSet => Some('}'),
            Self::IntensionalSet => Some(']'),
            _ => None,
        }
    }

    /// First-order connectors build terms; the rest combine statements.
    #[must_use]
    pub const fn is_first_order(self) -> bool {
        !matches!(
            self,
            Self::Negation
                | Self::Conjunction
                | Self::Disjunction
                | Self::SequentialConjunction
                | Self::ParallelConjunction
        )
    }

    /// Connectors whose subterm order carries no meaning.
    #[must_use]
    pub const fn is_order_invariant(self) -> bool {
        matches!(
            self,
            Self::ExtensionalIntersection
                | Self::IntensionalIntersection
                | Self::ExtensionalSet
                | Self::IntensionalSet
                | Self::Negation
                | Self::Conjunction
                | Self::Disjunction
        )
    }

    #[must_use]
    pub const fn is_conjunction(self) -> bool {
        matches!(
            self,
            Self::Conjunction | Self::SequentialConjunction | Self::ParallelConjunction
        )
    }

    #[must_use]
    pub const fn is_set(self) -> bool {
        matches!(self, Self::ExtensionalSet | Self::IntensionalSet)
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Whether `c` opens a set.
#[must_use]
pub const fn is_set_bracket_start(c: char) -> bool {
    matches!(c, '{' | '[')
}

/// Whether `c` closes a set.
#[must_use]
pub const fn is_set_bracket_end(c: char) -> bool {
    matches!(c, '}' | ']')
}

// =============================================================================
// PUNCTUATION
// =============================================================================

/// Sentence type marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Punctuation {
    Judgment,
    Question,
    Goal,
}

impl Punctuation {
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Judgment => '.',
            Self::Question => '?',
            Self::Goal => '!',
        }
    }

    #[must_use]
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Judgment),
            '?' => Some(Self::Question),
            '!' => Some(Self::Goal),
            _ => None,
        }
    }
}

impl fmt::Display for Punctuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// =============================================================================
// TENSE
// =============================================================================

/// Temporal marker of a sentence relative to the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tense {
    Future,
    Past,
    Present,
    Eternal,
}

impl Tense {
    /// All non-eternal tenses.
    pub const MARKED: [Self; 3] = [Self::Future, Self::Past, Self::Present];

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Future => ":/:",
            Self::Past => ":\\:",
            Self::Present => ":|:",
            Self::Eternal => "",
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
