//! # Inference Rule Catalogue
//!
//! Every rule is a function of one or two premise sentences returning an
//! optional conclusion. `None` means "not applicable"; the rules check their
//! own structural preconditions and never panic.
//!
//! Rule families:
//! - [`local`]: revision, choice, decision, eternalization, projection
//! - [`syllogistic`]: deduction, induction, abduction, exemplification,
//!   comparison, analogy, resemblance
//! - [`composition`]: intersections, unions and differences over a shared term
//! - [`conditional`]: inference across implications and equivalences, and
//!   conjunctive goal simplification
//! - [`immediate`]: one-premise negation, conversion, contraposition and
//!   image decomposition
//! - [`temporal`]: conjunction, implication and equivalence between events
//!
//! Conclusions are assembled here by [`InferenceContext::conclude`] and
//! [`InferenceContext::conclude_one_premise`], which fix the punctuation,
//! value, occurrence time and stamp of the result.

pub mod composition;
pub mod conditional;
pub mod immediate;
pub mod local;
pub mod syllogistic;
pub mod temporal;

use crate::config::NarsConfig;
use crate::sentence::{Sentence, SentenceKind};
use crate::term::{StatementTerm, Term};
use crate::truth::{self, EvidentialValue, TruthFunction};
use crate::types::IdSequence;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// RULE NAMES
// =============================================================================

/// The rule that produced a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    Revision,
    Eternalization,
    Projection,
    Deduction,
    Induction,
    Abduction,
    Exemplification,
    Comparison,
    Analogy,
    Resemblance,
    DisjunctionOrIntensionalIntersection,
    ConjunctionOrExtensionalIntersection,
    IntensionalDifference,
    ExtensionalDifference,
    ConditionalAnalogy,
    ConditionalJudgmentDeduction,
    ConditionalJudgmentAbduction,
    ConditionalGoalDeduction,
    ConditionalGoalInduction,
    SimplifyConjunctiveGoal,
    SimplifyNegatedConjunctiveGoal,
    ConditionalConjunctionalDeduction,
    ConditionalConjunctionalAbduction,
    Negation,
    Conversion,
    Contraposition,
    ExtensionalImage,
    IntensionalImage,
    TemporalIntersection,
    TemporalInduction,
    TemporalComparison,
}

impl Rule {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Revision => "Revision",
            Self::Eternalization => "Eternalization",
            Self::Projection => "Projection",
            Self::Deduction => "Deduction",
            Self::Induction => "Induction",
            Self::Abduction => "Abduction",
            Self::Exemplification => "Exemplification",
            Self::Comparison => "Comparison",
            Self::Analogy => "Analogy",
            Self::Resemblance => "Resemblance",
            Self::DisjunctionOrIntensionalIntersection => "DisjunctionOrIntensionalIntersection",
            Self::ConjunctionOrExtensionalIntersection => "ConjunctionOrExtensionalIntersection",
            Self::IntensionalDifference => "IntensionalDifference",
            Self::ExtensionalDifference => "ExtensionalDifference",
            Self::ConditionalAnalogy => "ConditionalAnalogy",
            Self::ConditionalJudgmentDeduction => "ConditionalJudgmentDeduction",
            Self::ConditionalJudgmentAbduction => "ConditionalJudgmentAbduction",
            Self::ConditionalGoalDeduction => "ConditionalGoalDeduction",
            Self::ConditionalGoalInduction => "ConditionalGoalInduction",
            Self::SimplifyConjunctiveGoal => "SimplifyConjunctiveGoal",
            Self::SimplifyNegatedConjunctiveGoal => "SimplifyNegatedConjunctiveGoal",
            Self::ConditionalConjunctionalDeduction => "ConditionalConjunctionalDeduction",
            Self::ConditionalConjunctionalAbduction => "ConditionalConjunctionalAbduction",
            Self::Negation => "Negation",
            Self::Conversion => "Conversion",
            Self::Contraposition => "Contraposition",
            Self::ExtensionalImage => "ExtensionalImage",
            Self::IntensionalImage => "IntensionalImage",
            Self::TemporalIntersection => "TemporalIntersection",
            Self::TemporalInduction => "TemporalInduction",
            Self::TemporalComparison => "TemporalComparison",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// INFERENCE CONTEXT
// =============================================================================

/// What a rule needs from the engine: settings, the id sequence and the
/// current cycle.
pub struct InferenceContext<'a> {
    pub config: &'a NarsConfig,
    pub ids: &'a mut IdSequence,
    pub now: u64,
}

impl<'a> InferenceContext<'a> {
    #[must_use]
    pub fn new(config: &'a NarsConfig, ids: &'a mut IdSequence, now: u64) -> Self {
        Self { config, ids, now }
    }

    /// Value of `j` projected to the current cycle.
    ///
    /// Eternal sentences are returned unchanged; questions have no value.
    #[must_use]
    pub fn decayed_value(&self, j: &Sentence) -> Option<EvidentialValue> {
        let value = j.value()?;
        Some(match j.occurrence_time() {
            Some(t) => {
                let decay = if j.is_goal() {
                    self.config.projection_decay_desire
                } else {
                    self.config.projection_decay_event
                };
                truth::projection(value, t, self.now, decay)
            }
            None => value,
        })
    }

    /// Expectation of `j`'s (projected) value. Questions score neutral.
    #[must_use]
    pub fn expectation(&self, j: &Sentence) -> f64 {
        self.decayed_value(j).map_or(0.5, |v| v.expectation())
    }

    #[must_use]
    pub fn is_positive(&self, j: &Sentence) -> bool {
        self.expectation(j) >= self.config.positive_threshold
    }

    #[must_use]
    pub fn is_negative(&self, j: &Sentence) -> bool {
        self.expectation(j) < self.config.negative_threshold
    }

    // -------------------------------------------------------------------------
    // Conclusion construction
    // -------------------------------------------------------------------------

    /// Build the conclusion of a two-premise rule.
    ///
    /// - Punctuation: a non-judgment `j1` wins, then a non-judgment `j2`,
    ///   otherwise judgment.
    /// - Higher-order statement conclusions use raw premise values and stay
    ///   eternal; everything else uses values projected to now and becomes an
    ///   event when either premise is one.
    /// - Non-event conclusions inherit both premises' evidential bases.
    ///
    /// Returns `None` when `statement` cannot head a sentence, or when the
    /// conclusion needs a value and `function` is `None`.
    pub fn conclude(
        &mut self,
        j1: &Sentence,
        j2: &Sentence,
        statement: Term,
        function: Option<TruthFunction>,
        rule: Rule,
    ) -> Option<Sentence> {
        if !statement.is_sentence_term() {
            return None;
        }

        let higher_order = statement.is_statement() && !statement.is_first_order();
        let premise_value = |j: &Sentence| {
            if higher_order {
                j.value()
            } else {
                self.decayed_value(j)
            }
        };

        let kind = match (j1.kind(), j2.kind()) {
            (SentenceKind::Question, _) | (SentenceKind::Judgment(_), SentenceKind::Question) => {
                SentenceKind::Question
            }
            (SentenceKind::Goal(_), _) | (SentenceKind::Judgment(_), SentenceKind::Goal(_)) => {
                let value = function?.apply(premise_value(j1)?, premise_value(j2)?, self.config.k);
                SentenceKind::Goal(value)
            }
            (SentenceKind::Judgment(_), SentenceKind::Judgment(_)) => {
                let value = function?.apply(premise_value(j1)?, premise_value(j2)?, self.config.k);
                SentenceKind::Judgment(value)
            }
        };

        let occurrence_time = ((j1.is_event() || j2.is_event()) && !higher_order).then_some(self.now);
        let mut result = Sentence::new(statement, kind, self.ids.next_id(), occurrence_time);
        if !result.is_event() {
            result.stamp_mut().merge_base(j1.stamp().evidential_base());
            result.stamp_mut().merge_base(j2.stamp().evidential_base());
        }
        result.stamp_mut().set_provenance(rule, vec![j1.id(), j2.id()]);
        Some(result)
    }

    /// Build the conclusion of a one-premise rule.
    ///
    /// Keeps `j`'s punctuation and occurrence time. `value` replaces `j`'s
    /// value when given.
    pub fn conclude_one_premise(
        &mut self,
        j: &Sentence,
        statement: Term,
        value: Option<EvidentialValue>,
        rule: Rule,
    ) -> Option<Sentence> {
        if !statement.is_sentence_term() {
            return None;
        }
        let kind = match value {
            Some(v) => j.kind().with_value(v),
            None => j.kind(),
        };
        let mut result = Sentence::new(statement, kind, self.ids.next_id(), j.occurrence_time());
        result.stamp_mut().merge_base(j.stamp().evidential_base());
        result.stamp_mut().set_provenance(rule, vec![j.id()]);
        result.stamp_mut().mark_one_premise();
        Some(result)
    }
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// The statement of `j` when it is a copula statement.
pub(crate) fn statement_of(j: &Sentence) -> Option<&StatementTerm> {
    j.statement().as_statement()
}

/// Implication read forwards: plain, predictive or concurrent.
pub(crate) fn is_forward_implication(statement: &StatementTerm) -> bool {
    statement.copula().is_implication()
        && statement.copula() != crate::syntax::Copula::RetrospectiveImplication
}

/// Truth function for a conclusion whose punctuation follows `j1`.
///
/// Questions take no value.
pub(crate) fn function_for(j1: &Sentence, function: TruthFunction) -> Option<TruthFunction> {
    (!j1.is_question()).then_some(function)
}
