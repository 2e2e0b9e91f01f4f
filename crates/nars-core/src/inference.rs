//! # Inference Dispatcher
//!
//! Decides which rules of the catalogue structurally apply to a pair of
//! premises, runs them, and collects every conclusion.
//!
//! ## Two premises
//!
//! 1. The premises must be allowed to interact (`NoInteraction`) and carry
//!    non-zero confidence (`VacuousPremise`).
//! 2. Premises about the same statement only revise.
//! 3. A goal meeting a belief goes through the conditional goal rules.
//! 4. Everything else must have non-zero frequency (`VacuousPremise`) and is
//!    classified by the [`Shape`] of each statement:
//!
//! | j1 | j2 | Rules |
//! |---|---|---|
//! | compound | implication | conditional deduction on the compound |
//! | same order | same order | syllogistic and composition rules |
//! | higher order | first order | conditional rules across the higher-order premise |
//!
//! ## One premise and temporal pairs
//!
//! [`infer_one_premise`] runs the immediate rules; [`infer_temporal`] runs
//! the temporal rules on two events.

use crate::primitives::MIN_CONFIDENCE;
use crate::rules::conditional::{self, conjuncts};
use crate::rules::{
    composition, immediate, is_forward_implication, local, syllogistic, temporal, InferenceContext,
};
use crate::sentence::{may_interact, Sentence};
use crate::term::{StatementTerm, Term};
use crate::NarsError;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Structural class of a premise's statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `-->`, `<->` and their specializations.
    FirstOrder,
    /// `==>`, `<=>` and their temporal variants.
    HigherOrder,
    /// A higher-order compound such as a conjunction or a negation.
    Compound,
}

impl Shape {
    #[must_use]
    pub fn of(term: &Term) -> Self {
        match term.as_statement() {
            Some(s) if s.is_first_order() => Self::FirstOrder,
            Some(_) => Self::HigherOrder,
            None => Self::Compound,
        }
    }
}

fn is_vacuous_confidence(j: &Sentence) -> bool {
    j.value().is_some_and(|v| v.confidence() <= MIN_CONFIDENCE)
}

fn is_vacuous_frequency(j: &Sentence) -> bool {
    j.value().is_some_and(|v| v.frequency() <= 0.0)
}

/// Collects useful conclusions; zero-confidence results are dropped.
#[derive(Default)]
struct Conclusions(Vec<Sentence>);

impl Conclusions {
    fn add(&mut self, conclusion: Option<Sentence>) {
        if let Some(s) = conclusion.filter(|s| !is_vacuous_confidence(s)) {
            self.0.push(s);
        }
    }

    fn extend(&mut self, conclusions: Vec<Sentence>) {
        for s in conclusions {
            self.add(Some(s));
        }
    }
}

// =============================================================================
// TWO-PREMISE INFERENCE
// =============================================================================

/// Every conclusion derivable from `j1` and `j2`.
///
/// `j1` is the sentence being processed (judgment, question or goal); `j2`
/// is a belief or desire from a related concept. `NoInteraction` and
/// `VacuousPremise` mean "nothing to derive" and are expected routinely.
pub fn infer(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Result<Vec<Sentence>, NarsError> {
    if !may_interact(j1, j2) {
        return Err(NarsError::NoInteraction);
    }
    if is_vacuous_confidence(j1) || is_vacuous_confidence(j2) {
        return Err(NarsError::VacuousPremise);
    }

    let mut out = Conclusions::default();

    if j1.statement() == j2.statement() {
        if !j1.is_question() && j1.punctuation() == j2.punctuation() {
            out.add(local::revision(ctx, j1, j2));
        }
        return Ok(out.0);
    }

    if j1.is_goal() && j2.is_judgment() {
        infer_goal(ctx, j1, j2, &mut out);
        return Ok(out.0);
    }

    if is_vacuous_frequency(j1) || is_vacuous_frequency(j2) {
        return Err(NarsError::VacuousPremise);
    }

    match (Shape::of(j1.statement()), Shape::of(j2.statement())) {
        (Shape::Compound, Shape::HigherOrder) => {
            out.add(conditional::conditional_judgment_deduction(ctx, j2, j1));
        }
        (Shape::HigherOrder, Shape::Compound) => {
            out.add(conditional::conditional_judgment_deduction(ctx, j1, j2));
        }
        (Shape::Compound, _) | (_, Shape::Compound) => {}
        (Shape::FirstOrder, Shape::FirstOrder) | (Shape::HigherOrder, Shape::HigherOrder) => {
            infer_same_order(ctx, j1, j2, &mut out);
        }
        (Shape::HigherOrder, Shape::FirstOrder) => infer_mixed_order(ctx, j1, j2, &mut out),
        (Shape::FirstOrder, Shape::HigherOrder) => infer_mixed_order(ctx, j2, j1, &mut out),
    }

    Ok(out.0)
}

/// `goal!` with a belief: backward chaining through implications, or
/// simplifying a conjunctive goal.
fn infer_goal(ctx: &mut InferenceContext<'_>, goal: &Sentence, belief: &Sentence, out: &mut Conclusions) {
    let Some(s2) = belief.statement().as_statement() else {
        return;
    };
    if !s2.is_first_order() {
        if !is_forward_implication(s2) {
            return;
        }
        if s2.predicate() == goal.statement() {
            out.add(conditional::conditional_goal_deduction(ctx, goal, belief));
        } else if s2.subject() == goal.statement() {
            out.add(conditional::conditional_goal_induction(ctx, goal, belief));
        }
    } else if goal.statement().is_conjunction() {
        out.add(conditional::simplify_conjunctive_goal(ctx, goal, belief));
    } else if goal.statement().is_negation()
        && goal.statement().subterms().first().is_some_and(Term::is_conjunction)
    {
        out.add(conditional::simplify_negated_conjunctive_goal(ctx, goal, belief));
    }
}

/// Would the pair only restate one of its premises?
fn is_tautology(s1: &StatementTerm, s2: &StatementTerm) -> bool {
    let swapped = s1.subject() == s2.predicate() && s1.predicate() == s2.subject();
    let same_terms = s1.subject() == s2.subject() && s1.predicate() == s2.predicate();
    swapped || (same_terms && s1.is_symmetric() != s2.is_symmetric())
}

/// Both statements first order, or both higher order.
fn infer_same_order(ctx: &mut InferenceContext<'_>, j1: &Sentence, j2: &Sentence, out: &mut Conclusions) {
    let (Some(s1), Some(s2)) = (j1.statement().as_statement(), j2.statement().as_statement()) else {
        return;
    };
    if is_tautology(s1, s2) {
        return;
    }
    let judgment_event = |j: &Sentence| j.is_judgment() && j.is_event();
    if s1.copula().is_temporal() || judgment_event(j1) || judgment_event(j2) {
        return;
    }

    match (s1.is_symmetric(), s2.is_symmetric()) {
        (false, false) => {
            if s1.subject() == s2.predicate() {
                // M-->P, S-->M
                out.add(syllogistic::deduction(ctx, j1, j2));
                out.add(syllogistic::exemplification(ctx, j2, j1));
            } else if s1.predicate() == s2.subject() {
                // S-->M, M-->P
                out.add(syllogistic::deduction(ctx, j2, j1));
                out.add(syllogistic::exemplification(ctx, j1, j2));
            } else if s1.subject() == s2.subject() {
                // M-->P, M-->S
                out.add(syllogistic::induction(ctx, j1, j2));
                out.add(syllogistic::induction(ctx, j2, j1));
                out.add(syllogistic::comparison(ctx, j1, j2));
                out.add(composition::disjunction_or_intensional_intersection(ctx, j1, j2));
                out.add(composition::conjunction_or_extensional_intersection(ctx, j1, j2));
                out.add(composition::extensional_difference(ctx, j1, j2));
                out.add(composition::extensional_difference(ctx, j2, j1));
            } else if s1.predicate() == s2.predicate() {
                // P-->M, S-->M
                out.add(syllogistic::abduction(ctx, j1, j2));
                out.add(syllogistic::abduction(ctx, j2, j1));
                if !s1.is_first_order() {
                    infer_conjunctional_abduction(ctx, j1, j2, s1, s2, out);
                }
                out.add(composition::disjunction_or_intensional_intersection(ctx, j1, j2));
                out.add(composition::conjunction_or_extensional_intersection(ctx, j1, j2));
                out.add(composition::intensional_difference(ctx, j1, j2));
                out.add(composition::intensional_difference(ctx, j2, j1));
                out.add(syllogistic::comparison(ctx, j1, j2));
            }
        }
        (false, true) => out.add(syllogistic::analogy(ctx, j1, j2)),
        (true, false) => out.add(syllogistic::analogy(ctx, j2, j1)),
        (true, true) => out.add(syllogistic::resemblance(ctx, j1, j2)),
    }
}

/// Two implications with the same consequent whose antecedents differ by
/// exactly one conjunct: the larger conjunction goes first.
fn infer_conjunctional_abduction(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
    s1: &StatementTerm,
    s2: &StatementTerm,
    out: &mut Conclusions,
) {
    if !s1.subject().is_conjunction() && !s2.subject().is_conjunction() {
        return;
    }
    let (c1, c2) = (conjuncts(s1.subject()), conjuncts(s2.subject()));
    let only_in_1 = c1.iter().filter(|t| !c2.contains(t)).count();
    let only_in_2 = c2.iter().filter(|t| !c1.contains(t)).count();
    if only_in_1 + only_in_2 != 1 {
        return;
    }
    if c1.len() > c2.len() {
        out.add(conditional::conditional_conjunctional_abduction(ctx, j1, j2));
    } else {
        out.add(conditional::conditional_conjunctional_abduction(ctx, j2, j1));
    }
}

/// `higher` is a higher-order statement, `first` a first-order one.
fn infer_mixed_order(
    ctx: &mut InferenceContext<'_>,
    higher: &Sentence,
    first: &Sentence,
    out: &mut Conclusions,
) {
    let Some(h) = higher.statement().as_statement() else {
        return;
    };
    let f = first.statement();

    if h.copula().is_equivalence() {
        if f == h.subject() || f == h.predicate() {
            out.add(conditional::conditional_analogy(ctx, first, higher));
        }
    } else if is_forward_implication(h) {
        if f == h.subject() {
            out.add(conditional::conditional_judgment_deduction(ctx, higher, first));
        } else if f == h.predicate() {
            out.add(conditional::conditional_judgment_abduction(ctx, higher, first));
        } else if conjuncts(h.subject()).contains(&f) {
            out.add(conditional::conditional_conjunctional_deduction(ctx, higher, first));
        }
    }
}

// =============================================================================
// ONE-PREMISE INFERENCE
// =============================================================================

/// Contraposition of an eternal judgment `(C1 && … ) ⇒ P`.
///
/// Only conjunctive antecedents are contraposed, and only for sentences not
/// themselves produced by one-premise inference.
pub fn contrapose(ctx: &mut InferenceContext<'_>, j: &Sentence) -> Option<Sentence> {
    if !j.is_judgment() || j.is_event() || j.stamp().is_from_one_premise_inference() {
        return None;
    }
    let statement = j.statement().as_statement()?;
    if !is_forward_implication(statement) || !statement.subject().is_conjunction() {
        return None;
    }
    immediate::contraposition(ctx, j)
}

/// Immediate conclusions of a single judgment: negation, conversion,
/// contraposition and image decomposition.
///
/// Compound statements and one-premise conclusions yield nothing, so
/// immediate rules never chain.
pub fn infer_one_premise(ctx: &mut InferenceContext<'_>, j: &Sentence) -> Vec<Sentence> {
    if !j.is_judgment() || !j.statement().is_statement() || j.stamp().is_from_one_premise_inference() {
        return Vec::new();
    }
    let mut out = Conclusions::default();
    out.add(immediate::negation(ctx, j));
    out.add(immediate::conversion(ctx, j));
    out.add(contrapose(ctx, j));
    out.extend(immediate::extensional_image(ctx, j));
    out.extend(immediate::intensional_image(ctx, j));
    out.0
}

// =============================================================================
// TEMPORAL INFERENCE
// =============================================================================

/// Conjunction and implication between two events, earlier event first.
pub fn infer_temporal(ctx: &mut InferenceContext<'_>, a: &Sentence, b: &Sentence) -> Vec<Sentence> {
    if a.id() == b.id() {
        return Vec::new();
    }
    let mut out = Conclusions::default();
    out.add(temporal::temporal_intersection(ctx, a, b));
    out.add(temporal::temporal_induction(ctx, a, b));
    out.0
}
