//! # Composition Rules
//!
//! Two asymmetric statements sharing a subject or a predicate compose their
//! other terms into an intersection, union or difference. First-order
//! premises compose with `|`/`&` under `-->`; higher-order premises compose
//! with `||`/`&&` under `==>`.
//!
//! A premise whose composed term is already compound yields nothing, which
//! keeps term growth bounded.

use super::{function_for, statement_of, InferenceContext, Rule};
use crate::sentence::Sentence;
use crate::syntax::{Connector, Copula};
use crate::term::Term;
use crate::truth::TruthFunction;

/// Which connectors and copula a composition uses.
fn order_symbols(j1: &Sentence, j2: &Sentence, first: Connector, higher: Connector) -> Option<(Connector, Copula)> {
    let (s1, s2) = (statement_of(j1)?, statement_of(j2)?);
    if s1.is_symmetric() || s2.is_symmetric() {
        return None;
    }
    Some(if s1.is_first_order() && s2.is_first_order() {
        (first, Copula::Inheritance)
    } else {
        (higher, Copula::Implication)
    })
}

fn compose(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
    (connector, copula): (Connector, Copula),
    shared_predicate_function: TruthFunction,
    shared_subject_function: TruthFunction,
    rule: Rule,
) -> Option<Sentence> {
    let (s1, s2) = (statement_of(j1)?, statement_of(j2)?);
    let (statement, function) = if s1.predicate() == s2.predicate() {
        if s1.subject().is_compound() || s2.subject().is_compound() {
            return None;
        }
        let compound = Term::compound(connector, vec![s1.subject().clone(), s2.subject().clone()]);
        (
            Term::statement(compound, s1.predicate().clone(), copula),
            shared_predicate_function,
        )
    } else if s1.subject() == s2.subject() {
        if s1.predicate().is_compound() || s2.predicate().is_compound() {
            return None;
        }
        let compound = Term::compound(connector, vec![s1.predicate().clone(), s2.predicate().clone()]);
        (
            Term::statement(s1.subject().clone(), compound, copula),
            shared_subject_function,
        )
    } else {
        return None;
    };
    ctx.conclude(j1, j2, statement, function_for(j1, function), rule)
}

/// `T1→M`, `T2→M` ⊢ `(T1 | T2)→M` (intersection), or
/// `M→T1`, `M→T2` ⊢ `M→(T1 | T2)` (union). Disjunction for higher order.
pub fn disjunction_or_intensional_intersection(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let symbols = order_symbols(j1, j2, Connector::IntensionalIntersection, Connector::Disjunction)?;
    compose(
        ctx,
        j1,
        j2,
        symbols,
        TruthFunction::Intersection,
        TruthFunction::Union,
        Rule::DisjunctionOrIntensionalIntersection,
    )
}

/// `T1→M`, `T2→M` ⊢ `(T1 & T2)→M` (union), or
/// `M→T1`, `M→T2` ⊢ `M→(T1 & T2)` (intersection). Conjunction for higher order.
pub fn conjunction_or_extensional_intersection(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let symbols = order_symbols(j1, j2, Connector::ExtensionalIntersection, Connector::Conjunction)?;
    compose(
        ctx,
        j1,
        j2,
        symbols,
        TruthFunction::Union,
        TruthFunction::Intersection,
        Rule::ConjunctionOrExtensionalIntersection,
    )
}

/// `T1→M`, `T2→M` ⊢ `(T1 ~ T2)→M`
pub fn intensional_difference(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let (s1, s2) = (statement_of(j1)?, statement_of(j2)?);
    if s1.is_symmetric() || s2.is_symmetric() || !s1.is_first_order() || !s2.is_first_order() {
        return None;
    }
    if s1.predicate() != s2.predicate() || s1.subject().is_compound() || s2.subject().is_compound() {
        return None;
    }
    let difference = Term::compound(
        Connector::IntensionalDifference,
        vec![s1.subject().clone(), s2.subject().clone()],
    );
    let statement = Term::statement(difference, s1.predicate().clone(), Copula::Inheritance);
    ctx.conclude(j1, j2, statement, Some(TruthFunction::Difference), Rule::IntensionalDifference)
}

/// `M→T1`, `M→T2` ⊢ `M→(T1 - T2)`
pub fn extensional_difference(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let (s1, s2) = (statement_of(j1)?, statement_of(j2)?);
    if s1.is_symmetric() || s2.is_symmetric() || !s1.is_first_order() || !s2.is_first_order() {
        return None;
    }
    if s1.subject() != s2.subject() || s1.predicate().is_compound() || s2.predicate().is_compound() {
        return None;
    }
    let difference = Term::compound(
        Connector::ExtensionalDifference,
        vec![s1.predicate().clone(), s2.predicate().clone()],
    );
    let statement = Term::statement(s1.subject().clone(), difference, Copula::Inheritance);
    ctx.conclude(j1, j2, statement, Some(TruthFunction::Difference), Rule::ExtensionalDifference)
}
