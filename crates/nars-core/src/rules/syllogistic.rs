//! # Syllogistic Rules
//!
//! Two statements sharing exactly one term (the middle term M) yield a
//! statement about the other two. Argument order matters: each rule names
//! the arrangement it expects, and returns `None` when the premises do not
//! have it.
//!
//! | Rule | j1 | j2 | Conclusion |
//! |---|---|---|---|
//! | Deduction | M→P | S→M | S→P |
//! | Abduction | P→M | S→M | S→P |
//! | Induction | M→P | M→S | S→P |
//! | Exemplification | P→M | M→S | S→P |
//! | Comparison | M→P, P→M | M→S, S→M | S↔P |
//! | Analogy | M→P | S↔M | S→P |
//! | Resemblance | M↔P | S↔M | S↔P |

use super::{function_for, statement_of, InferenceContext, Rule};
use crate::sentence::Sentence;
use crate::syntax::Copula;
use crate::term::Term;
use crate::truth::TruthFunction;

fn conclude(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
    (subject, predicate, copula): (Term, Term, Copula),
    function: TruthFunction,
    rule: Rule,
) -> Option<Sentence> {
    if subject == predicate {
        return None;
    }
    let statement = Term::statement(subject, predicate, copula);
    ctx.conclude(j1, j2, statement, function_for(j1, function), rule)
}

/// `M→P`, `S→M` ⊢ `S→P`
pub fn deduction(ctx: &mut InferenceContext<'_>, j1: &Sentence, j2: &Sentence) -> Option<Sentence> {
    let (s1, s2) = (statement_of(j1)?, statement_of(j2)?);
    if s1.is_symmetric() || s2.is_symmetric() || s1.subject() != s2.predicate() {
        return None;
    }
    let parts = (s2.subject().clone(), s1.predicate().clone(), s1.copula());
    conclude(ctx, j1, j2, parts, TruthFunction::Deduction, Rule::Deduction)
}

/// `P→M`, `S→M` ⊢ `S→P`
pub fn abduction(ctx: &mut InferenceContext<'_>, j1: &Sentence, j2: &Sentence) -> Option<Sentence> {
    let (s1, s2) = (statement_of(j1)?, statement_of(j2)?);
    if s1.is_symmetric() || s2.is_symmetric() || s1.predicate() != s2.predicate() {
        return None;
    }
    let parts = (s2.subject().clone(), s1.subject().clone(), s1.copula());
    conclude(ctx, j1, j2, parts, TruthFunction::Abduction, Rule::Abduction)
}

/// `M→P`, `M→S` ⊢ `S→P`
pub fn induction(ctx: &mut InferenceContext<'_>, j1: &Sentence, j2: &Sentence) -> Option<Sentence> {
    let (s1, s2) = (statement_of(j1)?, statement_of(j2)?);
    if s1.is_symmetric() || s2.is_symmetric() || s1.subject() != s2.subject() {
        return None;
    }
    let parts = (s2.predicate().clone(), s1.predicate().clone(), s1.copula());
    conclude(ctx, j1, j2, parts, TruthFunction::Induction, Rule::Induction)
}

/// `P→M`, `M→S` ⊢ `S→P`
pub fn exemplification(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let (s1, s2) = (statement_of(j1)?, statement_of(j2)?);
    if s1.is_symmetric() || s2.is_symmetric() || s1.predicate() != s2.subject() {
        return None;
    }
    let parts = (s2.predicate().clone(), s1.subject().clone(), s1.copula());
    conclude(ctx, j1, j2, parts, TruthFunction::Exemplification, Rule::Exemplification)
}

/// `M→P`, `M→S` ⊢ `S↔P`, or `P→M`, `S→M` ⊢ `S↔P`
pub fn comparison(ctx: &mut InferenceContext<'_>, j1: &Sentence, j2: &Sentence) -> Option<Sentence> {
    let (s1, s2) = (statement_of(j1)?, statement_of(j2)?);
    if s1.is_symmetric() || s2.is_symmetric() {
        return None;
    }
    let copula = if s1.is_first_order() {
        Copula::Similarity
    } else {
        Copula::Equivalence
    };
    let parts = if s1.subject() == s2.subject() {
        (s2.predicate().clone(), s1.predicate().clone(), copula)
    } else if s1.predicate() == s2.predicate() {
        (s2.subject().clone(), s1.subject().clone(), copula)
    } else {
        return None;
    };
    conclude(ctx, j1, j2, parts, TruthFunction::Comparison, Rule::Comparison)
}

/// `M→P`, `S↔M` ⊢ `S→P`, in any of the four placements of M.
pub fn analogy(ctx: &mut InferenceContext<'_>, j1: &Sentence, j2: &Sentence) -> Option<Sentence> {
    let (s1, s2) = (statement_of(j1)?, statement_of(j2)?);
    if s1.is_symmetric() || !s2.is_symmetric() {
        return None;
    }
    let copula = s1.copula();
    let parts = if s1.subject() == s2.predicate() {
        (s2.subject().clone(), s1.predicate().clone(), copula)
    } else if s1.subject() == s2.subject() {
        (s2.predicate().clone(), s1.predicate().clone(), copula)
    } else if s1.predicate() == s2.predicate() {
        (s1.subject().clone(), s2.subject().clone(), copula)
    } else if s1.predicate() == s2.subject() {
        (s1.subject().clone(), s2.predicate().clone(), copula)
    } else {
        return None;
    };
    conclude(ctx, j1, j2, parts, TruthFunction::Analogy, Rule::Analogy)
}

/// `M↔P`, `S↔M` ⊢ `S↔P`, in any of the four placements of M.
pub fn resemblance(ctx: &mut InferenceContext<'_>, j1: &Sentence, j2: &Sentence) -> Option<Sentence> {
    let (s1, s2) = (statement_of(j1)?, statement_of(j2)?);
    if !s1.is_symmetric() || !s2.is_symmetric() {
        return None;
    }
    let copula = s1.copula();
    let parts = if s1.subject() == s2.predicate() {
        (s2.subject().clone(), s1.predicate().clone(), copula)
    } else if s1.subject() == s2.subject() {
        (s2.predicate().clone(), s1.predicate().clone(), copula)
    } else if s1.predicate() == s2.predicate() {
        (s2.subject().clone(), s1.subject().clone(), copula)
    } else if s1.predicate() == s2.subject() {
        (s1.subject().clone(), s2.predicate().clone(), copula)
    } else {
        return None;
    };
    conclude(ctx, j1, j2, parts, TruthFunction::Resemblance, Rule::Resemblance)
}
