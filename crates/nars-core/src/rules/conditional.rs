//! # Conditional Rules
//!
//! Inference across a higher-order implication or equivalence, given a
//! premise matching one of its sides, and simplification of conjunctive
//! goals once one conjunct is believed.

use super::{is_forward_implication, statement_of, InferenceContext, Rule};
use crate::sentence::Sentence;
use crate::syntax::Connector;
use crate::term::{CompoundTerm, Term};
use crate::truth::TruthFunction;

/// `S`, `S <=> P` ⊢ `P`
pub fn conditional_analogy(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let equivalence = statement_of(j2)?;
    if !equivalence.copula().is_equivalence() {
        return None;
    }
    let statement = if j1.statement() == equivalence.subject() {
        equivalence.predicate().clone()
    } else if j1.statement() == equivalence.predicate() {
        equivalence.subject().clone()
    } else {
        return None;
    };
    ctx.conclude(j1, j2, statement, Some(TruthFunction::Analogy), Rule::ConditionalAnalogy)
}

/// `S ⇒ P`, `S` ⊢ `P`
pub fn conditional_judgment_deduction(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let implication = statement_of(j1)?;
    if !is_forward_implication(implication) || j2.statement() != implication.subject() {
        return None;
    }
    let statement = implication.predicate().clone();
    ctx.conclude(j1, j2, statement, Some(TruthFunction::Deduction), Rule::ConditionalJudgmentDeduction)
}

/// `S ⇒ P`, `P` ⊢ `S`
pub fn conditional_judgment_abduction(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let implication = statement_of(j1)?;
    if !is_forward_implication(implication) || j2.statement() != implication.predicate() {
        return None;
    }
    let statement = implication.subject().clone();
    ctx.conclude(j1, j2, statement, Some(TruthFunction::Abduction), Rule::ConditionalJudgmentAbduction)
}

/// `P!`, `S ⇒ P` ⊢ `S!`
pub fn conditional_goal_deduction(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let implication = statement_of(j2)?;
    if !j1.is_goal() || !is_forward_implication(implication) || j1.statement() != implication.predicate() {
        return None;
    }
    let statement = implication.subject().clone();
    ctx.conclude(j1, j2, statement, Some(TruthFunction::Deduction), Rule::ConditionalGoalDeduction)
}

/// `S!`, `S ⇒ P` ⊢ `P!`
pub fn conditional_goal_induction(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let implication = statement_of(j2)?;
    if !j1.is_goal() || !is_forward_implication(implication) || j1.statement() != implication.subject() {
        return None;
    }
    let statement = implication.predicate().clone();
    ctx.conclude(j1, j2, statement, Some(TruthFunction::Induction), Rule::ConditionalGoalInduction)
}

/// `(C &/ S)!`, `C` ⊢ `S!`
pub fn simplify_conjunctive_goal(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let conjunction = j1.statement().as_compound()?;
    if !j1.is_goal() || !conjunction.connector().is_conjunction() {
        return None;
    }
    let statement = without_subterm(conjunction, j2.statement())?;
    ctx.conclude(j1, j2, statement, Some(TruthFunction::Deduction), Rule::SimplifyConjunctiveGoal)
}

/// `(--,(A &/ B))!`, `A` ⊢ `(--,B)!`
pub fn simplify_negated_conjunctive_goal(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let negation = j1.statement().as_compound()?;
    if !j1.is_goal() || negation.connector() != Connector::Negation {
        return None;
    }
    let conjunction = negation.subterms().first()?.as_compound()?;
    if !conjunction.connector().is_conjunction() {
        return None;
    }
    let remaining = without_subterm(conjunction, j2.statement())?;
    let statement = Term::compound(Connector::Negation, vec![remaining]);
    ctx.conclude(j1, j2, statement, Some(TruthFunction::Induction), Rule::SimplifyNegatedConjunctiveGoal)
}

/// `((C1 && … && S) ⇒ P)`, `S` ⊢ `((C1 && …) ⇒ P)`
pub fn conditional_conjunctional_deduction(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let implication = statement_of(j1)?;
    if !is_forward_implication(implication) {
        return None;
    }
    let conjunction = implication.subject().as_compound()?;
    if !conjunction.connector().is_conjunction() {
        return None;
    }
    let subject = without_subterm(conjunction, j2.statement())?;
    let statement = Term::statement_with_interval(
        subject,
        implication.predicate().clone(),
        implication.copula(),
        implication.interval(),
    );
    ctx.conclude(
        j1,
        j2,
        statement,
        Some(TruthFunction::Deduction),
        Rule::ConditionalConjunctionalDeduction,
    )
}

/// `((C1 && … && S) ⇒ P)`, `((C1 && …) ⇒ P)` ⊢ `S`
///
/// The first premise's conjuncts must exceed the second's by exactly one.
pub fn conditional_conjunctional_abduction(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let (i1, i2) = (statement_of(j1)?, statement_of(j2)?);
    if !is_forward_implication(i1) || !is_forward_implication(i2) || i1.predicate() != i2.predicate() {
        return None;
    }
    let conjuncts2 = conjuncts(i2.subject());
    let mut difference = conjuncts(i1.subject())
        .into_iter()
        .filter(|t| !conjuncts2.contains(t));
    let statement = difference.next()?.clone();
    if difference.next().is_some() {
        return None;
    }
    ctx.conclude(
        j1,
        j2,
        statement,
        Some(TruthFunction::Abduction),
        Rule::ConditionalConjunctionalAbduction,
    )
}

/// Subterms of a conjunction, or the term itself.
pub(crate) fn conjuncts(term: &Term) -> Vec<&Term> {
    match term.as_compound() {
        Some(c) if c.connector().is_conjunction() => c.subterms().iter().collect(),
        _ => vec![term],
    }
}

/// The conjunction with `removed` taken out.
///
/// One remaining conjunct stands alone. The gap following the removed
/// conjunct (or preceding it, for the last one) goes with it.
fn without_subterm(conjunction: &CompoundTerm, removed: &Term) -> Option<Term> {
    let subterms = conjunction.subterms();
    let index = subterms.iter().position(|t| t == removed)?;
    let mut remaining = subterms.to_vec();
    remaining.remove(index);
    match remaining.len() {
        0 => None,
        1 => remaining.pop(),
        _ => {
            let mut intervals = conjunction.intervals().to_vec();
            if !intervals.is_empty() {
                intervals.remove(index.min(intervals.len() - 1));
            }
            Some(Term::compound_with_intervals(conjunction.connector(), remaining, intervals))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::*;

    #[test]
    fn judgment_deduction_and_abduction() {
        let mut fx = Fixture::new();
        let rule = fx.sentence("((rain --> now) ==> (wet --> ground)). %1.0;0.9%");
        let rain = fx.sentence("(rain --> now). %1.0;0.9%");
        let wet = fx.sentence("(wet --> ground). %1.0;0.9%");

        let d = conditional_judgment_deduction(&mut fx.ctx(), &rule, &rain).expect("deduction");
        assert_eq!(d.statement().as_str(), "(wet --> ground)");
        assert_value(&d, 1.0, 0.81);

        let a = conditional_judgment_abduction(&mut fx.ctx(), &rule, &wet).expect("abduction");
        assert_eq!(a.statement().as_str(), "(rain --> now)");

        assert!(conditional_judgment_deduction(&mut fx.ctx(), &rule, &wet).is_none());
    }

    #[test]
    fn analogy_across_equivalence() {
        let mut fx = Fixture::new();
        let eq = fx.sentence("((a --> b) <=> (c --> d)).");
        let side = fx.sentence("(c --> d).");
        let r = conditional_analogy(&mut fx.ctx(), &side, &eq).expect("analogy");
        assert_eq!(r.statement().as_str(), "(a --> b)");
    }

    #[test]
    fn goal_deduction_and_induction() {
        let mut fx = Fixture::new();
        let goal = fx.sentence("(food --> eaten)! %1.0;0.9%");
        let rule = fx.sentence("(((*,{SELF}) --> ^eat) =/> (food --> eaten)).");
        let sub = conditional_goal_deduction(&mut fx.ctx(), &goal, &rule).expect("goal deduction");
        assert!(sub.is_goal());
        assert_eq!(sub.statement().as_str(), "((*,{SELF}) --> ^eat)");

        let op_goal = fx.sentence("((*,{SELF}) --> ^eat)!");
        let up = conditional_goal_induction(&mut fx.ctx(), &op_goal, &rule).expect("goal induction");
        assert_eq!(up.statement().as_str(), "(food --> eaten)");
    }

    #[test]
    fn conjunctive_goal_simplification() {
        let mut fx = Fixture::new();
        let goal = fx.sentence("(&/,(a --> b),3,(c --> d),5,(e --> f))!");
        let belief = fx.sentence("(a --> b).");
        let r = simplify_conjunctive_goal(&mut fx.ctx(), &goal, &belief).expect("simplified");
        assert_eq!(r.statement().as_str(), "(&/,(c --> d),(e --> f))");
        assert_eq!(r.statement().as_compound().expect("compound").intervals(), &[5]);

        let pair = fx.sentence("(&/,(a --> b),(c --> d))!");
        let r = simplify_conjunctive_goal(&mut fx.ctx(), &pair, &belief).expect("simplified");
        assert_eq!(r.statement().as_str(), "(c --> d)");

        let stranger = fx.sentence("(x --> y).");
        assert!(simplify_conjunctive_goal(&mut fx.ctx(), &pair, &stranger).is_none());
    }

    #[test]
    fn negated_conjunctive_goal() {
        let mut fx = Fixture::new();
        let goal = fx.sentence("(--,(&/,(a --> b),(c --> d)))!");
        let belief = fx.sentence("(a --> b).");
        let r = simplify_negated_conjunctive_goal(&mut fx.ctx(), &goal, &belief).expect("simplified");
        assert_eq!(r.statement().as_str(), "(--,(c --> d))");
        assert!(r.is_goal());
    }

    #[test]
    fn conjunctional_deduction_and_abduction() {
        let mut fx = Fixture::new();
        let big = fx.sentence("((&&,(a --> b),(c --> d)) ==> (e --> f)).");
        let part = fx.sentence("(a --> b).");
        let r = conditional_conjunctional_deduction(&mut fx.ctx(), &big, &part).expect("deduction");
        assert_eq!(r.statement().as_str(), "((c --> d) ==> (e --> f))");

        let small = fx.sentence("((c --> d) ==> (e --> f)).");
        let s = conditional_conjunctional_abduction(&mut fx.ctx(), &big, &small).expect("abduction");
        assert_eq!(s.statement().as_str(), "(a --> b)");
        assert!(conditional_conjunctional_abduction(&mut fx.ctx(), &small, &big).is_none());
    }
}
