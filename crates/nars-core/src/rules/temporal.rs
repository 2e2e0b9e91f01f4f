//! # Temporal Rules
//!
//! Two events combine into a conjunction, an implication or an equivalence.
//! Simultaneous events use the concurrent forms (`&|`, `=|>`, `<|>`);
//! otherwise the earlier event comes first and the gap between the two
//! becomes the interval of a sequential form (`&/`, `=/>`, `</>`).
//!
//! Both premises must carry an occurrence time, and an event is never
//! paired with its own statement.

use super::{InferenceContext, Rule};
use crate::sentence::Sentence;
use crate::syntax::{Connector, Copula};
use crate::term::Term;
use crate::truth::TruthFunction;

/// Events ordered earliest first, with their gap. `None` for eternal input.
fn ordered<'s>(j1: &'s Sentence, j2: &'s Sentence) -> Option<(&'s Sentence, &'s Sentence, u64)> {
    let (t1, t2) = (j1.occurrence_time()?, j2.occurrence_time()?);
    if j1.statement() == j2.statement() {
        return None;
    }
    Some(if t1 <= t2 {
        (j1, j2, t2 - t1)
    } else {
        (j2, j1, t1 - t2)
    })
}

fn interval(gap: u64) -> u32 {
    u32::try_from(gap).unwrap_or(u32::MAX)
}

/// `A`, `B` ⊢ `(&/,A,Δt,B)`, or `(&|,A,B)` when simultaneous.
pub fn temporal_intersection(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let (first, second, gap) = ordered(j1, j2)?;
    let subterms = vec![first.statement().clone(), second.statement().clone()];
    let statement = if gap == 0 {
        Term::compound(Connector::ParallelConjunction, subterms)
    } else {
        Term::compound_with_intervals(Connector::SequentialConjunction, subterms, vec![interval(gap)])
    };
    ctx.conclude(first, second, statement, Some(TruthFunction::Intersection), Rule::TemporalIntersection)
}

/// `A`, `B` ⊢ `A =/> B`, or `A =|> B` when simultaneous.
///
/// An operation is never the consequent.
pub fn temporal_induction(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let (first, second, gap) = ordered(j1, j2)?;
    if second.statement().is_op() {
        return None;
    }
    let copula = if gap == 0 {
        Copula::ConcurrentImplication
    } else {
        Copula::PredictiveImplication
    };
    let statement = Term::statement_with_interval(
        first.statement().clone(),
        second.statement().clone(),
        copula,
        interval(gap),
    );
    ctx.conclude(first, second, statement, Some(TruthFunction::Induction), Rule::TemporalInduction)
}

/// `A`, `B` ⊢ `A </> B`, or `A <|> B` when simultaneous.
pub fn temporal_comparison(
    ctx: &mut InferenceContext<'_>,
    j1: &Sentence,
    j2: &Sentence,
) -> Option<Sentence> {
    let (first, second, gap) = ordered(j1, j2)?;
    let statement = if gap == 0 {
        Term::statement(
            first.statement().clone(),
            second.statement().clone(),
            Copula::ConcurrentEquivalence,
        )
    } else {
        Term::statement_with_interval(
            first.statement().clone(),
            second.statement().clone(),
            Copula::PredictiveEquivalence,
            interval(gap),
        )
    };
    ctx.conclude(first, second, statement, Some(TruthFunction::Comparison), Rule::TemporalComparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::*;

    fn events(fx: &mut Fixture) -> (Sentence, Sentence) {
        fx.now = 2;
        let lightning = fx.sentence("(lightning --> seen). :|:");
        fx.now = 5;
        let thunder = fx.sentence("(thunder --> heard). :|:");
        (lightning, thunder)
    }

    #[test]
    fn sequential_conjunction_orders_by_time() {
        let mut fx = Fixture::new();
        let (lightning, thunder) = events(&mut fx);
        let r = temporal_intersection(&mut fx.ctx(), &thunder, &lightning).expect("intersection");
        let c = r.statement().as_compound().expect("compound");
        assert_eq!(c.connector(), Connector::SequentialConjunction);
        assert_eq!(c.subterms()[0], *lightning.statement());
        assert_eq!(c.intervals(), &[3]);
        assert!(r.is_event());
    }

    #[test]
    fn predictive_implication_is_eternal() {
        let mut fx = Fixture::new();
        let (lightning, thunder) = events(&mut fx);
        let r = temporal_induction(&mut fx.ctx(), &lightning, &thunder).expect("induction");
        assert_eq!(r.statement().as_str(), "((lightning --> seen) =/> (thunder --> heard))");
        assert_eq!(r.statement().as_statement().expect("statement").interval(), 3);
        assert!(r.is_eternal());
        assert_eq!(r.stamp().evidential_base().len(), 3);
    }

    #[test]
    fn simultaneous_events_use_concurrent_forms() {
        let mut fx = Fixture::new();
        fx.now = 4;
        let a = fx.sentence("(a --> b). :|:");
        let b = fx.sentence("(c --> d). :|:");
        let conj = temporal_intersection(&mut fx.ctx(), &a, &b).expect("intersection");
        assert_eq!(conj.statement().connector(), Some(Connector::ParallelConjunction));
        let eq = temporal_comparison(&mut fx.ctx(), &a, &b).expect("comparison");
        assert_eq!(eq.statement().copula(), Some(Copula::ConcurrentEquivalence));
        let imp = temporal_induction(&mut fx.ctx(), &a, &b).expect("induction");
        assert_eq!(imp.statement().copula(), Some(Copula::ConcurrentImplication));
    }

    #[test]
    fn rejects_eternal_self_and_operation_consequent() {
        let mut fx = Fixture::new();
        let eternal = fx.sentence("(a --> b).");
        let early_op = fx.sentence("((*,{SELF}) --> ^reach). :|:");
        fx.now = 1;
        let event = fx.sentence("(c --> d). :|:");
        let same = fx.sentence("(c --> d). :|:");
        assert!(temporal_intersection(&mut fx.ctx(), &eternal, &event).is_none());
        assert!(temporal_induction(&mut fx.ctx(), &event, &same).is_none());

        fx.now = 3;
        let late_op = fx.sentence("((*,{SELF}) --> ^press). :|:");
        assert!(temporal_induction(&mut fx.ctx(), &event, &late_op).is_none());
        assert!(temporal_induction(&mut fx.ctx(), &late_op, &event).is_none());

        let r = temporal_induction(&mut fx.ctx(), &event, &early_op).expect("induction");
        assert_eq!(
            r.statement().as_str(),
            "(((*,{SELF}) --> ^reach) =/> (c --> d))"
        );
    }
}
