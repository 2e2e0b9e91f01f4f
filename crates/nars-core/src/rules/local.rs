//! # Local Rules
//!
//! Rules over sentences about the same statement: revision merges evidence,
//! choice picks the better of two candidates, decision gates goal pursuit.
//! Eternalization and projection re-time a single sentence.

use super::{InferenceContext, Rule};
use crate::sentence::{Sentence, SentenceKind};
use crate::syntax::Connector;
use crate::term::Term;
use crate::truth::{self, TruthFunction};

/// Merge the evidence of two sentences about the same statement.
///
/// A sequential conjunction's intervals become the confidence-weighted mean
/// of the two premises' intervals.
pub fn revision(ctx: &mut InferenceContext<'_>, j1: &Sentence, j2: &Sentence) -> Option<Sentence> {
    if j1.statement() != j2.statement() || j1.is_question() || j2.is_question() {
        return None;
    }

    let statement = match j1.statement().as_compound() {
        Some(c) if c.connector() == Connector::SequentialConjunction => {
            let c1 = j1.value()?.confidence();
            let c2 = j2.value()?.confidence();
            let other = j2.statement().as_compound()?;
            let intervals = c
                .intervals()
                .iter()
                .zip(other.intervals())
                .map(|(i1, i2)| ((f64::from(*i1) * c1 + f64::from(*i2) * c2) / (c1 + c2)) as u32)
                .collect();
            Term::compound_with_intervals(c.connector(), c.subterms().to_vec(), intervals)
        }
        _ => j1.statement().clone(),
    };

    ctx.conclude(j1, j2, statement, Some(TruthFunction::Revision), Rule::Revision)
}

/// The better of two candidates.
///
/// Same statement (or `only_confidence`): higher projected confidence wins.
/// Otherwise higher expectation wins. Ties go to `j1`.
#[must_use]
pub fn choice<'s>(
    ctx: &InferenceContext<'_>,
    j1: &'s Sentence,
    j2: &'s Sentence,
    only_confidence: bool,
) -> &'s Sentence {
    let (Some(v1), Some(v2)) = (ctx.decayed_value(j1), ctx.decayed_value(j2)) else {
        return j1;
    };
    let prefer_j1 = if only_confidence || j1.statement() == j2.statement() {
        v1.confidence() >= v2.confidence()
    } else {
        v1.expectation() >= v2.expectation()
    };
    if prefer_j1 { j1 } else { j2 }
}

/// Whether a goal is desirable enough to pursue.
#[must_use]
pub fn decision(ctx: &InferenceContext<'_>, goal: &Sentence) -> bool {
    goal.is_goal() && ctx.expectation(goal) > ctx.config.decision_threshold
}

/// Eternal counterpart of an event.
pub fn eternalization(ctx: &mut InferenceContext<'_>, j: &Sentence) -> Option<Sentence> {
    let value = truth::eternalization(j.value()?, ctx.config.k);
    let mut result = Sentence::new(
        j.statement().clone(),
        j.kind().with_value(value),
        ctx.ids.next_id(),
        None,
    );
    result.stamp_mut().merge_base(j.stamp().evidential_base());
    result.stamp_mut().set_provenance(Rule::Eternalization, vec![j.id()]);
    Some(result)
}

/// An event moved to occurrence time `target`, its confidence decayed.
pub fn projection(ctx: &mut InferenceContext<'_>, j: &Sentence, target: u64) -> Option<Sentence> {
    let from = j.occurrence_time()?;
    let decay = match j.kind() {
        SentenceKind::Goal(_) => ctx.config.projection_decay_desire,
        _ => ctx.config.projection_decay_event,
    };
    let value = truth::projection(j.value()?, from, target, decay);
    let mut result = Sentence::new(
        j.statement().clone(),
        j.kind().with_value(value),
        ctx.ids.next_id(),
        Some(target),
    );
    result.stamp_mut().merge_base(j.stamp().evidential_base());
    result.stamp_mut().set_provenance(Rule::Projection, vec![j.id()]);
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::*;

    #[test]
    fn revision_of_opposite_evidence() {
        let mut fx = Fixture::new();
        let j1 = fx.sentence("(bird --> animal). %1.0;0.9%");
        let j2 = fx.sentence("(bird --> animal). %0.0;0.9%");
        let r = revision(&mut fx.ctx(), &j1, &j2).expect("revision");
        let v = r.value().expect("value");
        assert!((v.frequency() - 0.5).abs() < 1e-9);
        assert!(v.confidence() > 0.9);
        assert_eq!(r.stamp().derived_by(), Some(Rule::Revision));
    }

    #[test]
    fn revision_requires_same_statement() {
        let mut fx = Fixture::new();
        let j1 = fx.sentence("(bird --> animal).");
        let j2 = fx.sentence("(bird --> thing).");
        assert!(revision(&mut fx.ctx(), &j1, &j2).is_none());
    }

    #[test]
    fn revision_weights_sequence_intervals() {
        let mut fx = Fixture::new();
        let j1 = fx.sentence("(&/,(a --> b),2,(c --> d)). %1.0;0.5%");
        let j2 = fx.sentence("(&/,(a --> b),10,(c --> d)). %1.0;0.5%");
        assert_eq!(j1.statement(), j2.statement());
        let r = revision(&mut fx.ctx(), &j1, &j2).expect("revision");
        let c = r.statement().as_compound().expect("compound");
        assert_eq!(c.intervals(), &[6]);
    }

    #[test]
    fn choice_by_confidence_and_expectation() {
        let mut fx = Fixture::new();
        let strong = fx.sentence("(a --> b). %0.6;0.9%");
        let weak = fx.sentence("(a --> b). %1.0;0.5%");
        let other = fx.sentence("(a --> c). %1.0;0.5%");
        let ctx = fx.ctx();
        assert_eq!(choice(&ctx, &weak, &strong, false).id(), strong.id());
        // expectation 0.59 vs 0.75
        assert_eq!(choice(&ctx, &strong, &other, false).id(), other.id());
        assert_eq!(choice(&ctx, &strong, &other, true).id(), strong.id());
    }

    #[test]
    fn decision_threshold() {
        let mut fx = Fixture::new();
        let eager = fx.sentence("(a --> b)! %1.0;0.9%");
        let lukewarm = fx.sentence("(a --> b)! %0.6;0.5%");
        let belief = fx.sentence("(a --> b). %1.0;0.9%");
        let ctx = fx.ctx();
        assert!(decision(&ctx, &eager));
        assert!(!decision(&ctx, &lukewarm));
        assert!(!decision(&ctx, &belief));
    }

    #[test]
    fn eternalization_and_projection() {
        let mut fx = Fixture::new();
        fx.now = 3;
        let event = fx.sentence("(a --> b). :|: %1.0;0.9%");
        let eternal = eternalization(&mut fx.ctx(), &event).expect("eternal");
        assert!(eternal.is_eternal());
        assert_value(&eternal, 1.0, 0.9 / 1.9);
        assert!(eternal.stamp().evidential_base().contains(event.id()));

        let moved = projection(&mut fx.ctx(), &event, 5).expect("projected");
        assert_eq!(moved.occurrence_time(), Some(5));
        assert_value(&moved, 1.0, 0.9 * 0.95 * 0.95);
    }
}
