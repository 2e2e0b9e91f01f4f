//! # Sentences and Evidence
//!
//! A `Sentence` binds a statement term to a punctuation, an optional
//! evidential value and a `Stamp`. Sentences are values: once built they are
//! only cloned, never edited in place (the answer flag of a question is the
//! single exception and is flipped by the engine that owns it).
//!
//! ## Evidential Bases
//!
//! Every stamp carries the ids of the sentences its value was derived from.
//! Two sentences may only be combined when neither base contains the other's
//! id and the bases are disjoint. Events do not retain provenance, so an
//! event never reports overlap.
//!
//! ## Text Form
//!
//! `(<statement>)<punctuation> [tense] [%f;c%]`

use crate::primitives::{
    DEFAULT_CONFIDENCE, DEFAULT_FREQUENCY, MAX_EVIDENTIAL_BASE_LENGTH, TENSE_DURATION,
};
use crate::rules::Rule;
use crate::syntax::{Punctuation, Tense, STATEMENT_END, STATEMENT_START, TRUTH_VALUE_MARKER, VALUE_SEPARATOR};
use crate::term::parser::parse_term;
use crate::term::Term;
use crate::truth::EvidentialValue;
use crate::types::{IdSequence, SentenceId};
use crate::NarsError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

// =============================================================================
// EVIDENTIAL BASE
// =============================================================================

/// Bounded, ordered set of contributing sentence ids.
///
/// The first id is always the owning sentence's own id. Merging appends and
/// then drops the oldest ids until the base fits `MAX_EVIDENTIAL_BASE_LENGTH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidentialBase {
    ids: VecDeque<SentenceId>,
}

impl EvidentialBase {
    /// A base holding only `own`.
    #[must_use]
    pub fn new(own: SentenceId) -> Self {
        let mut ids = VecDeque::with_capacity(MAX_EVIDENTIAL_BASE_LENGTH);
        ids.push_back(own);
        Self { ids }
    }

    /// Append `other`'s ids, purging the oldest beyond the cap.
    pub fn merge(&mut self, other: &EvidentialBase) {
        self.ids.extend(other.ids.iter().copied());
        while self.ids.len() > MAX_EVIDENTIAL_BASE_LENGTH {
            self.ids.pop_front();
        }
    }

    #[must_use]
    pub fn contains(&self, id: SentenceId) -> bool {
        self.ids.contains(&id)
    }

    /// Whether the two bases share any id.
    #[must_use]
    pub fn overlaps(&self, other: &EvidentialBase) -> bool {
        self.ids.iter().any(|id| other.contains(*id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SentenceId> + '_ {
        self.ids.iter().copied()
    }
}

// =============================================================================
// STAMP
// =============================================================================

/// Identity, timing and provenance of one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    id: SentenceId,
    occurrence_time: Option<u64>,
    evidential_base: EvidentialBase,
    derived_by: Option<Rule>,
    parent_premises: Vec<SentenceId>,
    from_one_premise_inference: bool,
}

impl Stamp {
    /// A fresh stamp with no provenance.
    #[must_use]
    pub fn new(id: SentenceId, occurrence_time: Option<u64>) -> Self {
        Self {
            id,
            occurrence_time,
            evidential_base: EvidentialBase::new(id),
            derived_by: None,
            parent_premises: Vec::new(),
            from_one_premise_inference: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> SentenceId {
        self.id
    }

    #[must_use]
    pub const fn occurrence_time(&self) -> Option<u64> {
        self.occurrence_time
    }

    #[must_use]
    pub fn evidential_base(&self) -> &EvidentialBase {
        &self.evidential_base
    }

    #[must_use]
    pub const fn derived_by(&self) -> Option<Rule> {
        self.derived_by
    }

    #[must_use]
    pub fn parent_premises(&self) -> &[SentenceId] {
        &self.parent_premises
    }

    #[must_use]
    pub const fn is_from_one_premise_inference(&self) -> bool {
        self.from_one_premise_inference
    }

    pub(crate) fn merge_base(&mut self, other: &EvidentialBase) {
        self.evidential_base.merge(other);
    }

    pub(crate) fn set_provenance(&mut self, rule: Rule, parents: Vec<SentenceId>) {
        self.derived_by = Some(rule);
        self.parent_premises = parents;
    }

    pub(crate) fn mark_one_premise(&mut self) {
        self.from_one_premise_inference = true;
    }
}

// =============================================================================
// SENTENCE
// =============================================================================

/// Punctuation together with the value it carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SentenceKind {
    Judgment(EvidentialValue),
    Question,
    Goal(EvidentialValue),
}

impl SentenceKind {
    #[must_use]
    pub const fn punctuation(&self) -> Punctuation {
        match self {
            Self::Judgment(_) => Punctuation::Judgment,
            Self::Question => Punctuation::Question,
            Self::Goal(_) => Punctuation::Goal,
        }
    }

    /// Truth value of a judgment, desire value of a goal.
    #[must_use]
    pub const fn value(&self) -> Option<EvidentialValue> {
        match self {
            Self::Judgment(v) | Self::Goal(v) => Some(*v),
            Self::Question => None,
        }
    }

    /// The kind with the same punctuation and a new value.
    ///
    /// Questions stay questions.
    #[must_use]
    pub const fn with_value(&self, value: EvidentialValue) -> Self {
        match self {
            Self::Judgment(_) => Self::Judgment(value),
            Self::Goal(_) => Self::Goal(value),
            Self::Question => Self::Question,
        }
    }
}

/// A statement bound to punctuation, value and stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    statement: Term,
    kind: SentenceKind,
    stamp: Stamp,
    from_input: bool,
    needs_answer: bool,
}

impl Sentence {
    /// Build a sentence with a fresh stamp.
    #[must_use]
    pub fn new(
        statement: Term,
        kind: SentenceKind,
        id: SentenceId,
        occurrence_time: Option<u64>,
    ) -> Self {
        let needs_answer = matches!(kind, SentenceKind::Question);
        Self {
            statement,
            kind,
            stamp: Stamp::new(id, occurrence_time),
            from_input: false,
            needs_answer,
        }
    }

    #[must_use]
    pub fn statement(&self) -> &Term {
        &self.statement
    }

    #[must_use]
    pub const fn kind(&self) -> SentenceKind {
        self.kind
    }

    #[must_use]
    pub const fn punctuation(&self) -> Punctuation {
        self.kind.punctuation()
    }

    /// Stored value, without projection. `None` for questions.
    #[must_use]
    pub const fn value(&self) -> Option<EvidentialValue> {
        self.kind.value()
    }

    #[must_use]
    pub fn stamp(&self) -> &Stamp {
        &self.stamp
    }

    #[must_use]
    pub const fn id(&self) -> SentenceId {
        self.stamp.id
    }

    #[must_use]
    pub const fn occurrence_time(&self) -> Option<u64> {
        self.stamp.occurrence_time
    }

    /// Has an occurrence time.
    #[must_use]
    pub const fn is_event(&self) -> bool {
        self.stamp.occurrence_time.is_some()
    }

    #[must_use]
    pub const fn is_eternal(&self) -> bool {
        self.stamp.occurrence_time.is_none()
    }

    #[must_use]
    pub const fn is_judgment(&self) -> bool {
        matches!(self.kind, SentenceKind::Judgment(_))
    }

    #[must_use]
    pub const fn is_question(&self) -> bool {
        matches!(self.kind, SentenceKind::Question)
    }

    #[must_use]
    pub const fn is_goal(&self) -> bool {
        matches!(self.kind, SentenceKind::Goal(_))
    }

    /// Submitted from outside rather than derived.
    #[must_use]
    pub const fn is_from_input(&self) -> bool {
        self.from_input
    }

    /// A question that has not been answered yet.
    #[must_use]
    pub const fn needs_answer(&self) -> bool {
        self.needs_answer
    }

    pub(crate) fn mark_answered(&mut self) {
        self.needs_answer = false;
    }

    pub(crate) fn mark_from_input(&mut self) {
        self.from_input = true;
    }

    pub(crate) fn stamp_mut(&mut self) -> &mut Stamp {
        &mut self.stamp
    }

    #[cfg(test)]
    pub(crate) fn with_occurrence_time(mut self, occurrence_time: Option<u64>) -> Self {
        self.stamp.occurrence_time = occurrence_time;
        self
    }

    /// Tense relative to `cycle`.
    #[must_use]
    pub fn tense_at(&self, cycle: u64) -> Tense {
        match self.stamp.occurrence_time {
            None => Tense::Eternal,
            Some(t) if t < cycle => Tense::Past,
            Some(t) if t > cycle => Tense::Future,
            Some(_) => Tense::Present,
        }
    }

    /// Render with the tense marker relative to `cycle`.
    #[must_use]
    pub fn render_at(&self, cycle: u64) -> String {
        self.render(self.tense_at(cycle))
    }

    /// Render without any tense marker.
    #[must_use]
    pub fn render_eternal(&self) -> String {
        self.render(Tense::Eternal)
    }

    fn render(&self, tense: Tense) -> String {
        let mut text = format!("{}{}", self.statement, self.punctuation());
        if tense != Tense::Eternal {
            text.push(' ');
            text.push_str(tense.symbol());
        }
        if let Some(value) = self.value() {
            text.push(' ');
            text.push_str(&value.to_string());
        }
        text
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tense = match self.stamp.occurrence_time {
            Some(_) => Tense::Present,
            None => Tense::Eternal,
        };
        f.write_str(&self.render(tense))
    }
}

// =============================================================================
// INTERACTION
// =============================================================================

/// Whether `j1` and `j2` may be combined in inference.
///
/// False for the same sentence, when either base contains the other's id,
/// or when the bases overlap. An event `j1` never reports overlap.
#[must_use]
pub fn may_interact(j1: &Sentence, j2: &Sentence) -> bool {
    if j1.id() == j2.id() {
        return false;
    }
    let base1 = j1.stamp.evidential_base();
    let base2 = j2.stamp.evidential_base();
    if base2.contains(j1.id()) || base1.contains(j2.id()) {
        return false;
    }
    j1.is_event() || !base1.overlaps(base2)
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse one sentence of Narsese text.
///
/// A present-tense marker sets the occurrence time to `cycle`. Past and
/// future markers place it `TENSE_DURATION` cycles before or after, not
/// earlier than cycle 0. A judgment or goal
/// with no value block gets the default value. An id is drawn from `ids`
/// only when parsing succeeds.
pub fn parse_sentence(
    text: &str,
    ids: &mut IdSequence,
    cycle: u64,
) -> Result<Sentence, NarsError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    let start = compact
        .find(STATEMENT_START)
        .ok_or_else(|| NarsError::syntax(format!("missing statement start in '{}'", text)))?;
    let end = compact
        .rfind(STATEMENT_END)
        .ok_or_else(|| NarsError::syntax(format!("missing statement end in '{}'", text)))?;
    if start != 0 || end < start {
        return Err(NarsError::syntax(format!(
            "sentence must begin with a statement: '{}'",
            text
        )));
    }

    let statement = parse_term(&compact[..=end])?;
    if !statement.is_sentence_term() {
        return Err(NarsError::syntax(format!(
            "'{}' is not a statement or higher-order compound",
            statement
        )));
    }

    let mut rest = compact[end + 1..].chars();
    let punctuation = rest
        .next()
        .and_then(Punctuation::from_symbol)
        .ok_or_else(|| NarsError::syntax(format!("missing or unknown punctuation in '{}'", text)))?;
    let mut rest: String = rest.collect();

    let mut tense = Tense::Eternal;
    for marked in Tense::MARKED {
        if let Some(at) = rest.find(marked.symbol()) {
            tense = marked;
            rest.replace_range(at..at + marked.symbol().len(), "");
            break;
        }
    }

    let value = match rest.find(TRUTH_VALUE_MARKER) {
        Some(open) => {
            let close = rest
                .rfind(TRUTH_VALUE_MARKER)
                .filter(|close| *close > open)
                .ok_or_else(|| NarsError::syntax(format!("unterminated value block in '{}'", text)))?;
            if open != 0 || close != rest.len() - 1 {
                return Err(NarsError::syntax(format!(
                    "unexpected characters around value block in '{}'",
                    text
                )));
            }
            Some(parse_value(&rest[open + 1..close])?)
        }
        None if rest.is_empty() => None,
        None => {
            return Err(NarsError::syntax(format!(
                "unexpected trailing text '{}'",
                rest
            )));
        }
    };

    let value =
        value.unwrap_or_else(|| EvidentialValue::new(DEFAULT_FREQUENCY, DEFAULT_CONFIDENCE));
    let kind = match punctuation {
        Punctuation::Judgment => SentenceKind::Judgment(value),
        Punctuation::Question => SentenceKind::Question,
        Punctuation::Goal => SentenceKind::Goal(value),
    };
    let occurrence_time = match tense {
        Tense::Eternal => None,
        Tense::Present => Some(cycle),
        Tense::Past => Some(cycle.saturating_sub(TENSE_DURATION)),
        Tense::Future => Some(cycle + TENSE_DURATION),
    };

    Ok(Sentence::new(statement, kind, ids.next_id(), occurrence_time))
}

fn parse_value(block: &str) -> Result<EvidentialValue, NarsError> {
    let (f, c) = block
        .split_once(VALUE_SEPARATOR)
        .ok_or_else(|| NarsError::syntax(format!("value block '{}' needs 'f;c'", block)))?;
    let f: f64 = f
        .parse()
        .map_err(|_| NarsError::syntax(format!("invalid frequency '{}'", f)))?;
    let c: f64 = c
        .parse()
        .map_err(|_| NarsError::syntax(format!("invalid confidence '{}'", c)))?;
    EvidentialValue::checked(f, c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(text: &str) -> Term {
        parse_term(text).expect("term")
    }

    fn parse(text: &str) -> Sentence {
        let mut ids = IdSequence::new();
        parse_sentence(text, &mut ids, 10).expect("parse sentence")
    }

    #[test]
    fn judgment_with_value() {
        let s = parse("(bird --> animal). %0.8;0.7%");
        assert!(s.is_judgment());
        assert_eq!(s.statement().as_str(), "(bird --> animal)");
        let v = s.value().expect("value");
        assert!((v.frequency() - 0.8).abs() < 1e-12);
        assert!((v.confidence() - 0.7).abs() < 1e-12);
        assert!(s.is_eternal());
    }

    #[test]
    fn default_value_applies() {
        let s = parse("(bird --> animal)!");
        let v = s.value().expect("value");
        assert!((v.frequency() - 1.0).abs() < 1e-12);
        assert!((v.confidence() - 0.9).abs() < 1e-12);
        assert!(s.is_goal());
    }

    #[test]
    fn question_has_no_value_and_needs_answer() {
        let s = parse("(robin --> animal)?");
        assert!(s.value().is_none());
        assert!(s.needs_answer());
    }

    #[test]
    fn present_tense_sets_occurrence() {
        let s = parse("(rain --> now). :|: %1.0;0.9%");
        assert_eq!(s.occurrence_time(), Some(10));
        assert_eq!(s.tense_at(10), Tense::Present);
        assert_eq!(s.tense_at(12), Tense::Past);
        assert_eq!(s.render_at(12), "(rain --> now). :\\: %1.00;0.90%");
    }

    #[test]
    fn past_and_future_tenses_set_offset_occurrence() {
        let past = parse("(rain --> before). :\\:");
        assert_eq!(past.occurrence_time(), Some(10 - TENSE_DURATION));
        assert_eq!(past.tense_at(10), Tense::Past);

        let future = parse("(rain --> later)! :/: %0.9;0.8%");
        assert_eq!(future.occurrence_time(), Some(10 + TENSE_DURATION));
        assert_eq!(future.tense_at(10), Tense::Future);
        assert_eq!(future.render_at(10), "(rain --> later)! :/: %0.90;0.80%");

        let mut ids = IdSequence::new();
        let early = parse_sentence("(rain --> before). :\\:", &mut ids, 2).expect("parse");
        assert_eq!(early.occurrence_time(), Some(0));
    }

    #[test]
    fn malformed_sentences_rejected_without_consuming_ids() {
        let mut ids = IdSequence::new();
        for bad in [
            "bird --> animal.",
            "(bird --> animal)",
            "(bird --> animal);",
            "(bird --> animal). %0.5%",
            "(bird --> animal). %x;0.5%",
            "(bird --> animal). %0.5;0.9% junk",
            "x(bird --> animal).",
            "(bird).",
        ] {
            assert!(parse_sentence(bad, &mut ids, 0).is_err(), "accepted {}", bad);
        }
        assert_eq!(ids.peek(), 0);
    }

    #[test]
    fn display_form() {
        let s = parse("(a --> b). %1;0.9%");
        assert_eq!(s.to_string(), "(a --> b). %1.00;0.90%");
        let q = parse("(a --> b)?");
        assert_eq!(q.to_string(), "(a --> b)?");
    }

    #[test]
    fn base_merge_truncates_oldest() {
        let mut base = EvidentialBase::new(SentenceId(0));
        for i in 1..=40 {
            base.merge(&EvidentialBase::new(SentenceId(i)));
        }
        assert_eq!(base.len(), MAX_EVIDENTIAL_BASE_LENGTH);
        assert!(!base.contains(SentenceId(0)));
        assert!(base.contains(SentenceId(40)));
    }

    #[test]
    fn interaction_rules() {
        let mut ids = IdSequence::new();
        let a = parse_sentence("(a --> b).", &mut ids, 0).expect("a");
        let b = parse_sentence("(b --> c).", &mut ids, 0).expect("b");
        assert!(may_interact(&a, &b));
        assert!(!may_interact(&a, &a));

        let mut derived = Sentence::new(
            term("(a --> c)"),
            SentenceKind::Judgment(EvidentialValue::default()),
            ids.next_id(),
            None,
        );
        derived.stamp_mut().merge_base(a.stamp().evidential_base());
        assert!(!may_interact(&derived, &a));
        assert!(!may_interact(&a, &derived));
        assert!(may_interact(&derived, &b));
    }

    #[test]
    fn overlapping_bases_block_eternal_but_not_event() {
        let mut ids = IdSequence::new();
        let shared = parse_sentence("(x --> y).", &mut ids, 0).expect("shared");
        let mut left = parse_sentence("(a --> b).", &mut ids, 0).expect("left");
        let mut right = parse_sentence("(b --> c).", &mut ids, 0).expect("right");
        left.stamp_mut().merge_base(shared.stamp().evidential_base());
        right.stamp_mut().merge_base(shared.stamp().evidential_base());
        assert!(!may_interact(&left, &right));

        let event = left.clone().with_occurrence_time(Some(3));
        assert!(may_interact(&event, &right));
    }
}
