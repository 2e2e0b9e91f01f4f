//! # Memory
//!
//! The knowledge store: one `Concept` per distinct term, held in a bounded
//! concept bag keyed by the term's canonical string.
//!
//! ## Links
//!
//! Concepts never own each other. Every link is the linked concept's term,
//! stored in a bounded link bag and resolved through `Memory` on use. A link
//! whose concept has since been evicted resolves to nothing.
//!
//! - term links: bidirectional, between a compound or statement and each of
//!   its components
//! - subterm / superterm links: the directed halves of the same relation
//! - prediction links: from the subject of a higher-order statement to it
//! - explanation links: from the predicate of a higher-order statement to it
//!
//! ## Conceptualization
//!
//! Looking a term up with [`Memory::conceptualize`] creates its concept when
//! missing, recursively creating the concepts of its components first and
//! then wiring the links above. Variables never get concepts.

use crate::config::NarsConfig;
use crate::containers::{Bag, Budget, Table};
use crate::primitives::{IMPLICATION_LINK_PRIORITY, TERM_LINK_PRIORITY};
use crate::term::Term;
use rand::Rng;
use tracing::debug;

// =============================================================================
// CONCEPT
// =============================================================================

/// The link bags of a concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Term,
    Subterm,
    Superterm,
    Prediction,
    Explanation,
}

/// The knowledge unit for one term.
#[derive(Debug, Clone)]
pub struct Concept {
    term: Term,
    beliefs: Table,
    desires: Table,
    term_links: Bag<Term>,
    subterm_links: Bag<Term>,
    superterm_links: Bag<Term>,
    prediction_links: Bag<Term>,
    explanation_links: Bag<Term>,
}

impl Concept {
    fn new(term: Term, config: &NarsConfig) -> Self {
        let links = || Bag::new(config.concept_link_capacity, config.bag_granularity);
        Self {
            term,
            beliefs: Table::new(config.table_capacity),
            desires: Table::new(config.table_capacity),
            term_links: links(),
            subterm_links: links(),
            superterm_links: links(),
            prediction_links: links(),
            explanation_links: links(),
        }
    }

    #[must_use]
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Judgments about this concept's term.
    #[must_use]
    pub fn beliefs(&self) -> &Table {
        &self.beliefs
    }

    /// Goals for this concept's term.
    #[must_use]
    pub fn desires(&self) -> &Table {
        &self.desires
    }

    pub(crate) fn beliefs_mut(&mut self) -> &mut Table {
        &mut self.beliefs
    }

    pub(crate) fn desires_mut(&mut self) -> &mut Table {
        &mut self.desires
    }

    #[must_use]
    pub fn links(&self, kind: LinkKind) -> &Bag<Term> {
        match kind {
            LinkKind::Term => &self.term_links,
            LinkKind::Subterm => &self.subterm_links,
            LinkKind::Superterm => &self.superterm_links,
            LinkKind::Prediction => &self.prediction_links,
            LinkKind::Explanation => &self.explanation_links,
        }
    }

    fn links_mut(&mut self, kind: LinkKind) -> &mut Bag<Term> {
        match kind {
            LinkKind::Term => &mut self.term_links,
            LinkKind::Subterm => &mut self.subterm_links,
            LinkKind::Superterm => &mut self.superterm_links,
            LinkKind::Prediction => &mut self.prediction_links,
            LinkKind::Explanation => &mut self.explanation_links,
        }
    }

    /// Whether this concept may be the subject of semantic inference:
    /// a statement or a higher-order compound.
    #[must_use]
    pub fn is_sentence_concept(&self) -> bool {
        self.term.is_sentence_term()
    }
}

// =============================================================================
// MEMORY
// =============================================================================

/// Bounded set of concepts.
#[derive(Debug, Clone)]
pub struct Memory {
    config: NarsConfig,
    concepts: Bag<Concept>,
}

impl Memory {
    #[must_use]
    pub fn new(config: &NarsConfig) -> Self {
        Self {
            config: config.clone(),
            concepts: Bag::new(config.memory_concept_capacity, config.bag_granularity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// The concept named by `term`, if it exists.
    #[must_use]
    pub fn concept(&self, term: &Term) -> Option<&Concept> {
        self.concepts.get(term.as_str()).map(|item| item.value())
    }

    pub(crate) fn concept_mut(&mut self, term: &Term) -> Option<&mut Concept> {
        self.concepts.value_mut(term.as_str())
    }

    /// Budget of the concept named by `term`.
    #[must_use]
    pub fn budget(&self, term: &Term) -> Option<Budget> {
        self.concepts.get(term.as_str()).map(|item| item.budget())
    }

    /// All concepts, in no particular order.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.iter().map(|item| item.value())
    }

    /// A concept sampled by priority.
    pub fn random_concept<R: Rng>(&self, rng: &mut R) -> Option<&Concept> {
        self.concepts.peek_random(rng).map(|item| item.value())
    }

    /// The concept a link points at, sampled by link priority.
    pub fn follow_link<R: Rng>(&self, from: &Concept, kind: LinkKind, rng: &mut R) -> Option<&Concept> {
        let target = from.links(kind).peek_random(rng)?;
        self.concept(target.value())
    }

    // -------------------------------------------------------------------------
    // Budget adjustments
    // -------------------------------------------------------------------------

    /// Raise the priority of a concept that was just used.
    pub(crate) fn activate(&mut self, term: &Term) {
        self.concepts
            .strengthen_priority(term.as_str(), self.config.priority_strengthen_value);
    }

    pub(crate) fn strengthen_quality(&mut self, term: &Term) {
        self.concepts.strengthen_quality(term.as_str());
    }

    pub(crate) fn set_quality(&mut self, term: &Term, quality: f64) {
        self.concepts.change_quality(term.as_str(), quality);
    }

    pub(crate) fn decay(&mut self, term: &Term, multiplier: f64) {
        self.concepts.decay(term.as_str(), multiplier);
    }

    // -------------------------------------------------------------------------
    // Conceptualization
    // -------------------------------------------------------------------------

    /// Make sure `term` has a concept, creating it and its component
    /// concepts when needed. Returns whether the concept exists afterwards.
    pub fn conceptualize<R: Rng>(&mut self, term: &Term, rng: &mut R) -> bool {
        if term.is_variable() {
            return false;
        }
        if self.concepts.contains(term.as_str()) {
            return true;
        }

        let components: Vec<Term> = term
            .subterms()
            .iter()
            .filter(|t| !t.is_variable())
            .cloned()
            .collect();
        for component in &components {
            self.conceptualize(component, rng);
        }

        let concept = Concept::new(term.clone(), &self.config);
        if let Some((evicted, _)) = self.concepts.put_new(term.as_str().to_string(), concept, rng) {
            debug!(term = %evicted, "concept evicted");
        }
        debug!(term = %term, concepts = self.concepts.len(), "concept created");

        for component in &components {
            self.link_components(term, component, rng);
        }
        if let Some(statement) = term.as_statement().filter(|s| !s.is_first_order()) {
            self.link(statement.subject(), LinkKind::Prediction, term, IMPLICATION_LINK_PRIORITY, rng);
            self.link(statement.predicate(), LinkKind::Explanation, term, IMPLICATION_LINK_PRIORITY, rng);
        }
        self.concepts.contains(term.as_str())
    }

    /// Term links both ways, plus the sub/superterm pair.
    fn link_components<R: Rng>(&mut self, whole: &Term, part: &Term, rng: &mut R) {
        let already = self
            .concept(whole)
            .is_some_and(|c| c.term_links.contains(part.as_str()));
        if already {
            return;
        }
        self.link(whole, LinkKind::Term, part, TERM_LINK_PRIORITY, rng);
        self.link(part, LinkKind::Term, whole, TERM_LINK_PRIORITY, rng);
        self.link(whole, LinkKind::Subterm, part, TERM_LINK_PRIORITY, rng);
        self.link(part, LinkKind::Superterm, whole, TERM_LINK_PRIORITY, rng);
    }

    fn link<R: Rng>(&mut self, from: &Term, kind: LinkKind, to: &Term, priority: f64, rng: &mut R) {
        let Some(concept) = self.concepts.value_mut(from.as_str()) else {
            return;
        };
        let bag = concept.links_mut(kind);
        if bag.contains(to.as_str()) {
            return;
        }
        bag.put_new(to.as_str().to_string(), to.clone(), rng);
        bag.change_priority(to.as_str(), priority);
    }

    // -------------------------------------------------------------------------
    // Semantic relatedness
    // -------------------------------------------------------------------------

    /// A statement or higher-order concept related to the one named by
    /// `term` through shared components.
    ///
    /// First-order statements look at a term-linked component:
    /// - an atom: one of its term links
    /// - a first-order compound: one of its term links, if a statement
    /// - a higher-order compound or a statement: the component itself
    ///
    /// Higher-order statements look at a term-linked component's prediction
    /// or explanation links.
    ///
    /// Gives up after `related_concept_attempts` tries.
    pub fn semantically_related<R: Rng>(&self, term: &Term, rng: &mut R) -> Option<&Concept> {
        let concept = self.concept(term)?;
        if concept.term_links.is_empty() {
            return None;
        }
        let first_order = term.is_first_order();

        for _ in 0..self.config.related_concept_attempts {
            let Some(shared) = self.follow_link(concept, LinkKind::Term, rng) else {
                continue;
            };

            let related = if first_order {
                match shared.term() {
                    Term::Atomic(_) => self.follow_link(shared, LinkKind::Term, rng),
                    Term::Compound(c) if c.is_first_order() => self
                        .follow_link(shared, LinkKind::Term, rng)
                        .filter(|r| r.term().is_statement()),
                    Term::Compound(_) | Term::Statement(_) => Some(shared),
                    Term::Variable(_) => None,
                }
            } else {
                let predictions = !shared.prediction_links.is_empty();
                let explanations = !shared.explanation_links.is_empty();
                let kind = match (predictions, explanations) {
                    (false, false) => continue,
                    (true, false) => LinkKind::Prediction,
                    (false, true) => LinkKind::Explanation,
                    (true, true) if rng.gen_range(0..2) == 0 => LinkKind::Prediction,
                    (true, true) => LinkKind::Explanation,
                };
                self.follow_link(shared, kind, rng)
            };

            if let Some(related) = related.filter(|r| r.term() != term) {
                return Some(related);
            }
        }
        None
    }
}
