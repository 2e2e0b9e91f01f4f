//! # Term Model
//!
//! Immutable symbolic expressions of Narsese:
//! - `Atomic`: a validated name (`bird`, `^open`, `SELF`)
//! - `Variable`: `#x`, `#y(#x)`, `?q`
//! - `Compound`: a connector over subterms (`(&&,A,B)`, `{SELF}`)
//! - `Statement`: subject, copula, predicate (`(bird --> animal)`)
//!
//! ## Identity
//!
//! Every term renders to one canonical string at construction time and that
//! string IS its identity: `Eq`, `Hash` and `Ord` all delegate to it.
//! Order-invariant compounds and symmetric statements sort their subterms by
//! string before rendering, so structurally identical sets, intersections and
//! similarities compare equal no matter how they were written.
//!
//! Intervals of temporal conjunctions and statements are carried on the term
//! but are not part of the rendering.
//!
//! Subterms are shared through `Arc`, so cloning a term is cheap.

pub mod parser;

pub use parser::parse_term;

use crate::NarsError;
use crate::primitives::SELF_TERM_NAME;
use crate::syntax::{Connector, Copula, QUERY_SYMBOL, VARIABLE_SYMBOL, is_valid_atom_char};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// =============================================================================
// TERM
// =============================================================================

/// A Narsese term.
#[derive(Clone)]
pub enum Term {
    Atomic(Arc<str>),
    Variable(Arc<VariableTerm>),
    Compound(Arc<CompoundTerm>),
    Statement(Arc<StatementTerm>),
}

/// Kind of a variable term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// `#x` without a dependency list.
    Independent,
    /// `#y(#x)`: depends on the listed independent variables.
    Dependent,
    /// `?x`
    Query,
}

/// A variable, optionally depending on independent variables.
#[derive(Debug)]
pub struct VariableTerm {
    kind: VariableKind,
    name: String,
    dependencies: Vec<Term>,
    repr: String,
}

/// A connector applied to an ordered (or order-normalized) list of subterms.
#[derive(Debug)]
pub struct CompoundTerm {
    connector: Connector,
    subterms: Vec<Term>,
    intervals: Vec<u32>,
    is_operation: bool,
    complexity: usize,
    repr: String,
}

/// `(subject copula predicate)`.
#[derive(Debug)]
pub struct StatementTerm {
    terms: [Term; 2],
    copula: Copula,
    interval: u32,
    is_operation: bool,
    complexity: usize,
    repr: String,
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl Term {
    /// Build an atomic term, validating its name.
    pub fn atomic(name: &str) -> Result<Self, NarsError> {
        if name.is_empty() {
            return Err(NarsError::syntax("empty atomic term"));
        }
        if let Some(bad) = name.chars().find(|c| !is_valid_atom_char(*c)) {
            return Err(NarsError::syntax(format!(
                "invalid character '{}' in atomic term '{}'",
                bad, name
            )));
        }
        Ok(Self::Atomic(Arc::from(name)))
    }

    /// Build a variable term.
    pub fn variable(
        kind: VariableKind,
        name: &str,
        dependencies: Vec<Term>,
    ) -> Result<Self, NarsError> {
        if name.is_empty() || !name.chars().all(is_valid_atom_char) {
            return Err(NarsError::syntax(format!("invalid variable name '{}'", name)));
        }
        let symbol = match kind {
            VariableKind::Query => QUERY_SYMBOL,
            VariableKind::Independent | VariableKind::Dependent => VARIABLE_SYMBOL,
        };
        let mut repr = format!("{}{}", symbol, name);
        if !dependencies.is_empty() {
            let deps: Vec<&str> = dependencies.iter().map(Term::as_str).collect();
            repr.push('(');
            repr.push_str(&deps.join(","));
            repr.push(')');
        }
        Ok(Self::Variable(Arc::new(VariableTerm {
            kind,
            name: name.to_string(),
            dependencies,
            repr,
        })))
    }

    /// Build a compound term with default intervals.
    #[must_use]
    pub fn compound(connector: Connector, subterms: Vec<Term>) -> Self {
        Self::compound_with_intervals(connector, subterms, Vec::new())
    }

    /// Build a compound term.
    ///
    /// - A set of more than one element becomes an intersection of singleton
    ///   sets: `{a,b}` is `(|,{a},{b})`, `[a,b]` is `(&,[a],[b])`.
    /// - Sequential conjunctions keep `intervals` (padded with 1 to one fewer
    ///   than the subterms); parallel conjunctions always use 0.
    /// - Order-invariant connectors sort subterms by their rendering.
    #[must_use]
    pub fn compound_with_intervals(
        connector: Connector,
        mut subterms: Vec<Term>,
        intervals: Vec<u32>,
    ) -> Self {
        if connector.is_set() && subterms.len() > 1 {
            let joined = match connector {
                Connector::ExtensionalSet => Connector::IntensionalIntersection,
                _ => Connector::ExtensionalIntersection,
            };
            let singletons = subterms
                .into_iter()
                .map(|t| Self::compound(connector, vec![t]))
                .collect();
            return Self::compound(joined, singletons);
        }

        let gaps = subterms.len().saturating_sub(1);
        let intervals = match connector {
            Connector::SequentialConjunction => {
                let mut given = intervals;
                given.resize(gaps, 1);
                given
            }
            Connector::ParallelConjunction => vec![0; gaps],
            _ => Vec::new(),
        };

        if connector.is_order_invariant() {
            subterms.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        }

        let is_operation = subterms.len() > 1 && subterms.iter().all(Term::is_op);
        let complexity = 1 + subterms.iter().map(Term::complexity).sum::<usize>();

        let body: Vec<&str> = subterms.iter().map(Term::as_str).collect();
        let repr = match connector.set_end() {
            Some(end) => format!("{}{}{}", connector.symbol(), body.join(","), end),
            None => format!("({},{})", connector.symbol(), body.join(",")),
        };

        Self::Compound(Arc::new(CompoundTerm {
            connector,
            subterms,
            intervals,
            is_operation,
            complexity,
            repr,
        }))
    }

    /// Build a statement with no interval.
    #[must_use]
    pub fn statement(subject: Term, predicate: Term, copula: Copula) -> Self {
        Self::statement_with_interval(subject, predicate, copula, 0)
    }

    /// Build a statement. Symmetric copulas sort subject and predicate.
    #[must_use]
    pub fn statement_with_interval(
        subject: Term,
        predicate: Term,
        copula: Copula,
        interval: u32,
    ) -> Self {
        let (subject, predicate) =
            if copula.is_symmetric() && subject.as_str() > predicate.as_str() {
                (predicate, subject)
            } else {
                (subject, predicate)
            };

        let is_operation = subject
            .as_compound()
            .filter(|c| c.connector == Connector::Product)
            .and_then(|c| c.subterms.first())
            .is_some_and(is_self_set);
        let complexity = 1 + subject.complexity() + predicate.complexity();
        let repr = format!("({} {} {})", subject, copula.symbol(), predicate);

        Self::Statement(Arc::new(StatementTerm {
            terms: [subject, predicate],
            copula,
            interval,
            is_operation,
            complexity,
            repr,
        }))
    }

    /// `(--,self)`, or the inner term when `self` is already a negation.
    #[must_use]
    pub fn negated(&self) -> Self {
        match self.as_compound() {
            Some(c) if c.connector == Connector::Negation && c.subterms.len() == 1 => {
                c.subterms[0].clone()
            }
            _ => Self::compound(Connector::Negation, vec![self.clone()]),
        }
    }

    /// The operation statement `((*,{SELF}) --> name)`.
    pub fn operation(name: &str) -> Result<Self, NarsError> {
        let self_set = Self::compound(Connector::ExtensionalSet, vec![Self::atomic(SELF_TERM_NAME)?]);
        let product = Self::compound(Connector::Product, vec![self_set]);
        Ok(Self::statement(product, Self::atomic(name)?, Copula::Inheritance))
    }
}

fn is_self_set(term: &Term) -> bool {
    term.as_compound().is_some_and(|c| {
        c.connector == Connector::ExtensionalSet
            && c.subterms.len() == 1
            && c.subterms[0].as_str() == SELF_TERM_NAME
    })
}

// =============================================================================
// ACCESSORS
// =============================================================================

impl Term {
    /// The canonical rendering, which is also the identity key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Atomic(name) => name.as_ref(),
            Self::Variable(v) => v.repr.as_str(),
            Self::Compound(c) => c.repr.as_str(),
            Self::Statement(s) => s.repr.as_str(),
        }
    }

    /// Syntactic complexity: 1 per atom, connector or copula.
    #[must_use]
    pub fn complexity(&self) -> usize {
        match self {
            Self::Atomic(_) => 1,
            Self::Variable(v) => 1 + v.dependencies.len(),
            Self::Compound(c) => c.complexity,
            Self::Statement(s) => s.complexity,
        }
    }

    /// Immediate subterms. Atoms and variables have none.
    #[must_use]
    pub fn subterms(&self) -> &[Term] {
        match self {
            Self::Atomic(_) | Self::Variable(_) => &[],
            Self::Compound(c) => &c.subterms,
            Self::Statement(s) => &s.terms,
        }
    }

    #[must_use]
    pub fn as_compound(&self) -> Option<&CompoundTerm> {
        match self {
            Self::Compound(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_statement(&self) -> Option<&StatementTerm> {
        match self {
            Self::Statement(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_variable(&self) -> Option<&VariableTerm> {
        match self {
            Self::Variable(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_atomic(&self) -> bool {
        matches!(self, Self::Atomic(_))
    }

    #[must_use]
    pub const fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(self, Self::Compound(_))
    }

    #[must_use]
    pub const fn is_statement(&self) -> bool {
        matches!(self, Self::Statement(_))
    }

    /// The connector of a compound term.
    #[must_use]
    pub fn connector(&self) -> Option<Connector> {
        self.as_compound().map(|c| c.connector)
    }

    /// The copula of a statement term.
    #[must_use]
    pub fn copula(&self) -> Option<Copula> {
        self.as_statement().map(|s| s.copula)
    }

    /// Atoms and variables are first-order; compounds and statements follow
    /// their connector or copula.
    #[must_use]
    pub fn is_first_order(&self) -> bool {
        match self {
            Self::Atomic(_) | Self::Variable(_) => true,
            Self::Compound(c) => c.connector.is_first_order(),
            Self::Statement(s) => s.copula.is_first_order(),
        }
    }

    /// A term that may stand as the content of a sentence: a statement or a
    /// higher-order compound.
    #[must_use]
    pub fn is_sentence_term(&self) -> bool {
        match self {
            Self::Statement(_) => true,
            Self::Compound(c) => !c.connector.is_first_order(),
            Self::Atomic(_) | Self::Variable(_) => false,
        }
    }

    /// Whether this term is an executable operation.
    #[must_use]
    pub fn is_op(&self) -> bool {
        match self {
            Self::Atomic(_) | Self::Variable(_) => false,
            Self::Compound(c) => c.is_operation,
            Self::Statement(s) => s.is_operation,
        }
    }

    /// Whether this term is or contains an operation.
    #[must_use]
    pub fn contains_op(&self) -> bool {
        match self {
            Self::Atomic(_) | Self::Variable(_) => false,
            Self::Compound(c) => c.subterms.iter().any(Term::is_op),
            Self::Statement(s) => {
                s.is_operation
                    || (!s.copula.is_first_order()
                        && (s.terms[0].contains_op() || s.terms[1].contains_op()))
            }
        }
    }

    /// Whether a variable symbol appears anywhere in the term.
    #[must_use]
    pub fn contains_variable(&self) -> bool {
        self.as_str()
            .chars()
            .any(|c| c == VARIABLE_SYMBOL || c == QUERY_SYMBOL)
    }

    /// Whether this is a negation compound.
    #[must_use]
    pub fn is_negation(&self) -> bool {
        self.connector() == Some(Connector::Negation)
    }

    /// Whether this is a conjunction-family compound.
    #[must_use]
    pub fn is_conjunction(&self) -> bool {
        self.connector().is_some_and(Connector::is_conjunction)
    }
}

impl VariableTerm {
    #[must_use]
    pub const fn kind(&self) -> VariableKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn dependencies(&self) -> &[Term] {
        &self.dependencies
    }
}

impl CompoundTerm {
    #[must_use]
    pub const fn connector(&self) -> Connector {
        self.connector
    }

    #[must_use]
    pub fn subterms(&self) -> &[Term] {
        &self.subterms
    }

    /// Temporal gaps between consecutive subterms of a conjunction.
    #[must_use]
    pub fn intervals(&self) -> &[u32] {
        &self.intervals
    }

    #[must_use]
    pub fn is_first_order(&self) -> bool {
        self.connector.is_first_order()
    }
}

impl StatementTerm {
    #[must_use]
    pub fn subject(&self) -> &Term {
        &self.terms[0]
    }

    #[must_use]
    pub fn predicate(&self) -> &Term {
        &self.terms[1]
    }

    #[must_use]
    pub const fn copula(&self) -> Copula {
        self.copula
    }

    /// Cycles between subject and predicate events for temporal copulas.
    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    #[must_use]
    pub const fn is_first_order(&self) -> bool {
        self.copula.is_first_order()
    }

    #[must_use]
    pub const fn is_symmetric(&self) -> bool {
        self.copula.is_symmetric()
    }
}

// =============================================================================
// INTERVAL LAYOUT
// =============================================================================

// Intervals are not part of a term's rendering, so they travel separately
// when a term is stored.
impl Term {
    /// Every interval in the term, in pre-order: a statement's interval or a
    /// compound's interval list, then those of its subterms left to right.
    #[must_use]
    pub fn interval_layout(&self) -> Vec<u32> {
        let mut layout = Vec::new();
        self.collect_intervals(&mut layout);
        layout
    }

    fn collect_intervals(&self, layout: &mut Vec<u32>) {
        match self {
            Self::Atomic(_) | Self::Variable(_) => {}
            Self::Compound(c) => {
                layout.extend_from_slice(&c.intervals);
                for subterm in &c.subterms {
                    subterm.collect_intervals(layout);
                }
            }
            Self::Statement(s) => {
                layout.push(s.interval);
                for subterm in &s.terms {
                    subterm.collect_intervals(layout);
                }
            }
        }
    }

    /// The same term with the intervals of `layout` (see
    /// [`Term::interval_layout`]). `None` when the layout does not fit.
    #[must_use]
    pub fn with_interval_layout(&self, layout: &[u32]) -> Option<Self> {
        let mut values = layout.iter().copied();
        let term = self.apply_intervals(&mut values)?;
        values.next().is_none().then_some(term)
    }

    fn apply_intervals(&self, values: &mut impl Iterator<Item = u32>) -> Option<Self> {
        match self {
            Self::Atomic(_) | Self::Variable(_) => Some(self.clone()),
            Self::Compound(c) => {
                let intervals = c
                    .intervals
                    .iter()
                    .map(|_| values.next())
                    .collect::<Option<Vec<_>>>()?;
                let subterms = c
                    .subterms
                    .iter()
                    .map(|t| t.apply_intervals(values))
                    .collect::<Option<Vec<_>>>()?;
                Some(Self::compound_with_intervals(c.connector, subterms, intervals))
            }
            Self::Statement(s) => {
                let interval = values.next()?;
                let subject = s.terms[0].apply_intervals(values)?;
                let predicate = s.terms[1].apply_intervals(values)?;
                Some(Self::statement_with_interval(subject, predicate, s.copula, interval))
            }
        }
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Term({})", self.as_str())
    }
}

impl std::str::FromStr for Term {
    type Err = NarsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_term(s)
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_term(&text).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str) -> Term {
        Term::atomic(name).expect("atom")
    }

    #[test]
    fn atomic_rejects_invalid_characters() {
        assert!(Term::atomic("bird").is_ok());
        assert!(Term::atomic("^go").is_ok());
        assert!(Term::atomic("").is_err());
        assert!(Term::atomic("a-b").is_err());
    }

    #[test]
    fn statement_renders_with_spaces() {
        let t = Term::statement(atom("bird"), atom("animal"), Copula::Inheritance);
        assert_eq!(t.as_str(), "(bird --> animal)");
        assert_eq!(t.complexity(), 3);
        assert!(t.is_first_order());
    }

    #[test]
    fn symmetric_statement_is_canonical() {
        let a = Term::statement(atom("b"), atom("a"), Copula::Similarity);
        let b = Term::statement(atom("a"), atom("b"), Copula::Similarity);
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "(a <-> b)");
    }

    #[test]
    fn order_invariant_compound_sorts() {
        let a = Term::compound(Connector::ExtensionalIntersection, vec![atom("z"), atom("a")]);
        assert_eq!(a.as_str(), "(&,a,z)");
        let d = Term::compound(Connector::ExtensionalDifference, vec![atom("z"), atom("a")]);
        assert_eq!(d.as_str(), "(-,z,a)");
    }

    #[test]
    fn multi_element_sets_decompose() {
        let ext = Term::compound(Connector::ExtensionalSet, vec![atom("b"), atom("a")]);
        assert_eq!(ext.as_str(), "(|,{a},{b})");
        let int = Term::compound(Connector::IntensionalSet, vec![atom("b"), atom("a")]);
        assert_eq!(int.as_str(), "(&,[a],[b])");
        let single = Term::compound(Connector::ExtensionalSet, vec![atom("SELF")]);
        assert_eq!(single.as_str(), "{SELF}");
    }

    #[test]
    fn conjunction_intervals_default() {
        let seq = Term::compound(
            Connector::SequentialConjunction,
            vec![atom("a"), atom("b"), atom("c")],
        );
        assert_eq!(seq.as_compound().expect("compound").intervals(), &[1, 1]);
        let par = Term::compound(Connector::ParallelConjunction, vec![atom("a"), atom("b")]);
        assert_eq!(par.as_compound().expect("compound").intervals(), &[0]);
        let given = Term::compound_with_intervals(
            Connector::SequentialConjunction,
            vec![atom("a"), atom("b")],
            vec![5],
        );
        assert_eq!(given.as_compound().expect("compound").intervals(), &[5]);
        // intervals are not part of the identity
        assert_eq!(given, Term::compound(Connector::SequentialConjunction, vec![atom("a"), atom("b")]));
    }

    #[test]
    fn operation_flags() {
        let op = Term::operation("^open").expect("op");
        assert_eq!(op.as_str(), "((*,{SELF}) --> ^open)");
        assert!(op.is_op());

        let seq = Term::compound(
            Connector::SequentialConjunction,
            vec![op.clone(), Term::operation("^close").expect("op")],
        );
        assert!(seq.is_op());

        let mixed = Term::compound(
            Connector::SequentialConjunction,
            vec![op, Term::statement(atom("a"), atom("b"), Copula::Inheritance)],
        );
        assert!(!mixed.is_op());
        assert!(mixed.contains_op());
    }

    #[test]
    fn negation_unwraps_double_negation() {
        let s = Term::statement(atom("a"), atom("b"), Copula::Inheritance);
        let neg = s.negated();
        assert_eq!(neg.as_str(), "(--,(a --> b))");
        assert!(neg.is_negation());
        assert_eq!(neg.negated(), s);
    }

    #[test]
    fn complexity_sums_subterms() {
        let inner = Term::compound(Connector::Product, vec![atom("a"), atom("b")]);
        let s = Term::statement(inner, atom("r"), Copula::Inheritance);
        // copula + (connector + a + b) + r
        assert_eq!(s.complexity(), 5);
    }

    #[test]
    fn higher_order_classification() {
        let s = Term::statement(atom("a"), atom("b"), Copula::Inheritance);
        let imp = Term::statement(s.clone(), s.negated(), Copula::Implication);
        assert!(!imp.is_first_order());
        assert!(imp.is_sentence_term());
        let conj = Term::compound(Connector::Conjunction, vec![s.clone(), s.negated()]);
        assert!(conj.is_sentence_term());
        assert!(!atom("a").is_sentence_term());
    }

    #[test]
    fn variables_render_dependencies() {
        let x = Term::variable(VariableKind::Independent, "x", Vec::new()).expect("var");
        let y = Term::variable(VariableKind::Dependent, "y", vec![x.clone()]).expect("var");
        assert_eq!(x.as_str(), "#x");
        assert_eq!(y.as_str(), "#y(#x)");
        assert_eq!(y.complexity(), 2);
        assert!(y.contains_variable());
    }

    #[test]
    fn interval_layout_restores_lost_intervals() {
        let timed = parse_term("((&/,a,5,b) =/> c)").expect("parse");
        let layout = timed.interval_layout();
        let reparsed = parse_term(timed.as_str()).expect("reparse");
        assert_eq!(reparsed, timed);

        let restored = reparsed.with_interval_layout(&layout).expect("layout fits");
        let subject = restored.as_statement().expect("statement").subject();
        assert_eq!(subject.as_compound().expect("compound").intervals(), &[5]);
        assert_eq!(restored.interval_layout(), layout);

        assert!(reparsed.with_interval_layout(&[]).is_none());
        assert!(reparsed.with_interval_layout(&[1, 2, 3, 4]).is_none());
    }
}
