//! # Immediate Rules
//!
//! One-premise rewrites of a single sentence.

use super::{is_forward_implication, statement_of, InferenceContext, Rule};
use crate::sentence::Sentence;
use crate::syntax::{Connector, Copula, IMAGE_PLACEHOLDER};
use crate::term::Term;
use crate::truth;

/// `S` ⊢ `(--,S)`
pub fn negation(ctx: &mut InferenceContext<'_>, j: &Sentence) -> Option<Sentence> {
    let value = truth::negation(j.value()?);
    let statement = Term::compound(Connector::Negation, vec![j.statement().clone()]);
    ctx.conclude_one_premise(j, statement, Some(value), Rule::Negation)
}

/// `S→P` ⊢ `P→S`
///
/// A zero-frequency premise would yield zero confidence and is skipped.
pub fn conversion(ctx: &mut InferenceContext<'_>, j: &Sentence) -> Option<Sentence> {
    let statement = statement_of(j)?;
    let value = j.value()?;
    if statement.is_symmetric() || value.frequency() <= 0.0 {
        return None;
    }
    let converted = Term::statement_with_interval(
        statement.predicate().clone(),
        statement.subject().clone(),
        statement.copula(),
        statement.interval(),
    );
    let value = truth::conversion(value, ctx.config.k);
    ctx.conclude_one_premise(j, converted, Some(value), Rule::Conversion)
}

/// `S ⇒ P` ⊢ `(--,P) ⇒ (--,S)`
pub fn contraposition(ctx: &mut InferenceContext<'_>, j: &Sentence) -> Option<Sentence> {
    let statement = statement_of(j)?;
    if !is_forward_implication(statement) {
        return None;
    }
    let contraposed = Term::statement(
        statement.predicate().negated(),
        statement.subject().negated(),
        statement.copula(),
    );
    let value = truth::contraposition(j.value()?);
    ctx.conclude_one_premise(j, contraposed, Some(value), Rule::Contraposition)
}

/// `((*,S,…,P) --> R)` ⊢ `(S --> (/,R,_,…,P))`, … one per product position.
pub fn extensional_image(ctx: &mut InferenceContext<'_>, j: &Sentence) -> Vec<Sentence> {
    let Some(statement) = statement_of(j).filter(|s| s.copula() == Copula::Inheritance) else {
        return Vec::new();
    };
    let Some(product) = product_terms(statement.subject()) else {
        return Vec::new();
    };
    let relation = statement.predicate();
    images(product, relation, Connector::ExtensionalImage)
        .into_iter()
        .filter_map(|(term, image)| {
            let result = Term::statement(term, image, Copula::Inheritance);
            ctx.conclude_one_premise(j, result, None, Rule::ExtensionalImage)
        })
        .collect()
}

/// `(R --> (*,S,…,P))` ⊢ `((\,R,_,…,P) --> S)`, … one per product position.
pub fn intensional_image(ctx: &mut InferenceContext<'_>, j: &Sentence) -> Vec<Sentence> {
    let Some(statement) = statement_of(j).filter(|s| s.copula() == Copula::Inheritance) else {
        return Vec::new();
    };
    let Some(product) = product_terms(statement.predicate()) else {
        return Vec::new();
    };
    let relation = statement.subject();
    images(product, relation, Connector::IntensionalImage)
        .into_iter()
        .filter_map(|(term, image)| {
            let result = Term::statement(image, term, Copula::Inheritance);
            ctx.conclude_one_premise(j, result, None, Rule::IntensionalImage)
        })
        .collect()
}

fn product_terms(term: &Term) -> Option<&[Term]> {
    term.as_compound()
        .filter(|c| c.connector() == Connector::Product && c.subterms().len() > 1)
        .map(|c| c.subterms())
}

/// For each position: the term there, and the image with `_` in its place.
fn images(product: &[Term], relation: &Term, connector: Connector) -> Vec<(Term, Term)> {
    let Ok(placeholder) = Term::atomic(IMAGE_PLACEHOLDER) else {
        return Vec::new();
    };
    (0..product.len())
        .map(|position| {
            let mut subterms = Vec::with_capacity(product.len() + 1);
            subterms.push(relation.clone());
            for (i, t) in product.iter().enumerate() {
                subterms.push(if i == position {
                    placeholder.clone()
                } else {
                    t.clone()
                });
            }
            (product[position].clone(), Term::compound(connector, subterms))
        })
        .collect()
}
