//! # Term Parser
//!
//! Turns Narsese term text into a [`Term`]. Whitespace is ignored.
//!
//! Recognition order:
//! 1. `(`: a statement if a copula sits at bracket depth 1, else a compound
//! 2. `{` / `[`: a set compound
//! 3. `#` / `?`: a variable with an optional `(deps)` list
//! 4. anything else: an atom, with `,<digits>` suffixes stripped

use super::{Term, VariableKind};
use crate::NarsError;
use crate::primitives::{MAX_SENTENCE_LENGTH, MAX_TERM_DEPTH};
use crate::syntax::{
    Connector, Copula, QUERY_SYMBOL, STATEMENT_END, STATEMENT_START, TERM_DIVIDER,
    VARIABLE_SYMBOL, is_set_bracket_end, is_set_bracket_start,
};

/// Parse a term from text.
pub fn parse_term(text: &str) -> Result<Term, NarsError> {
    if text.len() > MAX_SENTENCE_LENGTH {
        return Err(NarsError::syntax(format!(
            "input of {} bytes exceeds the {} byte limit",
            text.len(),
            MAX_SENTENCE_LENGTH
        )));
    }
    if let Some(c) = text.chars().find(|c| !c.is_ascii()) {
        return Err(NarsError::syntax(format!("non-ASCII character '{}'", c)));
    }
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    parse_compact(&compact, 0)
}

/// Find the last copula at bracket depth 1, with its byte index.
///
/// Expects whitespace-free ASCII text.
#[must_use]
pub fn find_top_level_copula(text: &str) -> Option<(Copula, usize)> {
    let bytes = text.as_bytes();
    let mut depth: i32 = 0;
    let mut found = None;
    for (i, &b) in bytes.iter().enumerate() {
        match b as char {
            STATEMENT_START => depth += 1,
            STATEMENT_END => depth -= 1,
            _ if depth == 1 && i + 3 <= bytes.len() => {
                if let Some(copula) = text.get(i..i + 3).and_then(Copula::from_symbol) {
                    found = Some((copula, i));
                }
            }
            _ => {}
        }
    }
    found
}

fn parse_compact(text: &str, depth: usize) -> Result<Term, NarsError> {
    if depth > MAX_TERM_DEPTH {
        return Err(NarsError::syntax("term nesting too deep"));
    }
    let Some(first) = text.chars().next() else {
        return Err(NarsError::syntax("empty term"));
    };

    if first == STATEMENT_START {
        if !text.ends_with(STATEMENT_END) {
            return Err(NarsError::syntax(format!(
                "compound or statement term must end with ')': {}",
                text
            )));
        }
        match find_top_level_copula(text) {
            Some((copula, index)) => parse_statement(text, copula, index, depth),
            None => parse_compound(text, depth),
        }
    } else if is_set_bracket_start(first) {
        parse_compound(text, depth)
    } else if first == VARIABLE_SYMBOL || first == QUERY_SYMBOL {
        parse_variable(text, first, depth)
    } else {
        Term::atomic(&strip_numeric_suffixes(text))
    }
}

fn parse_statement(
    text: &str,
    copula: Copula,
    index: usize,
    depth: usize,
) -> Result<Term, NarsError> {
    let subject_text = &text[1..index];
    let predicate_text = &text[index + 3..text.len() - 1];
    if subject_text.is_empty() || predicate_text.is_empty() {
        return Err(NarsError::syntax(format!(
            "statement is missing a subject or predicate: {}",
            text
        )));
    }

    // `((&/,a,b,5) =/> c)`: a trailing integer in the subject is the interval
    let interval = if copula.is_first_order() {
        0
    } else {
        subject_text
            .rsplit(TERM_DIVIDER)
            .next()
            .and_then(|last| last.strip_suffix(STATEMENT_END))
            .and_then(|digits| digits.parse::<u32>().ok())
            .unwrap_or(0)
    };

    let subject = parse_compact(subject_text, depth + 1)?;
    let predicate = parse_compact(predicate_text, depth + 1)?;
    Ok(Term::statement_with_interval(
        subject, predicate, copula, interval,
    ))
}

fn parse_compound(text: &str, depth: usize) -> Result<Term, NarsError> {
    let first = text.chars().next().unwrap_or(STATEMENT_START);
    if text.len() < 2 {
        return Err(NarsError::syntax(format!("truncated compound term: {}", text)));
    }
    let inner = &text[1..text.len() - 1];

    let (connector, body) = match Connector::set_from_bracket(first) {
        Some(set) => {
            let expected = set.set_end().unwrap_or(STATEMENT_END);
            if !text.ends_with(expected) {
                return Err(NarsError::syntax(format!(
                    "set must end with '{}': {}",
                    expected, text
                )));
            }
            (set, inner)
        }
        None => split_connector(inner, text)?,
    };

    let mut subterms = Vec::new();
    let mut intervals = Vec::new();
    for token in split_top_level(body)? {
        if token.is_empty() {
            return Err(NarsError::syntax(format!("empty subterm in: {}", text)));
        }
        if token.bytes().all(|b| b.is_ascii_digit()) {
            let value = token
                .parse::<u32>()
                .map_err(|e| NarsError::syntax(format!("bad interval '{}': {}", token, e)))?;
            intervals.push(value);
        } else {
            subterms.push(parse_compact(token, depth + 1)?);
        }
    }
    if subterms.is_empty() {
        return Err(NarsError::syntax(format!("compound has no subterms: {}", text)));
    }

    Ok(Term::compound_with_intervals(connector, subterms, intervals))
}

/// Split `conn,rest` into the connector and the remaining body.
fn split_connector<'a>(inner: &'a str, whole: &str) -> Result<(Connector, &'a str), NarsError> {
    let bytes = inner.as_bytes();
    let width = match bytes.get(1) {
        Some(b) if *b as char == TERM_DIVIDER => 1,
        Some(_) => 2,
        None => {
            return Err(NarsError::syntax(format!("missing connector in: {}", whole)));
        }
    };
    let symbol = inner
        .get(..width)
        .ok_or_else(|| NarsError::syntax(format!("missing connector in: {}", whole)))?;
    let connector = Connector::from_symbol(symbol)
        .filter(|c| !c.is_set())
        .ok_or_else(|| {
            NarsError::syntax(format!("unknown connector '{}' in: {}", symbol, whole))
        })?;
    if bytes.get(width).map(|b| *b as char) != Some(TERM_DIVIDER) {
        return Err(NarsError::syntax(format!(
            "connector not followed by ',' in: {}",
            whole
        )));
    }
    Ok((connector, &inner[width + 1..]))
}

/// Split on dividers that are not nested inside any bracket.
fn split_top_level(body: &str) -> Result<Vec<&str>, NarsError> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        if c == STATEMENT_START || is_set_bracket_start(c) {
            depth += 1;
        } else if c == STATEMENT_END || is_set_bracket_end(c) {
            depth -= 1;
            if depth < 0 {
                return Err(NarsError::syntax(format!("unbalanced brackets in: {}", body)));
            }
        } else if c == TERM_DIVIDER && depth == 0 {
            parts.push(&body[start..i]);
            start = i + 1;
        }
    }
    if depth != 0 {
        return Err(NarsError::syntax(format!("unbalanced brackets in: {}", body)));
    }
    parts.push(&body[start..]);
    Ok(parts)
}

fn parse_variable(text: &str, symbol: char, depth: usize) -> Result<Term, NarsError> {
    let rest = &text[1..];
    let (name, dependencies) = match rest.find(STATEMENT_START) {
        None => (rest, Vec::new()),
        Some(open) => {
            let close = rest.rfind(STATEMENT_END).filter(|c| *c > open).ok_or_else(|| {
                NarsError::syntax(format!("unterminated dependency list: {}", text))
            })?;
            let deps = rest[open + 1..close]
                .split(TERM_DIVIDER)
                .filter(|d| !d.is_empty())
                .map(|d| parse_compact(d, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            (&rest[..open], deps)
        }
    };

    let kind = if symbol == QUERY_SYMBOL {
        VariableKind::Query
    } else if dependencies.is_empty() {
        VariableKind::Independent
    } else {
        VariableKind::Dependent
    };
    Term::variable(kind, name, dependencies)
}

/// Remove `,<digits>` runs from an atom. Reserved for indexing; inert today.
fn strip_numeric_suffixes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == TERM_DIVIDER && chars.peek().is_some_and(|n| n.is_ascii_digit()) {
            while chars.peek().is_some_and(|n| n.is_ascii_digit()) {
                chars.next();
            }
        } else {
            out.push(c);
        }
    }
    out
}
