//! Evaluates a parsed (or unparsed) query against an [`crate::index::Index`].

use std::time::Instant;

use crate::index::Index;
use crate::stemmer::stem;
use crate::tokenizer::tokenize;

use super::algebra::{complement, intersect, union};
use super::parser::{parse, ParseOutcome};
use super::Query;

/// Run `query_str` against `index` and return a sorted list of matching
/// doc ids. Logs the elapsed time at `info` level.
///
/// - An empty (or whitespace-only) query matches nothing.
/// - A query the grammar rejects falls back to a flat AND over every
///   stemmed token in the raw query text.
pub fn search(index: &Index, query_str: &str) -> Vec<u32> {
    let start = Instant::now();

    let result = match parse(query_str) {
        ParseOutcome::Empty => Vec::new(),
        ParseOutcome::Tree(tree) => execute(index, &tree),
        ParseOutcome::Failed => fallback_and(index, query_str),
    };

    let elapsed = start.elapsed();
    tracing::info!(
        query = query_str,
        hits = result.len(),
        elapsed_us = elapsed.as_micros() as u64,
        "evaluated query"
    );

    result
}

fn execute(index: &Index, node: &Query) -> Vec<u32> {
    match node {
        Query::Term(raw) => {
            let tokens = tokenize(raw);
            match tokens.first() {
                Some(token) => index.postings(&stem(token)).to_vec(),
                None => Vec::new(),
            }
        }
        Query::And(left, right) => {
            let left = execute(index, left);
            if left.is_empty() {
                return Vec::new();
            }
            let right = execute(index, right);
            intersect(&left, &right)
        }
        Query::Or(left, right) => {
            let left = execute(index, left);
            let right = execute(index, right);
            union(&left, &right)
        }
        Query::Not(operand) => {
            let inner = execute(index, operand);
            complement(&inner, index.doc_count() as u32)
        }
    }
}

/// Tokenize and stem the raw query text, then AND every resulting posting
/// list together. Used when the grammar can't parse the query at all.
fn fallback_and(index: &Index, query_str: &str) -> Vec<u32> {
    let tokens = tokenize(query_str);
    let mut tokens = tokens.into_iter();

    let Some(first) = tokens.next() else {
        return Vec::new();
    };

    let mut result = index.postings(&stem(&first)).to_vec();

    for token in tokens {
        if result.is_empty() {
            break;
        }
        let next = index.postings(&stem(&token));
        result = intersect(&result, next);
    }

    result
}
