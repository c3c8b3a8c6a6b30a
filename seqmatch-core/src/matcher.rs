//! All-pairs contiguous token-run detection.
//!
//! For every unordered pair of texts the engine scans every index pair
//! `(i, j)`, extends the equal run as far as it goes, and records it when it
//! is long enough and is a *match start*: a position whose preceding token
//! pair differs. The start rule suppresses re-reporting every suffix of an
//! already recorded run; it deliberately does not deduplicate overlapping
//! runs anchored at independent start points (periodic texts produce several
//! overlapping matches, see `overlapping_runs_in_periodic_texts`).
//!
//! Worst case `O(n * m * min(n, m))` per pair, which is fine for the
//! small-to-medium texts this engine targets.

use crate::analysis::{Match, TokenizedText};

/// Detects all matches of at least `min_match_length` tokens between every
/// pair of texts. Pairs are enumerated in the order the texts appear; within
/// a pair matches are ordered by `(first_index, second_index)`.
pub fn find_matches(texts: &[TokenizedText], min_match_length: usize) -> Vec<Match> {
    let mut matches = Vec::new();
    for first in 0..texts.len() {
        for second in first + 1..texts.len() {
            collect_pair_matches(&texts[first], &texts[second], min_match_length, &mut matches);
        }
    }
    matches
}

fn collect_pair_matches(
    first: &TokenizedText,
    second: &TokenizedText,
    min_match_length: usize,
    out: &mut Vec<Match>,
) {
    for i in 0..first.tokens.len() {
        for j in 0..second.tokens.len() {
            let length = run_length(&first.tokens, &second.tokens, i, j);
            if length >= min_match_length && is_match_start(&first.tokens, &second.tokens, i, j) {
                out.push(Match::new(
                    first.identifier.clone(),
                    i,
                    second.identifier.clone(),
                    j,
                    length,
                ));
            }
        }
    }
}

/// Largest `k` with `first[i..i + k] == second[j..j + k]` pointwise.
fn run_length(first: &[String], second: &[String], i: usize, j: usize) -> usize {
    let mut length = 0;
    while i + length < first.len()
        && j + length < second.len()
        && first[i + length] == second[j + length]
    {
        length += 1;
    }
    length
}

fn is_match_start(first: &[String], second: &[String], i: usize, j: usize) -> bool {
    i == 0 || j == 0 || first[i - 1] != second[j - 1]
}
