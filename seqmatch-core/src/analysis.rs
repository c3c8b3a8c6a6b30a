//! Analysis snapshot data model.
//!
//! An [`Analysis`] is the immutable result bundle of one matching-engine run:
//! the configuration used, the tokenized texts in their first-seen order, and
//! the detected matches. The only mutation path is the pair-wise replacement
//! used by the comparison editor's commit protocol.

use serde::Serialize;

use crate::tokenize::TokenizationStrategy;

/// A text after tokenization, keyed by its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedText {
    /// Identifier the text was stored under (unique per session).
    pub identifier: String,
    /// Ordered tokens produced by the strategy of the analysis.
    pub tokens: Vec<String>,
}

impl TokenizedText {
    /// Creates a tokenized text.
    pub fn new(identifier: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            identifier: identifier.into(),
            tokens,
        }
    }
}

/// A contiguous run of tokens shared between two texts.
///
/// `length` consecutive tokens starting at `first_index` in the text
/// `first_id` equal, position for position, `length` consecutive tokens
/// starting at `second_index` in `second_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Identifier of the first text.
    pub first_id: String,
    /// Starting token index within the first text.
    pub first_index: usize,
    /// Identifier of the second text.
    pub second_id: String,
    /// Starting token index within the second text.
    pub second_index: usize,
    /// Number of matching tokens, at least one.
    pub length: usize,
}

impl Match {
    /// Creates a match claim. A zero length is a programming defect, not a
    /// recoverable input error.
    pub fn new(
        first_id: impl Into<String>,
        first_index: usize,
        second_id: impl Into<String>,
        second_index: usize,
        length: usize,
    ) -> Self {
        debug_assert!(length >= 1, "a match must span at least one token");
        Self {
            first_id: first_id.into(),
            first_index,
            second_id: second_id.into(),
            second_index,
            length,
        }
    }

    /// Whether this match connects the two given texts, in either direction.
    pub fn involves_pair(&self, first_id: &str, second_id: &str) -> bool {
        (self.first_id == first_id && self.second_id == second_id)
            || (self.first_id == second_id && self.second_id == first_id)
    }
}

/// Immutable result of one analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    strategy: TokenizationStrategy,
    min_match_length: usize,
    texts: Vec<TokenizedText>,
    matches: Vec<Match>,
}

impl Analysis {
    pub(crate) fn new(
        strategy: TokenizationStrategy,
        min_match_length: usize,
        texts: Vec<TokenizedText>,
        matches: Vec<Match>,
    ) -> Self {
        debug_assert!(min_match_length >= 1);
        Self {
            strategy,
            min_match_length,
            texts,
            matches,
        }
    }

    /// The strategy the texts were tokenized with.
    pub fn strategy(&self) -> TokenizationStrategy {
        self.strategy
    }

    /// The minimum match length the engine was run with.
    pub fn min_match_length(&self) -> usize {
        self.min_match_length
    }

    /// The tokenized texts, in the order they were first stored.
    pub fn texts(&self) -> &[TokenizedText] {
        &self.texts
    }

    /// The detected matches, grouped by pair in enumeration order.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Tokens of the text stored under `identifier`, if it was analyzed.
    pub fn tokens_of(&self, identifier: &str) -> Option<&[String]> {
        self.texts
            .iter()
            .find(|text| text.identifier == identifier)
            .map(|text| text.tokens.as_slice())
    }

    /// Position of `identifier` in the first-seen text order. This rank
    /// decides the canonical orientation of a text pair.
    pub fn identifier_rank(&self, identifier: &str) -> Option<usize> {
        self.texts
            .iter()
            .position(|text| text.identifier == identifier)
    }

    /// Replaces every match connecting the given pair (in either direction)
    /// with `replacements`. Matches of other pairs keep their relative order;
    /// the replacements are appended as provided.
    pub(crate) fn replace_matches_for_pair(
        &mut self,
        first_id: &str,
        second_id: &str,
        replacements: Vec<Match>,
    ) {
        self.matches
            .retain(|existing| !existing.involves_pair(first_id, second_id));
        self.matches.extend(replacements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_analysis() -> Analysis {
        let texts = vec![
            TokenizedText::new("a", vec!["x".to_string(), "y".to_string()]),
            TokenizedText::new("b", vec!["x".to_string()]),
            TokenizedText::new("c", vec!["y".to_string()]),
        ];
        let matches = vec![
            Match::new("a", 0, "b", 0, 1),
            Match::new("a", 1, "c", 0, 1),
        ];
        Analysis::new(TokenizationStrategy::Word, 1, texts, matches)
    }

    #[test]
    fn involves_pair_is_direction_agnostic() {
        let m = Match::new("a", 0, "b", 0, 1);
        assert!(m.involves_pair("a", "b"));
        assert!(m.involves_pair("b", "a"));
        assert!(!m.involves_pair("a", "c"));
    }

    #[test]
    fn identifier_rank_follows_insertion_order() {
        let analysis = sample_analysis();
        assert_eq!(analysis.identifier_rank("a"), Some(0));
        assert_eq!(analysis.identifier_rank("c"), Some(2));
        assert_eq!(analysis.identifier_rank("d"), None);
    }

    #[test]
    fn tokens_of_finds_stored_texts() {
        let analysis = sample_analysis();
        assert_eq!(analysis.tokens_of("b"), Some(&["x".to_string()][..]));
        assert_eq!(analysis.tokens_of("missing"), None);
    }

    #[test]
    fn replace_keeps_other_pairs_untouched() {
        let mut analysis = sample_analysis();
        analysis.replace_matches_for_pair("a", "b", vec![Match::new("a", 1, "b", 0, 1)]);

        assert_eq!(
            analysis.matches(),
            &[Match::new("a", 1, "c", 0, 1), Match::new("a", 1, "b", 0, 1)]
        );
    }

    #[test]
    fn replace_with_empty_list_drops_the_pair() {
        let mut analysis = sample_analysis();
        analysis.replace_matches_for_pair("b", "a", Vec::new());

        assert_eq!(analysis.matches(), &[Match::new("a", 1, "c", 0, 1)]);
    }

    #[test]
    fn match_serializes_to_json() {
        let m = Match::new("a", 0, "b", 2, 3);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["first_id"], "a");
        assert_eq!(json["second_index"], 2);
        assert_eq!(json["length"], 3);
    }
}
