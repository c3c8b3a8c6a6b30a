//! Interactive editing of the matches between one pair of texts.
//!
//! A [`ComparisonEditor`] is a mutable per-pair view over an [`Analysis`].
//! The caller names the pair in any order; internally the editor resolves the
//! *canonical* orientation from the texts' first-seen order so edits persist
//! consistently no matter how the pair was named. Every accepted edit is
//! committed eagerly: the editor re-sorts its matches and replaces the pair's
//! matches inside the snapshot, leaving every other pair untouched.

use crate::analysis::{Analysis, Match};
use crate::error::{CoreError, EditError};

/// One match of the edited pair, in display orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchView {
    /// Starting token index within the first (display) text.
    pub first_index: usize,
    /// Starting token index within the second (display) text.
    pub second_index: usize,
    /// Length in tokens.
    pub length: usize,
}

/// Context tokens around a match, clipped to the text boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchContext {
    /// Context window of the first text.
    pub first_tokens: Vec<String>,
    /// Offset of the match inside `first_tokens`.
    pub first_match_start: usize,
    /// Context window of the second text.
    pub second_tokens: Vec<String>,
    /// Offset of the match inside `second_tokens`.
    pub second_match_start: usize,
    /// Length of the match in tokens.
    pub length: usize,
}

/// Collects the matches of a pair from the snapshot, re-expressed in the
/// display orientation `(first_id, second_id)` and sorted.
pub(crate) fn display_matches(analysis: &Analysis, first_id: &str, second_id: &str) -> Vec<MatchView> {
    let mut views: Vec<MatchView> = analysis
        .matches()
        .iter()
        .filter(|m| m.involves_pair(first_id, second_id))
        .map(|m| {
            if m.first_id == first_id {
                MatchView {
                    first_index: m.first_index,
                    second_index: m.second_index,
                    length: m.length,
                }
            } else {
                MatchView {
                    first_index: m.second_index,
                    second_index: m.first_index,
                    length: m.length,
                }
            }
        })
        .collect();
    sort_views(&mut views);
    views
}

fn sort_views(views: &mut [MatchView]) {
    views.sort_by_key(|view| (view.first_index, view.second_index));
}

/// Stateful match editor for one text pair.
pub struct ComparisonEditor<'a> {
    analysis: &'a mut Analysis,
    first_identifier: String,
    second_identifier: String,
    canonical_first: String,
    canonical_second: String,
    swapped_orientation: bool,
    first_tokens: Vec<String>,
    second_tokens: Vec<String>,
    matches: Vec<MatchView>,
}

impl<'a> ComparisonEditor<'a> {
    /// Opens an editor over the given pair. The display orientation follows
    /// the caller's argument order; the canonical orientation follows the
    /// snapshot's text order.
    pub(crate) fn new(
        analysis: &'a mut Analysis,
        first_identifier: &str,
        second_identifier: &str,
    ) -> Result<Self, CoreError> {
        let first_rank = analysis
            .identifier_rank(first_identifier)
            .ok_or_else(|| CoreError::UnknownIdentifier(first_identifier.to_string()))?;
        let second_rank = analysis
            .identifier_rank(second_identifier)
            .ok_or_else(|| CoreError::UnknownIdentifier(second_identifier.to_string()))?;

        let first_tokens = analysis
            .tokens_of(first_identifier)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        let second_tokens = analysis
            .tokens_of(second_identifier)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        let swapped_orientation = first_rank > second_rank;
        let (canonical_first, canonical_second) = if swapped_orientation {
            (second_identifier.to_string(), first_identifier.to_string())
        } else {
            (first_identifier.to_string(), second_identifier.to_string())
        };

        let matches = display_matches(analysis, first_identifier, second_identifier);

        Ok(Self {
            analysis,
            first_identifier: first_identifier.to_string(),
            second_identifier: second_identifier.to_string(),
            canonical_first,
            canonical_second,
            swapped_orientation,
            first_tokens,
            second_tokens,
            matches,
        })
    }

    /// Identifier of the first text in display orientation.
    pub fn first_identifier(&self) -> &str {
        &self.first_identifier
    }

    /// Identifier of the second text in display orientation.
    pub fn second_identifier(&self) -> &str {
        &self.second_identifier
    }

    /// Current matches, sorted by `(first_index, second_index)`.
    pub fn matches(&self) -> &[MatchView] {
        &self.matches
    }

    /// Number of matches currently stored for the pair.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Sum of all match lengths in tokens.
    pub fn total_match_length(&self) -> usize {
        self.matches.iter().map(|m| m.length).sum()
    }

    /// Token count of the first text.
    pub fn first_token_count(&self) -> usize {
        self.first_tokens.len()
    }

    /// Token count of the second text.
    pub fn second_token_count(&self) -> usize {
        self.second_tokens.len()
    }

    /// Returns up to `context_size` tokens of surrounding context on each
    /// side of the match, for both texts, clipped to the text boundaries.
    pub fn context_for_match(
        &self,
        match_number: usize,
        context_size: usize,
    ) -> Result<MatchContext, EditError> {
        let m = *self.retrieve(match_number)?;

        let first_start = m.first_index.saturating_sub(context_size);
        let first_end = (m.first_index + m.length + context_size).min(self.first_tokens.len());
        let second_start = m.second_index.saturating_sub(context_size);
        let second_end = (m.second_index + m.length + context_size).min(self.second_tokens.len());

        Ok(MatchContext {
            first_tokens: self.first_tokens[first_start..first_end].to_vec(),
            first_match_start: m.first_index - first_start,
            second_tokens: self.second_tokens[second_start..second_end].to_vec(),
            second_match_start: m.second_index - second_start,
            length: m.length,
        })
    }

    /// Adds a match after validating bounds and token equality.
    pub fn add_match(
        &mut self,
        first_index: usize,
        second_index: usize,
        length: usize,
    ) -> Result<(), EditError> {
        if length < 1 {
            return Err(EditError::LengthNotPositive);
        }
        self.ensure_range(first_index, length, self.first_tokens.len())?;
        self.ensure_range(second_index, length, self.second_tokens.len())?;
        self.ensure_tokens_match(first_index, second_index, length)?;

        self.matches.push(MatchView {
            first_index,
            second_index,
            length,
        });
        self.commit();
        Ok(())
    }

    /// Grows a match by `delta` tokens: positive deltas extend the end,
    /// negative deltas extend the beginning. The grown range must stay in
    /// bounds and stay pointwise equal.
    pub fn extend_match(&mut self, match_number: usize, delta: i64) -> Result<(), EditError> {
        if delta == 0 {
            return Err(EditError::DeltaZero);
        }
        let index = self.to_internal_index(match_number)?;
        let m = self.matches[index];

        if delta > 0 {
            let growth = delta as usize;
            self.ensure_range(m.first_index + m.length, growth, self.first_tokens.len())?;
            self.ensure_range(m.second_index + m.length, growth, self.second_tokens.len())?;
            self.ensure_tokens_match(m.first_index + m.length, m.second_index + m.length, growth)?;
            self.matches[index].length += growth;
        } else {
            let growth = delta.unsigned_abs() as usize;
            if m.first_index < growth || m.second_index < growth {
                return Err(EditError::OutOfBounds);
            }
            self.ensure_tokens_match(m.first_index - growth, m.second_index - growth, growth)?;
            let entry = &mut self.matches[index];
            entry.first_index -= growth;
            entry.second_index -= growth;
            entry.length += growth;
        }
        self.commit();
        Ok(())
    }

    /// Shrinks a match by `|delta|` tokens from the start (positive delta) or
    /// the end (negative delta). Removing the whole match this way is not
    /// allowed; use [`discard_match`](Self::discard_match) instead.
    pub fn truncate_match(&mut self, match_number: usize, delta: i64) -> Result<(), EditError> {
        if delta == 0 {
            return Err(EditError::DeltaZero);
        }
        let index = self.to_internal_index(match_number)?;
        let reduction = delta.unsigned_abs() as usize;
        if reduction >= self.matches[index].length {
            return Err(EditError::TruncateTooLong);
        }

        let entry = &mut self.matches[index];
        if delta > 0 {
            entry.first_index += reduction;
            entry.second_index += reduction;
        }
        entry.length -= reduction;
        self.commit();
        Ok(())
    }

    /// Removes a match entirely.
    pub fn discard_match(&mut self, match_number: usize) -> Result<(), EditError> {
        let index = self.to_internal_index(match_number)?;
        self.matches.remove(index);
        self.commit();
        Ok(())
    }

    fn retrieve(&self, match_number: usize) -> Result<&MatchView, EditError> {
        let index = self.to_internal_index(match_number)?;
        Ok(&self.matches[index])
    }

    fn to_internal_index(&self, match_number: usize) -> Result<usize, EditError> {
        if match_number < 1 || match_number > self.matches.len() {
            return Err(EditError::InvalidMatchIndex);
        }
        Ok(match_number - 1)
    }

    fn ensure_range(&self, index: usize, length: usize, token_count: usize) -> Result<(), EditError> {
        if index + length > token_count {
            return Err(EditError::OutOfBounds);
        }
        Ok(())
    }

    fn ensure_tokens_match(
        &self,
        first_index: usize,
        second_index: usize,
        length: usize,
    ) -> Result<(), EditError> {
        if self.first_tokens[first_index..first_index + length]
            != self.second_tokens[second_index..second_index + length]
        {
            return Err(EditError::TokenMismatch);
        }
        Ok(())
    }

    /// Re-sorts the session matches and replaces the pair's matches inside
    /// the snapshot, re-expressed in canonical orientation.
    fn commit(&mut self) {
        sort_views(&mut self.matches);

        let mut replacements: Vec<Match> = self
            .matches
            .iter()
            .map(|m| {
                let (canonical_first_index, canonical_second_index) = if self.swapped_orientation {
                    (m.second_index, m.first_index)
                } else {
                    (m.first_index, m.second_index)
                };
                Match::new(
                    self.canonical_first.clone(),
                    canonical_first_index,
                    self.canonical_second.clone(),
                    canonical_second_index,
                    m.length,
                )
            })
            .collect();
        replacements.sort_by_key(|m| (m.first_index, m.second_index));

        self.analysis
            .replace_matches_for_pair(&self.canonical_first, &self.canonical_second, replacements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MatchSession;
    use crate::tokenize::TokenizationStrategy;

    fn session_with(texts: &[(&str, &str)], min_match_length: usize) -> MatchSession {
        let mut session = MatchSession::new();
        for (identifier, content) in texts {
            session.insert_text(*identifier, *content);
        }
        session
            .analyze(TokenizationStrategy::Word, min_match_length)
            .unwrap();
        session
    }

    fn view(first_index: usize, second_index: usize, length: usize) -> MatchView {
        MatchView {
            first_index,
            second_index,
            length,
        }
    }

    #[test]
    fn loads_pair_matches_sorted() {
        let mut session = session_with(&[("a", "x y z"), ("b", "q x y")], 1);
        let editor = session.open_editor("a", "b").unwrap();

        assert_eq!(editor.matches(), &[view(0, 1, 2)]);
        assert_eq!(editor.first_token_count(), 3);
        assert_eq!(editor.second_token_count(), 3);
    }

    #[test]
    fn reversed_pair_swaps_display_orientation() {
        let mut session = session_with(&[("a", "x y z"), ("b", "q x y")], 1);
        let editor = session.open_editor("b", "a").unwrap();

        assert_eq!(editor.first_identifier(), "b");
        assert_eq!(editor.matches(), &[view(1, 0, 2)]);
    }

    #[test]
    fn add_match_validates_and_commits() {
        let mut session = session_with(&[("a", "x y z"), ("b", "z z z")], 2);
        {
            let mut editor = session.open_editor("a", "b").unwrap();
            assert_eq!(editor.match_count(), 0);
            editor.add_match(2, 1, 1).unwrap();
            assert_eq!(editor.matches(), &[view(2, 1, 1)]);
        }

        // The commit is visible to a freshly opened editor.
        let editor = session.open_editor("a", "b").unwrap();
        assert_eq!(editor.matches(), &[view(2, 1, 1)]);
    }

    #[test]
    fn add_match_rejects_zero_length() {
        let mut session = session_with(&[("a", "x"), ("b", "x")], 1);
        let mut editor = session.open_editor("a", "b").unwrap();

        assert_eq!(editor.add_match(0, 0, 0), Err(EditError::LengthNotPositive));
    }

    #[test]
    fn add_match_rejects_out_of_bounds_ranges() {
        let mut session = session_with(&[("a", "x y"), ("b", "x y")], 1);
        let mut editor = session.open_editor("a", "b").unwrap();

        assert_eq!(editor.add_match(1, 0, 2), Err(EditError::OutOfBounds));
        assert_eq!(editor.add_match(0, 1, 2), Err(EditError::OutOfBounds));
    }

    #[test]
    fn add_match_rejects_unequal_tokens_and_leaves_list_unchanged() {
        let mut session = session_with(&[("a", "x y z"), ("b", "x q z")], 3);
        let mut editor = session.open_editor("a", "b").unwrap();
        let before = editor.matches().to_vec();

        assert_eq!(editor.add_match(0, 0, 3), Err(EditError::TokenMismatch));
        assert_eq!(editor.matches(), before.as_slice());
    }

    #[test]
    fn extend_forward_checks_the_new_suffix() {
        let mut session = session_with(&[("a", "x y q z"), ("b", "x y w z")], 2);
        let mut editor = session.open_editor("a", "b").unwrap();
        assert_eq!(editor.matches(), &[view(0, 0, 2)]);

        // q vs w differ right behind the match.
        assert_eq!(editor.extend_match(1, 1), Err(EditError::TokenMismatch));
        assert_eq!(editor.extend_match(1, 3), Err(EditError::OutOfBounds));
        assert_eq!(editor.matches(), &[view(0, 0, 2)]);
    }

    #[test]
    fn extend_backward_grows_the_start() {
        let mut session = session_with(&[("a", "p x y"), ("b", "p x y")], 1);
        let mut editor = session.open_editor("a", "b").unwrap();
        editor.discard_match(1).unwrap();
        editor.add_match(1, 1, 2).unwrap();

        editor.extend_match(1, -1).unwrap();
        assert_eq!(editor.matches(), &[view(0, 0, 3)]);
    }

    #[test]
    fn extend_backward_past_either_start_is_out_of_bounds() {
        let mut session = session_with(&[("a", "p x y"), ("b", "x y")], 2);
        let mut editor = session.open_editor("a", "b").unwrap();
        assert_eq!(editor.matches(), &[view(1, 0, 2)]);

        assert_eq!(editor.extend_match(1, -1), Err(EditError::OutOfBounds));
        assert_eq!(editor.matches(), &[view(1, 0, 2)]);
    }

    #[test]
    fn extend_rejects_zero_delta() {
        let mut session = session_with(&[("a", "x"), ("b", "x")], 1);
        let mut editor = session.open_editor("a", "b").unwrap();

        assert_eq!(editor.extend_match(1, 0), Err(EditError::DeltaZero));
    }

    #[test]
    fn truncate_from_start_shifts_both_indices() {
        let mut session = session_with(&[("a", "x y z"), ("b", "x y z")], 1);
        let mut editor = session.open_editor("a", "b").unwrap();

        editor.truncate_match(1, 1).unwrap();
        assert_eq!(editor.matches(), &[view(1, 1, 2)]);
    }

    #[test]
    fn truncate_from_end_keeps_the_start() {
        let mut session = session_with(&[("a", "x y z"), ("b", "x y z")], 1);
        let mut editor = session.open_editor("a", "b").unwrap();

        editor.truncate_match(1, -2).unwrap();
        assert_eq!(editor.matches(), &[view(0, 0, 1)]);
    }

    #[test]
    fn truncate_by_full_length_fails_by_one_less_succeeds() {
        let mut session = session_with(&[("a", "x y z"), ("b", "x y z")], 1);
        let mut editor = session.open_editor("a", "b").unwrap();

        assert_eq!(editor.truncate_match(1, 3), Err(EditError::TruncateTooLong));
        assert_eq!(editor.truncate_match(1, -3), Err(EditError::TruncateTooLong));
        editor.truncate_match(1, 2).unwrap();
        assert_eq!(editor.matches(), &[view(2, 2, 1)]);
    }

    #[test]
    fn discard_removes_the_match() {
        let mut session = session_with(&[("a", "x y z"), ("b", "x y z")], 1);
        let mut editor = session.open_editor("a", "b").unwrap();

        editor.discard_match(1).unwrap();
        assert_eq!(editor.match_count(), 0);
        assert_eq!(editor.discard_match(1), Err(EditError::InvalidMatchIndex));
    }

    #[test]
    fn match_numbers_are_one_based() {
        let mut session = session_with(&[("a", "x"), ("b", "x")], 1);
        let mut editor = session.open_editor("a", "b").unwrap();

        assert_eq!(editor.discard_match(0), Err(EditError::InvalidMatchIndex));
        assert_eq!(editor.discard_match(2), Err(EditError::InvalidMatchIndex));
    }

    #[test]
    fn context_is_clipped_to_text_boundaries() {
        let mut session = session_with(&[("a", "p q x y r"), ("b", "x y")], 2);
        let editor = session.open_editor("a", "b").unwrap();

        let context = editor.context_for_match(1, 3).unwrap();
        assert_eq!(context.first_tokens, ["p", "q", "x", "y", "r"]);
        assert_eq!(context.first_match_start, 2);
        assert_eq!(context.second_tokens, ["x", "y"]);
        assert_eq!(context.second_match_start, 0);
        assert_eq!(context.length, 2);
    }

    #[test]
    fn context_with_zero_size_is_the_match_itself() {
        let mut session = session_with(&[("a", "p x y r"), ("b", "q x y")], 2);
        let editor = session.open_editor("a", "b").unwrap();

        let context = editor.context_for_match(1, 0).unwrap();
        assert_eq!(context.first_tokens, ["x", "y"]);
        assert_eq!(context.first_match_start, 0);
    }

    #[test]
    fn context_rejects_invalid_match_numbers() {
        let mut session = session_with(&[("a", "x"), ("b", "x")], 1);
        let editor = session.open_editor("a", "b").unwrap();

        assert_eq!(
            editor.context_for_match(2, 0).unwrap_err(),
            EditError::InvalidMatchIndex
        );
    }

    #[test]
    fn edits_through_swapped_orientation_persist_canonically() {
        let mut session = session_with(&[("a", "x y z"), ("b", "q x y")], 2);
        {
            let mut editor = session.open_editor("b", "a").unwrap();
            assert_eq!(editor.matches(), &[view(1, 0, 2)]);
            editor.truncate_match(1, 1).unwrap();
        }

        // Canonical orientation (a before b) holds the edited coordinates.
        let analysis = session.analysis().unwrap();
        assert_eq!(analysis.matches().len(), 1);
        let m = &analysis.matches()[0];
        assert_eq!((m.first_id.as_str(), m.first_index), ("a", 1));
        assert_eq!((m.second_id.as_str(), m.second_index), ("b", 2));
        assert_eq!(m.length, 1);
    }

    #[test]
    fn total_match_length_sums_all_matches() {
        let mut session = session_with(&[("a", "x y q z"), ("b", "x y w z")], 1);
        let editor = session.open_editor("a", "b").unwrap();

        assert_eq!(editor.matches(), &[view(0, 0, 2), view(3, 3, 1)]);
        assert_eq!(editor.total_match_length(), 3);
    }
}
