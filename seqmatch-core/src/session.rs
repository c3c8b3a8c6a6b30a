//! Session model: the ordered text store and the current analysis.
//!
//! Texts are kept in insertion order; storing a text under an existing
//! identifier replaces its content but keeps its rank, which matters because
//! the rank defines the canonical orientation of every pair.

use std::time::{Duration, Instant};

use crate::analysis::{Analysis, TokenizedText};
use crate::editor::{display_matches, ComparisonEditor, MatchView};
use crate::error::{CoreError, Result};
use crate::matcher::find_matches;
use crate::tokenize::TokenizationStrategy;

/// Whether an insert created a new entry or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The identifier was not present before.
    Loaded,
    /// The identifier existed; its content was replaced.
    Updated,
}

#[derive(Debug, Clone)]
struct StoredText {
    identifier: String,
    content: String,
}

/// Owns the loaded texts and the snapshot of the most recent analysis.
#[derive(Debug, Default)]
pub struct MatchSession {
    texts: Vec<StoredText>,
    analysis: Option<Analysis>,
}

impl MatchSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `content` under `identifier`, replacing any previous content
    /// for the same identifier in place.
    pub fn insert_text(
        &mut self,
        identifier: impl Into<String>,
        content: impl Into<String>,
    ) -> StoreOutcome {
        let identifier = identifier.into();
        let content = content.into();
        match self.texts.iter_mut().find(|text| text.identifier == identifier) {
            Some(existing) => {
                existing.content = content;
                StoreOutcome::Updated
            }
            None => {
                self.texts.push(StoredText {
                    identifier,
                    content,
                });
                StoreOutcome::Loaded
            }
        }
    }

    /// Number of stored texts.
    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    /// Tokenizes the stored text under `identifier` with the given strategy.
    pub fn tokenize(
        &self,
        identifier: &str,
        strategy: TokenizationStrategy,
    ) -> Result<Vec<String>> {
        let text = self
            .texts
            .iter()
            .find(|text| text.identifier == identifier)
            .ok_or_else(|| CoreError::UnknownIdentifier(identifier.to_string()))?;
        Ok(strategy.tokenize(&text.content))
    }

    /// Runs the matching engine over all stored texts and stores the result
    /// as the current analysis. Returns the snapshot and the wall-clock time
    /// the run took.
    pub fn analyze(
        &mut self,
        strategy: TokenizationStrategy,
        min_match_length: usize,
    ) -> Result<(&Analysis, Duration)> {
        if min_match_length < 1 {
            return Err(CoreError::InvalidMinLength(min_match_length));
        }

        let start = Instant::now();
        let tokenized: Vec<TokenizedText> = self
            .texts
            .iter()
            .map(|text| TokenizedText::new(text.identifier.clone(), strategy.tokenize(&text.content)))
            .collect();
        let matches = find_matches(&tokenized, min_match_length);
        let elapsed = start.elapsed();

        let analysis = self
            .analysis
            .insert(Analysis::new(strategy, min_match_length, tokenized, matches));
        Ok((&*analysis, elapsed))
    }

    /// The snapshot of the most recent analysis, if any.
    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    /// Removes all texts and the current analysis.
    pub fn clear(&mut self) {
        self.texts.clear();
        self.analysis = None;
    }

    /// Opens a comparison editor for the pair, in the caller's display
    /// orientation. Requires an analysis containing both identifiers. The
    /// editor borrows the session exclusively for its lifetime.
    pub fn open_editor(&mut self, first: &str, second: &str) -> Result<ComparisonEditor<'_>> {
        let analysis = self.analysis.as_mut().ok_or(CoreError::NoAnalysisAvailable)?;
        ComparisonEditor::new(analysis, first, second)
    }

    /// Read-only view of the pair's matches in display orientation, sorted
    /// by `(first_index, second_index)`.
    pub fn pair_matches(&self, first: &str, second: &str) -> Result<Vec<MatchView>> {
        let analysis = self.analysis.as_ref().ok_or(CoreError::NoAnalysisAvailable)?;
        for identifier in [first, second] {
            if analysis.identifier_rank(identifier).is_none() {
                return Err(CoreError::UnknownIdentifier(identifier.to_string()));
            }
        }
        Ok(display_matches(analysis, first, second))
    }
}
