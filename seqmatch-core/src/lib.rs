//! Core library for contiguous token-run matching between texts.
//!
//! The pipeline: texts are stored in a [`MatchSession`], tokenized under a
//! [`TokenizationStrategy`], and run through the matching engine, which
//! produces an immutable [`Analysis`] snapshot of all pairwise matches. A
//! [`ComparisonEditor`] opened for one pair lets callers add, extend,
//! truncate, or discard matches while the token-equality and boundary
//! invariants are enforced; each accepted edit replaces that pair's matches
//! inside the snapshot. The [`stats`] module folds snapshots into pairwise
//! similarity summaries.

#![warn(missing_docs)]

pub mod analysis;
pub mod editor;
pub mod error;
pub mod matcher;
pub mod session;
pub mod stats;
pub mod tokenize;

pub use analysis::{Analysis, Match, TokenizedText};
pub use editor::{ComparisonEditor, MatchContext, MatchView};
pub use error::{CoreError, EditError};
pub use matcher::find_matches;
pub use session::{MatchSession, StoreOutcome};
pub use stats::{
    collect_summaries, ComparisonMetric, ListMetric, PairSummary, SortOrder,
};
pub use tokenize::TokenizationStrategy;
