//! Error types for the matching core.

use thiserror::Error;

/// Errors reported by the session model and tokenizer lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// No tokenization strategy is registered under the given name.
    #[error("unknown tokenization strategy: {0}")]
    UnknownStrategy(String),

    /// No text is stored under the given identifier.
    #[error("no text stored for identifier '{0}'")]
    UnknownIdentifier(String),

    /// The minimum match length must be at least one token.
    #[error("minimum match length must be positive")]
    InvalidMinLength(usize),

    /// An operation requiring an analysis was invoked before any run.
    #[error("no analysis result available")]
    NoAnalysisAvailable,
}

/// Errors reported by comparison editing operations.
///
/// Every editor operation validates before mutating; when one of these is
/// returned the session state is unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// The one-based match number is outside the current match list.
    #[error("invalid match index")]
    InvalidMatchIndex,

    /// A match length must be at least one token.
    #[error("length must be positive")]
    LengthNotPositive,

    /// Extend and truncate require a non-zero delta.
    #[error("delta must not be zero")]
    DeltaZero,

    /// The requested token range exceeds a text boundary.
    #[error("match would exceed text boundaries")]
    OutOfBounds,

    /// Truncating by the full length is not allowed; discard instead.
    #[error("match cannot be truncated completely")]
    TruncateTooLong,

    /// The claimed token ranges are not pointwise equal.
    #[error("tokens do not match in the selected range")]
    TokenMismatch,
}

/// Result type for session-level operations.
pub type Result<T> = std::result::Result<T, CoreError>;
