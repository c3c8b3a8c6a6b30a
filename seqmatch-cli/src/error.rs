//! Error handling for the CLI application.

use std::fmt;

/// Errors produced while parsing REPL command arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// A required argument is missing.
    TooFew,
    /// Extra arguments were left after the command consumed its own.
    TooMany,
    /// The argument is not a base-10 integer.
    NotAnInteger(String),
    /// The argument must be a positive integer.
    NotPositive(i64),
    /// The argument must not be negative.
    Negative(i64),
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgError::TooFew => write!(f, "too few arguments"),
            ArgError::TooMany => write!(f, "too many arguments provided."),
            ArgError::NotAnInteger(value) => write!(f, "'{value}' must be an integer."),
            ArgError::NotPositive(value) => write!(f, "'{value}' must be positive."),
            ArgError::Negative(value) => write!(f, "'{value}' must be non-negative."),
        }
    }
}

impl std::error::Error for ArgError {}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, anyhow::Error>;
