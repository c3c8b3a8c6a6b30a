//! Command-line interface for the token-run matching engine.
//!
//! The binary runs an interactive session over stdin: texts are loaded or
//! entered inline, analyzed for shared token runs, and their matches listed,
//! aggregated, or edited interactively.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod repl;

pub use error::{ArgError, CliResult};
pub use repl::Repl;
