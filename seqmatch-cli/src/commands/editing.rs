//! The interactive match-editing mode.
//!
//! While editing is active the REPL routes every line here. Each command
//! re-opens the comparison editor from the current snapshot; that is safe
//! because every accepted edit commits eagerly, so the snapshot always holds
//! the editor's latest state (and a fresh editor reproduces it exactly).

use std::io::Write;

use anyhow::{anyhow, Result};

use seqmatch_core::stats::ComparisonMetric;
use seqmatch_core::{ComparisonEditor, EditError, MatchSession};

use crate::commands::ArgCursor;
use crate::output::{format_percentage, render_context};

const STATUS_COMMANDS: &str =
    "Available commands: matches, print, add, extend, truncate, discard, set, exit.";

/// Whether the editing mode stays active after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditFlow {
    /// Stay in editing mode.
    Stay,
    /// Leave editing mode.
    Exit,
}

/// State of the active editing mode: the pair being edited and the metric
/// shown in the status line.
#[derive(Debug, Clone)]
pub struct EditState {
    first: String,
    second: String,
    metric: ComparisonMetric,
    default_context_size: usize,
}

impl EditState {
    /// Creates the state for a freshly entered editing mode.
    pub fn new(first: impl Into<String>, second: impl Into<String>, default_context_size: usize) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            metric: ComparisonMetric::Symmetric,
            default_context_size,
        }
    }

    /// Prints the status line shown on entry and after every successful
    /// operation.
    pub fn print_status(&self, session: &mut MatchSession, out: &mut dyn Write) -> Result<()> {
        let editor = self.open(session)?;
        let ratio = self.metric.compute(
            editor.total_match_length(),
            editor.first_token_count(),
            editor.second_token_count(),
        );
        writeln!(
            out,
            "Comparison of {}, {}: {} similarity, {} matches. {}",
            editor.first_identifier(),
            editor.second_identifier(),
            format_percentage(ratio),
            editor.match_count(),
            STATUS_COMMANDS,
        )?;
        Ok(())
    }

    /// Handles one editing-mode command. Returns `None` when the keyword is
    /// not an editing command.
    pub fn handle_command(
        &mut self,
        session: &mut MatchSession,
        keyword: &str,
        mut cursor: ArgCursor<'_>,
        out: &mut dyn Write,
    ) -> Option<Result<EditFlow>> {
        let result = match keyword {
            "matches" => self.handle_matches(session, &cursor, out),
            "print" => self.handle_print(session, &mut cursor, out),
            "add" => self.handle_add(session, &mut cursor, out),
            "extend" => self.handle_extend(session, &mut cursor, out),
            "truncate" => self.handle_truncate(session, &mut cursor, out),
            "discard" => self.handle_discard(session, &mut cursor, out),
            "set" => self.handle_set(session, &mut cursor, out),
            "exit" => return Some(self.handle_exit(&cursor, out)),
            _ => return None,
        };
        Some(result.map(|()| EditFlow::Stay))
    }

    fn open<'s>(&self, session: &'s mut MatchSession) -> Result<ComparisonEditor<'s>> {
        Ok(session.open_editor(&self.first, &self.second)?)
    }

    fn handle_matches(
        &self,
        session: &mut MatchSession,
        cursor: &ArgCursor<'_>,
        out: &mut dyn Write,
    ) -> Result<()> {
        cursor.finish()?;
        let editor = self.open(session)?;
        for m in editor.matches() {
            writeln!(
                out,
                "Match of length {}: {}-{}",
                m.length, m.first_index, m.second_index
            )?;
        }
        drop(editor);
        self.print_status(session, out)
    }

    fn handle_print(
        &self,
        session: &mut MatchSession,
        cursor: &mut ArgCursor<'_>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let match_number = cursor.next_positive()?;
        let context_size = if cursor.is_exhausted() {
            self.default_context_size
        } else {
            cursor.next_non_negative()?
        };
        cursor.finish()?;

        let editor = self.open(session)?;
        let context = editor.context_for_match(match_number, context_size)?;
        for line in render_context(editor.first_identifier(), editor.second_identifier(), &context) {
            writeln!(out, "{line}")?;
        }
        drop(editor);
        self.print_status(session, out)
    }

    fn handle_add(
        &self,
        session: &mut MatchSession,
        cursor: &mut ArgCursor<'_>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let first_index = token_index(cursor.next_int()?)?;
        let second_index = token_index(cursor.next_int()?)?;
        let length = cursor.next_positive()?;
        cursor.finish()?;

        self.open(session)?.add_match(first_index, second_index, length)?;
        self.print_status(session, out)
    }

    fn handle_extend(
        &self,
        session: &mut MatchSession,
        cursor: &mut ArgCursor<'_>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let match_number = cursor.next_positive()?;
        let delta = cursor.next_int()?;
        cursor.finish()?;

        self.open(session)?.extend_match(match_number, delta)?;
        self.print_status(session, out)
    }

    fn handle_truncate(
        &self,
        session: &mut MatchSession,
        cursor: &mut ArgCursor<'_>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let match_number = cursor.next_positive()?;
        let delta = cursor.next_int()?;
        cursor.finish()?;

        self.open(session)?.truncate_match(match_number, delta)?;
        self.print_status(session, out)
    }

    fn handle_discard(
        &self,
        session: &mut MatchSession,
        cursor: &mut ArgCursor<'_>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let match_number = cursor.next_positive()?;
        cursor.finish()?;

        self.open(session)?.discard_match(match_number)?;
        self.print_status(session, out)
    }

    fn handle_set(
        &mut self,
        session: &mut MatchSession,
        cursor: &mut ArgCursor<'_>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let name = cursor.next_str()?;
        cursor.finish()?;
        let metric = ComparisonMetric::parse(name).ok_or_else(|| anyhow!("invalid metric."))?;

        self.metric = metric;
        self.print_status(session, out)
    }

    fn handle_exit(&self, cursor: &ArgCursor<'_>, out: &mut dyn Write) -> Result<EditFlow> {
        cursor.finish()?;
        writeln!(out, "OK, exit editing mode.")?;
        Ok(EditFlow::Exit)
    }
}

/// Maps a user-supplied token index to `usize`; negative indices are outside
/// every text.
fn token_index(value: i64) -> Result<usize, EditError> {
    usize::try_from(value).map_err(|_| EditError::OutOfBounds)
}
