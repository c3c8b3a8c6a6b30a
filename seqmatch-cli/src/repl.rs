//! The line-oriented interactive session.
//!
//! One line is one command. Failures are printed to the error stream with an
//! `Error: ` prefix and the loop continues; only `quit` or end of input ends
//! the session. While a match-editing mode is active, lines are routed to
//! [`EditState`] instead of the top-level commands (`quit` still works).

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{anyhow, Result};
use log::debug;

use seqmatch_core::stats::{
    collect_summaries, histogram_buckets, sort_summaries, ListMetric, SortOrder, HISTOGRAM_CLASSES,
};
use seqmatch_core::{Analysis, CoreError, MatchSession, StoreOutcome, TokenizationStrategy};

use crate::commands::editing::{EditFlow, EditState};
use crate::commands::ArgCursor;
use crate::config::CliConfig;
use crate::input::read_text;
use crate::output::format_metric_value;

const TOKEN_SEPARATOR: &str = "~";
const MESSAGE_CLEARED: &str = "Cleared all texts.";
const WELCOME_MESSAGE: &str = "Use one of the following commands: load, input, tokenization, \
                               analyze, matches, list, top, histogram, edit, clear, quit.";
const MESSAGE_NO_PAIRS: &str = "No program pairs available.";
const ERROR_UNKNOWN_COMMAND: &str = "unknown command";
const ERROR_COULD_NOT_READ_FILE: &str = "Could not read file.";
const ERROR_INVALID_METRIC: &str = "invalid metric";
const ERROR_INVALID_ORDER: &str = "invalid order";
const ERROR_METRIC_NOT_PERCENTAGE: &str = "Metric must be a percentage.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The interactive session: the text store, the loaded configuration, and
/// the editing-mode slot.
pub struct Repl {
    session: MatchSession,
    config: CliConfig,
    editing: Option<EditState>,
}

impl Repl {
    /// Creates a session with no stored texts.
    pub fn new(config: CliConfig) -> Self {
        Self {
            session: MatchSession::new(),
            config,
            editing: None,
        }
    }

    /// Loads a file into the session before the loop starts, as if a `load`
    /// command had been entered.
    pub fn preload(&mut self, path: &Path, out: &mut dyn Write) -> Result<()> {
        let loaded = read_text(path)?;
        let outcome = self.session.insert_text(loaded.identifier.clone(), loaded.content);
        print_store_outcome(out, outcome, &loaded.identifier)?;
        Ok(())
    }

    /// Prints the command overview shown at startup.
    pub fn print_welcome(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{WELCOME_MESSAGE}")?;
        Ok(())
    }

    /// Reads commands line by line until `quit` or end of input.
    pub fn run(
        &mut self,
        input: impl BufRead,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            if self.handle_line(&line, out, err)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str, out: &mut dyn Write, err: &mut dyn Write) -> Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, args)) = parts.split_first() else {
            return Ok(Flow::Continue);
        };

        if keyword == "quit" {
            if let Err(error) = ArgCursor::new(args).finish() {
                print_error(err, &anyhow!(error))?;
                return Ok(Flow::Continue);
            }
            return Ok(Flow::Quit);
        }

        if let Some(mut state) = self.editing.take() {
            let cursor = ArgCursor::new(args);
            match state.handle_command(&mut self.session, keyword, cursor, out) {
                None => {
                    print_error(err, &anyhow!(ERROR_UNKNOWN_COMMAND))?;
                    self.editing = Some(state);
                }
                Some(Err(error)) => {
                    print_error(err, &error)?;
                    self.editing = Some(state);
                }
                Some(Ok(EditFlow::Stay)) => self.editing = Some(state),
                Some(Ok(EditFlow::Exit)) => {}
            }
            return Ok(Flow::Continue);
        }

        let mut cursor = ArgCursor::new(args);
        let result = match keyword {
            "load" => self.cmd_load(&mut cursor, out),
            "input" => self.cmd_input(line, out),
            "tokenization" => self.cmd_tokenization(&mut cursor, out),
            "analyze" => self.cmd_analyze(&mut cursor, out),
            "matches" => self.cmd_matches(&mut cursor, out),
            "list" => self.cmd_list(&mut cursor, None, out),
            "top" => self.cmd_top(&mut cursor, out),
            "histogram" => self.cmd_histogram(&mut cursor, out),
            "edit" => self.cmd_edit(&mut cursor, out),
            "clear" => self.cmd_clear(&cursor, out),
            _ => Err(anyhow!(ERROR_UNKNOWN_COMMAND)),
        };
        if let Err(error) = result {
            print_error(err, &error)?;
        }
        Ok(Flow::Continue)
    }

    fn cmd_load(&mut self, cursor: &mut ArgCursor<'_>, out: &mut dyn Write) -> Result<()> {
        let path = cursor.next_str()?;
        cursor.finish()?;

        let loaded = match read_text(Path::new(path)) {
            Ok(loaded) => loaded,
            Err(error) => {
                debug!("load failed for {path}: {error:#}");
                return Err(anyhow!(ERROR_COULD_NOT_READ_FILE));
            }
        };
        let outcome = self.session.insert_text(loaded.identifier.clone(), loaded.content);
        print_store_outcome(out, outcome, &loaded.identifier)?;
        Ok(())
    }

    /// `input` takes the rest of the line verbatim, so it parses the raw line
    /// instead of the whitespace-split arguments.
    fn cmd_input(&mut self, line: &str, out: &mut dyn Write) -> Result<()> {
        let rest = line.trim_start().strip_prefix("input").unwrap_or("").trim_start();
        let mut split = rest.splitn(2, char::is_whitespace);
        let identifier = match split.next() {
            Some(identifier) if !identifier.is_empty() => identifier.to_string(),
            _ => return Err(anyhow!(crate::error::ArgError::TooFew)),
        };
        let content = split.next().unwrap_or("");

        let outcome = self.session.insert_text(identifier.clone(), content);
        print_store_outcome(out, outcome, &identifier)?;
        Ok(())
    }

    fn cmd_tokenization(&mut self, cursor: &mut ArgCursor<'_>, out: &mut dyn Write) -> Result<()> {
        let identifier = cursor.next_str()?;
        let strategy: TokenizationStrategy = cursor.next_str()?.parse()?;
        cursor.finish()?;

        let tokens = self.session.tokenize(identifier, strategy)?;
        writeln!(out, "{}", tokens.join(TOKEN_SEPARATOR))?;
        Ok(())
    }

    fn cmd_analyze(&mut self, cursor: &mut ArgCursor<'_>, out: &mut dyn Write) -> Result<()> {
        let strategy = if cursor.is_exhausted() {
            self.config.analysis.strategy
        } else {
            cursor.next_str()?.parse()?
        };
        let min_match_length = if cursor.is_exhausted() {
            self.config.analysis.min_match_length
        } else {
            cursor.next_positive()?
        };
        cursor.finish()?;

        let (_analysis, elapsed) = self.session.analyze(strategy, min_match_length)?;
        writeln!(out, "Analysis took {}ms", elapsed.as_millis())?;
        Ok(())
    }

    fn cmd_matches(&mut self, cursor: &mut ArgCursor<'_>, out: &mut dyn Write) -> Result<()> {
        let first = cursor.next_str()?;
        let second = cursor.next_str()?;
        cursor.finish()?;

        for m in self.session.pair_matches(first, second)? {
            writeln!(
                out,
                "Match of length {}: {}-{}",
                m.length, m.first_index, m.second_index
            )?;
        }
        Ok(())
    }

    fn cmd_list(
        &mut self,
        cursor: &mut ArgCursor<'_>,
        limit: Option<usize>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let metric =
            ListMetric::parse(cursor.next_str()?).ok_or_else(|| anyhow!(ERROR_INVALID_METRIC))?;
        let order = if cursor.is_exhausted() {
            SortOrder::Desc
        } else {
            SortOrder::parse(cursor.next_str()?).ok_or_else(|| anyhow!(ERROR_INVALID_ORDER))?
        };
        cursor.finish()?;

        let analysis = self.current_analysis()?;
        let mut summaries = collect_summaries(analysis);
        if summaries.is_empty() {
            writeln!(out, "{MESSAGE_NO_PAIRS}")?;
            return Ok(());
        }

        sort_summaries(&mut summaries, metric, order);
        let shown = limit.unwrap_or(summaries.len()).min(summaries.len());
        for summary in &summaries[..shown] {
            writeln!(
                out,
                "{}-{}: {}",
                summary.first_identifier,
                summary.second_identifier,
                format_metric_value(metric, metric.extract(summary))
            )?;
        }
        Ok(())
    }

    fn cmd_top(&mut self, cursor: &mut ArgCursor<'_>, out: &mut dyn Write) -> Result<()> {
        let limit = cursor.next_positive()?;
        self.cmd_list(cursor, Some(limit), out)
    }

    fn cmd_histogram(&mut self, cursor: &mut ArgCursor<'_>, out: &mut dyn Write) -> Result<()> {
        let metric =
            ListMetric::parse(cursor.next_str()?).ok_or_else(|| anyhow!(ERROR_INVALID_METRIC))?;
        cursor.finish()?;
        if !metric.is_percentage() {
            return Err(anyhow!(ERROR_METRIC_NOT_PERCENTAGE));
        }

        let analysis = self.current_analysis()?;
        let buckets = histogram_buckets(&collect_summaries(analysis), metric);
        for bucket in (0..HISTOGRAM_CLASSES).rev() {
            let count = buckets[bucket];
            writeln!(out, ":{} {}", "|".repeat(count), count)?;
        }
        Ok(())
    }

    fn cmd_edit(&mut self, cursor: &mut ArgCursor<'_>, out: &mut dyn Write) -> Result<()> {
        let first = cursor.next_str()?.to_string();
        let second = cursor.next_str()?.to_string();
        cursor.finish()?;

        // Opening once up front validates the pair before the mode is entered.
        self.session.open_editor(&first, &second)?;

        let state = EditState::new(first, second, self.config.editing.context_size);
        state.print_status(&mut self.session, out)?;
        self.editing = Some(state);
        Ok(())
    }

    fn cmd_clear(&mut self, cursor: &ArgCursor<'_>, out: &mut dyn Write) -> Result<()> {
        cursor.finish()?;
        self.session.clear();
        writeln!(out, "{MESSAGE_CLEARED}")?;
        Ok(())
    }

    fn current_analysis(&self) -> Result<&Analysis> {
        Ok(self.session.analysis().ok_or(CoreError::NoAnalysisAvailable)?)
    }
}

fn print_store_outcome(out: &mut dyn Write, outcome: StoreOutcome, identifier: &str) -> Result<()> {
    match outcome {
        StoreOutcome::Loaded => writeln!(out, "Loaded {identifier}")?,
        StoreOutcome::Updated => writeln!(out, "Updated {identifier}")?,
    }
    Ok(())
}

fn print_error(err: &mut dyn Write, error: &anyhow::Error) -> Result<()> {
    writeln!(err, "Error: {error}")?;
    Ok(())
}
