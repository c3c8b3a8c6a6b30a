//! Binary entry point: argument parsing, logging setup, and the session loop.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use seqmatch_cli::config::CliConfig;
use seqmatch_cli::Repl;

/// Interactive token-run matching over a set of texts.
#[derive(Debug, Parser)]
#[command(name = "seqmatch", version, about)]
struct Cli {
    /// Text files to load before the prompt
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Suppress the welcome message
    #[arg(short, long)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(io::stderr(), "Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let mut repl = Repl::new(config);
    if !cli.quiet {
        repl.print_welcome(&mut out)?;
    }
    for path in &cli.files {
        repl.preload(path, &mut out)?;
    }
    repl.run(stdin.lock(), &mut out, &mut err)
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}
