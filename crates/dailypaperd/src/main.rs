//! Command line driver for the dailypaper job.
//!
//! It exposes the two halves of the job separately and together:
//!
//! ```bash
//! # Download the listed papers for a date range
//! dailypaper pull --start 2024-06-14 --end 2024-06-15 --out papers --log-file logs/pull.log
//!
//! # Write markdown summaries for papers already downloaded
//! dailypaper summarize --start 2024-06-14 --end 2024-06-15
//!
//! # Yesterday and today, into ./papers and ./summaries, logging to ./daily_paper_job.log
//! dailypaper daily
//! ```
//!
//! Per-paper and per-date failures are reported but do not change the exit status. Only an error
//! that stops a command outright exits non-zero.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{path::PathBuf, process::ExitCode};

use chrono::NaiveDate;
use clap::{builder::ArgAction, Parser, Subcommand};
use console::style;
use dailypaper::{dates::DateRange, prelude::*};
use tracing::{debug, error};

pub mod commands;
pub mod error;
pub mod logging;

use crate::{commands::*, error::*};

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
static WARNING_PREFIX: &str = "! ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";
/// Prefix for per-paper result lines
static ITEM_PREFIX: &str = "    ↳ ";

/// Command line interface configuration and argument parsing
#[derive(Parser, Debug)]
#[command(author, version, about = "Pull newly published papers and summarize them")]
pub struct Cli {
  /// Verbose mode (-v, -vv) for more logging detail
  #[arg(
        short,
        long,
        alias = "debug",
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,
}

/// Parses an ISO `YYYY-MM-DD` date argument.
fn parse_date_arg(input: &str) -> std::result::Result<NaiveDate, String> {
  dailypaper::dates::parse_date(input).map_err(|e| e.to_string())
}

/// Entry point for the dailypaper CLI.
///
/// Sets up logging for the chosen command, runs it, and maps the outcome to an exit status. An
/// error that escapes a command is logged with its full source chain.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  let cli = Cli::parse();

  let _logging = match logging::init(cli.verbose, cli.command.log_file().as_deref()) {
    Ok(session) => session,
    Err(e) => {
      eprintln!("{} {}", style(ERROR_PREFIX).red(), style(error_chain(&e)).red());
      return ExitCode::FAILURE;
    },
  };
  debug!("Started with arguments: {cli:?}");

  let result = match cli.command {
    Commands::Pull(options) => pull(options).await,
    Commands::Summarize(options) => summarize(options),
    Commands::Daily => daily().await,
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!("Unhandled error: {}", error_chain(&e));
      eprintln!("{} Critical error: {}", style(ERROR_PREFIX).red(), style(&e).red());
      ExitCode::FAILURE
    },
  }
}
