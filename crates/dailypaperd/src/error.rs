//! Error types for the dailypaper CLI.

use std::fmt::Write;

use dailypaper::error::DailyPaperError;
use thiserror::Error;

/// Error type alias used for the [`dailypaperd`](crate) binary.
pub type Result<T> = core::result::Result<T, DailyPaperdError>;

/// Errors that end a CLI run with a non-zero exit status.
#[derive(Error, Debug)]
pub enum DailyPaperdError {
  /// An error returned by the dailypaper library.
  #[error(transparent)]
  DailyPaper(#[from] DailyPaperError),

  /// A file system operation in the CLI itself failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The log file could not be opened.
  #[error("Failed to open log file: {0}")]
  Logging(String),
}

/// Formats an error followed by every error in its source chain.
pub fn error_chain(err: &dyn std::error::Error) -> String {
  let mut chain = err.to_string();
  let mut source = err.source();
  while let Some(cause) = source {
    let _ = write!(chain, "\n  caused by: {cause}");
    source = cause.source();
  }
  chain
}
