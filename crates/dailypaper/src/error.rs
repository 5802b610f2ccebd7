//! Error types for the dailypaper library.
//!
//! Every failure in the pipeline is contained at the smallest unit of work it concerns: one date,
//! one identifier, or one file. The enclosing loop records the error in its report and moves on, so
//! most of these values end up inside [`crate::batch::BatchReport`] or
//! [`crate::summary::SummaryReport`] rather than aborting a run.
//!
//! # Examples
//!
//! ```
//! use dailypaper::error::{DailyPaperError, ErrorKind};
//!
//! let err = DailyPaperError::Parse("anchor without href".into());
//! assert_eq!(err.kind(), ErrorKind::Parse);
//! ```

use thiserror::Error;

/// Error type alias used for the [`dailypaper`](crate) crate.
pub type Result<T> = core::result::Result<T, DailyPaperError>;

/// Errors that can occur while pulling papers or generating summaries.
#[derive(Error, Debug)]
pub enum DailyPaperError {
  /// A network request failed before a response status was available.
  ///
  /// This covers connection failures, TLS errors, timeouts (when one is configured), and bodies
  /// that fail mid-stream.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A request that must succeed came back with a non-success status.
  #[error("Request to {url} failed with status {status}")]
  HttpStatus {
    /// The URL that was requested
    url:    String,
    /// The status the server answered with
    status: reqwest::StatusCode,
  },

  /// The listing page did not have the expected structure.
  ///
  /// An empty listing is not a parse error; this is reserved for anchors that match the selector
  /// but carry no usable identifier.
  #[error("Failed to parse listing page: {0}")]
  Parse(String),

  /// A document could not be converted to text.
  #[error("Failed to convert document: {0}")]
  Conversion(String),

  /// PDF parsing errors from the lopdf library.
  #[error(transparent)]
  Pdf(#[from] lopdf::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// A date string was not in `YYYY-MM-DD` form.
  #[error("Invalid date \"{0}\", expected YYYY-MM-DD")]
  InvalidDate(String),

  /// A [`crate::HarvestConfig`] value was unusable.
  #[error("{0}")]
  Config(String),

  /// An isolated step panicked or was cancelled before it could report.
  #[error("Step failed: {0}")]
  StepFailed(String),
}

/// Coarse classification of a [`DailyPaperError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Transport failures and non-success statuses
  Network,
  /// Unexpected listing page structure
  Parse,
  /// Document-to-text failures
  Conversion,
  /// Filesystem, configuration, and step failures
  Other,
}

impl DailyPaperError {
  /// Returns the [`ErrorKind`] this error belongs to.
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Network(_) | Self::HttpStatus { .. } => ErrorKind::Network,
      Self::Parse(_) => ErrorKind::Parse,
      Self::Conversion(_) | Self::Pdf(_) => ErrorKind::Conversion,
      Self::Path(_) | Self::InvalidDate(_) | Self::Config(_) | Self::StepFailed(_) =>
        ErrorKind::Other,
    }
  }
}
