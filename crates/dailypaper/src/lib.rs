//! Daily discovery, download, and text conversion of newly published papers.
//!
//! `dailypaper` drives a small, strictly sequential pipeline:
//!
//! - Walk an inclusive range of calendar dates
//! - Resolve each date's listing page into a handful of paper identifiers
//! - Download each paper's PDF, skipping anything already on disk
//! - Convert downloaded PDFs into one markdown summary file per paper
//!
//! All state lives on the filesystem. A downloaded paper's metadata is encoded in its filename
//! (see [`filename`]), so a later summary run recovers everything it needs from a directory
//! listing.
//!
//! # Getting Started
//!
//! ```no_run
//! use std::path::Path;
//!
//! use dailypaper::{
//!   batch::BatchDownloader, convert::PdfConverter, dates::DateRange, summary::SummaryGenerator,
//!   HarvestConfig,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HarvestConfig::default();
//! let range = DateRange::parse("2024-06-14", "2024-06-15")?;
//!
//! let report = BatchDownloader::new(config.clone())?.run(&range, Path::new("papers")).await?;
//! println!("Downloaded {} papers", report.downloaded());
//!
//! let summaries = SummaryGenerator::new(config, PdfConverter::new())
//!   .generate(Path::new("papers"), Path::new("summaries"), &range)?;
//! println!("Wrote {} summaries", summaries.written().len());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`dates`]: Inclusive calendar date ranges
//! - [`filename`]: The `YYYYMMDD_paper<N>_<id>.pdf` naming convention
//! - [`listing`]: Listing page retrieval and identifier extraction
//! - [`fetch`]: Idempotent, streamed document downloads
//! - [`batch`]: The per-date download loop with failure isolation
//! - [`convert`]: Document-to-text conversion
//! - [`summary`]: Markdown summary generation
//! - [`daily`]: The yesterday-and-today job driver

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
  time::Duration,
};

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, error, info, info_span, trace, warn, Instrument};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod batch;
pub mod config;
pub mod convert;
pub mod daily;
pub mod dates;
pub mod error;
pub mod fetch;
pub mod filename;
pub mod listing;
pub mod summary;

pub use crate::config::HarvestConfig;
use crate::{error::*, filename::PaperRecord};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use dailypaper::prelude::*;
///
/// fn convert(converter: &impl DocumentConverter) -> Result<String, DailyPaperError> {
///   converter.convert(std::path::Path::new("papers/20240615_paper1_2401.00001.pdf"))
/// }
/// ```
pub mod prelude {
  pub use crate::{
    convert::DocumentConverter,
    error::{DailyPaperError, ErrorKind},
    HarvestConfig,
  };
}
