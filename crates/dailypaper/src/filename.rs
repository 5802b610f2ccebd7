//! The on-disk naming convention for downloaded papers.
//!
//! A downloaded paper is stored as `YYYYMMDD_paper<ordinal>_<identifier>.pdf`, which makes the
//! filename the only place its metadata is kept. [`PaperRecord`] is the structured form;
//! [`encode`] and [`decode`] convert between the two.
//!
//! ```
//! use chrono::NaiveDate;
//! use dailypaper::filename::{decode, encode};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let name = encode(date, 1, "2401.00001");
//! assert_eq!(name, "20240615_paper1_2401.00001.pdf");
//!
//! let record = decode(&name).unwrap();
//! assert_eq!(record.identifier, "2401.00001");
//! assert!(decode("notes.txt").is_none());
//! ```

use super::*;

/// Extension of downloaded documents.
pub const DOCUMENT_EXTENSION: &str = "pdf";

lazy_static! {
  /// Matches `YYYYMMDD_paper<N>_<identifier>.pdf` exactly.
  static ref PAPER_FILENAME: Regex = Regex::new(r"^([0-9]{8})_paper([0-9]+)_(.+)\.pdf$").unwrap();
}

/// Metadata about one paper, recovered from or encoded into a filename.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaperRecord {
  /// Date of the listing the paper was found on
  pub date:       NaiveDate,
  /// 1-based position of the paper on that date's listing
  pub ordinal:    u32,
  /// Identifier of the paper, e.g. an arXiv id
  pub identifier: String,
}

impl PaperRecord {
  /// Creates a new record.
  pub fn new(date: NaiveDate, ordinal: u32, identifier: impl Into<String>) -> Self {
    Self { date, ordinal, identifier: identifier.into() }
  }

  /// The filename stem shared by the document and its summary.
  pub fn stem(&self) -> String {
    format!("{}_paper{}_{}", self.date.format("%Y%m%d"), self.ordinal, self.identifier)
  }

  /// The document filename for this record.
  pub fn file_name(&self) -> String { format!("{}.{DOCUMENT_EXTENSION}", self.stem()) }

  /// Parses a document filename, returning `None` for anything that is not a paper.
  pub fn from_file_name(name: &str) -> Option<Self> {
    let captures = PAPER_FILENAME.captures(name)?;
    let date = NaiveDate::parse_from_str(&captures[1], "%Y%m%d").ok()?;
    let ordinal = captures[2].parse().ok()?;
    Some(Self::new(date, ordinal, &captures[3]))
  }
}

/// Encodes a date, ordinal, and identifier into a document filename.
pub fn encode(date: NaiveDate, ordinal: u32, identifier: &str) -> String {
  PaperRecord::new(date, ordinal, identifier).file_name()
}

/// Decodes a document filename, returning `None` if it does not follow the convention.
pub fn decode(name: &str) -> Option<PaperRecord> { PaperRecord::from_file_name(name) }
