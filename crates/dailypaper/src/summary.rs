//! Markdown summary generation.
//!
//! The [`SummaryGenerator`] scans a directory of downloaded papers, keeps the files whose names
//! decode to a [`PaperRecord`] dated within the requested range, converts each one to text, and
//! writes `<stem>.md` next to the other summaries. Summaries are rewritten on every run.
//!
//! A conversion failure skips that one paper and writes nothing for it.

use crate::{convert::DocumentConverter, dates::DateRange};

use super::*;

/// Extension of summary documents.
pub const SUMMARY_EXTENSION: &str = "md";

/// Body written when a document converted to no text.
const EMPTY_BODY_NOTICE: &str = "Failed to extract paper as markdown.";

/// A downloaded document whose filename follows the naming convention.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceDocument {
  /// Metadata decoded from the filename
  pub record: PaperRecord,
  /// Location of the document
  pub path:   PathBuf,
}

/// Result of a summary run.
#[derive(Debug, Default)]
pub struct SummaryReport {
  /// Summary files written, in processing order
  pub written: Vec<PathBuf>,
  /// Documents that could not be converted, with the reason
  pub failed:  Vec<(PathBuf, DailyPaperError)>,
}

impl SummaryReport {
  /// Paths of the summary files written.
  pub fn written(&self) -> &[PathBuf] { &self.written }
}

/// Converts downloaded papers into markdown summaries.
#[derive(Debug, Clone)]
pub struct SummaryGenerator<C> {
  /// Source of the reference link templates
  config:    HarvestConfig,
  /// Document-to-text converter
  converter: C,
}

impl<C: DocumentConverter> SummaryGenerator<C> {
  /// Creates a generator using `converter` for document text.
  pub fn new(config: HarvestConfig, converter: C) -> Self { Self { config, converter } }

  /// Writes a summary for every paper in `papers_dir` dated within `range`.
  ///
  /// Only failing to list `papers_dir` or to create `summaries_dir` is an error. A missing
  /// `papers_dir` is treated as empty.
  pub fn generate(
    &self,
    papers_dir: &Path,
    summaries_dir: &Path,
    range: &DateRange,
  ) -> Result<SummaryReport> {
    let _span = info_span!("summaries", %range).entered();

    let papers = collect_papers(papers_dir, range)?;
    info!("Found {} papers between {} and {}", papers.len(), range.start, range.end);
    std::fs::create_dir_all(summaries_dir)?;

    let mut report = SummaryReport::default();
    for paper in papers {
      let target = summaries_dir.join(format!("{}.{SUMMARY_EXTENSION}", paper.record.stem()));
      info!("Converting document: {}", paper.path.display());

      let text = match self.converter.convert(&paper.path) {
        Ok(text) => text,
        Err(e) => {
          error!("Error processing PDF {}: {e}", paper.path.display());
          report.failed.push((paper.path, e));
          continue;
        },
      };

      let content = self.render(&paper.record, &text);
      if let Err(e) = std::fs::write(&target, content) {
        error!("Error writing summary {}: {e}", target.display());
        report.failed.push((paper.path, e.into()));
        continue;
      }
      info!("Created markdown for paper: {}", target.display());
      report.written.push(target);
    }

    info!("Processed {} papers into markdown files", report.written.len());
    Ok(report)
  }

  /// Renders the summary document for one paper.
  pub fn render(&self, record: &PaperRecord, text: &str) -> String {
    let id = &record.identifier;
    let mut content = format!("# Paper: {id}\n\n");
    content.push_str(&format!("- **Date**: {}\n", record.date.format("%Y-%m-%d")));
    content.push_str(&format!("- **Paper Number**: {}\n", record.ordinal));
    content.push_str(&format!("- **ArXiv ID**: [{id}]({})\n", self.config.abstract_url(id)));
    content.push_str(&format!(
      "- **HuggingFace Link**: [View on HuggingFace]({})\n\n",
      self.config.discussion_url(id)
    ));

    if text.trim().is_empty() {
      content.push_str(&format!("## Summary\n\n{EMPTY_BODY_NOTICE}\n"));
    } else {
      content.push_str(&format!("## Paper\n\n{text}\n"));
    }
    content
  }
}

/// Lists the papers in `dir` dated within `range`, sorted by date, ordinal, and identifier.
pub fn collect_papers(dir: &Path, range: &DateRange) -> Result<Vec<SourceDocument>> {
  if !dir.is_dir() {
    warn!("Papers directory {} does not exist", dir.display());
    return Ok(Vec::new());
  }

  let mut papers = Vec::new();
  for entry in std::fs::read_dir(dir)? {
    let entry = entry?;
    // Symlinked papers count; `is_file` follows links.
    if !entry.path().is_file() {
      continue;
    }
    let name = entry.file_name();
    let Some(record) = name.to_str().and_then(filename::decode) else {
      trace!("Skipping {name:?}, not a paper");
      continue;
    };
    if range.contains(record.date) {
      papers.push(SourceDocument { record, path: entry.path() });
    } else {
      trace!("Skipping {name:?}, outside {range}");
    }
  }
  papers.sort();
  Ok(papers)
}
