//! Module for the "summarize" command.

use dailypaper::{
  convert::PdfConverter,
  summary::{SummaryGenerator, SummaryReport},
};

use super::*;

/// Options for [`Commands::Summarize`].
#[derive(clap::Args, Debug, Clone)]
pub struct SummarizeOptions {
  /// Start date (YYYY-MM-DD)
  #[arg(long, value_parser = parse_date_arg)]
  pub start: NaiveDate,

  /// End date (YYYY-MM-DD), included
  #[arg(long, value_parser = parse_date_arg)]
  pub end: NaiveDate,

  /// Folder holding downloaded papers
  #[arg(long, default_value = "papers")]
  pub papers: PathBuf,

  /// Folder summaries are written to
  #[arg(long, default_value = "summaries")]
  pub summaries: PathBuf,

  /// Log file path
  #[arg(long)]
  pub log_file: Option<PathBuf>,
}

/// Function for the [`Commands::Summarize`] in the CLI.
pub fn summarize(options: SummarizeOptions) -> Result<()> {
  let range = DateRange::new(options.start, options.end);
  let report = SummaryGenerator::new(HarvestConfig::default(), PdfConverter::new()).generate(
    &options.papers,
    &options.summaries,
    &range,
  )?;
  print_summaries(&report);
  Ok(())
}

/// Prints the summaries written and the documents that failed to convert.
pub fn print_summaries(report: &SummaryReport) {
  for path in report.written() {
    println!("{ITEM_PREFIX}Summary: {}", style(path.display()).yellow());
  }
  for (path, e) in &report.failed {
    println!(
      "    {} Could not convert {}: {}",
      style(ERROR_PREFIX).red(),
      style(path.display()).yellow(),
      style(e).red()
    );
  }

  if report.written().is_empty() {
    println!("{} No markdown files created", style(INFO_PREFIX).cyan());
  } else {
    println!(
      "{} {} markdown files created",
      style(SUCCESS_PREFIX).green(),
      report.written().len()
    );
  }
}
