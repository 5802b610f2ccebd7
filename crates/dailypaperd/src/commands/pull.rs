//! Module for the "pull" command: the batch download over a date range.

use std::time::Duration;

use dailypaper::{
  batch::{BatchDownloader, BatchReport},
  fetch::FetchOutcome,
};

use super::*;

/// Options for [`Commands::Pull`].
#[derive(clap::Args, Debug, Clone)]
pub struct PullOptions {
  /// Start date (YYYY-MM-DD)
  #[arg(long, value_parser = parse_date_arg)]
  pub start: NaiveDate,

  /// End date (YYYY-MM-DD), included
  #[arg(long, value_parser = parse_date_arg)]
  pub end: NaiveDate,

  /// Output folder
  #[arg(long, default_value = "papers")]
  pub out: PathBuf,

  /// Log file path
  #[arg(long)]
  pub log_file: Option<PathBuf>,

  /// Maximum number of papers taken from each date's listing
  #[arg(long, default_value_t = 5)]
  pub max_papers: usize,

  /// Pause between downloads, in milliseconds
  #[arg(long, default_value_t = 1000)]
  pub delay_ms: u64,
}

impl PullOptions {
  /// The run configuration these options describe.
  pub fn config(&self) -> HarvestConfig {
    HarvestConfig::default()
      .with_max_papers_per_date(self.max_papers)
      .with_download_delay(Duration::from_millis(self.delay_ms))
  }
}

/// Function for the [`Commands::Pull`] in the CLI.
pub async fn pull(options: PullOptions) -> Result<()> {
  let range = DateRange::new(options.start, options.end);
  let report = BatchDownloader::new(options.config())?.run(&range, &options.out).await?;
  print_batch(&report);
  tracing::info!("Script completed successfully");
  Ok(())
}

/// Prints one block per date, then a totals line.
pub fn print_batch(report: &BatchReport) {
  for date in &report.dates {
    println!("\n{}", style(format!("=== {} ===", date.date)).bold());
    let items = match &date.listing {
      Ok(items) => items,
      Err(e) => {
        println!(
          "{} Failed to get paper links for {}: {}",
          style(ERROR_PREFIX).red(),
          date.date,
          style(e).red()
        );
        continue;
      },
    };
    if items.is_empty() {
      println!("{} No papers listed", style(INFO_PREFIX).cyan());
    }
    for item in items {
      match &item.outcome {
        Ok(FetchOutcome::Downloaded(path)) =>
          println!("{ITEM_PREFIX}Downloaded: {}", style(path.display()).yellow()),
        Ok(FetchOutcome::AlreadyPresent(path)) =>
          println!("{ITEM_PREFIX}Already downloaded: {}", style(path.display()).yellow()),
        Ok(FetchOutcome::Unavailable { status }) => println!(
          "    {} PDF not found for {} (status {status})",
          style(WARNING_PREFIX).yellow(),
          style(&item.identifier).cyan()
        ),
        Err(e) => println!(
          "    {} Error downloading {}: {}",
          style(ERROR_PREFIX).red(),
          style(&item.identifier).cyan(),
          style(e).red()
        ),
      }
    }
  }

  println!(
    "\n{} {} downloaded, {} already present, {} unavailable, {} failed",
    style(SUCCESS_PREFIX).green(),
    report.downloaded(),
    report.already_present(),
    report.unavailable(),
    report.failed_items() + report.failed_dates()
  );
}
