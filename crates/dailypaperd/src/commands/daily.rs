//! Module for the "daily" command.

use dailypaper::daily::DailyJob;

use super::{pull::print_batch, summarize::print_summaries, *};

/// Folder papers are downloaded to, relative to the working directory.
pub const PAPERS_DIR: &str = "papers";

/// Folder summaries are written to, relative to the working directory.
pub const SUMMARIES_DIR: &str = "summaries";

/// Log file of the daily job, relative to the working directory.
pub const LOG_FILE: &str = "daily_paper_job.log";

/// Function for the [`Commands::Daily`] in the CLI.
///
/// A failed download step is logged and reported but still exits successfully; only an error in
/// the summary step is returned.
pub async fn daily() -> Result<()> {
  let report = DailyJob::new(HarvestConfig::default(), PAPERS_DIR, SUMMARIES_DIR).run().await?;

  match &report.batch {
    Ok(batch) => print_batch(batch),
    Err(e) => println!(
      "{} Daily paper job failed due to errors in paper pulling: {}",
      style(ERROR_PREFIX).red(),
      style(e).red()
    ),
  }
  if let Some(summaries) = &report.summaries {
    print_summaries(summaries);
  }
  Ok(())
}
