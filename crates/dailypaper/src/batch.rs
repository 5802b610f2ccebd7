//! The per-date download loop.
//!
//! [`BatchDownloader::run`] walks a [`DateRange`](crate::dates::DateRange) in chronological order.
//! For every date it resolves the listing, then fetches each listed document one after the other,
//! pausing [`HarvestConfig::download_delay`] between documents of the same date. Failures are
//! recorded at the smallest unit they concern and never stop the loop:
//!
//! - a listing failure is recorded on its [`DateReport`] and the next date is processed
//! - a fetch failure is recorded on its [`ItemReport`] and the next identifier is processed
//!
//! Only failing to create the output directory aborts a run.

use crate::{
  dates::DateRange,
  fetch::{DocumentFetcher, FetchOutcome},
  listing::ListingResolver,
};

use super::*;

/// Result of fetching one listed paper.
#[derive(Debug)]
pub struct ItemReport {
  /// 1-based position of the paper on its listing
  pub ordinal:    u32,
  /// Identifier taken from the listing
  pub identifier: String,
  /// What happened when fetching the document
  pub outcome:    Result<FetchOutcome>,
}

/// Result of processing one date.
#[derive(Debug)]
pub struct DateReport {
  /// The date that was processed
  pub date:    NaiveDate,
  /// Per-paper results, or the error that prevented resolving the listing
  pub listing: Result<Vec<ItemReport>>,
}

/// Result of a whole batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
  /// One entry per date, in chronological order
  pub dates: Vec<DateReport>,
}

impl BatchReport {
  /// All item reports across every successfully resolved date.
  pub fn items(&self) -> impl Iterator<Item = &ItemReport> {
    self.dates.iter().filter_map(|d| d.listing.as_ref().ok()).flatten()
  }

  /// Number of documents freshly downloaded.
  pub fn downloaded(&self) -> usize {
    self.items().filter(|i| matches!(i.outcome, Ok(FetchOutcome::Downloaded(_)))).count()
  }

  /// Number of documents skipped because they were already on disk.
  pub fn already_present(&self) -> usize {
    self.items().filter(|i| matches!(i.outcome, Ok(FetchOutcome::AlreadyPresent(_)))).count()
  }

  /// Number of documents the host reported as unavailable.
  pub fn unavailable(&self) -> usize {
    self.items().filter(|i| matches!(i.outcome, Ok(FetchOutcome::Unavailable { .. }))).count()
  }

  /// Number of documents whose fetch failed with an error.
  pub fn failed_items(&self) -> usize { self.items().filter(|i| i.outcome.is_err()).count() }

  /// Number of dates whose listing could not be resolved.
  pub fn failed_dates(&self) -> usize { self.dates.iter().filter(|d| d.listing.is_err()).count() }
}

/// Drives the listing resolver and document fetcher across a date range.
#[derive(Debug, Clone)]
pub struct BatchDownloader {
  /// Resolves each date into identifiers
  resolver: ListingResolver,
  /// Downloads each identifier's document
  fetcher:  DocumentFetcher,
  /// Pause between documents of the same date
  delay:    Duration,
}

impl BatchDownloader {
  /// Creates a downloader with a fresh HTTP client built from `config`.
  pub fn new(config: HarvestConfig) -> Result<Self> {
    let client = config.http_client()?;
    Ok(Self {
      resolver: ListingResolver::new(client.clone(), config.clone())?,
      fetcher:  DocumentFetcher::new(client, config.clone()),
      delay:    config.download_delay,
    })
  }

  /// Downloads the listed papers of every date in `range` into `out_dir`.
  pub async fn run(&self, range: &DateRange, out_dir: &Path) -> Result<BatchReport> {
    self.run_range(range, out_dir).instrument(info_span!("batch", %range)).await
  }

  /// Walks every date of `range`, recording one [`DateReport`] each.
  async fn run_range(&self, range: &DateRange, out_dir: &Path) -> Result<BatchReport> {
    info!("Starting paper download from {} to {}", range.start, range.end);
    info!("Output directory: {}", out_dir.display());
    tokio::fs::create_dir_all(out_dir).await?;
    debug!("Ensured output directory exists: {}", out_dir.display());

    let mut report = BatchReport::default();
    for date in range {
      let listing = self.run_date(date, out_dir).instrument(info_span!("date", %date)).await;
      report.dates.push(DateReport { date, listing });
    }

    info!(
      "Batch finished: {} downloaded, {} already present, {} unavailable, {} failed, {} dates \
       failed",
      report.downloaded(),
      report.already_present(),
      report.unavailable(),
      report.failed_items(),
      report.failed_dates()
    );
    Ok(report)
  }

  /// Resolves one date and fetches each of its documents.
  async fn run_date(&self, date: NaiveDate, out_dir: &Path) -> Result<Vec<ItemReport>> {
    info!("Processing date: {date}");
    let identifiers = self.resolver.resolve(date).await.inspect_err(|e| {
      error!("Failed to get paper links for {date}: {e}");
    })?;

    let mut items = Vec::with_capacity(identifiers.len());
    for (index, identifier) in identifiers.iter().enumerate() {
      let ordinal = index as u32 + 1;
      let file_name = filename::encode(date, ordinal, identifier);
      let outcome = self.fetcher.fetch(identifier, out_dir, &file_name).await;
      if let Err(e) = &outcome {
        error!("Error downloading {identifier}: {e}");
      }
      items.push(ItemReport { ordinal, identifier: identifier.clone(), outcome });

      if index + 1 < identifiers.len() && !self.delay.is_zero() {
        debug!("Sleeping for {:?} before next download", self.delay);
        tokio::time::sleep(self.delay).await;
      }
    }
    Ok(items)
  }
}
