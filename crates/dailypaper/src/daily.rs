//! The daily job: pull yesterday's and today's papers, then summarize them.
//!
//! The download step runs as its own task. A panic inside it is caught at the task boundary and
//! reported as a failed step, the same way a crashed child process would be, so the driver always
//! gets to log an outcome. Summaries are only generated when the download step completed.

use chrono::Local;

use crate::{
  batch::{BatchDownloader, BatchReport},
  convert::{DocumentConverter, PdfConverter},
  dates::DateRange,
  summary::{SummaryGenerator, SummaryReport},
};

use super::*;

/// Outcome of one daily run.
#[derive(Debug)]
pub struct DailyReport {
  /// The two day window that was processed
  pub window:    DateRange,
  /// Result of the download step
  pub batch:     Result<BatchReport>,
  /// Result of the summary step, `None` when it was not attempted
  pub summaries: Option<SummaryReport>,
}

impl DailyReport {
  /// Whether both steps ran to completion.
  pub fn is_success(&self) -> bool { self.batch.is_ok() && self.summaries.is_some() }

  /// Summary files written by this run.
  pub fn written(&self) -> &[PathBuf] {
    self.summaries.as_ref().map(SummaryReport::written).unwrap_or_default()
  }
}

/// Driver for the yesterday-and-today job.
#[derive(Debug, Clone)]
pub struct DailyJob<C = PdfConverter> {
  /// Endpoints and policy for both steps
  config:        HarvestConfig,
  /// Where documents are downloaded
  papers_dir:    PathBuf,
  /// Where summaries are written
  summaries_dir: PathBuf,
  /// Document-to-text converter for the summary step
  converter:     C,
}

impl DailyJob<PdfConverter> {
  /// Creates a job writing documents to `papers_dir` and summaries to `summaries_dir`.
  pub fn new(
    config: HarvestConfig,
    papers_dir: impl Into<PathBuf>,
    summaries_dir: impl Into<PathBuf>,
  ) -> Self {
    Self {
      config,
      papers_dir: papers_dir.into(),
      summaries_dir: summaries_dir.into(),
      converter: PdfConverter::new(),
    }
  }
}

impl<C: DocumentConverter> DailyJob<C> {
  /// Replaces the document converter used by the summary step.
  pub fn with_converter<D: DocumentConverter>(self, converter: D) -> DailyJob<D> {
    DailyJob {
      config: self.config,
      papers_dir: self.papers_dir,
      summaries_dir: self.summaries_dir,
      converter,
    }
  }

  /// Runs the job for the window ending on today's local date.
  pub async fn run(&self) -> Result<DailyReport> { self.run_for(Local::now().date_naive()).await }

  /// Runs the job for the window ending on `today`.
  ///
  /// A failed download step is reported in the returned [`DailyReport`]. An `Err` means the summary
  /// step itself could not run.
  pub async fn run_for(&self, today: NaiveDate) -> Result<DailyReport> {
    let window = DateRange::ending_on(today);
    self.run_window(window).instrument(info_span!("daily", %window)).await
  }

  /// Downloads, then summarizes, one window.
  async fn run_window(&self, window: DateRange) -> Result<DailyReport> {
    info!("Starting daily paper job for {} to {}", window.start, window.end);

    let batch = match self.download(window).await {
      Ok(report) => {
        info!("Paper pulling completed successfully");
        report
      },
      Err(e) => {
        error!("Daily paper job failed due to errors in paper pulling: {e}");
        return Ok(DailyReport { window, batch: Err(e), summaries: None });
      },
    };

    let summaries = SummaryGenerator::new(self.config.clone(), &self.converter).generate(
      &self.papers_dir,
      &self.summaries_dir,
      &window,
    )?;

    if summaries.written().is_empty() {
      info!("Daily paper job completed successfully. No new markdown files created.");
    } else {
      let files: Vec<_> = summaries.written().iter().map(|p| p.display().to_string()).collect();
      info!("Daily paper job completed successfully. Markdown files created: {}", files.join(", "));
    }
    Ok(DailyReport { window, batch: Ok(batch), summaries: Some(summaries) })
  }

  /// Runs the download step in its own task.
  async fn download(&self, window: DateRange) -> Result<BatchReport> {
    let downloader = BatchDownloader::new(self.config.clone())?;
    let papers_dir = self.papers_dir.clone();
    let task = tokio::spawn(async move { downloader.run(&window, &papers_dir).await });
    match task.await {
      Ok(result) => result,
      Err(e) if e.is_panic() => Err(DailyPaperError::StepFailed(format!("download panicked: {e}"))),
      Err(e) => Err(DailyPaperError::StepFailed(format!("download was cancelled: {e}"))),
    }
  }
}
