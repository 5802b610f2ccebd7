//! Run configuration.
//!
//! [`HarvestConfig`] collects every endpoint and policy knob the pipeline uses. It is built in code
//! (there is no configuration file) and the defaults reproduce the daily job's behavior: the
//! Hugging Face daily listing, arXiv PDFs, at most five papers per date, and a one second pause
//! between downloads.
//!
//! URL templates use `{date}` (ISO `YYYY-MM-DD`) or `{identifier}` placeholders:
//!
//! ```
//! use std::time::Duration;
//!
//! use dailypaper::HarvestConfig;
//!
//! let config = HarvestConfig::default()
//!   .with_listing_url_template("http://localhost:8080/papers/date/{date}")
//!   .with_download_delay(Duration::ZERO)
//!   .with_max_papers_per_date(3);
//! assert!(config.validate().is_ok());
//! ```

use scraper::Selector;

use super::*;

/// Placeholder substituted with the ISO date in listing URLs.
pub const DATE_PLACEHOLDER: &str = "{date}";

/// Placeholder substituted with a paper identifier in document and reference URLs.
pub const IDENTIFIER_PLACEHOLDER: &str = "{identifier}";

/// Endpoints and policy for a pull or summary run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestConfig {
  /// Listing page URL, containing [`DATE_PLACEHOLDER`]
  pub listing_url_template:    String,
  /// CSS selector for the paper anchors on a listing page
  pub listing_selector:        String,
  /// Document URL, containing [`IDENTIFIER_PLACEHOLDER`]
  pub document_url_template:   String,
  /// Abstract page URL used in summaries
  pub abstract_url_template:   String,
  /// Discussion page URL used in summaries
  pub discussion_url_template: String,
  /// Value of the `User-Agent` header sent with every request
  pub user_agent:              String,
  /// Maximum number of identifiers taken from one listing page
  pub max_papers_per_date:     usize,
  /// Pause between consecutive downloads within one date
  pub download_delay:          Duration,
  /// Per-request timeout; `None` waits indefinitely
  pub request_timeout:         Option<Duration>,
}

impl Default for HarvestConfig {
  fn default() -> Self {
    Self {
      listing_url_template:    "https://huggingface.co/papers/date/{date}".to_string(),
      listing_selector:        "div.w-full h3 a".to_string(),
      document_url_template:   "https://arxiv.org/pdf/{identifier}.pdf".to_string(),
      abstract_url_template:   "https://arxiv.org/abs/{identifier}".to_string(),
      discussion_url_template: "https://huggingface.co/papers/{identifier}".to_string(),
      user_agent:              "Mozilla/5.0".to_string(),
      max_papers_per_date:     5,
      download_delay:          Duration::from_secs(1),
      request_timeout:         None,
    }
  }
}

impl HarvestConfig {
  /// Sets the listing page URL template.
  pub fn with_listing_url_template(mut self, template: impl Into<String>) -> Self {
    self.listing_url_template = template.into();
    self
  }

  /// Sets the CSS selector used to find paper anchors.
  pub fn with_listing_selector(mut self, selector: impl Into<String>) -> Self {
    self.listing_selector = selector.into();
    self
  }

  /// Sets the document URL template.
  pub fn with_document_url_template(mut self, template: impl Into<String>) -> Self {
    self.document_url_template = template.into();
    self
  }

  /// Sets the abstract and discussion page templates used in summaries.
  pub fn with_reference_url_templates(
    mut self,
    abstract_template: impl Into<String>,
    discussion_template: impl Into<String>,
  ) -> Self {
    self.abstract_url_template = abstract_template.into();
    self.discussion_url_template = discussion_template.into();
    self
  }

  /// Sets the `User-Agent` header value.
  pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
    self.user_agent = user_agent.into();
    self
  }

  /// Sets how many identifiers are taken from each listing page.
  pub fn with_max_papers_per_date(mut self, max: usize) -> Self {
    self.max_papers_per_date = max;
    self
  }

  /// Sets the pause between consecutive downloads.
  pub fn with_download_delay(mut self, delay: Duration) -> Self {
    self.download_delay = delay;
    self
  }

  /// Sets a per-request timeout.
  pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
    self.request_timeout = Some(timeout);
    self
  }

  /// Checks that every template carries its placeholder and the selector parses.
  pub fn validate(&self) -> Result<()> {
    let templates = [
      ("listing_url_template", &self.listing_url_template, DATE_PLACEHOLDER),
      ("document_url_template", &self.document_url_template, IDENTIFIER_PLACEHOLDER),
      ("abstract_url_template", &self.abstract_url_template, IDENTIFIER_PLACEHOLDER),
      ("discussion_url_template", &self.discussion_url_template, IDENTIFIER_PLACEHOLDER),
    ];
    for (name, template, placeholder) in templates {
      if !template.contains(placeholder) {
        return Err(DailyPaperError::Config(format!(
          "{name} \"{template}\" is missing the {placeholder} placeholder"
        )));
      }
    }

    let selector = &self.listing_selector;
    Selector::parse(selector).map_err(|e| {
      DailyPaperError::Config(format!("Invalid listing selector \"{selector}\": {e}"))
    })?;
    Ok(())
  }

  /// Builds the listing URL for one date.
  pub fn listing_url(&self, date: NaiveDate) -> String {
    self.listing_url_template.replace(DATE_PLACEHOLDER, &date.format("%Y-%m-%d").to_string())
  }

  /// Builds the document URL for one identifier.
  pub fn document_url(&self, identifier: &str) -> String {
    self.document_url_template.replace(IDENTIFIER_PLACEHOLDER, identifier)
  }

  /// Builds the abstract page URL for one identifier.
  pub fn abstract_url(&self, identifier: &str) -> String {
    self.abstract_url_template.replace(IDENTIFIER_PLACEHOLDER, identifier)
  }

  /// Builds the discussion page URL for one identifier.
  pub fn discussion_url(&self, identifier: &str) -> String {
    self.discussion_url_template.replace(IDENTIFIER_PLACEHOLDER, identifier)
  }

  /// Builds the HTTP client shared by every request of a run.
  ///
  /// Proxy settings are not read from the environment.
  pub fn http_client(&self) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(self.user_agent.as_str()).no_proxy();
    if let Some(timeout) = self.request_timeout {
      builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
  }
}
