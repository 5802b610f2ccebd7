//! Listing page retrieval and identifier extraction.
//!
//! A listing page enumerates the papers published on one date. The [`ListingResolver`] fetches the
//! page for a date, selects the paper anchors with the configured CSS selector, and returns the
//! final path segment of each anchor's `href` as the paper identifier.

use scraper::{Html, Selector};

use super::*;

/// Resolves dates into paper identifiers.
#[derive(Debug, Clone)]
pub struct ListingResolver {
  /// Client shared with the rest of the run
  client: reqwest::Client,
  /// Endpoints, selector, and the per-date cap
  config: HarvestConfig,
}

impl ListingResolver {
  /// Creates a resolver, checking the configuration first.
  pub fn new(client: reqwest::Client, config: HarvestConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self { client, config })
  }

  /// Fetches the listing page for `date` and returns up to
  /// [`HarvestConfig::max_papers_per_date`] identifiers in page order.
  ///
  /// A transport failure or a non-success status is an error; a page with no matching anchors is
  /// not, and yields an empty list.
  pub async fn resolve(&self, date: NaiveDate) -> Result<Vec<String>> {
    let url = self.config.listing_url(date);
    info!("Fetching papers from {url}");

    let response = self.client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
      trace!("listing response: {response:?}");
      return Err(DailyPaperError::HttpStatus { url, status });
    }
    let body = response.text().await?;

    let identifiers = self.extract_identifiers(&body)?;
    info!("Found {} papers for {date}", identifiers.len());
    debug!("Identifiers: {identifiers:?}");
    Ok(identifiers)
  }

  /// Extracts identifiers from a listing page body.
  pub fn extract_identifiers(&self, html: &str) -> Result<Vec<String>> {
    let selector = Selector::parse(&self.config.listing_selector)
      .map_err(|e| DailyPaperError::Parse(format!("invalid selector: {e}")))?;
    let document = Html::parse_document(html);

    document
      .select(&selector)
      .take(self.config.max_papers_per_date)
      .map(|anchor| {
        let href = anchor
          .value()
          .attr("href")
          .ok_or_else(|| DailyPaperError::Parse("paper link has no href".to_string()))?;
        identifier_from_href(href)
      })
      .collect()
  }
}

/// Returns the last path segment of a link target.
fn identifier_from_href(href: &str) -> Result<String> {
  let path = href.split(['?', '#']).next().unwrap_or(href);
  match path.trim_end_matches('/').rsplit('/').next() {
    Some(segment) if !segment.is_empty() => Ok(segment.to_string()),
    _ => Err(DailyPaperError::Parse(format!("no identifier in link \"{href}\""))),
  }
}
