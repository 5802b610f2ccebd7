//! Inclusive calendar date ranges.

use super::*;

/// An inclusive range of calendar dates.
///
/// The range is never validated: a range whose start falls after its end simply yields no dates.
/// Iterating borrows the range, so the same range can be walked any number of times.
///
/// ```
/// use dailypaper::dates::DateRange;
///
/// let range = DateRange::parse("2024-01-01", "2024-01-03").unwrap();
/// let days: Vec<_> = range.iter().map(|d| d.to_string()).collect();
/// assert_eq!(days, ["2024-01-01", "2024-01-02", "2024-01-03"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
  /// First date of the range
  pub start: NaiveDate,
  /// Last date of the range, included
  pub end:   NaiveDate,
}

/// Iterator over the dates of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Dates {
  /// Next date to yield, `None` once exhausted
  next: Option<NaiveDate>,
  /// Inclusive upper bound
  end:  NaiveDate,
}

impl DateRange {
  /// Creates a range from `start` to `end`, both included.
  pub fn new(start: NaiveDate, end: NaiveDate) -> Self { Self { start, end } }

  /// Parses a range from two ISO `YYYY-MM-DD` strings.
  pub fn parse(start: &str, end: &str) -> Result<Self> {
    Ok(Self::new(parse_date(start)?, parse_date(end)?))
  }

  /// The two day window ending on `today`.
  pub fn ending_on(today: NaiveDate) -> Self {
    Self::new(today.pred_opt().unwrap_or(today), today)
  }

  /// Returns whether `date` falls within the range.
  pub fn contains(&self, date: NaiveDate) -> bool { self.start <= date && date <= self.end }

  /// Iterates every date in the range in chronological order.
  pub fn iter(&self) -> Dates { Dates { next: Some(self.start), end: self.end } }
}

impl Display for DateRange {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} to {}", self.start, self.end)
  }
}

impl IntoIterator for &DateRange {
  type IntoIter = Dates;
  type Item = NaiveDate;

  fn into_iter(self) -> Dates { self.iter() }
}

impl Iterator for Dates {
  type Item = NaiveDate;

  fn next(&mut self) -> Option<NaiveDate> {
    let current = self.next.filter(|date| *date <= self.end)?;
    self.next = current.succ_opt();
    Some(current)
  }
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
    .map_err(|_| DailyPaperError::InvalidDate(input.to_string()))
}
