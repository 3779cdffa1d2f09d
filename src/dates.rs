use chrono::NaiveDate;
use std::fmt;

/// Parses a calendar date from a date or date-time string.
///
/// Only the date portion is kept: anything after a `T` or a space
/// (time of day, timezone) is dropped. A leading `+` sign, as emitted by
/// Wikidata-style endpoints, is accepted.
///
/// # Examples
/// ```
/// use tenure_ages::dates::parse_date;
/// use chrono::NaiveDate;
///
/// let date = parse_date("1940-01-01T00:00:00Z").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(1940, 1, 1).unwrap());
/// ```
///
/// # Errors
/// Returns `DateParseError` if the date portion is not a valid `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let date_part = unsigned
        .split(['T', ' '])
        .next()
        .unwrap_or_default();

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| DateParseError {
        input: input.to_string(),
    })
}

/// Signed number of whole days from `from` to `to`.
///
/// Negative when `to` precedes `from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Resolves an optional end date, substituting the configured fallback when absent.
pub fn resolve_end(end: Option<NaiveDate>, fallback: NaiveDate) -> NaiveDate {
    end.unwrap_or(fallback)
}

/// A date string that could not be split into year/month/day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    /// The offending input, verbatim
    pub input: String,
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Malformed date: '{}'", self.input)
    }
}

impl std::error::Error for DateParseError {}
