//! # Date Arithmetic
//!
//! Parsing of the timestamp formats Jira and the config file use, plus the
//! interval aggregations the reports print.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::error::ConnectorError;

/// Offset-carrying formats, most specific first. Jira sends
/// `2017-01-23T17:00:40.000+0300`, which RFC 3339 does not accept.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%z"];

/// Formats without an offset; these are read as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a timestamp, keeping the offset it was written with
fn parse_with_offset(text: &str) -> Result<DateTime<FixedOffset>, ConnectorError> {
  let text = text.trim();

  if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
    return Ok(parsed);
  }

  for format in OFFSET_FORMATS {
    if let Ok(parsed) = DateTime::<FixedOffset>::parse_from_str(text, format) {
      return Ok(parsed);
    }
  }

  for format in NAIVE_FORMATS {
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
      return Ok(parsed.and_utc().fixed_offset());
    }
  }

  NaiveDate::parse_from_str(text, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|parsed| parsed.and_utc().fixed_offset())
    .ok_or_else(|| ConnectorError::InvalidDate(text.to_string()))
}

/// Parse a timestamp into an absolute point in time
pub fn parse_date(text: &str) -> Result<DateTime<Utc>, ConnectorError> {
  parse_with_offset(text).map(|parsed| parsed.with_timezone(&Utc))
}

/// Parse a timestamp into the clock time it shows in its own offset.
/// `2021-03-01T00:30:00.000+0300` stays `2021-03-01 00:30`.
pub fn parse_wall_clock(text: &str) -> Result<NaiveDateTime, ConnectorError> {
  parse_with_offset(text).map(|parsed| parsed.naive_local())
}

/// Parse an optional timestamp; `None` stays `None`
pub fn parse_optional_date(text: Option<&str>) -> Result<Option<DateTime<Utc>>, ConnectorError> {
  text.map(parse_date).transpose()
}

/// Parse every present entry, dropping absent ones
fn parse_present<'a, I>(dates: I) -> Result<Vec<DateTime<Utc>>, ConnectorError>
where
  I: IntoIterator<Item = Option<&'a str>>,
{
  dates.into_iter().flatten().map(parse_date).collect()
}

/// Total span covered by the dates: absent entries are skipped, the rest are
/// sorted chronologically and their consecutive gaps summed. Zero when fewer
/// than two dates are present.
pub fn total_duration<'a, I>(dates: I) -> Result<TimeDelta, ConnectorError>
where
  I: IntoIterator<Item = Option<&'a str>>,
{
  let mut parsed = parse_present(dates)?;
  parsed.sort();

  Ok(
    parsed
      .windows(2)
      .map(|pair| pair[1] - pair[0])
      .fold(TimeDelta::zero(), |total, delta| total + delta),
  )
}

/// Average gap between consecutive dates in the given order (`next - current`).
/// Absent entries are skipped. Zero when fewer than two dates are present.
pub fn average_duration<'a, I>(dates: I) -> Result<TimeDelta, ConnectorError>
where
  I: IntoIterator<Item = Option<&'a str>>,
{
  let parsed = parse_present(dates)?;
  let deltas: Vec<TimeDelta> = parsed.windows(2).map(|pair| pair[1] - pair[0]).collect();

  let Ok(count) = i64::try_from(deltas.len()) else {
    return Ok(TimeDelta::zero());
  };
  if count == 0 {
    return Ok(TimeDelta::zero());
  }

  let total_ms: i64 = deltas.iter().map(TimeDelta::num_milliseconds).sum();
  Ok(TimeDelta::milliseconds(total_ms / count))
}

/// Render a clock time the way JQL date predicates expect it. Jira reads the
/// value in the searching user's time zone, so no conversion happens here.
pub fn format_jql_date(date: &NaiveDateTime) -> String {
  date.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
  use chrono::{Datelike, Timelike};

  use super::*;

  #[test]
  fn test_parse_jira_timestamp_with_compact_offset() {
    let parsed = parse_date("2017-01-23T17:00:40.000+0300").unwrap();
    assert_eq!(parsed.hour(), 14);
    assert_eq!(parsed.minute(), 0);
    assert_eq!(parsed.second(), 40);
  }

  #[test]
  fn test_parse_supported_formats() {
    for text in [
      "2021-01-01T00:00:00Z",
      "2021-01-01T00:00:00+00:00",
      "2021-01-01T00:00:00.000+0000",
      "2021-01-01T00:00:00",
      "2021-01-01T00:00:00.000",
      "2021-01-01 00:00:00",
      "2021-01-01 00:00",
      "2021-01-01",
      "  2021-01-01  ",
    ] {
      let parsed = parse_date(text).unwrap_or_else(|e| panic!("{text}: {e}"));
      assert_eq!((parsed.year(), parsed.month(), parsed.day(), parsed.hour()), (2021, 1, 1, 0));
    }
  }

  #[test]
  fn test_parse_invalid_date() {
    let error = parse_date("next tuesday").unwrap_err();
    assert!(matches!(error, ConnectorError::InvalidDate(ref text) if text == "next tuesday"));
    assert!(parse_date("").is_err());
  }

  #[test]
  fn test_parse_optional_date() {
    assert!(parse_optional_date(None).unwrap().is_none());
    assert!(parse_optional_date(Some("2021-01-01")).unwrap().is_some());
    assert!(parse_optional_date(Some("garbage")).is_err());
  }

  #[test]
  fn test_average_duration_of_consecutive_deltas() {
    let dates = ["2021-01-01T00:00:00", "2021-01-01T01:00:00", "2021-01-01T03:00:00"];

    let average = average_duration(dates.iter().map(|d| Some(*d))).unwrap();

    assert_eq!(average, TimeDelta::minutes(90));
  }

  #[test]
  fn test_average_duration_skips_absent_entries() {
    let dates = [
      Some("2021-01-01T00:00:00"),
      None,
      Some("2021-01-01T02:00:00"),
      None,
    ];

    assert_eq!(average_duration(dates).unwrap(), TimeDelta::hours(2));
  }

  #[test]
  fn test_durations_default_to_zero() {
    assert_eq!(average_duration([]).unwrap(), TimeDelta::zero());
    assert_eq!(average_duration([Some("2021-01-01"), None]).unwrap(), TimeDelta::zero());
    assert_eq!(total_duration([]).unwrap(), TimeDelta::zero());
    assert_eq!(total_duration([None, Some("2021-01-01")]).unwrap(), TimeDelta::zero());
  }

  #[test]
  fn test_total_duration_sorts_before_summing() {
    let dates = [
      Some("2021-01-03T00:00:00"),
      Some("2021-01-01T00:00:00"),
      None,
      Some("2021-01-02T12:00:00"),
    ];

    assert_eq!(total_duration(dates).unwrap(), TimeDelta::days(2));
  }

  #[test]
  fn test_durations_reject_unparseable_entries() {
    assert!(total_duration([Some("2021-01-01"), Some("soon")]).is_err());
    assert!(average_duration([Some("later"), Some("2021-01-01")]).is_err());
  }

  #[test]
  fn test_format_jql_date_keeps_clock_time() {
    let parsed = parse_wall_clock("2017-01-23T17:00:40.000+0300").unwrap();
    assert_eq!(format_jql_date(&parsed), "2017-01-23 17:00");

    let past_midnight = parse_wall_clock("2021-03-01T00:30:00.000+0300").unwrap();
    assert_eq!(format_jql_date(&past_midnight), "2021-03-01 00:30");

    let naive = parse_wall_clock("2021-03-01").unwrap();
    assert_eq!(format_jql_date(&naive), "2021-03-01 00:00");
  }
}
