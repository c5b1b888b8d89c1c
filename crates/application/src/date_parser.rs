//! Date/time to Unix timestamp conversion
//!
//! Accepts ISO 8601 / RFC 3339 input (offset honoured), naive date-times and
//! plain dates (read as UTC), a few relative words, and falls back to
//! natural-language parsing.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use domain::{DomainError, UnixTimestamp};
use tracing::debug;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a date/time string into a Unix timestamp, relative to the current time
///
/// # Errors
///
/// Returns `DomainError::InvalidDateTime` when no supported format matches.
pub fn parse_timestamp(input: &str) -> Result<UnixTimestamp, DomainError> {
    parse_timestamp_at(input, Utc::now())
}

/// Parse a date/time string into a Unix timestamp, resolving relative words
/// ("now", "yesterday", ...) against `now`
///
/// # Errors
///
/// Returns `DomainError::InvalidDateTime` when no supported format matches.
pub fn parse_timestamp_at(input: &str, now: DateTime<Utc>) -> Result<UnixTimestamp, DomainError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DomainError::InvalidDateTime("empty input".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        debug!(input = %input, "Parsed RFC 3339 timestamp");
        return Ok(dt.with_timezone(&Utc).into());
    }

    if let Some(dt) = parse_naive_datetime(input) {
        debug!(input = %input, "Parsed naive date-time as UTC");
        return Ok(Utc.from_utc_datetime(&dt).into());
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        debug!(input = %input, "Parsed date at midnight UTC");
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)).into());
    }

    if let Some(dt) = parse_relative(&input.to_lowercase(), now) {
        debug!(input = %input, "Parsed relative expression");
        return Ok(dt.into());
    }

    // Fall back to fuzzydate library
    if let Some(dt) = parse_fuzzy(input, now) {
        debug!(input = %input, resolved = %dt, "Parsed with fuzzydate");
        return Ok(dt.into());
    }

    debug!(input = %input, "Failed to parse date/time");
    Err(DomainError::InvalidDateTime(format!(
        "unrecognized date/time '{input}', expected ISO 8601 such as 2023-04-08T14:30:00"
    )))
}

/// Natural-language input resolved in UTC against `now`
///
/// fuzzydate fills a missing time of day from its reference clock. The input
/// is parsed against `now` and against midnight of the same day: when the two
/// results differ by exactly the reference offset and the midnight one lands on
/// 00:00, the input named no time and the midnight result is used.
fn parse_fuzzy(input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let midnight = Utc.from_utc_datetime(&now.date_naive().and_time(NaiveTime::MIN));

    let relative = fuzzydate::aware_parse(input, Some(now), Utc).ok()?;
    let Ok(at_midnight) = fuzzydate::aware_parse(input, Some(midnight), Utc) else {
        return Some(relative);
    };

    let date_only =
        at_midnight.time() == NaiveTime::MIN && relative - at_midnight == now - midnight;
    Some(if date_only { at_midnight } else { relative })
}

fn parse_naive_datetime(input: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
}

/// Day words resolve to midnight UTC of that day
fn parse_relative(input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let midnight = |offset_days: i64| {
        let day = now.date_naive() + Duration::days(offset_days);
        Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
    };

    match input {
        "now" => Some(now),
        "today" => Some(midnight(0)),
        "yesterday" => Some(midnight(-1)),
        "tomorrow" => Some(midnight(1)),
        "day before yesterday" => Some(midnight(-2)),
        "day after tomorrow" => Some(midnight(2)),
        _ => None,
    }
}
