//! ISO-8601 parsing and absolute date formatting.
//!
//! Display locale is fixed to en-US. Every formatter has an `_in` variant
//! taking the display zone explicitly; the plain variants use the local zone.

use crate::relative::{RelativeStyle, format_relative};
use chrono::{
    DateTime, Local, NaiveDate, NaiveDateTime, SubsecRound, TimeDelta, TimeZone, Utc,
};
use core::fmt;
use std::borrow::Cow;

/// Elapsed time after which [`time_ago`] switches to an absolute date.
pub const TIME_AGO_ABSOLUTE_AFTER_SECS: i64 = 2 * 86_400;

const DATE_MED: &str = "%b %-d, %Y";
const DATE_TIME_MED: &str = "%b %-d, %Y, %-I:%M %p";
const TIME_SIMPLE: &str = "%-I:%M %p";

const OFFSET_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Errors from reading an ISO-8601 timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampError {
    /// Input is empty or whitespace.
    Empty,

    /// Input is not a supported ISO-8601 shape, or names a time that does
    /// not exist in the display zone.
    Malformed,
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::Empty => write!(f, "timestamp is empty"),
            TimestampError::Malformed => write!(f, "timestamp is not valid ISO-8601"),
        }
    }
}

impl std::error::Error for TimestampError {}

/// Parses an ISO-8601 timestamp into the given zone.
///
/// Accepted shapes:
/// * RFC 3339 with `Z` or a numeric offset, e.g. `2024-05-01T12:00:00Z`
/// * Offset date-time with optional seconds, e.g. `2024-05-01T12:00Z`,
///   `2024-05-01T12:00+02:00`, `2024-05-01T12:00:00+0200`
/// * Local date-time, e.g. `2024-05-01T12:00`, `2024-05-01T12:00:00.250`
/// * Hour only, with or without offset, e.g. `2024-05-01T12`, `2024-05-01T12Z`
/// * Date only, e.g. `2024-05-01` (midnight)
///
/// Shapes without an offset are read as wall-clock time in `tz`.
///
/// # Errors
/// * `Empty` - Blank input
/// * `Malformed` - Anything else that does not parse
pub fn parse_iso_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<DateTime<Tz>, TimestampError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TimestampError::Empty);
    }

    if let Ok(fixed) = DateTime::parse_from_rfc3339(input) {
        return Ok(fixed.with_timezone(tz));
    }

    let input = with_minutes(input);
    let input = input.as_ref();

    if let Some(fixed) = OFFSET_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(input, format).ok())
    {
        return Ok(fixed.with_timezone(tz));
    }

    let naive = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or(TimestampError::Malformed)?;

    // Wall-clock times skipped by a DST jump resolve to the hour after.
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
        .ok_or(TimestampError::Malformed)
}

/// Expands an hour-only time such as `2024-05-01T12Z` to `2024-05-01T12:00Z`.
fn with_minutes(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let hour_only = bytes.len() >= 13
        && bytes[10] == b'T'
        && bytes[11..13].iter().all(u8::is_ascii_digit)
        && matches!(bytes.get(13), None | Some(b'Z' | b'z' | b'+' | b'-'));

    if hour_only {
        Cow::Owned(format!("{}:00{}", &input[..13], &input[13..]))
    } else {
        Cow::Borrowed(input)
    }
}

/// Parses an ISO-8601 timestamp into the local zone.
pub fn parse_iso(input: &str) -> Result<DateTime<Local>, TimestampError> {
    parse_iso_in(input, &Local)
}

fn format_in<Tz>(input: &str, tz: &Tz, pattern: &str) -> Result<String, TimestampError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    parse_iso_in(input, tz).map(|date| date.format(pattern).to_string())
}

/// Medium date in `tz`, e.g. `Oct 14, 1983`.
pub fn format_date_in<Tz>(input: &str, tz: &Tz) -> Result<String, TimestampError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format_in(input, tz, DATE_MED)
}

/// Medium date in the local zone.
pub fn format_date(input: &str) -> Result<String, TimestampError> {
    format_date_in(input, &Local)
}

/// Medium date in UTC.
pub fn format_date_utc(input: &str) -> Result<String, TimestampError> {
    format_date_in(input, &Utc)
}

/// Medium date and time in `tz`, e.g. `Oct 14, 1983, 1:30 PM`.
pub fn format_date_time_in<Tz>(input: &str, tz: &Tz) -> Result<String, TimestampError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format_in(input, tz, DATE_TIME_MED)
}

/// Medium date and time in the local zone.
pub fn format_date_time(input: &str) -> Result<String, TimestampError> {
    format_date_time_in(input, &Local)
}

/// Hour and minute in `tz`, e.g. `1:30 PM`.
pub fn format_time_in<Tz>(input: &str, tz: &Tz) -> Result<String, TimestampError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format_in(input, tz, TIME_SIMPLE)
}

/// Hour and minute in the local zone.
pub fn format_time(input: &str) -> Result<String, TimestampError> {
    format_time_in(input, &Local)
}

/// Describes how long ago `input` was, as seen from `now`.
///
/// Within two days (or for future timestamps) this is a short relative
/// phrase such as `"5 hr. ago"`. Past that, a relative phrase is too coarse
/// to be useful and the medium calendar date is returned instead.
pub fn time_ago_in<Tz>(input: &str, now: &DateTime<Tz>) -> Result<String, TimestampError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let target = parse_iso_in(input, &now.timezone())?;
    let elapsed = now.clone().signed_duration_since(target.clone());

    if elapsed > TimeDelta::seconds(TIME_AGO_ABSOLUTE_AFTER_SECS) {
        Ok(target.format(DATE_MED).to_string())
    } else {
        Ok(format_relative(now, &target, RelativeStyle::Short))
    }
}

/// [`time_ago_in`] against the current local time.
pub fn time_ago(input: &str) -> Result<String, TimestampError> {
    time_ago_in(input, &Local::now())
}

/// Re-labels the wall-clock fields of `date` as UTC, dropping sub-seconds.
///
/// `2024-05-01 09:30:15.250 +02:00` becomes `2024-05-01 09:30:15 UTC`.
pub fn as_utc_date<Tz: TimeZone>(date: Option<&DateTime<Tz>>) -> Option<DateTime<Utc>> {
    date.map(|date| date.naive_local().trunc_subsecs(0).and_utc())
}
