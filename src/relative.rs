//! Relative-time phrases ("3 hr. ago", "in 2 days") in the en-US display locale.

use chrono::{DateTime, Datelike, Months, TimeZone};
use core::fmt;

/// Phrase verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelativeStyle {
    /// Abbreviated units: `sec.`, `min.`, `hr.`, `day`, `mo.`, `yr.`
    #[default]
    Short,

    /// Spelled-out units: `seconds`, `minutes`, `hours`, ...
    Long,
}

/// Unit a relative phrase is expressed in, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RelativeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl RelativeUnit {
    fn label(self, style: RelativeStyle, plural: bool) -> &'static str {
        match (style, self, plural) {
            (RelativeStyle::Short, RelativeUnit::Year, _) => "yr.",
            (RelativeStyle::Short, RelativeUnit::Month, _) => "mo.",
            (RelativeStyle::Short, RelativeUnit::Day, false) => "day",
            (RelativeStyle::Short, RelativeUnit::Day, true) => "days",
            (RelativeStyle::Short, RelativeUnit::Hour, _) => "hr.",
            (RelativeStyle::Short, RelativeUnit::Minute, _) => "min.",
            (RelativeStyle::Short, RelativeUnit::Second, _) => "sec.",
            (RelativeStyle::Long, RelativeUnit::Year, false) => "year",
            (RelativeStyle::Long, RelativeUnit::Year, true) => "years",
            (RelativeStyle::Long, RelativeUnit::Month, false) => "month",
            (RelativeStyle::Long, RelativeUnit::Month, true) => "months",
            (RelativeStyle::Long, RelativeUnit::Day, false) => "day",
            (RelativeStyle::Long, RelativeUnit::Day, true) => "days",
            (RelativeStyle::Long, RelativeUnit::Hour, false) => "hour",
            (RelativeStyle::Long, RelativeUnit::Hour, true) => "hours",
            (RelativeStyle::Long, RelativeUnit::Minute, false) => "minute",
            (RelativeStyle::Long, RelativeUnit::Minute, true) => "minutes",
            (RelativeStyle::Long, RelativeUnit::Second, false) => "second",
            (RelativeStyle::Long, RelativeUnit::Second, true) => "seconds",
        }
    }
}

/// The offset of a target instant from "now", in a single whole unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeTime {
    /// Whole units, truncated toward zero.
    pub count: u64,
    pub unit: RelativeUnit,
    /// True if the target lies before now.
    pub past: bool,
}

impl RelativeTime {
    /// Measures `target` against `now`.
    ///
    /// Picks the largest unit with a whole count of at least one. Months and
    /// years follow the calendar of `Tz`; shorter units use elapsed time.
    pub fn between<Tz: TimeZone>(now: &DateTime<Tz>, target: &DateTime<Tz>) -> Self {
        let past = target < now;
        let (earlier, later) = if past { (target, now) } else { (now, target) };

        let months = whole_months_between(earlier, later);
        if months >= 12 {
            return Self::new(u64::from(months / 12), RelativeUnit::Year, past);
        }
        if months >= 1 {
            return Self::new(u64::from(months), RelativeUnit::Month, past);
        }

        let seconds = later
            .clone()
            .signed_duration_since(earlier.clone())
            .num_seconds()
            .unsigned_abs();
        let candidates = [
            (seconds / 86_400, RelativeUnit::Day),
            (seconds / 3_600, RelativeUnit::Hour),
            (seconds / 60, RelativeUnit::Minute),
        ];

        candidates
            .into_iter()
            .find(|(count, _)| *count >= 1)
            .map(|(count, unit)| Self::new(count, unit, past))
            .unwrap_or(Self::new(seconds, RelativeUnit::Second, past))
    }

    const fn new(count: u64, unit: RelativeUnit, past: bool) -> Self {
        Self { count, unit, past }
    }

    /// Renders the phrase in the given style.
    pub fn phrase(&self, style: RelativeStyle) -> String {
        let label = self.unit.label(style, self.count != 1);
        if self.past {
            format!("{} {} ago", self.count, label)
        } else {
            format!("in {} {}", self.count, label)
        }
    }
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrase(RelativeStyle::Short))
    }
}

/// Formats `target` relative to `now`, e.g. `"30 sec. ago"` or `"in 2 days"`.
pub fn format_relative<Tz: TimeZone>(
    now: &DateTime<Tz>,
    target: &DateTime<Tz>,
    style: RelativeStyle,
) -> String {
    RelativeTime::between(now, target).phrase(style)
}

/// Number of whole calendar months from `earlier` to `later`.
fn whole_months_between<Tz: TimeZone>(earlier: &DateTime<Tz>, later: &DateTime<Tz>) -> u32 {
    let from = earlier.naive_local();
    let to = later.naive_local();

    let span = (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    let mut months = u32::try_from(span).unwrap_or(0);

    // The month-number difference overshoots by one when `to` sits earlier
    // in its month than `from` does in its own.
    while months > 0 {
        match from.checked_add_months(Months::new(months)) {
            Some(candidate) if candidate <= to => break,
            _ => months -= 1,
        }
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn seconds_in_the_past() {
        let now = at("2024-05-01T12:00:00Z");
        let target = now - TimeDelta::seconds(30);
        assert_eq!(format_relative(&now, &target, RelativeStyle::Short), "30 sec. ago");
        assert_eq!(format_relative(&now, &target, RelativeStyle::Long), "30 seconds ago");
    }

    #[test]
    fn minutes_truncate_toward_zero() {
        let now = at("2024-05-01T12:00:00Z");
        let target = now - TimeDelta::seconds(119);
        assert_eq!(format_relative(&now, &target, RelativeStyle::Short), "1 min. ago");
        assert_eq!(format_relative(&now, &target, RelativeStyle::Long), "1 minute ago");
    }

    #[test]
    fn future_targets_use_in() {
        let now = at("2024-05-01T12:00:00Z");
        let target = now + TimeDelta::hours(2) + TimeDelta::minutes(59);
        assert_eq!(format_relative(&now, &target, RelativeStyle::Short), "in 2 hr.");
    }

    #[test]
    fn day_label_pluralizes_in_short_style() {
        let now = at("2024-05-10T12:00:00Z");
        assert_eq!(
            format_relative(&now, &(now - TimeDelta::days(1)), RelativeStyle::Short),
            "1 day ago"
        );
        assert_eq!(
            format_relative(&now, &(now - TimeDelta::days(3)), RelativeStyle::Short),
            "3 days ago"
        );
    }

    #[test]
    fn months_follow_the_calendar() {
        let now = at("2024-03-15T00:00:00Z");
        assert_eq!(
            format_relative(&now, &at("2024-02-15T00:00:00Z"), RelativeStyle::Short),
            "1 mo. ago"
        );
        // One second short of a calendar month stays in days.
        assert_eq!(
            format_relative(&now, &at("2024-02-15T00:00:01Z"), RelativeStyle::Short),
            "28 days ago"
        );
    }

    #[test]
    fn years_from_twelve_months() {
        let now = at("2024-03-15T00:00:00Z");
        assert_eq!(
            format_relative(&now, &at("2021-01-01T00:00:00Z"), RelativeStyle::Long),
            "3 years ago"
        );
        assert_eq!(
            format_relative(&now, &at("2025-03-15T00:00:00Z"), RelativeStyle::Short),
            "in 1 yr."
        );
    }

    #[test]
    fn zero_offset_reads_as_future() {
        let now = at("2024-05-01T12:00:00Z");
        assert_eq!(format_relative(&now, &now, RelativeStyle::Short), "in 0 sec.");
    }

    #[test]
    fn sub_second_past_reads_as_ago() {
        let now = at("2024-05-01T12:00:00Z");
        let target = now - TimeDelta::milliseconds(400);
        assert_eq!(format_relative(&now, &target, RelativeStyle::Short), "0 sec. ago");
    }
}
