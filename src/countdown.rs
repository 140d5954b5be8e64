//! Duration decomposition and compact countdown strings.
//!
//! A [`Countdown`] splits a signed number of seconds into days, hours,
//! minutes and seconds (by magnitude) and renders the compact form used in
//! countdown badges, e.g. `"2d 3h 15m"` or `"45s"`.
//!
//! Everything here is a pure function of its input and works without `std`.

use crate::time::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use core::fmt::{self, Write};

/// Default threshold below which the seconds component is shown.
pub const DEFAULT_SHOW_SECONDS_WITHIN: u64 = 60;

/// Capacity of a [`CompactDuration`]; fits the widest `u64` rendering.
pub const COMPACT_CAPACITY: usize = 32;

/// Compact duration string, e.g. `"1d 2h 3m"`. Never allocates.
pub type CompactDuration = heapless::String<COMPACT_CAPACITY>;

/// A duration broken into calendar-free components.
///
/// Invariant: `days * 86400 + hours * 3600 + minutes * 60 + seconds == total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DurationParts {
    /// Whole days.
    pub days: u64,
    /// Hours within the day (0-23).
    pub hours: u64,
    /// Minutes within the hour (0-59).
    pub minutes: u64,
    /// Seconds within the minute (0-59).
    pub seconds: u64,
    total: u64,
}

impl DurationParts {
    /// Decomposes the magnitude of a signed number of seconds.
    #[inline]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self::from_magnitude(seconds.unsigned_abs())
    }

    /// Decomposes an unsigned number of seconds.
    pub const fn from_magnitude(total: u64) -> Self {
        Self {
            days: total / SECONDS_PER_DAY,
            hours: (total / SECONDS_PER_HOUR) % 24,
            minutes: (total / SECONDS_PER_MINUTE) % 60,
            seconds: total % SECONDS_PER_MINUTE,
            total,
        }
    }

    /// Returns the absolute duration in seconds.
    #[inline]
    pub const fn total_seconds(&self) -> u64 {
        self.total
    }

    /// Returns true if every component is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.total == 0
    }
}

/// Errors from building a countdown out of non-`i64` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownError {
    /// The input does not start with an integer.
    NotANumber,

    /// The magnitude does not fit in 64 bits.
    OutOfRange,
}

impl fmt::Display for CountdownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownError::NotANumber => write!(f, "duration is not a number"),
            CountdownError::OutOfRange => write!(f, "duration exceeds 64-bit range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CountdownError {}

/// A decomposed duration plus the policy for rendering it compactly.
///
/// # Example
/// ```
/// use time_layers::Countdown;
///
/// let countdown = Countdown::new(-93_784);
/// assert_eq!(countdown.days(), 1);
/// assert_eq!(countdown.compact(), "1d 2h 3m");
///
/// let wide = Countdown::new(93_784).show_seconds_within(86_400 * 2);
/// assert_eq!(wide.compact(), "1d 2h 3m 4s");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    parts: DurationParts,
    show_seconds_within: u64,
}

impl Countdown {
    /// Creates a countdown from a signed number of seconds. Only the magnitude is used.
    pub const fn new(seconds: i64) -> Self {
        Self::from_parts(DurationParts::from_seconds(seconds))
    }

    /// Creates a countdown from an unsigned number of seconds.
    pub const fn from_magnitude(seconds: u64) -> Self {
        Self::from_parts(DurationParts::from_magnitude(seconds))
    }

    /// Creates a countdown for the time between `now` and `target` (both Unix seconds).
    ///
    /// Targets in the past count up by the same magnitude.
    pub const fn until(target: i64, now: i64) -> Self {
        Self::from_magnitude(target.abs_diff(now))
    }

    const fn from_parts(parts: DurationParts) -> Self {
        Self {
            parts,
            show_seconds_within: DEFAULT_SHOW_SECONDS_WITHIN,
        }
    }

    /// Parses a textual integer, such as a big-integer value rendered to decimal.
    ///
    /// Leading whitespace and a sign are accepted; parsing stops at the first
    /// non-digit, so `"90.5"` reads as 90 seconds.
    ///
    /// # Errors
    /// * `NotANumber` - No digits before the first non-digit character
    /// * `OutOfRange` - Magnitude larger than `u64::MAX`
    pub fn parse(input: &str) -> Result<Self, CountdownError> {
        let trimmed = input.trim_start();
        let unsigned = trimmed
            .strip_prefix('-')
            .or_else(|| trimmed.strip_prefix('+'))
            .unwrap_or(trimmed);

        let digits_end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        let digits = &unsigned[..digits_end];
        if digits.is_empty() {
            return Err(CountdownError::NotANumber);
        }

        let mut magnitude: u64 = 0;
        for byte in digits.bytes() {
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(u64::from(byte - b'0')))
                .ok_or(CountdownError::OutOfRange)?;
        }

        Ok(Self::from_magnitude(magnitude))
    }

    /// Sets the absolute duration below which seconds are rendered.
    ///
    /// Default is [`DEFAULT_SHOW_SECONDS_WITHIN`]. Widen it (e.g. to 86400) to
    /// keep seconds visible on longer countdowns.
    pub const fn show_seconds_within(mut self, threshold: u64) -> Self {
        self.show_seconds_within = threshold;
        self
    }

    /// Returns the decomposed components.
    #[inline]
    pub const fn parts(&self) -> DurationParts {
        self.parts
    }

    /// Whole days remaining.
    #[inline]
    pub const fn days(&self) -> u64 {
        self.parts.days
    }

    /// Hours past the last whole day (0-23).
    #[inline]
    pub const fn hours(&self) -> u64 {
        self.parts.hours
    }

    /// Minutes past the last whole hour (0-59).
    #[inline]
    pub const fn minutes(&self) -> u64 {
        self.parts.minutes
    }

    /// Seconds past the last whole minute (0-59).
    #[inline]
    pub const fn seconds(&self) -> u64 {
        self.parts.seconds
    }

    /// Renders the compact string: non-zero components, largest first, space-joined.
    ///
    /// A zero duration renders as an empty string; callers pick their own
    /// placeholder (e.g. `"0s"` or "now").
    pub fn compact(&self) -> CompactDuration {
        let mut out = CompactDuration::new();
        // COMPACT_CAPACITY covers u64::MAX, so this cannot run out of room.
        let _ = write!(out, "{}", self);
        out
    }
}

impl TryFrom<i128> for Countdown {
    type Error = CountdownError;

    fn try_from(seconds: i128) -> Result<Self, Self::Error> {
        u64::try_from(seconds.unsigned_abs())
            .map(Self::from_magnitude)
            .map_err(|_| CountdownError::OutOfRange)
    }
}

impl From<DurationParts> for Countdown {
    fn from(parts: DurationParts) -> Self {
        Self::from_parts(parts)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.parts;
        let show_seconds = p.total < self.show_seconds_within;
        let components = [
            (p.days, 'd'),
            (p.hours, 'h'),
            (p.minutes, 'm'),
            (if show_seconds { p.seconds } else { 0 }, 's'),
        ];

        let mut first = true;
        for (value, unit) in components {
            if value == 0 {
                continue;
            }
            if !first {
                f.write_char(' ')?;
            }
            write!(f, "{}{}", value, unit)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_mixed_duration() {
        let parts = DurationParts::from_seconds(93_784);
        assert_eq!(parts.days, 1);
        assert_eq!(parts.hours, 2);
        assert_eq!(parts.minutes, 3);
        assert_eq!(parts.seconds, 4);
        assert_eq!(parts.total_seconds(), 93_784);
    }

    #[test]
    fn handles_i64_min_without_overflow() {
        let parts = DurationParts::from_seconds(i64::MIN);
        assert_eq!(parts.total_seconds(), 1u64 << 63);
    }

    #[test]
    fn compact_fits_largest_magnitude() {
        let countdown = Countdown::from_magnitude(u64::MAX).show_seconds_within(u64::MAX);
        // u64::MAX itself is not below the threshold, so seconds stay hidden.
        assert_eq!(countdown.compact(), "213503982334601d 7h");
    }

    #[test]
    fn until_uses_distance_in_either_direction() {
        assert_eq!(Countdown::until(1_090, 1_000).parts().total_seconds(), 90);
        assert_eq!(Countdown::until(1_000, 1_090).parts().total_seconds(), 90);
    }
}
