//! Wall-clock abstraction and small time helpers.

/// Seconds in one minute.
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

/// Seconds in one day.
pub const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Trait for abstracting wall-clock sources.
///
/// Implement this for whatever provides "now" on your platform. The clock
/// source only ever reads time through this trait, so tests can swap in a
/// source they control.
pub trait TimeSource {
    /// Returns milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// Returns whole seconds since the Unix epoch.
    ///
    /// Rounds toward negative infinity, so instants before the epoch still
    /// land on the second that contains them.
    #[inline]
    fn now_seconds(&self) -> i64 {
        self.now_millis().div_euclid(1000)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    #[inline]
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

#[cfg(feature = "std")]
impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    #[inline]
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// Time source backed by the operating system's real-time clock.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

#[cfg(feature = "std")]
impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Returns the current Unix time in whole seconds.
#[cfg(feature = "std")]
pub fn now_in_seconds() -> i64 {
    SystemTimeSource.now_seconds()
}

/// Converts a number of days to seconds.
#[inline]
pub const fn days_in_seconds(days: u64) -> u64 {
    days * SECONDS_PER_DAY
}

/// Resolves once after `ms` milliseconds.
///
/// There is no cancellation handle. Race it against something else (for
/// example with `tokio::select!` or `tokio::time::timeout`) if the wait must
/// be abandoned early.
#[cfg(feature = "std")]
pub async fn delay(ms: u64) {
    tokio::time::sleep(core::time::Duration::from_millis(ms)).await;
}
