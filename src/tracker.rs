//! Live "time ago / time until" display bound to a [`ClockSource`].

use crate::clock::{ClockSource, ClockSubscription};
use crate::dates::parse_iso;
use crate::relative::{RelativeStyle, format_relative};
use crate::time::{SystemTimeSource, TimeSource};
use chrono::{DateTime, Utc};
use tracing::warn;

/// Keeps a relative-time phrase for one target timestamp in step with the clock.
///
/// The phrase is computed on creation and again for every tick observed
/// through [`changed`](Self::changed) or [`refresh`](Self::refresh). Unlike
/// [`time_ago`](crate::dates::time_ago) it never switches to an absolute date.
///
/// The tracker owns a [`ClockSubscription`]; dropping the tracker (or calling
/// [`release`](Self::release)) unsubscribes it.
///
/// # Example
/// ```no_run
/// use time_layers::{ClockSource, RelativeTimeTracker};
///
/// # async fn run() {
/// let mut tracker = RelativeTimeTracker::new(ClockSource::shared(), Some("2024-05-01T12:00:00Z"));
/// loop {
///     if let Some(text) = tracker.changed().await {
///         println!("{text}");
///     }
/// }
/// # }
/// ```
pub struct RelativeTimeTracker<T = SystemTimeSource> {
    subscription: ClockSubscription<T>,
    target: Option<DateTime<Utc>>,
    style: RelativeStyle,
    display: Option<String>,
}

impl<T> RelativeTimeTracker<T>
where
    T: TimeSource + Send + Sync + 'static,
{
    /// Starts tracking `target` in the short style.
    pub fn new(clock: &ClockSource<T>, target: Option<&str>) -> Self {
        Self::with_style(clock, target, RelativeStyle::Short)
    }

    /// Starts tracking `target` in the given style.
    pub fn with_style(clock: &ClockSource<T>, target: Option<&str>, style: RelativeStyle) -> Self {
        let mut tracker = Self {
            subscription: clock.subscribe(),
            target: parse_target(target),
            style,
            display: None,
        };
        tracker.refresh();
        tracker
    }
}

impl<T> RelativeTimeTracker<T> {
    /// Replaces the target and recomputes immediately.
    ///
    /// `None` or an unparsable timestamp leaves the display unset until a
    /// valid target arrives.
    pub fn set_target(&mut self, target: Option<&str>) -> Option<&str> {
        self.target = parse_target(target);
        self.refresh()
    }

    /// Returns the parsed target, if any.
    pub fn target(&self) -> Option<DateTime<Utc>> {
        self.target
    }

    /// Returns the current phrase, or `None` without a valid target.
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Recomputes against the clock's latest published value.
    pub fn refresh(&mut self) -> Option<&str> {
        let now = self.subscription.current();
        self.recompute(now)
    }

    /// Waits for the next tick, then recomputes.
    pub async fn changed(&mut self) -> Option<&str> {
        let now = self.subscription.changed().await;
        self.recompute(now)
    }

    /// Stops tracking and unsubscribes from the clock.
    pub fn release(self) {}

    fn recompute(&mut self, now_seconds: i64) -> Option<&str> {
        self.display = match (self.target, DateTime::<Utc>::from_timestamp(now_seconds, 0)) {
            (Some(target), Some(now)) => Some(format_relative(&now, &target, self.style)),
            _ => None,
        };
        self.display()
    }
}

fn parse_target(target: Option<&str>) -> Option<DateTime<Utc>> {
    let input = target?;
    match parse_iso(input) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(err) => {
            warn!(timestamp = input, %err, "cannot track timestamp");
            None
        }
    }
}
