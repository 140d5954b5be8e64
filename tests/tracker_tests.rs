//! Integration tests for RelativeTimeTracker

mod common;
use common::*;

use time_layers::{ClockConfig, ClockSource, RelativeStyle, RelativeTimeTracker};

const THIRTY_SECONDS_BEFORE: &str = "2024-05-01T11:59:30Z";

#[tokio::test(start_paused = true)]
async fn display_is_ready_before_first_tick() {
    let clock = ClockSource::new(MockTimeSource::at_seconds(MAY_FIRST_NOON));
    let tracker = RelativeTimeTracker::new(&clock, Some(THIRTY_SECONDS_BEFORE));

    assert_eq!(tracker.display(), Some("30 sec. ago"));
}

#[tokio::test(start_paused = true)]
async fn display_moves_to_next_bucket_after_clock_advances() {
    let source = MockTimeSource::at_seconds(MAY_FIRST_NOON);
    let clock = ClockSource::new(source.clone());
    let mut tracker = RelativeTimeTracker::new(&clock, Some(THIRTY_SECONDS_BEFORE));
    assert_eq!(tracker.display(), Some("30 sec. ago"));

    source.advance_seconds(35);
    let text = tracker.changed().await.map(str::to_owned);
    assert_eq!(text.as_deref(), Some("1 min. ago"));
    assert_eq!(tracker.display(), Some("1 min. ago"));
}

#[tokio::test(start_paused = true)]
async fn display_follows_every_tick() {
    let source = MockTimeSource::at_seconds(MAY_FIRST_NOON);
    let clock = ClockSource::new(source.clone());
    let mut tracker = RelativeTimeTracker::new(&clock, Some(THIRTY_SECONDS_BEFORE));

    for _ in 0..29 {
        source.advance_seconds(1);
        tracker.changed().await;
    }
    assert_eq!(tracker.display(), Some("59 sec. ago"));

    source.advance_seconds(1);
    tracker.changed().await;
    assert_eq!(tracker.display(), Some("1 min. ago"));
}

#[tokio::test(start_paused = true)]
async fn future_target_counts_down() {
    let clock = ClockSource::new(MockTimeSource::at_seconds(MAY_FIRST_NOON));
    let tracker = RelativeTimeTracker::new(&clock, Some("2024-05-03T12:00:00Z"));

    assert_eq!(tracker.display(), Some("in 2 days"));
}

#[tokio::test(start_paused = true)]
async fn long_style_spells_out_units() {
    let clock = ClockSource::new(MockTimeSource::at_seconds(MAY_FIRST_NOON));
    let tracker =
        RelativeTimeTracker::with_style(&clock, Some(THIRTY_SECONDS_BEFORE), RelativeStyle::Long);

    assert_eq!(tracker.display(), Some("30 seconds ago"));
}

#[tokio::test(start_paused = true)]
async fn absent_target_leaves_display_unset_until_set() {
    let clock = ClockSource::new(MockTimeSource::at_seconds(MAY_FIRST_NOON));
    let mut tracker = RelativeTimeTracker::new(&clock, None);
    assert_eq!(tracker.display(), None);
    assert_eq!(tracker.refresh(), None);

    assert_eq!(tracker.set_target(Some("2024-05-01T13:00:00Z")), Some("in 1 hr."));
    assert!(tracker.target().is_some());

    assert_eq!(tracker.set_target(None), None);
    assert_eq!(tracker.display(), None);
}

#[tokio::test(start_paused = true)]
async fn malformed_target_is_tolerated() {
    let clock = ClockSource::new(MockTimeSource::at_seconds(MAY_FIRST_NOON));
    let mut tracker = RelativeTimeTracker::new(&clock, Some("not a date"));

    assert_eq!(tracker.display(), None);
    assert_eq!(tracker.target(), None);

    assert_eq!(tracker.set_target(Some(THIRTY_SECONDS_BEFORE)), Some("30 sec. ago"));
}

#[tokio::test(start_paused = true)]
async fn release_unsubscribes_from_clock() {
    let clock = ClockSource::new(MockTimeSource::at_seconds(MAY_FIRST_NOON));
    let first = RelativeTimeTracker::new(&clock, Some(THIRTY_SECONDS_BEFORE));
    let second = RelativeTimeTracker::new(&clock, Some(THIRTY_SECONDS_BEFORE));
    assert_eq!(clock.subscriber_count(), 2);
    assert_eq!(clock.timers_started(), 1);

    first.release();
    assert_eq!(clock.subscriber_count(), 1);
    assert!(clock.is_running());

    drop(second);
    assert_eq!(clock.subscriber_count(), 0);
    assert!(!clock.is_running());
}

#[tokio::test(start_paused = true)]
async fn non_persistent_clock_renders_once() {
    let source = MockTimeSource::at_seconds(MAY_FIRST_NOON);
    let config = ClockConfig::new().persistent_context(false);
    let clock = ClockSource::with_config(source.clone(), config);
    let mut tracker = RelativeTimeTracker::new(&clock, Some(THIRTY_SECONDS_BEFORE));
    assert_eq!(tracker.display(), Some("30 sec. ago"));

    source.advance_seconds(120);
    assert_eq!(tracker.refresh(), Some("30 sec. ago"));
    assert!(!clock.is_running());
}
