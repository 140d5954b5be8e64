#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`TimeSource`**: Trait to implement for your wall clock
//! - **`ClockSource`**: Shared once-per-second clock; ticks only while subscribed
//! - **`ClockSubscription`**: Live handle on a clock; drop it to unsubscribe
//! - **`Countdown`**: Splits a duration into days/hours/minutes/seconds and renders `"1d 2h 3m"`
//! - **`RelativeTimeTracker`**: Keeps a `"30 sec. ago"` phrase in step with the clock
//! - **`RelativeTime`**: One-shot relative offset between two instants
//! - **`Breakpoint`**: Layout width breakpoints
//!
//! Date, relative-time and EVM formatting helpers live in [`dates`],
//! [`relative`], [`eth`] and [`address`]. Everything except [`countdown`],
//! [`breakpoints`] and the [`TimeSource`] trait needs the `std` feature.

pub mod breakpoints;
pub mod countdown;
pub mod time;

#[cfg(feature = "std")]
pub mod address;
#[cfg(feature = "std")]
pub mod clock;
#[cfg(feature = "std")]
pub mod dates;
#[cfg(feature = "std")]
pub mod eth;
#[cfg(feature = "std")]
pub mod relative;
#[cfg(feature = "std")]
pub mod tracker;

pub use breakpoints::Breakpoint;
pub use countdown::{CompactDuration, Countdown, CountdownError, DurationParts};
pub use time::{TimeSource, days_in_seconds};

#[cfg(feature = "std")]
pub use clock::{ClockConfig, ClockSource, ClockSubscription};
#[cfg(feature = "std")]
pub use dates::{TimestampError, format_date, format_date_time, format_date_utc, format_time, time_ago};
#[cfg(feature = "std")]
pub use relative::{RelativeStyle, RelativeTime, RelativeUnit};
#[cfg(feature = "std")]
pub use time::{SystemTimeSource, delay, now_in_seconds};
#[cfg(feature = "std")]
pub use tracker::RelativeTimeTracker;
