//! Shared test infrastructure for time-layers integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use time_layers::TimeSource;

// ============================================================================
// Mock Time Source
// ============================================================================

/// 2024-05-01T12:00:00Z
pub const MAY_FIRST_NOON: i64 = 1_714_564_800;

/// Mock wall clock with controllable time advancement.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to the clock under test.
#[derive(Clone, Default)]
pub struct MockTimeSource {
    millis: Arc<AtomicI64>,
}

impl MockTimeSource {
    pub fn at_seconds(seconds: i64) -> Self {
        let source = Self::default();
        source.set_seconds(seconds);
        source
    }

    pub fn set_seconds(&self, seconds: i64) {
        self.millis.store(seconds * 1000, Ordering::SeqCst);
    }

    /// Advance time by the given number of milliseconds
    pub fn advance_millis(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    /// Advance time by the given number of seconds
    pub fn advance_seconds(&self, seconds: i64) {
        self.advance_millis(seconds * 1000);
    }
}

impl TimeSource for MockTimeSource {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}
