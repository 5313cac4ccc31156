//! Shared test infrastructure for presence-light integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use presence_light::{
    Advertising, Color, LightFixture, OFF, OrientationSource, Quaternion, TelemetrySink,
    TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, millis: u64) {
        self.current_time.set(TestInstant(millis));
    }

    pub fn now_millis(&self) -> u64 {
        self.current_time.get().0
    }

    pub fn now_instant(&self) -> TestInstant {
        self.current_time.get()
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Fixture
// ============================================================================

/// Single-pixel fixture that records every buffer write and flush
pub struct MockFixture {
    pixel: Color,
    writes: Vec<Color>,
    shows: usize,
}

impl MockFixture {
    pub fn new() -> Self {
        Self {
            pixel: OFF,
            writes: Vec::new(),
            shows: 0,
        }
    }

    /// Every color written to the buffer, clears recorded as `OFF`
    pub fn writes(&self) -> &[Color] {
        &self.writes
    }

    pub fn shows(&self) -> usize {
        self.shows
    }

    pub fn current(&self) -> Color {
        self.pixel
    }
}

impl LightFixture for MockFixture {
    fn set_pixel(&mut self, index: usize, color: Color) {
        assert_eq!(index, 0, "single pixel fixture");
        self.pixel = color;
        self.writes.push(color);
    }

    fn clear(&mut self) {
        self.pixel = OFF;
        self.writes.push(OFF);
    }

    fn show(&mut self) {
        self.shows += 1;
    }

    fn pixel(&self, _index: usize) -> Color {
        self.pixel
    }
}

// ============================================================================
// Mock Transport
// ============================================================================

#[derive(Debug, Default)]
pub struct MockAdvertising {
    pub advertising: bool,
    pub starts: usize,
    pub stops: usize,
}

impl Advertising for MockAdvertising {
    fn start_advertising(&mut self) {
        self.advertising = true;
        self.starts += 1;
    }

    fn stop_advertising(&mut self) {
        self.advertising = false;
        self.stops += 1;
    }
}

/// Sink that stores records, or rejects everything when `full`
#[derive(Debug, Default)]
pub struct MockSink {
    pub records: Vec<String>,
    pub full: bool,
}

impl TelemetrySink for MockSink {
    type Error = ();

    fn try_write(&mut self, record: &str) -> Result<(), ()> {
        if self.full {
            return Err(());
        }
        self.records.push(record.to_string());
        Ok(())
    }
}

/// Orientation source replaying queued samples, then `None`
#[derive(Debug, Default)]
pub struct MockOrientation {
    samples: std::collections::VecDeque<Option<Quaternion>>,
}

impl MockOrientation {
    pub fn new(samples: impl IntoIterator<Item = Option<Quaternion>>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }

    pub fn repeating(q: Quaternion, count: usize) -> Self {
        Self::new(std::iter::repeat_n(Some(q), count))
    }
}

impl OrientationSource for MockOrientation {
    fn sample(&mut self) -> Option<Quaternion> {
        self.samples.pop_front().flatten()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Number of times the pixel value changed across the recorded writes
pub fn transitions(writes: &[Color], initial: Color) -> usize {
    let mut previous = initial;
    let mut count = 0;
    for &color in writes {
        if color != previous {
            count += 1;
            previous = color;
        }
    }
    count
}
