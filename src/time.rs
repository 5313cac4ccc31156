//! Clock abstraction and elapsed-time gates.
//!
//! The core never sleeps. Every timed behavior compares the elapsed time since
//! a stored instant against a period, using whatever monotonic clock the
//! platform provides through these traits.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;

    /// Milliseconds elapsed since `earlier`.
    #[inline]
    fn millis_since(&self, earlier: Self) -> u64 {
        self.duration_since(earlier).as_millis()
    }
}

/// Edge-triggered interval gate.
///
/// Remembers the instant it last fired. [`poll`](Self::poll) fires at most once
/// per call, so a loop that stalls for several periods gets a single late edge
/// instead of a burst.
#[derive(Debug, Clone, Copy)]
pub struct IntervalGate<I: TimeInstant> {
    last: I,
}

impl<I: TimeInstant> IntervalGate<I> {
    /// Creates a gate whose reference point is `now`.
    pub fn new(now: I) -> Self {
        Self { last: now }
    }

    /// Fires if at least `period_ms` elapsed since the last edge, recording `now`.
    pub fn poll(&mut self, now: I, period_ms: u64) -> bool {
        if self.is_due(now, period_ms) {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Same check as [`poll`](Self::poll) without consuming the edge.
    #[inline]
    pub fn is_due(&self, now: I, period_ms: u64) -> bool {
        now.millis_since(self.last) >= period_ms
    }

    /// Moves the reference point to `now`.
    pub fn reset(&mut self, now: I) {
        self.last = now;
    }

    /// Instant of the last edge (or of the last reset).
    pub fn last(&self) -> I {
        self.last
    }

    /// Instant at which the next edge becomes due, None on clock overflow.
    pub fn next_due(&self, period_ms: u64) -> Option<I> {
        self.last
            .checked_add(<I::Duration as TimeDuration>::from_millis(period_ms))
    }
}
