//! Orientation telemetry for the sensor variant.
//!
//! A [`TelemetryStream`] samples an [`OrientationSource`] at the configured
//! rate and writes one short ASCII record per sample to a [`TelemetrySink`].
//! Telemetry is best-effort: a missing, malformed or rejected sample is
//! skipped and never retried.

use core::fmt::Write;

use heapless::String;

use crate::config::{RecordLayout, TelemetryConfig};
use crate::time::{IntervalGate, TimeInstant};

/// Capacity of one formatted record.
pub const MAX_RECORD: usize = 64;

/// Orientation as a unit quaternion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// True when every component is a number within `[-1, 1]`.
    pub fn is_well_formed(&self) -> bool {
        [self.w, self.x, self.y, self.z]
            .iter()
            .all(|c| (-1.0..=1.0).contains(c))
    }
}

/// Output of the externally owned sensor-fusion filter.
pub trait OrientationSource {
    /// Latest calibrated orientation, None if the sensors produced nothing.
    fn sample(&mut self) -> Option<Quaternion>;
}

/// Outbound half of the transport.
///
/// Implementations must not block: queue the record or reject it.
pub trait TelemetrySink {
    type Error;

    fn try_write(&mut self, record: &str) -> Result<(), Self::Error>;
}

/// Why a due record was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetrySkip {
    /// The orientation source had no sample.
    Unavailable,
    /// A component was NaN, infinite or outside `[-1, 1]`.
    Malformed,
    /// The record did not fit in [`MAX_RECORD`] bytes.
    Overflow,
    /// The sink refused the record.
    Rejected,
}

impl core::fmt::Display for TelemetrySkip {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TelemetrySkip::Unavailable => write!(f, "no orientation sample available"),
            TelemetrySkip::Malformed => write!(f, "orientation sample out of range"),
            TelemetrySkip::Overflow => write!(f, "record exceeds {} bytes", MAX_RECORD),
            TelemetrySkip::Rejected => write!(f, "transport rejected record"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TelemetrySkip {}

/// Result of one [`TelemetryStream::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryOutcome {
    /// Less than one period since the last emission slot.
    NotDue,
    /// A record was handed to the sink.
    Emitted,
    /// The slot was used but nothing was sent.
    Skipped(TelemetrySkip),
}

/// Formats one record.
///
/// `lead` is the tag for [`RecordLayout::Compact`] and the stream time in
/// milliseconds for [`RecordLayout::Timestamped`].
pub fn format_record(
    layout: RecordLayout,
    lead: u64,
    q: &Quaternion,
) -> Result<String<MAX_RECORD>, TelemetrySkip> {
    let mut record = String::new();
    let written = match layout {
        RecordLayout::Compact => write!(record, "{},{:.4},{:.4}", lead, q.w, q.x),
        RecordLayout::Timestamped => writeln!(
            record,
            "{},{:.4},{:.4},{:.4},{:.4}",
            lead, q.w, q.x, q.y, q.z
        ),
    };
    written.map_err(|_| TelemetrySkip::Overflow)?;
    Ok(record)
}

/// Rate-gated orientation telemetry.
pub struct TelemetryStream<I: TimeInstant, O: OrientationSource> {
    source: O,
    config: TelemetryConfig,
    gate: IntervalGate<I>,
    origin: I,
    emitted: u32,
    skipped: u32,
}

impl<I: TimeInstant, O: OrientationSource> TelemetryStream<I, O> {
    /// Creates a stream whose first record is due one period after `now`.
    pub fn new(source: O, config: TelemetryConfig, now: I) -> Self {
        Self {
            source,
            config,
            gate: IntervalGate::new(now),
            origin: now,
            emitted: 0,
            skipped: 0,
        }
    }

    /// Emits a record if a period has elapsed since the last slot.
    ///
    /// A due slot is consumed even when the sample is skipped.
    pub fn poll<S: TelemetrySink>(&mut self, now: I, sink: &mut S) -> TelemetryOutcome {
        if !self.gate.poll(now, self.config.period_ms()) {
            return TelemetryOutcome::NotDue;
        }

        match self.emit(now, sink) {
            Ok(()) => {
                self.emitted = self.emitted.wrapping_add(1);
                TelemetryOutcome::Emitted
            }
            Err(skip) => {
                self.skipped = self.skipped.wrapping_add(1);
                trace!("telemetry skipped: {}", skip);
                TelemetryOutcome::Skipped(skip)
            }
        }
    }

    fn emit<S: TelemetrySink>(&mut self, now: I, sink: &mut S) -> Result<(), TelemetrySkip> {
        let sample = self.source.sample().ok_or(TelemetrySkip::Unavailable)?;
        if !sample.is_well_formed() {
            return Err(TelemetrySkip::Malformed);
        }

        let lead = match self.config.layout {
            RecordLayout::Compact => u64::from(self.config.tag),
            RecordLayout::Timestamped => now.millis_since(self.origin),
        };
        let record = format_record(self.config.layout, lead, &sample)?;

        sink.try_write(&record).map_err(|_| TelemetrySkip::Rejected)
    }

    /// Records handed to the sink so far.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }

    /// Due slots that produced no record.
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }
}
