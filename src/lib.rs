#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`PresenceState`**: What the light signals (`Inert`, `Dormant`, `Interested`, `Activated`, `Integrated`)
//! - **`Mode`**: How a state is rendered (off, solid, slow/fast blink, crossfade, connect acknowledgment)
//! - **`Command`**: A parsed inbound line (`state:<token>`, `color:RRGGBB`, or unrecognized)
//! - **`PresenceIndicator`**: Owns the pixel, state, color and timers; call `tick` once per loop
//! - **`AnimationEngine`**: Non-blocking renderer behind the indicator
//! - **`LightFixture`**: Trait to implement for your pixel hardware
//! - **`TimeSource`**: Trait to implement for your monotonic clock
//! - **`Advertising`**: Trait to implement for your wireless transport's advertising control
//! - **`TelemetryStream`**: Rate-gated orientation records for the sensor variant
//!
//! Colors are `Srgb<u8>`; blending is integer arithmetic on 8-bit channels.

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub use palette::Srgb;

pub mod colors;
pub mod command;
pub mod config;
pub mod engine;
pub mod indicator;
pub mod state;
pub mod telemetry;
pub mod time;
pub mod transport;

pub use colors::{Color, OFF, RED};
pub use command::{Command, encode_state};
pub use config::{
    ConfigError, IndicatorConfig, IndicatorConfigBuilder, RecordLayout, TelemetryConfig,
    TelemetryConfigBuilder,
};
pub use engine::{AnimationEngine, Frame, LightFixture};
pub use indicator::PresenceIndicator;
pub use state::{Mode, PresenceState};
pub use telemetry::{
    OrientationSource, Quaternion, TelemetryOutcome, TelemetrySink, TelemetrySkip, TelemetryStream,
};
pub use time::{IntervalGate, TimeDuration, TimeInstant, TimeSource};
pub use transport::{Advertising, FramingError, LineBuffer};
