//! Timing and behavior configuration.

use crate::colors::{self, Color};

/// Slow blink half-period.
pub const DORMANT_INTERVAL_MS: u64 = 1000;
/// Fast blink half-period.
pub const INTERESTED_INTERVAL_MS: u64 = 500;
/// Minimum time between crossfade steps.
pub const CROSSFADE_PERIOD_MS: u64 = 10;
/// Writes in the connect acknowledgment (on, off, on, off).
pub const ACK_STEPS: u8 = 4;
/// Time between acknowledgment writes.
pub const ACK_STEP_MS: u64 = 150;
/// Orientation filter update rate.
pub const TELEMETRY_RATE_HZ: u32 = 200;

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A blink interval or the crossfade period is zero.
    ZeroInterval,
    /// Acknowledgment step count is zero or odd.
    InvalidAckSteps(u8),
    /// Telemetry rate outside 1..=1000 Hz.
    InvalidRate(u32),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroInterval => {
                write!(f, "blink intervals and crossfade period must be non-zero")
            }
            ConfigError::InvalidAckSteps(steps) => {
                write!(
                    f,
                    "acknowledgment needs a non-zero even number of steps, got {}",
                    steps
                )
            }
            ConfigError::InvalidRate(hz) => {
                write!(f, "telemetry rate must be within 1..=1000 Hz, got {}", hz)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Indicator configuration. Build with [`IndicatorConfig::builder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorConfig {
    pub(crate) color: Color,
    pub(crate) pixel_index: usize,
    pub(crate) dormant_interval_ms: u64,
    pub(crate) interested_interval_ms: u64,
    pub(crate) crossfade_period_ms: u64,
    pub(crate) ack_steps: u8,
    pub(crate) ack_step_ms: u64,
    pub(crate) accept_color_commands: bool,
}

impl IndicatorConfig {
    pub fn builder() -> IndicatorConfigBuilder {
        IndicatorConfigBuilder::new()
    }

    /// Color shown at startup.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pixel_index(&self) -> usize {
        self.pixel_index
    }

    pub fn dormant_interval_ms(&self) -> u64 {
        self.dormant_interval_ms
    }

    pub fn interested_interval_ms(&self) -> u64 {
        self.interested_interval_ms
    }

    pub fn crossfade_period_ms(&self) -> u64 {
        self.crossfade_period_ms
    }

    pub fn ack_steps(&self) -> u8 {
        self.ack_steps
    }

    pub fn ack_step_ms(&self) -> u64 {
        self.ack_step_ms
    }

    /// Whether `color:` lines change the color.
    pub fn accept_color_commands(&self) -> bool {
        self.accept_color_commands
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            color: colors::RED,
            pixel_index: 0,
            dormant_interval_ms: DORMANT_INTERVAL_MS,
            interested_interval_ms: INTERESTED_INTERVAL_MS,
            crossfade_period_ms: CROSSFADE_PERIOD_MS,
            ack_steps: ACK_STEPS,
            ack_step_ms: ACK_STEP_MS,
            accept_color_commands: false,
        }
    }
}

/// Builder for validated [`IndicatorConfig`] values.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorConfigBuilder {
    config: IndicatorConfig,
}

impl IndicatorConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: IndicatorConfig::default(),
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.config.color = color;
        self
    }

    pub fn pixel_index(mut self, index: usize) -> Self {
        self.config.pixel_index = index;
        self
    }

    pub fn dormant_interval_ms(mut self, millis: u64) -> Self {
        self.config.dormant_interval_ms = millis;
        self
    }

    pub fn interested_interval_ms(mut self, millis: u64) -> Self {
        self.config.interested_interval_ms = millis;
        self
    }

    pub fn crossfade_period_ms(mut self, millis: u64) -> Self {
        self.config.crossfade_period_ms = millis;
        self
    }

    /// Number of on/off writes performed after a connect.
    pub fn ack_steps(mut self, steps: u8) -> Self {
        self.config.ack_steps = steps;
        self
    }

    pub fn ack_step_ms(mut self, millis: u64) -> Self {
        self.config.ack_step_ms = millis;
        self
    }

    pub fn accept_color_commands(mut self, accept: bool) -> Self {
        self.config.accept_color_commands = accept;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    /// * `ZeroInterval` - a blink interval or the crossfade period is zero
    /// * `InvalidAckSteps` - acknowledgment step count is zero or odd
    pub fn build(self) -> Result<IndicatorConfig, ConfigError> {
        let c = &self.config;
        if c.dormant_interval_ms == 0 || c.interested_interval_ms == 0 || c.crossfade_period_ms == 0
        {
            return Err(ConfigError::ZeroInterval);
        }
        if c.ack_steps == 0 || c.ack_steps % 2 != 0 {
            return Err(ConfigError::InvalidAckSteps(c.ack_steps));
        }
        Ok(self.config)
    }
}

impl Default for IndicatorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Layout of an outbound telemetry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordLayout {
    /// `<tag>,<qw>,<qx>` without terminator.
    #[default]
    Compact,
    /// `<millis>,<qw>,<qx>,<qy>,<qz>\n`, millis counted from stream start.
    Timestamped,
}

/// Telemetry stream configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub(crate) rate_hz: u32,
    pub(crate) tag: u32,
    pub(crate) layout: RecordLayout,
}

impl TelemetryConfig {
    pub fn builder() -> TelemetryConfigBuilder {
        TelemetryConfigBuilder::new()
    }

    pub fn rate_hz(&self) -> u32 {
        self.rate_hz
    }

    /// Minimum time between records, `1000 / rate_hz` truncated.
    pub fn period_ms(&self) -> u64 {
        1000 / u64::from(self.rate_hz)
    }

    pub fn tag(&self) -> u32 {
        self.tag
    }

    pub fn layout(&self) -> RecordLayout {
        self.layout
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            rate_hz: TELEMETRY_RATE_HZ,
            tag: 0,
            layout: RecordLayout::Compact,
        }
    }
}

/// Builder for validated [`TelemetryConfig`] values.
#[derive(Debug, Clone, Copy)]
pub struct TelemetryConfigBuilder {
    config: TelemetryConfig,
}

impl TelemetryConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: TelemetryConfig::default(),
        }
    }

    pub fn rate_hz(mut self, hz: u32) -> Self {
        self.config.rate_hz = hz;
        self
    }

    /// First field of a compact record.
    pub fn tag(mut self, tag: u32) -> Self {
        self.config.tag = tag;
        self
    }

    pub fn layout(mut self, layout: RecordLayout) -> Self {
        self.config.layout = layout;
        self
    }

    /// # Errors
    /// * `InvalidRate` - rate is zero or above 1000 Hz
    pub fn build(self) -> Result<TelemetryConfig, ConfigError> {
        if !(1..=1000).contains(&self.config.rate_hz) {
            return Err(ConfigError::InvalidRate(self.config.rate_hz));
        }
        Ok(self.config)
    }
}

impl Default for TelemetryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
