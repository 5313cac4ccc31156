//! Non-blocking animation engine.
//!
//! Provides [`AnimationEngine`], which turns the current presence state, color
//! and clock reading into one pixel update per call, and the [`LightFixture`]
//! trait for the pixel hardware. Nothing here sleeps: every timed behavior is
//! an elapsed-time comparison against a stored instant.

use crate::colors::{self, Color};
use crate::config::IndicatorConfig;
use crate::state::{Mode, PresenceState};
use crate::time::{IntervalGate, TimeInstant};

/// Trait for abstracting the addressable light hardware.
///
/// Implement this for your pixel driver (WS2812 over RMT, SPI, PIO, ...).
/// Writes go to a pixel buffer and only reach the hardware on [`show`](Self::show).
pub trait LightFixture {
    /// Sets one pixel in the buffer.
    fn set_pixel(&mut self, index: usize, color: Color);

    /// Turns every pixel in the buffer off.
    fn clear(&mut self);

    /// Flushes the buffer to the hardware.
    fn show(&mut self);

    /// Returns the buffered color of one pixel.
    fn pixel(&self, index: usize) -> Color;
}

/// What the engine displayed on one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Mode that produced the frame.
    pub mode: Mode,
    /// Pixel color after the update.
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
struct Acknowledgment<I: TimeInstant> {
    total_steps: u8,
    remaining_steps: u8,
    last_step: Option<I>,
}

/// Timer state for every animation mode plus the connect acknowledgment.
///
/// The blink and crossfade timers keep running across state changes; only an
/// accepted state command moves the blink reference point (see
/// [`reset_blink`](Self::reset_blink)). The crossfade step is never reset.
#[derive(Debug, Clone)]
pub struct AnimationEngine<I: TimeInstant> {
    blink: IntervalGate<I>,
    crossfade: IntervalGate<I>,
    crossfade_step: u8,
    acknowledgment: Option<Acknowledgment<I>>,
}

impl<I: TimeInstant> AnimationEngine<I> {
    /// Creates an engine whose timers start at `now`.
    pub fn new(now: I) -> Self {
        Self {
            blink: IntervalGate::new(now),
            crossfade: IntervalGate::new(now),
            crossfade_step: 0,
            acknowledgment: None,
        }
    }

    /// Renders one frame and flushes the fixture exactly once.
    pub fn render<F: LightFixture>(
        &mut self,
        state: PresenceState,
        color: Color,
        now: I,
        config: &IndicatorConfig,
        fixture: &mut F,
    ) -> Frame {
        let index = config.pixel_index;
        let mode = match self.step_acknowledgment(color, now, config, fixture) {
            Some(mode) => mode,
            None => self.render_state(state, color, now, config, fixture),
        };

        fixture.show();

        Frame {
            mode,
            color: fixture.pixel(index),
        }
    }

    fn render_state<F: LightFixture>(
        &mut self,
        state: PresenceState,
        color: Color,
        now: I,
        config: &IndicatorConfig,
        fixture: &mut F,
    ) -> Mode {
        let index = config.pixel_index;
        let mode = Mode::for_state(state);

        match mode {
            Mode::Off => fixture.clear(),
            Mode::Solid => fixture.set_pixel(index, color),
            Mode::BlinkSlow | Mode::BlinkFast => {
                let interval = if mode == Mode::BlinkSlow {
                    config.dormant_interval_ms
                } else {
                    config.interested_interval_ms
                };

                if self.blink.poll(now, interval) {
                    // Phase comes from the fixture itself, not from a shadow flag.
                    if fixture.pixel(index) == color {
                        fixture.clear();
                    } else {
                        fixture.set_pixel(index, color);
                    }
                }
            }
            Mode::Crossfade => {
                if self.crossfade.poll(now, config.crossfade_period_ms) {
                    let blended = colors::mix(color, colors::complement(color), self.crossfade_step);
                    fixture.set_pixel(index, blended);
                    self.crossfade_step = self.crossfade_step.wrapping_add(1);
                }
            }
            Mode::Acknowledging { .. } => {}
        }

        mode
    }

    fn step_acknowledgment<F: LightFixture>(
        &mut self,
        color: Color,
        now: I,
        config: &IndicatorConfig,
        fixture: &mut F,
    ) -> Option<Mode> {
        let ack = self.acknowledgment.as_mut()?;

        let due = match ack.last_step {
            None => true,
            Some(last) => now.millis_since(last) >= config.ack_step_ms,
        };

        if due {
            let written = ack.total_steps - ack.remaining_steps;
            if written % 2 == 0 {
                fixture.set_pixel(config.pixel_index, color);
            } else {
                fixture.clear();
            }
            ack.remaining_steps -= 1;
            ack.last_step = Some(now);
        }

        let remaining_steps = ack.remaining_steps;
        if remaining_steps == 0 {
            self.acknowledgment = None;
            debug!("connect acknowledgment complete");
        }

        Some(Mode::Acknowledging { remaining_steps })
    }

    /// Arms the connect acknowledgment: `steps` alternating on/off writes,
    /// the first on the next render, then one per `ack_step_ms`.
    ///
    /// Re-arming while one is in progress starts over.
    pub fn acknowledge(&mut self, steps: u8) {
        if steps == 0 {
            return;
        }
        self.acknowledgment = Some(Acknowledgment {
            total_steps: steps,
            remaining_steps: steps,
            last_step: None,
        });
    }

    /// Drops an in-progress acknowledgment.
    pub fn cancel_acknowledgment(&mut self) {
        self.acknowledgment = None;
    }

    /// Returns true while the acknowledgment overrides normal rendering.
    pub fn is_acknowledging(&self) -> bool {
        self.acknowledgment.is_some()
    }

    /// Moves the blink reference point so the next edge is one interval from `now`.
    pub fn reset_blink(&mut self, now: I) {
        self.blink.reset(now);
    }

    /// Current crossfade blend weight.
    pub fn crossfade_step(&self) -> u8 {
        self.crossfade_step
    }

    /// Instant of the last blink edge or reset.
    pub fn last_toggle(&self) -> I {
        self.blink.last()
    }
}
