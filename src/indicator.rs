//! Presence indicator controller.
//!
//! [`PresenceIndicator`] owns everything the light depends on: the fixture,
//! the presence state, the color and the animation timers. The host loop
//! calls one of the `tick` methods per iteration and forwards transport
//! lifecycle events; nothing else mutates the state.

use crate::colors::Color;
use crate::command::Command;
use crate::config::IndicatorConfig;
use crate::engine::{AnimationEngine, Frame, LightFixture};
use crate::state::PresenceState;
use crate::time::{TimeInstant, TimeSource};
use crate::transport::{Advertising, LineBuffer};

/// Drives a single pixel from presence state commands.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `F` - Light fixture implementation type
/// * `T` - Time source implementation type
pub struct PresenceIndicator<'t, I: TimeInstant, F: LightFixture, T: TimeSource<I>> {
    fixture: F,
    time_source: &'t T,
    config: IndicatorConfig,
    state: PresenceState,
    color: Color,
    engine: AnimationEngine<I>,
}

impl<'t, I: TimeInstant, F: LightFixture, T: TimeSource<I>> PresenceIndicator<'t, I, F, T> {
    /// Creates an `Inert` indicator and clears the fixture.
    pub fn new(mut fixture: F, time_source: &'t T, config: IndicatorConfig) -> Self {
        fixture.clear();
        fixture.show();

        Self {
            fixture,
            time_source,
            config,
            state: PresenceState::Inert,
            color: config.color,
            engine: AnimationEngine::new(time_source.now()),
        }
    }

    /// Parses and applies one inbound line at the current time.
    ///
    /// Returns the parsed command; lines that are not commands leave the
    /// indicator untouched.
    pub fn apply_state_command(&mut self, line: &str) -> Command {
        let now = self.time_source.now();
        self.apply_line(line, now)
    }

    fn apply_line(&mut self, line: &str, now: I) -> Command {
        let command = Command::parse(line);
        self.apply_command(command, now);
        command
    }

    /// Applies a parsed command as if it arrived at `now`.
    ///
    /// Returns true if the command changed the indicator. An accepted state
    /// command restarts the blink interval from `now`, even when the state
    /// is unchanged.
    pub fn apply_command(&mut self, command: Command, now: I) -> bool {
        match command {
            Command::SetState(state) => {
                if state != self.state {
                    info!("presence state {} -> {}", self.state, state);
                }
                self.state = state;
                self.engine.reset_blink(now);
                true
            }
            Command::SetColor(color) if self.config.accept_color_commands => {
                debug!("color set to {} {} {}", color.red, color.green, color.blue);
                self.color = color;
                true
            }
            Command::SetColor(_) => {
                debug!("color commands disabled, ignoring");
                false
            }
            Command::Unrecognized => {
                trace!("ignoring unrecognized line");
                false
            }
        }
    }

    /// Renders one frame without inbound lines.
    pub fn tick(&mut self) -> Frame {
        self.tick_with(core::iter::empty())
    }

    /// Applies `lines` in order, then renders one frame.
    ///
    /// The clock is sampled once, so every line and the frame share one instant.
    pub fn tick_with<'a, L>(&mut self, lines: L) -> Frame
    where
        L: IntoIterator<Item = &'a str>,
    {
        let now = self.time_source.now();
        for line in lines {
            self.apply_line(line, now);
        }
        self.render(now)
    }

    /// Frames `bytes` into lines, applies every complete one, then renders.
    pub fn tick_with_bytes<const N: usize>(
        &mut self,
        framer: &mut LineBuffer<N>,
        bytes: &[u8],
    ) -> Frame {
        let now = self.time_source.now();
        framer.push(bytes, |line| {
            self.apply_line(line, now);
        });
        self.render(now)
    }

    /// Like [`tick_with_bytes`](Self::tick_with_bytes) for transports that frame
    /// by read boundary: the unterminated remainder of `bytes` is applied as a
    /// line too, before the frame is rendered.
    pub fn tick_with_message<const N: usize>(
        &mut self,
        framer: &mut LineBuffer<N>,
        bytes: &[u8],
    ) -> Frame {
        let now = self.time_source.now();
        framer.push(bytes, |line| {
            self.apply_line(line, now);
        });
        framer.take_partial(|line| {
            self.apply_line(line, now);
        });
        self.render(now)
    }

    fn render(&mut self, now: I) -> Frame {
        self.engine
            .render(self.state, self.color, now, &self.config, &mut self.fixture)
    }

    /// A peer connected: stop advertising and start the acknowledgment blink.
    pub fn on_connect<A: Advertising>(&mut self, advertising: &mut A) {
        advertising.stop_advertising();
        info!("peer connected");
        self.engine.acknowledge(self.config.ack_steps);
    }

    /// The peer left: restart advertising and fall back to `Inert`.
    pub fn on_disconnect<A: Advertising>(&mut self, reason: u8, advertising: &mut A) {
        advertising.start_advertising();
        info!("peer disconnected, reason {}", reason);
        self.engine.cancel_acknowledgment();
        self.state = PresenceState::Inert;
    }

    /// Returns the current presence state.
    pub fn state(&self) -> PresenceState {
        self.state
    }

    /// Returns the configured color.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn crossfade_step(&self) -> u8 {
        self.engine.crossfade_step()
    }

    /// Returns true while the connect acknowledgment is running.
    pub fn is_acknowledging(&self) -> bool {
        self.engine.is_acknowledging()
    }

    /// Instant of the last blink edge or blink reset.
    pub fn last_toggle(&self) -> I {
        self.engine.last_toggle()
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn fixture(&self) -> &F {
        &self.fixture
    }

    /// Releases the fixture.
    pub fn into_fixture(self) -> F {
        self.fixture
    }
}
