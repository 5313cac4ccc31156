//! Presence states and the animation mode each one selects.

/// What the wearer's light currently signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PresenceState {
    /// Light off.
    #[default]
    Inert,
    /// Slow blink.
    Dormant,
    /// Fast blink.
    Interested,
    /// Solid color.
    Activated,
    /// Crossfade between the color and its complement.
    Integrated,
}

impl PresenceState {
    /// Every state, in protocol order.
    pub const ALL: [PresenceState; 5] = [
        PresenceState::Inert,
        PresenceState::Dormant,
        PresenceState::Interested,
        PresenceState::Activated,
        PresenceState::Integrated,
    ];

    /// Wire token used after the `state:` prefix.
    pub const fn token(self) -> &'static str {
        match self {
            PresenceState::Inert => "inert",
            PresenceState::Dormant => "dormant",
            PresenceState::Interested => "interested",
            PresenceState::Activated => "activated",
            PresenceState::Integrated => "integrated",
        }
    }

    /// Length of the longest wire token.
    pub const MAX_TOKEN_LEN: usize = {
        let mut longest = 0;
        let mut i = 0;
        while i < Self::ALL.len() {
            let len = Self::ALL[i].token().len();
            if len > longest {
                longest = len;
            }
            i += 1;
        }
        longest
    };

    /// Case-sensitive token lookup.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.token() == token)
    }
}

impl core::fmt::Display for PresenceState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.token())
    }
}

/// Rendering mode of the animation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Pixel cleared every tick.
    Off,
    /// Pixel held at the configured color.
    Solid,
    /// Toggle on the dormant interval.
    BlinkSlow,
    /// Toggle on the interested interval.
    BlinkFast,
    /// Stepped blend towards the complement.
    Crossfade,
    /// Connect acknowledgment in progress; overrides the state's mode.
    Acknowledging {
        /// On/off writes still to perform.
        remaining_steps: u8,
    },
}

impl Mode {
    /// Mode a presence state renders with.
    pub const fn for_state(state: PresenceState) -> Self {
        match state {
            PresenceState::Inert => Mode::Off,
            PresenceState::Dormant => Mode::BlinkSlow,
            PresenceState::Interested => Mode::BlinkFast,
            PresenceState::Activated => Mode::Solid,
            PresenceState::Integrated => Mode::Crossfade,
        }
    }
}
