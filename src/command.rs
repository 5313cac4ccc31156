//! Line protocol: inbound commands and their outbound encoding.
//!
//! Inbound lines look like `state:<token>`. Anything else is not an error,
//! it simply parses to [`Command::Unrecognized`].

use core::fmt::Write;

use heapless::String;

use crate::colors::{self, Color};
use crate::state::PresenceState;

/// Prefix of a presence state directive.
pub const STATE_PREFIX: &str = "state:";

/// Prefix of a color directive.
pub const COLOR_PREFIX: &str = "color:";

/// Capacity of the longest encoded state line, newline included.
pub const MAX_STATE_LINE: usize = STATE_PREFIX.len() + PresenceState::MAX_TOKEN_LEN + 1;

/// A parsed inbound line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `state:<token>` with a known token.
    SetState(PresenceState),
    /// `color:RRGGBB` or `color:#RRGGBB`.
    SetColor(Color),
    /// Not a command, or a command with an unknown argument.
    Unrecognized,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Command::SetState(state) => defmt::write!(f, "SetState({})", state),
            Command::SetColor(color) => {
                defmt::write!(f, "SetColor({=u32:#x})", colors::to_hex(*color))
            }
            Command::Unrecognized => defmt::write!(f, "Unrecognized"),
        }
    }
}

impl Command {
    /// Parses one line. Trailing CR/LF is ignored, nothing else is normalized.
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);

        if let Some(token) = line.strip_prefix(STATE_PREFIX) {
            return match PresenceState::from_token(token) {
                Some(state) => Command::SetState(state),
                None => Command::Unrecognized,
            };
        }

        if let Some(hex) = line.strip_prefix(COLOR_PREFIX) {
            return match colors::parse_hex(hex) {
                Some(color) => Command::SetColor(color),
                None => Command::Unrecognized,
            };
        }

        Command::Unrecognized
    }
}

/// Encodes the line a controller sends to request `state`.
pub fn encode_state(state: PresenceState) -> Result<String<MAX_STATE_LINE>, core::fmt::Error> {
    let mut line = String::new();
    writeln!(line, "{}{}", STATE_PREFIX, state.token())?;
    Ok(line)
}
