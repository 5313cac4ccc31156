//! Transport seams: advertising control and inbound line framing.

use heapless::Vec;

/// Advertising control of the wireless transport.
///
/// Advertising stops while a peer is connected and restarts after it leaves.
pub trait Advertising {
    fn start_advertising(&mut self);
    fn stop_advertising(&mut self);
}

/// Reasons an inbound line was dropped by [`LineBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramingError {
    /// The line did not fit in the buffer.
    Overflow,
    /// The line was not valid UTF-8.
    InvalidUtf8,
}

impl core::fmt::Display for FramingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FramingError::Overflow => write!(f, "line exceeds buffer capacity"),
            FramingError::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FramingError {}

/// Assembles newline-terminated lines from arbitrary byte chunks.
///
/// A `\r` directly before the newline is removed and does not count against
/// the capacity. A line longer than `N` bytes is discarded up to and including
/// its newline.
#[derive(Debug, Default)]
pub struct LineBuffer<const N: usize> {
    pending: Vec<u8, N>,
    // `\r` held back until the next byte shows whether it ends the line
    carriage_return: bool,
    discarding: bool,
    dropped: u32,
}

impl<const N: usize> LineBuffer<N> {
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            carriage_return: false,
            discarding: false,
            dropped: 0,
        }
    }

    /// Feeds received bytes, calling `on_line` for every complete line in order.
    pub fn push(&mut self, bytes: &[u8], mut on_line: impl FnMut(&str)) {
        for &byte in bytes {
            if byte == b'\n' {
                if self.discarding {
                    self.discarding = false;
                } else {
                    self.emit(&mut on_line);
                }
                self.pending.clear();
                self.carriage_return = false;
                continue;
            }

            if self.discarding {
                continue;
            }

            if core::mem::take(&mut self.carriage_return) {
                self.buffer(b'\r');
            }
            if byte == b'\r' {
                self.carriage_return = true;
            } else {
                self.buffer(byte);
            }
        }
    }

    /// Yields the unterminated remainder as a line, for transports that frame
    /// messages by read boundary rather than by newline.
    pub fn take_partial(&mut self, mut on_line: impl FnMut(&str)) {
        if !self.discarding && !self.pending.is_empty() {
            self.emit(&mut on_line);
        }
        self.pending.clear();
        self.carriage_return = false;
        self.discarding = false;
    }

    fn buffer(&mut self, byte: u8) {
        if self.discarding {
            return;
        }
        if self.pending.push(byte).is_err() {
            self.reject(FramingError::Overflow);
            self.pending.clear();
            self.carriage_return = false;
            self.discarding = true;
        }
    }

    fn emit(&mut self, on_line: &mut impl FnMut(&str)) {
        let delivered = core::str::from_utf8(&self.pending).map(|line| on_line(line));
        if delivered.is_err() {
            self.reject(FramingError::InvalidUtf8);
        }
    }

    fn reject(&mut self, error: FramingError) {
        self.dropped = self.dropped.saturating_add(1);
        warn!("dropping inbound line: {}", error);
    }

    /// Bytes buffered towards the next line.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Lines dropped so far for overflow or invalid UTF-8.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
