//! 8-bit color helpers.
//!
//! The pixel is driven with 8 bits per channel, so all arithmetic here is
//! integer arithmetic on `Srgb<u8>`.

use palette::Srgb;

/// An RGB triple, 8 bits per channel.
pub type Color = Srgb<u8>;

/// Startup color.
pub const RED: Color = Srgb::new(255, 0, 0);

/// Cleared pixel.
pub const OFF: Color = Srgb::new(0, 0, 0);

/// Bitwise complement of every channel.
#[inline]
pub fn complement(color: Color) -> Color {
    Srgb::new(!color.red, !color.green, !color.blue)
}

/// Linear per-channel blend of `from` towards `to`.
///
/// Weight 0 yields `from`, weight 255 yields `to`. Each channel is
/// `(from * (255 - weight) + to * weight) / 255` with integer division.
#[inline]
pub fn mix(from: Color, to: Color, weight: u8) -> Color {
    let w = u16::from(weight);
    let channel = |a: u8, b: u8| -> u8 {
        let mixed = (u16::from(a) * (255 - w) + u16::from(b) * w) / 255;
        mixed as u8
    };

    Srgb::new(
        channel(from.red, to.red),
        channel(from.green, to.green),
        channel(from.blue, to.blue),
    )
}

/// Builds a color from a packed `0xRRGGBB` value. The top byte is ignored.
#[inline]
pub const fn from_hex(packed: u32) -> Color {
    Srgb::new(
        ((packed >> 16) & 0xFF) as u8,
        ((packed >> 8) & 0xFF) as u8,
        (packed & 0xFF) as u8,
    )
}

/// Packs a color as `0xRRGGBB`.
#[inline]
pub fn to_hex(color: Color) -> u32 {
    (u32::from(color.red) << 16) | (u32::from(color.green) << 8) | u32::from(color.blue)
}

/// Parses `RRGGBB` or `#RRGGBB` (hex digits in either case).
pub fn parse_hex(text: &str) -> Option<Color> {
    let digits = text.strip_prefix('#').unwrap_or(text);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().map(from_hex)
}
