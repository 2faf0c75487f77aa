//! Colors used by the indicator and the hex color parser.

use smart_leds::RGB8;

use crate::{Error, Result};

/// Number of hex digits in a color string.
const HEX_COLOR_LEN: usize = 6;

pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
pub const GREEN: RGB8 = RGB8 { r: 0, g: 255, b: 0 };
pub const ORANGE: RGB8 = RGB8 { r: 255, g: 165, b: 0 };
pub const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };

/// Parses a color given as exactly six hex digits, like `FF8000`.
///
/// Digits are case-insensitive, a leading `#` is not accepted.
pub fn parse_hex_color(color: &str) -> Result<RGB8> {
    let digits = color.as_bytes();
    if digits.len() != HEX_COLOR_LEN {
        return Err(Error::InvalidHexLength(color.chars().count()));
    }

    let mut channels = [0_u8; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        let high = hex_digit(digits, 2 * i)?;
        let low = hex_digit(digits, 2 * i + 1)?;
        *channel = (high << 4) | low;
    }

    let [r, g, b] = channels;
    Ok(RGB8 { r, g, b })
}

fn hex_digit(digits: &[u8], position: usize) -> Result<u8> {
    char::from(digits[position])
        .to_digit(16)
        .map(|digit| digit as u8)
        .ok_or(Error::InvalidHexDigit(position))
}
