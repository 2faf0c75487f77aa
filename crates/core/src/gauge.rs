//! Utilization bar rendering.

use smart_leds::RGB8;

use crate::{
    color::{BLACK, GREEN, ORANGE, RED},
    pixels::{brightness_level, Pixel, PixelBuffer, STRIP_LEN},
};

/// Colors of the lit gauge pixels: green, then orange and red at the top end.
pub const GAUGE_PALETTE: [RGB8; STRIP_LEN] = [GREEN, GREEN, GREEN, GREEN, GREEN, GREEN, ORANGE, RED];

/// Returns the number of lit pixels for the given utilization fraction.
///
/// The fraction is scaled to the strip length and truncated, values above `1.0`
/// light the whole strip, negative values and `NaN` light nothing.
#[must_use]
pub fn lit_pixels(fraction: f64) -> usize {
    // `as` saturates and maps NaN to zero.
    let lit = (fraction * STRIP_LEN as f64) as i64;
    lit.clamp(0, STRIP_LEN as i64) as usize
}

/// Fills the buffer with the gauge for the given fraction and returns the number of
/// lit pixels.
///
/// Lit pixels get the given brightness and their palette color, the others are
/// black with zero brightness.
///
/// # Panics
///
/// If the brightness is out of the `0.0..=1.0` range.
pub fn apply_gauge(buffer: &mut PixelBuffer, fraction: f64, brightness: f32) -> usize {
    let level = brightness_level(brightness);
    let lit = lit_pixels(fraction);
    let pixels = buffer.pixels_mut().iter_mut().zip(GAUGE_PALETTE);
    for (index, (pixel, color)) in pixels.enumerate() {
        *pixel = if index < lit {
            Pixel {
                color,
                brightness: level,
            }
        } else {
            Pixel {
                color: BLACK,
                brightness: 0,
            }
        };
    }
    lit
}
