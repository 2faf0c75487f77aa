//! Pixel buffer of the strip.

use smart_leds::RGB8;

use crate::{color::parse_hex_color, Error, Result};

/// Number of pixels on the strip.
pub const STRIP_LEN: usize = 8;
/// The highest raw brightness level supported by the LED driver.
pub const MAX_BRIGHTNESS_LEVEL: u8 = 31;
/// Raw brightness level of a freshly created buffer.
pub const DEFAULT_BRIGHTNESS_LEVEL: u8 = 10;
/// Lower bound of the user brightness.
pub const MIN_BRIGHTNESS: f32 = 0.0;
/// Upper bound of the user brightness.
pub const MAX_BRIGHTNESS: f32 = 1.0;

/// Converts a user brightness in the `0.0..=1.0` range into the raw level.
///
/// # Panics
///
/// An out of range brightness (`NaN` included) is a configuration error and aborts
/// with a message naming the value and the valid bounds.
#[must_use]
pub fn brightness_level(brightness: f32) -> u8 {
    assert!(
        (MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&brightness),
        "Supplied brightness was {brightness:?} - value should be between: {MIN_BRIGHTNESS:?} and {MAX_BRIGHTNESS:?}"
    );
    // Round half up, the value is never negative here.
    (brightness * f32::from(MAX_BRIGHTNESS_LEVEL) + 0.5) as u8
}

/// A single strip cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    /// Pixel color.
    pub color: RGB8,
    /// Raw brightness level in the `0..=31` range.
    pub brightness: u8,
}

/// Fixed size buffer with the state of every strip pixel.
///
/// Mutations are batched, nothing reaches the strip until the buffer is rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: [Pixel; STRIP_LEN],
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::with_level(DEFAULT_BRIGHTNESS_LEVEL)
    }
}

impl PixelBuffer {
    /// Creates a black buffer with the given uniform brightness.
    ///
    /// # Panics
    ///
    /// If the brightness is out of the `0.0..=1.0` range.
    #[must_use]
    pub fn new(brightness: f32) -> Self {
        Self::with_level(brightness_level(brightness))
    }

    fn with_level(brightness: u8) -> Self {
        let pixel = Pixel {
            color: RGB8::default(),
            brightness,
        };
        Self {
            pixels: [pixel; STRIP_LEN],
        }
    }

    /// Returns the pixel with the given index.
    pub fn pixel(&self, index: usize) -> Result<Pixel> {
        self.pixels
            .get(index)
            .copied()
            .ok_or(Error::PixelIndexOutOfRange(index))
    }

    /// Returns all pixels in the strip order.
    #[must_use]
    pub fn pixels(&self) -> &[Pixel; STRIP_LEN] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Pixel; STRIP_LEN] {
        &mut self.pixels
    }

    fn pixel_mut(&mut self, index: usize) -> Result<&mut Pixel> {
        self.pixels
            .get_mut(index)
            .ok_or(Error::PixelIndexOutOfRange(index))
    }

    /// Sets the color channels of a single pixel, its brightness stays the same.
    pub fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8) -> Result<()> {
        self.set_pixel_color(index, RGB8 { r, g, b })
    }

    /// Sets the color of a single pixel.
    pub fn set_pixel_color(&mut self, index: usize, color: RGB8) -> Result<()> {
        self.pixel_mut(index)?.color = color;
        Ok(())
    }

    /// Sets the color of a single pixel from a six digit hex string like `FF8000`.
    ///
    /// The buffer stays unchanged if the color or the index is invalid.
    pub fn set_pixel_hex(&mut self, index: usize, color: &str) -> Result<()> {
        let color = parse_hex_color(color)?;
        self.set_pixel_color(index, color)
    }

    /// Sets the color channels of every pixel.
    pub fn set_all(&mut self, r: u8, g: u8, b: u8) {
        self.set_all_color(RGB8 { r, g, b });
    }

    /// Sets the color of every pixel.
    pub fn set_all_color(&mut self, color: RGB8) {
        for pixel in &mut self.pixels {
            pixel.color = color;
        }
    }

    /// Sets the brightness of every pixel.
    ///
    /// # Panics
    ///
    /// If the brightness is out of the `0.0..=1.0` range.
    pub fn set_brightness(&mut self, brightness: f32) {
        let level = brightness_level(brightness);
        for pixel in &mut self.pixels {
            pixel.brightness = level;
        }
    }

    /// Sets the brightness of a single pixel.
    ///
    /// # Panics
    ///
    /// If the brightness is out of the `0.0..=1.0` range.
    pub fn set_pixel_brightness(&mut self, index: usize, brightness: f32) -> Result<()> {
        let level = brightness_level(brightness);
        self.pixel_mut(index)?.brightness = level;
        Ok(())
    }

    /// Turns every pixel off, the brightness levels are kept.
    pub fn clear(&mut self) {
        self.set_all_color(RGB8::default());
    }
}
