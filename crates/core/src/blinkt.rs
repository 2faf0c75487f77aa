use embedded_hal::blocking::delay::DelayMs;
use smart_leds::{SmartLedsWrite, RGB8};

use crate::{
    animation::{AnimationSequencer, FlashTarget},
    color::parse_hex_color,
    frame::write_frame,
    gauge::apply_gauge,
    pixels::PixelBuffer,
    port::BitPort,
    DriverError,
};

/// Blinkt! board driver.
///
/// Owns the pixel buffer together with the port the frames are written to and the
/// delay provider used by the animations. Pixel setters only change the buffer, call
/// [`Blinkt::show`] to send it to the strip.
pub struct Blinkt<P, D> {
    pixels: PixelBuffer,
    port: P,
    delay: D,
    /// Play the startup sweep during [`Blinkt::setup`].
    pub show_anim_on_start: bool,
    /// Play the shutdown sweep during [`Blinkt::cleanup`].
    pub show_anim_on_exit: bool,
    /// Turn the strip off during [`Blinkt::cleanup`].
    pub clear_on_exit: bool,
}

impl<P, D> Blinkt<P, D>
where
    P: BitPort,
    D: DelayMs<u32>,
{
    /// Creates a new driver with the default brightness.
    ///
    /// The port must be opened by calling [`Blinkt::setup`] before showing anything.
    pub fn new(port: P, delay: D) -> Self {
        Self::with_buffer(PixelBuffer::default(), port, delay)
    }

    /// Creates a new driver with the given initial brightness.
    ///
    /// # Panics
    ///
    /// If the brightness is out of the `0.0..=1.0` range.
    pub fn with_brightness(port: P, delay: D, brightness: f32) -> Self {
        Self::with_buffer(PixelBuffer::new(brightness), port, delay)
    }

    fn with_buffer(pixels: PixelBuffer, port: P, delay: D) -> Self {
        Self {
            pixels,
            port,
            delay,
            show_anim_on_start: true,
            show_anim_on_exit: true,
            clear_on_exit: true,
        }
    }

    /// Returns the pixel buffer.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Returns the mutable pixel buffer.
    pub fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }

    /// Opens the port and plays the startup sweep if enabled.
    pub fn setup(&mut self) -> Result<(), P::Error> {
        self.port.open()?;
        log::debug!("Opened the Blinkt port");

        if self.show_anim_on_start {
            self.sequencer().startup_sweep()?;
        }
        Ok(())
    }

    /// Sends the current buffer state to the strip.
    pub fn show(&mut self) -> Result<(), P::Error> {
        write_frame(&mut self.port, &self.pixels)
    }

    /// Shows the utilization gauge for the given fraction and returns the number of
    /// lit pixels.
    ///
    /// # Panics
    ///
    /// If the brightness is out of the `0.0..=1.0` range.
    pub fn show_gauge(&mut self, fraction: f64, brightness: f32) -> Result<usize, P::Error> {
        let lit = apply_gauge(&mut self.pixels, fraction, brightness);
        self.show()?;
        Ok(lit)
    }

    /// Flashes a single pixel on and off the given number of times.
    pub fn flash_pixel(
        &mut self,
        index: usize,
        times: usize,
        color: &str,
    ) -> Result<(), DriverError<P::Error>> {
        let color = parse_hex_color(color)?;
        self.sequencer()
            .flash(FlashTarget::Pixel(index), times, color)
    }

    /// Flashes the whole strip on and off the given number of times.
    pub fn flash_all(&mut self, times: usize, color: &str) -> Result<(), DriverError<P::Error>> {
        let color = parse_hex_color(color)?;
        self.sequencer().flash(FlashTarget::All, times, color)
    }

    /// Plays the startup sweep.
    pub fn show_initial_anim(&mut self) -> Result<(), P::Error> {
        self.sequencer().startup_sweep()
    }

    /// Plays the shutdown sweep.
    pub fn show_final_anim(&mut self) -> Result<(), P::Error> {
        self.sequencer().shutdown_sweep()
    }

    /// Plays the shutdown sweep and clears the strip, if enabled, then releases the port.
    pub fn cleanup(&mut self) -> Result<(), P::Error> {
        if self.show_anim_on_exit {
            self.show_final_anim()?;
        }
        if self.clear_on_exit {
            self.pixels.clear();
            self.show()?;
        }

        self.port.close()?;
        log::debug!("Closed the Blinkt port");
        Ok(())
    }

    /// Returns the port and the delay provider.
    pub fn into_inner(self) -> (P, D) {
        (self.port, self.delay)
    }

    fn sequencer(&mut self) -> AnimationSequencer<'_, P, D> {
        AnimationSequencer::new(&mut self.pixels, &mut self.port, &mut self.delay)
    }
}

impl<P, D> SmartLedsWrite for Blinkt<P, D>
where
    P: BitPort,
    D: DelayMs<u32>,
{
    type Error = P::Error;
    type Color = RGB8;

    /// Sets the pixel colors in the strip order and shows them.
    ///
    /// Colors beyond the strip length are ignored, pixels without a color keep their
    /// current one.
    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        for (pixel, color) in self.pixels.pixels_mut().iter_mut().zip(iterator) {
            pixel.color = color.into();
        }
        self.show()
    }
}
