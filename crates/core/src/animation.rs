//! Fixed light choreographies.

use embedded_hal::blocking::delay::DelayMs;
use smart_leds::RGB8;

use crate::{
    color::{BLACK, GREEN, RED},
    frame::write_frame,
    pixels::{PixelBuffer, STRIP_LEN},
    port::BitPort,
    DriverError, Result as PixelResult,
};

/// Number of brightness steps in the sweep ramps.
const RAMP_STEPS: u8 = 10;
/// Brightness increment of the single ramp step.
const RAMP_STEP: f32 = 0.05;
/// Delay after each ramp step, in milliseconds.
const RAMP_DELAY_MS: u32 = 70;
/// Delay after each sweep step, in milliseconds.
const SWEEP_DELAY_MS: u32 = 80;
/// Delay after each flash half period, in milliseconds.
const FLASH_DELAY_MS: u32 = 30;
/// Sweeps light or clear pixels from the center pair up to this offset from the edge.
const SWEEP_OFFSETS: usize = 3;
/// Center pixels lit at the start of the startup sweep.
const CENTER_PIXELS: [usize; 2] = [3, 4];

/// Pixels affected by a flash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashTarget {
    /// A single pixel with the given index.
    Pixel(usize),
    /// The whole strip.
    All,
}

/// Plays animations by mutating the buffer, rendering it and waiting a fixed
/// delay after each step.
///
/// Animations run to completion, there is no way to interrupt them halfway.
pub struct AnimationSequencer<'a, P, D> {
    buffer: &'a mut PixelBuffer,
    port: &'a mut P,
    delay: &'a mut D,
}

impl<'a, P, D> AnimationSequencer<'a, P, D>
where
    P: BitPort,
    D: DelayMs<u32>,
{
    /// Creates a new sequencer over the given buffer, port and delay.
    pub fn new(buffer: &'a mut PixelBuffer, port: &'a mut P, delay: &'a mut D) -> Self {
        Self {
            buffer,
            port,
            delay,
        }
    }

    fn render(&mut self, delay_ms: u32) -> Result<(), P::Error> {
        write_frame(&mut *self.port, &*self.buffer)?;
        if delay_ms > 0 {
            self.delay.delay_ms(delay_ms);
        }
        Ok(())
    }

    fn ramp_brightness(&mut self, steps: impl Iterator<Item = u8>) -> Result<(), P::Error> {
        for step in steps {
            self.buffer.set_brightness(f32::from(step) * RAMP_STEP);
            self.render(RAMP_DELAY_MS)?;
        }
        Ok(())
    }

    fn set_mirrored(&mut self, offset: usize, color: RGB8) -> PixelResult<()> {
        self.buffer.set_pixel_color(offset, color)?;
        self.buffer.set_pixel_color(STRIP_LEN - 1 - offset, color)
    }

    /// Green light growing from the center of the strip towards the edges.
    pub fn startup_sweep(&mut self) -> Result<(), P::Error> {
        log::debug!("Playing the startup sweep");

        self.buffer.clear();
        for index in CENTER_PIXELS {
            self.buffer.set_pixel_color(index, GREEN).ok();
        }
        self.ramp_brightness(1..=RAMP_STEPS)?;

        for offset in (0..SWEEP_OFFSETS).rev() {
            self.set_mirrored(offset, GREEN).ok();
            self.render(SWEEP_DELAY_MS)?;
        }

        self.buffer.clear();
        self.render(0)
    }

    /// Red light shrinking from the edges of the strip towards the center and fading out.
    pub fn shutdown_sweep(&mut self) -> Result<(), P::Error> {
        log::debug!("Playing the shutdown sweep");

        self.buffer.set_all_color(RED);
        self.render(SWEEP_DELAY_MS)?;

        for offset in 0..SWEEP_OFFSETS {
            self.set_mirrored(offset, BLACK).ok();
            self.render(SWEEP_DELAY_MS)?;
        }

        self.ramp_brightness((1..=RAMP_STEPS).rev())?;

        self.buffer.clear();
        self.render(0)
    }

    /// Flashes the target pixels with the given color at full brightness.
    ///
    /// Pixels which are not targeted are left untouched. A pixel target out of
    /// range fails before anything is rendered.
    pub fn flash(
        &mut self,
        target: FlashTarget,
        times: usize,
        color: RGB8,
    ) -> Result<(), DriverError<P::Error>> {
        match target {
            FlashTarget::Pixel(index) => self.buffer.set_pixel_color(index, color)?,
            FlashTarget::All => self.buffer.set_all_color(color),
        }

        for _ in 0..times {
            self.set_target_brightness(target, 1.0)?;
            self.render(FLASH_DELAY_MS).map_err(DriverError::Port)?;
            self.set_target_brightness(target, 0.0)?;
            self.render(FLASH_DELAY_MS).map_err(DriverError::Port)?;
        }
        Ok(())
    }

    fn set_target_brightness(&mut self, target: FlashTarget, brightness: f32) -> PixelResult<()> {
        match target {
            FlashTarget::Pixel(index) => self.buffer.set_pixel_brightness(index, brightness),
            FlashTarget::All => {
                self.buffer.set_brightness(brightness);
                Ok(())
            }
        }
    }
}
