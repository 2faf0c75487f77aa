//! APA102 frame encoding.
//!
//! A frame consists of a zero start frame, one 32-bit word per pixel and a zero end
//! frame. Every byte goes out most significant bit first: the data line is set to
//! the bit value and the clock line is pulsed high then low. After the end frame four
//! more clock pulses are sent with the data line held low, the strip needs them to
//! latch the last shifted values.

use crate::{
    pixels::{Pixel, PixelBuffer, STRIP_LEN},
    port::{BitPort, Line},
};

/// Length of the all-zero start frame in bytes.
pub const START_FRAME_LEN: usize = 4;
/// Length of the all-zero end frame in bytes.
pub const END_FRAME_LEN: usize = 4;
/// Length of the single pixel word in bytes.
pub const PIXEL_WORD_LEN: usize = 4;
/// Total length of the encoded frame payload in bytes.
pub const FRAME_LEN: usize = START_FRAME_LEN + STRIP_LEN * PIXEL_WORD_LEN + END_FRAME_LEN;
/// Number of the trailing clock pulses with the data line held low.
pub const LATCH_PULSES: usize = 4;

/// Three leading ones of the pixel word, the brightness occupies the low five bits.
const PIXEL_WORD_HEADER: u8 = 0b1110_0000;

/// Encoded frame payload.
pub type Frame = [u8; FRAME_LEN];

/// Encodes a single pixel as `header | brightness, blue, green, red`.
#[must_use]
pub fn pixel_word(pixel: &Pixel) -> [u8; PIXEL_WORD_LEN] {
    [
        PIXEL_WORD_HEADER | pixel.brightness,
        pixel.color.b,
        pixel.color.g,
        pixel.color.r,
    ]
}

/// Encodes the whole buffer snapshot into the frame payload.
#[must_use]
pub fn encode(buffer: &PixelBuffer) -> Frame {
    let mut frame = [0_u8; FRAME_LEN];
    let words = frame[START_FRAME_LEN..FRAME_LEN - END_FRAME_LEN].chunks_exact_mut(PIXEL_WORD_LEN);
    for (word, pixel) in words.zip(buffer.pixels()) {
        word.copy_from_slice(&pixel_word(pixel));
    }
    frame
}

/// Encodes the buffer and clocks it out through the given port, followed by the
/// latch pulses.
pub fn write_frame<P: BitPort>(port: &mut P, buffer: &PixelBuffer) -> Result<(), P::Error> {
    let frame = encode(buffer);
    log::trace!("Writing frame {frame:02x?}");

    for byte in frame {
        write_byte(port, byte)?;
    }
    latch(port)
}

fn write_byte<P: BitPort>(port: &mut P, byte: u8) -> Result<(), P::Error> {
    for bit in (0..u8::BITS).rev() {
        port.set_level(Line::Data, (byte >> bit) & 1 == 1)?;
        pulse_clock(port)?;
    }
    Ok(())
}

fn latch<P: BitPort>(port: &mut P) -> Result<(), P::Error> {
    port.set_low(Line::Data)?;
    for _ in 0..LATCH_PULSES {
        pulse_clock(port)?;
    }
    Ok(())
}

fn pulse_clock<P: BitPort>(port: &mut P) -> Result<(), P::Error> {
    port.set_high(Line::Clock)?;
    port.set_low(Line::Clock)
}
