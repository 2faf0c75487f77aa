//! Nomad Blinkt core
//!
//! Pixel buffer model and the bit-serial protocol of the eight pixel APA102 strip
//! found on the Pimoroni Blinkt! board. This crate is hardware agnostic: the two
//! output lines are provided by a [`BitPort`] implementation and animation delays go
//! through the [`embedded_hal`] delay traits.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
// Too many false positives.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss
)]

pub use smart_leds::RGB8;

pub use crate::{
    animation::{AnimationSequencer, FlashTarget},
    blinkt::Blinkt,
    color::parse_hex_color,
    errors::{DriverError, Error, Result},
    frame::{encode, write_frame, Frame, FRAME_LEN, LATCH_PULSES},
    gauge::{apply_gauge, lit_pixels, GAUGE_PALETTE},
    pixels::{
        brightness_level, Pixel, PixelBuffer, DEFAULT_BRIGHTNESS_LEVEL, MAX_BRIGHTNESS,
        MAX_BRIGHTNESS_LEVEL, MIN_BRIGHTNESS, STRIP_LEN,
    },
    port::{BitPort, Line, PinPort, CLOCK_PIN, DATA_PIN},
};

pub mod animation;
pub mod color;
pub mod errors;
pub mod frame;
pub mod gauge;
pub mod pixels;
pub mod port;

mod blinkt;

#[cfg(any(feature = "std", test))]
pub mod test_utils;
