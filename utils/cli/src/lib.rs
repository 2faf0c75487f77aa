//! Nomad node utilization indicator for the Blinkt! LED strip.

pub use crate::{
    hardware::GpioPort,
    monitor::{display_reading, FAILURE_COLOR, FAILURE_FLASHES},
};

mod hardware;
mod monitor;
