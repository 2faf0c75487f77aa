//! Raspberry Pi GPIO backend of the strip port.

use std::convert::Infallible;

use anyhow::Context;
use nomad_blinkt_core::{BitPort, Line, PinPort, CLOCK_PIN, DATA_PIN};
use rppal::gpio::{Gpio, OutputPin};

/// Two wire port on the Blinkt! header pins.
///
/// The pins are acquired on open and released on close, rppal resets them to
/// their previous mode when they are dropped.
pub struct GpioPort {
    gpio: Gpio,
    pins: Option<PinPort<OutputPin, OutputPin>>,
}

impl GpioPort {
    /// Connects to the GPIO peripheral.
    pub fn new() -> anyhow::Result<Self> {
        let gpio = Gpio::new().context("Unable to access the GPIO peripheral")?;
        Ok(Self { gpio, pins: None })
    }

    fn pins(&mut self) -> anyhow::Result<&mut PinPort<OutputPin, OutputPin>> {
        self.pins.as_mut().context("GPIO port is not opened")
    }

    fn output_pin(&self, pin: u8) -> anyhow::Result<OutputPin> {
        let pin = self
            .gpio
            .get(pin)
            .with_context(|| format!("Unable to acquire GPIO pin {pin}"))?;
        Ok(pin.into_output_low())
    }
}

fn infallible(err: Infallible) -> anyhow::Error {
    match err {}
}

impl BitPort for GpioPort {
    type Error = anyhow::Error;

    fn open(&mut self) -> Result<(), Self::Error> {
        anyhow::ensure!(self.pins.is_none(), "GPIO port is already opened");

        let mut pins = PinPort::new(self.output_pin(DATA_PIN)?, self.output_pin(CLOCK_PIN)?);
        pins.open().map_err(infallible)?;
        self.pins = Some(pins);

        log::debug!("Acquired GPIO pins {DATA_PIN} (data) and {CLOCK_PIN} (clock)");
        Ok(())
    }

    fn set_high(&mut self, line: Line) -> Result<(), Self::Error> {
        self.pins()?.set_high(line).map_err(infallible)
    }

    fn set_low(&mut self, line: Line) -> Result<(), Self::Error> {
        self.pins()?.set_low(line).map_err(infallible)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        let mut pins = self.pins.take().context("GPIO port is not opened")?;
        pins.close().map_err(infallible)?;
        drop(pins);

        log::debug!("Released GPIO pins");
        Ok(())
    }
}
