//! Two wire output used to clock the frames out.

use embedded_hal::digital::v2::OutputPin;

/// BCM number of the data line on the Blinkt! header.
pub const DATA_PIN: u8 = 23;
/// BCM number of the clock line on the Blinkt! header.
pub const CLOCK_PIN: u8 = 24;

/// Output line of the port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Line {
    Data,
    Clock,
}

/// Two independently settable digital outputs: data and clock.
///
/// Writes must take effect before the call returns, the protocol has no other
/// timing requirements.
pub trait BitPort {
    /// Error reported by the physical layer.
    type Error;
    /// Configures both lines as outputs.
    fn open(&mut self) -> Result<(), Self::Error>;
    /// Drives the given line high.
    fn set_high(&mut self, line: Line) -> Result<(), Self::Error>;
    /// Drives the given line low.
    fn set_low(&mut self, line: Line) -> Result<(), Self::Error>;
    /// Releases both lines.
    fn close(&mut self) -> Result<(), Self::Error>;

    /// Drives the given line to the given level.
    fn set_level(&mut self, line: Line, high: bool) -> Result<(), Self::Error> {
        if high {
            self.set_high(line)
        } else {
            self.set_low(line)
        }
    }
}

impl<T: ?Sized + BitPort> BitPort for &mut T {
    type Error = T::Error;

    fn open(&mut self) -> Result<(), Self::Error> {
        T::open(self)
    }

    fn set_high(&mut self, line: Line) -> Result<(), Self::Error> {
        T::set_high(self, line)
    }

    fn set_low(&mut self, line: Line) -> Result<(), Self::Error> {
        T::set_low(self, line)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        T::close(self)
    }
}

/// [`BitPort`] on top of two [`embedded-hal`](embedded_hal) output pins.
///
/// The pins are expected to be configured as outputs already, so opening and closing
/// only park both lines low.
pub struct PinPort<D, C> {
    data: D,
    clock: C,
}

impl<D, C> PinPort<D, C> {
    /// Creates a new port from the data and clock pins.
    pub fn new(data: D, clock: C) -> Self {
        Self { data, clock }
    }

    /// Returns the underlying pins.
    pub fn into_inner(self) -> (D, C) {
        (self.data, self.clock)
    }
}

impl<D, C, E> BitPort for PinPort<D, C>
where
    D: OutputPin<Error = E>,
    C: OutputPin<Error = E>,
{
    type Error = E;

    fn open(&mut self) -> Result<(), Self::Error> {
        self.data.set_low()?;
        self.clock.set_low()
    }

    fn set_high(&mut self, line: Line) -> Result<(), Self::Error> {
        match line {
            Line::Data => self.data.set_high(),
            Line::Clock => self.clock.set_high(),
        }
    }

    fn set_low(&mut self, line: Line) -> Result<(), Self::Error> {
        match line {
            Line::Data => self.data.set_low(),
            Line::Clock => self.clock.set_low(),
        }
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.open()
    }
}
