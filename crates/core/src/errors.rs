use core::fmt::{self, Debug, Display};

use displaydoc::Display;

/// A specialized result type for the pixel buffer operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Recoverable errors of the pixel buffer operations.
///
/// Invalid brightness values are not represented here, they are treated as a
/// programmer error and cause a panic.
#[derive(Clone, Copy, PartialEq, Eq, Display, Debug)]
pub enum Error {
    /// Pixel index {0} is out of range, the strip has only 8 pixels.
    PixelIndexOutOfRange(usize),
    /// Hex color should consist of exactly 6 hex digits, but it has {0} characters.
    InvalidHexLength(usize),
    /// Hex color has an invalid digit at position {0}.
    InvalidHexDigit(usize),
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Errors of the driver operations which both mutate the pixels and drive the port.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DriverError<E> {
    /// Pixel buffer operation failed.
    Pixels(Error),
    /// The underlying port reported an error.
    Port(E),
}

impl<E> From<Error> for DriverError<E> {
    fn from(err: Error) -> Self {
        Self::Pixels(err)
    }
}

impl<E: Display> Display for DriverError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(err) => write!(f, "{err}"),
            Self::Port(err) => write!(f, "Port error: {err}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: Debug + Display> std::error::Error for DriverError<E> {}
