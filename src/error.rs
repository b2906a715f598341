use core::fmt;

use embedded_hal::i2c::{Error, ErrorKind};

/// Errors returned by the IS31FL3741 driver.
///
/// `E` is the error type of the underlying I2C bus; bus failures are passed
/// through untouched in [`IS31FL3741Error::I2c`].
#[derive(Debug, PartialEq, Eq)]
pub enum IS31FL3741Error<E> {
    /// Underlying I2C bus error.
    I2c(E),
    /// The ID register did not read back as twice the I2C address.
    DeviceNotFound,
    /// Page index above 4.
    InvalidPage,
    /// LED index, coordinate or buffer length outside the valid domain.
    OutOfRange,
}

impl<E: fmt::Debug> fmt::Display for IS31FL3741Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IS31FL3741Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            IS31FL3741Error::DeviceNotFound => write!(f, "IS31FL3741 not found at address"),
            IS31FL3741Error::InvalidPage => write!(f, "Page must be 0-4"),
            IS31FL3741Error::OutOfRange => write!(f, "Value out of range"),
        }
    }
}

impl<E: Error> Error for IS31FL3741Error<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            IS31FL3741Error::I2c(e) => e.kind(),
            _ => ErrorKind::Other,
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for IS31FL3741Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            IS31FL3741Error::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            IS31FL3741Error::DeviceNotFound => defmt::write!(f, "Device not found"),
            IS31FL3741Error::InvalidPage => defmt::write!(f, "Invalid page"),
            IS31FL3741Error::OutOfRange => defmt::write!(f, "Out of range"),
        }
    }
}
