//! Errors that can occur when sampling the BMP280 or driving the display.
//!
//! [`Bmp280Error`] is generic over the error type of the bus underneath it, so a driver running
//! on the shift-register port reports [`TransferError`] while one running on a HAL SPI peripheral
//! reports that HAL's error.

use crate::register::InvalidRegisterField;
use crate::sample::PeriodId;

/// Failure of a single byte exchange on the shift-register port.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferError {
    /// The counter-overflow flag never rose within the configured number of clock strobes.
    ///
    /// Usually means the port's clock source is misconfigured or the peripheral is unpowered.
    Timeout,
}

impl embedded_hal::spi::Error for TransferError {
    fn kind(&self) -> embedded_hal::spi::ErrorKind {
        embedded_hal::spi::ErrorKind::Other
    }
}

/// Misuse of the compensation pipeline.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompensationError {
    /// Pressure compensation was handed a fine temperature produced in another sampling period.
    StaleFineTemperature {
        expected: PeriodId,
        found: PeriodId,
    },
}

/// This represents all possible errors that can occur when using the BMP280 device.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bmp280Error<BusError> {
    /// An error has occurred in the SPI driver
    Bus(BusError),

    /// The chip-select line could not be driven
    ChipSelect,

    /// Unable to communicate with BMP280
    ///
    /// Could possibly indicate an error with pin configuration and/or wiring.
    NotConnected,

    /// A raw ADC code outside the range the sensor can legitimately report.
    ///
    /// `0x80000` is reported by the sensor for a skipped measurement, `0xFFFFF` is what a
    /// floating MISO line reads back.
    RawOutOfRange(u32),

    /// Reading from a register returned unexpected data.
    ///
    /// Could possibly indicate a faulty chip, interference or a disconnected data line.
    UnexpectedRegisterData(InvalidRegisterField),

    /// The compensation pipeline was used out of order.
    Compensation(CompensationError),
}

impl<BusError> From<CompensationError> for Bmp280Error<BusError> {
    fn from(e: CompensationError) -> Self {
        Bmp280Error::Compensation(e)
    }
}

/// Errors raised while pushing a digit to the 7-segment display.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<BusError, PinError> {
    /// The serial write of the segment pattern failed
    Bus(BusError),
    /// The latch line could not be driven
    Latch(PinError),
    /// Only decimal digits 0-9 have a segment pattern
    InvalidDigit(u8),
}
