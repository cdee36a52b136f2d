//! BMP280 temperature and pressure sampling for small AVR-class boards.
//!
//! The sensor and a 7-segment readout share one USI-style shift register. A timer drives the
//! [`Sampler`], which reads the sensor, compensates the raw codes with the chip's trimming
//! parameters and publishes the decimal digits; the [`SegmentDisplay`] shows the latest digits
//! from the main loop.
//!
//! ```rust,no_run
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use bmp280_segment::*;
//! #[derive(Debug)]
//! enum AppError<PinError> {
//!     Sensor(Bmp280Error<TransferError>),
//!     Display(DisplayError<TransferError, PinError>),
//! }
//!
//! # async fn demo<R, P, L, D>(register: R, cs: P, latch: L, mut delay: D) -> Result<(), AppError<L::Error>>
//! # where R: ShiftRegister, P: OutputPin, L: OutputPin, D: DelayNs + embedded_hal_async::delay::DelayNs {
//! let port = UsiPort::new(register, UsiConfig::default());
//! let mut cell = DigitCell::new();
//! let (writer, reader) = cell.split();
//!
//! let device = Bmp280::new_spi(&port, cs, &mut delay).map_err(AppError::Sensor)?;
//! let mut sampler = Sampler::new(device, writer, SamplerConfig::default());
//! let mut display = SegmentDisplay::new(&port, latch, DisplayConfig::default());
//!
//! sampler.tick().map_err(AppError::Sensor)?;
//! display.refresh(&reader, &mut delay).await.map_err(AppError::Display)?;
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

mod bmp280;
pub mod bus;
mod calibration;
pub mod config;
pub mod digits;
pub mod display;
pub mod error;
pub mod register;
mod sample;
mod sampler;
pub mod shared;
mod usi;

#[cfg(test)]
mod testing;

pub use bmp280::{Bmp280, Bmp280Result, Bmp280Spi};
pub use calibration::{CalibrationData, FineTemperature, Temperature};
pub use config::{DisplayConfig, SamplerConfig, UsiConfig};
pub use digits::DisplayDigits;
pub use display::{SegmentDisplay, SEGMENTS};
pub use error::{Bmp280Error, CompensationError, DisplayError, TransferError};
pub use sample::{Measurement, PeriodId, RawSample};
pub use sampler::Sampler;
pub use shared::{DigitCell, DigitReader, DigitWriter};
pub use usi::{ShiftRegister, UsiPort};
