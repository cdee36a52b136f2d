//! Single-digit 7-segment readout behind a shift register with a storage latch.
//!
//! A pattern is clocked into the shift register with the latch low; raising the latch copies it
//! to the outputs, so the display never shows a half-shifted pattern.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use embedded_hal_async::delay::DelayNs;

use crate::config::DisplayConfig;
use crate::error::DisplayError;
use crate::shared::DigitReader;

/// Segment patterns for 0-9, bit 0 = segment a through bit 6 = segment g. The decimal point
/// (bit 7) is never lit.
pub const SEGMENTS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x67];

pub type DisplayResult<SPI, LATCH> =
    Result<(), DisplayError<<SPI as embedded_hal::spi::ErrorType>::Error, <LATCH as embedded_hal::digital::ErrorType>::Error>>;

pub struct SegmentDisplay<SPI, LATCH> {
    spi: SPI,
    latch: LATCH,
    config: DisplayConfig,
}

impl<SPI, LATCH> SegmentDisplay<SPI, LATCH>
where
    SPI: SpiBus<u8>,
    LATCH: OutputPin,
{
    pub fn new(spi: SPI, latch: LATCH, config: DisplayConfig) -> Self {
        Self { spi, latch, config }
    }

    /// Shows decimal digit `digit`.
    pub fn write_digit(&mut self, digit: u8) -> DisplayResult<SPI, LATCH> {
        let pattern = *SEGMENTS.get(digit as usize).ok_or(DisplayError::InvalidDigit(digit))?;

        critical_section::with(|_| {
            self.latch.set_low().map_err(DisplayError::Latch)?;
            let result = self.spi.write(&[pattern]);
            self.latch.set_high().map_err(DisplayError::Latch)?;

            result.map_err(DisplayError::Bus)
        })
    }

    /// Cycles through the Fahrenheit tens, ones and tenths digits of the latest snapshot.
    ///
    /// The snapshot is taken once, so all three digits belong to the same sampling period even
    /// if the sampler publishes while the cycle is running.
    pub async fn refresh<D: DelayNs>(&mut self, reader: &DigitReader<'_>, delay: &mut D) -> DisplayResult<SPI, LATCH> {
        let fahrenheit = reader.latest().fahrenheit;

        for digit in [fahrenheit.tens, fahrenheit.ones, fahrenheit.tenths] {
            self.write_digit(digit)?;
            delay.delay_ms(self.config.dwell_ms).await;
        }

        Ok(())
    }

    pub fn release(self) -> (SPI, LATCH) {
        (self.spi, self.latch)
    }
}
