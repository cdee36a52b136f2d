use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::error::Bmp280Error;
use crate::register::{Readable, Writable};

/// Largest register block read in one go (the calibration block).
pub const MAX_REG_BYTES: usize = 24;

/// In SPI mode bit 7 of the address byte selects read (1) or write (0).
const SPI_READ: u8 = 0x80;
const SPI_WRITE_MASK: u8 = 0x7F;

/// Typed register access to the sensor.
pub trait Bus {
    type Error;

    fn read<R: Readable>(&mut self) -> Result<R::Out, Bmp280Error<Self::Error>>;

    fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Bmp280Error<Self::Error>>;
}

/// Sensor on a shared SPI bus with its own chip-select line.
///
/// Every access is bracketed by chip select: asserted (low) before the address byte, released
/// after the last payload byte, and released even when the payload transfer fails. The whole
/// access runs in one critical section.
pub struct Spi<SpiType, Cs> {
    spi: SpiType,
    cs: Cs,
}

impl<SpiType, Cs> Spi<SpiType, Cs>
where
    SpiType: SpiBus<u8>,
    Cs: OutputPin,
{
    pub(crate) fn new(spi: SpiType, cs: Cs) -> Self {
        Self { spi, cs }
    }

    pub(crate) fn release(self) -> (SpiType, Cs) {
        (self.spi, self.cs)
    }

    // The sensor listens to every byte clocked while CS is low, so no other user of a shared bus
    // may get a byte in between.
    fn transaction<F>(&mut self, f: F) -> Result<(), Bmp280Error<SpiType::Error>>
    where
        F: FnOnce(&mut SpiType) -> Result<(), SpiType::Error>,
    {
        critical_section::with(|_| {
            self.cs.set_low().map_err(|_| Bmp280Error::ChipSelect)?;
            let result = f(&mut self.spi);
            self.cs.set_high().map_err(|_| Bmp280Error::ChipSelect)?;

            result.map_err(Bmp280Error::Bus)
        })
    }
}

impl<SpiType, Cs> Bus for Spi<SpiType, Cs>
where
    SpiType: SpiBus<u8>,
    Cs: OutputPin,
{
    type Error = SpiType::Error;

    fn read<R: Readable>(&mut self) -> Result<R::Out, Bmp280Error<Self::Error>> {
        let mut buffer = [0u8; MAX_REG_BYTES];

        self.transaction(|spi| {
            spi.write(&[R::ADDR | SPI_READ])?;
            spi.read(&mut buffer[..R::N])
        })?;

        R::decode(&buffer[..R::N]).map_err(Bmp280Error::UnexpectedRegisterData)
    }

    fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Bmp280Error<Self::Error>> {
        let mut buffer = [0u8; MAX_REG_BYTES + 1];
        buffer[0] = W::ADDR & SPI_WRITE_MASK;
        W::encode(v, &mut buffer[1..=W::N]);

        self.transaction(|spi| spi.write(&buffer[..=W::N]))
    }
}
