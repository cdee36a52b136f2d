use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::bus::{Bus, Spi};
use crate::calibration::CalibrationData;
use crate::error::Bmp280Error;
use crate::register::calibration::Calibration;
use crate::register::chip_id::{ChipId, BMP280_CHIP_ID};
use crate::register::ctrl_meas::{CtrlMeas, CtrlMeasFields};
use crate::register::data::{PressureData, TemperatureData};
use crate::sample::RawSample;

/// Type alias for a Bmp280 chip communicating over SPI
pub type Bmp280Spi<SpiType, Cs> = Bmp280<Spi<SpiType, Cs>>;

/// Type alias used to simplify return types throughout the driver
pub type Bmp280Result<T, BusError> = Result<T, Bmp280Error<BusError>>;

/// Main Bmp280 driver struct
pub struct Bmp280<B> {
    bus: B,
    calibration_data: CalibrationData,
}

impl<SpiType, Cs> Bmp280Spi<SpiType, Cs>
where
    SpiType: SpiBus<u8>,
    Cs: OutputPin,
{
    /// Constructs a new Bmp280 driver instance on an SPI bus with a dedicated chip-select pin.
    ///
    /// The bus is typically a `&UsiPort`, which lets the display keep using the same port.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal::delay::DelayNs;
    /// # use embedded_hal::digital::OutputPin;
    /// # use bmp280_segment::{Bmp280, Bmp280Result, ShiftRegister, UsiConfig, UsiPort, TransferError};
    /// # fn demo<R: ShiftRegister, P: OutputPin, D: DelayNs>(register: R, cs: P, mut delay: D) -> Bmp280Result<(), TransferError> {
    /// let port = UsiPort::new(register, UsiConfig::default());
    /// let device = Bmp280::new_spi(&port, cs, &mut delay)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_spi<D: DelayNs>(
        spi: SpiType,
        cs: Cs,
        delay: &mut D,
    ) -> Bmp280Result<Self, SpiType::Error> {
        Self::new(Spi::new(spi, cs), delay)
    }

    /// Consumes the driver and returns the bus and chip-select pin.
    pub fn release(self) -> (SpiType, Cs) {
        self.bus.release()
    }
}

impl<B> Bmp280<B>
where
    B: Bus,
{
    /// Probes if the device is ready by attempting to read ChipId `attempts` times with a 1 ms delay.
    ///
    /// Returns [`Bmp280Error::NotConnected`] if no response is received.
    fn probe_ready<D: DelayNs>(bus: &mut B, delay: &mut D, attempts: u32) -> Bmp280Result<(), B::Error> {
        for _ in 0..attempts {
            if let Ok(id) = bus.read::<ChipId>() {
                if id == BMP280_CHIP_ID {
                    return Ok(());
                }
            }

            delay.delay_ms(1);
        }

        Err(Bmp280Error::NotConnected)
    }

    /// Probes the chip, writes the sampling configuration and loads the trimming parameters.
    pub(crate) fn new<D: DelayNs>(mut bus: B, delay: &mut D) -> Bmp280Result<Self, B::Error> {
        // The datasheet (table 2) specifies 2 ms start-up time after power-on
        Self::probe_ready(&mut bus, delay, 5)?;

        Self::write_configuration(&mut bus)?;
        let calibration_data = Self::load_calibration(&mut bus)?;

        Ok(Bmp280 { bus, calibration_data })
    }

    fn write_configuration(bus: &mut B) -> Bmp280Result<(), B::Error> {
        bus.write::<CtrlMeas>(&CtrlMeasFields::SAMPLING)?;
        debug!("bmp280: ctrl_meas written");

        Ok(())
    }

    fn load_calibration(bus: &mut B) -> Bmp280Result<CalibrationData, B::Error> {
        let nvm = bus.read::<Calibration>()?;
        debug!("bmp280: calibration loaded, dig_T1={} dig_P1={}", nvm.dig_t1, nvm.dig_p1);

        Ok(CalibrationData::new(nvm))
    }

    /// Writes the fixed oversampling and normal mode configuration to CTRL_MEAS (0xF4).
    pub fn configure(&mut self) -> Bmp280Result<(), B::Error> {
        Self::write_configuration(&mut self.bus)
    }

    /// Re-reads the trimming parameters from the calibration block (0x88..0x9F).
    pub fn read_calibration(&mut self) -> Bmp280Result<&CalibrationData, B::Error> {
        self.calibration_data = Self::load_calibration(&mut self.bus)?;

        Ok(&self.calibration_data)
    }

    /// The trimming parameters loaded when the driver was constructed.
    pub fn calibration(&self) -> &CalibrationData {
        &self.calibration_data
    }

    /// Determines if the BMP280 is connected by reading the ID (0xD0) register.
    pub fn is_connected(&mut self) -> Bmp280Result<bool, B::Error> {
        let id = self.bus.read::<ChipId>()?;

        Ok(id == BMP280_CHIP_ID)
    }

    /// Reads the raw temperature code from temp_msb..temp_xlsb (0xFA..0xFC).
    pub fn read_raw_temperature(&mut self) -> Bmp280Result<RawSample, B::Error> {
        let code = self.bus.read::<TemperatureData>()?;

        checked_sample(code)
    }

    /// Reads the raw pressure code from press_msb..press_xlsb (0xF7..0xF9).
    pub fn read_raw_pressure(&mut self) -> Bmp280Result<RawSample, B::Error> {
        let code = self.bus.read::<PressureData>()?;

        checked_sample(code)
    }
}

fn checked_sample<E>(code: u32) -> Bmp280Result<RawSample, E> {
    RawSample::new(code).ok_or_else(|| {
        warn!("bmp280: raw code {=u32:x} out of range", code);
        Bmp280Error::RawOutOfRange(code)
    })
}
