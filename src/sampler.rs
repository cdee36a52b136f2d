use core::fmt::Debug;

use embassy_time::Ticker;

use crate::bmp280::{Bmp280, Bmp280Result};
use crate::bus::Bus;
use crate::config::SamplerConfig;
use crate::digits::{to_fahrenheit, DisplayDigits};
use crate::fmt::Debug2Format;
use crate::sample::{Measurement, PeriodId};
use crate::shared::DigitWriter;

/// Turns one pair of raw readings per timer period into display digits.
///
/// The sampler is the only writer of the shared digit snapshot. Temperature is always read and
/// compensated before pressure, because pressure compensation needs the fine temperature of the
/// same period.
pub struct Sampler<'a, B> {
    device: Bmp280<B>,
    writer: DigitWriter<'a>,
    period: PeriodId,
    config: SamplerConfig,
}

impl<'a, B> Sampler<'a, B>
where
    B: Bus,
{
    pub fn new(device: Bmp280<B>, writer: DigitWriter<'a>, config: SamplerConfig) -> Self {
        Self {
            device,
            writer,
            period: PeriodId::default(),
            config,
        }
    }

    /// The period most recently started by [`tick`](Self::tick).
    pub fn period(&self) -> PeriodId {
        self.period
    }

    /// Runs one sampling period and publishes its digits.
    ///
    /// On error the previously published digits stay in place.
    pub fn tick(&mut self) -> Bmp280Result<Measurement, B::Error> {
        self.period = self.period.next();
        let period = self.period;

        let raw_t = self.device.read_raw_temperature()?;
        let temperature = self.device.calibration().compensate_temperature(raw_t, period);

        let raw_p = self.device.read_raw_pressure()?;
        let pressure = self
            .device
            .calibration()
            .compensate_pressure(raw_p, &temperature.fine, period)?;

        let fahrenheit = to_fahrenheit(temperature.celsius);
        self.writer.publish(DisplayDigits::new(temperature.celsius, fahrenheit, pressure));

        let measurement = Measurement::new(temperature.celsius, pressure);
        trace!("sampler: period {} {}", period.value(), measurement);

        Ok(measurement)
    }

    /// Calls [`tick`](Self::tick) once per [`SamplerConfig::period`], forever.
    ///
    /// A failed period is logged and skipped. If a period overruns, the ticker fires the next
    /// one immediately instead of queueing more.
    pub async fn run(&mut self) -> !
    where
        B::Error: Debug,
    {
        let mut ticker = Ticker::every(self.config.period());
        info!("sampler: running every {} us", self.config.period().as_micros());

        loop {
            ticker.next().await;

            if let Err(e) = self.tick() {
                warn!(
                    "sampler: period {} failed, keeping previous digits: {}",
                    self.period.value(),
                    Debug2Format(&e)
                );
            }
        }
    }

    /// Stops sampling and gives the driver back.
    pub fn release(self) -> Bmp280<B> {
        self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digits::{CelsiusDigits, FahrenheitDigits, PressureDigits};
    use crate::error::Bmp280Error;
    use crate::register::calibration::Calibration;
    use crate::register::chip_id::ChipId;
    use crate::register::data::{PressureData, TemperatureData};
    use crate::shared::DigitCell;
    use crate::testing::{FakeBus, FakeDelay, DATASHEET_CALIBRATION};
    use embassy_time::MockDriver;

    fn datasheet_device(pressure: Option<&[u8]>) -> Bmp280<FakeBus<8>> {
        let mut bus: FakeBus<8> = FakeBus::new();
        bus.with_response::<ChipId>(&[0x58]);
        bus.with_response::<Calibration>(&DATASHEET_CALIBRATION);
        bus.with_response::<TemperatureData>(&[0x7E, 0xED, 0x00]);
        match pressure {
            Some(bytes) => bus.with_response::<PressureData>(bytes),
            None => bus.with_failure::<PressureData>(),
        }

        Bmp280::new(bus, &mut FakeDelay::default()).unwrap()
    }

    #[test]
    fn tick_publishes_datasheet_digits() {
        let mut cell = DigitCell::new();
        let (writer, reader) = cell.split();
        let mut sampler = Sampler::new(datasheet_device(Some(&[0x65, 0x5A, 0xC0])), writer, SamplerConfig::default());

        let measurement = sampler.tick().unwrap();

        assert!((measurement.temperature_celsius() - 25.08247793081682).abs() < 1e-9);
        assert!((measurement.pressure_pascal() - 100653.26677582515).abs() < 1e-6);
        assert_eq!(PeriodId::new(1), sampler.period());

        let digits = reader.latest();
        assert_eq!(CelsiusDigits { negative: false, tens: 2, ones: 5, tenths: 0, hundredths: 8 }, digits.celsius);
        assert_eq!(
            FahrenheitDigits { negative: false, hundreds: 0, tens: 7, ones: 7, tenths: 1, hundredths: 4 },
            digits.fahrenheit
        );
        assert_eq!(PressureDigits { hundred_thousands: 1, ten_thousands: 0, thousands: 0 }, digits.pressure);
    }

    #[test]
    fn repeated_ticks_are_deterministic() {
        let mut cell = DigitCell::new();
        let (writer, reader) = cell.split();
        let mut sampler = Sampler::new(datasheet_device(Some(&[0x65, 0x5A, 0xC0])), writer, SamplerConfig::default());

        let first = sampler.tick().unwrap();
        let first_digits = reader.latest();
        let second = sampler.tick().unwrap();

        assert_eq!(first, second);
        assert_eq!(first_digits, reader.latest());
        assert_eq!(PeriodId::new(2), sampler.period());
    }

    #[test]
    fn failed_read_publishes_nothing() {
        let mut cell = DigitCell::new();
        let (writer, reader) = cell.split();
        let mut sampler = Sampler::new(datasheet_device(None), writer, SamplerConfig::default());

        assert!(matches!(sampler.tick(), Err(Bmp280Error::Bus(()))));
        assert_eq!(DisplayDigits::ZERO, reader.latest());
    }

    #[test]
    fn skipped_pressure_keeps_previous_digits() {
        let mut cell = DigitCell::new();

        let (writer, reader) = cell.split();
        let mut sampler = Sampler::new(datasheet_device(Some(&[0x65, 0x5A, 0xC0])), writer, SamplerConfig::default());
        sampler.tick().unwrap();
        let published = reader.latest();
        drop(sampler);

        let (writer, reader) = cell.split();
        let mut sampler = Sampler::new(datasheet_device(Some(&[0x80, 0x00, 0x00])), writer, SamplerConfig::default());

        assert!(matches!(sampler.tick(), Err(Bmp280Error::RawOutOfRange(0x80000))));
        assert_eq!(published, reader.latest());
        assert_eq!(1, reader.latest().pressure.hundred_thousands);
    }

    // Steps the mock clock one period at a time while `run` is polled first on every wakeup.
    async fn run_for_periods(sampler: &mut Sampler<'_, FakeBus<8>>, periods: u32) {
        let period = sampler.config.period();

        tokio::select! {
            biased;
            _ = sampler.run() => {}
            _ = async {
                for _ in 0..periods {
                    MockDriver::get().advance(period);
                    tokio::task::yield_now().await;
                }
                tokio::task::yield_now().await;
            } => {}
        }
    }

    #[tokio::test]
    async fn run_publishes_on_every_period_and_survives_failures() {
        let config = SamplerConfig::default().divider(250);
        let mut cell = DigitCell::new();

        let (writer, reader) = cell.split();
        let mut sampler = Sampler::new(datasheet_device(None), writer, config);
        run_for_periods(&mut sampler, 4).await;

        // Every period failed on the pressure read, yet the loop kept going.
        assert!(sampler.period().value() >= 3);
        assert_eq!(DisplayDigits::ZERO, reader.latest());
        drop(sampler);

        let (writer, reader) = cell.split();
        let mut sampler = Sampler::new(datasheet_device(Some(&[0x65, 0x5A, 0xC0])), writer, config);
        run_for_periods(&mut sampler, 4).await;

        assert!(sampler.period().value() >= 3);
        let digits = reader.latest();
        assert_eq!(
            FahrenheitDigits { negative: false, hundreds: 0, tens: 7, ones: 7, tenths: 1, hundredths: 4 },
            digits.fahrenheit
        );
        assert_eq!(PressureDigits { hundred_thousands: 1, ten_thousands: 0, thousands: 0 }, digits.pressure);
    }
}
