use core::fmt::{Debug, Formatter};

/// Largest code the 20-bit ADC can produce.
pub const RAW_MAX: u32 = 0xF_FFFF;

/// Code the sensor reports for a channel whose oversampling is set to skipped.
pub const RAW_SKIPPED: u32 = 0x8_0000;

/// A 20-bit uncompensated ADC code for one channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample(i32);

impl RawSample {
    /// Accepts `code` if the sensor could have produced it during a real measurement.
    ///
    /// Rejected: anything wider than 20 bits, the skipped-measurement code `0x80000` and the
    /// all-ones code `0xFFFFF`.
    pub fn new(code: u32) -> Option<Self> {
        match code {
            RAW_SKIPPED | RAW_MAX => None,
            c if c > RAW_MAX => None,
            c => Some(Self(c as i32)),
        }
    }

    pub fn code(&self) -> i32 {
        self.0
    }
}

/// Identifies one sampling period of the [`Sampler`](crate::Sampler).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeriodId(u32);

impl PeriodId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The period after this one. Wraps after `u32::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Holds one compensated temperature and pressure pair.
#[derive(Copy, Clone, PartialEq)]
pub struct Measurement {
    temperature_c: f64,
    pressure_pa: f64,
}

impl Measurement {
    pub fn new(temperature_c: f64, pressure_pa: f64) -> Self {
        Self { temperature_c, pressure_pa }
    }

    pub fn temperature_celsius(&self) -> f64 {
        self.temperature_c
    }

    pub fn pressure_pascal(&self) -> f64 {
        self.pressure_pa
    }
}

impl Debug for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Measurement")
            .field("pressure_pa", &self.pressure_pa)
            .field("temperature_c", &self.temperature_c)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Measurement {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Measurement(pressure_pa: {}, temperature_c: {})", self.pressure_pa, self.temperature_c)
    }
}

#[cfg(feature = "uom")]
impl Measurement {
    pub fn pressure_uom(&self) -> uom::si::f64::Pressure {
        uom::si::pressure::Pressure::new::<uom::si::pressure::pascal>(self.pressure_pa)
    }

    pub fn temperature_uom(&self) -> uom::si::f64::ThermodynamicTemperature {
        uom::si::thermodynamic_temperature::ThermodynamicTemperature::new::<uom::si::thermodynamic_temperature::degree_celsius>(self.temperature_c)
    }
}
