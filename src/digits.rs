//! Decimal digits of the compensated values, as shown on the 7-segment display.
//!
//! Digits are taken by truncation toward zero, never by rounding: 9.999 shows as `09.99`, not
//! `10.00`. Negative temperatures are decomposed from their magnitude and flagged.

/// Converts Celsius to Fahrenheit.
pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

fn magnitude(value: f64) -> (bool, f64) {
    if value < 0.0 { (true, -value) } else { (false, value) }
}

// All of these expect a non-negative value; `as` truncates toward zero.

fn hundreds(value: f64) -> u8 {
    (value as u64 / 100 % 10) as u8
}

fn tens(value: f64) -> u8 {
    ((value / 10.0) as u64 % 10) as u8
}

fn ones(value: f64) -> u8 {
    (value as u64 % 10) as u8
}

fn tenths(value: f64) -> u8 {
    ((value * 10.0) as u64 % 10) as u8
}

fn hundredths(value: f64) -> u8 {
    ((value * 100.0) as u64 % 10) as u8
}

/// Celsius reading split into `tens ones . tenths hundredths`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CelsiusDigits {
    pub negative: bool,
    pub tens: u8,
    pub ones: u8,
    pub tenths: u8,
    pub hundredths: u8,
}

impl CelsiusDigits {
    pub fn from_celsius(celsius: f64) -> Self {
        let (negative, value) = magnitude(celsius);

        Self {
            negative,
            tens: tens(value),
            ones: ones(value),
            tenths: tenths(value),
            hundredths: hundredths(value),
        }
    }
}

/// Fahrenheit reading split into `hundreds tens ones . tenths hundredths`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FahrenheitDigits {
    pub negative: bool,
    pub hundreds: u8,
    pub tens: u8,
    pub ones: u8,
    pub tenths: u8,
    pub hundredths: u8,
}

impl FahrenheitDigits {
    pub fn from_fahrenheit(fahrenheit: f64) -> Self {
        let (negative, value) = magnitude(fahrenheit);

        Self {
            negative,
            hundreds: hundreds(value),
            tens: tens(value),
            ones: ones(value),
            tenths: tenths(value),
            hundredths: hundredths(value),
        }
    }
}

/// The three leading digits of a pressure in Pascal (roughly hundreds of hPa down to hPa x10).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressureDigits {
    pub hundred_thousands: u8,
    pub ten_thousands: u8,
    pub thousands: u8,
}

impl PressureDigits {
    /// Negative pressures (only possible from garbage input) clamp to zero.
    pub fn from_pascal(pascal: f64) -> Self {
        let p = if pascal > 0.0 { pascal as u32 } else { 0 };

        Self {
            hundred_thousands: ((p / 100_000) % 10) as u8,
            ten_thousands: ((p / 10_000) % 10) as u8,
            thousands: ((p / 1_000) % 10) as u8,
        }
    }
}

/// Everything the display can show, computed once per sampling period.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayDigits {
    pub celsius: CelsiusDigits,
    pub fahrenheit: FahrenheitDigits,
    pub pressure: PressureDigits,
}

impl DisplayDigits {
    /// All digits zero, the state before the first period completes.
    pub const ZERO: DisplayDigits = DisplayDigits {
        celsius: CelsiusDigits { negative: false, tens: 0, ones: 0, tenths: 0, hundredths: 0 },
        fahrenheit: FahrenheitDigits { negative: false, hundreds: 0, tens: 0, ones: 0, tenths: 0, hundredths: 0 },
        pressure: PressureDigits { hundred_thousands: 0, ten_thousands: 0, thousands: 0 },
    };

    pub fn new(celsius: f64, fahrenheit: f64, pascal: f64) -> Self {
        Self {
            celsius: CelsiusDigits::from_celsius(celsius),
            fahrenheit: FahrenheitDigits::from_fahrenheit(fahrenheit),
            pressure: PressureDigits::from_pascal(pascal),
        }
    }
}
