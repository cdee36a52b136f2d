use embassy_time::Duration;

/// Settings for the shift-register port.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsiConfig {
    pub(crate) max_strobes: u32,
}

impl Default for UsiConfig {
    fn default() -> Self {
        Self {
            // 16 edges per byte, the rest is slack for a peripheral that starts late
            max_strobes: 64,
        }
    }
}

impl UsiConfig {
    /// Number of clock edges to try before a transfer is abandoned with a timeout.
    pub fn max_strobes(mut self, max_strobes: u32) -> Self {
        self.max_strobes = max_strobes;

        self
    }
}

/// Timing of the sampling timer.
///
/// The timer counts the core clock through a prescaler and fires on compare match (CTC mode).
/// The compare value is `clock_hz / prescaler / divider - 1`, so the period comes out close to
/// `1 / divider` seconds whatever the clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerConfig {
    pub(crate) clock_hz: u32,
    pub(crate) prescaler: u32,
    pub(crate) divider: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            clock_hz: 8_000_000,
            prescaler: 16384,
            divider: 2,
        }
    }
}

impl SamplerConfig {
    pub fn clock_hz(mut self, clock_hz: u32) -> Self {
        self.clock_hz = clock_hz;

        self
    }

    pub fn prescaler(mut self, prescaler: u32) -> Self {
        self.prescaler = prescaler;

        self
    }

    pub fn divider(mut self, divider: u32) -> Self {
        self.divider = divider;

        self
    }

    /// Timer ticks per sampling period. Never less than one.
    fn ticks(&self) -> u32 {
        (self.clock_hz / self.prescaler.max(1) / self.divider.max(1)).max(1)
    }

    /// Value for the timer's compare register.
    pub fn compare_value(&self) -> u32 {
        self.ticks() - 1
    }

    /// Length of one sampling period, including the rounding the integer compare value causes.
    pub fn period(&self) -> Duration {
        let us = self.ticks() as u64 * self.prescaler.max(1) as u64 * 1_000_000 / self.clock_hz.max(1) as u64;

        Duration::from_micros(us)
    }
}

/// Settings for the 7-segment readout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    pub(crate) dwell_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { dwell_ms: 500 }
    }
}

impl DisplayConfig {
    /// How long each digit stays on the display before the next one is shown.
    pub fn dwell_ms(mut self, dwell_ms: u32) -> Self {
        self.dwell_ms = dwell_ms;

        self
    }
}
