use crate::error::CompensationError;
use crate::register::calibration::CalibrationNvm;
use crate::sample::{PeriodId, RawSample};

/// Trimming parameters converted once to the floating point form the compensation formulas use.
///
/// The arithmetic follows the double precision reference code from the BMP280 datasheet,
/// section 8.1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CalibrationData {
    nvm: CalibrationNvm,
    dig_t1: f64,
    dig_t2: f64,
    dig_t3: f64,
    dig_p1: f64,
    dig_p2: f64,
    dig_p3: f64,
    dig_p4: f64,
    dig_p5: f64,
    dig_p6: f64,
    dig_p7: f64,
    dig_p8: f64,
    dig_p9: f64,
}

/// Intermediate temperature value the pressure formula depends on.
///
/// Only valid within the sampling period that produced it.
#[derive(Debug, PartialEq)]
pub struct FineTemperature {
    value: f64,
    period: PeriodId,
}

impl FineTemperature {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn period(&self) -> PeriodId {
        self.period
    }
}

/// Result of temperature compensation.
#[derive(Debug, PartialEq)]
pub struct Temperature {
    pub celsius: f64,
    pub fine: FineTemperature,
}

impl CalibrationData {
    pub fn new(nvm: CalibrationNvm) -> Self {
        Self {
            nvm,
            dig_t1: nvm.dig_t1 as f64,
            dig_t2: nvm.dig_t2 as f64,
            dig_t3: nvm.dig_t3 as f64,
            dig_p1: nvm.dig_p1 as f64,
            dig_p2: nvm.dig_p2 as f64,
            dig_p3: nvm.dig_p3 as f64,
            dig_p4: nvm.dig_p4 as f64,
            dig_p5: nvm.dig_p5 as f64,
            dig_p6: nvm.dig_p6 as f64,
            dig_p7: nvm.dig_p7 as f64,
            dig_p8: nvm.dig_p8 as f64,
            dig_p9: nvm.dig_p9 as f64,
        }
    }

    /// The trimming words as read from the sensor.
    pub fn nvm(&self) -> &CalibrationNvm {
        &self.nvm
    }

    /// Compensates a raw temperature code taken during `period`.
    pub fn compensate_temperature(&self, raw: RawSample, period: PeriodId) -> Temperature {
        let fine = self.fine_temperature(raw.code());

        Temperature {
            celsius: fine / 5120.0,
            fine: FineTemperature { value: fine, period },
        }
    }

    /// Compensates a raw pressure code taken during `period`, returning Pascal.
    ///
    /// `fine` must come from [`compensate_temperature`](Self::compensate_temperature) in the same
    /// period, otherwise [`CompensationError::StaleFineTemperature`] is returned.
    pub fn compensate_pressure(
        &self,
        raw: RawSample,
        fine: &FineTemperature,
        period: PeriodId,
    ) -> Result<f64, CompensationError> {
        if fine.period != period {
            return Err(CompensationError::StaleFineTemperature {
                expected: period,
                found: fine.period,
            });
        }

        Ok(self.pressure(raw.code(), fine.value))
    }

    fn fine_temperature(&self, adc_t: i32) -> f64 {
        let adc_t = adc_t as f64;
        let var1 = (adc_t / 16384.0 - self.dig_t1 / 1024.0) * self.dig_t2;
        let offset = adc_t / 131072.0 - self.dig_t1 / 8192.0;
        let var2 = (offset * offset) * self.dig_t3;

        var1 + var2
    }

    fn pressure(&self, adc_p: i32, t_fine: f64) -> f64 {
        let t_offset = t_fine / 2.0 - 64000.0;

        let mut offset = t_offset * t_offset * self.dig_p6 / 32768.0;
        offset += t_offset * self.dig_p5 * 2.0;
        offset = offset / 4.0 + self.dig_p4 * 65536.0;

        let sensitivity = (self.dig_p3 * t_offset * t_offset / 524288.0 + self.dig_p2 * t_offset) / 524288.0;
        let sensitivity = (1.0 + sensitivity / 32768.0) * self.dig_p1;
        if sensitivity == 0.0 {
            // dig_P1 == 0 would divide by zero
            return 0.0;
        }

        let p = 1048576.0 - adc_p as f64;
        let p = (p - offset / 4096.0) * 6250.0 / sensitivity;
        let square_term = self.dig_p9 * p * p / 2147483648.0;
        let linear_term = p * self.dig_p8 / 32768.0;

        p + (square_term + linear_term + self.dig_p7) / 16.0
    }
}
