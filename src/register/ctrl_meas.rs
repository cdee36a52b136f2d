//! ### CTRL_MEAS - Measurement control (`0xF4`, 1 byte, R/W)
//!
//! Selects temperature and pressure oversampling and the power mode.
//!
//! | bits | field  |
//! |------|--------|
//! | 7:5  | osrs_t |
//! | 4:2  | osrs_p |
//! | 1:0  | mode   |
//!
//! ### Default values
//! 0x00 (both measurements skipped, sleep mode)
#![doc(alias = "CTRL_MEAS")]
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for CTRL_MEAS (0xF4) register
pub struct CtrlMeas;
impl Reg for CtrlMeas { const ADDR: u8 = 0xF4; }

/// The payload for the CTRL_MEAS (0xF4) register.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CtrlMeasFields {
    pub osrs_t: Oversampling,
    pub osrs_p: Oversampling,
    pub mode: PowerMode,
}

impl CtrlMeasFields {
    /// The one configuration the sampler runs with: x2 temperature, x2 pressure, normal mode.
    ///
    /// Encodes to `0b010_010_11`.
    pub const SAMPLING: CtrlMeasFields = CtrlMeasFields {
        osrs_t: Oversampling::X2,
        osrs_p: Oversampling::X2,
        mode: PowerMode::Normal,
    };
}

impl Readable for CtrlMeas {
    type Out = CtrlMeasFields;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(CtrlMeasFields {
            osrs_t: Oversampling::from((b[0] >> 5) & 0b111),
            osrs_p: Oversampling::from((b[0] >> 2) & 0b111),
            mode: PowerMode::from(b[0] & 0b11),
        })
    }
}

impl Writable for CtrlMeas {
    type In = CtrlMeasFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let osrs_t: u8 = v.osrs_t.into();
        let osrs_p: u8 = v.osrs_p.into();
        let mode: u8 = v.mode.into();
        out[0] = (osrs_t << 5) | (osrs_p << 2) | mode;
    }
}

/// Oversampling setting for one measurement channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// Measurement disabled; the data register then reads `0x80000`.
    Skipped,
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl From<u8> for Oversampling {
    fn from(field: u8) -> Self {
        match field {
            0b000 => Oversampling::Skipped,
            0b001 => Oversampling::X1,
            0b010 => Oversampling::X2,
            0b011 => Oversampling::X4,
            0b100 => Oversampling::X8,
            _ => Oversampling::X16,
        }
    }
}

impl From<Oversampling> for u8 {
    fn from(value: Oversampling) -> Self {
        match value {
            Oversampling::Skipped => 0b000,
            Oversampling::X1 => 0b001,
            Oversampling::X2 => 0b010,
            Oversampling::X4 => 0b011,
            Oversampling::X8 => 0b100,
            Oversampling::X16 => 0b101,
        }
    }
}

/// Describes the power modes that can be set in the CTRL_MEAS register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Sleep mode. This is the default mode after power on reset.
    Sleep,
    /// Forced mode. One measurement, then back to sleep.
    Forced,
    /// Normal mode. Measurements run continuously, separated by the standby time.
    Normal,
}

impl From<u8> for PowerMode {
    fn from(field: u8) -> Self {
        match field {
            0b00 => PowerMode::Sleep,
            0b01 | 0b10 => PowerMode::Forced,
            _ => PowerMode::Normal,
        }
    }
}

impl From<PowerMode> for u8 {
    fn from(value: PowerMode) -> Self {
        match value {
            PowerMode::Sleep => 0b00,
            PowerMode::Forced => 0b01,
            PowerMode::Normal => 0b11,
        }
    }
}
