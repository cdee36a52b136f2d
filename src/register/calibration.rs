//! ### calib00..calib23 - Factory trimming parameters (`0x88`, 24 bytes, R)
//!
//! Twelve little-endian 16-bit words: `dig_T1` (unsigned), `dig_T2`, `dig_T3` (signed),
//! `dig_P1` (unsigned), `dig_P2`..`dig_P9` (signed).
use crate::register::{InvalidRegisterField, Readable, Reg};

pub struct Calibration;
impl Reg for Calibration { const ADDR: u8 = 0x88; }

/// Trimming words exactly as stored in the sensor's NVM.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationNvm {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,
    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,
}

impl Readable for Calibration {
    type Out = CalibrationNvm;

    const N: usize = 24;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        // A block of identical 0x00 or 0xFF bytes is a dead or floating data line, not trimming data.
        if b[..Self::N].iter().all(|&v| v == b[0]) && (b[0] == 0x00 || b[0] == 0xFF) {
            return Err(InvalidRegisterField::new(Self::ADDR, b[0], 0));
        }

        let word = |i: usize| ((b[i + 1] as u16) << 8) | b[i] as u16;

        Ok(CalibrationNvm {
            dig_t1: word(0),
            dig_t2: word(2) as i16,
            dig_t3: word(4) as i16,
            dig_p1: word(6),
            dig_p2: word(8) as i16,
            dig_p3: word(10) as i16,
            dig_p4: word(12) as i16,
            dig_p5: word(14) as i16,
            dig_p6: word(16) as i16,
            dig_p7: word(18) as i16,
            dig_p8: word(20) as i16,
            dig_p9: word(22) as i16,
        })
    }
}
