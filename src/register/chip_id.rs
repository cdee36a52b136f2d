//! ### ID - Chip identification number (`0xD0`, 1 byte, R)
//!
//! Contains the chip identification code, which is always 0x58 for BMP280.
#![doc(alias = "ID")]
use crate::register::{InvalidRegisterField, Readable, Reg};

/// Chip id reported by every BMP280.
pub const BMP280_CHIP_ID: u8 = 0x58;

/// Marker struct for the ID (0xD0) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
pub struct ChipId;
impl Reg for ChipId { const ADDR: u8 = 0xD0; }

impl Readable for ChipId {
    type Out = u8;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0])
    }
}
