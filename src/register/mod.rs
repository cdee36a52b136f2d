//! Typed markers for the BMP280 registers this crate touches.
//!
//! Every marker carries its address and length, and knows how to decode (and for writable
//! registers encode) its payload. [`Bus`](crate::bus::Bus) implementations only move bytes; the
//! meaning of those bytes lives here.

pub mod calibration;
pub mod chip_id;
pub mod ctrl_meas;
pub mod data;

/// A register held a bit pattern that can not be decoded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidRegisterField {
    pub register: u8,
    pub value: u8,
    pub bit_offset: u8,
}

impl InvalidRegisterField {
    pub fn new(register: u8, value: u8, bit_offset: u8) -> Self {
        Self { register, value, bit_offset }
    }
}

pub trait Reg { const ADDR: u8; }

pub trait Readable: Reg {
    type Out;
    const N: usize = 1;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField>;
}

pub trait Writable: Reg {
    type In;
    const N: usize = 1;
    fn encode(v: &Self::In, out: &mut [u8]);
}
