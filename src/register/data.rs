use crate::register::{InvalidRegisterField, Readable, Reg};

/// Assembles a 20-bit ADC code from `msb`, `lsb` and `xlsb`; the low nibble of `xlsb` is unused.
fn raw_code(b: &[u8]) -> u32 {
    let high = b[0] as u32;
    let mid = b[1] as u32;
    let low = b[2] as u32;

    (((high << 8) | mid) << 8 | low) >> 4
}

/// Marker struct for the press_msb, press_lsb, press_xlsb (0xF7 - 0xF9) registers.
///
/// Returns the raw uncompensated pressure code. Range checking happens in
/// [`Bmp280::read_raw_pressure`](crate::Bmp280::read_raw_pressure).
///
/// - **Length:** 3 bytes
/// - **Access:** Read-only
pub struct PressureData;
impl Reg for PressureData { const ADDR: u8 = 0xF7; }

impl Readable for PressureData {
    type Out = u32;

    const N: usize = 3;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(raw_code(b))
    }
}

/// Marker struct for the temp_msb, temp_lsb, temp_xlsb (0xFA - 0xFC) registers.
///
/// - **Length:** 3 bytes
/// - **Access:** Read-only
pub struct TemperatureData;
impl Reg for TemperatureData { const ADDR: u8 = 0xFA; }

impl Readable for TemperatureData {
    type Out = u32;

    const N: usize = 3;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(raw_code(b))
    }
}
