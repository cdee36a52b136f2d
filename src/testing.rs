use core::convert::Infallible;

use heapless::{LinearMap, Vec};

use crate::bus::{Bus, MAX_REG_BYTES};
use crate::calibration::CalibrationData;
use crate::error::Bmp280Error;
use crate::register::calibration::Calibration;
use crate::register::{Readable, Writable};
use crate::usi::ShiftRegister;

/// Trimming block of the datasheet's compensation example (section 3.12), little-endian.
pub const DATASHEET_CALIBRATION: [u8; 24] = [
    0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, 0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B, 0x8C, 0x00,
    0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17,
];

pub fn datasheet_calibration() -> CalibrationData {
    CalibrationData::new(Calibration::decode(&DATASHEET_CALIBRATION).unwrap())
}

/// Bit-level model of a USI data register and its 4-bit edge counter.
///
/// Answers the n-th transfer with `script[n % script.len()]`.
pub struct FakeShiftRegister<'a> {
    script: &'a [u8],
    next: usize,
    data: u8,
    response: u8,
    edges: u8,
    outgoing: u8,
    complete: bool,
    in_flight: bool,
    stalled: bool,
    strobes: u32,
    transfers: u32,
    overlaps: u32,
    sent: Vec<u8, 1024>,
}

impl<'a> FakeShiftRegister<'a> {
    pub fn new(script: &'a [u8]) -> Self {
        Self {
            script,
            next: 0,
            data: 0,
            response: 0,
            edges: 0,
            outgoing: 0,
            complete: false,
            in_flight: false,
            stalled: false,
            strobes: 0,
            transfers: 0,
            overlaps: 0,
            sent: Vec::new(),
        }
    }

    /// The counter never overflows from now on.
    pub fn stall(&mut self) {
        self.stalled = true;
    }

    /// Bytes shifted out on completed transfers (the first 1024).
    pub fn sent(&self) -> &[u8] {
        &self.sent
    }

    pub fn strobes(&self) -> u32 {
        self.strobes
    }

    pub fn transfers(&self) -> u32 {
        self.transfers
    }

    /// Loads that happened while a previous byte was still being shifted.
    pub fn overlaps(&self) -> u32 {
        self.overlaps
    }
}

impl ShiftRegister for FakeShiftRegister<'_> {
    fn load(&mut self, byte: u8) {
        if self.in_flight {
            self.overlaps += 1;
        }

        self.data = byte;
        self.response = match self.script.len() {
            0 => 0,
            len => self.script[self.next % len],
        };
        self.next += 1;
        self.edges = 0;
        self.outgoing = 0;
        self.complete = false;
        self.in_flight = true;
        self.transfers += 1;
    }

    fn strobe_clock(&mut self) {
        self.strobes += 1;
        if self.stalled || self.complete {
            return;
        }

        self.edges += 1;
        if self.edges % 2 == 0 {
            let bit = self.edges / 2 - 1;
            let incoming = (self.response >> (7 - bit)) & 1;
            self.outgoing = (self.outgoing << 1) | (self.data >> 7);
            self.data = (self.data << 1) | incoming;
        }

        if self.edges == 16 {
            self.complete = true;
            self.in_flight = false;
            let _ = self.sent.push(self.outgoing);
        }
    }

    fn transfer_complete(&self) -> bool {
        self.complete
    }

    fn data(&self) -> u8 {
        self.data
    }
}

/// Output pin that records every level it is driven to.
pub struct FakePin {
    levels: Vec<bool, 32>,
}

impl FakePin {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    pub fn levels(&self) -> &[bool] {
        &self.levels
    }
}

impl embedded_hal::digital::ErrorType for FakePin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let _ = self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let _ = self.levels.push(true);
        Ok(())
    }
}

/// SPI bus that accepts everything and remembers what was written.
pub struct FakeSpi {
    written: Vec<u8, 32>,
}

impl FakeSpi {
    pub fn new() -> Self {
        Self { written: Vec::new() }
    }

    pub fn written(&self) -> &[u8] {
        &self.written
    }
}

impl embedded_hal::spi::ErrorType for FakeSpi {
    type Error = Infallible;
}

impl embedded_hal::spi::SpiBus<u8> for FakeSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for word in words {
            let _ = self.written.push(*word);
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.write(words)?;
        words.fill(0);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug)]
enum RegisterValue {
    Data { bytes: [u8; MAX_REG_BYTES], len: usize },
    Fail,
}

/// Register-level fake of the sensor.
pub struct FakeBus<const N: usize> {
    regs: LinearMap<(u8, usize), RegisterValue, N>,
    writes: Vec<(u8, u8), 8>,
}

impl<const N: usize> FakeBus<N> {
    pub fn new() -> Self {
        FakeBus {
            regs: LinearMap::new(),
            writes: Vec::new(),
        }
    }

    pub fn with_response<R: Readable>(&mut self, data: &[u8]) {
        let mut register_value = [0u8; MAX_REG_BYTES];
        register_value[..data.len()].copy_from_slice(data);
        self.regs
            .insert((R::ADDR, R::N), RegisterValue::Data { bytes: register_value, len: data.len() })
            .unwrap();
    }

    /// Reads of `R` fail with a bus error.
    pub fn with_failure<R: Readable>(&mut self) {
        self.regs.insert((R::ADDR, R::N), RegisterValue::Fail).unwrap();
    }

    /// `(address, first byte)` of every register write, in order.
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }
}

impl<const N: usize> Bus for FakeBus<N> {
    type Error = ();

    fn read<R: Readable>(&mut self) -> Result<R::Out, Bmp280Error<Self::Error>> {
        if let Some(value) = self.regs.get(&(R::ADDR, R::N)) {
            match value {
                RegisterValue::Data { bytes, len } => {
                    if *len == R::N {
                        return R::decode(&bytes[..R::N]).map_err(Bmp280Error::UnexpectedRegisterData);
                    }
                }
                RegisterValue::Fail => return Err(Bmp280Error::Bus(())),
            }
        }

        panic!("No mocked value for register 0x{:x} and length {}", R::ADDR, R::N)
    }

    fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Bmp280Error<Self::Error>> {
        let mut buffer = [0u8; MAX_REG_BYTES];
        W::encode(v, &mut buffer[..W::N]);
        self.writes.push((W::ADDR, buffer[0])).unwrap();

        Ok(())
    }
}

/// Delay that returns immediately and adds up what was asked of it.
#[derive(Default)]
pub struct FakeDelay {
    elapsed_ns: u64,
}

impl FakeDelay {
    pub fn elapsed_ns(&self) -> u64 {
        self.elapsed_ns
    }
}

impl embedded_hal::delay::DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }
}

impl embedded_hal_async::delay::DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }
}
