//! Byte exchange over a USI-style shift register.
//!
//! The port is a data register paired with a 4-bit edge counter. Software toggles the clock;
//! every second edge shifts one bit out of the register's MSB and one bit in at its LSB, and
//! after 16 edges (8 bits) the counter overflows and raises a flag.
//!
//! The data register holds exactly one byte in flight, so a transfer started from an interrupt
//! handler while another transfer is half way through would corrupt both. [`UsiPort::transfer`]
//! therefore runs load, strobe and read-back inside a single critical section, and the port can
//! be shared by reference between the sampler (interrupt context) and the display (main loop).

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::spi::{ErrorType, SpiBus};

use crate::config::UsiConfig;
use crate::error::TransferError;

/// Capabilities of the shift-register peripheral that [`UsiPort`] drives.
///
/// Implement this on top of the HAL or the raw register block of the target.
pub trait ShiftRegister {
    /// Writes `byte` to the data register and clears the counter-overflow flag.
    fn load(&mut self, byte: u8);

    /// Toggles the clock line once.
    fn strobe_clock(&mut self);

    /// Returns `true` once the counter has overflowed, i.e. 8 bits have been exchanged.
    fn transfer_complete(&self) -> bool;

    /// Reads the data register.
    fn data(&self) -> u8;
}

/// Blocking, full-duplex master port on top of a [`ShiftRegister`].
pub struct UsiPort<R> {
    register: Mutex<RefCell<R>>,
    config: UsiConfig,
}

impl<R: ShiftRegister> UsiPort<R> {
    pub fn new(register: R, config: UsiConfig) -> Self {
        Self {
            register: Mutex::new(RefCell::new(register)),
            config,
        }
    }

    /// Shifts `out` to the peripheral and returns the byte shifted in at the same time.
    ///
    /// Interrupts are disabled for the whole exchange. Gives up with [`TransferError::Timeout`]
    /// after [`UsiConfig::max_strobes`] clock edges without the overflow flag.
    pub fn transfer(&self, out: u8) -> Result<u8, TransferError> {
        critical_section::with(|cs| {
            let mut register = self.register.borrow_ref_mut(cs);
            register.load(out);

            let mut strobes = 0u32;
            while !register.transfer_complete() {
                if strobes >= self.config.max_strobes {
                    warn!("usi: no overflow after {} strobes", strobes);
                    return Err(TransferError::Timeout);
                }
                register.strobe_clock();
                strobes += 1;
            }

            Ok(register.data())
        })
    }

    /// Consumes the port and hands back the peripheral.
    pub fn release(self) -> R {
        self.register.into_inner().into_inner()
    }
}

impl<R: ShiftRegister> ErrorType for &UsiPort<R> {
    type Error = TransferError;
}

// Each byte is its own critical section. A multi-byte transaction addressed to one peripheral
// must hold its own critical section around chip select, as `bus::Spi` and `SegmentDisplay` do.
impl<R: ShiftRegister> SpiBus<u8> for &UsiPort<R> {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words.iter_mut() {
            *word = (**self).transfer(0x00)?;
        }

        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for word in words {
            (**self).transfer(*word)?;
        }

        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let len = read.len().max(write.len());
        for i in 0..len {
            let incoming = (**self).transfer(write.get(i).copied().unwrap_or(0x00))?;
            if let Some(slot) = read.get_mut(i) {
                *slot = incoming;
            }
        }

        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words.iter_mut() {
            *word = (**self).transfer(*word)?;
        }

        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
