//! The digit snapshot shared between the sampler and the display.
//!
//! [`DigitCell::split`] hands out one [`DigitWriter`] and any number of [`DigitReader`]s. Every
//! access runs in a critical section and moves a whole [`DisplayDigits`] record, so a reader
//! never sees digits from two different periods.

use core::cell::Cell;

use critical_section::Mutex;

use crate::digits::DisplayDigits;

pub struct DigitCell {
    digits: Mutex<Cell<DisplayDigits>>,
}

impl DigitCell {
    pub const fn new() -> Self {
        Self {
            digits: Mutex::new(Cell::new(DisplayDigits::ZERO)),
        }
    }

    /// Splits the cell into its single writer and a reader.
    ///
    /// The writer borrows the cell mutably, so a second writer can not exist while it lives.
    pub fn split(&mut self) -> (DigitWriter<'_>, DigitReader<'_>) {
        let digits = &self.digits;
        (DigitWriter { digits }, DigitReader { digits })
    }
}

impl Default for DigitCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Write side, owned by the sampler.
pub struct DigitWriter<'a> {
    digits: &'a Mutex<Cell<DisplayDigits>>,
}

impl DigitWriter<'_> {
    /// Replaces the current snapshot.
    pub fn publish(&mut self, digits: DisplayDigits) {
        critical_section::with(|cs| self.digits.borrow(cs).set(digits));
    }
}

/// Read side, held by the display.
#[derive(Copy, Clone)]
pub struct DigitReader<'a> {
    digits: &'a Mutex<Cell<DisplayDigits>>,
}

impl DigitReader<'_> {
    /// Returns a copy of the most recently published snapshot.
    pub fn latest(&self) -> DisplayDigits {
        critical_section::with(|cs| self.digits.borrow(cs).get())
    }
}
