//! GPIO function select registers

use super::Register;
use crate::Access;

/// Function select 0. GPFSEL1..5 follow.
pub const GPFSEL0: usize = 0;

/// Number of function select registers.
pub const GPFSEL_COUNT: usize = 6;

/// Number of 32-bit words we need mapped from the GPIO base.
pub const WORDS: usize = GPFSEL0 + GPFSEL_COUNT;

/// Width of one pin's function field.
pub const FSEL_BITS: u32 = 3;
/// Pins covered by each function select register.
pub const PINS_PER_FSEL: u8 = 10;

/// Highest pin number covered by the function select registers.
pub const MAX_PIN: u8 = 53;

/// Function select register number for `pin`, and the field offset within it.
///
/// `pin` must not exceed [`MAX_PIN`].
pub const fn fsel_location(pin: u8) -> (usize, u32) {
    let n = (pin / PINS_PER_FSEL) as usize;
    let offset = (pin % PINS_PER_FSEL) as u32 * FSEL_BITS;
    (n, offset)
}

pub struct RegisterBlock<'a, B: ?Sized> {
    access: &'a B,
}

impl<'a, B: Access + ?Sized> RegisterBlock<'a, B> {
    pub fn new(access: &'a B) -> Self {
        Self { access }
    }

    /// Function select register `n`, `n` in `0..GPFSEL_COUNT`.
    pub fn gpfsel(&self, n: usize) -> Register<'a, B> {
        Register::new(self.access, GPFSEL0 + n)
    }
}

/// Values of one pin's 3-bit function field.
pub mod FSEL {
    pub const INPUT: u32 = 0b000;
    pub const OUTPUT: u32 = 0b001;
    pub const ALT0: u32 = 0b100;
    pub const ALT1: u32 = 0b101;
    pub const ALT2: u32 = 0b110;
    pub const ALT3: u32 = 0b111;
    pub const ALT4: u32 = 0b011;
    pub const ALT5: u32 = 0b010;
    pub const MASK: u32 = 0b111;
}
