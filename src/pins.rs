//! SMI pin multiplexing.
//!
//! On the 40-pin header, SMI takes GPIO 2 through 15 in ALT1:
//!
//! | GPIO | SMI signal |
//! |------|------------|
//! | 2..=5 | SA3..SA0 |
//! | 6 | SOE_N / SE |
//! | 7 | SWE_N / SRW_N |
//! | 8..=15 | SD0..SD7 |
//!
//! SA4 and SA5 live on GPIO 1 and 0, which the board reserves for the HAT
//! identification EEPROM. We leave them alone, so only four address lines
//! reach the connector even though the direct address register carries six.

use core::ops::RangeInclusive;

use crate::ral::{self, gpio::FSEL};
use crate::Access;

/// GPIO pins carrying SMI signals.
pub const SMI_PINS: RangeInclusive<u8> = 2..=15;

/// A GPIO pin function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Input,
    Output,
    Alt0,
    Alt1,
    Alt2,
    Alt3,
    Alt4,
    Alt5,
}

impl Function {
    /// The 3-bit function select encoding.
    pub const fn bits(self) -> u32 {
        match self {
            Function::Input => FSEL::INPUT,
            Function::Output => FSEL::OUTPUT,
            Function::Alt0 => FSEL::ALT0,
            Function::Alt1 => FSEL::ALT1,
            Function::Alt2 => FSEL::ALT2,
            Function::Alt3 => FSEL::ALT3,
            Function::Alt4 => FSEL::ALT4,
            Function::Alt5 => FSEL::ALT5,
        }
    }
}

/// Selects the function of a GPIO pin.
///
/// Implement this if you already own GPIO through another library. Otherwise,
/// use [`Gpio`].
pub trait FunctionSelect {
    fn set_function(&mut self, pin: u8, function: Function);
}

impl<P: FunctionSelect + ?Sized> FunctionSelect for &mut P {
    fn set_function(&mut self, pin: u8, function: Function) {
        (**self).set_function(pin, function)
    }
}

/// Function selection through the GPIO function select registers.
pub struct Gpio<A> {
    access: A,
}

impl<A: Access> Gpio<A> {
    /// Use `access`, mapped at the GPIO base, for function selection.
    pub const fn new(access: A) -> Self {
        Self { access }
    }

    /// Release the GPIO register block.
    pub fn release(self) -> A {
        self.access
    }

    /// Read back the function of `pin`.
    ///
    /// Returns `None` for pins outside of the function select registers.
    pub fn function(&self, pin: u8) -> Option<Function> {
        if pin > ral::gpio::MAX_PIN {
            return None;
        }
        let (n, offset) = ral::gpio::fsel_location(pin);
        let gpio = ral::gpio::RegisterBlock::new(&self.access);
        let bits = (gpio.gpfsel(n).read() >> offset) & FSEL::MASK;
        Some(match bits {
            FSEL::INPUT => Function::Input,
            FSEL::OUTPUT => Function::Output,
            FSEL::ALT0 => Function::Alt0,
            FSEL::ALT1 => Function::Alt1,
            FSEL::ALT2 => Function::Alt2,
            FSEL::ALT3 => Function::Alt3,
            FSEL::ALT4 => Function::Alt4,
            _ => Function::Alt5,
        })
    }
}

impl<A: Access> FunctionSelect for Gpio<A> {
    /// # Panics
    ///
    /// Panics if `pin` is greater than 53.
    fn set_function(&mut self, pin: u8, function: Function) {
        assert!(pin <= ral::gpio::MAX_PIN);
        let (n, offset) = ral::gpio::fsel_location(pin);
        let gpio = ral::gpio::RegisterBlock::new(&self.access);
        let fsel = gpio.gpfsel(n);
        let value = (fsel.read() & !(FSEL::MASK << offset)) | (function.bits() << offset);
        fsel.write(value);
    }
}

/// Route every SMI signal to its pin.
pub(crate) fn activate_pins<P: FunctionSelect + ?Sized>(pins: &mut P) {
    for pin in SMI_PINS {
        pins.set_function(pin, Function::Alt1);
    }
}

/// Return every SMI pin to a plain input.
pub(crate) fn deactivate_pins<P: FunctionSelect + ?Sized>(pins: &mut P) {
    for pin in SMI_PINS {
        pins.set_function(pin, Function::Input);
    }
}
