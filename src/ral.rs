//! A RAL-like module to support SMI register access
//!
//! There's no generated RAL for the BCM2835 that we'd want to depend on, and
//! the SMI block barely shows up in the public documentation. We only touch a
//! handful of registers across three peripheral blocks: SMI itself, the clock
//! manager, and GPIO.
//!
//! Registers aren't laid out as `#[repr(C)]` structs over memory. Instead,
//! each register block is a view of [`Register`] proxies over an
//! [`Access`](crate::Access) backend. The proxies expose the same `read()` and
//! `write()` that the RAL macros expect, so we can still say
//!
//! ```ignore
//! ral::write_reg!(ral::smi, regs, DCS, ENABLE: 1, START: 1);
//! ```
//!
//! and have it work against real memory or a test double.

#![allow(
    non_snake_case, // Compatibility with RAL
    non_upper_case_globals, // Compatibility with RAL
    dead_code, // Complete register map; not every field is driven
)]

pub mod cm;
pub mod gpio;
pub mod smi;

pub use ral_registers::{modify_reg, read_reg, write_reg};

use crate::Access;

/// One 32-bit register in a block, addressed by word index.
pub struct Register<'a, B: ?Sized> {
    access: &'a B,
    index: usize,
}

impl<'a, B: Access + ?Sized> Register<'a, B> {
    pub(crate) const fn new(access: &'a B, index: usize) -> Self {
        Self { access, index }
    }

    #[inline]
    pub fn read(&self) -> u32 {
        self.access.read(self.index)
    }

    #[inline]
    pub fn write(&self, value: u32) {
        self.access.write(self.index, value)
    }
}
