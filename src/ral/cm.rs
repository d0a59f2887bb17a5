//! Clock manager, SMI clock generator only
//!
//! Every write to a clock manager register must carry the password
//! (`PASSWD: KEY`) in the top byte. Writes without it are dropped by the
//! hardware.

use super::Register;
use crate::Access;

/// SMI clock control (0xB0)
pub const SMICTL: usize = 44;
/// SMI clock divisor (0xB4)
pub const SMIDIV: usize = 45;

/// Number of 32-bit words we need mapped from the clock manager base.
pub const WORDS: usize = SMIDIV + 1;

pub struct RegisterBlock<'a, B: ?Sized> {
    pub SMICTL: Register<'a, B>,
    pub SMIDIV: Register<'a, B>,
}

impl<'a, B: Access + ?Sized> RegisterBlock<'a, B> {
    pub fn new(access: &'a B) -> Self {
        Self {
            SMICTL: Register::new(access, SMICTL),
            SMIDIV: Register::new(access, SMIDIV),
        }
    }
}

/// SMI clock control
pub mod SMICTL {
    pub mod PASSWD {
        pub const offset: u32 = 24;
        pub const mask: u32 = 0xFF << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {
            pub const KEY: u32 = 0x5A;
        }
    }
    /// Generator is running.
    pub mod BUSY {
        pub const offset: u32 = 7;
        pub const mask: u32 = 1 << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Stop the generator immediately
    pub mod KILL {
        pub const offset: u32 = 5;
        pub const mask: u32 = 1 << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Enable the generator
    pub mod ENAB {
        pub const offset: u32 = 4;
        pub const mask: u32 = 1 << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Clock source
    pub mod SRC {
        pub const offset: u32 = 0;
        pub const mask: u32 = 0xF << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {
            pub const GND: u32 = 0;
            pub const OSCILLATOR: u32 = 1;
            pub const PLLA: u32 = 4;
            pub const PLLC: u32 = 5;
            pub const PLLD: u32 = 6;
            pub const HDMI_AUX: u32 = 7;
        }
    }
}

/// SMI clock divisor
pub mod SMIDIV {
    pub mod PASSWD {
        pub const offset: u32 = 24;
        pub const mask: u32 = 0xFF << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {
            pub const KEY: u32 = 0x5A;
        }
    }
    /// Integer part of the divisor
    pub mod DIVI {
        pub const offset: u32 = 12;
        pub const mask: u32 = 0xFFF << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Fractional part of the divisor
    pub mod DIVF {
        pub const offset: u32 = 0;
        pub const mask: u32 = 0xFFF << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
}
