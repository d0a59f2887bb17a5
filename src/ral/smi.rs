//! SMI register block and fields

use super::Register;
use crate::{Access, Channel, Direction};

/// Control and status
pub const CS: usize = 0;
/// Transfer length
pub const L: usize = 1;
/// Transfer address
pub const A: usize = 2;
/// Transfer data
pub const D: usize = 3;
/// Device settings, read, channel 0. The remaining read / write settings
/// registers interleave from here: DSR0, DSW0, DSR1, DSW1, ...
pub const DSR0: usize = 4;
/// DMA control
pub const DMC: usize = 12;
/// Direct control / status
pub const DCS: usize = 13;
/// Direct address
pub const DA: usize = 14;
/// Direct data
pub const DD: usize = 15;

/// Number of 32-bit words spanned by the SMI block.
pub const WORDS: usize = 16;

/// The registers of the direct-access engine.
pub struct RegisterBlock<'a, B: ?Sized> {
    /// Direct control / status
    pub DCS: Register<'a, B>,
    /// Direct address
    pub DA: Register<'a, B>,
    /// Direct data
    pub DD: Register<'a, B>,
    access: &'a B,
}

impl<'a, B: Access + ?Sized> RegisterBlock<'a, B> {
    pub fn new(access: &'a B) -> Self {
        Self {
            DCS: Register::new(access, DCS),
            DA: Register::new(access, DA),
            DD: Register::new(access, DD),
            access,
        }
    }

    /// The device settings register for `channel` in `direction`.
    pub fn slot(&self, channel: Channel, direction: Direction) -> Slot<'a, B> {
        Slot {
            DS: Register::new(self.access, slot_index(channel, direction)),
        }
    }
}

/// One of the eight device settings (timing) registers.
pub struct Slot<'a, B: ?Sized> {
    /// Device settings, read or write
    pub DS: Register<'a, B>,
}

/// Word index of the settings register for a channel and direction.
pub const fn slot_index(channel: Channel, direction: Direction) -> usize {
    let base = DSR0 + 2 * channel.index();
    match direction {
        Direction::Read => base,
        Direction::Write => base + 1,
    }
}

/// Device settings, shared layout of DSR0..3 and DSW0..3
pub mod DS {
    /// Transfer width
    pub mod WIDTH {
        pub const offset: u32 = 30;
        pub const mask: u32 = 0b11 << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {
            pub const WID8: u32 = 0b00;
            pub const WID16: u32 = 0b01;
            pub const WID18: u32 = 0b10;
            pub const WID9: u32 = 0b11;
        }
    }
    /// Setup cycles
    pub mod SETUP {
        pub const offset: u32 = 24;
        pub const mask: u32 = 0x3F << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Run cycles in Motorola (68) mode rather than Intel (80) mode
    pub mod MODE68 {
        pub const offset: u32 = 23;
        pub const mask: u32 = 1 << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {
            pub const MODE80: u32 = 0;
            pub const MODE68: u32 = 1;
        }
    }
    /// Read: setup only on the first cycle. Write: swap pixel data.
    pub mod FSETUP {
        pub const offset: u32 = 22;
        pub const mask: u32 = 1 << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Hold cycles
    pub mod HOLD {
        pub const offset: u32 = 16;
        pub const mask: u32 = 0x3F << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Apply pacing always
    pub mod PACEALL {
        pub const offset: u32 = 15;
        pub const mask: u32 = 1 << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Pace cycles
    pub mod PACE {
        pub const offset: u32 = 8;
        pub const mask: u32 = 0x7F << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Use DMA requests
    pub mod DREQ {
        pub const offset: u32 = 7;
        pub const mask: u32 = 1 << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Strobe cycles
    pub mod STROBE {
        pub const offset: u32 = 0;
        pub const mask: u32 = 0x7F << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }

    /// Every cycle-count field. Everything outside of this is static
    /// configuration.
    pub const TIMING_MASK: u32 = SETUP::mask | HOLD::mask | PACE::mask | STROBE::mask;

    // The cycle-count fields must not overlap each other, or the flags.
    const _: () = assert!(SETUP::mask & HOLD::mask == 0);
    const _: () = assert!((SETUP::mask | HOLD::mask) & (PACE::mask | STROBE::mask) == 0);
    const _: () = assert!(PACE::mask & STROBE::mask == 0);
    const _: () = assert!(
        TIMING_MASK
            & (WIDTH::mask
                | MODE68::mask
                | FSETUP::mask
                | PACEALL::mask
                | DREQ::mask)
            == 0
    );
    const _: () = assert!(TIMING_MASK == 0x3F3F_7F7F);
}

/// Direct control / status
pub mod DCS {
    /// Enable the direct-access engine
    pub mod ENABLE {
        pub const offset: u32 = 0;
        pub const mask: u32 = 1 << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Start a transfer
    pub mod START {
        pub const offset: u32 = 1;
        pub const mask: u32 = 1 << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Transfer finished. Write 1 to clear.
    pub mod DONE {
        pub const offset: u32 = 2;
        pub const mask: u32 = 1 << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Direction; set to write to the external device
    pub mod WRITE {
        pub const offset: u32 = 3;
        pub const mask: u32 = 1 << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
}

/// Direct address
pub mod DA {
    /// Device settings slot used for the transfer
    pub mod DEV {
        pub const offset: u32 = 8;
        pub const mask: u32 = 0b11 << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
    /// Address lines SA5..SA0
    pub mod ADDR {
        pub const offset: u32 = 0;
        pub const mask: u32 = 0x3F << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
}

/// Direct data
pub mod DD {
    /// Up to 18 data bits. We only drive the low 8.
    pub mod DATA {
        pub const offset: u32 = 0;
        pub const mask: u32 = 0x3_FFFF << offset;
        pub mod R {}
        pub mod W {}
        pub mod RW {}
    }
}
