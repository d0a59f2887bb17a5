//! Secondary Memory Interface (SMI) driver for BCM2835-family processors.
//!
//! SMI is a parallel bus with programmable cycle timing. It moves bytes to and
//! from external devices, like FPGAs and displays, much faster than SPI.
//! `bcm2835-smi` provides
//!
//! - pin multiplexing for the SMI signals on GPIO 2 through 15.
//! - SMI clock setup (125 MHz, for 8 ns timing resolution).
//! - per-channel read and write bus timing.
//! - polled, single-byte direct transfers, blocking or non-blocking.
//!
//! DMA transfers and 9, 16, or 18-bit buses aren't supported.
//!
//! # Getting started
//!
//! To activate an [`Smi`] driver, you'll need three register blocks:
//!
//! 1. the SMI registers.
//! 2. the clock manager registers.
//! 3. something that selects GPIO functions. Use [`Gpio`] over the GPIO
//!    registers, or implement [`FunctionSelect`] on whatever GPIO driver you
//!    already have.
//!
//! Mapping physical peripheral memory is up to you. On Linux, that's usually
//! `mmap(2)` on `/dev/mem`, which needs root. Wrap each mapping with
//! [`Mmio::from_mapping`]. A failed mapping becomes an unavailable [`Handle`],
//! and activation reports [`Error::Unavailable`] before touching anything.
//!
//! ```no_run
//! use bcm2835_smi::{Config, Direction, Gpio, Mmio, Smi, Timing};
//! # fn map(offset: usize) -> *mut u32 { core::ptr::null_mut() }
//! # const SMI_OFFSET: usize = 0; const CM_OFFSET: usize = 0; const GPIO_OFFSET: usize = 0;
//!
//! // Safety: each pointer comes straight from a fresh mapping of its block.
//! let (smi, clock, gpio) = unsafe {
//!     (
//!         Mmio::from_mapping(map(SMI_OFFSET), bcm2835_smi::SMI_WORDS),
//!         Mmio::from_mapping(map(CM_OFFSET), bcm2835_smi::CLOCK_WORDS),
//!         Mmio::from_mapping(map(GPIO_OFFSET), bcm2835_smi::GPIO_WORDS),
//!     )
//! };
//!
//! let mut smi = Smi::activate(smi, clock, gpio.map(Gpio::new), Config::default())?;
//! smi.set_timing(0, Direction::Write, Timing::new(10, 20, 20, 1))?;
//! smi.write(0, 3, 0xAB)?;
//! let _byte = smi.read(0, 3)?;
//! let (_smi, _clock, _gpio) = smi.deactivate();
//! # Ok::<(), bcm2835_smi::Error>(())
//! ```
//!
//! The driver is single threaded, and assumes that it's the only thing
//! driving the SMI block. Every operation runs to completion on the calling
//! thread.
//!
//! ### License
//!
//! Licensed under either of
//!
//! - [Apache License, Version 2.0](http://www.apache.org/licenses/LICENSE-2.0) ([LICENSE-APACHE](./LICENSE-APACHE))
//! - [MIT License](http://opensource.org/licenses/MIT) ([LICENSE-MIT](./LICENSE-MIT))
//!
//! at your option.
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted
//! for inclusion in the work by you, as defined in the Apache-2.0 license, shall be
//! dual licensed as above, without any additional terms or conditions.

#![no_std]

#[cfg(test)]
extern crate std;

mod access;
mod channel;
pub mod clock;
mod config;
mod error;
pub mod pins;
mod ral;
mod timing;
pub mod transfer;

#[cfg(test)]
mod mock;

pub use access::{Access, Handle, Mmio};
pub use channel::{Channel, Direction};
pub use config::{BusMode, ChannelCheck, Config};
pub use error::Error;
pub use pins::{FunctionSelect, Gpio};
pub use timing::Timing;
pub use transfer::{Pending, Request};

/// An SMI result
pub type Result<T> = core::result::Result<T, Error>;

/// Words to map from the SMI base.
pub const SMI_WORDS: usize = ral::smi::WORDS;
/// Words to map from the clock manager base.
pub const CLOCK_WORDS: usize = ral::cm::WORDS;
/// Words to map from the GPIO base, if you're using [`Gpio`].
pub const GPIO_WORDS: usize = ral::gpio::WORDS;

/// An activated SMI driver.
///
/// `S` accesses the SMI registers, and `C` accesses the clock manager.
/// `P` selects GPIO functions for the SMI pins.
///
/// Create one with [`activate`](Smi::activate). When you're done,
/// [`deactivate`](Smi::deactivate) it to release the pins. Dropping the
/// driver without deactivating leaves the pins assigned to SMI.
pub struct Smi<S, C, P> {
    smi: S,
    clock: C,
    pins: P,
    config: Config,
}

impl<S, C, P> Smi<S, C, P> {
    /// The driver's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<S: Access, C: Access, P: FunctionSelect> Smi<S, C, P> {
    /// Activate the SMI peripheral.
    ///
    /// Routes the SMI signals to their pins, runs the SMI clock at 125 MHz,
    /// then writes the default device settings into every channel: 8-bit
    /// bus, [`Config::bus_mode`], always pace, and [`Config::default_timing`].
    ///
    /// If any handle is unavailable, or a register block is smaller than
    /// [`SMI_WORDS`] or [`CLOCK_WORDS`], this returns [`Error::Unavailable`]
    /// without touching any register or pin.
    pub fn activate(
        smi: Handle<S>,
        clock: Handle<C>,
        pins: Handle<P>,
        config: Config,
    ) -> Result<Self> {
        let (Some(smi), Some(clock), Some(mut pins)) =
            (smi.into_inner(), clock.into_inner(), pins.into_inner())
        else {
            return Err(Error::Unavailable);
        };
        if !covers(&smi, SMI_WORDS) || !covers(&clock, CLOCK_WORDS) {
            return Err(Error::Unavailable);
        }

        pins::activate_pins(&mut pins);
        clock::configure_clock(&clock);
        let driver = Self {
            smi,
            clock,
            pins,
            config,
        };
        driver.write_default_settings();
        Ok(driver)
    }

    /// Return the SMI pins to inputs, and release the register blocks.
    ///
    /// The SMI clock keeps running, and the device settings keep their
    /// values until the next activation.
    pub fn deactivate(mut self) -> (S, C, P) {
        pins::deactivate_pins(&mut self.pins);
        (self.smi, self.clock, self.pins)
    }
}

fn covers<A: Access>(access: &A, words: usize) -> bool {
    access.words().map_or(true, |mapped| mapped >= words)
}
