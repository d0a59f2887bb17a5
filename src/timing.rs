//! Device settings (bus timing) for SMI channels.
//!
//! Each channel has one device settings register for reads and one for
//! writes. A bus cycle runs through four phases, each counted in SMI clock
//! cycles:
//!
//! - **setup**: address valid before the strobe asserts
//! - **strobe**: strobe asserted
//! - **hold**: address valid after the strobe deasserts
//! - **pace**: idle time before the next cycle
//!
//! Pace has no observable effect on the parts we've tested, but the
//! peripheral still expects a value. Use at least 1.

use fugit::NanosDurationU32;

use crate::ral::{self, smi::DS};
use crate::{clock, Access, BusMode, Channel, ChannelCheck, Direction, Error, Result, Smi};

/// Cycle counts for one device settings register.
///
/// Counts wider than their register field are truncated to the field width
/// when written. Don't rely on saturation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timing {
    pub setup: u8,
    pub strobe: u8,
    pub hold: u8,
    pub pace: u8,
}

impl Timing {
    pub const SETUP_MAX: u8 = (DS::SETUP::mask >> DS::SETUP::offset) as u8;
    pub const STROBE_MAX: u8 = (DS::STROBE::mask >> DS::STROBE::offset) as u8;
    pub const HOLD_MAX: u8 = (DS::HOLD::mask >> DS::HOLD::offset) as u8;
    pub const PACE_MAX: u8 = (DS::PACE::mask >> DS::PACE::offset) as u8;

    /// 80 ns setup, 160 ns strobe, 160 ns hold, 8 ns pace.
    pub const DEFAULT: Self = Self::new(10, 20, 20, 1);

    pub const fn new(setup: u8, strobe: u8, hold: u8, pace: u8) -> Self {
        Self {
            setup,
            strobe,
            hold,
            pace,
        }
    }

    /// Convert phase durations into cycle counts, rounding up to whole clock
    /// cycles.
    ///
    /// Returns `None` if any phase needs more cycles than its field holds.
    ///
    /// ```
    /// use bcm2835_smi::Timing;
    /// use fugit::ExtU32;
    ///
    /// let timing = Timing::from_durations(80.nanos(), 150.nanos(), 160.nanos(), 8.nanos());
    /// assert_eq!(timing, Some(Timing::new(10, 19, 20, 1)));
    /// ```
    pub fn from_durations(
        setup: NanosDurationU32,
        strobe: NanosDurationU32,
        hold: NanosDurationU32,
        pace: NanosDurationU32,
    ) -> Option<Self> {
        Some(Self {
            setup: cycles(setup, Self::SETUP_MAX)?,
            strobe: cycles(strobe, Self::STROBE_MAX)?,
            hold: cycles(hold, Self::HOLD_MAX)?,
            pace: cycles(pace, Self::PACE_MAX)?,
        })
    }

    /// Duration of one full bus cycle at this timing.
    pub fn cycle_time(&self) -> NanosDurationU32 {
        let cycles = u32::from(self.setup)
            + u32::from(self.strobe)
            + u32::from(self.hold)
            + u32::from(self.pace);
        NanosDurationU32::from_ticks(cycles * clock::PERIOD_NS)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn cycles(duration: NanosDurationU32, max: u8) -> Option<u8> {
    let cycles = duration.ticks().div_ceil(clock::PERIOD_NS);
    u8::try_from(cycles).ok().filter(|&cycles| cycles <= max)
}

/// Install `timing` into a device settings register, keeping every other bit.
fn write_timing<A: Access + ?Sized>(slot: &ral::smi::Slot<'_, A>, timing: Timing) {
    ral::modify_reg!(
        ral::smi,
        slot,
        DS,
        SETUP: u32::from(timing.setup),
        STROBE: u32::from(timing.strobe),
        HOLD: u32::from(timing.hold),
        PACE: u32::from(timing.pace)
    );
}

impl<S: Access, C, P> Smi<S, C, P> {
    /// Change the bus timing that `channel` uses for transfers in `direction`.
    ///
    /// Only the four cycle counts change. Width, bus mode, and pacing flags
    /// stay as they were written at activation.
    ///
    /// A `channel` greater than 3 doesn't touch the hardware. With
    /// [`ChannelCheck::Strict`], that's an [`Error::InvalidChannel`];
    /// with [`ChannelCheck::Legacy`], the call quietly succeeds.
    pub fn set_timing(&mut self, channel: u8, direction: Direction, timing: Timing) -> Result<()> {
        let Some(channel) = Channel::new(channel) else {
            return match self.config.channel_check {
                ChannelCheck::Strict => Err(Error::InvalidChannel(channel)),
                ChannelCheck::Legacy => Ok(()),
            };
        };
        let regs = ral::smi::RegisterBlock::new(&self.smi);
        write_timing(&regs.slot(channel, direction), timing);
        Ok(())
    }

    /// Read back the bus timing of `channel` in `direction`.
    pub fn timing(&self, channel: Channel, direction: Direction) -> Timing {
        let regs = ral::smi::RegisterBlock::new(&self.smi);
        let slot = regs.slot(channel, direction);
        let (setup, strobe, hold, pace) =
            ral::read_reg!(ral::smi, &slot, DS, SETUP, STROBE, HOLD, PACE);
        // Every field is at most 7 bits wide.
        Timing::new(setup as u8, strobe as u8, hold as u8, pace as u8)
    }

    /// Write the activation-time configuration into all eight device
    /// settings registers: 8-bit bus, the configured bus mode, always pace,
    /// and the configured default timing.
    pub(crate) fn write_default_settings(&self) {
        let timing = self.config.default_timing;
        let mode = match self.config.bus_mode {
            BusMode::Intel80 => DS::MODE68::RW::MODE80,
            BusMode::Motorola68 => DS::MODE68::RW::MODE68,
        };
        let regs = ral::smi::RegisterBlock::new(&self.smi);
        for channel in Channel::ALL {
            for direction in [Direction::Read, Direction::Write] {
                let slot = regs.slot(channel, direction);
                ral::write_reg!(
                    ral::smi,
                    &slot,
                    DS,
                    WIDTH: WID8,
                    MODE68: mode,
                    PACEALL: 1,
                    SETUP: u32::from(timing.setup),
                    STROBE: u32::from(timing.strobe),
                    HOLD: u32::from(timing.hold),
                    PACE: u32::from(timing.pace)
                );
            }
        }
    }
}
