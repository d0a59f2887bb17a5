//! SMI clock generator setup.

use crate::ral;
use crate::Access;

/// Integer divisor applied to PLLD (500 MHz).
pub const DIVISOR: u32 = 4;

/// Frequency of the SMI clock after [`configure_clock`], in Hz.
pub const FREQUENCY_HZ: u32 = 125_000_000;

/// Length of one SMI clock cycle, in nanoseconds. Device settings
/// cycle counts are in these units.
pub const PERIOD_NS: u32 = 8;

/// Run the SMI clock at 125 MHz from PLLD.
///
/// Stops the generator, programs the divisor, then restarts the generator
/// on PLLD. Each write carries the clock manager password. BUSY isn't
/// polled between the writes.
pub(crate) fn configure_clock<C: Access + ?Sized>(clock: &C) {
    let cm = ral::cm::RegisterBlock::new(clock);
    ral::write_reg!(ral::cm, &cm, SMICTL, PASSWD: KEY);
    ral::write_reg!(ral::cm, &cm, SMIDIV, PASSWD: KEY, DIVI: DIVISOR);
    ral::write_reg!(ral::cm, &cm, SMICTL, PASSWD: KEY, ENAB: 1, SRC: PLLD);
}
