//! Driver configuration.

use crate::Timing;

/// How the driver treats channels outside of 0 through 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelCheck {
    /// Return [`Error::InvalidChannel`](crate::Error::InvalidChannel).
    #[default]
    Strict,
    /// Silently skip the operation. Writes and timing changes succeed
    /// without touching hardware, and reads return 0.
    Legacy,
}

/// Bus cycle style, applied to every device settings register at activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusMode {
    /// Separate read and write strobes (SOE_N / SWE_N).
    #[default]
    Intel80,
    /// Enable strobe plus read/write select (SE / SRW_N).
    Motorola68,
}

/// SMI driver configuration.
///
/// ```
/// use bcm2835_smi::{ChannelCheck, Config, Timing};
///
/// let config = Config::new()
///     .channel_check(ChannelCheck::Legacy)
///     .poll_limit(Some(1_000))
///     .default_timing(Timing::new(4, 8, 8, 1));
/// assert_eq!(config.poll_limit, Some(1_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub channel_check: ChannelCheck,
    /// Maximum number of DONE polls per transfer.
    ///
    /// `Some(0)` starts the transfer, then times out without polling.
    /// `None` waits forever. A device that never completes the transfer then
    /// hangs the calling thread.
    pub poll_limit: Option<u32>,
    /// Timing written to all eight device settings registers at activation.
    pub default_timing: Timing,
    pub bus_mode: BusMode,
}

impl Config {
    /// Default number of DONE polls before a transfer times out.
    ///
    /// A default-timed transfer completes in well under a microsecond, and
    /// each poll costs at least one peripheral bus read.
    pub const DEFAULT_POLL_LIMIT: u32 = 100_000;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            channel_check: ChannelCheck::Strict,
            poll_limit: Some(Self::DEFAULT_POLL_LIMIT),
            default_timing: Timing::DEFAULT,
            bus_mode: BusMode::Intel80,
        }
    }

    #[must_use]
    pub const fn channel_check(mut self, check: ChannelCheck) -> Self {
        self.channel_check = check;
        self
    }

    #[must_use]
    pub const fn poll_limit(mut self, limit: Option<u32>) -> Self {
        self.poll_limit = limit;
        self
    }

    #[must_use]
    pub const fn default_timing(mut self, timing: Timing) -> Self {
        self.default_timing = timing;
        self
    }

    #[must_use]
    pub const fn bus_mode(mut self, mode: BusMode) -> Self {
        self.bus_mode = mode;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
