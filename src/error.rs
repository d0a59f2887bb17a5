//! SMI driver errors.

/// An error from the SMI driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A peripheral block wasn't mapped.
    ///
    /// Usually, the process lacks the privilege to map physical
    /// peripheral memory.
    Unavailable,
    /// The channel isn't one of the four SMI channels.
    ///
    /// Only reported with [`ChannelCheck::Strict`](crate::ChannelCheck::Strict).
    InvalidChannel(u8),
    /// The direct transfer didn't signal DONE within the poll limit.
    ///
    /// The transfer may still be running. The next transfer clears any DONE
    /// flag that it leaves behind.
    Timeout,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Unavailable => f.write_str("SMI peripheral is not mapped"),
            Error::InvalidChannel(channel) => write!(f, "invalid SMI channel {channel}"),
            Error::Timeout => f.write_str("SMI transfer timed out"),
        }
    }
}

impl core::error::Error for Error {}
