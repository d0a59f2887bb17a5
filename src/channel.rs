//! SMI channels and transfer directions.
//!
//! A channel names one pair of device settings registers: one for reads,
//! one for writes. Direct transfers select their channel through the `DEV`
//! field of the direct address register.

/// One of the four SMI channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Number of channels supported by the peripheral.
    pub const COUNT: u8 = 4;

    pub const CH0: Self = Self(0);
    pub const CH1: Self = Self(1);
    pub const CH2: Self = Self(2);
    pub const CH3: Self = Self(3);

    /// All channels, in order.
    pub const ALL: [Self; Self::COUNT as usize] = [Self::CH0, Self::CH1, Self::CH2, Self::CH3];

    /// Returns `None` if `channel` isn't one of the four SMI channels.
    pub const fn new(channel: u8) -> Option<Self> {
        if channel < Self::COUNT {
            Some(Self(channel))
        } else {
            None
        }
    }

    /// The raw channel number, 0 through 3.
    pub const fn number(self) -> u8 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Channel {
    type Error = crate::Error;
    fn try_from(channel: u8) -> crate::Result<Self> {
        Self::new(channel).ok_or(crate::Error::InvalidChannel(channel))
    }
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> u8 {
        channel.0
    }
}

/// Direction of a transfer, as seen from the SoC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// External device to SoC
    Read,
    /// SoC to external device
    Write,
}
