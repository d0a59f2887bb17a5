//! Polled, single-byte direct transfers.
//!
//! The direct-access engine moves one byte per START. Completion shows up as
//! the DONE bit in the direct control register. DONE is latched: it stays set
//! until software writes it back, and a leftover DONE would satisfy the next
//! poll before the new transfer ran. So we clear a stale DONE before every
//! START, and clear our own DONE once we've seen it.

use crate::ral;
use crate::{Access, Channel, ChannelCheck, Direction, Error, Result, Smi};

/// A direct transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Request {
    /// Raw channel number. Only 0 through 3 are valid.
    pub channel: u8,
    /// Only the low six bits reach the address register.
    pub address: u8,
    pub kind: Kind,
}

/// Direction of a [`Request`], with the outgoing byte for writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Read,
    Write(u8),
}

impl Kind {
    pub const fn direction(self) -> Direction {
        match self {
            Kind::Read => Direction::Read,
            Kind::Write(_) => Direction::Write,
        }
    }
}

impl Request {
    pub const fn read(channel: u8, address: u8) -> Self {
        Self {
            channel,
            address,
            kind: Kind::Read,
        }
    }

    pub const fn write(channel: u8, address: u8, data: u8) -> Self {
        Self {
            channel,
            address,
            kind: Kind::Write(data),
        }
    }
}

/// A direct transfer that's been started, and not yet seen to finish.
///
/// Produced by [`Smi::begin`]. Hand it to [`Smi::complete`] until the
/// transfer finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the transfer holds the direct-access engine until it completes"]
pub struct Pending {
    channel: Option<Channel>,
    kind: Kind,
}

impl Pending {
    /// The channel carrying the transfer.
    ///
    /// `None` for a transfer that was skipped under
    /// [`ChannelCheck::Legacy`]. Skipped transfers complete immediately
    /// without touching hardware.
    pub const fn channel(&self) -> Option<Channel> {
        self.channel
    }

    pub const fn direction(&self) -> Direction {
        self.kind.direction()
    }
}

impl<S: Access, C, P> Smi<S, C, P> {
    /// Start a direct transfer.
    ///
    /// Clears any stale DONE, programs the address (and data, for writes),
    /// then sets START.
    ///
    /// A `channel` greater than 3 doesn't touch the hardware. With
    /// [`ChannelCheck::Strict`], that's an [`Error::InvalidChannel`]. With
    /// [`ChannelCheck::Legacy`], you get a [`Pending`] that completes
    /// right away; a read then produces 0.
    pub fn begin(&mut self, request: Request) -> Result<Pending> {
        let Some(channel) = Channel::new(request.channel) else {
            return match self.config.channel_check {
                ChannelCheck::Strict => Err(Error::InvalidChannel(request.channel)),
                ChannelCheck::Legacy => Ok(Pending {
                    channel: None,
                    kind: request.kind,
                }),
            };
        };

        let regs = ral::smi::RegisterBlock::new(&self.smi);
        if ral::read_reg!(ral::smi, &regs, DCS, DONE == 1) {
            ral::write_reg!(ral::smi, &regs, DCS, DONE: 1);
        }

        ral::write_reg!(
            ral::smi,
            &regs,
            DA,
            DEV: u32::from(channel.number()),
            ADDR: u32::from(request.address)
        );
        match request.kind {
            Kind::Write(data) => {
                ral::write_reg!(ral::smi, &regs, DD, DATA: u32::from(data));
                ral::write_reg!(ral::smi, &regs, DCS, ENABLE: 1, START: 1, WRITE: 1);
            }
            Kind::Read => {
                ral::write_reg!(ral::smi, &regs, DCS, ENABLE: 1, START: 1);
            }
        }

        Ok(Pending {
            channel: Some(channel),
            kind: request.kind,
        })
    }

    /// Poll a started transfer, once.
    ///
    /// Returns `WouldBlock` while DONE is clear. Once DONE is set, captures
    /// the data (reads), clears DONE, and returns the byte that crossed the
    /// bus.
    pub fn complete(&mut self, pending: &Pending) -> nb::Result<u8, Error> {
        if pending.channel.is_none() {
            return Ok(match pending.kind {
                Kind::Read => 0,
                Kind::Write(data) => data,
            });
        }

        let regs = ral::smi::RegisterBlock::new(&self.smi);
        if !ral::read_reg!(ral::smi, &regs, DCS, DONE == 1) {
            return Err(nb::Error::WouldBlock);
        }

        let data = match pending.kind {
            // The bus is eight bits wide; the upper data bits don't exist on
            // the connector.
            Kind::Read => ral::read_reg!(ral::smi, &regs, DD, DATA) as u8,
            Kind::Write(data) => data,
        };
        ral::write_reg!(ral::smi, &regs, DCS, DONE: 1);
        Ok(data)
    }

    /// Perform a direct transfer, and wait for it to finish.
    ///
    /// Polls DONE at most [`poll_limit`](crate::Config::poll_limit) times
    /// before returning [`Error::Timeout`]. A limit of zero starts the
    /// transfer and times out without polling. Without a limit, a device
    /// that never finishes the transfer blocks this call forever.
    pub fn transfer(&mut self, request: Request) -> Result<u8> {
        let pending = self.begin(request)?;
        let mut polls: u32 = 0;
        loop {
            if self.config.poll_limit.is_some_and(|limit| polls >= limit) {
                return Err(Error::Timeout);
            }
            match self.complete(&pending) {
                Ok(data) => return Ok(data),
                Err(nb::Error::Other(err)) => return Err(err),
                Err(nb::Error::WouldBlock) => {
                    polls = polls.saturating_add(1);
                    core::hint::spin_loop();
                }
            }
        }
    }

    /// Write `data` to `address` using `channel`'s write timing.
    pub fn write(&mut self, channel: u8, address: u8, data: u8) -> Result<()> {
        self.transfer(Request::write(channel, address, data))
            .map(|_| ())
    }

    /// Read a byte from `address` using `channel`'s read timing.
    pub fn read(&mut self, channel: u8, address: u8) -> Result<u8> {
        self.transfer(Request::read(channel, address))
    }
}
