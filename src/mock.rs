//! Register backends for tests.

use core::cell::{Cell, RefCell};
use std::vec::Vec;

use crate::pins::{Function, FunctionSelect};
use crate::ral::{self, smi::DCS};
use crate::{Access, Config, Handle, Smi};

/// Plain memory. Records every write, and counts reads.
pub struct RegisterFile {
    regs: RefCell<Vec<u32>>,
    writes: RefCell<Vec<(usize, u32)>>,
    reads: Cell<usize>,
}

impl RegisterFile {
    pub fn new(words: usize) -> Self {
        Self {
            regs: RefCell::new(std::vec![0; words]),
            writes: RefCell::new(Vec::new()),
            reads: Cell::new(0),
        }
    }

    /// Peek, without counting a read.
    pub fn get(&self, index: usize) -> u32 {
        self.regs.borrow()[index]
    }

    /// Poke, without recording a write.
    pub fn set(&self, index: usize, value: u32) {
        self.regs.borrow_mut()[index] = value;
    }

    pub fn writes(&self) -> Vec<(usize, u32)> {
        self.writes.borrow().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn clear_log(&self) {
        self.writes.borrow_mut().clear();
        self.reads.set(0);
    }
}

impl Access for RegisterFile {
    fn read(&self, index: usize) -> u32 {
        self.reads.set(self.reads.get() + 1);
        self.get(index)
    }
    fn write(&self, index: usize, value: u32) {
        self.writes.borrow_mut().push((index, value));
        self.set(index, value);
    }
}

const ENABLE: u32 = DCS::ENABLE::mask;
const START: u32 = DCS::START::mask;
const DONE: u32 = DCS::DONE::mask;
const WRITE: u32 = DCS::WRITE::mask;

/// A started transfer inside the simulated peripheral.
#[derive(Clone, Copy)]
struct InFlight {
    channel: usize,
    address: usize,
    write: Option<u8>,
    countdown: u32,
}

/// An SMI block wired to a simulated device.
///
/// The device remembers the last byte written to each (channel, address),
/// and plays it back on reads. DONE latches like the hardware: it's set when
/// a transfer finishes and stays set until written back.
pub struct MockSmi {
    regs: RegisterFile,
    bus: RefCell<[[Option<u8>; 64]; 4]>,
    in_flight: Cell<Option<InFlight>>,
    latency: Cell<u32>,
    stuck: Cell<bool>,
    transfers: Cell<usize>,
    done_clears: Cell<usize>,
}

impl MockSmi {
    pub fn new() -> Self {
        Self {
            regs: RegisterFile::new(ral::smi::WORDS),
            bus: RefCell::new([[None; 64]; 4]),
            in_flight: Cell::new(None),
            latency: Cell::new(0),
            stuck: Cell::new(false),
            transfers: Cell::new(0),
            done_clears: Cell::new(0),
        }
    }

    /// Number of DONE polls that see a transfer still running.
    pub fn set_latency(&self, polls: u32) {
        self.latency.set(polls);
    }

    /// A stuck device never finishes a transfer.
    pub fn set_stuck(&self, stuck: bool) {
        self.stuck.set(stuck);
    }

    /// Leave DONE set, as if an earlier transfer was never acknowledged.
    pub fn force_done(&self) {
        self.in_flight.set(None);
        self.regs.set(ral::smi::DCS, self.regs.get(ral::smi::DCS) | DONE);
    }

    pub fn done(&self) -> bool {
        self.regs.get(ral::smi::DCS) & DONE != 0
    }

    pub fn bus(&self, channel: usize, address: usize) -> Option<u8> {
        self.bus.borrow()[channel][address]
    }

    pub fn set_bus(&self, channel: usize, address: usize, data: u8) {
        self.bus.borrow_mut()[channel][address] = Some(data);
    }

    pub fn writes(&self) -> Vec<(usize, u32)> {
        self.regs.writes()
    }

    pub fn reads(&self) -> usize {
        self.regs.reads()
    }

    pub fn transfers(&self) -> usize {
        self.transfers.get()
    }

    pub fn done_clears(&self) -> usize {
        self.done_clears.get()
    }

    pub fn clear_log(&self) {
        self.regs.clear_log();
        self.transfers.set(0);
        self.done_clears.set(0);
    }

    fn start(&self, dcs: u32) {
        let da = self.regs.get(ral::smi::DA);
        let transfer = InFlight {
            channel: ((da >> 8) & 0b11) as usize,
            address: (da & 0x3F) as usize,
            write: (dcs & WRITE != 0).then(|| self.regs.get(ral::smi::DD) as u8),
            countdown: self.latency.get(),
        };
        self.transfers.set(self.transfers.get() + 1);
        self.in_flight.set(Some(transfer));
        if transfer.countdown == 0 && !self.stuck.get() {
            self.finish(transfer);
        }
    }

    fn finish(&self, transfer: InFlight) {
        self.in_flight.set(None);
        match transfer.write {
            Some(data) => self.set_bus(transfer.channel, transfer.address, data),
            None => {
                let data = self.bus(transfer.channel, transfer.address).unwrap_or(0);
                self.regs.set(ral::smi::DD, u32::from(data));
            }
        }
        self.regs.set(ral::smi::DCS, self.regs.get(ral::smi::DCS) | DONE);
    }
}

impl Access for MockSmi {
    fn read(&self, index: usize) -> u32 {
        if index == ral::smi::DCS && !self.stuck.get() {
            if let Some(mut transfer) = self.in_flight.get() {
                if transfer.countdown == 0 {
                    self.finish(transfer);
                } else {
                    transfer.countdown -= 1;
                    self.in_flight.set(Some(transfer));
                }
            }
        }
        self.regs.read(index)
    }

    fn write(&self, index: usize, value: u32) {
        if index != ral::smi::DCS {
            self.regs.write(index, value);
            return;
        }
        let current = self.regs.get(ral::smi::DCS);
        let mut next = (current & DONE) | (value & (ENABLE | WRITE));
        if value & DONE != 0 {
            next &= !DONE;
            self.done_clears.set(self.done_clears.get() + 1);
        }
        self.regs.write(index, value);
        self.regs.set(index, next);
        // Without ENABLE, the engine isn't powered and START does nothing.
        if value & (START | ENABLE) == START | ENABLE {
            self.start(value);
        }
    }
}

/// Records function selections.
#[derive(Default)]
pub struct PinLog {
    pub calls: Vec<(u8, Function)>,
}

impl FunctionSelect for PinLog {
    fn set_function(&mut self, pin: u8, function: Function) {
        self.calls.push((pin, function));
    }
}

/// An activated driver on `smi`, with throwaway clock and pin backends.
pub fn driver<S: Access>(smi: S, config: Config) -> Smi<S, RegisterFile, PinLog> {
    Smi::activate(
        Handle::new(smi),
        Handle::new(RegisterFile::new(ral::cm::WORDS)),
        Handle::new(PinLog::default()),
        config,
    )
    .unwrap()
}
