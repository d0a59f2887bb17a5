//! Drive the public API against a simulated SMI block and device.

use std::cell::{Cell, RefCell};

use bcm2835_smi::{
    pins::Function, Access, ChannelCheck, Config, Direction, Error, FunctionSelect, Gpio, Handle,
    Mmio, Request, Smi, Timing,
};

const DCS: usize = 13;
const DA: usize = 14;
const DD: usize = 15;

const ENABLE: u32 = 1 << 0;
const START: u32 = 1 << 1;
const DONE: u32 = 1 << 2;
const WRITE: u32 = 1 << 3;

/// SMI registers in front of a 4 x 64 byte memory. Transfers finish
/// on the first poll after START.
struct Loopback {
    regs: RefCell<[u32; 16]>,
    memory: RefCell<[[u8; 64]; 4]>,
    busy: Cell<bool>,
    writes: Cell<usize>,
}

impl Default for Loopback {
    fn default() -> Self {
        Self {
            regs: RefCell::new([0; 16]),
            memory: RefCell::new([[0; 64]; 4]),
            busy: Cell::new(false),
            writes: Cell::new(0),
        }
    }
}

impl Access for Loopback {
    fn read(&self, index: usize) -> u32 {
        let mut regs = self.regs.borrow_mut();
        if index == DCS && self.busy.replace(false) {
            let channel = ((regs[DA] >> 8) & 0b11) as usize;
            let address = (regs[DA] & 0x3F) as usize;
            let mut memory = self.memory.borrow_mut();
            if regs[DCS] & WRITE != 0 {
                memory[channel][address] = regs[DD] as u8;
            } else {
                regs[DD] = u32::from(memory[channel][address]);
            }
            regs[DCS] |= DONE;
        }
        regs[index]
    }

    fn write(&self, index: usize, value: u32) {
        self.writes.set(self.writes.get() + 1);
        let mut regs = self.regs.borrow_mut();
        if index == DCS {
            let done = if value & DONE != 0 { 0 } else { regs[DCS] & DONE };
            regs[DCS] = done | (value & (ENABLE | WRITE));
            if value & (ENABLE | START) == ENABLE | START {
                self.busy.set(true);
            }
        } else {
            regs[index] = value;
        }
    }
}

#[derive(Default)]
struct Pins(Vec<(u8, Function)>);

impl FunctionSelect for Pins {
    fn set_function(&mut self, pin: u8, function: Function) {
        self.0.push((pin, function));
    }
}

/// Plain memory for the clock manager.
struct ClockManager(Vec<Cell<u32>>);

impl Access for ClockManager {
    fn read(&self, index: usize) -> u32 {
        self.0[index].get()
    }
    fn write(&self, index: usize, value: u32) {
        self.0[index].set(value);
    }
}

fn clock() -> Handle<ClockManager> {
    let words = (0..bcm2835_smi::CLOCK_WORDS).map(|_| Cell::new(0)).collect();
    Handle::new(ClockManager(words))
}

fn activate(device: &Loopback, config: Config) -> Smi<&Loopback, ClockManager, Pins> {
    Smi::activate(
        Handle::new(device),
        clock(),
        Handle::new(Pins::default()),
        config,
    )
    .expect("every handle is mapped")
}

#[test]
fn write_then_read() {
    let device = Loopback::default();
    let mut smi = activate(&device, Config::default());

    let timing = Timing::new(10, 20, 20, 1);
    smi.set_timing(0, Direction::Write, timing).unwrap();
    smi.set_timing(0, Direction::Read, timing).unwrap();

    smi.write(0, 3, 0xAB).unwrap();
    assert_eq!(smi.read(0, 3), Ok(0xAB));
    assert_eq!(device.memory.borrow()[0][3], 0xAB);
    assert_eq!(device.regs.borrow()[DCS] & DONE, 0);

    let (_, clock, pins) = smi.deactivate();
    assert_eq!(clock.0[44].get(), 0x5A00_0016);
    assert_eq!(clock.0[45].get(), 0x5A00_4000);
    assert_eq!(pins.0.len(), 28);
    assert_eq!(pins.0.last(), Some(&(15, Function::Input)));
}

#[test]
fn channels_are_independent() {
    let device = Loopback::default();
    let mut smi = activate(&device, Config::default());

    for channel in 0..4 {
        smi.write(channel, 10, 0x10 + channel).unwrap();
    }
    for channel in 0..4 {
        assert_eq!(smi.transfer(Request::read(channel, 10)), Ok(0x10 + channel));
    }
}

#[test]
fn invalid_channels() {
    let device = Loopback::default();
    let mut strict = activate(&device, Config::default());
    let before = device.writes.get();
    assert_eq!(strict.write(4, 0, 1), Err(Error::InvalidChannel(4)));
    assert_eq!(strict.read(5, 0), Err(Error::InvalidChannel(5)));
    assert_eq!(
        strict.set_timing(6, Direction::Read, Timing::DEFAULT),
        Err(Error::InvalidChannel(6))
    );
    assert_eq!(device.writes.get(), before);
    strict.deactivate();

    let mut legacy = activate(&device, Config::default().channel_check(ChannelCheck::Legacy));
    let before = device.writes.get();
    assert_eq!(legacy.write(4, 0, 1), Ok(()));
    assert_eq!(legacy.read(5, 0), Ok(0));
    assert_eq!(legacy.set_timing(6, Direction::Read, Timing::DEFAULT), Ok(()));
    assert_eq!(device.writes.get(), before);
}

#[test]
fn unmapped_smi() {
    let mut pins = Pins::default();
    // Safety: a null pointer is never treated as a mapping.
    let smi = unsafe { Mmio::from_mapping(std::ptr::null_mut(), bcm2835_smi::SMI_WORDS) };
    assert!(!smi.is_available());

    let result = Smi::activate(smi, clock(), Handle::new(&mut pins), Config::default());
    assert!(matches!(result, Err(Error::Unavailable)));
    drop(result);
    assert!(pins.0.is_empty());
}

#[test]
fn gpio_over_memory() {
    let mut words = [0u32; bcm2835_smi::GPIO_WORDS];
    // Safety: words outlives the mapping, and nothing else touches it.
    let gpio = unsafe { Mmio::from_mapping(words.as_mut_ptr(), words.len()) }.map(Gpio::new);
    let device = Loopback::default();

    let smi = Smi::activate(Handle::new(&device), clock(), gpio, Config::default()).unwrap();
    let (_, _, gpio) = smi.deactivate();
    for pin in 2..=15 {
        assert_eq!(gpio.function(pin), Some(Function::Input));
    }
    drop(gpio);
    assert_eq!(words, [0; bcm2835_smi::GPIO_WORDS]);
}
