//! Shared test transport: an in-memory MCP23008 behind the `I2cBus` trait.
//!
//! The simulator keeps a real register file (OLAT writes echo onto GPIO
//! for pins configured as outputs), logs every bus call for traffic
//! assertions, and exposes fault switches to refuse or corrupt individual
//! transaction classes.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use mcp23008_i2c::{I2cBus, Register};

pub const IODIR: u8 = Register::Iodir as u8;
pub const GPPU: u8 = Register::Gppu as u8;
pub const IPOL: u8 = Register::Ipol as u8;
pub const GPIO: u8 = Register::Gpio as u8;
pub const OLAT: u8 = Register::Olat as u8;

/// One bus call as the simulator saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    SetAddress(u8),
    /// Full buffer of a write call (1-byte register select or 2-byte
    /// register write).
    Write(Vec<u8>),
    /// Register a read call returned from.
    Read(u8),
    Close,
}

/// Register file, traffic log, and fault switches of the simulated chip.
#[derive(Debug, Default)]
pub struct SimState {
    pub regs: [u8; 11],
    pub selected: u8,
    pub log: Vec<Op>,

    /// Refuse the address select during construction.
    pub fail_set_address: bool,
    /// Fail the next N 2-byte register writes with an I/O error.
    pub fail_writes: u32,
    /// Short-count the next N 2-byte register writes.
    pub short_writes: u32,
    /// Fail the next N 1-byte register selects with an I/O error.
    pub fail_reg_selects: u32,
    /// Fail the next N reads with an I/O error.
    pub fail_reads: u32,
    /// Short-count the next N reads.
    pub short_reads: u32,
    /// GPIO always reads back this value, whatever was written.
    pub stuck_port: Option<u8>,
    /// Invert the next N GPIO reads.
    pub dirty_reads: u32,
    /// Refuse the close call.
    pub fail_close: bool,
}

impl SimState {
    fn store(&mut self, reg: u8, value: u8) {
        if let Some(slot) = self.regs.get_mut(usize::from(reg)) {
            *slot = value;
        }
        // Output pins echo the latch while IODIR has them as outputs.
        if reg == OLAT {
            let outputs = !self.regs[usize::from(IODIR)];
            let gpio = &mut self.regs[usize::from(GPIO)];
            *gpio = (*gpio & !outputs) | (value & outputs);
        }
    }

    fn load(&mut self, reg: u8) -> u8 {
        if reg == GPIO {
            if let Some(stuck) = self.stuck_port {
                return stuck;
            }
            if self.dirty_reads > 0 {
                self.dirty_reads -= 1;
                return !self.regs[usize::from(GPIO)];
            }
        }
        self.regs.get(usize::from(reg)).copied().unwrap_or(0)
    }

    /// Values of every 2-byte write that targeted `reg`, in order.
    pub fn reg_writes(&self, reg: u8) -> Vec<u8> {
        self.log
            .iter()
            .filter_map(|op| match op {
                Op::Write(b) if b.len() == 2 && b[0] == reg => Some(b[1]),
                _ => None,
            })
            .collect()
    }

    /// How many reads returned from `reg`.
    pub fn reads_of(&self, reg: u8) -> usize {
        self.log
            .iter()
            .filter(|op| matches!(op, Op::Read(r) if *r == reg))
            .count()
    }

    /// Total bus calls of any kind.
    pub fn bus_ops(&self) -> usize {
        self.log.len()
    }
}

/// Simulated bus handle. Clone the shared state out with
/// [`SimBus::state`] before handing the bus to the device.
#[derive(Debug)]
pub struct SimBus {
    state: Rc<RefCell<SimState>>,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(SimState::default())),
        }
    }

    /// Simulator with the port (GPIO and OLAT) preloaded to `initial` and
    /// IODIR at all-outputs.
    pub fn with_port(initial: u8) -> Self {
        let bus = Self::new();
        {
            let mut s = bus.state.borrow_mut();
            s.regs[usize::from(GPIO)] = initial;
            s.regs[usize::from(OLAT)] = initial;
        }
        bus
    }

    pub fn state(&self) -> Rc<RefCell<SimState>> {
        Rc::clone(&self.state)
    }
}

impl I2cBus for SimBus {
    fn set_address(&mut self, addr: u8) -> io::Result<()> {
        let mut s = self.state.borrow_mut();
        s.log.push(Op::SetAddress(addr));
        if s.fail_set_address {
            return Err(io::Error::other("address select refused"));
        }
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let mut s = self.state.borrow_mut();
        s.log.push(Op::Write(bytes.to_vec()));
        match *bytes {
            [reg] => {
                if s.fail_reg_selects > 0 {
                    s.fail_reg_selects -= 1;
                    return Err(io::Error::other("register select refused"));
                }
                s.selected = reg;
                Ok(1)
            }
            [reg, value] => {
                if s.fail_writes > 0 {
                    s.fail_writes -= 1;
                    return Err(io::Error::other("write refused"));
                }
                if s.short_writes > 0 {
                    s.short_writes -= 1;
                    return Ok(1);
                }
                s.store(reg, value);
                // The chip's address pointer follows writes too.
                s.selected = reg;
                Ok(2)
            }
            _ => Err(io::Error::other("unexpected buffer length")),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut s = self.state.borrow_mut();
        let reg = s.selected;
        s.log.push(Op::Read(reg));
        if s.fail_reads > 0 {
            s.fail_reads -= 1;
            return Err(io::Error::other("read refused"));
        }
        if s.short_reads > 0 {
            s.short_reads -= 1;
            return Ok(0);
        }
        let value = s.load(reg);
        if let Some(first) = buf.first_mut() {
            *first = value;
        }
        Ok(buf.len())
    }

    fn close(&mut self) -> io::Result<()> {
        let mut s = self.state.borrow_mut();
        s.log.push(Op::Close);
        if s.fail_close {
            return Err(io::Error::other("close refused"));
        }
        Ok(())
    }
}
