//! Console-facing port reporting: per-pin labels and a formatted snapshot.

use std::fmt;

use crate::bus::I2cBus;
use crate::device::{ChipAddress, Mcp23008};
use crate::error::Result;
use crate::gpio::{Level, Pin};

/// Per-pin display names for the console report.
///
/// The table is plain owned data; which labels belong to which chip
/// address is the caller's decision, typically one table per wired board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinLabels {
    names: [Option<String>; 8],
}

impl PinLabels {
    /// An unlabelled table. Unnamed pins render with an empty label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fully named table, one label per pin, lowest pin first.
    pub fn from_names(names: [&str; 8]) -> Self {
        let mut table = Self::default();
        for (slot, name) in table.names.iter_mut().zip(names) {
            *slot = Some(name.to_string());
        }
        table
    }

    /// Names one pin, replacing any previous label.
    pub fn set(&mut self, pin: Pin, name: impl Into<String>) {
        self.names[pin.number() as usize] = Some(name.into());
    }

    /// The label of one pin, if set.
    pub fn get(&self, pin: Pin) -> Option<&str> {
        self.names[pin.number() as usize].as_deref()
    }
}

/// One sampled port state, packaged for console display.
///
/// Produced by [`Mcp23008::snapshot`]. Rendering puts each pin on its own
/// line with its label, lowest pin first:
///
/// ```text
/// ___Expander 0x26_______________
/// RELAY_MAIN GPIO[0] : 1
///  GPIO[1] : 0
/// ...
/// _______________________________
/// ```
#[derive(Debug, Clone)]
pub struct PortSnapshot {
    address: ChipAddress,
    bits: u8,
    labels: PinLabels,
}

impl PortSnapshot {
    /// Address of the expander the snapshot came from.
    pub fn address(&self) -> ChipAddress {
        self.address
    }

    /// Raw port byte the snapshot holds.
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Level of one pin inside the snapshot, without bus traffic.
    pub fn level(&self, pin: Pin) -> Level {
        Level::from(self.bits & pin.mask() != 0)
    }
}

impl fmt::Display for PortSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "___Expander 0x{:02x}_______________",
            self.address.value()
        )?;
        for (i, name) in self.labels.names.iter().enumerate() {
            let label = name.as_deref().unwrap_or("");
            writeln!(f, "{} GPIO[{}] : {}", label, i, (self.bits >> i) & 0x01)?;
        }
        write!(f, "_______________________________")
    }
}

impl<B: I2cBus> Mcp23008<B> {
    /// Samples the port and packages it with the address and label table
    /// for console display.
    pub fn snapshot(&mut self) -> Result<PortSnapshot> {
        let bits = self.read_port()?;
        Ok(PortSnapshot {
            address: self.address,
            bits,
            labels: self.labels.clone(),
        })
    }
}
