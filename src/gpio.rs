//! Pin types and the verified pin-level write operations.

use log::{debug, warn};

use crate::bus::I2cBus;
use crate::consts::PIN_COUNT;
use crate::device::Mcp23008;
use crate::error::{Error, Result};

/// Logic level of a single pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> bool {
        level == Level::High
    }
}

/// Represents a valid pin index on the expander's single port (0-7).
/// Use `Pin::new(num)` to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pin(u8);

impl Pin {
    /// Creates a new Pin, returning an error if the index is out of range (0-7).
    ///
    /// Validation happens here, before any operation runs, so an invalid
    /// index never reaches the bus.
    pub fn new(pin_num: u8) -> Result<Self> {
        if pin_num < PIN_COUNT {
            Ok(Pin(pin_num))
        } else {
            Err(Error::PinOutOfRange { pin: pin_num })
        }
    }

    /// Returns the underlying pin index (0-7).
    #[inline]
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Returns the bit mask (1 << index) for port operations.
    #[inline]
    pub fn mask(&self) -> u8 {
        1 << self.0
    }
}

impl<B: I2cBus> Mcp23008<B> {
    // --- Pin-level operations ---

    /// Reads the level of one pin from a fresh port sample.
    pub fn read_pin(&mut self, pin: Pin) -> Result<Level> {
        let port = self.read_port()?;
        Ok(Level::from(port & pin.mask() != 0))
    }

    /// Drives one pin to `level`, leaving the others untouched.
    pub fn write_pin(&mut self, pin: Pin, level: Level) -> Result<()> {
        match level {
            Level::High => self.set_pin(pin),
            Level::Low => self.reset_pin(pin),
        }
    }

    /// Drives one pin high, leaving the others untouched.
    pub fn set_pin(&mut self, pin: Pin) -> Result<()> {
        debug!("Setting pin {} on {}", pin.number(), self.address);
        let target = self.read_port()? | pin.mask();
        self.drive_port(target)
    }

    /// Drives one pin low, leaving the others untouched.
    pub fn reset_pin(&mut self, pin: Pin) -> Result<()> {
        debug!("Resetting pin {} on {}", pin.number(), self.address);
        let target = self.read_port()? & !pin.mask();
        self.drive_port(target)
    }

    /// Flips one pin to the opposite of its current level.
    pub fn toggle_pin(&mut self, pin: Pin) -> Result<()> {
        match self.read_pin(pin)? {
            Level::High => self.reset_pin(pin),
            Level::Low => self.set_pin(pin),
        }
    }

    /// Drives every pin high.
    pub fn set_all_pins(&mut self) -> Result<()> {
        debug!("Setting all pins on {}", self.address);
        self.drive_port(0xFF)
    }

    /// Drives every pin low.
    pub fn reset_all_pins(&mut self) -> Result<()> {
        debug!("Resetting all pins on {}", self.address);
        self.drive_port(0x00)
    }

    /// Drives one pin high and every other pin low.
    pub fn set_only_pin(&mut self, pin: Pin) -> Result<()> {
        debug!("Setting only pin {} on {}", pin.number(), self.address);
        self.drive_port(pin.mask())
    }

    /// Drives one pin low and every other pin high.
    pub fn reset_only_pin(&mut self, pin: Pin) -> Result<()> {
        debug!("Resetting only pin {} on {}", pin.number(), self.address);
        self.drive_port(!pin.mask())
    }

    /// Drives the whole port to an arbitrary pattern, verified.
    pub fn write_pattern(&mut self, pattern: u8) -> Result<()> {
        debug!(
            "Writing verified pattern 0x{:02X} on {}",
            pattern, self.address
        );
        self.drive_port(pattern)
    }

    /// Drives the port to `target` and insists on reading it back.
    ///
    /// Each attempt is one full two-phase port write followed by one
    /// readback. Transport failures propagate immediately; only a
    /// mismatched readback consumes another attempt. Exhausting the budget
    /// is an explicit [`Error::VerifyFailed`].
    fn drive_port(&mut self, target: u8) -> Result<()> {
        let attempts = self.config.verify_attempts.max(1);
        let mut observed = 0;
        for attempt in 1..=attempts {
            self.write_port(target)?;
            observed = self.read_port()?;
            if observed == target {
                if attempt > 1 {
                    debug!(
                        "Port converged to 0x{:02X} on attempt {}/{}",
                        target, attempt, attempts
                    );
                }
                return Ok(());
            }
            warn!(
                "Port readback 0x{:02X} != 0x{:02X} (attempt {}/{})",
                observed, target, attempt, attempts
            );
        }
        Err(self.record(Error::VerifyFailed {
            expected: target,
            observed,
            attempts,
        }))
    }
}
