//! Internal constants: chip addressing, register map, and timing defaults.

use std::time::Duration;

// --- Chip addressing ---
/// Lowest 7-bit bus address the MCP23008 can strap to (A2:A0 = 000).
pub const ADDR_MIN: u8 = 0x20;
/// Highest 7-bit bus address the MCP23008 can strap to (A2:A0 = 111).
pub const ADDR_MAX: u8 = 0x27;
/// Number of GPIO pins on the chip's single port.
pub const PIN_COUNT: u8 = 8;

// --- Transport defaults ---
/// i2c-dev node used when no explicit bus path is given.
pub const DEFAULT_BUS_PATH: &str = "/dev/i2c-1";

// --- Timing defaults (see `ExpanderConfig`) ---
/// Pause after each register transaction so the chip can settle.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_micros(100);
/// Bounded write attempts per verified port update.
pub const DEFAULT_VERIFY_ATTEMPTS: u32 = 5;
/// Wait before the single re-attempt when opening the bus node fails.
pub const DEFAULT_OPEN_RETRY_DELAY: Duration = Duration::from_secs(1);

// --- Register map ---
/// MCP23008 register addresses.
///
/// The interrupt-path registers (`GPINTEN` through `INTCAP`) are mapped for
/// completeness and raw access; the driver itself only operates the
/// direction, pull-up, polarity, port, and latch registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// I/O direction: 1 = input, 0 = output. Resets to all inputs.
    Iodir = 0x00,
    /// Input polarity inversion.
    Ipol = 0x01,
    /// Interrupt-on-change enable.
    Gpinten = 0x02,
    /// Default compare byte for interrupt-on-change.
    Defval = 0x03,
    /// Interrupt control: compare against DEFVAL or the previous value.
    Intcon = 0x04,
    /// Chip configuration bits.
    Iocon = 0x05,
    /// Internal 100 kΩ pull-up enable.
    Gppu = 0x06,
    /// Interrupt flags.
    Intf = 0x07,
    /// Port state captured when an interrupt fired.
    Intcap = 0x08,
    /// Port pins; reads sample the pins, writes fall through to OLAT.
    Gpio = 0x09,
    /// Output latches.
    Olat = 0x0A,
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg as u8
    }
}
