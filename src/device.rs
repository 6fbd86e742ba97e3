//! Device lifecycle and register-level access for the MCP23008.

use std::fmt;
use std::thread;
use std::time::Duration;

use log::{debug, trace, warn};

use crate::bus::I2cBus;
#[cfg(target_os = "linux")]
use crate::bus::LinuxI2cBus;
use crate::consts::{self, Register};
use crate::error::{Error, ErrorKind, Result};
use crate::report::PinLabels;

#[cfg(target_os = "linux")]
use std::path::Path;

/// Validated 7-bit bus address of an MCP23008 (0x20-0x27).
///
/// The window is fixed by the chip's three address straps; anything outside
/// it is rejected at construction, before any bus traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipAddress(u8);

impl ChipAddress {
    /// Creates a chip address, rejecting values outside the strap window.
    pub fn new(addr: u8) -> Result<Self> {
        if (consts::ADDR_MIN..=consts::ADDR_MAX).contains(&addr) {
            Ok(Self(addr))
        } else {
            Err(Error::AddressOutOfRange { addr })
        }
    }

    /// Raw 7-bit address value.
    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ChipAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// Timing and retry tunables for one expander handle.
///
/// The defaults mirror conservative bring-up values: a 100 µs pause after
/// every register transaction, five write attempts per verified port
/// update, and a one second wait before the single open retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpanderConfig {
    /// Pause inserted after each completed register transaction. Zero
    /// skips the sleep entirely.
    pub settle_delay: Duration,
    /// Maximum write attempts per verified port update. Values below 1
    /// behave as 1.
    pub verify_attempts: u32,
    /// Wait before the single re-attempt when opening the bus node fails.
    pub open_retry_delay: Duration,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            settle_delay: consts::DEFAULT_SETTLE_DELAY,
            verify_attempts: consts::DEFAULT_VERIFY_ATTEMPTS,
            open_retry_delay: consts::DEFAULT_OPEN_RETRY_DELAY,
        }
    }
}

impl ExpanderConfig {
    /// Configuration with no settle pauses and no open-retry wait.
    ///
    /// Suited to simulated buses and tests where pacing only slows things
    /// down. Verification attempts keep their default budget.
    pub fn immediate() -> Self {
        Self {
            settle_delay: Duration::ZERO,
            open_retry_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// A handle to one MCP23008 expander on an I2C bus.
///
/// The handle owns its bus connection. Construction only fails for an
/// address outside the chip's strap window; transport trouble during open
/// instead yields a *degraded* handle whose bus is absent, whose
/// [`last_error`](Self::last_error) names the failure, and whose every
/// operation reports [`Error::NotOpen`] without touching the bus.
pub struct Mcp23008<B> {
    pub(crate) bus: Option<B>,
    pub(crate) address: ChipAddress,
    pub(crate) config: ExpanderConfig,
    pub(crate) labels: PinLabels,
    pub(crate) last_error: Option<ErrorKind>,
}

#[cfg(target_os = "linux")]
impl Mcp23008<LinuxI2cBus> {
    // --- Constructors (Linux i2c-dev) ---

    /// Opens the expander at `address` on the default bus node `/dev/i2c-1`.
    pub fn open(address: u8) -> Result<Self> {
        Self::open_on(consts::DEFAULT_BUS_PATH, address)
    }

    /// Opens the expander at `address` on the bus node at `path`.
    pub fn open_on(path: impl AsRef<Path>, address: u8) -> Result<Self> {
        Self::open_with_config(path, address, ExpanderConfig::default())
    }

    /// Opens with explicit timing configuration.
    ///
    /// A failed first open is re-attempted exactly once after
    /// `config.open_retry_delay`. If the node still cannot be opened the
    /// handle comes back degraded rather than as an error.
    pub fn open_with_config(
        path: impl AsRef<Path>,
        address: u8,
        config: ExpanderConfig,
    ) -> Result<Self> {
        let address = ChipAddress::new(address)?;
        let path = path.as_ref();
        debug!("Opening MCP23008 at {} on {}", address, path.display());

        let attempt = match LinuxI2cBus::open(path, address.value()) {
            Err(first) => {
                warn!(
                    "Open of {} failed ({}); retrying once after {:?}",
                    path.display(),
                    first,
                    config.open_retry_delay
                );
                thread::sleep(config.open_retry_delay);
                LinuxI2cBus::open(path, address.value())
            }
            ok => ok,
        };

        match attempt {
            Ok(bus) => Ok(Self::bind(bus, address, config)),
            Err(source) => {
                let err = Error::OpenFailed {
                    path: path.display().to_string(),
                    source,
                };
                warn!("MCP23008 at {} left degraded: {}", address, err);
                Ok(Self::degraded(address, config, err.kind()))
            }
        }
    }
}

impl<B: I2cBus> Mcp23008<B> {
    // --- Constructors (any transport) ---

    /// Wraps an already opened bus handle.
    ///
    /// This is the transport injection point the Linux constructors use
    /// internally and tests use directly. The degraded-handle policy is
    /// the same as for [`open`](Mcp23008::open): only an out-of-window
    /// address is a construction error.
    pub fn from_bus(bus: B, address: u8) -> Result<Self> {
        Self::from_bus_with_config(bus, address, ExpanderConfig::default())
    }

    /// Wraps an already opened bus handle with explicit configuration.
    pub fn from_bus_with_config(bus: B, address: u8, config: ExpanderConfig) -> Result<Self> {
        let address = ChipAddress::new(address)?;
        Ok(Self::bind(bus, address, config))
    }

    /// Binds the target address. A refused select degrades the handle and
    /// releases the bus.
    fn bind(mut bus: B, address: ChipAddress, config: ExpanderConfig) -> Self {
        match bus.set_address(address.value()) {
            Ok(()) => Self {
                bus: Some(bus),
                address,
                config,
                labels: PinLabels::default(),
                last_error: None,
            },
            Err(source) => {
                let err = Error::AddressSelectFailed {
                    addr: address.value(),
                    source,
                };
                warn!("MCP23008 at {} left degraded: {}", address, err);
                Self::degraded(address, config, err.kind())
            }
        }
    }

    fn degraded(address: ChipAddress, config: ExpanderConfig, kind: ErrorKind) -> Self {
        Self {
            bus: None,
            address,
            config,
            labels: PinLabels::default(),
            last_error: Some(kind),
        }
    }

    /// Replaces the per-pin label table, chainable at construction:
    /// `Mcp23008::open(0x26)?.with_labels(labels)`.
    pub fn with_labels(mut self, labels: PinLabels) -> Self {
        self.labels = labels;
        self
    }

    // --- Accessors ---

    /// The 7-bit address this handle talks to.
    pub fn address(&self) -> ChipAddress {
        self.address
    }

    /// Whether a live bus connection is attached.
    pub fn is_open(&self) -> bool {
        self.bus.is_some()
    }

    /// Class of the most recent failure. Sticky: success never clears it.
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    /// The timing configuration in effect.
    pub fn config(&self) -> ExpanderConfig {
        self.config
    }

    /// Per-pin label table used by [`snapshot`](Mcp23008::snapshot).
    pub fn labels(&self) -> &PinLabels {
        &self.labels
    }

    /// Replaces the per-pin label table.
    pub fn set_labels(&mut self, labels: PinLabels) {
        self.labels = labels;
    }

    // --- Lifecycle ---

    /// Releases the bus handle.
    ///
    /// Closing an already closed (or degraded) handle is a no-op. Dropping
    /// the device also releases the handle; `close` is the path that
    /// reports a release failure.
    pub fn close(&mut self) -> Result<()> {
        match self.bus.take() {
            Some(mut bus) => {
                debug!("Closing MCP23008 at {}", self.address);
                match bus.close() {
                    Ok(()) => Ok(()),
                    Err(source) => Err(self.record(Error::CloseFailed { source })),
                }
            }
            None => Ok(()),
        }
    }

    // --- Register access ---

    /// Writes one register as a single `[register, value]` transaction.
    ///
    /// Low-level escape hatch; the pin operations and the configuration
    /// helpers below are built on it.
    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<()> {
        let reg_addr = u8::from(reg);
        let buf = [reg_addr, value];
        trace!("Writing register 0x{:02X} = 0x{:02X}", reg_addr, value);
        let result = match self.bus_mut()?.write(&buf) {
            Ok(n) if n == buf.len() => Ok(()),
            Ok(n) => Err(Error::ShortWrite {
                reg: reg_addr,
                expected: buf.len(),
                written: n,
            }),
            Err(source) => Err(Error::WriteFailed {
                reg: reg_addr,
                source,
            }),
        };
        match result {
            Ok(()) => {
                self.settle();
                Ok(())
            }
            Err(e) => Err(self.record(e)),
        }
    }

    /// Reads one register: a 1-byte register select followed by a 1-byte
    /// read.
    pub fn read_register(&mut self, reg: Register) -> Result<u8> {
        let reg_addr = u8::from(reg);
        let select = [reg_addr];
        trace!("Selecting register 0x{:02X} for read", reg_addr);
        let selected = match self.bus_mut()?.write(&select) {
            Ok(n) if n == select.len() => Ok(()),
            Ok(n) => Err(Error::ShortWrite {
                reg: reg_addr,
                expected: select.len(),
                written: n,
            }),
            Err(source) => Err(Error::WriteFailed {
                reg: reg_addr,
                source,
            }),
        };
        if let Err(e) = selected {
            return Err(self.record(e));
        }

        let mut buf = [0u8; 1];
        let result = match self.bus_mut()?.read(&mut buf) {
            Ok(n) if n == buf.len() => Ok(buf[0]),
            Ok(n) => Err(Error::ShortRead {
                reg: reg_addr,
                expected: buf.len(),
                read: n,
            }),
            Err(source) => Err(Error::ReadFailed {
                reg: reg_addr,
                source,
            }),
        };
        match result {
            Ok(value) => {
                trace!("Read register 0x{:02X} = 0x{:02X}", reg_addr, value);
                self.settle();
                Ok(value)
            }
            Err(e) => Err(self.record(e)),
        }
    }

    /// Samples all eight pins in one GPIO register read.
    pub fn read_port(&mut self) -> Result<u8> {
        self.read_register(Register::Gpio)
    }

    /// Drives the whole port: all pins become outputs, then `pattern` goes
    /// onto the output latches.
    ///
    /// This is the raw two-phase write with no readback verification; the
    /// pin operations layer the bounded verify loop on top.
    pub fn write_port(&mut self, pattern: u8) -> Result<()> {
        debug!("Writing port pattern 0x{:02X} on {}", pattern, self.address);
        self.write_register(Register::Iodir, 0x00)?;
        self.write_register(Register::Olat, pattern)
    }

    /// Enables the internal 100 kΩ pull-ups for the pins set in `mask`.
    pub fn set_pullups(&mut self, mask: u8) -> Result<()> {
        debug!("Setting pull-up mask 0x{:02X} on {}", mask, self.address);
        self.write_register(Register::Gppu, mask)
    }

    /// Inverts input polarity for the pins set in `mask`.
    pub fn set_polarity(&mut self, mask: u8) -> Result<()> {
        debug!("Setting polarity mask 0x{:02X} on {}", mask, self.address);
        self.write_register(Register::Ipol, mask)
    }

    // --- Internals ---

    /// Notes the failure class in the sticky diagnostic and hands the
    /// error back for propagation.
    pub(crate) fn record(&mut self, err: Error) -> Error {
        self.last_error = Some(err.kind());
        err
    }

    fn bus_mut(&mut self) -> Result<&mut B> {
        match self.bus {
            Some(ref mut bus) => Ok(bus),
            None => {
                self.last_error = Some(ErrorKind::NotOpen);
                Err(Error::NotOpen)
            }
        }
    }

    fn settle(&self) {
        if !self.config.settle_delay.is_zero() {
            thread::sleep(self.config.settle_delay);
        }
    }
}

impl<B> fmt::Debug for Mcp23008<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mcp23008")
            .field("address", &self.address)
            .field("open", &self.bus.is_some())
            .field("last_error", &self.last_error)
            .finish()
    }
}
