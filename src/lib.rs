//! # mcp23008-i2c
//!
//! A Rust crate for controlling the Microchip MCP23008 8-bit I2C GPIO
//! expander from user space, through the Linux `i2c-dev` character-device
//! interface.
//!
//! This crate uses the `i2cdev` crate for the bus transport on Linux; the
//! driver itself is generic over a small [`I2cBus`] trait, so tests and
//! other platforms can substitute their own transport.
//!
//! ## Features
//!
//! *   Strongly-typed [`Pin`] (0-7) and [`ChipAddress`] (0x20-0x27) with
//!     construction-time validation; invalid values never reach the bus.
//! *   Verified pin writes: every pin mutation drives the port (IODIR to
//!     all-outputs, then the pattern onto OLAT), reads the port back, and
//!     retries up to a bounded attempt budget (5 by default).
//! *   Single-pin operations (`set_pin`, `reset_pin`, `toggle_pin`,
//!     `read_pin`, `write_pin`).
//! *   Whole-port operations (`set_all_pins`, `reset_all_pins`,
//!     `set_only_pin`, `reset_only_pin`, `write_pattern`, `read_port`).
//! *   Pull-up and input-polarity configuration (`set_pullups`,
//!     `set_polarity`).
//! *   Raw register access (`write_register`, `read_register`) over the
//!     full MCP23008 register map.
//! *   Labelled console snapshots of the port state
//!     ([`snapshot`](Mcp23008::snapshot)).
//! *   Timing configuration ([`ExpanderConfig`]): settle pause after each
//!     register transaction, verify attempt budget, open retry delay.
//!
//! ## Degraded handles
//!
//! Construction only fails for an address outside the chip's strap window.
//! When the bus node cannot be opened (after one delayed retry) or the
//! target address cannot be selected, [`Mcp23008::open`] still returns a
//! handle: a *degraded* one with no bus attached. Every operation on it
//! fails fast with [`Error::NotOpen`] and touches no hardware, and
//! [`last_error`](Mcp23008::last_error) names the original failure. This
//! keeps bring-up code linear: open, check
//! [`is_open`](Mcp23008::is_open), report, continue.
//!
//! ## Installation
//!
//! Add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mcp23008-i2c = "0.1.0" # Replace with the latest version
//! log = "0.4"            # Optional, for logging
//! ```
//!
//! On Linux the `i2c-dev` kernel module must be loaded (`modprobe i2c-dev`)
//! and the user needs read/write access to the `/dev/i2c-*` node, typically
//! via membership in the `i2c` group or a udev rule.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use mcp23008_i2c::{Mcp23008, Pin, PinLabels, Result};
//!
//! fn main() -> Result<()> {
//!     // Optional: Initialize logging
//!     // env_logger::init();
//!
//!     // Open the expander at 0x26 on the default bus node /dev/i2c-1.
//!     let mut dev = Mcp23008::open(0x26)?;
//!     if !dev.is_open() {
//!         eprintln!("Bus unavailable: {:?}", dev.last_error());
//!         eprintln!("Is i2c-dev loaded and the wiring correct?");
//!         return Ok(());
//!     }
//!
//!     let pin = Pin::new(3)?;
//!     dev.set_pin(pin)?;
//!     dev.toggle_pin(pin)?;
//!     dev.write_pattern(0b0101_0000)?;
//!
//!     // Label the pins for the console report.
//!     let mut labels = PinLabels::new();
//!     labels.set(pin, "RELAY_MAIN");
//!     dev.set_labels(labels);
//!     println!("{}", dev.snapshot()?);
//!
//!     dev.reset_all_pins()?;
//!     dev.close()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Addressing
//!
//! The MCP23008 straps its three low address bits on the A2:A0 pins, so a
//! bus carries at most eight chips at 0x20 through 0x27. The driver
//! rejects anything outside that window before opening the bus.
//!
//! ## Logging
//!
//! The crate logs through the `log` facade: `trace!` for register-level
//! traffic, `debug!` for operations, `warn!` for readback mismatches,
//! open retries, and degraded handles. Initialize any logger (e.g.
//! `env_logger`) in the binary to see it.

pub mod bus;
mod consts;
mod device;
mod error;
pub mod gpio;
mod report;

pub use bus::I2cBus;
#[cfg(target_os = "linux")]
pub use bus::LinuxI2cBus;
pub use consts::{Register, ADDR_MAX, ADDR_MIN, DEFAULT_BUS_PATH, PIN_COUNT};
pub use device::{ChipAddress, ExpanderConfig, Mcp23008};
pub use error::{Error, ErrorKind, Result};
pub use gpio::{Level, Pin};
pub use report::{PinLabels, PortSnapshot};
