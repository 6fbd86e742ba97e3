use std::io;
use thiserror::Error;

/// Errors that can occur when driving an MCP23008 expander.
///
/// Transport-level failures carry the register involved and the underlying
/// I/O error; protocol-level failures carry the values that tripped them.
/// Every failure is also classified into an [`ErrorKind`] and recorded in
/// the device's sticky last-error diagnostic.
#[derive(Error, Debug)]
pub enum Error {
    /// 7-bit chip address outside the MCP23008 strap window.
    #[error("I2C address 0x{addr:02X} is outside the MCP23008 range 0x20-0x27")]
    AddressOutOfRange {
        /// The address that was requested.
        addr: u8,
    },
    /// Pin index outside the chip's single 8-bit port.
    #[error("GPIO pin {pin} argument out of range (0-7)")]
    PinOutOfRange {
        /// The invalid pin index that was specified.
        pin: u8,
    },
    /// Opening the i2c-dev node failed, including the single delayed retry.
    #[error("Failed to open I2C bus '{path}': {source}")]
    OpenFailed {
        /// Path of the bus node that could not be opened.
        path: String,
        /// I/O error from the final open attempt.
        #[source]
        source: io::Error,
    },
    /// Binding the bus handle to the chip's address failed.
    #[error("Failed to select I2C target 0x{addr:02X}: {source}")]
    AddressSelectFailed {
        /// The 7-bit address that could not be selected.
        addr: u8,
        /// I/O error from the address-select operation.
        #[source]
        source: io::Error,
    },
    /// Transport error while writing a register.
    #[error("Write to register 0x{reg:02X} failed: {source}")]
    WriteFailed {
        /// Register the write was directed at.
        reg: u8,
        /// I/O error reported by the bus.
        #[source]
        source: io::Error,
    },
    /// A register write transferred fewer bytes than requested.
    #[error("Write to register 0x{reg:02X} transferred {written} of {expected} bytes")]
    ShortWrite {
        /// Register the write was directed at.
        reg: u8,
        /// Bytes the transaction should have moved.
        expected: usize,
        /// Bytes the bus reported as written.
        written: usize,
    },
    /// Transport error while reading a register.
    #[error("Read of register 0x{reg:02X} failed: {source}")]
    ReadFailed {
        /// Register the read was directed at.
        reg: u8,
        /// I/O error reported by the bus.
        #[source]
        source: io::Error,
    },
    /// A register read transferred fewer bytes than requested.
    #[error("Read of register 0x{reg:02X} transferred {read} of {expected} bytes")]
    ShortRead {
        /// Register the read was directed at.
        reg: u8,
        /// Bytes the transaction should have moved.
        expected: usize,
        /// Bytes the bus reported as read.
        read: usize,
    },
    /// The port never read back the written pattern within the attempt budget.
    #[error(
        "Port write verification failed after {attempts} attempts: wrote 0x{expected:02X}, last readback 0x{observed:02X}"
    )]
    VerifyFailed {
        /// Pattern the port was driven to.
        expected: u8,
        /// Pattern the final readback returned.
        observed: u8,
        /// Write attempts consumed before giving up.
        attempts: u32,
    },
    /// Releasing the bus handle failed.
    #[error("Failed to close I2C bus: {source}")]
    CloseFailed {
        /// I/O error from the close operation.
        #[source]
        source: io::Error,
    },
    /// Operation on a device whose bus connection is absent.
    ///
    /// Raised when the device was closed, or when `open` degraded because
    /// the bus node could not be opened or the target address not selected.
    #[error("No bus connection (device closed or open degraded)")]
    NotOpen,
}

/// Coarse error classes mirrored into the device's last-error diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Chip address outside 0x20-0x27.
    InvalidAddress,
    /// Pin index outside 0-7.
    InvalidPin,
    /// Bus node open failure.
    Open,
    /// Target address selection failure.
    AddressSelect,
    /// Register write failure or short count.
    Write,
    /// Register read failure or short count.
    Read,
    /// Readback verification exhausted its attempts.
    Verify,
    /// Bus handle release failure.
    Close,
    /// Operation attempted without a bus connection.
    NotOpen,
}

impl Error {
    /// Classifies this error for the sticky last-error diagnostic.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AddressOutOfRange { .. } => ErrorKind::InvalidAddress,
            Error::PinOutOfRange { .. } => ErrorKind::InvalidPin,
            Error::OpenFailed { .. } => ErrorKind::Open,
            Error::AddressSelectFailed { .. } => ErrorKind::AddressSelect,
            Error::WriteFailed { .. } | Error::ShortWrite { .. } => ErrorKind::Write,
            Error::ReadFailed { .. } | Error::ShortRead { .. } => ErrorKind::Read,
            Error::VerifyFailed { .. } => ErrorKind::Verify,
            Error::CloseFailed { .. } => ErrorKind::Close,
            Error::NotOpen => ErrorKind::NotOpen,
        }
    }
}

/// Result type alias for expander operations.
///
/// This is a convenience alias for `std::result::Result<T, Error>` used
/// throughout the crate to reduce boilerplate.
pub type Result<T> = std::result::Result<T, Error>;
