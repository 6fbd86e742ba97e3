//! Bus transport seam.
//!
//! [`I2cBus`] is the contract the driver speaks: bind a target address,
//! move raw bytes with explicit transfer counts, release the handle. The
//! Linux implementation rides the kernel's i2c-dev interface through the
//! `i2cdev` crate; tests substitute an in-memory chip.

use std::io;

/// Byte transport to a single I2C target.
///
/// Transfer counts are reported back so callers can treat a short transfer
/// as a failure in its own right rather than folding it into an I/O error.
pub trait I2cBus {
    /// Binds the handle to a 7-bit target address.
    fn set_address(&mut self, addr: u8) -> io::Result<()>;

    /// Writes `bytes` to the bound target, returning the count transferred.
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize>;

    /// Reads into `buf` from the bound target, returning the count transferred.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Releases the handle. Buses that release on drop can keep the default.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(target_os = "linux")]
pub use linux::LinuxI2cBus;

#[cfg(target_os = "linux")]
mod linux {
    use std::fmt;
    use std::io;
    use std::path::{Path, PathBuf};

    use i2cdev::core::I2CDevice;
    use i2cdev::linux::LinuxI2CDevice;
    use log::trace;

    use super::I2cBus;

    /// [`I2cBus`] over a `/dev/i2c-N` character device.
    pub struct LinuxI2cBus {
        dev: LinuxI2CDevice,
        path: PathBuf,
    }

    impl LinuxI2cBus {
        /// Opens the bus node at `path` and binds `addr` as the initial target.
        pub fn open(path: impl AsRef<Path>, addr: u8) -> io::Result<Self> {
            let path = path.as_ref().to_path_buf();
            trace!(
                "Opening I2C bus {} for target 0x{:02X}",
                path.display(),
                addr
            );
            let dev = LinuxI2CDevice::new(&path, u16::from(addr)).map_err(io::Error::other)?;
            Ok(Self { dev, path })
        }

        /// Path of the underlying bus node.
        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl fmt::Debug for LinuxI2cBus {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("LinuxI2cBus")
                .field("path", &self.path)
                .finish_non_exhaustive()
        }
    }

    impl I2cBus for LinuxI2cBus {
        fn set_address(&mut self, addr: u8) -> io::Result<()> {
            self.dev
                .set_slave_address(u16::from(addr))
                .map_err(io::Error::other)
        }

        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            // i2c-dev transfers are atomic: the whole message moves or the
            // call errors, so a success is always a full count.
            self.dev.write(bytes).map_err(io::Error::other)?;
            Ok(bytes.len())
        }

        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.dev.read(buf).map_err(io::Error::other)?;
            Ok(buf.len())
        }
    }
}
