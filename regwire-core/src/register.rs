//! Register-oriented bus access
//!
//! Implements the register-pointer convention used by register-addressed
//! two-wire peripherals: a write transaction selects the register, then a
//! second phase reads or writes data starting at that register.

use embedded_hal::delay::DelayNs;
use regwire_hal::TwoWireBus;

use crate::config::{RegisterBusConfig, ShortReadPolicy};

/// Errors from register bus operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The device supplied fewer bytes than requested
    ShortRead {
        /// Bytes requested
        requested: usize,
        /// Bytes actually observed
        read: usize,
    },
    /// Underlying bus driver failure
    Bus(E),
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Bus(e)
    }
}

/// Register-oriented adapter over a two-wire bus driver
///
/// Owns the bus handle and a delay provider. Each operation is one or
/// two complete bus transactions; no state is carried between calls
/// besides the one-time [`init`](RegisterBus::init).
pub struct RegisterBus<B, D> {
    bus: B,
    delay: D,
    config: RegisterBusConfig,
}

impl<B: TwoWireBus, D: DelayNs> RegisterBus<B, D> {
    /// Create a new register bus with the given configuration
    pub fn new(bus: B, delay: D, config: RegisterBusConfig) -> Self {
        Self { bus, delay, config }
    }

    /// Prepare the bus driver for use
    ///
    /// Call once before any other operation.
    pub fn init(&mut self) -> Result<(), Error<B::Error>> {
        match self.bus.init() {
            Ok(()) => Ok(()),
            Err(e) if self.config.strict => Err(Error::Bus(e)),
            Err(_) => Ok(()),
        }
    }

    /// Read consecutive registers starting at `reg` into `buf`
    ///
    /// Writes the register pointer, waits the settle delay, then requests
    /// `buf.len()` bytes and consumes whatever the device delivers, in
    /// order, from index 0. Returns the number of bytes actually
    /// observed; the configured [`ShortReadPolicy`] decides what happens
    /// to the tail when that is fewer than requested.
    pub fn read_block(
        &mut self,
        device: u8,
        reg: u8,
        buf: &mut [u8],
    ) -> Result<usize, Error<B::Error>> {
        self.set_register_pointer(device, reg)?;
        self.delay.delay_us(self.config.settle_us);

        if let Err(e) = self.bus.request_from(device, buf.len()) {
            if self.config.strict {
                return Err(Error::Bus(e));
            }
        }

        let mut read = 0;
        while read < buf.len() && self.bus.available() > 0 {
            if let Some(byte) = self.bus.read_byte() {
                buf[read] = byte;
                read += 1;
            } else {
                break;
            }
        }

        if read < buf.len() {
            match self.config.short_read {
                ShortReadPolicy::Fail => {
                    return Err(Error::ShortRead {
                        requested: buf.len(),
                        read,
                    });
                }
                ShortReadPolicy::ZeroFill => buf[read..].fill(0),
                ShortReadPolicy::LeaveStale => {}
            }
        }
        Ok(read)
    }

    /// Read a single register
    ///
    /// A missing byte is always reported as a short read, regardless of
    /// the configured policy; there is no partial success for one byte.
    pub fn read_byte(&mut self, device: u8, reg: u8) -> Result<u8, Error<B::Error>> {
        let mut buf = [0u8; 1];
        match self.read_block(device, reg, &mut buf) {
            Ok(1) => Ok(buf[0]),
            Ok(read) => Err(Error::ShortRead { requested: 1, read }),
            Err(e) => Err(e),
        }
    }

    /// Write one byte to a register
    ///
    /// A single transaction carrying exactly two payload bytes, the
    /// register address followed by the value. No settle delay.
    pub fn write_byte(&mut self, device: u8, reg: u8, value: u8) -> Result<(), Error<B::Error>> {
        self.bus.begin_transmission(device);
        self.queue(reg)?;
        self.queue(value)?;
        self.close()
    }

    /// Write consecutive bytes starting at register `reg`
    ///
    /// Emits the register address followed by every value in order, with
    /// a settle delay before each value. An empty slice emits only the
    /// register address.
    pub fn write_block(
        &mut self,
        device: u8,
        reg: u8,
        values: &[u8],
    ) -> Result<(), Error<B::Error>> {
        self.bus.begin_transmission(device);
        self.queue(reg)?;
        for &value in values {
            self.delay.delay_us(self.config.settle_us);
            self.queue(value)?;
        }
        self.close()
    }

    /// Get access to the underlying bus driver
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Get mutable access to the underlying bus driver
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Get the active configuration
    pub fn config(&self) -> &RegisterBusConfig {
        &self.config
    }

    /// Release the underlying bus driver and delay provider
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    // Register-pointer phase: its own transaction, closed before the
    // data phase begins.
    fn set_register_pointer(&mut self, device: u8, reg: u8) -> Result<(), Error<B::Error>> {
        self.bus.begin_transmission(device);
        self.queue(reg)?;
        self.close()
    }

    fn queue(&mut self, byte: u8) -> Result<(), Error<B::Error>> {
        match self.bus.queue_byte(byte) {
            Ok(()) => Ok(()),
            Err(e) if self.config.strict => Err(Error::Bus(e)),
            Err(_) => Ok(()),
        }
    }

    fn close(&mut self) -> Result<(), Error<B::Error>> {
        match self.bus.end_transmission() {
            Ok(()) => Ok(()),
            Err(e) if self.config.strict => Err(Error::Bus(e)),
            Err(_) => Ok(()),
        }
    }
}
