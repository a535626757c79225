//! Two-wire bus abstractions
//!
//! Provides the trait for the sequencing primitives of a two-wire (I2C)
//! bus driver, to be implemented by platform bindings.

/// Two-wire bus driver
///
/// Models a transaction-oriented bus master: outgoing bytes are queued
/// between [`begin_transmission`](TwoWireBus::begin_transmission) and
/// [`end_transmission`](TwoWireBus::end_transmission), which performs the
/// actual transfer. Incoming bytes are fetched with
/// [`request_from`](TwoWireBus::request_from) and consumed one at a time.
///
/// Implementations decide how bytes are buffered and how the physical
/// transfer is carried out; callers only see the sequencing.
pub trait TwoWireBus {
    /// Error type for bus operations
    type Error;

    /// One-time driver startup
    ///
    /// Must be called once before any transaction. Implementations that
    /// receive an already-configured peripheral may make this a no-op.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Open an outgoing transaction addressed to a device
    ///
    /// Clears any previously queued bytes. Nothing is driven on the bus
    /// until [`end_transmission`](TwoWireBus::end_transmission).
    ///
    /// # Arguments
    /// * `address` - 7-bit device address
    fn begin_transmission(&mut self, address: u8);

    /// Queue one outgoing byte for the open transaction
    fn queue_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Close the open transaction, performing the transfer
    fn end_transmission(&mut self) -> Result<(), Self::Error>;

    /// Request incoming bytes from a device
    ///
    /// Returns the number of bytes the driver granted, which may be less
    /// than `len`. Granted bytes are consumed via
    /// [`read_byte`](TwoWireBus::read_byte).
    ///
    /// # Arguments
    /// * `address` - 7-bit device address
    /// * `len` - Number of bytes requested
    fn request_from(&mut self, address: u8, len: usize) -> Result<usize, Self::Error>;

    /// Number of incoming bytes available to consume
    fn available(&self) -> usize;

    /// Consume the next available incoming byte
    ///
    /// Returns `None` once the bytes delivered by the device are
    /// exhausted, which may be before the requested count is reached.
    fn read_byte(&mut self) -> Option<u8>;
}
