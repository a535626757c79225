//! Two-wire bus over an embedded-hal I2C peripheral
//!
//! Queued bytes are held in a fixed-capacity buffer and flushed as a
//! single write transaction when the caller closes the transaction.
//! Read requests are performed eagerly and drained byte by byte.

use embedded_hal::i2c::I2c;
use heapless::Vec;
use regwire_hal::TwoWireBus;

/// Error from the embedded-hal bus binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TwoWireError<E> {
    /// More bytes queued or requested than the fixed buffers hold
    Overflow,
    /// Underlying I2C peripheral failure
    Peripheral(E),
}

/// Two-wire bus backed by an embedded-hal I2C peripheral
///
/// `N` is the capacity of the outgoing and incoming buffers and must
/// cover the largest transaction the caller issues (register address
/// plus payload).
pub struct EmbeddedTwoWire<I2C, const N: usize = 32> {
    i2c: I2C,
    address: u8,
    tx: Vec<u8, N>,
    rx: Vec<u8, N>,
    cursor: usize,
}

impl<I2C: I2c, const N: usize> EmbeddedTwoWire<I2C, N> {
    /// Wrap an already-configured I2C peripheral
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: 0,
            tx: Vec::new(),
            rx: Vec::new(),
            cursor: 0,
        }
    }

    /// Release the underlying peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c, const N: usize> TwoWireBus for EmbeddedTwoWire<I2C, N> {
    type Error = TwoWireError<I2C::Error>;

    fn init(&mut self) -> Result<(), Self::Error> {
        // The peripheral arrives configured by the platform HAL.
        Ok(())
    }

    fn begin_transmission(&mut self, address: u8) {
        self.address = address;
        self.tx.clear();
    }

    fn queue_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.tx.push(byte).map_err(|_| TwoWireError::Overflow)
    }

    fn end_transmission(&mut self) -> Result<(), Self::Error> {
        let result = self
            .i2c
            .write(self.address, &self.tx)
            .map_err(TwoWireError::Peripheral);
        self.tx.clear();
        result
    }

    fn request_from(&mut self, address: u8, len: usize) -> Result<usize, Self::Error> {
        self.rx.clear();
        self.cursor = 0;
        if len == 0 {
            return Ok(0);
        }
        self.rx.resize(len, 0).map_err(|()| TwoWireError::Overflow)?;
        if let Err(e) = self.i2c.read(address, &mut self.rx) {
            self.rx.clear();
            return Err(TwoWireError::Peripheral(e));
        }
        Ok(len)
    }

    fn available(&self) -> usize {
        self.rx.len() - self.cursor
    }

    fn read_byte(&mut self) -> Option<u8> {
        let byte = self.rx.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockI2cError(ErrorKind);

    impl embedded_hal::i2c::Error for MockI2cError {
        fn kind(&self) -> ErrorKind {
            self.0
        }
    }

    // Scripted I2C peripheral: records writes, serves reads from a
    // canned response.
    #[derive(Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8, 32>), 8>,
        reads: Vec<(u8, usize), 8>,
        response: Vec<u8, 32>,
        fail: Option<ErrorKind>,
    }

    impl ErrorType for MockI2c {
        type Error = MockI2cError;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if let Some(kind) = self.fail {
                return Err(MockI2cError(kind));
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        let mut copy = Vec::new();
                        copy.extend_from_slice(bytes).unwrap();
                        self.writes.push((address, copy)).unwrap();
                    }
                    Operation::Read(buf) => {
                        self.reads.push((address, buf.len())).unwrap();
                        for (slot, byte) in buf.iter_mut().zip(self.response.iter()) {
                            *slot = *byte;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_transaction_flushes_queued_bytes_once() {
        let mut wire: EmbeddedTwoWire<MockI2c> = EmbeddedTwoWire::new(MockI2c::default());
        wire.begin_transmission(0x3C);
        wire.queue_byte(0x00).unwrap();
        wire.queue_byte(0xAE).unwrap();
        wire.end_transmission().unwrap();

        let i2c = wire.release();
        assert_eq!(i2c.writes.len(), 1);
        let (address, bytes) = &i2c.writes[0];
        assert_eq!(*address, 0x3C);
        assert_eq!(bytes.as_slice(), &[0x00, 0xAE]);
        assert!(i2c.reads.is_empty());
    }

    #[test]
    fn test_begin_discards_stale_queue() {
        let mut wire: EmbeddedTwoWire<MockI2c> = EmbeddedTwoWire::new(MockI2c::default());
        wire.begin_transmission(0x3C);
        wire.queue_byte(0xAA).unwrap();
        // Abandoned transaction; a new one starts clean.
        wire.begin_transmission(0x3D);
        wire.queue_byte(0xBB).unwrap();
        wire.end_transmission().unwrap();

        let i2c = wire.release();
        assert_eq!(i2c.writes.len(), 1);
        let (address, bytes) = &i2c.writes[0];
        assert_eq!(*address, 0x3D);
        assert_eq!(bytes.as_slice(), &[0xBB]);
    }

    #[test]
    fn test_request_then_drain() {
        let mut i2c = MockI2c::default();
        i2c.response.extend_from_slice(&[1, 2, 3]).unwrap();
        let mut wire: EmbeddedTwoWire<MockI2c> = EmbeddedTwoWire::new(i2c);

        assert_eq!(wire.request_from(0x3C, 3).unwrap(), 3);
        assert_eq!(wire.available(), 3);
        assert_eq!(wire.read_byte(), Some(1));
        assert_eq!(wire.read_byte(), Some(2));
        assert_eq!(wire.read_byte(), Some(3));
        assert_eq!(wire.read_byte(), None);
        assert_eq!(wire.available(), 0);

        let i2c = wire.release();
        assert_eq!(i2c.reads.as_slice(), &[(0x3C, 3)]);
    }

    #[test]
    fn test_request_resets_previous_drain() {
        let mut i2c = MockI2c::default();
        i2c.response.extend_from_slice(&[7, 8]).unwrap();
        let mut wire: EmbeddedTwoWire<MockI2c> = EmbeddedTwoWire::new(i2c);

        wire.request_from(0x3C, 2).unwrap();
        assert_eq!(wire.read_byte(), Some(7));
        wire.request_from(0x3C, 2).unwrap();
        assert_eq!(wire.available(), 2);
        assert_eq!(wire.read_byte(), Some(7));
    }

    #[test]
    fn test_empty_request_touches_nothing() {
        let mut wire: EmbeddedTwoWire<MockI2c> = EmbeddedTwoWire::new(MockI2c::default());
        assert_eq!(wire.request_from(0x3C, 0).unwrap(), 0);
        assert_eq!(wire.available(), 0);
        assert_eq!(wire.read_byte(), None);

        let i2c = wire.release();
        assert!(i2c.reads.is_empty());
    }

    #[test]
    fn test_queue_overflow_reported() {
        let mut wire: EmbeddedTwoWire<MockI2c, 2> = EmbeddedTwoWire::new(MockI2c::default());
        wire.begin_transmission(0x3C);
        wire.queue_byte(1).unwrap();
        wire.queue_byte(2).unwrap();
        assert_eq!(wire.queue_byte(3), Err(TwoWireError::Overflow));
    }

    #[test]
    fn test_request_overflow_reported() {
        let mut wire: EmbeddedTwoWire<MockI2c, 2> = EmbeddedTwoWire::new(MockI2c::default());
        assert_eq!(wire.request_from(0x3C, 3), Err(TwoWireError::Overflow));
    }

    #[test]
    fn test_peripheral_error_surfaced() {
        let mut i2c = MockI2c::default();
        i2c.fail = Some(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        let mut wire: EmbeddedTwoWire<MockI2c> = EmbeddedTwoWire::new(i2c);

        wire.begin_transmission(0x3C);
        wire.queue_byte(0x00).unwrap();
        assert!(matches!(
            wire.end_transmission(),
            Err(TwoWireError::Peripheral(_))
        ));

        // A failed read leaves nothing to drain.
        assert!(matches!(
            wire.request_from(0x3C, 2),
            Err(TwoWireError::Peripheral(_))
        ));
        assert_eq!(wire.available(), 0);
        assert_eq!(wire.read_byte(), None);
    }
}
