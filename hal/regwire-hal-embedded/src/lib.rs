//! embedded-hal binding for the Regwire bus trait
//!
//! Implements [`regwire_hal::TwoWireBus`] on top of any blocking
//! [`embedded_hal::i2c::I2c`] peripheral, so platform HALs that expose
//! the standard I2C trait can drive register-oriented devices through
//! `regwire-core`.

#![no_std]
#![deny(unsafe_code)]

pub mod bus;

pub use bus::{EmbeddedTwoWire, TwoWireError};
