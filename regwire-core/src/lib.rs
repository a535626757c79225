//! Bus-independent register access logic
//!
//! This crate contains the register-pointer sequencing used by most
//! register-addressed two-wire peripherals, independent of any concrete
//! bus driver:
//!
//! - Register read/write operations ([`register::RegisterBus`])
//! - Adapter configuration ([`config::RegisterBusConfig`])
//!
//! The bus driver is abstracted behind [`regwire_hal::TwoWireBus`]; see
//! `regwire-hal-embedded` for the production binding.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod register;

// Re-export key types at crate root for convenience
pub use config::{RegisterBusConfig, ShortReadPolicy};
pub use register::{Error, RegisterBus};
