//! Regwire Hardware Abstraction Layer
//!
//! This crate defines the bus driver trait that chip-specific or
//! platform-generic implementations provide. This enables the same
//! register-access code to run on different hardware platforms or
//! against a simulated bus in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Register access (regwire-core)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  regwire-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ regwire-hal-  │       │  test mocks   │
//! │   embedded    │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::TwoWireBus`] - Two-wire bus sequencing primitives

#![no_std]
#![deny(unsafe_code)]

pub mod bus;

// Re-export key traits at crate root for convenience
pub use bus::TwoWireBus;
