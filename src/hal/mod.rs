//! Hardware Abstraction Layer for the signal reader.
//!
//! Thin wrappers around ESP-IDF peripherals.
//! Acquisition logic stays in the core modules, HAL is just I/O.

pub mod clock;
pub mod pin;
pub mod uart;
