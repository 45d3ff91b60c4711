//! # rust-signal-reader
//!
//! Real-time acquisition front-end: read one pin at a fixed rate, pack
//! 8 samples per byte, stream the bytes over UART. Best-effort
//! delivery, never blocking the sampler.
//!
//! ## Architecture
//!
//! ```text
//! SampleClock ──▶ Sampler ──▶ TransportChannel ──▶ host
//!  (ISR, 1/rate)    │
//!                   └─ AcquisitionStatus ◀── DriftMonitor (task, 500 ms)
//! ```
//!
//! The modules here are hardware-free and host-testable; everything
//! that touches ESP-IDF lives behind the [`sampler::PinSource`] /
//! [`sampler::TransportChannel`] seams in the firmware binary.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod logging;
pub mod monitor;
pub mod packer;
pub mod sampler;
pub mod status;

pub use config::{SamplerConfig, CONFIG};
pub use monitor::{DriftMonitor, HealthReport};
pub use packer::SampleAccumulator;
pub use sampler::{PinSource, Sampler, TransportBusy, TransportChannel};
pub use status::AcquisitionStatus;
