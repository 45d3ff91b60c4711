//! Module: status
//!
//! Purpose: Shared acquisition counters crossing the ISR/task boundary.
//!
//! ```text
//! Sample ISR               AcquisitionStatus           Monitor task
//! ──────────               ─────────────────           ────────────
//!
//! record_unit_sent() ────▶ samples_sent      ────────▶ samples_sent()
//! record_write_failure() ▶ transport_error   ────────▶ take_transport_error()
//!                          transport_error_count ────▶ transport_error_count()
//! ```
//!
//! Each field has exactly one writer (the ISR) and one reader (the
//! monitor); the clear of the sticky flag is the monitor's only write.
//! All operations are wait-free single atomic instructions, so the ISR
//! side never blocks and the monitor never observes a torn counter.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use portable_atomic::AtomicU64;

/// Counters shared between the acquisition ISR and the health monitor.
///
/// Const-constructible so it can live in a `static` for the process
/// lifetime; nothing here is ever destroyed.
pub struct AcquisitionStatus {
    /// Samples successfully handed to the transport. Monotone,
    /// incremented by 8 per written unit, single writer (ISR).
    samples_sent: AtomicU64,

    /// Sticky transport failure flag. Set by the ISR on a failed
    /// write, observed-and-cleared by the monitor.
    transport_error: AtomicBool,

    /// Total failed writes since boot (never cleared).
    transport_error_count: AtomicU32,
}

impl AcquisitionStatus {
    /// Create a zeroed status block.
    pub const fn new() -> Self {
        Self {
            samples_sent: AtomicU64::new(0),
            transport_error: AtomicBool::new(false),
            transport_error_count: AtomicU32::new(0),
        }
    }

    /// Record one successfully written transport unit (8 samples).
    ///
    /// ISR side. Wait-free.
    #[inline]
    pub fn record_unit_sent(&self) {
        self.samples_sent.fetch_add(8, Ordering::Release);
    }

    /// Record a failed transport write.
    ///
    /// ISR side. Sets the sticky flag and bumps the lifetime count.
    #[inline]
    pub fn record_write_failure(&self) {
        self.transport_error_count.fetch_add(1, Ordering::Relaxed);
        self.transport_error.store(true, Ordering::Release);
    }

    /// Total samples successfully transported so far.
    #[inline]
    pub fn samples_sent(&self) -> u64 {
        self.samples_sent.load(Ordering::Acquire)
    }

    /// Observe and clear the sticky transport error flag.
    ///
    /// Returns `true` at most once per failure window: a second call
    /// without an intervening failure returns `false`.
    #[inline]
    pub fn take_transport_error(&self) -> bool {
        self.transport_error.swap(false, Ordering::AcqRel)
    }

    /// Lifetime count of failed writes (survives flag clears).
    #[inline]
    pub fn transport_error_count(&self) -> u32 {
        self.transport_error_count.load(Ordering::Relaxed)
    }
}

impl Default for AcquisitionStatus {
    fn default() -> Self {
        Self::new()
    }
}
