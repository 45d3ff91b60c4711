//! Module: sampler
//!
//! Purpose: The acquisition step driven by the sample clock.
//!
//! ```text
//! SampleClock ──tick──▶ Sampler ──full unit──▶ TransportChannel
//!                          │
//!                          └─ counters ──▶ AcquisitionStatus
//! ```
//!
//! One tick = one pin read. Every 8th tick completes a transport unit
//! and attempts exactly one non-blocking write. A failed write drops
//! that unit on the floor: the transport never applies backpressure to
//! the sampler, timing fidelity is traded against completeness.
//!
//! The hardware sits behind two single-method traits so the tick can
//! be driven on the host by simulated clock ticks.

use crate::packer::SampleAccumulator;
use crate::status::AcquisitionStatus;

/// Instantaneous logic-level source for the monitored pin.
///
/// `read_level` must complete in small bounded time; it is called from
/// the sample clock ISR once per period.
pub trait PinSource {
    fn read_level(&mut self) -> bool;
}

/// The transport rejected a byte (TX FIFO full or driver error).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransportBusy;

/// Byte-oriented serial transport for packed sample units.
pub trait TransportChannel {
    /// Write one unit without blocking. `Err(TransportBusy)` means the
    /// unit was not accepted and will not be retried.
    fn write_unit(&mut self, unit: u8) -> Result<(), TransportBusy>;
}

/// Periodic acquisition state: pin source, transport, and the private
/// bit accumulator.
///
/// Owned by the ISR context exclusively; only the borrowed
/// [`AcquisitionStatus`] is visible to the monitor task.
pub struct Sampler<'a, P: PinSource, T: TransportChannel> {
    pin: P,
    transport: T,
    acc: SampleAccumulator,
    status: &'a AcquisitionStatus,
}

impl<'a, P: PinSource, T: TransportChannel> Sampler<'a, P, T> {
    /// Create a sampler with an empty accumulator.
    pub fn new(pin: P, transport: T, status: &'a AcquisitionStatus) -> Self {
        Self {
            pin,
            transport,
            acc: SampleAccumulator::new(),
            status,
        }
    }

    /// One sample clock period: read the pin, pack the bit, and ship
    /// the unit if one completed.
    ///
    /// On a failed write the unit is discarded and the sticky error
    /// flag is raised; sampling continues with an empty accumulator
    /// either way.
    ///
    /// # Timing
    ///
    /// ISR context. Never blocks, never allocates, no locks; the only
    /// shared-state writes are single atomic instructions.
    #[inline]
    pub fn tick(&mut self) {
        let level = self.pin.read_level();

        if let Some(unit) = self.acc.push(level) {
            match self.transport.write_unit(unit) {
                Ok(()) => self.status.record_unit_sent(),
                Err(TransportBusy) => self.status.record_write_failure(),
            }
        }
    }

    /// Shared counters backing this sampler.
    #[inline]
    pub fn status(&self) -> &'a AcquisitionStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantPin(bool);

    impl PinSource for ConstantPin {
        fn read_level(&mut self) -> bool {
            self.0
        }
    }

    struct RecordingTransport {
        written: std::vec::Vec<u8>,
    }

    impl TransportChannel for &mut RecordingTransport {
        fn write_unit(&mut self, unit: u8) -> Result<(), TransportBusy> {
            self.written.push(unit);
            Ok(())
        }
    }

    #[test]
    fn test_unit_emitted_every_eight_ticks() {
        let status = AcquisitionStatus::new();
        let mut transport = RecordingTransport {
            written: std::vec::Vec::new(),
        };

        let mut sampler = Sampler::new(ConstantPin(true), &mut transport, &status);
        for _ in 0..7 {
            sampler.tick();
        }
        assert_eq!(status.samples_sent(), 0);

        sampler.tick();
        assert_eq!(status.samples_sent(), 8);

        drop(sampler);
        assert_eq!(transport.written, [0xFF]);
    }

    #[test]
    fn test_no_unit_no_write() {
        let status = AcquisitionStatus::new();
        let mut transport = RecordingTransport {
            written: std::vec::Vec::new(),
        };

        let mut sampler = Sampler::new(ConstantPin(false), &mut transport, &status);
        for _ in 0..5 {
            sampler.tick();
        }
        drop(sampler);

        assert!(transport.written.is_empty());
        assert_eq!(status.samples_sent(), 0);
        assert!(!status.take_transport_error());
    }
}
