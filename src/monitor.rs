//! Module: monitor
//!
//! Purpose: Coarse drift and transport-health observation.
//!
//! Runs in an ordinary scheduled task, far below the sample clock in
//! priority. Each observation compares how many samples wall-clock
//! time demands against how many the ISR actually shipped, and drains
//! the sticky transport error flag. Purely diagnostic: nothing here
//! corrects drift or replays lost units — the operator reacts by
//! lowering the sampling rate or raising the transport baud rate.

use crate::config::US_IN_SECOND;
use crate::status::AcquisitionStatus;

/// One health observation, ready for the diagnostic channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthReport {
    /// Wall-clock time since the sample clock started, in µs.
    pub elapsed_us: u64,

    /// Samples successfully transported so far.
    pub samples_sent: u64,

    /// Samples real time demanded over `elapsed_us`.
    pub expected_samples: u64,

    /// Transport is not keeping up with the sample clock.
    pub falling_behind: bool,

    /// A write failed since the previous observation.
    pub transport_error: bool,

    /// Lifetime count of failed writes.
    pub transport_error_count: u32,
}

impl HealthReport {
    /// Recorded signal duration in whole seconds (derived from the
    /// sample count, not from wall-clock time).
    pub const fn duration_secs(&self, sampling_rate_hz: u32) -> u64 {
        self.samples_sent / sampling_rate_hz as u64
    }
}

/// Compares delivered samples against wall-clock expectation.
pub struct DriftMonitor {
    sampling_rate_hz: u32,
    started_at_us: i64,
}

impl DriftMonitor {
    /// Create a monitor anchored at the instant the sample clock
    /// started.
    pub const fn new(sampling_rate_hz: u32, started_at_us: i64) -> Self {
        Self {
            sampling_rate_hz,
            started_at_us,
        }
    }

    /// Samples that should have been produced `elapsed_us` after start.
    #[inline]
    pub const fn expected_samples(&self, elapsed_us: u64) -> u64 {
        elapsed_us * self.sampling_rate_hz as u64 / US_IN_SECOND
    }

    /// Take one observation.
    ///
    /// Clears the sticky transport error flag as a side effect, so
    /// each failure window is reported exactly once. Repeated
    /// observations with no new samples are idempotent apart from the
    /// advancing clock.
    pub fn observe(&self, now_us: i64, status: &AcquisitionStatus) -> HealthReport {
        let elapsed_us = now_us.saturating_sub(self.started_at_us) as u64;
        let samples_sent = status.samples_sent();
        let expected_samples = self.expected_samples(elapsed_us);

        HealthReport {
            elapsed_us,
            samples_sent,
            expected_samples,
            falling_behind: expected_samples > samples_sent,
            transport_error: status.take_transport_error(),
            transport_error_count: status.transport_error_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_samples_arithmetic() {
        let monitor = DriftMonitor::new(100_000, 0);

        assert_eq!(monitor.expected_samples(0), 0);
        assert_eq!(monitor.expected_samples(10), 1);
        assert_eq!(monitor.expected_samples(US_IN_SECOND), 100_000);
        assert_eq!(monitor.expected_samples(1_500_000), 150_000);
    }

    #[test]
    fn test_falling_behind_iff_expected_exceeds_sent() {
        let status = AcquisitionStatus::new();
        let monitor = DriftMonitor::new(100_000, 0);

        // 1 s elapsed, every tick delivered: 12_500 units = 100_000
        // samples. Exactly on target, no warning.
        for _ in 0..12_500 {
            status.record_unit_sent();
        }
        let report = monitor.observe(1_000_000, &status);
        assert_eq!(report.samples_sent, 100_000);
        assert_eq!(report.expected_samples, 100_000);
        assert!(!report.falling_behind);

        // One more microsecond of wall-clock with nothing delivered
        // leaves expectation ahead only once it crosses a whole sample.
        let report = monitor.observe(1_000_010, &status);
        assert_eq!(report.expected_samples, 100_001);
        assert!(report.falling_behind);
    }

    #[test]
    fn test_start_offset_is_subtracted() {
        let status = AcquisitionStatus::new();
        let monitor = DriftMonitor::new(100_000, 2_000_000);

        let report = monitor.observe(2_000_000, &status);
        assert_eq!(report.elapsed_us, 0);
        assert_eq!(report.expected_samples, 0);
        assert!(!report.falling_behind);
    }

    #[test]
    fn test_transport_error_reported_once() {
        let status = AcquisitionStatus::new();
        let monitor = DriftMonitor::new(100_000, 0);

        status.record_write_failure();

        let first = monitor.observe(100, &status);
        assert!(first.transport_error);
        assert_eq!(first.transport_error_count, 1);

        let second = monitor.observe(200, &status);
        assert!(!second.transport_error);
        assert_eq!(second.transport_error_count, 1);
    }

    #[test]
    fn test_observation_idempotent_without_new_samples() {
        let status = AcquisitionStatus::new();
        let monitor = DriftMonitor::new(8_000, 0);

        status.record_unit_sent();

        let a = monitor.observe(1_000, &status);
        let b = monitor.observe(1_000, &status);
        assert_eq!(a.samples_sent, b.samples_sent);
        assert_eq!(a.falling_behind, b.falling_behind);
    }

    #[test]
    fn test_duration_derived_from_samples() {
        let report = HealthReport {
            elapsed_us: 5_000_000,
            samples_sent: 300_000,
            expected_samples: 500_000,
            falling_behind: true,
            transport_error: false,
            transport_error_count: 0,
        };
        assert_eq!(report.duration_secs(100_000), 3);
    }
}
