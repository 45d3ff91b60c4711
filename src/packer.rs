//! Module: packer
//!
//! Purpose: Pack 8 consecutive pin samples into one transport unit.
//!
//! The accumulator is exclusively owned by the acquisition tick and
//! never shared; it holds strictly fewer than 8 bits between ticks.
//! Packing is MSB-first over time: the earliest sample of a group ends
//! up in the most significant bit of the emitted byte.
//!
//! Safety: Safe. No unsafe blocks, no allocation.

/// Accumulates sampled bits until a full transport unit is ready.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleAccumulator {
    bits: u8,
    count: u8,
}

impl SampleAccumulator {
    /// Create an empty accumulator.
    pub const fn new() -> Self {
        Self { bits: 0, count: 0 }
    }

    /// Shift one sampled level into the accumulator.
    ///
    /// Returns the completed byte once every 8th call; the accumulator
    /// is empty again when it does. Between completions it returns
    /// `None` and an incomplete group is never observable outside.
    ///
    /// # Timing
    ///
    /// O(1), branch + shift. Called from ISR context.
    #[inline]
    pub fn push(&mut self, level: bool) -> Option<u8> {
        self.bits = (self.bits << 1) | level as u8;
        self.count += 1;

        if self.count == 8 {
            let unit = self.bits;
            self.bits = 0;
            self.count = 0;
            Some(unit)
        } else {
            None
        }
    }

    /// Number of bits currently pending (always < 8).
    #[inline]
    pub fn pending(&self) -> u8 {
        self.count
    }

    /// True when no partial group is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for SampleAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
