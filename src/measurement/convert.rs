//! Cycle-to-nanosecond conversion.

use super::frequency::{host_frequency, CpuFrequency};
use crate::error::ProbeError;

/// Converts cycle deltas into whole nanoseconds at a fixed frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeConverter {
    frequency: CpuFrequency,
}

impl TimeConverter {
    /// Create a converter for a known frequency.
    pub fn new(frequency: CpuFrequency) -> Self {
        Self { frequency }
    }

    /// Converter for the host's cached nominal frequency.
    pub fn host() -> Result<Self, ProbeError> {
        host_frequency().map(Self::new)
    }

    /// Frequency used for conversion.
    pub fn frequency(&self) -> CpuFrequency {
        self.frequency
    }

    /// `delta / GHz`, truncated toward zero.
    #[inline]
    pub fn cycles_to_ns(&self, delta: u64) -> u64 {
        (delta as f64 / self.frequency.ghz()) as u64
    }
}
