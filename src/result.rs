//! Outcome of a full measurement run.

use crate::error::MeasurementError;
use crate::statistics::Summary;

/// Results of the four scenarios, in run order.
#[derive(Debug, Clone)]
pub struct Report {
    /// Nanoseconds for one cycle counter read.
    pub cycle_counter_overhead: Result<u64, MeasurementError>,

    /// Nanoseconds for one wall-clock call, measured with the cycle counter.
    pub wall_clock_overhead: Result<u64, MeasurementError>,

    /// Busy-loop durations timed with the cycle counter.
    pub inner_loop_cycles: Result<Summary, MeasurementError>,

    /// Busy-loop durations timed with the wall clock.
    ///
    /// Needs no frequency, so it is always available.
    pub inner_loop_wall_clock: Summary,
}

impl Report {
    /// Whether every scenario produced a value.
    pub fn is_complete(&self) -> bool {
        self.cycle_counter_overhead.is_ok()
            && self.wall_clock_overhead.is_ok()
            && self.inner_loop_cycles.is_ok()
    }

    /// The first error any scenario hit, if one did.
    pub fn first_error(&self) -> Option<&MeasurementError> {
        self.cycle_counter_overhead
            .as_ref()
            .err()
            .or(self.wall_clock_overhead.as_ref().err())
            .or(self.inner_loop_cycles.as_ref().err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;

    fn summary() -> Summary {
        Summary { mean: 1.0, std_dev: 0.0 }
    }

    #[test]
    fn test_complete_report() {
        let report = Report {
            cycle_counter_overhead: Ok(0),
            wall_clock_overhead: Ok(0),
            inner_loop_cycles: Ok(summary()),
            inner_loop_wall_clock: summary(),
        };
        assert!(report.is_complete());
        assert!(report.first_error().is_none());
    }

    #[test]
    fn test_zero_differs_from_unavailable() {
        let err: MeasurementError = ProbeError::InvalidFrequency { mhz: 0.0 }.into();
        let report = Report {
            cycle_counter_overhead: Ok(0),
            wall_clock_overhead: Err(err.clone()),
            inner_loop_cycles: Err(err),
            inner_loop_wall_clock: summary(),
        };
        assert!(!report.is_complete());
        assert!(matches!(
            report.first_error(),
            Some(MeasurementError::FrequencyUnavailable(ProbeError::InvalidFrequency { .. }))
        ));
    }
}
