//! The four measurement scenarios.
//!
//! Two overhead measurements bracket a single primitive with cycle counter
//! reads. Two jitter measurements time a fixed busy loop many times, once
//! with the cycle counter and once with the wall clock, and summarize the
//! per-trial durations.

use crate::measurement::{black_box, CycleSource, TimeConverter, WallClock};
use crate::statistics::Summary;

/// Identifies a scenario and the primitive it reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Cost of one cycle counter read.
    CycleCounterOverhead,
    /// Cost of one wall-clock call, seen through the cycle counter.
    WallClockOverhead,
    /// Busy-loop jitter timed with the cycle counter.
    InnerLoopCycles,
    /// Busy-loop jitter timed with the wall clock.
    InnerLoopWallClock,
}

impl Scenario {
    /// All scenarios in run order.
    pub const ALL: [Scenario; 4] = [
        Scenario::CycleCounterOverhead,
        Scenario::WallClockOverhead,
        Scenario::InnerLoopCycles,
        Scenario::InnerLoopWallClock,
    ];

    /// Name of the timing routine as it appears in the report.
    pub fn label(self) -> &'static str {
        match self {
            Scenario::CycleCounterOverhead => "getcycles",
            Scenario::WallClockOverhead => "gettimeofday",
            Scenario::InnerLoopCycles => "gethosttime",
            Scenario::InnerLoopWallClock => "gettimeofday",
        }
    }
}

/// Run `iterations` trivial additions that the optimizer cannot remove.
///
/// Each partial result passes through `black_box`, so every iteration has an
/// observable effect.
#[inline(never)]
pub fn busy_loop(trial: usize, iterations: usize) -> usize {
    let mut k = 0;
    for j in 0..iterations {
        k = black_box(black_box(trial) + j);
    }
    k
}

/// Fill a series of `n` samples, one call of `trial` per index, in order.
pub fn sample_series<F>(n: usize, mut trial: F) -> Vec<i64>
where
    F: FnMut(usize) -> i64,
{
    let mut samples = vec![0i64; n];
    for (i, slot) in samples.iter_mut().enumerate() {
        *slot = trial(i);
    }
    samples
}

/// Cycle counter read cost: read, throwaway read, read.
pub fn measure_cycle_counter_overhead<S: CycleSource>(
    source: &S,
    converter: &TimeConverter,
) -> u64 {
    let start = source.read_cycles();
    black_box(source.read_cycles());
    let end = source.read_cycles();

    let delta = end.saturating_sub(start);
    let ns = converter.cycles_to_ns(delta);
    tracing::debug!(delta, ns, "cycle counter overhead");
    ns
}

/// Wall-clock call cost as seen through the cycle counter.
///
/// The reported value is the converted cycle delta around the call, not a
/// difference of the wall-clock readings.
pub fn measure_wall_clock_overhead<S: CycleSource, C: WallClock>(
    source: &S,
    clock: &C,
    converter: &TimeConverter,
) -> u64 {
    let start = source.read_cycles();
    black_box(clock.now());
    let end = source.read_cycles();

    let delta = end.saturating_sub(start);
    let ns = converter.cycles_to_ns(delta);
    tracing::debug!(delta, ns, "wall clock overhead");
    ns
}

/// Busy-loop durations in nanoseconds, timed with the cycle counter.
pub fn inner_loop_cycle_samples<S: CycleSource>(
    source: &S,
    converter: &TimeConverter,
    samples: usize,
    iterations: usize,
) -> Vec<i64> {
    sample_series(samples, |trial| {
        let start = source.read_cycles();
        black_box(busy_loop(trial, iterations));
        let end = source.read_cycles();

        let ns = converter.cycles_to_ns(end.saturating_sub(start));
        i64::try_from(ns).unwrap_or(i64::MAX)
    })
}

/// Busy-loop durations in nanoseconds, timed with the wall clock.
pub fn inner_loop_wall_clock_samples<C: WallClock>(
    clock: &C,
    samples: usize,
    iterations: usize,
) -> Vec<i64> {
    sample_series(samples, |trial| {
        let start = clock.now();
        black_box(busy_loop(trial, iterations));
        let end = clock.now();

        start.nanos_until(&end)
    })
}

/// Mean and standard deviation of the cycle-counter busy-loop series.
///
/// At least one trial is taken, whatever `samples` says.
pub fn measure_inner_loop_cycles<S: CycleSource>(
    source: &S,
    converter: &TimeConverter,
    samples: usize,
    iterations: usize,
) -> Summary {
    let samples = samples.max(1);
    let series = inner_loop_cycle_samples(source, converter, samples, iterations);
    let summary = Summary::from_samples(&series);
    tracing::debug!(samples, mean = summary.mean, std_dev = summary.std_dev, "inner loop via cycle counter");
    summary
}

/// Mean and standard deviation of the wall-clock busy-loop series.
///
/// At least one trial is taken, whatever `samples` says.
pub fn measure_inner_loop_wall_clock<C: WallClock>(
    clock: &C,
    samples: usize,
    iterations: usize,
) -> Summary {
    let samples = samples.max(1);
    let series = inner_loop_wall_clock_samples(clock, samples, iterations);
    let summary = Summary::from_samples(&series);
    tracing::debug!(samples, mean = summary.mean, std_dev = summary.std_dev, "inner loop via wall clock");
    summary
}
