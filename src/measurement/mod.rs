//! Timing primitives.
//!
//! This module provides:
//! - Direct cycle counter reads (`rdtsc` / `cntvct_el0`)
//! - The nominal CPU frequency probe and its process-wide cache
//! - Cycle-to-nanosecond conversion
//! - A microsecond wall clock backed by `gettimeofday(2)`
//!
//! # Counter semantics
//!
//! - **x86_64**: `rdtsc`, ticking at the TSC rate. On CPUs with an invariant
//!   TSC this is the nominal frequency, which is what `/proc/cpuinfo` reports
//!   as `cpu MHz` when frequency scaling is pinned.
//! - **aarch64**: `cntvct_el0`, the generic timer. It usually runs far slower
//!   than the core clock (24 MHz on Apple Silicon), so converting it with the
//!   core frequency underestimates durations.

mod convert;
mod frequency;
mod timer;
mod wall_clock;

pub use convert::TimeConverter;
pub use frequency::{
    host_frequency, parse_cpu_mhz, CpuFrequency, FrequencyProbe, ScanError,
    DEFAULT_CPUINFO_PATH,
};
pub use timer::{black_box, counter_name, rdtsc, CycleSource, Tsc};
pub use wall_clock::{SystemWallClock, WallClock, WallClockTimestamp};
