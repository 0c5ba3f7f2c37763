//! # timer-overhead
//!
//! Measure what it costs to ask the machine for the time.
//!
//! Four scenarios run in order:
//! - the overhead of one cycle counter read (`rdtsc`),
//! - the overhead of one `gettimeofday` call, measured with the cycle counter,
//! - the mean and population standard deviation of a 100-addition busy loop
//!   timed 1,000 times with the cycle counter,
//! - the same busy loop timed with `gettimeofday`.
//!
//! Cycle deltas are converted to nanoseconds with the nominal frequency from
//! the `cpu MHz` line of `/proc/cpuinfo`, probed once per process. When no
//! frequency is available the cycle-based scenarios report that explicitly
//! instead of printing zero.
//!
//! ## Quick Start
//!
//! ```no_run
//! use timer_overhead::{Config, Runner};
//!
//! let runner = Runner::new(Config::default());
//! let report = runner.run(&mut std::io::stdout().lock())?;
//! if let Ok(ns) = report.cycle_counter_overhead {
//!     eprintln!("rdtsc costs about {} ns", ns);
//! }
//! # Ok::<(), std::io::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;
mod result;
mod runner;

// Functional modules
pub mod measurement;
pub mod output;
pub mod preflight;
pub mod scenario;
pub mod statistics;

// Re-exports for public API
pub use config::Config;
pub use error::{MeasurementError, ProbeError};
pub use measurement::{CpuFrequency, CycleSource, TimeConverter, WallClock, WallClockTimestamp};
pub use result::Report;
pub use runner::Runner;
pub use statistics::Summary;
