//! Runs the four scenarios in order and writes the report.

use std::io::{self, Write};

use crate::config::Config;
use crate::error::{MeasurementError, ProbeError};
use crate::measurement::{
    counter_name, CycleSource, FrequencyProbe, SystemWallClock, TimeConverter, Tsc, WallClock,
};
use crate::output::terminal::{format_inner_loop, format_overhead, SEPARATOR};
use crate::result::Report;
use crate::scenario::{
    measure_cycle_counter_overhead, measure_inner_loop_cycles, measure_inner_loop_wall_clock,
    measure_wall_clock_overhead, Scenario,
};

/// Main entry point for a measurement run.
///
/// # Example
///
/// ```no_run
/// use timer_overhead::{Config, Runner};
///
/// let runner = Runner::new(Config::default());
/// let report = runner.run(&mut std::io::stdout().lock()).unwrap();
/// assert!(report.inner_loop_wall_clock.std_dev >= 0.0);
/// ```
pub struct Runner<S = Tsc, C = SystemWallClock> {
    config: Config,
    converter: Result<TimeConverter, ProbeError>,
    source: S,
    clock: C,
}

impl Runner {
    /// Runner over the hardware counter and the system wall clock.
    ///
    /// The CPU frequency is resolved here, once.
    pub fn new(config: Config) -> Self {
        let converter = resolve_converter(&config);
        Self::with_sources(config, converter, Tsc, SystemWallClock)
    }
}

impl<S: CycleSource, C: WallClock> Runner<S, C> {
    /// Runner over explicit sources and a pre-resolved converter.
    ///
    /// A `samples` of zero set directly on the struct is raised to 1, as
    /// [`Config::samples`] does.
    pub fn with_sources(
        mut config: Config,
        converter: Result<TimeConverter, ProbeError>,
        source: S,
        clock: C,
    ) -> Self {
        config.samples = config.samples.max(1);
        Self {
            config,
            converter,
            source,
            clock,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Converter for cycle deltas, or why there is none.
    pub fn converter(&self) -> Result<&TimeConverter, &ProbeError> {
        self.converter.as_ref()
    }

    /// Run every scenario, writing each section to `out` as it completes.
    ///
    /// A missing CPU frequency makes the cycle-based scenarios unavailable;
    /// it is reported in their lines and in the returned [`Report`], and the
    /// remaining scenarios still run. Only write errors are returned.
    pub fn run<W: Write>(&self, out: &mut W) -> io::Result<Report> {
        tracing::debug!(
            counter = counter_name(),
            samples = self.config.samples,
            inner_loop_iterations = self.config.inner_loop_iterations,
            "starting measurement run"
        );

        let cycle_counter_overhead = self.with_converter(|converter| {
            measure_cycle_counter_overhead(&self.source, converter)
        });
        out.write_all(format_overhead(Scenario::CycleCounterOverhead, &cycle_counter_overhead).as_bytes())?;
        writeln!(out, "{}", SEPARATOR)?;

        let wall_clock_overhead = self.with_converter(|converter| {
            measure_wall_clock_overhead(&self.source, &self.clock, converter)
        });
        out.write_all(format_overhead(Scenario::WallClockOverhead, &wall_clock_overhead).as_bytes())?;
        writeln!(out, "{}", SEPARATOR)?;

        let inner_loop_cycles = self.with_converter(|converter| {
            measure_inner_loop_cycles(
                &self.source,
                converter,
                self.config.samples,
                self.config.inner_loop_iterations,
            )
        });
        out.write_all(format_inner_loop(Scenario::InnerLoopCycles, &inner_loop_cycles).as_bytes())?;
        writeln!(out, "{}", SEPARATOR)?;

        let inner_loop_wall_clock = measure_inner_loop_wall_clock(
            &self.clock,
            self.config.samples,
            self.config.inner_loop_iterations,
        );
        out.write_all(
            format_inner_loop(Scenario::InnerLoopWallClock, &Ok(inner_loop_wall_clock)).as_bytes(),
        )?;
        out.flush()?;

        Ok(Report {
            cycle_counter_overhead,
            wall_clock_overhead,
            inner_loop_cycles,
            inner_loop_wall_clock,
        })
    }

    fn with_converter<T>(
        &self,
        measure: impl FnOnce(&TimeConverter) -> T,
    ) -> Result<T, MeasurementError> {
        match &self.converter {
            Ok(converter) => Ok(measure(converter)),
            Err(e) => Err(MeasurementError::from(e.clone())),
        }
    }
}

/// Resolve the frequency for `config`: cached for the host file, probed once otherwise.
fn resolve_converter(config: &Config) -> Result<TimeConverter, ProbeError> {
    let converter = if config.uses_host_cpuinfo() {
        TimeConverter::host()
    } else {
        FrequencyProbe::new(&config.cpuinfo_path)
            .probe()
            .map(TimeConverter::new)
    };

    match &converter {
        Ok(c) => tracing::debug!(ghz = c.frequency().ghz(), "using nominal cpu frequency"),
        Err(e) => tracing::warn!("cycle-based measurements unavailable: {}", e),
    }
    converter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::{CpuFrequency, WallClockTimestamp};
    use std::cell::Cell;
    use std::path::PathBuf;

    struct FixedStep(Cell<u64>);

    impl CycleSource for FixedStep {
        fn read_cycles(&self) -> u64 {
            let v = self.0.get();
            self.0.set(v + 50);
            v
        }
    }

    /// Advances one microsecond per read.
    struct TickingClock(Cell<i64>);

    impl WallClock for TickingClock {
        fn now(&self) -> WallClockTimestamp {
            let us = self.0.get();
            self.0.set(us + 1);
            WallClockTimestamp::new(us / 1_000_000, us % 1_000_000)
        }
    }

    fn runner(
        converter: Result<TimeConverter, ProbeError>,
    ) -> Runner<FixedStep, TickingClock> {
        Runner::with_sources(
            Config::default().samples(10).preflight(false),
            converter,
            FixedStep(Cell::new(0)),
            TickingClock(Cell::new(0)),
        )
    }

    #[test]
    fn test_run_with_scripted_sources() {
        let converter = TimeConverter::new(CpuFrequency::from_ghz(1.0).unwrap());
        let mut out = Vec::new();
        let report = runner(Ok(converter)).run(&mut out).unwrap();

        assert_eq!(report.cycle_counter_overhead.unwrap(), 100);
        assert_eq!(report.wall_clock_overhead.unwrap(), 50);
        let cycles = report.inner_loop_cycles.unwrap();
        assert_eq!(cycles.mean, 50.0);
        assert_eq!(cycles.std_dev, 0.0);
        assert_eq!(report.inner_loop_wall_clock.mean, 1_000.0);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 9);
        assert!(text.starts_with("The result measurement of getcycles is 100\n"));
    }

    #[test]
    fn test_run_without_frequency_still_measures_wall_clock() {
        let err = ProbeError::PatternNotFound {
            path: PathBuf::from("cpuinfo"),
        };
        let mut out = Vec::new();
        let report = runner(Err(err)).run(&mut out).unwrap();

        assert!(report.cycle_counter_overhead.is_err());
        assert!(report.wall_clock_overhead.is_err());
        assert!(report.inner_loop_cycles.is_err());
        assert_eq!(report.inner_loop_wall_clock.mean, 1_000.0);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("unavailable").count(), 4);
        assert!(text.contains("by gettimeofday is 1.000000e+03"));
    }

    #[test]
    fn test_report_layout() {
        let converter = TimeConverter::new(CpuFrequency::from_ghz(1.0).unwrap());
        let mut out = Vec::new();
        runner(Ok(converter)).run(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "The result measurement of getcycles is 100");
        assert_eq!(lines[1], SEPARATOR);
        assert_eq!(lines[2], "The result measurement of gettimeofday is 50");
        assert_eq!(lines[3], SEPARATOR);
        assert_eq!(
            lines[4],
            "The mean of the measurement of inner loop by gethosttime is 5.000000e+01"
        );
        assert_eq!(
            lines[5],
            "The standard deviation of the measurement of inner loop by gethosttime is 0.000000e+00"
        );
        assert_eq!(lines[6], SEPARATOR);
        assert_eq!(
            lines[7],
            "The mean of the measurement of inner loop by gettimeofday is 1.000000e+03"
        );
        assert_eq!(
            lines[8],
            "The standard deviation of the measurement of inner loop by gettimeofday is 0.000000e+00"
        );
        assert!(text.ends_with("0.000000e+00\n"));
    }

    #[test]
    fn test_zero_samples_on_struct_is_raised() {
        let config = Config {
            samples: 0,
            ..Config::default().preflight(false)
        };
        let converter = TimeConverter::new(CpuFrequency::from_ghz(1.0).unwrap());
        let runner = Runner::with_sources(
            config,
            Ok(converter),
            FixedStep(Cell::new(0)),
            TickingClock(Cell::new(0)),
        );
        assert_eq!(runner.config().samples, 1);

        let mut out = Vec::new();
        let report = runner.run(&mut out).unwrap();
        assert_eq!(report.inner_loop_cycles.unwrap().mean, 50.0);
        assert!(!report.inner_loop_wall_clock.mean.is_nan());
        assert!(!String::from_utf8(out).unwrap().contains("nan"));
    }

    #[test]
    fn test_custom_cpuinfo_path_is_probed() {
        let config = Config::default().cpuinfo_path("/nonexistent/cpuinfo");
        let runner = Runner::new(config);
        assert!(matches!(
            runner.converter(),
            Err(ProbeError::SourceOpen { .. })
        ));
    }
}
