//! End-to-end runs against the real counters.

use std::io::Write;

use tempfile::NamedTempFile;
use timer_overhead::output::SEPARATOR;
use timer_overhead::{Config, Runner};

fn cpuinfo(mhz: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "processor\t: 0").unwrap();
    writeln!(file, "cpu MHz\t\t: {}", mhz).unwrap();
    file
}

fn value_after_is(line: &str) -> &str {
    line.rsplit(" is ").next().unwrap()
}

#[test]
fn full_run_with_simulated_cpuinfo() {
    let file = cpuinfo("2400.000");
    let config = Config::default().cpuinfo_path(file.path()).preflight(false);
    let runner = Runner::new(config);
    assert!(runner.converter().is_ok());

    let mut out = Vec::new();
    let report = runner.run(&mut out).unwrap();
    assert!(report.is_complete());

    let cycles = report.inner_loop_cycles.clone().unwrap();
    assert!(cycles.mean >= 0.0);
    assert!(cycles.std_dev >= 0.0);
    assert!(report.inner_loop_wall_clock.mean >= 0.0);
    assert!(report.inner_loop_wall_clock.std_dev >= 0.0);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9, "{}", text);
    assert!(lines[0].starts_with("The result measurement of getcycles is "));
    assert!(value_after_is(lines[0]).parse::<u64>().is_ok());
    assert_eq!(lines[1], SEPARATOR);
    assert!(lines[2].starts_with("The result measurement of gettimeofday is "));
    assert!(value_after_is(lines[2]).parse::<u64>().is_ok());
    assert_eq!(lines[3], SEPARATOR);
    assert!(lines[4].starts_with("The mean of the measurement of inner loop by gethosttime is "));
    assert!(lines[5].starts_with(
        "The standard deviation of the measurement of inner loop by gethosttime is "
    ));
    assert_eq!(lines[6], SEPARATOR);
    assert!(lines[7].starts_with("The mean of the measurement of inner loop by gettimeofday is "));
    assert!(lines[8].starts_with(
        "The standard deviation of the measurement of inner loop by gettimeofday is "
    ));

    for line in &lines[4..] {
        if *line == SEPARATOR {
            continue;
        }
        let value = value_after_is(line);
        assert!(value.contains("e+") || value.contains("e-"), "not %e: {}", value);
        assert!(value.parse::<f64>().unwrap() >= 0.0);
    }
}

#[test]
fn missing_frequency_is_not_zero() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "processor\t: 0").unwrap();
    writeln!(file, "BogoMIPS\t: 48.00").unwrap();

    let config = Config::default()
        .cpuinfo_path(file.path())
        .samples(50)
        .preflight(false);
    let mut out = Vec::new();
    let report = Runner::new(config).run(&mut out).unwrap();

    assert!(report.cycle_counter_overhead.is_err());
    assert!(report.first_error().is_some());

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("The result measurement of getcycles is unavailable ("));
    assert!(!text.contains("The result measurement of getcycles is 0\n"));
}
