//! Console report lines.

use crate::error::MeasurementError;
use crate::scenario::Scenario;
use crate::statistics::Summary;

/// Line printed between scenarios.
pub const SEPARATOR: &str = "-------------------------------------------";

/// Format a float like C's `%e`: six fractional digits and a signed exponent
/// of at least two digits (`1.234560e+01`).
pub fn format_scientific(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let rust = format!("{:.6e}", value);
    let Some((mantissa, exponent)) = rust.split_once('e') else {
        return rust;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs())
}

/// The single result line of an overhead scenario.
pub fn format_overhead(scenario: Scenario, result: &Result<u64, MeasurementError>) -> String {
    match result {
        Ok(ns) => format!("The result measurement of {} is {}\n", scenario.label(), ns),
        Err(e) => format!(
            "The result measurement of {} is unavailable ({})\n",
            scenario.label(),
            e
        ),
    }
}

/// The mean and standard deviation lines of an inner-loop scenario.
pub fn format_inner_loop(scenario: Scenario, result: &Result<Summary, MeasurementError>) -> String {
    let label = scenario.label();
    match result {
        Ok(summary) => format!(
            "The mean of the measurement of inner loop by {label} is {}\n\
             The standard deviation of the measurement of inner loop by {label} is {}\n",
            format_scientific(summary.mean),
            format_scientific(summary.std_dev),
        ),
        Err(e) => format!(
            "The mean of the measurement of inner loop by {label} is unavailable ({e})\n\
             The standard deviation of the measurement of inner loop by {label} is unavailable ({e})\n",
        ),
    }
}
