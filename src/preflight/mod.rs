//! Preflight checks run before measuring.
//!
//! These never stop a run. They point out host settings under which the
//! numbers are hard to interpret, such as frequency scaling or a TSC that
//! does not tick at a constant rate.

mod system;

pub use system::{cpuinfo_findings, system_check, SystemWarning};

use crate::config::Config;

/// Run all checks for `config` and log each finding.
///
/// Returns the findings so callers can inspect them.
pub fn run_all_checks(config: &Config) -> Vec<SystemWarning> {
    if !config.preflight {
        return Vec::new();
    }

    let warnings = system_check(&config.cpuinfo_path);
    for warning in &warnings {
        tracing::warn!("{}", warning.description());
    }
    warnings
}
