//! Configuration for a measurement run.

use std::path::PathBuf;

use crate::measurement::DEFAULT_CPUINFO_PATH;

/// Configuration options for [`Runner`](crate::Runner).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Trials per inner-loop scenario (default: 1,000).
    pub samples: usize,

    /// Additions per busy-loop trial (default: 100).
    pub inner_loop_iterations: usize,

    /// Source of the nominal CPU frequency (default: `/proc/cpuinfo`).
    ///
    /// The default path uses the process-wide cached probe; any other path
    /// is probed once when the runner is built.
    pub cpuinfo_path: PathBuf,

    /// Run host preflight checks before measuring (default: true).
    pub preflight: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            samples: 1_000,
            inner_loop_iterations: 100,
            cpuinfo_path: PathBuf::from(DEFAULT_CPUINFO_PATH),
            preflight: true,
        }
    }
}

impl Config {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of trials per inner-loop scenario.
    ///
    /// Clamped to at least 1 so the statistics are always defined.
    pub fn samples(mut self, n: usize) -> Self {
        self.samples = n.max(1);
        self
    }

    /// Set the busy-loop length.
    pub fn inner_loop_iterations(mut self, n: usize) -> Self {
        self.inner_loop_iterations = n;
        self
    }

    /// Read the CPU frequency from a different cpuinfo-formatted file.
    pub fn cpuinfo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cpuinfo_path = path.into();
        self
    }

    /// Enable or disable host preflight checks.
    pub fn preflight(mut self, enabled: bool) -> Self {
        self.preflight = enabled;
        self
    }

    /// Whether the frequency comes from the default host source.
    pub fn uses_host_cpuinfo(&self) -> bool {
        self.cpuinfo_path.as_os_str() == DEFAULT_CPUINFO_PATH
    }
}
