//! System-level preflight checks.
//!
//! Host settings that make a nominal-frequency conversion of cycle counts
//! misleading, or add noise to the busy-loop series.

use std::path::Path;

/// Warning from system checks.
#[derive(Debug, Clone, PartialEq)]
pub enum SystemWarning {
    /// CPU frequency scaling is not set to performance mode.
    CpuGovernorNotPerformance {
        /// Current governor setting.
        current: String,
    },

    /// Could not read CPU governor (permission or path issue).
    CpuGovernorUnreadable {
        /// Error message.
        reason: String,
    },

    /// Turbo boost is enabled; the core clock can exceed the nominal rate.
    TurboBoostEnabled,

    /// Running in a virtual machine.
    VirtualMachineDetected,

    /// The CPU does not advertise an invariant TSC.
    TscNotInvariant {
        /// Which of `constant_tsc` / `nonstop_tsc` are missing.
        missing: Vec<&'static str>,
    },
}

impl SystemWarning {
    /// Get a human-readable description of the warning.
    pub fn description(&self) -> String {
        match self {
            SystemWarning::CpuGovernorNotPerformance { current } => {
                format!(
                    "CPU frequency governor is '{}', recommend 'performance' so that \
                     'cpu MHz' matches the clock during measurement. \
                     Set with: sudo cpufreq-set -g performance",
                    current
                )
            }
            SystemWarning::CpuGovernorUnreadable { reason } => {
                format!(
                    "Could not check CPU governor: {}. \
                     This may indicate limited permissions or unsupported platform.",
                    reason
                )
            }
            SystemWarning::TurboBoostEnabled => {
                "Turbo boost is enabled. The core may run above the reported \
                 frequency, which skews cycle-to-nanosecond conversion."
                    .to_string()
            }
            SystemWarning::VirtualMachineDetected => {
                "Running in a virtual machine. rdtsc and gettimeofday may trap \
                 or be emulated, inflating both overheads."
                    .to_string()
            }
            SystemWarning::TscNotInvariant { missing } => {
                format!(
                    "CPU flags lack {}. The TSC may change rate with P-states or \
                     stop in deep C-states.",
                    missing.join(" and ")
                )
            }
        }
    }
}

/// Perform all system checks.
///
/// `cpuinfo` is the cpuinfo-formatted file used for the frequency probe.
/// Returns an empty vector on unsupported platforms.
pub fn system_check(cpuinfo: &Path) -> Vec<SystemWarning> {
    #[allow(unused_mut)]
    let mut warnings = Vec::new();

    #[cfg(target_os = "linux")]
    {
        if let Some(warning) = check_cpu_governor_linux() {
            warnings.push(warning);
        }
        if let Some(warning) = check_turbo_boost_linux() {
            warnings.push(warning);
        }
    }

    if let Ok(text) = std::fs::read_to_string(cpuinfo) {
        warnings.extend(cpuinfo_findings(&text));
    }

    warnings
}

/// Warnings derived from the first processor's `flags` line.
///
/// Sources without a `flags` line (e.g. aarch64 `Features`) produce none.
pub fn cpuinfo_findings(cpuinfo: &str) -> Vec<SystemWarning> {
    let Some(flags) = cpuinfo.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        (key.trim() == "flags").then_some(value)
    }) else {
        return Vec::new();
    };

    let has = |flag: &str| flags.split_whitespace().any(|f| f == flag);

    let mut warnings = Vec::new();
    if has("hypervisor") {
        warnings.push(SystemWarning::VirtualMachineDetected);
    }

    let missing: Vec<&'static str> = ["constant_tsc", "nonstop_tsc"]
        .into_iter()
        .filter(|flag| !has(*flag))
        .collect();
    if !missing.is_empty() {
        warnings.push(SystemWarning::TscNotInvariant { missing });
    }

    warnings
}

#[cfg(target_os = "linux")]
fn check_cpu_governor_linux() -> Option<SystemWarning> {
    let governor_path = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_governor";

    match std::fs::read_to_string(governor_path) {
        Ok(governor) => {
            let governor = governor.trim().to_lowercase();
            if governor != "performance" {
                Some(SystemWarning::CpuGovernorNotPerformance { current: governor })
            } else {
                None
            }
        }
        Err(e) => Some(SystemWarning::CpuGovernorUnreadable {
            reason: e.to_string(),
        }),
    }
}

#[cfg(target_os = "linux")]
fn check_turbo_boost_linux() -> Option<SystemWarning> {
    let intel_path = "/sys/devices/system/cpu/intel_pstate/no_turbo";
    if let Ok(value) = std::fs::read_to_string(intel_path) {
        if value.trim() == "0" {
            return Some(SystemWarning::TurboBoostEnabled);
        }
        return None;
    }

    let generic_path = "/sys/devices/system/cpu/cpufreq/boost";
    if let Ok(value) = std::fs::read_to_string(generic_path) {
        if value.trim() == "1" {
            return Some(SystemWarning::TurboBoostEnabled);
        }
    }

    None
}
