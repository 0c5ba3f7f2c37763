//! Nominal CPU frequency from `/proc/cpuinfo`.
//!
//! The kernel reports one `cpu MHz` line per logical processor. The first
//! parsable line wins; values are not averaged across cores.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::ProbeError;

/// Default location of the per-processor description.
pub const DEFAULT_CPUINFO_PATH: &str = "/proc/cpuinfo";

const MHZ_LABEL: &str = "cpu MHz";
const MHZ_PER_GHZ: f64 = 1000.0;

static HOST_FREQUENCY: OnceLock<Result<CpuFrequency, ProbeError>> = OnceLock::new();

/// A validated, strictly positive clock frequency in GHz.
///
/// One GHz is one cycle per nanosecond.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CpuFrequency(f64);

impl CpuFrequency {
    /// Build from a megahertz reading.
    pub fn from_mhz(mhz: f64) -> Result<Self, ProbeError> {
        if mhz.is_finite() && mhz > 0.0 {
            Ok(Self(mhz / MHZ_PER_GHZ))
        } else {
            Err(ProbeError::InvalidFrequency { mhz })
        }
    }

    /// Build from a gigahertz value.
    pub fn from_ghz(ghz: f64) -> Result<Self, ProbeError> {
        Self::from_mhz(ghz * MHZ_PER_GHZ)
    }

    /// Frequency in GHz (cycles per nanosecond).
    pub fn ghz(self) -> f64 {
        self.0
    }
}

/// Reads the nominal frequency from a cpuinfo-formatted file.
#[derive(Debug, Clone)]
pub struct FrequencyProbe {
    path: PathBuf,
}

impl FrequencyProbe {
    /// Probe the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this probe reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open, scan and close the source.
    ///
    /// Every call re-reads the file. Use [`host_frequency`] for the cached
    /// host value.
    pub fn probe(&self) -> Result<CpuFrequency, ProbeError> {
        let file = File::open(&self.path).map_err(|e| ProbeError::open(&self.path, e))?;
        let mhz = parse_cpu_mhz(BufReader::new(file)).map_err(|err| match err {
            ScanError::Read(e) => ProbeError::read(&self.path, e),
            ScanError::NotFound => ProbeError::PatternNotFound {
                path: self.path.clone(),
            },
        })?;

        let frequency = CpuFrequency::from_mhz(mhz)?;
        tracing::debug!(
            path = %self.path.display(),
            mhz,
            ghz = frequency.ghz(),
            "probed cpu frequency"
        );
        Ok(frequency)
    }
}

impl Default for FrequencyProbe {
    fn default() -> Self {
        Self::new(DEFAULT_CPUINFO_PATH)
    }
}

/// Why a scan produced no value.
#[derive(Debug)]
pub enum ScanError {
    /// Reading a line failed.
    Read(std::io::Error),
    /// The source ended without a parsable `cpu MHz` line.
    NotFound,
}

/// Scan `reader` for the first parsable `cpu MHz` line and return its MHz value.
///
/// Lines are scanned as bytes; only lines carrying the label are decoded, so
/// non-UTF-8 text elsewhere (e.g. a vendor `model name`) does not stop the scan.
/// The reader is consumed and dropped before returning, on every path.
pub fn parse_cpu_mhz<R: BufRead>(mut reader: R) -> Result<f64, ScanError> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(ScanError::Read)? == 0 {
            return Err(ScanError::NotFound);
        }
        if !buf.starts_with(MHZ_LABEL.as_bytes()) {
            continue;
        }
        let Ok(line) = std::str::from_utf8(&buf) else {
            continue;
        };
        if let Some(mhz) = parse_mhz_line(line) {
            return Ok(mhz);
        }
    }
}

/// Parse `cpu MHz<ws>: <float>`. Returns `None` for any other line.
fn parse_mhz_line(line: &str) -> Option<f64> {
    let rest = line.strip_prefix(MHZ_LABEL)?;
    let rest = rest.trim_start_matches([' ', '\t']).strip_prefix(':')?;
    let value = rest.split_whitespace().next()?;
    value.parse::<f64>().ok()
}

/// Host frequency from [`DEFAULT_CPUINFO_PATH`], probed once per process.
///
/// A failed probe is cached as well; the host configuration does not change
/// while the measurements run.
pub fn host_frequency() -> Result<CpuFrequency, ProbeError> {
    HOST_FREQUENCY
        .get_or_init(|| FrequencyProbe::default().probe())
        .clone()
}
