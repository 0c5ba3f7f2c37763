//! Error types for frequency probing and measurement.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Failure to determine the nominal CPU frequency.
///
/// I/O causes are held in an `Arc` so a cached probe outcome can be handed
/// out more than once.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProbeError {
    /// The cpuinfo source could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    SourceOpen {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// A line read failed part way through the scan.
    #[error("failed to read {}: {source}", .path.display())]
    SourceRead {
        /// Path being scanned.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// No `cpu MHz` line could be parsed.
    #[error("no parsable `cpu MHz` line in {}", .path.display())]
    PatternNotFound {
        /// Path that was scanned.
        path: PathBuf,
    },

    /// A `cpu MHz` line held a zero, negative or non-finite value.
    #[error("invalid cpu frequency {mhz} MHz")]
    InvalidFrequency {
        /// The parsed value.
        mhz: f64,
    },
}

impl ProbeError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SourceOpen {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SourceRead {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}

/// A scenario could not produce a value.
///
/// This is the "measurement unavailable" state, distinct from a reading of
/// zero nanoseconds.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MeasurementError {
    /// Cycle deltas cannot be converted without a CPU frequency.
    #[error("cpu frequency unavailable: {0}")]
    FrequencyUnavailable(#[from] ProbeError),
}
