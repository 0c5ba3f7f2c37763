//! Microsecond wall clock via `gettimeofday(2)`.

/// Microseconds per second.
const MICROS_PER_SEC: i64 = 1_000_000;
/// Nanoseconds per microsecond.
const NANOS_PER_MICRO: i64 = 1_000;

/// A `(seconds, microseconds)` wall-clock reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct WallClockTimestamp {
    /// Seconds since the epoch.
    pub secs: i64,
    /// Microseconds within the second.
    pub micros: i64,
}

impl WallClockTimestamp {
    /// Create a timestamp.
    pub fn new(secs: i64, micros: i64) -> Self {
        Self { secs, micros }
    }

    /// Nanoseconds from `self` to `later`.
    ///
    /// Negative if the clock stepped backwards between the two reads.
    /// Saturates at the `i64` bounds for timestamps no real clock produces.
    pub fn nanos_until(&self, later: &WallClockTimestamp) -> i64 {
        later
            .secs
            .saturating_sub(self.secs)
            .saturating_mul(MICROS_PER_SEC)
            .saturating_add(later.micros.saturating_sub(self.micros))
            .saturating_mul(NANOS_PER_MICRO)
    }
}

/// A source of wall-clock timestamps.
pub trait WallClock {
    /// Read the current time.
    fn now(&self) -> WallClockTimestamp;
}

/// The operating system's wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    #[cfg(unix)]
    #[inline]
    fn now(&self) -> WallClockTimestamp {
        let mut tv = libc::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        // SAFETY: tv is a valid timeval and a null timezone is permitted.
        // gettimeofday cannot fail with these arguments.
        unsafe {
            libc::gettimeofday(&mut tv, std::ptr::null_mut());
        }
        WallClockTimestamp {
            secs: tv.tv_sec as i64,
            micros: tv.tv_usec as i64,
        }
    }

    #[cfg(not(unix))]
    #[inline]
    fn now(&self) -> WallClockTimestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        WallClockTimestamp {
            secs: since_epoch.as_secs() as i64,
            micros: i64::from(since_epoch.subsec_micros()),
        }
    }
}

impl<C: WallClock + ?Sized> WallClock for &C {
    #[inline]
    fn now(&self) -> WallClockTimestamp {
        (**self).now()
    }
}
