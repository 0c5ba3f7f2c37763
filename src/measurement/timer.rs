//! Platform-specific cycle counter reads.
//!
//! Reads the hardware timestamp counter directly:
//! - x86_64: `rdtsc`
//! - aarch64: `mrs cntvct_el0`
//! - Fallback: nanoseconds since a process-relative `std::time::Instant`
//!
//! The fallback is not a cycle counter. On such targets the reported
//! overhead is in nanoseconds of the monotonic clock, and the frequency
//! probe result does not describe the counter's tick rate.

use std::hint::black_box as std_black_box;
use std::sync::atomic::{compiler_fence, Ordering};

/// Wrapper around `std::hint::black_box` for preventing compiler optimizations.
#[inline]
pub fn black_box<T>(x: T) -> T {
    std_black_box(x)
}

/// Read the CPU cycle counter.
///
/// Unlike a serializing `lfence; rdtsc` pair, this issues the bare instruction
/// so that the measured overhead is the instruction itself plus the register
/// moves that assemble the 64-bit result. Compiler fences keep the compiler
/// from hoisting work across the read; the CPU is free to reorder.
#[inline]
pub fn rdtsc() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        rdtsc_x86_64()
    }

    #[cfg(target_arch = "aarch64")]
    {
        rdtsc_aarch64()
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        rdtsc_fallback()
    }
}

#[cfg(target_arch = "x86_64")]
#[inline]
fn rdtsc_x86_64() -> u64 {
    compiler_fence(Ordering::SeqCst);

    let cycles: u64;
    // SAFETY: rdtsc only reads the timestamp counter into edx:eax.
    unsafe {
        std::arch::asm!(
            "rdtsc",
            "shl rdx, 32",
            "or rax, rdx",
            out("rax") cycles,
            out("rdx") _,
            options(nostack, nomem),
        );
    }

    compiler_fence(Ordering::SeqCst);

    cycles
}

#[cfg(target_arch = "aarch64")]
#[inline]
fn rdtsc_aarch64() -> u64 {
    compiler_fence(Ordering::SeqCst);

    let cycles: u64;
    // SAFETY: cntvct_el0 is readable from EL0 on every supported OS.
    unsafe {
        std::arch::asm!(
            "mrs {}, cntvct_el0",
            out(reg) cycles,
            options(nostack, nomem),
        );
    }

    compiler_fence(Ordering::SeqCst);

    cycles
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline]
fn rdtsc_fallback() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();

    let start = START.get_or_init(Instant::now);
    // Truncation needs over 580 years of process uptime.
    start.elapsed().as_nanos() as u64
}

/// Name of the counter `rdtsc()` reads on this target.
pub fn counter_name() -> &'static str {
    #[cfg(target_arch = "x86_64")]
    {
        "rdtsc"
    }
    #[cfg(target_arch = "aarch64")]
    {
        "cntvct_el0"
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        "Instant"
    }
}

/// A monotonic cycle source.
///
/// The scenarios are generic over this so they can be driven by a scripted
/// counter in tests.
pub trait CycleSource {
    /// Take one counter snapshot.
    fn read_cycles(&self) -> u64;
}

/// The hardware timestamp counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tsc;

impl CycleSource for Tsc {
    #[inline(always)]
    fn read_cycles(&self) -> u64 {
        rdtsc()
    }
}

impl<S: CycleSource + ?Sized> CycleSource for &S {
    #[inline(always)]
    fn read_cycles(&self) -> u64 {
        (**self).read_cycles()
    }
}
