//! Mean and population standard deviation of a sample series.
//!
//! Sums are accumulated with Neumaier's compensated summation so that a long
//! series of large squared deviations does not lose its low-order terms.

/// Mean and population standard deviation of a sample series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation (divides by n).
    pub std_dev: f64,
}

impl Summary {
    /// Summarize a non-empty series.
    pub fn from_samples(samples: &[i64]) -> Self {
        let mean = mean(samples);
        Self {
            mean,
            std_dev: standard_deviation(samples, mean),
        }
    }
}

/// Compensated running sum.
#[derive(Debug, Clone, Copy, Default)]
struct NeumaierSum {
    sum: f64,
    compensation: f64,
}

impl NeumaierSum {
    fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Arithmetic mean of `samples`.
///
/// Returns NaN for an empty slice.
pub fn mean(samples: &[i64]) -> f64 {
    let mut acc = NeumaierSum::default();
    for &x in samples {
        acc.add(x as f64);
    }
    acc.total() / samples.len() as f64
}

/// Population standard deviation `sqrt((1/n) * sum((x_i - mean)^2))`.
///
/// `mean` is taken as given so callers can reuse the value they report.
/// The series must be non-empty.
pub fn standard_deviation(samples: &[i64], mean: f64) -> f64 {
    debug_assert!(!samples.is_empty(), "standard deviation of an empty series");

    let mut acc = NeumaierSum::default();
    for &x in samples {
        let d = x as f64 - mean;
        acc.add(d * d);
    }
    ((1.0 / samples.len() as f64) * acc.total()).sqrt()
}
