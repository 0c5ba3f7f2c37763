//! Descriptive statistics over timing sample series.
//!
//! Only the mean and the population standard deviation are computed; the
//! series are small (one value per trial) and fully known.

mod summary;

pub use summary::{mean, standard_deviation, Summary};
