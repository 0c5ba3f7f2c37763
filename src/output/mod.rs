//! Output formatting for measurement reports.

pub mod terminal;

pub use terminal::{format_scientific, SEPARATOR};
