//! Core traits for the feature pipeline.

mod indicator;

pub use indicator::{Indicator, MultiOutputIndicator};
