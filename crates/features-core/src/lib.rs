//! Core types and traits for the daily feature-engineering pipeline.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, DailySeries)
//! - The FeatureTable that enriched series are assembled into
//! - Optional-cell series combinators shared by all indicators
//! - Core traits for indicator implementations

pub mod error;
pub mod series;
pub mod traits;
pub mod types;

pub use error::{FeatureError, FeatureResult};
pub use traits::*;
pub use types::*;
