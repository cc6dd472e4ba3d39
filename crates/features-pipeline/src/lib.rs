//! Feature-assembly pipeline for daily OHLCV series.
//!
//! Given an ordered [`DailySeries`](features_core::DailySeries), the
//! pipeline produces a [`FeatureTable`](features_core::FeatureTable)
//! holding the original columns plus trend, momentum, volatility and
//! volume features, all row-aligned with the input dates:
//!
//! ```
//! use chrono::NaiveDate;
//! use features_core::{Bar, DailySeries};
//! use features_pipeline::build_features;
//!
//! let bars = (0..30)
//!     .map(|i| {
//!         let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i);
//!         let close = 100.0 + i as f64;
//!         Bar::new(date, close - 0.5, close + 1.0, close - 1.0, close, 10_000.0)
//!     })
//!     .collect();
//! let series = DailySeries::from_bars("ACME", bars).unwrap();
//!
//! let table = build_features(&series).unwrap();
//! assert_eq!(table.len(), 30);
//! assert!(table.column("rsi_14").is_some());
//! ```
//!
//! All parameters (window sets, periods, multipliers) live in
//! [`FeatureConfig`] and can be overridden per call via
//! [`FeatureBuilder::with_config`].

pub mod builder;
pub mod config;

pub use builder::{build_features, FeatureBuilder};
pub use config::FeatureConfig;
