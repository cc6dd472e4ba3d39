//! Technical indicators over optional-cell daily series.
//!
//! This crate provides the building blocks of the feature pipeline:
//! - Rolling-window primitives (sum, mean, min, max, sample stddev)
//! - Moving averages (SMA, EMA with a Wilder variant, WMA)
//! - Momentum indicators (RSI, MACD, Stochastic, Williams %R)
//! - Volatility indicators (Bollinger Bands, ATR, historical volatility)
//! - Volume indicators (OBV, CMF, rolling VWAP)
//!
//! Every indicator returns a series of the input's length, aligned 1:1
//! with the input dates; warm-up cells and numeric edge cases come back
//! as `None` rather than raising or leaking infinities.

pub mod momentum;
pub mod moving_average;
pub mod rolling;
pub mod volatility;
pub mod volume;

pub use momentum::{Macd, MacdOutput, Rsi, Stochastic, StochasticOutput, WilliamsR};
pub use moving_average::{Ema, Sma, Wma};
pub use volatility::{Atr, BollingerBands, BollingerOutput, HistVolatility};
pub use volume::{Cmf, Obv, RollingVwap};
