//! Momentum indicators.

use features_core::series;
use features_core::traits::{Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

use crate::moving_average::{Ema, Sma};
use crate::rolling;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes to evaluate
/// overbought or oversold conditions. Uses Wilder's smoothing
/// (`alpha = 1/period`), so it is defined from the first price change
/// onward.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Rsi {
    type Output = Option<f64>;

    fn compute(&self, data: &[Option<f64>]) -> Vec<Option<f64>> {
        let delta = series::diff(data);
        let gains = series::map(&delta, |d| d.max(0.0));
        let losses = series::map(&delta, |d| (-d).max(0.0));

        let wilder = Ema::with_alpha(self.period, 1.0 / self.period as f64);
        let avg_gain = wilder.compute(&gains);
        let avg_loss = wilder.compute(&losses);

        // Zero average loss drives RS to +inf; clamp to the 100 ceiling.
        // A window with neither gains nor losses has no reading at all.
        series::try_map2(&avg_gain, &avg_loss, |gain, loss| {
            if loss == 0.0 {
                if gain > 0.0 {
                    Some(100.0)
                } else {
                    None
                }
            } else {
                Some(100.0 - 100.0 / (1.0 + gain / loss))
            }
        })
    }

    fn min_periods(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: Option<f64>,
    /// Signal line (EMA of MACD)
    pub signal: Option<f64>,
    /// Histogram (MACD - Signal)
    pub histogram: Option<f64>,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn compute(&self, data: &[Option<f64>]) -> Vec<MacdOutput> {
        let fast = Ema::new(self.fast_period).compute(data);
        let slow = Ema::new(self.slow_period).compute(data);
        let macd_line = series::map2(&fast, &slow, |f, s| f - s);

        let signal_line = Ema::new(self.signal_period).compute(&macd_line);
        let histogram = series::map2(&macd_line, &signal_line, |m, s| m - s);

        macd_line
            .iter()
            .zip(signal_line.iter())
            .zip(histogram.iter())
            .map(|((&macd, &signal), &histogram)| MacdOutput {
                macd,
                signal,
                histogram,
            })
            .collect()
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// Stochastic oscillator output cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticOutput {
    /// %K (fast stochastic)
    pub k: Option<f64>,
    /// %D (SMA of %K)
    pub d: Option<f64>,
}

/// Stochastic oscillator.
///
/// Compares the closing price to the high-low range over a period.
#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Stochastic {
    /// Create a new stochastic oscillator with default parameters (14, 3).
    pub fn new() -> Self {
        Self::with_periods(14, 3)
    }

    /// Create with custom periods.
    pub fn with_periods(k_period: usize, d_period: usize) -> Self {
        assert!(k_period > 0 && d_period > 0);
        Self { k_period, d_period }
    }

    /// Calculate %K and %D from high/low/close columns.
    ///
    /// A flat range (highest high equals lowest low) has no %K reading.
    pub fn compute(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<StochasticOutput> {
        let high = series::from_values(high);
        let low = series::from_values(low);
        let close = series::from_values(close);

        let lowest = rolling::min(&low, self.k_period);
        let highest = rolling::max(&high, self.k_period);

        let above_low = series::map2(&close, &lowest, |c, l| c - l);
        let range = series::map2(&highest, &lowest, |h, l| h - l);
        let k = series::try_map2(&above_low, &range, |n, r| {
            if r == 0.0 {
                None
            } else {
                Some(100.0 * n / r)
            }
        });
        let d = Sma::new(self.d_period).compute(&k);

        k.iter()
            .zip(d.iter())
            .map(|(&k, &d)| StochasticOutput { k, d })
            .collect()
    }
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new()
    }
}

/// Williams %R.
///
/// Momentum oscillator bounded in [-100, 0]; the mirror image of the
/// stochastic %K.
#[derive(Debug, Clone)]
pub struct WilliamsR {
    period: usize,
}

impl WilliamsR {
    /// Create a new Williams %R indicator.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate %R from high/low/close columns.
    ///
    /// A flat range has no reading.
    pub fn compute(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Option<f64>> {
        let high = series::from_values(high);
        let low = series::from_values(low);
        let close = series::from_values(close);

        let highest = rolling::max(&high, self.period);
        let lowest = rolling::min(&low, self.period);

        let below_high = series::map2(&highest, &close, |h, c| h - c);
        let range = series::map2(&highest, &lowest, |h, l| h - l);

        series::try_map2(&below_high, &range, |n, r| {
            if r == 0.0 {
                None
            } else {
                Some(-100.0 * n / r)
            }
        })
    }
}
