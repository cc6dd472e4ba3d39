//! Volatility indicators.

use features_core::series;
use features_core::traits::{Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

use crate::moving_average::Ema;
use crate::rolling;

/// Bollinger Bands output cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: Option<f64>,
    /// Middle band (SMA)
    pub middle: Option<f64>,
    /// Lower band
    pub lower: Option<f64>,
    /// %B ((price - lower) / (upper - lower))
    pub percent_b: Option<f64>,
}

/// %B position of a price between the bands.
///
/// Collapsed bands (upper equals lower) have no reading.
fn percent_b(price: f64, upper: f64, lower: f64) -> Option<f64> {
    let width = upper - lower;
    if width == 0.0 {
        None
    } else {
        Some((price - lower) / width)
    }
}

/// Bollinger Bands.
///
/// A middle band (SMA) with upper and lower bands at a configurable
/// number of sample standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BollingerOutput;

    fn compute(&self, data: &[Option<f64>]) -> Vec<BollingerOutput> {
        let middle = rolling::mean(data, self.period);
        let std_dev = rolling::stddev(data, self.period);

        let k = self.std_dev_multiplier;
        let upper = series::map2(&middle, &std_dev, |m, s| m + k * s);
        let lower = series::map2(&middle, &std_dev, |m, s| m - k * s);

        (0..data.len())
            .map(|i| BollingerOutput {
                upper: upper[i],
                middle: middle[i],
                lower: lower[i],
                percent_b: match (data[i], upper[i], lower[i]) {
                    (Some(price), Some(u), Some(l)) => percent_b(price, u, l),
                    _ => None,
                },
            })
            .collect()
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}

/// Average True Range (ATR).
///
/// Wilder-smoothed true range. The first bar has no previous close, so
/// its true range is the plain high-low range and the smoothing is
/// defined from index 0.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator.
    ///
    /// The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate the true-range series from high/low/close columns.
    pub fn true_ranges(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        let len = high.len().min(low.len()).min(close.len());
        (0..len)
            .map(|i| {
                let hl = high[i] - low[i];
                if i == 0 {
                    hl
                } else {
                    let pc = close[i - 1];
                    hl.max((high[i] - pc).abs()).max((low[i] - pc).abs())
                }
            })
            .collect()
    }

    /// Calculate ATR from high/low/close columns.
    pub fn compute(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Option<f64>> {
        let tr = series::from_values(&Self::true_ranges(high, low, close));
        Ema::with_alpha(self.period, 1.0 / self.period as f64).compute(&tr)
    }
}

/// Annualized historical volatility.
///
/// Rolling sample standard deviation of a log-return series, scaled by
/// the square root of the annualization factor. Composes with
/// `series::diff` of log closes, so the same return column feeds both
/// this indicator and the feature table.
#[derive(Debug, Clone)]
pub struct HistVolatility {
    window: usize,
    annualization_days: usize,
}

impl HistVolatility {
    /// Create a new historical volatility indicator.
    ///
    /// Defaults in the pipeline are a 20-day window annualized over 252
    /// trading days.
    pub fn new(window: usize, annualization_days: usize) -> Self {
        assert!(window > 1, "Window must be greater than 1");
        assert!(annualization_days > 0, "Annualization days must be positive");
        Self {
            window,
            annualization_days,
        }
    }
}

impl Indicator for HistVolatility {
    type Output = Option<f64>;

    /// Compute over a log-return series (not raw prices).
    fn compute(&self, log_returns: &[Option<f64>]) -> Vec<Option<f64>> {
        let annualize = (self.annualization_days as f64).sqrt();
        series::map(&rolling::stddev(log_returns, self.window), |s| {
            s * annualize
        })
    }

    fn min_periods(&self) -> usize {
        self.window
    }

    fn name(&self) -> &str {
        "HV"
    }
}
