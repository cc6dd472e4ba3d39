//! Moving average indicators.

use features_core::traits::Indicator;

use crate::rolling;

/// Simple Moving Average (SMA).
///
/// Arithmetic mean of the trailing N cells; `None` through the warm-up.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = Option<f64>;

    fn compute(&self, data: &[Option<f64>]) -> Vec<Option<f64>> {
        rolling::mean(data, self.period)
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Recursive smoothing seeded with the first present cell, so it is
/// defined from index 0 when the input has no leading gap. A `None` input
/// cell yields `None` at that index while the smoothed state carries to
/// the next observation.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    alpha: f64,
}

impl Ema {
    /// Create a new EMA with the standard smoothing factor 2/(period+1).
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let alpha = 2.0 / (period as f64 + 1.0);
        Self { period, alpha }
    }

    /// Create an EMA with a custom smoothing factor.
    ///
    /// Wilder's smoothing (used by RSI and ATR) is `alpha = 1/period`.
    pub fn with_alpha(period: usize, alpha: f64) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        assert!(
            alpha > 0.0 && alpha <= 1.0,
            "Alpha must be in (0, 1]"
        );
        Self { period, alpha }
    }
}

impl Indicator for Ema {
    type Output = Option<f64>;

    fn compute(&self, data: &[Option<f64>]) -> Vec<Option<f64>> {
        let mut result = Vec::with_capacity(data.len());
        let mut state: Option<f64> = None;
        let one_minus_alpha = 1.0 - self.alpha;

        for cell in data {
            match (cell, state) {
                (Some(value), Some(prev)) => {
                    state = Some(value * self.alpha + prev * one_minus_alpha);
                    result.push(state);
                }
                (Some(value), None) => {
                    state = Some(*value);
                    result.push(state);
                }
                (None, _) => result.push(None),
            }
        }

        result
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// Weighted Moving Average (WMA).
///
/// Trailing N cells weighted by ascending integers 1..=N, most recent
/// heaviest.
#[derive(Debug, Clone)]
pub struct Wma {
    period: usize,
    weights_sum: f64,
}

impl Wma {
    /// Create a new WMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        // Sum of weights: 1 + 2 + ... + n = n(n+1)/2
        let weights_sum = (period * (period + 1)) as f64 / 2.0;
        Self {
            period,
            weights_sum,
        }
    }
}

impl Indicator for Wma {
    type Output = Option<f64>;

    fn compute(&self, data: &[Option<f64>]) -> Vec<Option<f64>> {
        rolling::apply(data, self.period, |window| {
            let weighted_sum: f64 = window
                .iter()
                .enumerate()
                .map(|(i, &value)| value * (i + 1) as f64)
                .sum();
            weighted_sum / self.weights_sum
        })
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "WMA"
    }
}
