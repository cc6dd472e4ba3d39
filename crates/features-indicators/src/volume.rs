//! Volume-weighted indicators.

use features_core::series;

use crate::rolling;

/// On-Balance Volume (OBV).
///
/// Running cumulative sum of signed volume: up-closes add, down-closes
/// subtract, unchanged closes (and the first bar) contribute nothing.
/// Unbounded growth is expected: OBV is cumulative, not normalized.
#[derive(Debug, Clone, Default)]
pub struct Obv;

impl Obv {
    /// Create a new OBV indicator.
    pub fn new() -> Self {
        Self
    }

    /// Calculate OBV from close and volume columns.
    ///
    /// Always defined, so the output is a plain value series.
    pub fn compute(&self, close: &[f64], volume: &[f64]) -> Vec<f64> {
        let len = close.len().min(volume.len());
        let mut result = Vec::with_capacity(len);
        let mut obv = 0.0;

        for i in 0..len {
            if i > 0 {
                let change = close[i] - close[i - 1];
                if change > 0.0 {
                    obv += volume[i];
                } else if change < 0.0 {
                    obv -= volume[i];
                }
            }
            result.push(obv);
        }

        result
    }
}

/// Chaikin Money Flow (CMF).
///
/// Volume-weighted accumulation/distribution over a rolling window. A
/// flat-range day has a money-flow multiplier of zero by definition (the
/// one indicator that zeroes rather than blanks on high = low); a window
/// with zero total volume has no reading.
#[derive(Debug, Clone)]
pub struct Cmf {
    period: usize,
}

impl Cmf {
    /// Create a new CMF indicator.
    ///
    /// The common period is 20.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate CMF from high/low/close/volume columns.
    pub fn compute(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
        volume: &[f64],
    ) -> Vec<Option<f64>> {
        let len = high.len().min(low.len()).min(close.len()).min(volume.len());

        let money_flow_volume: Vec<Option<f64>> = (0..len)
            .map(|i| {
                let range = high[i] - low[i];
                let multiplier = if range == 0.0 {
                    0.0
                } else {
                    ((close[i] - low[i]) - (high[i] - close[i])) / range
                };
                Some(multiplier * volume[i])
            })
            .collect();
        let volume = series::from_values(&volume[..len]);

        series::div(
            &rolling::sum(&money_flow_volume, self.period),
            &rolling::sum(&volume, self.period),
        )
    }
}

/// Rolling volume-weighted average price (VWAP).
///
/// Typical price weighted by volume over a rolling window. A window with
/// zero total volume has no reading.
#[derive(Debug, Clone)]
pub struct RollingVwap {
    window: usize,
}

impl RollingVwap {
    /// Create a new rolling VWAP indicator.
    ///
    /// The common window is 20.
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "Window must be greater than 0");
        Self { window }
    }

    /// Calculate rolling VWAP from high/low/close/volume columns.
    pub fn compute(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
        volume: &[f64],
    ) -> Vec<Option<f64>> {
        let len = high.len().min(low.len()).min(close.len()).min(volume.len());

        let weighted: Vec<Option<f64>> = (0..len)
            .map(|i| {
                let typical = (high[i] + low[i] + close[i]) / 3.0;
                Some(typical * volume[i])
            })
            .collect();
        let volume = series::from_values(&volume[..len]);

        series::div(
            &rolling::sum(&weighted, self.window),
            &rolling::sum(&volume, self.window),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obv_rising_is_cumulative_volume() {
        let obv = Obv::new();
        let close = vec![1.0, 2.0, 3.0, 4.0];
        let volume = vec![10.0, 20.0, 30.0, 40.0];

        let result = obv.compute(&close, &volume);
        // First bar contributes nothing; each rise adds its volume.
        assert_eq!(result, vec![0.0, 20.0, 50.0, 90.0]);
    }

    #[test]
    fn test_obv_falling_is_negative_cumulative_volume() {
        let obv = Obv::new();
        let close = vec![4.0, 3.0, 2.0, 1.0];
        let volume = vec![10.0, 20.0, 30.0, 40.0];

        let result = obv.compute(&close, &volume);
        assert_eq!(result, vec![0.0, -20.0, -50.0, -90.0]);
    }

    #[test]
    fn test_obv_unchanged_close_contributes_nothing() {
        let obv = Obv::new();
        let close = vec![1.0, 2.0, 2.0, 1.0];
        let volume = vec![10.0, 20.0, 30.0, 40.0];

        let result = obv.compute(&close, &volume);
        assert_eq!(result, vec![0.0, 20.0, 20.0, -20.0]);
    }

    #[test]
    fn test_cmf_bounded_on_ordinary_data() {
        let cmf = Cmf::new(3);
        let high = vec![11.0, 12.0, 11.5, 12.5, 13.0, 12.0];
        let low = vec![9.0, 10.0, 10.0, 10.5, 11.0, 10.5];
        let close = vec![10.0, 11.5, 10.5, 12.0, 12.5, 11.0];
        let volume = vec![100.0, 150.0, 120.0, 130.0, 160.0, 140.0];

        let result = cmf.compute(&high, &low, &close, &volume);
        assert_eq!(result[..2], [None, None]);

        for value in result.iter().flatten() {
            // The multiplier lives in [-1, 1], so CMF does too.
            assert!((-1.0..=1.0).contains(value));
        }
    }

    #[test]
    fn test_cmf_flat_range_days_are_zeroed() {
        let cmf = Cmf::new(2);
        let flat = vec![10.0; 4];
        let volume = vec![100.0, 200.0, 300.0, 400.0];

        let result = cmf.compute(&flat, &flat, &flat, &volume);

        // Flat-range multipliers are zero, not missing, so CMF reads 0.
        assert_eq!(result[1], Some(0.0));
        assert_eq!(result[3], Some(0.0));
    }

    #[test]
    fn test_cmf_zero_volume_window_has_no_reading() {
        let cmf = Cmf::new(2);
        let high = vec![11.0, 12.0, 13.0];
        let low = vec![9.0, 10.0, 11.0];
        let close = vec![10.0, 11.0, 12.0];
        let volume = vec![0.0, 0.0, 0.0];

        let result = cmf.compute(&high, &low, &close, &volume);
        assert_eq!(result, vec![None, None, None]);
    }

    #[test]
    fn test_vwap_equal_volume_is_mean_typical_price() {
        let vwap = RollingVwap::new(2);
        let high = vec![12.0, 14.0, 16.0];
        let low = vec![8.0, 10.0, 12.0];
        let close = vec![10.0, 12.0, 14.0];
        let volume = vec![100.0, 100.0, 100.0];

        let result = vwap.compute(&high, &low, &close, &volume);

        // Typical prices are 10, 12, 14; equal weights give plain means.
        assert_eq!(result[0], None);
        assert!((result[1].unwrap() - 11.0).abs() < 1e-10);
        assert!((result[2].unwrap() - 13.0).abs() < 1e-10);
    }

    #[test]
    fn test_vwap_weights_by_volume() {
        let vwap = RollingVwap::new(2);
        let high = vec![10.0, 20.0];
        let low = vec![10.0, 20.0];
        let close = vec![10.0, 20.0];
        let volume = vec![300.0, 100.0];

        let result = vwap.compute(&high, &low, &close, &volume);

        // (10*300 + 20*100) / 400 = 12.5
        assert!((result[1].unwrap() - 12.5).abs() < 1e-10);
    }

    #[test]
    fn test_vwap_zero_volume_window_has_no_reading() {
        let vwap = RollingVwap::new(2);
        let price = vec![10.0, 11.0];
        let volume = vec![0.0, 0.0];

        let result = vwap.compute(&price, &price, &price, &volume);
        assert_eq!(result, vec![None, None]);
    }
}
