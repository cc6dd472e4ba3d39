//! Pipeline configuration.
//!
//! Every indicator parameter is an explicit, overridable field with the
//! conventional literal default, so the pipeline can be reused across
//! instruments with different parameterizations in the same process.

use features_core::{FeatureError, FeatureResult};
use serde::{Deserialize, Serialize};

/// Feature pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FeatureConfig {
    #[serde(default)]
    pub moving_averages: MovingAverageConfig,
    #[serde(default)]
    pub macd: MacdConfig,
    #[serde(default)]
    pub rsi: RsiConfig,
    #[serde(default)]
    pub stochastic: StochasticConfig,
    #[serde(default)]
    pub williams_r: WilliamsRConfig,
    #[serde(default)]
    pub bollinger: BollingerConfig,
    #[serde(default)]
    pub atr: AtrConfig,
    #[serde(default)]
    pub hist_vol: HistVolConfig,
    #[serde(default)]
    pub cmf: CmfConfig,
    #[serde(default)]
    pub vwap: VwapConfig,
}

/// Moving-average window set (applied to SMA, EMA and WMA alike).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageConfig {
    pub windows: Vec<usize>,
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self {
            windows: vec![10, 20, 50, 100, 200],
        }
    }
}

/// MACD periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdConfig {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// RSI period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiConfig {
    pub period: usize,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// Stochastic oscillator periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StochasticConfig {
    pub k_period: usize,
    pub d_period: usize,
}

impl Default for StochasticConfig {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

/// Williams %R period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WilliamsRConfig {
    pub period: usize,
}

impl Default for WilliamsRConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// Bollinger Bands parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerConfig {
    pub window: usize,
    pub stdev_multiplier: f64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            window: 20,
            stdev_multiplier: 2.0,
        }
    }
}

/// ATR period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtrConfig {
    pub period: usize,
}

impl Default for AtrConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// Historical volatility parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistVolConfig {
    pub window: usize,
    pub annualization_days: usize,
}

impl Default for HistVolConfig {
    fn default() -> Self {
        Self {
            window: 20,
            annualization_days: 252,
        }
    }
}

/// Chaikin Money Flow period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmfConfig {
    pub period: usize,
}

impl Default for CmfConfig {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// Rolling VWAP window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VwapConfig {
    pub window: usize,
}

impl Default for VwapConfig {
    fn default() -> Self {
        Self { window: 20 }
    }
}

impl FeatureConfig {
    /// Check every parameter before the pipeline runs.
    pub fn validate(&self) -> FeatureResult<()> {
        if self.moving_averages.windows.is_empty() {
            return Err(FeatureError::InvalidParameter(
                "at least one moving-average window is required".to_string(),
            ));
        }
        let mut windows = self.moving_averages.windows.clone();
        windows.sort_unstable();
        windows.dedup();
        if windows.len() != self.moving_averages.windows.len() {
            return Err(FeatureError::InvalidParameter(
                "moving-average windows must be unique".to_string(),
            ));
        }
        if self.moving_averages.windows.iter().any(|&w| w == 0) {
            return Err(FeatureError::InvalidParameter(
                "moving-average windows must be positive".to_string(),
            ));
        }
        if self.macd.fast == 0 || self.macd.slow == 0 || self.macd.signal == 0 {
            return Err(FeatureError::InvalidParameter(
                "MACD periods must be positive".to_string(),
            ));
        }
        if self.macd.fast >= self.macd.slow {
            return Err(FeatureError::InvalidParameter(format!(
                "MACD fast period ({}) must be less than slow period ({})",
                self.macd.fast, self.macd.slow
            )));
        }
        if self.rsi.period == 0 {
            return Err(FeatureError::InvalidParameter(
                "RSI period must be positive".to_string(),
            ));
        }
        if self.stochastic.k_period == 0 || self.stochastic.d_period == 0 {
            return Err(FeatureError::InvalidParameter(
                "stochastic periods must be positive".to_string(),
            ));
        }
        if self.williams_r.period == 0 {
            return Err(FeatureError::InvalidParameter(
                "Williams %R period must be positive".to_string(),
            ));
        }
        if self.bollinger.window < 2 {
            return Err(FeatureError::InvalidParameter(
                "Bollinger window must be at least 2".to_string(),
            ));
        }
        if self.bollinger.stdev_multiplier <= 0.0 {
            return Err(FeatureError::InvalidParameter(
                "Bollinger stdev multiplier must be positive".to_string(),
            ));
        }
        if self.atr.period == 0 {
            return Err(FeatureError::InvalidParameter(
                "ATR period must be positive".to_string(),
            ));
        }
        if self.hist_vol.window < 2 {
            return Err(FeatureError::InvalidParameter(
                "historical volatility window must be at least 2".to_string(),
            ));
        }
        if self.hist_vol.annualization_days == 0 {
            return Err(FeatureError::InvalidParameter(
                "annualization days must be positive".to_string(),
            ));
        }
        if self.cmf.period == 0 {
            return Err(FeatureError::InvalidParameter(
                "CMF period must be positive".to_string(),
            ));
        }
        if self.vwap.window == 0 {
            return Err(FeatureError::InvalidParameter(
                "VWAP window must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
