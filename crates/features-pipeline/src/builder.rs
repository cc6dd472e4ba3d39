//! Feature-assembly orchestrator.
//!
//! Turns a daily bar series into a wide table of trend, momentum,
//! volatility and volume features. Stateless and idempotent: the input
//! is never mutated and identical inputs produce identical tables.

use features_core::series;
use features_core::traits::{Indicator, MultiOutputIndicator};
use features_core::{DailySeries, FeatureError, FeatureResult, FeatureTable};
use features_indicators::{
    Atr, BollingerBands, Cmf, Ema, HistVolatility, Macd, Obv, RollingVwap, Rsi, Sma, Stochastic,
    WilliamsR, Wma,
};
use tracing::debug;

use crate::config::FeatureConfig;

/// Builds enriched feature tables from daily bar series.
///
/// Whether the input `close` is raw or dividend/split-adjusted is the
/// caller's decision; every close-derived feature inherits that
/// convention unchanged.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    config: FeatureConfig,
}

impl FeatureBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: FeatureConfig::default(),
        }
    }

    /// Create a builder with a custom, validated configuration.
    pub fn with_config(config: FeatureConfig) -> FeatureResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Build the feature table for a bar series.
    ///
    /// The output holds the input's own columns plus every computed
    /// feature, row-aligned with the input dates. An empty input yields
    /// an empty table with the full column structure. Non-finite input
    /// prices or volumes fail fast; numeric edge cases inside indicators
    /// resolve to `None` cells instead.
    pub fn build(&self, input: &DailySeries) -> FeatureResult<FeatureTable> {
        validate_input(input)?;

        let cfg = &self.config;
        let open = input.opens();
        let high = input.highs();
        let low = input.lows();
        let close = input.closes();
        let volume = input.volumes();

        let mut table = FeatureTable::new(input.symbol(), input.dates());
        table.push_column("open", series::from_values(&open))?;
        table.push_column("high", series::from_values(&high))?;
        table.push_column("low", series::from_values(&low))?;
        table.push_column("close", series::from_values(&close))?;
        table.push_column("volume", series::from_values(&volume))?;

        let open_s = series::from_values(&open);
        let high_s = series::from_values(&high);
        let low_s = series::from_values(&low);
        let close_s = series::from_values(&close);
        let prev_close = series::shift(&close_s, 1);

        // Basic returns and spreads.
        let ret_log = series::diff(&series::map(&close_s, f64::ln));
        table.push_column(
            "ret_pct",
            series::div(
                &series::map2(&close_s, &prev_close, |c, p| c - p),
                &prev_close,
            ),
        )?;
        table.push_column("ret_log", ret_log.clone())?;
        table.push_column(
            "gap_open_prevclose",
            series::div(
                &series::map2(&open_s, &prev_close, |o, p| o - p),
                &prev_close,
            ),
        )?;
        table.push_column(
            "spread_hl",
            series::div(&series::map2(&high_s, &low_s, |h, l| h - l), &prev_close),
        )?;
        table.push_column(
            "spread_co",
            series::div(&series::map2(&close_s, &open_s, |c, o| c - o), &open_s),
        )?;

        // Trend: SMA/EMA/WMA ladder over the close.
        for &w in &cfg.moving_averages.windows {
            table.push_column(format!("sma_{w}"), Sma::new(w).compute(&close_s))?;
            table.push_column(format!("ema_{w}"), Ema::new(w).compute(&close_s))?;
            table.push_column(format!("wma_{w}"), Wma::new(w).compute(&close_s))?;
        }

        // MACD triple.
        let macd = Macd::with_periods(cfg.macd.fast, cfg.macd.slow, cfg.macd.signal)
            .compute(&close_s);
        table.push_column("macd", macd.iter().map(|p| p.macd).collect())?;
        table.push_column("macd_signal", macd.iter().map(|p| p.signal).collect())?;
        table.push_column("macd_hist", macd.iter().map(|p| p.histogram).collect())?;

        // Momentum oscillators.
        table.push_column(
            format!("rsi_{}", cfg.rsi.period),
            Rsi::new(cfg.rsi.period).compute(&close_s),
        )?;
        let stochastic = Stochastic::with_periods(cfg.stochastic.k_period, cfg.stochastic.d_period)
            .compute(&high, &low, &close);
        table.push_column(
            format!("stoch_k_{}", cfg.stochastic.k_period),
            stochastic.iter().map(|p| p.k).collect(),
        )?;
        table.push_column(
            format!("stoch_d_{}", cfg.stochastic.d_period),
            stochastic.iter().map(|p| p.d).collect(),
        )?;
        table.push_column(
            format!("williams_r_{}", cfg.williams_r.period),
            WilliamsR::new(cfg.williams_r.period).compute(&high, &low, &close),
        )?;

        // Volatility: Bollinger, ATR, annualized historical volatility.
        let bollinger =
            BollingerBands::with_params(cfg.bollinger.window, cfg.bollinger.stdev_multiplier)
                .compute(&close_s);
        let bw = cfg.bollinger.window;
        table.push_column(
            format!("bb_upper_{bw}"),
            bollinger.iter().map(|p| p.upper).collect(),
        )?;
        table.push_column(
            format!("bb_mid_{bw}"),
            bollinger.iter().map(|p| p.middle).collect(),
        )?;
        table.push_column(
            format!("bb_lower_{bw}"),
            bollinger.iter().map(|p| p.lower).collect(),
        )?;
        table.push_column(
            format!("bbp_{bw}"),
            bollinger.iter().map(|p| p.percent_b).collect(),
        )?;
        table.push_column(
            format!("atr_{}", cfg.atr.period),
            Atr::new(cfg.atr.period).compute(&high, &low, &close),
        )?;
        table.push_column(
            format!("hv_{}", cfg.hist_vol.window),
            HistVolatility::new(cfg.hist_vol.window, cfg.hist_vol.annualization_days)
                .compute(&ret_log),
        )?;

        // Volume: OBV, CMF, rolling VWAP.
        table.push_column(
            "obv",
            series::from_values(&Obv::new().compute(&close, &volume)),
        )?;
        table.push_column(
            format!("cmf_{}", cfg.cmf.period),
            Cmf::new(cfg.cmf.period).compute(&high, &low, &close, &volume),
        )?;
        table.push_column(
            format!("vwap_{}", cfg.vwap.window),
            RollingVwap::new(cfg.vwap.window).compute(&high, &low, &close, &volume),
        )?;

        // Final containment sweep: no feature ever surfaces an infinity.
        let replaced = table.sanitize_non_finite();
        if replaced > 0 {
            debug!(
                "replaced {} non-finite cells for {}",
                replaced,
                input.symbol()
            );
        }
        debug!(
            "built {} feature columns over {} rows for {}",
            table.num_columns(),
            table.len(),
            input.symbol()
        );

        Ok(table)
    }
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the feature table with the default configuration.
pub fn build_features(input: &DailySeries) -> FeatureResult<FeatureTable> {
    FeatureBuilder::new().build(input)
}

/// Fail fast on non-finite prices or volumes.
fn validate_input(input: &DailySeries) -> FeatureResult<()> {
    for (row, bar) in input.iter().enumerate() {
        let fields = [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
            ("volume", bar.volume),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(FeatureError::NonFiniteInput {
                    field,
                    row,
                    date: bar.date,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CmfConfig, MovingAverageConfig};
    use chrono::NaiveDate;
    use features_core::Bar;

    fn date(offset: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Days::new(offset)
    }

    /// Deterministic synthetic bars with non-trivial ranges and volume.
    fn synthetic_series(rows: usize) -> DailySeries {
        let bars = (0..rows)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.13).sin() * 8.0 + i as f64 * 0.02;
                let open = close - (i as f64 * 0.29).cos() * 1.5;
                let high = open.max(close) + 1.0 + (i as f64 * 0.07).sin().abs();
                let low = open.min(close) - 1.0 - (i as f64 * 0.11).cos().abs();
                let volume = 10_000.0 + (i as f64 * 0.41).sin().abs() * 5_000.0;
                Bar::new(date(i as u64), open, high, low, close, volume)
            })
            .collect();
        DailySeries::from_bars("TEST", bars).unwrap()
    }

    /// Linearly rising close, used for closed-form checks.
    fn linear_series(rows: usize) -> DailySeries {
        let bars = (0..rows)
            .map(|i| {
                let close = (i + 1) as f64;
                Bar::new(date(i as u64), close, close + 0.5, close - 0.5, close, 1_000.0)
            })
            .collect();
        DailySeries::from_bars("LINEAR", bars).unwrap()
    }

    /// Flat bars: high = low = close, constant.
    fn flat_series(rows: usize) -> DailySeries {
        let bars = (0..rows)
            .map(|i| Bar::new(date(i as u64), 10.0, 10.0, 10.0, 10.0, 500.0))
            .collect();
        DailySeries::from_bars("FLAT", bars).unwrap()
    }

    const EXPECTED_COLUMNS: usize = 5 + 5 + 3 * 5 + 3 + 1 + 2 + 1 + 4 + 1 + 1 + 3;

    #[test]
    fn test_table_shape_and_alignment() {
        let input = synthetic_series(300);
        let table = build_features(&input).unwrap();

        assert_eq!(table.len(), input.len());
        assert_eq!(table.dates(), input.dates().as_slice());
        assert_eq!(table.num_columns(), EXPECTED_COLUMNS);
        assert_eq!(table.symbol(), "TEST");

        for name in [
            "open",
            "high",
            "low",
            "close",
            "volume",
            "ret_pct",
            "ret_log",
            "gap_open_prevclose",
            "spread_hl",
            "spread_co",
            "sma_10",
            "ema_200",
            "wma_50",
            "macd",
            "macd_signal",
            "macd_hist",
            "rsi_14",
            "stoch_k_14",
            "stoch_d_3",
            "williams_r_14",
            "bb_upper_20",
            "bb_mid_20",
            "bb_lower_20",
            "bbp_20",
            "atr_14",
            "hv_20",
            "obv",
            "cmf_20",
            "vwap_20",
        ] {
            assert!(table.column(name).is_some(), "missing column {name}");
        }
    }

    #[test]
    fn test_empty_input_keeps_structure() {
        let input = DailySeries::new("EMPTY");
        let table = build_features(&input).unwrap();

        assert!(table.is_empty());
        assert_eq!(table.num_columns(), EXPECTED_COLUMNS);
        assert_eq!(table.column("rsi_14").unwrap().len(), 0);
    }

    #[test]
    fn test_return_and_spread_features() {
        let input = synthetic_series(5);
        let table = build_features(&input).unwrap();
        let bars = input.bars();

        let ret_pct = table.column("ret_pct").unwrap();
        assert_eq!(ret_pct[0], None);
        let expected = (bars[1].close - bars[0].close) / bars[0].close;
        assert!((ret_pct[1].unwrap() - expected).abs() < 1e-12);

        let ret_log = table.column("ret_log").unwrap();
        assert_eq!(ret_log[0], None);
        let expected = (bars[2].close / bars[1].close).ln();
        assert!((ret_log[2].unwrap() - expected).abs() < 1e-12);

        let gap = table.column("gap_open_prevclose").unwrap();
        assert_eq!(gap[0], None);
        let expected = (bars[1].open - bars[0].close) / bars[0].close;
        assert!((gap[1].unwrap() - expected).abs() < 1e-12);

        let spread_hl = table.column("spread_hl").unwrap();
        let expected = (bars[3].high - bars[3].low) / bars[2].close;
        assert!((spread_hl[3].unwrap() - expected).abs() < 1e-12);

        let spread_co = table.column("spread_co").unwrap();
        let expected = (bars[0].close - bars[0].open) / bars[0].open;
        assert!((spread_co[0].unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_linear_close_sma_closed_form() {
        let input = linear_series(260);
        let table = build_features(&input).unwrap();

        // Closes 251..=260 at rows 250..=259; their mean is 255.5.
        let sma_10 = table.column("sma_10").unwrap();
        assert!((sma_10[259].unwrap() - 255.5).abs() < 1e-9);
        assert_eq!(sma_10[8], None);
        assert!((sma_10[9].unwrap() - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_obv_on_monotone_series() {
        let input = linear_series(50);
        let table = build_features(&input).unwrap();

        let obv = table.column("obv").unwrap();
        // Rising close: OBV is the cumulative volume past the first bar.
        assert_eq!(obv[0], Some(0.0));
        assert_eq!(obv[49], Some(49.0 * 1_000.0));
        for pair in obv.windows(2) {
            assert!(pair[1].unwrap() > pair[0].unwrap());
        }
    }

    #[test]
    fn test_bounded_oscillators() {
        let input = synthetic_series(400);
        let table = build_features(&input).unwrap();

        for value in table.column("rsi_14").unwrap().iter().flatten() {
            assert!((0.0..=100.0).contains(value));
        }
        for value in table.column("stoch_k_14").unwrap().iter().flatten() {
            assert!((0.0..=100.0).contains(value));
        }
        for value in table.column("stoch_d_3").unwrap().iter().flatten() {
            assert!((0.0..=100.0).contains(value));
        }
        for value in table.column("williams_r_14").unwrap().iter().flatten() {
            assert!((-100.0..=0.0).contains(value));
        }
        for value in table.column("atr_14").unwrap().iter().flatten() {
            assert!(*value >= 0.0);
        }
        for value in table.column("hv_20").unwrap().iter().flatten() {
            assert!(*value >= 0.0);
        }
    }

    #[test]
    fn test_no_infinities_survive() {
        // Flat ranges and a zero-volume stretch poke every division edge.
        let mut bars: Vec<Bar> = (0..80)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.13).sin() * 8.0;
                Bar::new(date(i as u64), close, close + 1.0, close - 1.0, close, 1_000.0)
            })
            .collect();
        for bar in bars.iter_mut().skip(30).take(25) {
            bar.open = bar.close;
            bar.high = bar.close;
            bar.low = bar.close;
            bar.volume = 0.0;
        }
        let input = DailySeries::from_bars("EDGE", bars).unwrap();

        let table = build_features(&input).unwrap();
        for (name, values) in table.iter() {
            for cell in values.iter().flatten() {
                assert!(cell.is_finite(), "non-finite cell in {name}");
            }
        }
    }

    #[test]
    fn test_flat_three_row_scenario() {
        let table = build_features(&flat_series(3)).unwrap();

        assert_eq!(table.len(), 3);
        // Range-based oscillators have no reading on a flat range.
        for name in ["stoch_k_14", "williams_r_14", "bbp_20"] {
            assert!(
                table.column(name).unwrap().iter().all(Option::is_none),
                "{name} should be all-None"
            );
        }
        // CMF is still warming up at 3 rows of a 20-day window.
        assert!(table.column("cmf_20").unwrap().iter().all(Option::is_none));
    }

    #[test]
    fn test_flat_range_cmf_zeroes_with_short_window() {
        let config = FeatureConfig {
            cmf: CmfConfig { period: 2 },
            ..Default::default()
        };
        let builder = FeatureBuilder::with_config(config).unwrap();

        let table = builder.build(&flat_series(4)).unwrap();
        let cmf = table.column("cmf_2").unwrap();

        assert_eq!(cmf[0], None);
        assert_eq!(cmf[1], Some(0.0));
        assert_eq!(cmf[3], Some(0.0));
    }

    #[test]
    fn test_idempotence() {
        let input = synthetic_series(250);

        let first = build_features(&input).unwrap();
        let second = build_features(&input).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_windows() {
        let config = FeatureConfig {
            moving_averages: MovingAverageConfig { windows: vec![3] },
            ..Default::default()
        };
        let builder = FeatureBuilder::with_config(config).unwrap();

        let table = builder.build(&synthetic_series(30)).unwrap();
        assert!(table.column("sma_3").is_some());
        assert!(table.column("sma_10").is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FeatureConfig {
            moving_averages: MovingAverageConfig { windows: vec![] },
            ..Default::default()
        };

        assert!(FeatureBuilder::with_config(config).is_err());
    }

    #[test]
    fn test_non_finite_input_fails_fast() {
        let bars = vec![
            Bar::new(date(0), 10.0, 11.0, 9.0, 10.5, 1_000.0),
            Bar::new(date(1), 10.5, 11.5, f64::NAN, 11.0, 1_000.0),
        ];
        let input = DailySeries::from_bars("BAD", bars).unwrap();

        let result = build_features(&input);
        assert!(matches!(
            result,
            Err(FeatureError::NonFiniteInput { field: "low", row: 1, .. })
        ));
    }

    #[test]
    fn test_macd_matches_ema_difference() {
        let input = synthetic_series(120);
        let table = build_features(&input).unwrap();

        let close_s = series::from_values(&input.closes());
        let fast = Ema::new(12).compute(&close_s);
        let slow = Ema::new(26).compute(&close_s);
        let macd = table.column("macd").unwrap();

        for i in 0..input.len() {
            let expected = fast[i].unwrap() - slow[i].unwrap();
            assert!((macd[i].unwrap() - expected).abs() < 1e-10);
        }
    }
}
