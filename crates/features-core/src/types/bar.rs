//! Daily OHLCV data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, FeatureResult};

/// One day's OHLCV record for an instrument.
///
/// Whether `close` is raw or dividend/split-adjusted is the caller's
/// decision; the pipeline treats the adjustment convention as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading day
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Calculate the typical price (HLC average).
    #[inline]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Calculate the bar's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Calculate the bar's body size (absolute difference between open and close).
    #[inline]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Check if the bar is bullish (close > open).
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if the bar is bearish (close < open).
    #[inline]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Calculate the true range.
    ///
    /// With no previous close (the first bar of a series) the true range
    /// collapses to the plain high-low range.
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        match prev_close {
            Some(pc) => {
                let hl = self.high - self.low;
                let hc = (self.high - pc).abs();
                let lc = (self.low - pc).abs();
                hl.max(hc).max(lc)
            }
            None => self.high - self.low,
        }
    }
}

/// Ordered daily bar series for a single instrument.
///
/// Bars are held ascending by date with no duplicates; every rolling
/// operator in the pipeline relies on that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl DailySeries {
    /// Create an empty series.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    /// Build a series from bars, sorting by date.
    ///
    /// Fails fast on duplicate dates (an input-contract violation).
    /// Calendar gaps (missing trading days) are fine and stay absent rows.
    pub fn from_bars(symbol: impl Into<String>, mut bars: Vec<Bar>) -> FeatureResult<Self> {
        bars.sort_by_key(|b| b.date);
        for pair in bars.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(FeatureError::DuplicateDate(pair[0].date));
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    /// Append a bar.
    ///
    /// The bar must be strictly later than the current last date.
    pub fn push(&mut self, bar: Bar) -> FeatureResult<()> {
        if let Some(last) = self.bars.last() {
            if bar.date == last.date {
                return Err(FeatureError::DuplicateDate(bar.date));
            }
            if bar.date < last.date {
                return Err(FeatureError::OutOfOrderDate(bar.date));
            }
        }
        self.bars.push(bar);
        Ok(())
    }

    /// Instrument symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get a bar by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Extract the date index.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// Extract open prices as a vector.
    pub fn opens(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.open).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract volumes as a vector.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Extract typical prices as a vector.
    pub fn typical_prices(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.typical_price()).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}
