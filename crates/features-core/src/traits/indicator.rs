//! Indicator trait definitions.

/// Trait for single-series indicators.
///
/// An indicator consumes an optional-cell series and produces a series of
/// the same length and index. Cells inside the warm-up span, and cells
/// whose inputs are themselves missing, come back as `None`; indicators
/// are total functions and never raise on numeric edge cases.
pub trait Indicator: Send + Sync {
    /// The per-cell output type of the indicator.
    type Output;

    /// Compute the indicator over the given series.
    ///
    /// The result has exactly `data.len()` cells, aligned 1:1 with the
    /// input.
    fn compute(&self, data: &[Option<f64>]) -> Vec<Self::Output>;

    /// Number of leading input cells consumed before the first defined
    /// output cell (the warm-up period).
    fn min_periods(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

/// Multi-output indicator (e.g. Bollinger Bands, MACD).
///
/// Some indicators produce multiple related values per cell.
pub trait MultiOutputIndicator: Send + Sync {
    /// The per-cell output type containing multiple values.
    type Outputs;

    /// Compute the indicator over the given series, index-aligned.
    fn compute(&self, data: &[Option<f64>]) -> Vec<Self::Outputs>;

    /// Number of leading input cells consumed before the first fully
    /// defined output cell.
    fn min_periods(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}
