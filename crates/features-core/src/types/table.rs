//! The enriched output table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, FeatureResult};

/// A named feature column aligned with the table's date index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Column {
    name: String,
    values: Vec<Option<f64>>,
}

/// Date-indexed table of feature columns.
///
/// Holds the input series' original columns plus every computed feature,
/// all with the same row count and date alignment. Columns keep their
/// insertion order. A fresh table is built per orchestrator call; the
/// caller's input is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    symbol: String,
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl FeatureTable {
    /// Create a table with a date index and no columns yet.
    pub fn new(symbol: impl Into<String>, dates: Vec<NaiveDate>) -> Self {
        Self {
            symbol: symbol.into(),
            dates,
            columns: Vec::new(),
        }
    }

    /// Instrument symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The date index.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Append a column.
    ///
    /// Fails if the column length does not match the date index or the
    /// name is already taken.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> FeatureResult<()> {
        let name = name.into();
        if values.len() != self.dates.len() {
            return Err(FeatureError::LengthMismatch {
                column: name,
                expected: self.dates.len(),
                actual: values.len(),
            });
        }
        if self.columns.iter().any(|c| c.name == name) {
            return Err(FeatureError::DuplicateColumn(name));
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Column names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Iterate over `(name, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.values.as_slice()))
    }

    /// Replace every non-finite cell (±inf or NaN) with `None`.
    ///
    /// Returns the number of cells replaced. This is the pipeline's final
    /// failure-containment sweep: no computed feature may surface an
    /// infinite value to the caller.
    pub fn sanitize_non_finite(&mut self) -> usize {
        let mut replaced = 0;
        for column in &mut self.columns {
            for cell in &mut column.values {
                if let Some(v) = cell {
                    if !v.is_finite() {
                        *cell = None;
                        replaced += 1;
                    }
                }
            }
        }
        replaced
    }
}
