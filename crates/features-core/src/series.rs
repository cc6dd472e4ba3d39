//! Combinators over optional-cell series.
//!
//! Every computed series in the pipeline is a `Vec<Option<f64>>`, where
//! `None` marks a cell with no value (warm-up gap or numeric edge case).
//! The combinators here short-circuit on `None`, so indicator formulas
//! never carry per-cell null checks.

/// Wrap raw values into an all-present series.
pub fn from_values(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/// Apply `f` cell-wise; `None` cells stay `None`.
pub fn map<F>(data: &[Option<f64>], f: F) -> Vec<Option<f64>>
where
    F: Fn(f64) -> f64,
{
    data.iter().map(|cell| cell.map(&f)).collect()
}

/// Combine two aligned series cell-wise; a `None` on either side wins.
pub fn map2<F>(a: &[Option<f64>], b: &[Option<f64>], f: F) -> Vec<Option<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(f(*x, *y)),
            _ => None,
        })
        .collect()
}

/// Combine two aligned series with a partial function.
///
/// Like [`map2`], but `f` may itself decline to produce a value.
pub fn try_map2<F>(a: &[Option<f64>], b: &[Option<f64>], f: F) -> Vec<Option<f64>>
where
    F: Fn(f64, f64) -> Option<f64>,
{
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => f(*x, *y),
            _ => None,
        })
        .collect()
}

/// Cell-wise division; a zero denominator yields `None` rather than ±inf.
pub fn div(num: &[Option<f64>], den: &[Option<f64>]) -> Vec<Option<f64>> {
    try_map2(num, den, |n, d| if d == 0.0 { None } else { Some(n / d) })
}

/// Lag a series by `periods` cells, filling the head with `None`.
pub fn shift(data: &[Option<f64>], periods: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; data.len().min(periods)];
    if data.len() > periods {
        result.extend_from_slice(&data[..data.len() - periods]);
    }
    result
}

/// First difference: `x[t] - x[t-1]`, with `None` at index 0.
pub fn diff(data: &[Option<f64>]) -> Vec<Option<f64>> {
    map2(data, &shift(data, 1), |curr, prev| curr - prev)
}
