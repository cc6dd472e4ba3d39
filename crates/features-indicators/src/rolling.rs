//! Rolling-window aggregations.
//!
//! All functions return a series of the input's length. A window that is
//! still warming up, or that contains a `None` cell, aggregates to `None`.

/// Apply `f` to each complete trailing window of `window` cells.
pub fn apply<F>(data: &[Option<f64>], window: usize, mut f: F) -> Vec<Option<f64>>
where
    F: FnMut(&[f64]) -> f64,
{
    assert!(window > 0, "Window must be greater than 0");

    let mut buf = Vec::with_capacity(window);
    (0..data.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            buf.clear();
            for cell in &data[i + 1 - window..=i] {
                match cell {
                    Some(v) => buf.push(*v),
                    None => return None,
                }
            }
            Some(f(&buf))
        })
        .collect()
}

/// Rolling sum.
pub fn sum(data: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    apply(data, window, |w| w.iter().sum())
}

/// Rolling arithmetic mean.
pub fn mean(data: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window_f64 = window as f64;
    apply(data, window, |w| w.iter().sum::<f64>() / window_f64)
}

/// Rolling minimum.
pub fn min(data: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    apply(data, window, |w| {
        w.iter().copied().fold(f64::INFINITY, f64::min)
    })
}

/// Rolling maximum.
pub fn max(data: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    apply(data, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Rolling sample standard deviation (ddof = 1).
///
/// A window shorter than 2 has no sample deviation; the result is all
/// `None`.
pub fn stddev(data: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; data.len()];
    }
    let window_f64 = window as f64;
    apply(data, window, |w| {
        let mean = w.iter().sum::<f64>() / window_f64;
        let variance = w.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (window_f64 - 1.0);
        variance.sqrt()
    })
}
