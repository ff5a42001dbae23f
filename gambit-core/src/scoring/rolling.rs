//! Rolling-window primitives over a single price column.
//!
//! All functions return a vector the same length as the input with NaN
//! before the first valid index. NaN inputs propagate through any window
//! that contains them.

/// Rolling mean. First valid value at index `window - 1`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if window == 0 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[(i + 1 - window)..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = slice.iter().sum::<f64>() / window as f64;
    }
    result
}

/// Day-over-day percentage change, with the first observation (and any
/// change computed from a NaN neighbor) set to zero rather than NaN so a
/// downstream rolling window is not poisoned by the series start.
pub fn pct_change_fill_zero(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![0.0; n];
    for i in 1..n {
        let prev = values[i - 1];
        let curr = values[i];
        if prev.is_nan() || curr.is_nan() || prev == 0.0 {
            continue;
        }
        result[i] = curr / prev - 1.0;
    }
    result
}

/// Rolling sample standard deviation (n − 1 denominator).
/// First valid value at index `window - 1`; a window of 1 yields zero.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if window == 0 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[(i + 1 - window)..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        if window == 1 {
            result[i] = 0.0;
            continue;
        }
        let mean = slice.iter().sum::<f64>() / window as f64;
        let var = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (window - 1) as f64;
        result[i] = var.sqrt();
    }
    result
}

/// Cross-sectional min-max normalization over one date's values.
///
/// NaN entries stay NaN and do not participate in the min/max. When every
/// valid value is equal the whole cross-section gets 0.5 — "no signal"
/// rather than a division by zero.
pub fn min_max_normalize(values: &mut [f64]) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter() {
        if v.is_nan() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() {
        return;
    }
    let range = max - min;
    for v in values.iter_mut() {
        if v.is_nan() {
            continue;
        }
        *v = if range == 0.0 { 0.5 } else { (*v - min) / range };
    }
}
