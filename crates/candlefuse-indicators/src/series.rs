//! Shared series helpers for the indicator functions.

use candlefuse_core::Bar;

pub(crate) fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

pub(crate) fn highs(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.high).collect()
}

pub(crate) fn lows(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.low).collect()
}

pub(crate) fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

pub(crate) fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Simple moving average over sliding windows. Returns
/// `values.len() - period + 1` points, or empty when too short.
pub(crate) fn sma_series(values: &[f64], period: usize) -> Vec<f64> {
    if values.len() < period || period == 0 {
        return vec![];
    }
    let period_f64 = period as f64;
    let mut result = Vec::with_capacity(values.len() - period + 1);
    let mut sum: f64 = values[..period].iter().sum();
    result.push(sum / period_f64);
    for i in period..values.len() {
        sum = sum - values[i - period] + values[i];
        result.push(sum / period_f64);
    }
    result
}

/// Exponential moving average seeded with the first value, one output per
/// input. This matches the recursive span-based definition, so a window
/// of exactly `period` bars already produces a usable value.
pub(crate) fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if values.is_empty() {
        return vec![];
    }
    let k = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len());
    let mut ema = values[0];
    result.push(ema);
    for &v in &values[1..] {
        ema = v * k + ema * (1.0 - k);
        result.push(ema);
    }
    result
}

/// Wilder smoothing: seed with the mean of the first `period` values,
/// then `avg = (prev * (period - 1) + value) / period`.
pub(crate) fn wilder_series(values: &[f64], period: usize) -> Vec<f64> {
    if values.len() < period || period == 0 {
        return vec![];
    }
    let period_f64 = period as f64;
    let mut result = Vec::with_capacity(values.len() - period + 1);
    let mut avg = values[..period].iter().sum::<f64>() / period_f64;
    result.push(avg);
    for &v in &values[period..] {
        avg = (avg * (period_f64 - 1.0) + v) / period_f64;
        result.push(avg);
    }
    result
}

/// True-range series; the first element falls back to high - low.
pub(crate) fn true_ranges(bars: &[Bar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, b)| {
            let prev_close = if i > 0 { Some(bars[i - 1].close) } else { None };
            b.true_range(prev_close)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_series_sliding() {
        let out = sma_series(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(out, vec![2.0, 3.0, 4.0]);
        assert!(sma_series(&[1.0, 2.0], 3).is_empty());
    }

    #[test]
    fn test_ema_series_seeded_with_first() {
        let out = ema_series(&[10.0, 10.0, 10.0], 5);
        assert_eq!(out, vec![10.0, 10.0, 10.0]);
        let out = ema_series(&[0.0, 3.0], 2);
        // k = 2/3
        assert!((out[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_wilder_series() {
        let out = wilder_series(&[2.0, 4.0, 6.0, 8.0], 2);
        // seed = 3, then (3*1 + 6)/2 = 4.5, then (4.5 + 8)/2 = 6.25
        assert_eq!(out, vec![3.0, 4.5, 6.25]);
    }
}
