//! Exponential Moving Average over closing prices.
//!
//! k = 2/(n+1), seeded with the first value, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! No warmup: every output is usable.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn ema(series: &[f64], window: usize) -> Vec<f64> {
    let Some((&first, rest)) = series.split_first() else {
        return Vec::new();
    };
    if window == 0 {
        return Vec::new();
    }

    let k = 2.0 / (window as f64 + 1.0);
    let mut values = Vec::with_capacity(series.len());
    let mut prev = first;
    values.push(prev);

    for &close in rest {
        prev = close * k + prev * (1.0 - k);
        values.push(prev);
    }

    values
}

pub fn calculate_ema(closes: &[f64], window: usize) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type: IndicatorType::Ema(window),
        values: ema(closes, window),
    }
}
