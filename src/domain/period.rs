//! Period/interval combinations accepted by the quote service.
//!
//! Short periods allow intraday sampling; long periods only daily or weekly.
//! Any period outside the table is sampled daily.

/// Periods offered for the price history, in menu order.
pub const PERIODS: [&str; 6] = ["1d", "5d", "1mo", "3mo", "6mo", "12mo"];

/// Every interval label the quote service understands, finest first.
pub const INTERVALS: [&str; 6] = ["1m", "5m", "15m", "30m", "1d", "1wk"];

pub const DEFAULT_PERIOD: &str = "1mo";
pub const DEFAULT_INTERVAL: &str = "1d";

const FALLBACK_INTERVALS: &[&str] = &["1d"];

/// Legal sampling intervals for `period`, never empty.
pub fn valid_intervals(period: &str) -> &'static [&'static str] {
    match period {
        "1d" => &["1m", "5m", "15m", "30m"],
        "5d" => &["1m", "5m", "15m", "30m", "1d"],
        "1mo" => &["5m", "15m", "30m", "1d", "1wk"],
        "3mo" | "6mo" | "12mo" => &["1d", "1wk"],
        _ => FALLBACK_INTERVALS,
    }
}

pub fn is_valid_interval(period: &str, interval: &str) -> bool {
    valid_intervals(period).contains(&interval)
}

/// Keep `current` if `period` allows it, else fall back to the period's first interval.
pub fn reconcile<'a>(period: &str, current: &'a str) -> &'a str {
    let valid = valid_intervals(period);
    if valid.contains(&current) {
        current
    } else {
        valid[0]
    }
}
