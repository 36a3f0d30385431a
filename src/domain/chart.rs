//! Indicator-augmented price series for the dashboard chart.

use crate::domain::indicator::IndicatorSeries;
use crate::domain::indicator::ema::calculate_ema;
use crate::domain::quote::QuoteBar;
use crate::domain::volume::volume_axis_max;

pub const DEFAULT_EMA_WINDOWS: [usize; 2] = [20, 50];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceChart {
    pub dates: Vec<String>,
    pub closes: Vec<f64>,
    pub volumes: Vec<u64>,
    pub overlays: Vec<IndicatorSeries>,
    pub volume_axis_max: f64,
}

impl PriceChart {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn latest_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }
}

pub fn build_price_chart(history: &[QuoteBar], ema_windows: &[usize]) -> PriceChart {
    let dates = history.iter().map(|bar| bar.date.clone()).collect();
    let closes: Vec<f64> = history.iter().map(|bar| bar.close).collect();
    let volumes: Vec<u64> = history.iter().map(|bar| bar.volume).collect();

    let overlays = ema_windows
        .iter()
        .map(|&window| calculate_ema(&closes, window))
        .collect();
    let volume_axis_max = volume_axis_max(&volumes);

    PriceChart {
        dates,
        closes,
        volumes,
        overlays,
        volume_axis_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::IndicatorType;

    fn bar(date: &str, close: f64, volume: u64) -> QuoteBar {
        QuoteBar {
            date: date.into(),
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }

    #[test]
    fn chart_aligns_series_with_history() {
        let history = vec![
            bar("2024-01-02", 10.0, 40_000_000),
            bar("2024-01-03", 12.0, 60_000_000),
            bar("2024-01-04", 11.0, 20_000_000),
        ];
        let chart = build_price_chart(&history, &DEFAULT_EMA_WINDOWS);

        assert_eq!(chart.dates, vec!["2024-01-02", "2024-01-03", "2024-01-04"]);
        assert_eq!(chart.closes, vec![10.0, 12.0, 11.0]);
        assert_eq!(chart.overlays.len(), 2);
        assert_eq!(chart.overlays[0].indicator_type, IndicatorType::Ema(20));
        assert_eq!(chart.overlays[1].indicator_type, IndicatorType::Ema(50));
        for overlay in &chart.overlays {
            assert_eq!(overlay.values.len(), 3);
            assert_eq!(overlay.values[0], 10.0);
        }
        assert_eq!(chart.volume_axis_max, 300_000_000.0);
        assert_eq!(chart.latest_close(), Some(11.0));
    }

    #[test]
    fn empty_history() {
        let chart = build_price_chart(&[], &DEFAULT_EMA_WINDOWS);
        assert!(chart.is_empty());
        assert_eq!(chart.volume_axis_max, 0.0);
        assert!(chart.overlays.iter().all(|o| o.values.is_empty()));
    }
}
