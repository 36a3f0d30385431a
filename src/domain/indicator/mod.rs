//! Technical overlays drawn on the price chart.
//!
//! - `IndicatorType`: indicator identity + parameters
//! - `IndicatorSeries`: one computed value per history bar

pub mod ema;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Ema(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<f64>,
}

impl IndicatorSeries {
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Ema(window) => write!(f, "EMA({})", window),
        }
    }
}
