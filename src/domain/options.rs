//! Options chain types and the strike window around the at-the-money row.
//!
//! `calls[i]` and `puts[i]` describe the same strike and both sides ascend by
//! strike. Windowing relies on that positional alignment; [`validate_chain`]
//! checks it where chain data enters the engine.

use crate::domain::error::TickerdashError;
use serde::Deserialize;
use std::cmp::Ordering;

/// Radius choices offered by the strike-window selector.
pub const STRIKE_WINDOW_PRESETS: [usize; 5] = [5, 10, 15, 20, 25];
pub const DEFAULT_STRIKE_WINDOW: usize = 5;

pub const GREEK_LABELS: [&str; 5] = ["Delta", "Gamma", "Theta", "Vega", "Rho"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Greeks {
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub theta: Option<f64>,
    pub vega: Option<f64>,
    pub rho: Option<f64>,
}

impl Greeks {
    /// Values in [`GREEK_LABELS`] order.
    pub fn values(&self) -> [Option<f64>; 5] {
        [self.delta, self.gamma, self.theta, self.vega, self.rho]
    }

    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> {
        GREEK_LABELS.into_iter().zip(self.values())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OptionRow {
    pub strike: f64,
    #[serde(default)]
    pub bid: Option<f64>,
    #[serde(default)]
    pub ask: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(flatten)]
    pub greeks: Greeks,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OptionsChain {
    pub expiration: String,
    pub expirations: Vec<String>,
    pub calls: Vec<OptionRow>,
    pub puts: Vec<OptionRow>,
}

impl OptionsChain {
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }
}

/// Check that calls and puts line up strike-for-strike in strictly ascending order.
pub fn validate_chain(chain: &OptionsChain) -> Result<(), TickerdashError> {
    if chain.calls.len() != chain.puts.len() {
        return Err(TickerdashError::ChainIntegrity {
            reason: format!(
                "{} calls but {} puts for expiration {}",
                chain.calls.len(),
                chain.puts.len(),
                chain.expiration
            ),
        });
    }

    for (i, (call, put)) in chain.calls.iter().zip(&chain.puts).enumerate() {
        if call.strike != put.strike {
            return Err(TickerdashError::ChainIntegrity {
                reason: format!(
                    "row {}: call strike {} does not match put strike {}",
                    i, call.strike, put.strike
                ),
            });
        }
        if i > 0 {
            let prev = chain.calls[i - 1].strike;
            if call.strike.partial_cmp(&prev) != Some(Ordering::Greater) {
                return Err(TickerdashError::ChainIntegrity {
                    reason: format!(
                        "row {}: strike {} does not ascend from {}",
                        i, call.strike, prev
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Index of the strike closest to `price`. The first of equally close strikes wins.
pub fn nearest_strike_index(rows: &[OptionRow], price: f64) -> Option<usize> {
    let first = rows.first()?;
    let mut best = 0;
    let mut best_distance = (first.strike - price).abs();

    for (i, row) in rows.iter().enumerate().skip(1) {
        let distance = (row.strike - price).abs();
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }

    Some(best)
}

/// Rows within `radius` of the at-the-money strike, both sides sliced alike.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrikeWindow {
    pub calls: Vec<OptionRow>,
    pub puts: Vec<OptionRow>,
    /// Nearest row to the price within this window, for highlighting.
    pub atm_row: Option<usize>,
}

impl StrikeWindow {
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&OptionRow, Option<&OptionRow>)> {
        self.calls
            .iter()
            .enumerate()
            .map(|(i, call)| (call, self.puts.get(i)))
    }

    /// Greeks for both sides of `strike`, if that strike is in the window.
    pub fn selection_for(&self, strike: f64) -> Option<OptionSelection> {
        let i = self.calls.iter().position(|row| row.strike == strike)?;
        Some(OptionSelection {
            strike,
            call_greeks: self.calls[i].greeks,
            put_greeks: self.puts.get(i).map(|put| put.greeks).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionSelection {
    pub strike: f64,
    pub call_greeks: Greeks,
    pub put_greeks: Greeks,
}

/// Slice `[atm - radius, atm + radius]` out of both sides.
///
/// A missing or zero price, or an empty side, yields an empty window.
pub fn window_chain(
    calls: &[OptionRow],
    puts: &[OptionRow],
    current_price: Option<f64>,
    radius: usize,
) -> StrikeWindow {
    let price = match current_price {
        Some(p) if p != 0.0 && p.is_finite() => p,
        _ => return StrikeWindow::default(),
    };
    if calls.is_empty() || puts.is_empty() {
        return StrikeWindow::default();
    }
    let Some(center) = nearest_strike_index(calls, price) else {
        return StrikeWindow::default();
    };

    let start = center.saturating_sub(radius);
    let end = center + radius + 1;
    let calls = clamped_slice(calls, start, end).to_vec();
    let puts = clamped_slice(puts, start, end).to_vec();
    let atm_row = nearest_strike_index(&calls, price);

    StrikeWindow {
        calls,
        puts,
        atm_row,
    }
}

fn clamped_slice(rows: &[OptionRow], start: usize, end: usize) -> &[OptionRow] {
    let end = end.min(rows.len());
    let start = start.min(end);
    &rows[start..end]
}
