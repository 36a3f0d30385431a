//! Price history bars and issuer info as returned by the quote service.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One sampled interval of price history.
///
/// `date` is kept as the service's label: a calendar date for daily bars,
/// a timestamp for intraday ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteBar {
    #[serde(alias = "Date")]
    pub date: String,
    #[serde(alias = "Open")]
    pub open: f64,
    #[serde(alias = "High")]
    pub high: f64,
    #[serde(alias = "Low")]
    pub low: f64,
    #[serde(alias = "Close")]
    pub close: f64,
    #[serde(alias = "Volume")]
    pub volume: u64,
}

/// Flat mapping of named issuer fields. Missing fields stay absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct QuoteInfo {
    fields: Map<String, Value>,
}

impl QuoteInfo {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Numeric field, or `None` when absent or not a number (e.g. `"N/A"`).
    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    /// Non-empty text field.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn current_price(&self) -> Option<f64> {
        self.number("currentPrice")
    }

    pub fn short_name(&self) -> Option<&str> {
        self.text("shortName")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuoteSnapshot {
    #[serde(default)]
    pub history: Vec<QuoteBar>,
    #[serde(default)]
    pub info: QuoteInfo,
}
