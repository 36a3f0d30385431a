//! Financial ratio history and the fixed metric catalog shown beside it.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Shown in place of a metric the source did not report.
pub const MISSING_VALUE: &str = "–";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSource {
    KeyMetrics,
    Ratios,
}

pub type MetricFormatter = fn(f64) -> String;

#[derive(Debug, Clone, Copy)]
pub struct MetricDefinition {
    pub label: &'static str,
    pub key: &'static str,
    pub source: MetricSource,
    pub format: Option<MetricFormatter>,
}

impl MetricDefinition {
    pub fn display(&self, value: f64) -> String {
        match self.format {
            Some(format) => format(value),
            None => value.to_string(),
        }
    }

    /// Value as plotted: formatted, then read back as a number.
    pub fn plot_value(&self, value: f64) -> Option<f64> {
        match self.format {
            Some(format) => coerce_numeric(&format(value)),
            None => Some(value),
        }
    }
}

pub const METRIC_CATALOG: &[MetricDefinition] = &[
    MetricDefinition {
        label: "P/E Ratio",
        key: "peRatio",
        source: MetricSource::KeyMetrics,
        format: None,
    },
    MetricDefinition {
        label: "P/B Ratio",
        key: "pbRatio",
        source: MetricSource::KeyMetrics,
        format: None,
    },
    MetricDefinition {
        label: "Return on Equity",
        key: "roe",
        source: MetricSource::KeyMetrics,
        format: Some(format_percent),
    },
    MetricDefinition {
        label: "Gross Margin",
        key: "grossProfitMargin",
        source: MetricSource::Ratios,
        format: Some(format_percent),
    },
    MetricDefinition {
        label: "EBITDA Margin",
        key: "ebitdaMargin",
        source: MetricSource::Ratios,
        format: Some(format_percent),
    },
    MetricDefinition {
        label: "Net Margin",
        key: "netProfitMargin",
        source: MetricSource::Ratios,
        format: Some(format_percent),
    },
    MetricDefinition {
        label: "Debt/Equity",
        key: "debtToEquity",
        source: MetricSource::KeyMetrics,
        format: None,
    },
    MetricDefinition {
        label: "Current Ratio",
        key: "currentRatio",
        source: MetricSource::Ratios,
        format: None,
    },
    MetricDefinition {
        label: "Market Cap",
        key: "marketCap",
        source: MetricSource::KeyMetrics,
        format: Some(format_grouped),
    },
];

pub fn metric_by_key(key: &str) -> Option<&'static MetricDefinition> {
    METRIC_CATALOG.iter().find(|def| def.key == key)
}

/// Fraction as a percentage with two decimals: `0.1234` -> `"12.34%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Rounded to a whole number with `,` thousands separators.
pub fn format_grouped(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && digits != "0" {
        grouped.insert(0, '-');
    }
    grouped
}

fn coerce_numeric(display: &str) -> Option<f64> {
    let cleaned: String = display
        .chars()
        .filter(|c| *c != ',' && *c != '%')
        .collect();
    cleaned.trim().parse().ok()
}

/// One dated record of named metric values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricRecord {
    #[serde(default)]
    pub date: String,
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl MetricRecord {
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(Value::as_f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FinancialsBundle {
    #[serde(rename = "keyMetrics", default)]
    pub key_metrics: Vec<MetricRecord>,
    #[serde(default)]
    pub ratios: Vec<MetricRecord>,
}

impl FinancialsBundle {
    pub fn collection(&self, source: MetricSource) -> &[MetricRecord] {
        match source {
            MetricSource::KeyMetrics => &self.key_metrics,
            MetricSource::Ratios => &self.ratios,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key_metrics.is_empty() && self.ratios.is_empty()
    }
}

/// Display value from the first (latest) record, or [`MISSING_VALUE`].
pub fn latest_value(bundle: &FinancialsBundle, def: &MetricDefinition) -> String {
    bundle
        .collection(def.source)
        .first()
        .and_then(|record| record.value(def.key))
        .map(|value| def.display(value))
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    pub x: String,
    pub y: f64,
}

/// History of one metric in source order. Records without a value are skipped.
pub fn series(bundle: &FinancialsBundle, def: &MetricDefinition) -> Vec<MetricPoint> {
    bundle
        .collection(def.source)
        .iter()
        .filter_map(|record| {
            let y = def.plot_value(record.value(def.key)?)?;
            Some(MetricPoint {
                x: record.date.clone(),
                y,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub label: &'static str,
    pub key: &'static str,
    pub value: String,
    pub selected: bool,
}

pub fn metrics_table(bundle: &FinancialsBundle, selected: Option<&str>) -> Vec<MetricRow> {
    METRIC_CATALOG
        .iter()
        .map(|def| MetricRow {
            label: def.label,
            key: def.key,
            value: latest_value(bundle, def),
            selected: selected == Some(def.key),
        })
        .collect()
}
