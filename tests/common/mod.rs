#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tickerdash::domain::error::{Dataset, TickerdashError};
use tickerdash::domain::financials::FinancialsBundle;
use tickerdash::domain::options::{Greeks, OptionRow, OptionsChain};
use tickerdash::domain::quote::{QuoteBar, QuoteInfo, QuoteSnapshot};
use tickerdash::domain::records::{FilingRecord, NewsRecord};
use tickerdash::ports::market_data_port::MarketDataPort;

/// In-memory port keyed by symbol. Symbols with no fixture return empty data.
#[derive(Default)]
pub struct MockMarketDataPort {
    pub quotes: HashMap<String, QuoteSnapshot>,
    pub options: HashMap<String, OptionsChain>,
    pub options_by_expiration: HashMap<(String, String), OptionsChain>,
    pub filings: HashMap<String, Vec<FilingRecord>>,
    pub news: HashMap<String, Vec<NewsRecord>>,
    pub financials: HashMap<String, FinancialsBundle>,
    pub errors: HashMap<(String, Dataset), String>,
    pub calls: Rc<RefCell<Vec<String>>>,
}

impl MockMarketDataPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, symbol: &str, quote: QuoteSnapshot) -> Self {
        self.quotes.insert(symbol.to_string(), quote);
        self
    }

    pub fn with_options(mut self, symbol: &str, chain: OptionsChain) -> Self {
        self.options.insert(symbol.to_string(), chain);
        self
    }

    pub fn with_expiration(mut self, symbol: &str, expiration: &str, chain: OptionsChain) -> Self {
        self.options_by_expiration
            .insert((symbol.to_string(), expiration.to_string()), chain);
        self
    }

    pub fn with_filings(mut self, symbol: &str, filings: Vec<FilingRecord>) -> Self {
        self.filings.insert(symbol.to_string(), filings);
        self
    }

    pub fn with_news(mut self, symbol: &str, news: Vec<NewsRecord>) -> Self {
        self.news.insert(symbol.to_string(), news);
        self
    }

    pub fn with_financials(mut self, symbol: &str, bundle: FinancialsBundle) -> Self {
        self.financials.insert(symbol.to_string(), bundle);
        self
    }

    pub fn with_error(mut self, symbol: &str, dataset: Dataset, reason: &str) -> Self {
        self.errors
            .insert((symbol.to_string(), dataset), reason.to_string());
        self
    }

    /// Shared handle on the log of calls, usable after the port is boxed.
    pub fn call_log(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.calls)
    }

    fn record(&self, symbol: &str, dataset: Dataset) -> Result<(), TickerdashError> {
        self.calls.borrow_mut().push(format!("{}:{}", dataset, symbol));
        match self.errors.get(&(symbol.to_string(), dataset)) {
            Some(reason) => Err(TickerdashError::DataSource {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl MarketDataPort for MockMarketDataPort {
    fn fetch_quote(
        &self,
        symbol: &str,
        _period: &str,
        _interval: &str,
    ) -> Result<QuoteSnapshot, TickerdashError> {
        self.record(symbol, Dataset::Quote)?;
        Ok(self.quotes.get(symbol).cloned().unwrap_or_default())
    }

    fn fetch_options(
        &self,
        symbol: &str,
        expiration: Option<&str>,
    ) -> Result<OptionsChain, TickerdashError> {
        self.record(symbol, Dataset::Options)?;
        let chain = match expiration {
            Some(exp) => self
                .options_by_expiration
                .get(&(symbol.to_string(), exp.to_string())),
            None => self.options.get(symbol),
        };
        Ok(chain.cloned().unwrap_or_default())
    }

    fn fetch_filings(&self, symbol: &str) -> Result<Vec<FilingRecord>, TickerdashError> {
        self.record(symbol, Dataset::Filings)?;
        Ok(self.filings.get(symbol).cloned().unwrap_or_default())
    }

    fn fetch_news(&self, symbol: &str) -> Result<Vec<NewsRecord>, TickerdashError> {
        self.record(symbol, Dataset::News)?;
        Ok(self.news.get(symbol).cloned().unwrap_or_default())
    }

    fn fetch_financials(&self, symbol: &str) -> Result<FinancialsBundle, TickerdashError> {
        self.record(symbol, Dataset::Financials)?;
        Ok(self.financials.get(symbol).cloned().unwrap_or_default())
    }
}

pub fn make_bar(date: &str, close: f64, volume: u64) -> QuoteBar {
    QuoteBar {
        date: date.to_string(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume,
    }
}

pub fn make_quote(name: &str, price: f64, closes: &[f64]) -> QuoteSnapshot {
    let history = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(&format!("2024-01-{:02}", i + 1), close, 1_000_000))
        .collect();
    let info: QuoteInfo = serde_json::from_value(serde_json::json!({
        "shortName": name,
        "currentPrice": price,
    }))
    .unwrap();
    QuoteSnapshot { history, info }
}

pub fn make_row(strike: f64) -> OptionRow {
    OptionRow {
        strike,
        bid: Some(strike / 20.0),
        ask: Some(strike / 19.0),
        volume: Some(100.0),
        greeks: Greeks {
            delta: Some(0.5),
            gamma: Some(0.02),
            theta: Some(-0.1),
            vega: Some(0.3),
            rho: Some(0.05),
        },
    }
}

pub fn make_chain(expiration: &str, strikes: &[f64]) -> OptionsChain {
    let rows: Vec<OptionRow> = strikes.iter().copied().map(make_row).collect();
    OptionsChain {
        expiration: expiration.to_string(),
        expirations: vec![expiration.to_string()],
        calls: rows.clone(),
        puts: rows,
    }
}

pub fn make_filings(count: usize) -> Vec<FilingRecord> {
    (0..count)
        .map(|i| FilingRecord {
            title: if i % 2 == 0 {
                format!("10-Q Quarterly report {}", i)
            } else {
                format!("8-K Current report {}", i)
            },
            summary: format!("<b>Filed:</b> item {}", i),
            link: format!("https://example.test/filing/{}", i),
        })
        .collect()
}

pub fn make_news(count: usize) -> Vec<NewsRecord> {
    (0..count)
        .map(|i| NewsRecord {
            headline: format!("Headline {}", i),
            summary: String::new(),
            url: format!("https://example.test/news/{}", i),
            source: "Wire".to_string(),
            datetime: 1_700_000_000 + i as i64 * 60,
        })
        .collect()
}

pub fn make_financials() -> FinancialsBundle {
    serde_json::from_value(serde_json::json!({
        "keyMetrics": [
            {"date": "2024-06-30", "peRatio": 25.5, "roe": 0.2512, "marketCap": 1234567890.0},
            {"date": "2023-06-30", "peRatio": 18.0, "roe": 0.1}
        ],
        "ratios": [
            {"date": "2024-06-30", "grossProfitMargin": 0.155, "currentRatio": 2.5}
        ]
    }))
    .unwrap()
}
