//! Directory-backed market data adapter.
//!
//! Layout, one directory per symbol:
//!
//! ```text
//! <base>/<SYMBOL>/history_<period>_<interval>.csv   (or history.csv)
//!                 info.json
//!                 options.json, options_<expiration>.json
//!                 filings.json
//!                 news.json
//!                 financials.json
//! ```

use crate::domain::error::TickerdashError;
use crate::domain::financials::FinancialsBundle;
use crate::domain::options::OptionsChain;
use crate::domain::quote::{QuoteBar, QuoteInfo, QuoteSnapshot};
use crate::domain::records::{FilingRecord, NewsRecord};
use crate::ports::market_data_port::MarketDataPort;
use log::debug;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileDataAdapter {
    base_path: PathBuf,
}

impl FileDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn symbol_dir(&self, symbol: &str) -> PathBuf {
        self.base_path.join(symbol)
    }

    fn history_path(&self, symbol: &str, period: &str, interval: &str) -> PathBuf {
        let dir = self.symbol_dir(symbol);
        let specific = dir.join(format!("history_{}_{}.csv", period, interval));
        if specific.exists() {
            specific
        } else {
            dir.join("history.csv")
        }
    }

    fn options_path(&self, symbol: &str, expiration: Option<&str>) -> PathBuf {
        let dir = self.symbol_dir(symbol);
        match expiration {
            Some(exp) => dir.join(format!("options_{}.json", exp)),
            None => dir.join("options.json"),
        }
    }
}

fn read_file(path: &Path) -> Result<String, TickerdashError> {
    debug!("reading {}", path.display());
    fs::read_to_string(path).map_err(|e| TickerdashError::DataSource {
        reason: format!("failed to read {}: {}", path.display(), e),
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TickerdashError> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| TickerdashError::DataSource {
        reason: format!("invalid JSON in {}: {}", path.display(), e),
    })
}

fn read_history(path: &Path) -> Result<Vec<QuoteBar>, TickerdashError> {
    let content = read_file(path)?;
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut bars = Vec::new();

    for (line, result) in rdr.deserialize::<QuoteBar>().enumerate() {
        let bar = result.map_err(|e| TickerdashError::DataSource {
            reason: format!("{} row {}: {}", path.display(), line + 1, e),
        })?;
        bars.push(bar);
    }

    Ok(bars)
}

impl MarketDataPort for FileDataAdapter {
    fn fetch_quote(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<QuoteSnapshot, TickerdashError> {
        let history = read_history(&self.history_path(symbol, period, interval))?;
        let info_path = self.symbol_dir(symbol).join("info.json");
        let info = if info_path.exists() {
            read_json::<QuoteInfo>(&info_path)?
        } else {
            QuoteInfo::default()
        };
        Ok(QuoteSnapshot { history, info })
    }

    fn fetch_options(
        &self,
        symbol: &str,
        expiration: Option<&str>,
    ) -> Result<OptionsChain, TickerdashError> {
        let path = self.options_path(symbol, expiration);
        if expiration.is_none() && !path.exists() {
            // No listed options for this symbol.
            return Ok(OptionsChain::default());
        }
        read_json(&path)
    }

    fn fetch_filings(&self, symbol: &str) -> Result<Vec<FilingRecord>, TickerdashError> {
        read_json(&self.symbol_dir(symbol).join("filings.json"))
    }

    fn fetch_news(&self, symbol: &str) -> Result<Vec<NewsRecord>, TickerdashError> {
        read_json(&self.symbol_dir(symbol).join("news.json"))
    }

    fn fetch_financials(&self, symbol: &str) -> Result<FinancialsBundle, TickerdashError> {
        read_json(&self.symbol_dir(symbol).join("financials.json"))
    }
}
