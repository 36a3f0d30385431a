//! Remote market data services consumed by the session.
//!
//! Each call returns the whole collection for a symbol or an error; paging
//! happens client-side.

use crate::domain::error::TickerdashError;
use crate::domain::financials::FinancialsBundle;
use crate::domain::options::OptionsChain;
use crate::domain::quote::QuoteSnapshot;
use crate::domain::records::{FilingRecord, NewsRecord};

pub trait MarketDataPort {
    fn fetch_quote(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<QuoteSnapshot, TickerdashError>;

    /// Chain for `expiration`, or for the nearest expiration when `None`.
    fn fetch_options(
        &self,
        symbol: &str,
        expiration: Option<&str>,
    ) -> Result<OptionsChain, TickerdashError>;

    fn fetch_filings(&self, symbol: &str) -> Result<Vec<FilingRecord>, TickerdashError>;

    fn fetch_news(&self, symbol: &str) -> Result<Vec<NewsRecord>, TickerdashError>;

    fn fetch_financials(&self, symbol: &str) -> Result<FinancialsBundle, TickerdashError>;
}
