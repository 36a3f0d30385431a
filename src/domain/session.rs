//! Session controller: owns the inputs, the fetched datasets and the view state.
//!
//! Every input change recomputes from scratch. Fetch failures never escape:
//! the affected dataset is emptied and a symbol-qualified message is kept
//! per dataset until the next successful fetch.

use std::collections::{BTreeMap, HashMap};

use log::{debug, info, warn};

use crate::domain::chart::{DEFAULT_EMA_WINDOWS, PriceChart, build_price_chart};
use crate::domain::error::{Dataset, TickerdashError};
use crate::domain::financials::{
    FinancialsBundle, MetricPoint, MetricRow, metric_by_key, metrics_table, series,
};
use crate::domain::options::{
    DEFAULT_STRIKE_WINDOW, OptionSelection, OptionsChain, STRIKE_WINDOW_PRESETS, StrikeWindow,
    validate_chain, window_chain,
};
use crate::domain::period::{
    DEFAULT_INTERVAL, DEFAULT_PERIOD, is_valid_interval, reconcile, valid_intervals,
};
use crate::domain::quote::{QuoteBar, QuoteInfo, QuoteSnapshot};
use crate::domain::records::{FilingRecord, NewsRecord};
use crate::domain::search::{self, PageView};
use crate::domain::view::{View, ViewAction, ViewState, transition};
use crate::ports::market_data_port::MarketDataPort;

pub const DEFAULT_SYMBOL: &str = "SMCI";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub symbol: String,
    pub period: String,
    pub interval: String,
    pub strike_window: usize,
    pub ema_windows: Vec<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            period: DEFAULT_PERIOD.to_string(),
            interval: DEFAULT_INTERVAL.to_string(),
            strike_window: DEFAULT_STRIKE_WINDOW,
            ema_windows: DEFAULT_EMA_WINDOWS.to_vec(),
        }
    }
}

/// Symbols are only trimmed and upper-cased, never validated.
pub fn normalize_symbol(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Identifies which request a fetch result answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub symbol: String,
    pub dataset: Dataset,
}

/// Quote history and options chain, fetched and applied as one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketData {
    pub quote: QuoteSnapshot,
    pub options: OptionsChain,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuxiliaryData {
    Filings(Vec<FilingRecord>),
    News(Vec<NewsRecord>),
    Financials(FinancialsBundle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionsTable {
    pub expiration: String,
    pub expirations: Vec<String>,
    pub window: StrikeWindow,
    pub selected: Option<OptionSelection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricChart {
    pub label: &'static str,
    pub points: Vec<MetricPoint>,
}

pub struct Session {
    port: Box<dyn MarketDataPort>,
    symbol: String,
    period: String,
    interval: String,
    strike_window: usize,
    ema_windows: Vec<usize>,
    view: ViewState,
    history: Vec<QuoteBar>,
    info: QuoteInfo,
    options: OptionsChain,
    filings: Vec<FilingRecord>,
    news: Vec<NewsRecord>,
    financials: FinancialsBundle,
    loaded_for: HashMap<Dataset, String>,
    errors: BTreeMap<Dataset, String>,
}

impl Session {
    /// Create an idle session; nothing is fetched until [`Session::load`].
    pub fn new(port: Box<dyn MarketDataPort>, config: SessionConfig) -> Self {
        let interval = reconcile(&config.period, &config.interval).to_string();
        Self {
            port,
            symbol: normalize_symbol(&config.symbol),
            period: config.period,
            interval,
            strike_window: config.strike_window,
            ema_windows: config.ema_windows,
            view: ViewState::default(),
            history: Vec::new(),
            info: QuoteInfo::default(),
            options: OptionsChain::default(),
            filings: Vec::new(),
            news: Vec::new(),
            financials: FinancialsBundle::default(),
            loaded_for: HashMap::new(),
            errors: BTreeMap::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn period(&self) -> &str {
        &self.period
    }

    pub fn interval(&self) -> &str {
        &self.interval
    }

    pub fn strike_window(&self) -> usize {
        self.strike_window
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn active_view(&self) -> View {
        self.view.active
    }

    pub fn history(&self) -> &[QuoteBar] {
        &self.history
    }

    pub fn info(&self) -> &QuoteInfo {
        &self.info
    }

    pub fn options(&self) -> &OptionsChain {
        &self.options
    }

    pub fn filings(&self) -> &[FilingRecord] {
        &self.filings
    }

    pub fn news(&self) -> &[NewsRecord] {
        &self.news
    }

    pub fn financials(&self) -> &FinancialsBundle {
        &self.financials
    }

    pub fn error_for(&self, dataset: Dataset) -> Option<&str> {
        self.errors.get(&dataset).map(String::as_str)
    }

    pub fn errors(&self) -> impl Iterator<Item = (Dataset, &str)> {
        self.errors.iter().map(|(d, msg)| (*d, msg.as_str()))
    }

    /// Issuer short name, falling back to the symbol.
    pub fn title(&self) -> String {
        match self.info.short_name() {
            Some(name) => format!("{} ({})", name, self.symbol),
            None => self.symbol.clone(),
        }
    }

    // ----- inputs -----

    /// Initial fetch of the quote+options group and of the active view's dataset.
    pub fn load(&mut self) {
        self.refresh_market();
        self.ensure_auxiliary();
    }

    pub fn set_symbol(&mut self, input: &str) {
        let symbol = normalize_symbol(input);
        if symbol == self.symbol {
            return;
        }
        info!("symbol changed {} -> {}", self.symbol, symbol);
        self.symbol = symbol;
        self.apply(ViewAction::ClearSelections);
        self.refresh_market();
        self.ensure_auxiliary();
    }

    /// Change the period, reconciling the interval before re-fetching.
    pub fn set_period(&mut self, period: &str) {
        let interval = reconcile(period, &self.interval).to_string();
        if interval != self.interval {
            info!(
                "interval {} is not offered for period {}, using {}",
                self.interval, period, interval
            );
        }
        self.period = period.to_string();
        self.interval = interval;
        self.apply(ViewAction::ClearSelections);
        self.refresh_market();
    }

    /// Only intervals offered for the current period are accepted.
    pub fn set_interval(&mut self, interval: &str) -> Result<(), TickerdashError> {
        if !is_valid_interval(&self.period, interval) {
            return Err(TickerdashError::InvalidInput {
                field: "interval".into(),
                reason: format!(
                    "{} is not offered for period {} (one of {})",
                    interval,
                    self.period,
                    valid_intervals(&self.period).join(", ")
                ),
            });
        }
        self.interval = interval.to_string();
        self.apply(ViewAction::ClearSelections);
        self.refresh_market();
        Ok(())
    }

    pub fn set_expiration(&mut self, expiration: &str) {
        let ticket = self.issue(Dataset::Options);
        info!("fetching options for {} expiring {}", ticket.symbol, expiration);
        let result = self.port.fetch_options(&ticket.symbol, Some(expiration));
        self.apply_options(&ticket, result);
    }

    pub fn set_strike_window(&mut self, radius: usize) -> Result<(), TickerdashError> {
        if !STRIKE_WINDOW_PRESETS.contains(&radius) {
            return Err(TickerdashError::InvalidInput {
                field: "strike window".into(),
                reason: format!("{} is not one of {:?}", radius, STRIKE_WINDOW_PRESETS),
            });
        }
        self.strike_window = radius;
        Ok(())
    }

    /// View button: switches to `view`, or back to the dashboard if already active.
    pub fn toggle_view(&mut self, view: View) {
        self.apply(ViewAction::Activate(view));
        debug!("active view is now {:?}", self.view.active);
        self.ensure_auxiliary();
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.apply(ViewAction::SetSearchTerm(term.to_string()));
    }

    pub fn next_page(&mut self) {
        let total = self.filtered_len();
        self.apply(ViewAction::NextPage { total });
    }

    pub fn previous_page(&mut self) {
        self.apply(ViewAction::PreviousPage);
    }

    /// Expand or collapse the item at `index` on the current page.
    pub fn toggle_expanded(&mut self, index: usize) {
        self.apply(ViewAction::ToggleExpanded(index));
    }

    pub fn toggle_option(&mut self, strike: f64) {
        self.apply(ViewAction::ToggleOption(strike));
    }

    pub fn toggle_metric(&mut self, key: &str) -> Result<(), TickerdashError> {
        let def = metric_by_key(key).ok_or_else(|| TickerdashError::InvalidInput {
            field: "metric".into(),
            reason: format!("unknown metric {}", key),
        })?;
        self.apply(ViewAction::ToggleMetric(def.key));
        Ok(())
    }

    fn apply(&mut self, action: ViewAction) {
        let state = std::mem::take(&mut self.view);
        self.view = transition(state, action);
    }

    // ----- fetching -----

    pub fn issue(&self, dataset: Dataset) -> FetchTicket {
        FetchTicket {
            symbol: self.symbol.clone(),
            dataset,
        }
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        if ticket.symbol == self.symbol {
            return true;
        }
        debug!(
            "discarding {} result for {} (current symbol {})",
            ticket.dataset, ticket.symbol, self.symbol
        );
        false
    }

    fn refresh_market(&mut self) {
        let ticket = self.issue(Dataset::Quote);
        info!(
            "fetching quote and options for {} ({}/{})",
            ticket.symbol, self.period, self.interval
        );
        let result = self.fetch_market(&ticket.symbol);
        self.apply_market(&ticket, result);
    }

    fn fetch_market(&self, symbol: &str) -> Result<MarketData, TickerdashError> {
        let quote = self.port.fetch_quote(symbol, &self.period, &self.interval)?;
        let options = self.port.fetch_options(symbol, None)?;
        Ok(MarketData { quote, options })
    }

    /// Apply a quote+options result. Either half failing, or a misaligned
    /// chain, empties history, info and options together.
    pub fn apply_market(
        &mut self,
        ticket: &FetchTicket,
        result: Result<MarketData, TickerdashError>,
    ) {
        if !self.is_current(ticket) {
            return;
        }
        let checked = result.and_then(|data| {
            validate_chain(&data.options)?;
            Ok(data)
        });

        match checked {
            Ok(data) => {
                self.history = data.quote.history;
                self.info = data.quote.info;
                self.options = data.options;
                self.errors.remove(&Dataset::Quote);
                self.errors.remove(&Dataset::Options);
            }
            Err(err) => {
                let err = err.into_fetch(&ticket.symbol, Dataset::Quote);
                warn!("{}", err);
                self.history.clear();
                self.info = QuoteInfo::default();
                self.options = OptionsChain::default();
                self.errors.remove(&Dataset::Options);
                self.errors.insert(Dataset::Quote, err.to_string());
            }
        }
        self.apply(ViewAction::ClearSelections);
    }

    pub fn apply_options(
        &mut self,
        ticket: &FetchTicket,
        result: Result<OptionsChain, TickerdashError>,
    ) {
        if !self.is_current(ticket) {
            return;
        }
        let checked = result.and_then(|chain| {
            validate_chain(&chain)?;
            Ok(chain)
        });

        match checked {
            Ok(chain) => {
                self.options = chain;
                self.errors.remove(&Dataset::Options);
            }
            Err(err) => {
                let err = err.into_fetch(&ticket.symbol, Dataset::Options);
                warn!("{}", err);
                self.options = OptionsChain::default();
                self.errors.insert(Dataset::Options, err.to_string());
            }
        }
        self.apply(ViewAction::ClearSelections);
    }

    fn ensure_auxiliary(&mut self) {
        let Some(dataset) = self.view.active.auxiliary_dataset() else {
            return;
        };
        if self.loaded_for.get(&dataset) == Some(&self.symbol) {
            return;
        }
        let ticket = self.issue(dataset);
        info!("fetching {} for {}", dataset, ticket.symbol);
        let result = self.fetch_auxiliary(&ticket);
        self.apply_auxiliary(&ticket, result);
    }

    fn fetch_auxiliary(&self, ticket: &FetchTicket) -> Result<AuxiliaryData, TickerdashError> {
        let symbol = ticket.symbol.as_str();
        match ticket.dataset {
            Dataset::Filings => self.port.fetch_filings(symbol).map(AuxiliaryData::Filings),
            Dataset::News => self.port.fetch_news(symbol).map(AuxiliaryData::News),
            Dataset::Financials => self
                .port
                .fetch_financials(symbol)
                .map(AuxiliaryData::Financials),
            Dataset::Quote | Dataset::Options => Err(TickerdashError::InvalidInput {
                field: "dataset".into(),
                reason: format!("{} is not fetched on demand", ticket.dataset),
            }),
        }
    }

    pub fn apply_auxiliary(
        &mut self,
        ticket: &FetchTicket,
        result: Result<AuxiliaryData, TickerdashError>,
    ) {
        if !self.is_current(ticket) {
            return;
        }
        self.loaded_for
            .insert(ticket.dataset, ticket.symbol.clone());

        match result {
            Ok(AuxiliaryData::Filings(filings)) => self.filings = filings,
            Ok(AuxiliaryData::News(news)) => self.news = news,
            Ok(AuxiliaryData::Financials(bundle)) => self.financials = bundle,
            Err(err) => {
                let err = err.into_fetch(&ticket.symbol, ticket.dataset);
                warn!("{}", err);
                self.clear_auxiliary(ticket.dataset);
                self.errors.insert(ticket.dataset, err.to_string());
                return;
            }
        }
        self.errors.remove(&ticket.dataset);
    }

    fn clear_auxiliary(&mut self, dataset: Dataset) {
        match dataset {
            Dataset::Filings => self.filings.clear(),
            Dataset::News => self.news.clear(),
            Dataset::Financials => self.financials = FinancialsBundle::default(),
            Dataset::Quote | Dataset::Options => {}
        }
    }

    // ----- snapshots -----

    pub fn price_chart(&self) -> PriceChart {
        build_price_chart(&self.history, &self.ema_windows)
    }

    pub fn options_table(&self) -> OptionsTable {
        let window = window_chain(
            &self.options.calls,
            &self.options.puts,
            self.info.current_price(),
            self.strike_window,
        );
        let selected = self
            .view
            .transient
            .option
            .get()
            .and_then(|&strike| window.selection_for(strike));

        OptionsTable {
            expiration: self.options.expiration.clone(),
            expirations: self.options.expirations.clone(),
            window,
            selected,
        }
    }

    pub fn metrics_table(&self) -> Vec<MetricRow> {
        metrics_table(&self.financials, self.view.transient.metric.get().copied())
    }

    /// History of the selected metric, if any.
    pub fn metric_chart(&self) -> Option<MetricChart> {
        let key = *self.view.transient.metric.get()?;
        let def = metric_by_key(key)?;
        Some(MetricChart {
            label: def.label,
            points: series(&self.financials, def),
        })
    }

    pub fn filings_page(&self) -> PageView<'_, FilingRecord> {
        let transient = &self.view.transient;
        search::paginate(&self.filings, &transient.search_term, transient.page)
    }

    pub fn news_page(&self) -> PageView<'_, NewsRecord> {
        let transient = &self.view.transient;
        search::paginate(&self.news, &transient.search_term, transient.page)
    }

    pub fn expanded_filing(&self) -> Option<&FilingRecord> {
        let index = *self.view.transient.expanded.get()?;
        self.filings_page().items.get(index).copied()
    }

    fn filtered_len(&self) -> usize {
        let term = &self.view.transient.search_term;
        match self.view.active {
            View::Filings => search::filter(&self.filings, term).len(),
            View::News => search::filter(&self.news, term).len(),
            View::Dashboard | View::Options | View::Financials => 0,
        }
    }
}
