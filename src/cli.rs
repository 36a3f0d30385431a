//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_data_adapter::FileDataAdapter;
use crate::adapters::text_report;
use crate::domain::config_validation::validate_session_config;
use crate::domain::error::TickerdashError;
use crate::domain::options::DEFAULT_STRIKE_WINDOW;
use crate::domain::period::{INTERVALS, reconcile, valid_intervals};
use crate::domain::session::{Session, SessionConfig, normalize_symbol};
use crate::domain::view::View;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Parser, Debug)]
#[command(name = "tickerdash", about = "Derived market data views for a single ticker")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory holding one sub-directory of data files per symbol
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    #[arg(short, long, global = true)]
    pub symbol: Option<String>,
    #[arg(short, long, global = true)]
    pub period: Option<String>,
    #[arg(short, long, global = true)]
    pub interval: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Price summary with EMA overlays
    Dashboard,
    /// Options chain windowed around the current price
    Options {
        #[arg(long)]
        expiration: Option<String>,
        /// Strikes shown on each side of the at-the-money row
        #[arg(long)]
        window: Option<usize>,
        /// Strike whose Greeks are listed
        #[arg(long)]
        select: Option<f64>,
    },
    /// SEC filings, searchable by title
    Filings {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Row number on the page whose summary is shown
        #[arg(long)]
        expand: Option<usize>,
    },
    /// Company news, searchable by headline
    News {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Financial metrics table
    Financials {
        /// Metric key whose history is listed, e.g. peRatio
        #[arg(long)]
        metric: Option<String>,
    },
    /// Intervals offered for the selected period
    Intervals,
    /// Validate the configuration without loading data
    Validate,
}

pub fn run(cli: Cli) -> ExitCode {
    match execute(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Run one command and return the text it prints.
///
/// Fetch failures are not errors here: they are listed ahead of the view.
pub fn execute(cli: &Cli) -> Result<String, TickerdashError> {
    let config = load_config(cli.config.as_deref())?;
    let mut session_config = build_session_config(&config)?;
    apply_overrides(&mut session_config, cli)?;

    match &cli.command {
        Command::Validate => return Ok(describe_config(&session_config)),
        Command::Intervals => return Ok(describe_intervals(&session_config)),
        _ => {}
    }

    let data_dir = resolve_data_dir(cli.data_dir.as_deref(), &config);
    let mut session = Session::new(Box::new(FileDataAdapter::new(data_dir)), session_config);
    session.load();

    let body = match &cli.command {
        Command::Dashboard => text_report::render_dashboard(
            &session.title(),
            session.period(),
            session.interval(),
            &session.price_chart(),
        ),
        Command::Options {
            expiration,
            window,
            select,
        } => {
            session.toggle_view(View::Options);
            if let Some(exp) = expiration {
                session.set_expiration(exp);
            }
            if let Some(radius) = window {
                session.set_strike_window(*radius)?;
            }
            if let Some(strike) = select {
                session.toggle_option(*strike);
            }
            text_report::render_options(&session.options_table())
        }
        Command::Filings {
            search,
            page,
            expand,
        } => {
            open_list(&mut session, View::Filings, search.as_deref(), *page);
            if let Some(row) = expand {
                session.toggle_expanded(row_index(*row)?);
            }
            let expanded = session.view().transient.expanded.get().copied();
            text_report::render_filings(&session.filings_page(), expanded)
        }
        Command::News { search, page } => {
            open_list(&mut session, View::News, search.as_deref(), *page);
            text_report::render_news(&session.news_page())
        }
        Command::Financials { metric } => {
            session.toggle_view(View::Financials);
            if let Some(key) = metric {
                session.toggle_metric(key)?;
            }
            text_report::render_metrics(&session.metrics_table(), session.metric_chart().as_ref())
        }
        Command::Intervals | Command::Validate => String::new(),
    };

    let mut output = String::new();
    output.push_str(&text_report::render_errors(session.errors()));
    if session.active_view() != View::Dashboard {
        output.push_str(&format!(
            "{}: {}\n",
            session.active_view().title(),
            session.title()
        ));
    }
    output.push_str(&body);
    Ok(output)
}

fn open_list(session: &mut Session, view: View, search: Option<&str>, page: usize) {
    session.toggle_view(view);
    if let Some(term) = search {
        session.set_search_term(term);
    }
    while session.view().transient.page < page {
        let before = session.view().transient.page;
        session.next_page();
        if session.view().transient.page == before {
            break;
        }
    }
}

fn row_index(row: usize) -> Result<usize, TickerdashError> {
    row.checked_sub(1).ok_or_else(|| TickerdashError::InvalidInput {
        field: "expand".into(),
        reason: "rows are numbered from 1".into(),
    })
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, TickerdashError> {
    match path {
        None => Ok(FileConfigAdapter::empty()),
        Some(path) => {
            FileConfigAdapter::from_file(path).map_err(|e| TickerdashError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
        }
    }
}

/// Session settings from `[session]` and `[chart]`, with defaults for absent keys.
pub fn build_session_config(config: &dyn ConfigPort) -> Result<SessionConfig, TickerdashError> {
    validate_session_config(config)?;
    let defaults = SessionConfig::default();

    let symbol = config
        .get_string("session", "symbol")
        .map(|s| normalize_symbol(&s))
        .filter(|s| !s.is_empty())
        .unwrap_or(defaults.symbol);
    let period = config
        .get_string("session", "period")
        .map(|s| s.trim().to_string())
        .unwrap_or(defaults.period);
    let interval = config
        .get_string("session", "interval")
        .map(|s| s.trim().to_string())
        .unwrap_or(defaults.interval);
    let interval = reconcile(&period, &interval).to_string();

    let strike_window = usize::try_from(config.get_int(
        "session",
        "strike_window",
        DEFAULT_STRIKE_WINDOW as i64,
    ))
    .unwrap_or(DEFAULT_STRIKE_WINDOW);
    let ema_windows = match config.get_usize_list("chart", "ema_windows") {
        Some(Ok(windows)) if !windows.is_empty() => windows,
        _ => defaults.ema_windows,
    };

    Ok(SessionConfig {
        symbol,
        period,
        interval,
        strike_window,
        ema_windows,
    })
}

/// Apply `--symbol`, `--period` and `--interval` on top of the file settings.
pub fn apply_overrides(config: &mut SessionConfig, cli: &Cli) -> Result<(), TickerdashError> {
    if let Some(symbol) = &cli.symbol {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(TickerdashError::InvalidInput {
                field: "symbol".into(),
                reason: "symbol must not be empty".into(),
            });
        }
        config.symbol = symbol;
    }
    if let Some(period) = &cli.period {
        config.period = period.trim().to_string();
    }
    if let Some(interval) = &cli.interval {
        let interval = interval.trim();
        if !INTERVALS.contains(&interval) {
            return Err(TickerdashError::InvalidInput {
                field: "interval".into(),
                reason: format!("{} is not one of {}", interval, INTERVALS.join(", ")),
            });
        }
        config.interval = interval.to_string();
    }
    config.interval = reconcile(&config.period, &config.interval).to_string();
    Ok(())
}

pub fn resolve_data_dir(cli_dir: Option<&Path>, config: &dyn ConfigPort) -> PathBuf {
    match cli_dir {
        Some(dir) => dir.to_path_buf(),
        None => config
            .get_string("data", "dir")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
    }
}

fn describe_config(config: &SessionConfig) -> String {
    let windows: Vec<String> = config.ema_windows.iter().map(|w| w.to_string()).collect();
    format!(
        "configuration ok\nsymbol: {}\nperiod: {}\ninterval: {}\nstrike window: {}\nEMA windows: {}\n",
        config.symbol,
        config.period,
        config.interval,
        config.strike_window,
        windows.join(", ")
    )
}

fn describe_intervals(config: &SessionConfig) -> String {
    let mut out = format!("Intervals for {}:\n", config.period);
    for interval in valid_intervals(&config.period) {
        let marker = if *interval == config.interval { '*' } else { ' ' };
        out.push_str(&format!("{} {}\n", marker, interval));
    }
    out
}
