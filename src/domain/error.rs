//! Domain error types.

use std::fmt;

/// Which fetched dataset an error or cache entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dataset {
    Quote,
    Options,
    Filings,
    News,
    Financials,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dataset::Quote => "quote",
            Dataset::Options => "options",
            Dataset::Filings => "filings",
            Dataset::News => "news",
            Dataset::Financials => "financials",
        };
        f.write_str(name)
    }
}

/// Top-level error type for tickerdash.
#[derive(Debug, thiserror::Error)]
pub enum TickerdashError {
    #[error("error fetching {dataset} data for {symbol}: {reason}")]
    Fetch {
        symbol: String,
        dataset: Dataset,
        reason: String,
    },

    #[error("options chain integrity error: {reason}")]
    ChainIntegrity { reason: String },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TickerdashError {
    /// Qualify any error with the symbol and dataset it was raised for.
    ///
    /// A `Fetch` error is returned unchanged.
    pub fn into_fetch(self, symbol: &str, dataset: Dataset) -> Self {
        match self {
            err @ TickerdashError::Fetch { .. } => err,
            other => TickerdashError::Fetch {
                symbol: symbol.to_string(),
                dataset,
                reason: other.to_string(),
            },
        }
    }
}

impl From<&TickerdashError> for std::process::ExitCode {
    fn from(err: &TickerdashError) -> Self {
        let code: u8 = match err {
            TickerdashError::Io(_) => 1,
            TickerdashError::ConfigParse { .. }
            | TickerdashError::ConfigMissing { .. }
            | TickerdashError::ConfigInvalid { .. } => 2,
            TickerdashError::DataSource { .. } | TickerdashError::Fetch { .. } => 3,
            TickerdashError::ChainIntegrity { .. } => 4,
            TickerdashError::InvalidInput { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
