//! Core domain types and the derived-view engine.

pub mod chart;
pub mod config_validation;
pub mod error;
pub mod financials;
pub mod indicator;
pub mod options;
pub mod period;
pub mod quote;
pub mod records;
pub mod search;
pub mod selection;
pub mod session;
pub mod view;
pub mod volume;
