//! Active view and the transient state that belongs to it.
//!
//! Exactly one view is active. Any view change resets the transient state,
//! whichever direction it goes. Transitions are pure: `(state, action) -> state`.

use crate::domain::error::Dataset;
use crate::domain::search;
use crate::domain::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Dashboard,
    Options,
    Filings,
    News,
    Financials,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Options,
        View::Filings,
        View::News,
        View::Financials,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Stock Dashboard",
            View::Options => "Options Chain",
            View::Filings => "SEC Filings",
            View::News => "Company News",
            View::Financials => "Financial Metrics",
        }
    }

    /// Dataset fetched on demand when this view is shown.
    pub fn auxiliary_dataset(&self) -> Option<Dataset> {
        match self {
            View::Filings => Some(Dataset::Filings),
            View::News => Some(Dataset::News),
            View::Financials => Some(Dataset::Financials),
            View::Dashboard | View::Options => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransientState {
    pub search_term: String,
    pub page: usize,
    pub expanded: Selection<usize>,
    pub option: Selection<f64>,
    pub metric: Selection<&'static str>,
}

impl Default for TransientState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            page: 1,
            expanded: Selection::default(),
            option: Selection::default(),
            metric: Selection::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub active: View,
    pub transient: TransientState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    /// A view button was clicked; clicking the active view returns to the dashboard.
    Activate(View),
    SetSearchTerm(String),
    /// `total` is the length of the filtered list being paged.
    NextPage { total: usize },
    PreviousPage,
    ToggleExpanded(usize),
    ToggleOption(f64),
    ToggleMetric(&'static str),
    /// Inputs changed underneath the selections (symbol, period, interval, expiration).
    ClearSelections,
}

pub fn transition(state: ViewState, action: ViewAction) -> ViewState {
    let ViewState {
        active,
        mut transient,
    } = state;

    match action {
        ViewAction::Activate(view) => {
            let next = if view == active { View::Dashboard } else { view };
            return ViewState {
                active: next,
                transient: TransientState::default(),
            };
        }
        ViewAction::SetSearchTerm(term) => {
            if term != transient.search_term {
                transient.search_term = term;
                transient.page = 1;
                transient.expanded.clear();
            }
        }
        ViewAction::NextPage { total } => {
            if search::has_next(transient.page, total) {
                transient.page += 1;
                transient.expanded.clear();
            }
        }
        ViewAction::PreviousPage => {
            if search::has_previous(transient.page) {
                transient.page -= 1;
                transient.expanded.clear();
            }
        }
        ViewAction::ToggleExpanded(index) => transient.expanded.toggle(index),
        ViewAction::ToggleOption(strike) => transient.option.toggle(strike),
        ViewAction::ToggleMetric(key) => transient.metric.toggle(key),
        ViewAction::ClearSelections => {
            transient.option.clear();
            transient.metric.clear();
        }
    }

    ViewState { active, transient }
}
