//! Plain-text rendering of session snapshots.
//!
//! Each renderer takes an already-derived snapshot and returns the full text
//! block, so the CLI only decides which block to print.

use crate::domain::chart::PriceChart;
use crate::domain::error::Dataset;
use crate::domain::financials::{MISSING_VALUE, MetricRow};
use crate::domain::options::{Greeks, OptionRow};
use crate::domain::records::{FilingRecord, NewsRecord};
use crate::domain::search::PageView;
use crate::domain::session::{MetricChart, OptionsTable};

/// Two decimals, or the dash for an absent value.
pub fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => MISSING_VALUE.to_string(),
    }
}

fn format_greek(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => MISSING_VALUE.to_string(),
    }
}

fn format_volume(volume: f64) -> String {
    if volume >= 1e9 {
        format!("{:.1}B", volume / 1e9)
    } else if volume >= 1e6 {
        format!("{:.1}M", volume / 1e6)
    } else {
        format!("{:.0}", volume)
    }
}

pub fn render_dashboard(title: &str, period: &str, interval: &str, chart: &PriceChart) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", title));
    out.push_str(&format!("Period: {}  Interval: {}\n", period, interval));

    if chart.is_empty() {
        out.push_str("No price history available\n");
        return out;
    }

    let first = chart.dates.first().map(String::as_str).unwrap_or_default();
    let last = chart.dates.last().map(String::as_str).unwrap_or_default();
    out.push_str(&format!(
        "Bars: {} ({} to {})\n",
        chart.dates.len(),
        first,
        last
    ));
    out.push_str(&format!(
        "Close:       {}\n",
        format_optional(chart.latest_close())
    ));
    for overlay in &chart.overlays {
        out.push_str(&format!(
            "{:<12} {}\n",
            format!("{}:", overlay.indicator_type),
            format_optional(overlay.latest())
        ));
    }
    let latest_volume = chart.volumes.last().copied().unwrap_or(0);
    out.push_str(&format!(
        "Volume:      {} (axis max {})\n",
        latest_volume,
        format_volume(chart.volume_axis_max)
    ));
    out
}

fn option_cells(row: Option<&OptionRow>) -> [String; 3] {
    match row {
        Some(r) => [
            format_optional(r.bid),
            format_optional(r.ask),
            r.volume.map(|v| format!("{:.0}", v)).unwrap_or_else(|| MISSING_VALUE.to_string()),
        ],
        None => [MISSING_VALUE.to_string(), MISSING_VALUE.to_string(), MISSING_VALUE.to_string()],
    }
}

fn render_greeks(out: &mut String, call: &Greeks, put: &Greeks) {
    out.push_str(&format!("{:<8} {:>10} {:>10}\n", "Greek", "Call", "Put"));
    for ((label, call_value), (_, put_value)) in call.labelled().zip(put.labelled()) {
        out.push_str(&format!(
            "{:<8} {:>10} {:>10}\n",
            label,
            format_greek(call_value),
            format_greek(put_value)
        ));
    }
}

/// Calls and puts side by side; `*` marks the at-the-money row and `>` the selected strike.
pub fn render_options(table: &OptionsTable) -> String {
    let mut out = String::new();
    if table.expiration.is_empty() {
        out.push_str("Expiration: none\n");
    } else {
        out.push_str(&format!("Expiration: {}\n", table.expiration));
    }
    if table.expirations.len() > 1 {
        out.push_str(&format!("Available:  {}\n", table.expirations.join(", ")));
    }

    if table.window.is_empty() {
        out.push_str("No options data available\n");
        return out;
    }

    out.push_str(&format!(
        "  {:>8} {:>8} {:>8} | {:>8} | {:>8} {:>8} {:>8}\n",
        "Bid", "Ask", "Volume", "Strike", "Bid", "Ask", "Volume"
    ));
    let selected_strike = table.selected.as_ref().map(|s| s.strike);
    for (i, (call, put)) in table.window.rows().enumerate() {
        let marker = if selected_strike == Some(call.strike) {
            '>'
        } else if table.window.atm_row == Some(i) {
            '*'
        } else {
            ' '
        };
        let [call_bid, call_ask, call_volume] = option_cells(Some(call));
        let [put_bid, put_ask, put_volume] = option_cells(put);
        out.push_str(&format!(
            "{} {:>8} {:>8} {:>8} | {:>8.2} | {:>8} {:>8} {:>8}\n",
            marker, call_bid, call_ask, call_volume, call.strike, put_bid, put_ask, put_volume
        ));
    }

    if let Some(selection) = &table.selected {
        out.push_str(&format!("\nGreeks for strike {:.2}\n", selection.strike));
        render_greeks(&mut out, &selection.call_greeks, &selection.put_greeks);
    }
    out
}

pub fn render_metrics(rows: &[MetricRow], chart: Option<&MetricChart>) -> String {
    let mut out = String::new();
    for row in rows {
        let marker = if row.selected { '>' } else { ' ' };
        out.push_str(&format!("{} {:<18} {:>20}\n", marker, row.label, row.value));
    }

    if let Some(chart) = chart {
        out.push_str(&format!("\n{} history\n", chart.label));
        if chart.points.is_empty() {
            out.push_str("  no data\n");
        }
        for point in &chart.points {
            out.push_str(&format!("  {:<12} {}\n", point.x, point.y));
        }
    }
    out
}

fn render_page_footer<T>(out: &mut String, page: &PageView<'_, T>) {
    let mut footer = format!("Page {} of {}", page.page, page.page_count);
    if page.has_previous {
        footer.push_str("  [previous]");
    }
    if page.has_next {
        footer.push_str("  [next]");
    }
    out.push_str(&footer);
    out.push('\n');
}

/// Filings list; `expanded` is the row on this page whose summary is shown.
pub fn render_filings(page: &PageView<'_, FilingRecord>, expanded: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} filings\n", page.total));
    if page.items.is_empty() {
        out.push_str("No filings found\n");
    }
    for (i, filing) in page.items.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", i + 1, filing.title));
        if expanded == Some(i) {
            let summary = filing.plain_summary();
            if !summary.is_empty() {
                out.push_str(&format!("     {}\n", summary));
            }
            if !filing.link.is_empty() {
                out.push_str(&format!("     {}\n", filing.link));
            }
        }
    }
    render_page_footer(&mut out, page);
    out
}

pub fn render_news(page: &PageView<'_, NewsRecord>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} articles\n", page.total));
    if page.items.is_empty() {
        out.push_str("No news found\n");
    }
    for (i, article) in page.items.iter().enumerate() {
        let when = article
            .published_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| MISSING_VALUE.to_string());
        out.push_str(&format!("{:>3}. [{}] {}", i + 1, when, article.headline));
        if !article.source.is_empty() {
            out.push_str(&format!(" ({})", article.source));
        }
        out.push('\n');
        if !article.url.is_empty() {
            out.push_str(&format!("     {}\n", article.url));
        }
    }
    render_page_footer(&mut out, page);
    out
}

pub fn render_errors<'a>(errors: impl IntoIterator<Item = (Dataset, &'a str)>) -> String {
    errors
        .into_iter()
        .map(|(dataset, message)| format!("[{}] {}\n", dataset, message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::build_price_chart;
    use crate::domain::financials::{FinancialsBundle, metrics_table};
    use crate::domain::options::{StrikeWindow, window_chain};
    use crate::domain::quote::QuoteBar;
    use crate::domain::search::paginate;

    fn row(strike: f64, bid: Option<f64>) -> OptionRow {
        OptionRow {
            strike,
            bid,
            ask: Some(strike / 10.0),
            volume: Some(12.0),
            greeks: Greeks {
                delta: Some(0.5),
                ..Greeks::default()
            },
        }
    }

    fn table(window: StrikeWindow, selected: Option<f64>) -> OptionsTable {
        let selected = selected.and_then(|strike| window.selection_for(strike));
        OptionsTable {
            expiration: "2025-01-17".into(),
            expirations: vec!["2025-01-17".into(), "2025-02-21".into()],
            window,
            selected,
        }
    }

    #[test]
    fn dashboard_shows_latest_values() {
        let history: Vec<QuoteBar> = (1..=3)
            .map(|i| QuoteBar {
                date: format!("2024-01-0{}", i),
                open: 10.0,
                high: 10.0,
                low: 10.0,
                close: 10.0 * i as f64,
                volume: 50_000_000,
            })
            .collect();
        let chart = build_price_chart(&history, &[2]);
        let text = render_dashboard("SMCI", "1mo", "1d", &chart);

        assert!(text.contains("Period: 1mo  Interval: 1d"));
        assert!(text.contains("Bars: 3 (2024-01-01 to 2024-01-03)"));
        assert!(text.contains("Close:       30.00"));
        assert!(text.contains("EMA(2):"));
        assert!(text.contains("axis max 200.0M"));
    }

    #[test]
    fn dashboard_without_history() {
        let text = render_dashboard("SMCI", "1mo", "1d", &PriceChart::default());
        assert!(text.contains("No price history available"));
    }

    #[test]
    fn options_marks_atm_and_dashes_missing_quotes() {
        let calls = vec![row(40.0, Some(1.0)), row(45.0, None), row(50.0, Some(0.2))];
        let puts = calls.clone();
        let window = window_chain(&calls, &puts, Some(44.0), 5);
        let text = render_options(&table(window, None));

        let atm_line = text.lines().find(|l| l.starts_with('*')).unwrap();
        assert!(atm_line.contains("45.00"));
        assert!(atm_line.contains(MISSING_VALUE));
        assert!(text.contains("Available:  2025-01-17, 2025-02-21"));
        assert!(!text.contains("Greeks for strike"));
    }

    #[test]
    fn options_selection_lists_greeks() {
        let calls = vec![row(40.0, Some(1.0)), row(45.0, Some(2.0))];
        let puts = calls.clone();
        let window = window_chain(&calls, &puts, Some(40.0), 5);
        let text = render_options(&table(window, Some(45.0)));

        assert!(text.lines().any(|l| l.starts_with('>') && l.contains("45.00")));
        assert!(text.contains("Greeks for strike 45.00"));
        assert!(text.contains("Delta"));
        assert!(text.contains("0.5000"));
        let gamma = text.lines().find(|l| l.starts_with("Gamma")).unwrap();
        assert!(gamma.contains(MISSING_VALUE));
    }

    #[test]
    fn empty_options_window() {
        let text = render_options(&table(StrikeWindow::default(), None));
        assert!(text.contains("No options data available"));
    }

    #[test]
    fn metrics_render_selection_and_history() {
        let bundle: FinancialsBundle = serde_json::from_str(
            r#"{"keyMetrics":[{"date":"2024","peRatio":20.5},{"date":"2023","peRatio":15}]}"#,
        )
        .unwrap();
        let rows = metrics_table(&bundle, Some("peRatio"));
        let chart = MetricChart {
            label: "P/E Ratio",
            points: crate::domain::financials::series(&bundle, &crate::domain::financials::METRIC_CATALOG[0]),
        };
        let text = render_metrics(&rows, Some(&chart));

        assert!(text.lines().next().unwrap().starts_with("> P/E Ratio"));
        assert!(text.contains("P/E Ratio history"));
        assert!(text.contains("2023"));
        let market_cap = text.lines().find(|l| l.contains("Market Cap")).unwrap();
        assert!(market_cap.contains(MISSING_VALUE));
    }

    #[test]
    fn filings_page_footer_and_expansion() {
        let filings: Vec<FilingRecord> = (0..25)
            .map(|i| FilingRecord {
                title: format!("Form {}", i),
                summary: "<p>Quarterly &amp; annual</p>".into(),
                link: format!("https://example.test/{}", i),
            })
            .collect();
        let page = paginate(&filings, "", 1);
        let text = render_filings(&page, Some(1));

        assert!(text.starts_with("25 filings"));
        assert!(text.contains("  2. Form 1"));
        assert!(text.contains("Quarterly & annual"));
        assert!(text.contains("https://example.test/1"));
        assert!(!text.contains("https://example.test/0"));
        assert!(text.contains("Page 1 of 2  [next]"));
    }

    #[test]
    fn news_lists_publication_time() {
        let news = vec![NewsRecord {
            headline: "Earnings beat".into(),
            source: "Wire".into(),
            datetime: 1_700_000_000,
            ..NewsRecord::default()
        }];
        let text = render_news(&paginate(&news, "", 1));
        assert!(text.contains("[2023-11-14 22:13] Earnings beat (Wire)"));
        assert!(text.contains("Page 1 of 1"));
    }

    #[test]
    fn empty_news_page() {
        let news: Vec<NewsRecord> = Vec::new();
        let text = render_news(&paginate(&news, "none", 1));
        assert!(text.contains("No news found"));
        assert!(text.contains("Page 1 of 1"));
    }

    #[test]
    fn errors_are_tagged_by_dataset() {
        let text = render_errors([(Dataset::News, "error fetching news data for SMCI: down")]);
        assert_eq!(text, "[news] error fetching news data for SMCI: down\n");
    }
}
