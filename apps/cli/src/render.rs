//! Plain-text rendering of the controller's view state.

use std::fmt::Write;

use tickertracker_core::{
    ChartData, FetchSlot, MarketCatalog, MarketViewController, SlotState, SlotStatus, TabView,
};
use tickertracker_market_data::{
    normalize_display_symbol, InsightsResult, Market, NewsItem, OverviewResult,
};

/// Signed absolute and percent change, e.g. `-1.25 (-0.83%)`.
pub fn format_change(change: f64, change_percent: f64) -> String {
    format!("{:+.2} ({:+.2}%)", change, change_percent)
}

pub fn render_markets(catalog: &MarketCatalog, current: &str) -> String {
    let mut out = String::from("Markets:\n");
    for market in catalog.markets() {
        let marker = if market.id == current { '*' } else { ' ' };
        let _ = writeln!(
            out,
            " {} {:<8} {} ({})",
            marker, market.id, market.name, market.currency
        );
    }
    out
}

pub fn render_suggestions(suggestions: &[String], market: Option<&Market>) -> String {
    if suggestions.is_empty() {
        return "No suggested tickers for this market.".to_string();
    }

    let picks: Vec<String> = suggestions
        .iter()
        .enumerate()
        .map(|(i, symbol)| {
            let shown = match market {
                Some(market) => normalize_display_symbol(symbol, market),
                None => symbol.trim().to_uppercase(),
            };
            format!("{}) {}", i + 1, shown)
        })
        .collect();
    format!("Popular: {}", picks.join("  "))
}

/// Selection, tab strip and loading indicator.
pub fn render_header(controller: &MarketViewController) -> String {
    let active = controller.active_tab();
    let tabs: Vec<String> = tickertracker_core::Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect();

    let mut header = format!("== {} ==  {}", controller.selection(), tabs.join(" | "));
    if controller.is_loading() {
        header.push_str("  (loading data...)");
    }
    header
}

pub fn render_view(view: TabView<'_>) -> String {
    match view {
        TabView::Overview(slot) => render_slot(slot, render_overview),
        TabView::News(slot) => render_slot(slot, |items| render_news(items)),
        TabView::Insights(slot) => render_slot(slot, render_insights),
    }
}

fn render_slot<T>(slot: Option<&FetchSlot<T>>, render: impl Fn(&T) -> String) -> String {
    match slot.map(FetchSlot::state) {
        None => "Nothing loaded yet.".to_string(),
        Some(SlotState::Pending) => "Loading data...".to_string(),
        Some(SlotState::Failed(message)) => format!("Error: {}", message),
        Some(SlotState::Ready(value)) => render(value),
    }
}

pub fn render_overview(result: &OverviewResult) -> String {
    let Some(overview) = result.overview() else {
        return "Ticker not found.".to_string();
    };

    let mut out = format!("{} ({})\n", overview.display_name(), overview.symbol);
    let _ = writeln!(
        out,
        "  Price:      {:.2} {}",
        overview.price, overview.currency
    );
    let _ = writeln!(
        out,
        "  Change:     {} {}",
        format_change(overview.change, overview.change_percent),
        if overview.is_gain() { "▲" } else { "▼" }
    );
    match overview.market_cap_billions() {
        Some(billions) => {
            let _ = write!(out, "  Market Cap: {:.2}B {}", billions, overview.currency);
        }
        None => out.push_str("  Market Cap: n/a"),
    }
    out
}

pub fn render_news(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return "No recent news.".to_string();
    }

    let mut out = String::from("Latest News & Sentiment\n");
    for item in items {
        let _ = writeln!(out, "\n* {}", item.headline);
        if !item.summary.is_empty() {
            let _ = writeln!(out, "  {}", item.summary);
        }
        let sentiment = match (item.sentiment(), item.sentiment_score) {
            (Some(label), Some(score)) => format!(" | sentiment: {} ({:.2})", label, score),
            _ => String::new(),
        };
        let _ = writeln!(
            out,
            "  {} | {}{}",
            item.source,
            item.published_at.format("%Y-%m-%d"),
            sentiment
        );
        if !item.url.is_empty() {
            let _ = writeln!(out, "  {}", item.url);
        }
    }
    out.trim_end().to_string()
}

pub fn render_insights(insights: &InsightsResult) -> String {
    format!(
        "AI Insights for {}\n\n{}\n\n[AI Analysis]",
        insights.ticker, insights.narrative
    )
}

pub fn render_chart(chart: &ChartData, status: Option<SlotStatus>) -> String {
    let Some(series) = chart.series() else {
        return match status {
            Some(SlotStatus::Pending) => "Loading price history...".to_string(),
            _ => "No historical data available yet.".to_string(),
        };
    };

    let mut out = format!("{} ({} points)\n", series.label, series.points.len());
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        let _ = writeln!(
            out,
            "  {}  {:.2}  ->  {}  {:.2}",
            first.timestamp.format("%Y-%m-%d"),
            first.price,
            last.timestamp.format("%Y-%m-%d"),
            last.price
        );
    }
    if let (Some(min), Some(max)) = (series.min_price(), series.max_price()) {
        let _ = write!(out, "  low {:.2}  high {:.2}", min, max);
    }
    if let Some(change) = series.change_percent() {
        let _ = write!(out, "  change {:+.2}%", change);
    }
    out
}
