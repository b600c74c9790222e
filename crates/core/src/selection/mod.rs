//! Active market/ticker selection.
//!
//! [`SelectionState`] is the only place the selection changes. Every change
//! of value is pushed to the registered [`SelectionSink`]s; the controller
//! registers a queue sink and drains it to start fetch rounds.

mod sink;

pub use sink::{ChannelSelectionSink, NoOpSelectionSink, SelectionSink};

use std::fmt;
use std::sync::Arc;

use log::info;
use tickertracker_market_data::{normalize_display_symbol, Market, MarketId};

use crate::errors::{Error, Result};

/// A (market, ticker) pair. Equality and hashing are by value.
///
/// The ticker is always trimmed, upper-cased and non-empty. The market id is
/// trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    market: MarketId,
    ticker: String,
}

impl Selection {
    pub fn new(market: impl Into<MarketId>, ticker: &str) -> Result<Self> {
        let market = market.into().trim().to_string();
        if market.is_empty() {
            return Err(Error::EmptyMarket);
        }
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(Error::EmptyTicker);
        }

        Ok(Self { market, ticker })
    }

    /// Same ticker under the catalog's spelling of the market id.
    pub(crate) fn in_market(&self, market: &Market) -> Self {
        Self {
            market: market.id.clone(),
            ticker: self.ticker.clone(),
        }
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }
}

/// `US/AAPL`, the dashboard's landing selection.
impl Default for Selection {
    fn default() -> Self {
        Self {
            market: "US".to_string(),
            ticker: "AAPL".to_string(),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.market, self.ticker)
    }
}

/// How the current ticker came to be selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickerOrigin {
    /// Initial ticker or the one chosen on a market switch.
    Default,
    /// Picked from the market's suggestions.
    Suggested,
    /// Typed by the user.
    Typed,
}

/// Source of truth for the active selection.
pub struct SelectionState {
    current: Selection,
    origin: TickerOrigin,
    sinks: Vec<Arc<dyn SelectionSink>>,
}

impl SelectionState {
    pub fn new(initial: Selection) -> Self {
        Self {
            current: initial,
            origin: TickerOrigin::Default,
            sinks: Vec::new(),
        }
    }

    /// Register a sink for subsequent changes.
    pub fn subscribe(&mut self, sink: Arc<dyn SelectionSink>) {
        self.sinks.push(sink);
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    pub fn origin(&self) -> TickerOrigin {
        self.origin
    }

    /// Switch to `market`.
    ///
    /// A typed ticker is kept. Otherwise the ticker becomes the first
    /// suggestion in display form; with no suggestions it stays as is.
    /// Returns whether the selection changed.
    pub fn set_market(&mut self, market: &Market, suggestions: &[String]) -> bool {
        let replacement = match self.origin {
            TickerOrigin::Typed => None,
            TickerOrigin::Default | TickerOrigin::Suggested => suggestions
                .iter()
                .map(|symbol| normalize_display_symbol(symbol, market))
                .find(|symbol| !symbol.is_empty()),
        };

        let ticker = match replacement {
            Some(ticker) => {
                self.origin = TickerOrigin::Default;
                ticker
            }
            None => self.current.ticker.clone(),
        };

        self.replace(Selection {
            market: market.id.clone(),
            ticker,
        })
    }

    /// Select a typed ticker in the current market.
    pub fn set_ticker(&mut self, symbol: &str) -> Result<bool> {
        let next = Selection::new(self.current.market.clone(), symbol)?;
        self.origin = TickerOrigin::Typed;
        Ok(self.replace(next))
    }

    /// Select one of `market`'s suggested symbols, in display form.
    pub fn pick_suggestion(&mut self, symbol: &str, market: &Market) -> Result<bool> {
        let ticker = normalize_display_symbol(symbol, market);
        let next = Selection::new(self.current.market.clone(), &ticker)?;
        self.origin = TickerOrigin::Suggested;
        Ok(self.replace(next))
    }

    fn replace(&mut self, next: Selection) -> bool {
        if next == self.current {
            return false;
        }

        info!("Selection changed: {} -> {}", self.current, next);
        self.current = next;
        for sink in &self.sinks {
            sink.selection_changed(&self.current);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn us() -> Market {
        Market::new("US", "US Stock Market", "USD")
    }

    fn india() -> Market {
        Market::new("IN", "Indian Stock Market", "INR").with_suffix(".NS")
    }

    fn state() -> (SelectionState, UnboundedReceiver<Selection>) {
        let mut state = SelectionState::new(Selection::new("US", "AAPL").unwrap());
        let (sink, rx) = ChannelSelectionSink::new();
        state.subscribe(Arc::new(sink));
        (state, rx)
    }

    fn drain(rx: &mut UnboundedReceiver<Selection>) -> Vec<String> {
        let mut seen = Vec::new();
        while let Ok(selection) = rx.try_recv() {
            seen.push(selection.to_string());
        }
        seen
    }

    #[test]
    fn test_selection_normalizes_ticker() {
        let selection = Selection::new("US", "  msft ").unwrap();
        assert_eq!(selection.ticker(), "MSFT");
        assert_eq!(selection.to_string(), "US/MSFT");

        assert_eq!(Selection::new("US", "   "), Err(Error::EmptyTicker));
    }

    #[test]
    fn test_selection_requires_market() {
        assert_eq!(Selection::new("", "AAPL"), Err(Error::EmptyMarket));
        assert_eq!(Selection::new("  ", "AAPL"), Err(Error::EmptyMarket));
        assert_eq!(Selection::new(" IN ", "tcs").unwrap().to_string(), "IN/TCS");
    }

    #[test]
    fn test_market_switch_takes_first_suggestion() {
        let (mut state, mut rx) = state();
        let suggestions = vec!["TCS.NS".to_string(), "INFY.NS".to_string()];

        assert!(state.set_market(&india(), &suggestions));

        assert_eq!(state.current().market(), "IN");
        assert_eq!(state.current().ticker(), "TCS");
        assert_eq!(state.origin(), TickerOrigin::Default);
        assert_eq!(drain(&mut rx), vec!["IN/TCS"]);
    }

    #[test]
    fn test_market_switch_keeps_typed_ticker() {
        let (mut state, mut rx) = state();
        state.set_ticker("reliance").unwrap();

        state.set_market(&india(), &["TCS.NS".to_string()]);

        assert_eq!(state.current().ticker(), "RELIANCE");
        assert_eq!(state.origin(), TickerOrigin::Typed);
        assert_eq!(drain(&mut rx), vec!["US/RELIANCE", "IN/RELIANCE"]);
    }

    #[test]
    fn test_market_switch_replaces_picked_ticker() {
        let (mut state, _rx) = state();
        state.pick_suggestion("MSFT", &us()).unwrap();

        state.set_market(&india(), &["INFY.NS".to_string()]);

        assert_eq!(state.current().ticker(), "INFY");
    }

    #[test]
    fn test_market_switch_without_suggestions_keeps_ticker() {
        let (mut state, _rx) = state();

        assert!(state.set_market(&india(), &[]));
        assert_eq!(state.current().to_string(), "IN/AAPL");
    }

    #[test]
    fn test_unchanged_value_emits_nothing() {
        let (mut state, mut rx) = state();

        assert!(!state.set_ticker("aapl").unwrap());
        assert!(!state.set_market(&us(), &["AAPL".to_string()]));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_empty_ticker_rejected_without_change() {
        let (mut state, mut rx) = state();

        assert_eq!(state.set_ticker("  "), Err(Error::EmptyTicker));
        assert_eq!(state.current().ticker(), "AAPL");
        assert_eq!(state.origin(), TickerOrigin::Default);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_pick_suggestion_strips_suffix() {
        let (mut state, mut rx) = state();
        state.set_market(&india(), &[]);
        drain(&mut rx);

        assert!(state.pick_suggestion("hdfcbank.ns", &india()).unwrap());
        assert_eq!(state.current().ticker(), "HDFCBANK");
        assert_eq!(state.origin(), TickerOrigin::Suggested);
        assert_eq!(drain(&mut rx), vec!["IN/HDFCBANK"]);
    }
}
