//! Supported markets and their suggested tickers.
//!
//! The catalog starts from the built-in markets and is refreshed from the
//! API. A failed or empty answer never blocks ticker entry: the catalog keeps
//! (or falls back to) the built-in markets and the market's embedded
//! suggestions.
//!
//! The controller loads the catalog in the background through
//! [`CatalogLoad`] futures and applies each answer as it arrives.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use log::{debug, warn};
use tickertracker_market_data::{
    default_markets, Market, MarketDataError, MarketDataSource, MarketId,
};

/// Where the current market list came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    /// Built-in markets, not refreshed yet.
    Builtin,
    /// Loaded from the API.
    Remote,
    /// Refresh failed; built-in markets in use. Holds the reason.
    Fallback(String),
}

/// A finished catalog request.
#[derive(Debug)]
pub enum CatalogLoad {
    Markets(Result<Vec<Market>, MarketDataError>),
    Suggestions {
        market: Market,
        result: Result<Vec<String>, MarketDataError>,
    },
}

impl CatalogLoad {
    /// Request the market list.
    pub fn markets(source: Arc<dyn MarketDataSource>) -> BoxFuture<'static, CatalogLoad> {
        async move { CatalogLoad::Markets(source.markets().await) }.boxed()
    }

    /// Request the suggested tickers of `market`.
    pub fn suggestions(
        source: Arc<dyn MarketDataSource>,
        market: Market,
    ) -> BoxFuture<'static, CatalogLoad> {
        async move {
            let result = source.suggested_tickers(&market.id).await;
            CatalogLoad::Suggestions { market, result }
        }
        .boxed()
    }
}

#[derive(Clone, Debug)]
pub struct MarketCatalog {
    markets: Vec<Market>,
    suggestions: HashMap<MarketId, Vec<String>>,
    source: CatalogSource,
}

impl Default for MarketCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MarketCatalog {
    /// Catalog of the built-in markets.
    pub fn builtin() -> Self {
        Self {
            markets: default_markets(),
            suggestions: HashMap::new(),
            source: CatalogSource::Builtin,
        }
    }

    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Look up a market by id, ignoring case.
    pub fn market(&self, id: &str) -> Option<&Market> {
        let id = id.trim();
        self.markets.iter().find(|m| m.id.eq_ignore_ascii_case(id))
    }

    /// Suggested tickers of a market: the last loaded list, else the
    /// market's embedded one.
    pub fn suggestions(&self, id: &str) -> &[String] {
        if let Some(loaded) = self.suggestions.get(id) {
            return loaded;
        }
        self.market(id)
            .map(|m| m.suggested.as_slice())
            .unwrap_or_default()
    }

    /// Replace the market list with the API's.
    pub async fn refresh_markets(&mut self, source: &dyn MarketDataSource) {
        let result = source.markets().await;
        self.apply_markets(result);
    }

    /// Load the suggested tickers of `market` and return them.
    pub async fn refresh_suggestions(
        &mut self,
        source: &dyn MarketDataSource,
        market: &Market,
    ) -> Vec<String> {
        let result = source.suggested_tickers(&market.id).await;
        self.apply_suggestions(market, result)
    }

    /// Apply a background load. Returns the suggestions it stored, if any.
    pub fn apply(&mut self, load: CatalogLoad) -> Option<Vec<String>> {
        match load {
            CatalogLoad::Markets(result) => {
                self.apply_markets(result);
                None
            }
            CatalogLoad::Suggestions { market, result } => {
                Some(self.apply_suggestions(&market, result))
            }
        }
    }

    /// Install a market list answer, falling back to the built-in markets.
    ///
    /// Suggestions already loaded for a market that is still listed are kept.
    pub fn apply_markets(&mut self, result: Result<Vec<Market>, MarketDataError>) {
        match result {
            Ok(markets) if !markets.is_empty() => {
                debug!("Loaded {} markets", markets.len());
                self.replace_markets(markets);
                self.source = CatalogSource::Remote;
            }
            Ok(_) => self.fall_back("the API listed no markets".to_string()),
            Err(e) => self.fall_back(e.to_string()),
        }
    }

    /// Store a suggested tickers answer and return the list now in use.
    pub fn apply_suggestions(
        &mut self,
        market: &Market,
        result: Result<Vec<String>, MarketDataError>,
    ) -> Vec<String> {
        let loaded = match result {
            Ok(symbols) if !symbols.is_empty() => symbols,
            Ok(_) => {
                warn!(
                    "No suggested tickers for {}, using the embedded list",
                    market.id
                );
                market.suggested.clone()
            }
            Err(e) => {
                warn!(
                    "Failed to load suggested tickers for {}: {}. Using the embedded list",
                    market.id, e
                );
                market.suggested.clone()
            }
        };

        self.suggestions.insert(market.id.clone(), loaded.clone());
        loaded
    }

    fn fall_back(&mut self, reason: String) {
        warn!("Market catalog unavailable ({}), using built-in markets", reason);
        self.replace_markets(default_markets());
        self.source = CatalogSource::Fallback(reason);
    }

    fn replace_markets(&mut self, markets: Vec<Market>) {
        self.suggestions
            .retain(|id, _| markets.iter().any(|m| &m.id == id));
        self.markets = markets;
    }
}
