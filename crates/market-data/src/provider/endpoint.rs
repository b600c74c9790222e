use crate::models::DataKind;

/// A request the client can make, independent of where it is served.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// Catalog of supported markets
    Markets,
    /// Suggested tickers for one market
    MarketTickers { market: &'a str },
    /// One data kind for a (market, ticker) pair
    Ticker {
        kind: DataKind,
        market: &'a str,
        ticker: &'a str,
    },
}

/// Maps an [`Endpoint`] to a request target understood by the transport.
pub trait EndpointResolver: Send + Sync {
    fn resolve(&self, endpoint: &Endpoint<'_>) -> String;
}

/// Resolver for the TickerTracker REST layout.
///
/// ```text
/// /api/markets
/// /api/market/{market}/tickers
/// /api/ticker/{ticker}/{overview|news|insights|history}?market={market}
/// ```
#[derive(Clone, Debug)]
pub struct RestEndpointResolver {
    base_url: String,
}

impl RestEndpointResolver {
    /// Create a resolver rooted at `base_url` (e.g., "http://localhost:8000").
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl EndpointResolver for RestEndpointResolver {
    fn resolve(&self, endpoint: &Endpoint<'_>) -> String {
        match endpoint {
            Endpoint::Markets => format!("{}/api/markets", self.base_url),
            Endpoint::MarketTickers { market } => format!(
                "{}/api/market/{}/tickers",
                self.base_url,
                urlencoding::encode(market)
            ),
            Endpoint::Ticker {
                kind,
                market,
                ticker,
            } => format!(
                "{}/api/ticker/{}/{}?market={}",
                self.base_url,
                urlencoding::encode(ticker),
                kind.as_str(),
                urlencoding::encode(market)
            ),
        }
    }
}
