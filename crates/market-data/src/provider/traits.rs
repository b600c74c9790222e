//! Market data source trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{HistoricalPoint, InsightsResult, Market, NewsItem, OverviewResult};

/// Trait for anything that can answer the client's data requests.
///
/// Every method is an independent request: a failure in one never affects
/// another, and implementations must not retry on their own.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use tickertracker_market_data::{MarketDataSource, MarketDataError, OverviewResult};
///
/// struct Fixtures;
///
/// #[async_trait]
/// impl MarketDataSource for Fixtures {
///     async fn overview(&self, market: &str, ticker: &str) -> Result<OverviewResult, MarketDataError> {
///         // ... load a canned overview
///     }
///
///     // ... implement the remaining requests
/// }
/// ```
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// List the supported markets.
    async fn markets(&self) -> Result<Vec<Market>, MarketDataError>;

    /// List the suggested (popular) tickers of a market, in display order.
    async fn suggested_tickers(&self, market: &str) -> Result<Vec<String>, MarketDataError>;

    /// Fetch the price/valuation overview.
    ///
    /// A "ticker not found" answer is `Ok(OverviewResult::NotFound { .. })`.
    async fn overview(&self, market: &str, ticker: &str)
        -> Result<OverviewResult, MarketDataError>;

    /// Fetch recent news, newest first as the API orders it.
    async fn news(&self, market: &str, ticker: &str) -> Result<Vec<NewsItem>, MarketDataError>;

    /// Fetch the AI-generated narrative.
    async fn insights(&self, market: &str, ticker: &str)
        -> Result<InsightsResult, MarketDataError>;

    /// Fetch daily closing prices.
    ///
    /// Default implementation reports no history, which the chart shows as
    /// "no data yet".
    async fn history(
        &self,
        market: &str,
        ticker: &str,
    ) -> Result<Vec<HistoricalPoint>, MarketDataError> {
        let _ = (market, ticker);
        Ok(Vec::new())
    }
}
