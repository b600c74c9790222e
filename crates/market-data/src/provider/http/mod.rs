//! HTTP market data source.
//!
//! Decodes the TickerTracker API's JSON payloads into the crate's models:
//! - Catalog via `/api/markets` and `/api/market/{market}/tickers`
//! - Per-ticker overview, news, insights and history
//!
//! Non-2xx statuses, transport errors and undecodable bodies become
//! [`MarketDataError`]s. The overview's `{"error": ...}` payload is decoded
//! as [`OverviewResult::NotFound`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{
    DataKind, HistoricalPoint, InsightsResult, Market, NewsItem, OverviewResult, TickerEntry,
};
use crate::provider::{
    Endpoint, EndpointResolver, MarketDataSource, ReqwestTransport, RestEndpointResolver,
    Transport,
};

/// Longest body excerpt quoted in a status error.
const MAX_ERROR_EXCERPT: usize = 200;

/// Error body shapes the API produces for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    detail: Option<String>,
}

/// Market data source over the TickerTracker HTTP API.
#[derive(Clone)]
pub struct HttpMarketDataSource {
    resolver: Arc<dyn EndpointResolver>,
    transport: Arc<dyn Transport>,
}

impl HttpMarketDataSource {
    /// Create a source from an endpoint resolver and a transport.
    pub fn new(resolver: Arc<dyn EndpointResolver>, transport: Arc<dyn Transport>) -> Self {
        Self {
            resolver,
            transport,
        }
    }

    /// REST layout under `base_url`, carried by reqwest.
    pub fn rest(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self::new(
            Arc::new(RestEndpointResolver::new(base_url)),
            Arc::new(ReqwestTransport::new(timeout)),
        )
    }

    /// GET the endpoint and return the body of a successful response.
    async fn fetch(&self, endpoint: &Endpoint<'_>) -> Result<(String, String), MarketDataError> {
        let target = self.resolver.resolve(endpoint);
        let response = self.transport.get(&target).await?;

        if !response.is_success() {
            let message = error_message(&response.body);
            warn!("{} answered HTTP {}: {}", target, response.status, message);
            return Err(MarketDataError::Status {
                endpoint: target,
                status: response.status,
                message,
            });
        }

        Ok((target, response.body))
    }

    /// GET the endpoint and decode its JSON body.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<'_>,
    ) -> Result<T, MarketDataError> {
        let (target, body) = self.fetch(endpoint).await?;

        serde_json::from_str(&body).map_err(|e| MarketDataError::Decode {
            endpoint: target,
            message: e.to_string(),
        })
    }
}

/// Best human-readable detail from an error body.
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.error.or(parsed.detail) {
            return message;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_EXCERPT).collect()
}

#[async_trait]
impl MarketDataSource for HttpMarketDataSource {
    async fn markets(&self) -> Result<Vec<Market>, MarketDataError> {
        let markets: Vec<Market> = self.fetch_json(&Endpoint::Markets).await?;
        debug!("Catalog lists {} markets", markets.len());
        Ok(markets)
    }

    async fn suggested_tickers(&self, market: &str) -> Result<Vec<String>, MarketDataError> {
        let entries: Vec<TickerEntry> = self
            .fetch_json(&Endpoint::MarketTickers { market })
            .await?;

        Ok(entries
            .into_iter()
            .map(TickerEntry::into_symbol)
            .filter(|symbol| !symbol.trim().is_empty())
            .collect())
    }

    async fn overview(
        &self,
        market: &str,
        ticker: &str,
    ) -> Result<OverviewResult, MarketDataError> {
        let result: OverviewResult = self
            .fetch_json(&Endpoint::Ticker {
                kind: DataKind::Overview,
                market,
                ticker,
            })
            .await?;

        if let OverviewResult::NotFound { message } = &result {
            debug!("Overview for {} in {}: {}", ticker, market, message);
        }
        Ok(result)
    }

    async fn news(&self, market: &str, ticker: &str) -> Result<Vec<NewsItem>, MarketDataError> {
        self.fetch_json(&Endpoint::Ticker {
            kind: DataKind::News,
            market,
            ticker,
        })
        .await
    }

    async fn insights(
        &self,
        market: &str,
        ticker: &str,
    ) -> Result<InsightsResult, MarketDataError> {
        let mut insights: InsightsResult = self
            .fetch_json(&Endpoint::Ticker {
                kind: DataKind::Insights,
                market,
                ticker,
            })
            .await?;

        if insights.market.is_empty() {
            insights.market = market.to_string();
        }
        Ok(insights)
    }

    async fn history(
        &self,
        market: &str,
        ticker: &str,
    ) -> Result<Vec<HistoricalPoint>, MarketDataError> {
        self.fetch_json(&Endpoint::Ticker {
            kind: DataKind::History,
            market,
            ticker,
        })
        .await
    }
}
