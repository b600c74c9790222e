//! Scripted market data source shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use tickertracker_market_data::{
    DataKind, HistoricalPoint, InsightsResult, Market, MarketDataError, MarketDataSource,
    NewsItem, OverviewResult, TickerOverview,
};
use tokio::sync::oneshot;

/// Source answering every request from scripts, with sensible defaults.
///
/// - Unscripted overviews are found at price 100.0
/// - Unscripted news, history and suggestions are empty
/// - A gate holds the next matching request until its sender fires, and
///   [`gate_markets`](MockSource::gate_markets) does the same for the market list
#[derive(Default)]
pub struct MockSource {
    markets: Mutex<Option<Result<Vec<Market>, MarketDataError>>>,
    suggestions: Mutex<HashMap<String, Result<Vec<String>, MarketDataError>>>,
    overviews: Mutex<HashMap<String, OverviewResult>>,
    news: Mutex<HashMap<String, Vec<NewsItem>>>,
    history: Mutex<HashMap<String, Vec<HistoricalPoint>>>,
    failures: Mutex<HashMap<(DataKind, String), MarketDataError>>,
    gates: Mutex<HashMap<(DataKind, String), oneshot::Receiver<()>>>,
    markets_gate: Mutex<Option<oneshot::Receiver<()>>>,
    calls: Mutex<Vec<(DataKind, String, String)>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_markets(&self, markets: Result<Vec<Market>, MarketDataError>) {
        *self.markets.lock().unwrap() = Some(markets);
    }

    pub fn set_suggestions(&self, market: &str, result: Result<Vec<String>, MarketDataError>) {
        self.suggestions
            .lock()
            .unwrap()
            .insert(market.to_string(), result);
    }

    pub fn set_overview(&self, ticker: &str, overview: OverviewResult) {
        self.overviews
            .lock()
            .unwrap()
            .insert(ticker.to_string(), overview);
    }

    pub fn set_news(&self, ticker: &str, news: Vec<NewsItem>) {
        self.news.lock().unwrap().insert(ticker.to_string(), news);
    }

    pub fn set_history(&self, ticker: &str, history: Vec<HistoricalPoint>) {
        self.history
            .lock()
            .unwrap()
            .insert(ticker.to_string(), history);
    }

    /// Fail every request of `kind` for `ticker`.
    pub fn fail(&self, kind: DataKind, ticker: &str, error: MarketDataError) {
        self.failures
            .lock()
            .unwrap()
            .insert((kind, ticker.to_string()), error);
    }

    /// Hold the next request of `kind` for `ticker` until the sender fires.
    pub fn gate(&self, kind: DataKind, ticker: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .insert((kind, ticker.to_string()), rx);
        tx
    }

    /// Hold the next market list request until the sender fires.
    pub fn gate_markets(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.markets_gate.lock().unwrap() = Some(rx);
        tx
    }

    /// Number of per-ticker requests issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self, kind: DataKind) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _, _)| *k == kind)
            .count()
    }

    pub fn calls_for(&self, ticker: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, _, t)| t == ticker)
            .count()
    }

    async fn enter(&self, kind: DataKind, market: &str, ticker: &str) -> Result<(), MarketDataError> {
        self.calls
            .lock()
            .unwrap()
            .push((kind, market.to_string(), ticker.to_string()));

        let gate = self.gates.lock().unwrap().remove(&(kind, ticker.to_string()));
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        match self.failures.lock().unwrap().get(&(kind, ticker.to_string())) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

pub fn overview(symbol: &str, price: f64) -> TickerOverview {
    TickerOverview {
        symbol: symbol.to_string(),
        name: Some(format!("{} Inc.", symbol)),
        price,
        change: 0.0,
        change_percent: 0.0,
        market_cap: None,
        currency: "USD".to_string(),
        market: None,
    }
}

pub fn history_point(date: &str, close: f64) -> HistoricalPoint {
    HistoricalPoint::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        close,
    )
}

#[async_trait]
impl MarketDataSource for MockSource {
    async fn markets(&self) -> Result<Vec<Market>, MarketDataError> {
        let gate = self.markets_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.markets
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(tickertracker_market_data::default_markets()))
    }

    async fn suggested_tickers(&self, market: &str) -> Result<Vec<String>, MarketDataError> {
        self.suggestions
            .lock()
            .unwrap()
            .get(market)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn overview(
        &self,
        market: &str,
        ticker: &str,
    ) -> Result<OverviewResult, MarketDataError> {
        self.enter(DataKind::Overview, market, ticker).await?;
        Ok(self
            .overviews
            .lock()
            .unwrap()
            .get(ticker)
            .cloned()
            .unwrap_or_else(|| OverviewResult::Found(overview(ticker, 100.0))))
    }

    async fn news(&self, market: &str, ticker: &str) -> Result<Vec<NewsItem>, MarketDataError> {
        self.enter(DataKind::News, market, ticker).await?;
        Ok(self
            .news
            .lock()
            .unwrap()
            .get(ticker)
            .cloned()
            .unwrap_or_default())
    }

    async fn insights(
        &self,
        market: &str,
        ticker: &str,
    ) -> Result<InsightsResult, MarketDataError> {
        self.enter(DataKind::Insights, market, ticker).await?;
        Ok(InsightsResult {
            ticker: ticker.to_string(),
            market: market.to_string(),
            narrative: format!("{} looks steady.", ticker),
        })
    }

    async fn history(
        &self,
        market: &str,
        ticker: &str,
    ) -> Result<Vec<HistoricalPoint>, MarketDataError> {
        self.enter(DataKind::History, market, ticker).await?;
        Ok(self
            .history
            .lock()
            .unwrap()
            .get(ticker)
            .cloned()
            .unwrap_or_default())
    }
}
