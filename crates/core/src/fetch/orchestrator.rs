use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use log::{debug, info, warn};
use tickertracker_market_data::{
    DataKind, HistoricalPoint, InsightsResult, MarketDataError, MarketDataSource, NewsItem,
    OverviewResult,
};

use super::slot::{FetchSlot, SlotId};
use crate::cache::{KindPayload, ResultCache};
use crate::selection::Selection;

/// What a finished request produced, tagged by kind.
#[derive(Debug)]
pub enum FetchOutcome {
    Overview(Result<OverviewResult, MarketDataError>),
    News(Result<Vec<NewsItem>, MarketDataError>),
    Insights(Result<InsightsResult, MarketDataError>),
    History(Result<Vec<HistoricalPoint>, MarketDataError>),
}

impl FetchOutcome {
    pub fn kind(&self) -> DataKind {
        match self {
            Self::Overview(_) => DataKind::Overview,
            Self::News(_) => DataKind::News,
            Self::Insights(_) => DataKind::Insights,
            Self::History(_) => DataKind::History,
        }
    }

    pub fn is_ok(&self) -> bool {
        match self {
            Self::Overview(result) => result.is_ok(),
            Self::News(result) => result.is_ok(),
            Self::Insights(result) => result.is_ok(),
            Self::History(result) => result.is_ok(),
        }
    }
}

/// A finished request, still tagged with the slot it was issued for.
#[derive(Debug)]
pub struct FetchCompletion {
    pub selection: Selection,
    pub slot: SlotId,
    pub outcome: FetchOutcome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The completion settled its slot in the cache.
    Applied,
    /// A newer request for the same selection and kind superseded it.
    Discarded,
}

/// Issues the per-selection requests and settles their slots.
///
/// Requests run concurrently as futures polled from the caller's task via
/// [`next_completion`](Self::next_completion). Nothing is spawned, so
/// dropping the orchestrator drops every in-flight request.
pub struct FetchOrchestrator {
    source: Arc<dyn MarketDataSource>,
    in_flight: FuturesUnordered<BoxFuture<'static, FetchCompletion>>,
    current: HashMap<(Selection, DataKind), SlotId>,
    last_orchestrated: Option<Selection>,
    next_slot: u64,
}

impl FetchOrchestrator {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self {
            source,
            in_flight: FuturesUnordered::new(),
            current: HashMap::new(),
            last_orchestrated: None,
            next_slot: 1,
        }
    }

    /// Start a round for `selection` unless it equals the last orchestrated one.
    ///
    /// Returns whether a round was started.
    pub fn orchestrate(&mut self, selection: &Selection, cache: &mut ResultCache) -> bool {
        if self.last_orchestrated.as_ref() == Some(selection) {
            debug!("{} already orchestrated, skipping", selection);
            return false;
        }

        self.refresh(selection, cache);
        true
    }

    /// Start a round for `selection` unconditionally.
    pub fn refresh(&mut self, selection: &Selection, cache: &mut ResultCache) -> [SlotId; 3] {
        info!("Fetching overview, news and insights for {}", selection);
        self.last_orchestrated = Some(selection.clone());
        DataKind::ROUND.map(|kind| self.issue(selection, kind, cache))
    }

    /// Request the price history for `selection`.
    pub fn request_history(&mut self, selection: &Selection, cache: &mut ResultCache) -> SlotId {
        self.issue(selection, DataKind::History, cache)
    }

    /// Wait for the next request to finish. `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<FetchCompletion> {
        self.in_flight.next().await
    }

    /// Settle the completion's slot, unless a newer request superseded it.
    pub fn apply(&mut self, completion: FetchCompletion, cache: &mut ResultCache) -> ApplyOutcome {
        let FetchCompletion {
            selection,
            slot,
            outcome,
        } = completion;
        let kind = outcome.kind();

        if !self.is_current(&selection, kind, slot) {
            debug!(
                "Discarding {} for {} from superseded slot {}",
                kind, selection, slot
            );
            return ApplyOutcome::Discarded;
        }

        let stored = match outcome {
            FetchOutcome::Overview(result) => cache.put(&selection, settle(&selection, slot, result)),
            FetchOutcome::News(result) => cache.put(&selection, settle(&selection, slot, result)),
            FetchOutcome::Insights(result) => cache.put(&selection, settle(&selection, slot, result)),
            FetchOutcome::History(result) => cache.put(&selection, settle(&selection, slot, result)),
        };

        if stored {
            ApplyOutcome::Applied
        } else {
            debug!("Cache refused {} for {} slot {}", kind, selection, slot);
            ApplyOutcome::Discarded
        }
    }

    /// Whether `slot` is the latest request for (`selection`, `kind`).
    pub fn is_current(&self, selection: &Selection, kind: DataKind, slot: SlotId) -> bool {
        self.current.get(&(selection.clone(), kind)) == Some(&slot)
    }

    /// Number of requests not yet yielded by `next_completion`.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn last_orchestrated(&self) -> Option<&Selection> {
        self.last_orchestrated.as_ref()
    }

    fn issue(&mut self, selection: &Selection, kind: DataKind, cache: &mut ResultCache) -> SlotId {
        let slot = SlotId::new(self.next_slot);
        self.next_slot += 1;
        self.current.insert((selection.clone(), kind), slot);

        match kind {
            DataKind::Overview => cache.put(selection, FetchSlot::<OverviewResult>::pending(slot)),
            DataKind::News => cache.put(selection, FetchSlot::<Vec<NewsItem>>::pending(slot)),
            DataKind::Insights => cache.put(selection, FetchSlot::<InsightsResult>::pending(slot)),
            DataKind::History => {
                cache.put(selection, FetchSlot::<Vec<HistoricalPoint>>::pending(slot))
            }
        };

        debug!("Issuing {} request for {} as slot {}", kind, selection, slot);

        let source = Arc::clone(&self.source);
        let selection = selection.clone();
        let request = async move {
            let (market, ticker) = (selection.market(), selection.ticker());
            let outcome = match kind {
                DataKind::Overview => FetchOutcome::Overview(source.overview(market, ticker).await),
                DataKind::News => FetchOutcome::News(source.news(market, ticker).await),
                DataKind::Insights => FetchOutcome::Insights(source.insights(market, ticker).await),
                DataKind::History => FetchOutcome::History(source.history(market, ticker).await),
            };

            FetchCompletion {
                selection,
                slot,
                outcome,
            }
        };

        self.in_flight.push(request.boxed());
        slot
    }
}

fn settle<T: KindPayload>(
    selection: &Selection,
    slot: SlotId,
    result: Result<T, MarketDataError>,
) -> FetchSlot<T> {
    match result {
        Ok(value) => FetchSlot::ready(slot, value),
        Err(e) => {
            warn!(
                "{} request for {} failed: {} ({})",
                T::KIND,
                selection,
                e,
                e.class().hint()
            );
            FetchSlot::failed(slot, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SelectionResults;
    use crate::fetch::SlotStatus;
    use crate::test_support::MockSource;

    fn selection(ticker: &str) -> Selection {
        Selection::new("US", ticker).unwrap()
    }

    async fn drain(orchestrator: &mut FetchOrchestrator, cache: &mut ResultCache) -> Vec<ApplyOutcome> {
        let mut outcomes = Vec::new();
        while let Some(completion) = orchestrator.next_completion().await {
            outcomes.push(orchestrator.apply(completion, cache));
        }
        outcomes
    }

    #[tokio::test]
    async fn test_round_issues_three_requests_and_settles() {
        let source = Arc::new(MockSource::new());
        let mut orchestrator = FetchOrchestrator::new(source.clone());
        let mut cache = ResultCache::new();
        let aapl = selection("AAPL");

        assert!(orchestrator.orchestrate(&aapl, &mut cache));
        assert_eq!(orchestrator.in_flight(), 3);
        assert!(cache.is_loading(&aapl));

        let outcomes = drain(&mut orchestrator, &mut cache).await;

        assert_eq!(outcomes, vec![ApplyOutcome::Applied; 3]);
        assert!(!cache.is_loading(&aapl));
        assert_eq!(source.call_count(), 3);
        for kind in DataKind::ROUND {
            assert!(cache.has_fresh(&aapl, kind));
        }
    }

    #[tokio::test]
    async fn test_same_selection_is_deduplicated() {
        let source = Arc::new(MockSource::new());
        let mut orchestrator = FetchOrchestrator::new(source.clone());
        let mut cache = ResultCache::new();
        let aapl = selection("AAPL");

        orchestrator.orchestrate(&aapl, &mut cache);
        assert!(!orchestrator.orchestrate(&aapl, &mut cache));
        drain(&mut orchestrator, &mut cache).await;

        assert_eq!(source.call_count(), 3);
    }

    #[tokio::test]
    async fn test_late_arrival_for_previous_selection_is_isolated() {
        let source = Arc::new(MockSource::new());
        let release_a = source.gate(DataKind::Overview, "AAPL");
        let mut orchestrator = FetchOrchestrator::new(source.clone());
        let mut cache = ResultCache::new();
        let (a, b) = (selection("AAPL"), selection("MSFT"));

        orchestrator.orchestrate(&a, &mut cache);
        orchestrator.orchestrate(&b, &mut cache);

        // Everything except A's overview settles
        for _ in 0..5 {
            let completion = orchestrator.next_completion().await.unwrap();
            orchestrator.apply(completion, &mut cache);
        }
        let b_before: SelectionResults = cache.get(&b).unwrap().clone();
        assert!(!cache.is_loading(&b));

        release_a.send(()).unwrap();
        let late = orchestrator.next_completion().await.unwrap();
        assert_eq!(late.selection, a);
        assert_eq!(orchestrator.apply(late, &mut cache), ApplyOutcome::Applied);

        assert_eq!(cache.get(&b).unwrap(), &b_before);
    }

    #[tokio::test]
    async fn test_superseded_slot_is_discarded() {
        let source = Arc::new(MockSource::new());
        let mut orchestrator = FetchOrchestrator::new(source.clone());
        let mut cache = ResultCache::new();
        let aapl = selection("AAPL");

        let first = orchestrator.refresh(&aapl, &mut cache);
        let second = orchestrator.refresh(&aapl, &mut cache);
        assert!(second.iter().zip(first.iter()).all(|(s, f)| s > f));

        let outcomes = drain(&mut orchestrator, &mut cache).await;

        let discarded = outcomes
            .iter()
            .filter(|o| **o == ApplyOutcome::Discarded)
            .count();
        assert_eq!(discarded, 3);
        assert_eq!(source.call_count(), 6);

        let news = cache.slot::<Vec<NewsItem>>(&aapl).unwrap();
        assert_eq!(news.id(), second[1]);
        assert_eq!(news.status(), SlotStatus::Ready);
    }

    #[tokio::test]
    async fn test_failure_is_scoped_to_its_kind() {
        let source = Arc::new(MockSource::new());
        source.fail(
            DataKind::News,
            "AAPL",
            MarketDataError::Status {
                endpoint: "/api/ticker/AAPL/news?market=US".to_string(),
                status: 500,
                message: "boom".to_string(),
            },
        );
        let mut orchestrator = FetchOrchestrator::new(source);
        let mut cache = ResultCache::new();
        let aapl = selection("AAPL");

        orchestrator.orchestrate(&aapl, &mut cache);
        drain(&mut orchestrator, &mut cache).await;

        let results = cache.get(&aapl).unwrap();
        assert_eq!(results.status(DataKind::News), Some(SlotStatus::Failed));
        assert_eq!(results.status(DataKind::Overview), Some(SlotStatus::Ready));
        assert_eq!(results.status(DataKind::Insights), Some(SlotStatus::Ready));
        assert!(cache
            .slot::<Vec<NewsItem>>(&aapl)
            .and_then(|s| s.error())
            .unwrap()
            .contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_history_is_not_part_of_round() {
        let source = Arc::new(MockSource::new());
        let mut orchestrator = FetchOrchestrator::new(source.clone());
        let mut cache = ResultCache::new();
        let aapl = selection("AAPL");

        orchestrator.orchestrate(&aapl, &mut cache);
        drain(&mut orchestrator, &mut cache).await;
        assert_eq!(source.calls(DataKind::History), 0);

        orchestrator.request_history(&aapl, &mut cache);
        assert_eq!(orchestrator.in_flight(), 1);
        drain(&mut orchestrator, &mut cache).await;

        assert_eq!(source.calls(DataKind::History), 1);
        assert!(cache.has_fresh(&aapl, DataKind::History));
    }

    #[tokio::test]
    async fn test_next_completion_on_idle_is_none() {
        let mut orchestrator = FetchOrchestrator::new(Arc::new(MockSource::new()));
        assert!(orchestrator.next_completion().await.is_none());
    }
}
