use std::sync::Arc;

use futures::future::{self, BoxFuture, Either};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, warn};
use tickertracker_market_data::{
    DataKind, HistoricalPoint, InsightsResult, Market, MarketDataSource, NewsItem,
    OverviewResult,
};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::cache::ResultCache;
use crate::catalog::{CatalogLoad, MarketCatalog};
use crate::chart::{prepare_series, ChartData};
use crate::errors::{Error, Result};
use crate::fetch::{ApplyOutcome, FetchOrchestrator, FetchSlot, SlotId, SlotStatus};
use crate::selection::{ChannelSelectionSink, Selection, SelectionState, TickerOrigin};
use crate::tabs::{Tab, TabController};

/// Startup configuration.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ControllerConfig {
    pub initial: Selection,
}

/// Report of one finished request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewUpdate {
    pub selection: Selection,
    pub kind: DataKind,
    pub outcome: ApplyOutcome,
    /// False when the request ended in a transport failure.
    pub succeeded: bool,
    /// True when the update changed what the active view shows.
    pub visible: bool,
}

/// What the active tab shows for the current selection.
///
/// `None` means no request of that kind was ever issued for the selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TabView<'a> {
    Overview(Option<&'a FetchSlot<OverviewResult>>),
    News(Option<&'a FetchSlot<Vec<NewsItem>>>),
    Insights(Option<&'a FetchSlot<InsightsResult>>),
}

impl TabView<'_> {
    pub fn tab(&self) -> Tab {
        match self {
            TabView::Overview(_) => Tab::Overview,
            TabView::News(_) => Tab::News,
            TabView::Insights(_) => Tab::Insights,
        }
    }
}

/// Single-owner view state for one market dashboard.
///
/// All methods run on the caller's task. Requests, including the background
/// catalog loads, make progress only while [`next_update`](Self::next_update)
/// (or [`settle`](Self::settle)) is being awaited.
pub struct MarketViewController {
    source: Arc<dyn MarketDataSource>,
    catalog: MarketCatalog,
    catalog_loads: FuturesUnordered<BoxFuture<'static, CatalogLoad>>,
    selection: SelectionState,
    selection_queue: UnboundedReceiver<Selection>,
    orchestrator: FetchOrchestrator,
    cache: ResultCache,
    tabs: TabController,
}

impl MarketViewController {
    pub fn new(source: Arc<dyn MarketDataSource>, config: ControllerConfig) -> Self {
        let catalog = MarketCatalog::builtin();
        let initial = match catalog.market(config.initial.market()) {
            Some(market) => config.initial.in_market(market),
            None => config.initial,
        };

        let (sink, selection_queue) = ChannelSelectionSink::new();
        let mut selection = SelectionState::new(initial);
        selection.subscribe(Arc::new(sink));

        Self {
            orchestrator: FetchOrchestrator::new(Arc::clone(&source)),
            source,
            catalog,
            catalog_loads: FuturesUnordered::new(),
            selection,
            selection_queue,
            cache: ResultCache::new(),
            tabs: TabController::new(),
        }
    }

    /// Start the round for the initial selection and queue the catalog load.
    ///
    /// Returns at once. The market list, then the current market's suggested
    /// tickers, are applied as they arrive through [`next_update`](Self::next_update).
    pub fn start(&mut self) {
        let initial = self.selection.current().clone();
        self.orchestrator.orchestrate(&initial, &mut self.cache);
        self.catalog_loads
            .push(CatalogLoad::markets(Arc::clone(&self.source)));
    }

    /// Switch market by id, loading its suggested tickers first.
    ///
    /// Returns whether the selection changed.
    pub async fn select_market(&mut self, id: &str) -> Result<bool> {
        let market = self
            .catalog
            .market(id)
            .cloned()
            .ok_or_else(|| Error::UnknownMarket(id.trim().to_string()))?;

        let suggestions = self
            .catalog
            .refresh_suggestions(self.source.as_ref(), &market)
            .await;
        let changed = self.selection.set_market(&market, &suggestions);
        self.dispatch();
        Ok(changed)
    }

    /// Typed ticker search. Submitting the current ticker again re-fetches.
    pub fn submit_ticker(&mut self, symbol: &str) -> Result<bool> {
        let changed = self.selection.set_ticker(symbol)?;
        if changed {
            self.dispatch();
        } else {
            self.refresh();
        }
        Ok(changed)
    }

    /// Quick-pick one of the current market's suggestions.
    pub fn pick_suggestion(&mut self, symbol: &str) -> Result<bool> {
        let market = self.active_market();
        let changed = self.selection.pick_suggestion(symbol, &market)?;
        self.dispatch();
        Ok(changed)
    }

    /// Re-issue the round for the current selection.
    pub fn refresh(&mut self) -> [SlotId; 3] {
        let current = self.selection.current().clone();
        self.orchestrator.refresh(&current, &mut self.cache)
    }

    /// Request the price history of the current selection.
    pub fn request_history(&mut self) -> SlotId {
        let current = self.selection.current().clone();
        self.orchestrator.request_history(&current, &mut self.cache)
    }

    /// Returns whether the active tab changed. Never fetches.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        self.tabs.select(tab)
    }

    /// Wait for the next data request to finish and apply it.
    ///
    /// Catalog loads finishing meanwhile are applied without producing an
    /// update. Returns `None` when nothing is in flight. Cancel safe: dropping
    /// the returned future before it resolves loses no completion.
    pub async fn next_update(&mut self) -> Option<ViewUpdate> {
        let completion = loop {
            self.dispatch();
            if self.catalog_loads.is_empty() {
                break self.orchestrator.next_completion().await?;
            }
            if self.orchestrator.in_flight() == 0 {
                let load = self.catalog_loads.next().await;
                if let Some(load) = load {
                    self.apply_catalog_load(load);
                }
                continue;
            }

            let next = {
                let fetch = self.orchestrator.next_completion();
                let catalog = self.catalog_loads.next();
                futures::pin_mut!(fetch, catalog);
                match future::select(fetch, catalog).await {
                    Either::Left((completion, _)) => Either::Left(completion),
                    Either::Right((load, _)) => Either::Right(load),
                }
            };
            match next {
                Either::Left(completion) => break completion?,
                Either::Right(Some(load)) => self.apply_catalog_load(load),
                Either::Right(None) => {}
            }
        };

        let selection = completion.selection.clone();
        let kind = completion.outcome.kind();
        let succeeded = completion.outcome.is_ok();
        let outcome = self.orchestrator.apply(completion, &mut self.cache);

        let visible = outcome == ApplyOutcome::Applied
            && &selection == self.selection.current()
            && (kind == DataKind::History || kind == self.tabs.active().kind());

        Some(ViewUpdate {
            selection,
            kind,
            outcome,
            succeeded,
            visible,
        })
    }

    /// Apply every in-flight request.
    pub async fn settle(&mut self) -> Vec<ViewUpdate> {
        let mut updates = Vec::new();
        while let Some(update) = self.next_update().await {
            updates.push(update);
        }
        updates
    }

    pub fn has_pending_work(&self) -> bool {
        self.orchestrator.in_flight() > 0 || !self.catalog_loads.is_empty()
    }

    /// Whether a catalog request is still outstanding.
    pub fn is_catalog_loading(&self) -> bool {
        !self.catalog_loads.is_empty()
    }

    /// True while any of the current selection's round is pending.
    pub fn is_loading(&self) -> bool {
        self.cache.is_loading(self.selection.current())
    }

    /// Slot the active tab shows: current if settled, else the stale one.
    pub fn visible(&self) -> TabView<'_> {
        let current = self.selection.current();
        match self.tabs.active() {
            Tab::Overview => TabView::Overview(self.cache.visible::<OverviewResult>(current)),
            Tab::News => TabView::News(self.cache.visible::<Vec<NewsItem>>(current)),
            Tab::Insights => TabView::Insights(self.cache.visible::<InsightsResult>(current)),
        }
    }

    /// Chart series from the current selection's last settled history.
    pub fn chart(&self) -> ChartData {
        let current = self.selection.current();
        let history = self
            .cache
            .visible::<Vec<HistoricalPoint>>(current)
            .and_then(|slot| slot.value())
            .map(Vec::as_slice);
        prepare_series(current.ticker(), history)
    }

    /// Status of the current selection's latest history request.
    pub fn history_status(&self) -> Option<SlotStatus> {
        self.cache
            .get(self.selection.current())
            .and_then(|results| results.status(DataKind::History))
    }

    pub fn selection(&self) -> &Selection {
        self.selection.current()
    }

    pub fn origin(&self) -> TickerOrigin {
        self.selection.origin()
    }

    pub fn active_tab(&self) -> Tab {
        self.tabs.active()
    }

    pub fn catalog(&self) -> &MarketCatalog {
        &self.catalog
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Suggested tickers of the current market.
    pub fn suggestions(&self) -> &[String] {
        self.catalog.suggestions(self.selection.current().market())
    }

    pub fn current_market(&self) -> Option<&Market> {
        self.catalog.market(self.selection.current().market())
    }

    fn active_market(&self) -> Market {
        self.current_market().cloned().unwrap_or_else(|| {
            let id = self.selection.current().market();
            Market::new(id, id, "USD")
        })
    }

    fn apply_catalog_load(&mut self, load: CatalogLoad) {
        let listed = matches!(load, CatalogLoad::Markets(_));
        self.catalog.apply(load);
        if !listed {
            return;
        }

        let current = self.selection.current().market().to_string();
        match self.catalog.market(&current).cloned() {
            Some(market) => self
                .catalog_loads
                .push(CatalogLoad::suggestions(Arc::clone(&self.source), market)),
            None => warn!("Market {} is not in the catalog", current),
        }
    }

    /// Start a round for every queued selection change.
    fn dispatch(&mut self) {
        while let Ok(selection) = self.selection_queue.try_recv() {
            if !self.orchestrator.orchestrate(&selection, &mut self.cache) {
                debug!("No new round for {}", selection);
            }
        }
    }
}
