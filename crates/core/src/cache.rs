//! Per-selection result store.
//!
//! Each selection owns one cell per data kind. A cell holds the current slot
//! and the last settled slot it replaced, so a refresh can keep showing the
//! previous data until the new request settles. Entries live for the session.

use std::collections::HashMap;

use tickertracker_market_data::{
    DataKind, HistoricalPoint, InsightsResult, NewsItem, OverviewResult,
};

use crate::fetch::{FetchSlot, SlotStatus};
use crate::selection::Selection;

/// Payload types that have a cell in [`SelectionResults`].
pub trait KindPayload: Sized {
    const KIND: DataKind;

    fn cell(results: &SelectionResults) -> Option<&SlotCell<Self>>;

    fn cell_mut(results: &mut SelectionResults) -> &mut Option<SlotCell<Self>>;
}

macro_rules! kind_payload {
    ($ty:ty, $kind:expr, $field:ident) => {
        impl KindPayload for $ty {
            const KIND: DataKind = $kind;

            fn cell(results: &SelectionResults) -> Option<&SlotCell<Self>> {
                results.$field.as_ref()
            }

            fn cell_mut(results: &mut SelectionResults) -> &mut Option<SlotCell<Self>> {
                &mut results.$field
            }
        }
    };
}

kind_payload!(OverviewResult, DataKind::Overview, overview);
kind_payload!(Vec<NewsItem>, DataKind::News, news);
kind_payload!(InsightsResult, DataKind::Insights, insights);
kind_payload!(Vec<HistoricalPoint>, DataKind::History, history);

/// Current slot of one kind plus the settled slot it superseded.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotCell<T> {
    current: FetchSlot<T>,
    stale: Option<FetchSlot<T>>,
}

impl<T> SlotCell<T> {
    fn new(current: FetchSlot<T>) -> Self {
        Self {
            current,
            stale: None,
        }
    }

    /// Replace the current slot with a newly issued one.
    fn supersede(self, next: FetchSlot<T>) -> Self {
        let stale = if self.current.is_settled() {
            Some(self.current)
        } else {
            self.stale
        };

        Self {
            current: next,
            stale,
        }
    }

    pub fn current(&self) -> &FetchSlot<T> {
        &self.current
    }

    pub fn stale(&self) -> Option<&FetchSlot<T>> {
        self.stale.as_ref()
    }

    /// The slot to render: current if settled, else the stale fallback, else
    /// the pending slot.
    pub fn visible(&self) -> &FetchSlot<T> {
        if self.current.is_settled() {
            return &self.current;
        }
        self.stale.as_ref().unwrap_or(&self.current)
    }
}

/// All cells of one selection. Kinds are never merged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionResults {
    overview: Option<SlotCell<OverviewResult>>,
    news: Option<SlotCell<Vec<NewsItem>>>,
    insights: Option<SlotCell<InsightsResult>>,
    history: Option<SlotCell<Vec<HistoricalPoint>>>,
}

impl SelectionResults {
    pub fn overview(&self) -> Option<&SlotCell<OverviewResult>> {
        self.overview.as_ref()
    }

    pub fn news(&self) -> Option<&SlotCell<Vec<NewsItem>>> {
        self.news.as_ref()
    }

    pub fn insights(&self) -> Option<&SlotCell<InsightsResult>> {
        self.insights.as_ref()
    }

    pub fn history(&self) -> Option<&SlotCell<Vec<HistoricalPoint>>> {
        self.history.as_ref()
    }

    /// Status of the current slot of `kind`, if one was ever issued.
    pub fn status(&self, kind: DataKind) -> Option<SlotStatus> {
        match kind {
            DataKind::Overview => self.overview.as_ref().map(|c| c.current.status()),
            DataKind::News => self.news.as_ref().map(|c| c.current.status()),
            DataKind::Insights => self.insights.as_ref().map(|c| c.current.status()),
            DataKind::History => self.history.as_ref().map(|c| c.current.status()),
        }
    }

    /// True while any of the round's current slots is pending.
    pub fn is_loading(&self) -> bool {
        DataKind::ROUND
            .iter()
            .any(|kind| self.status(*kind) == Some(SlotStatus::Pending))
    }
}

/// Selection -> results store.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<Selection, SelectionResults>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, selection: &Selection) -> Option<&SelectionResults> {
        self.entries.get(selection)
    }

    /// Current slot of `T`'s kind.
    pub fn slot<T: KindPayload>(&self, selection: &Selection) -> Option<&FetchSlot<T>> {
        self.get(selection)
            .and_then(T::cell)
            .map(|cell| cell.current())
    }

    /// Slot to render for `T`'s kind. See [`SlotCell::visible`].
    pub fn visible<T: KindPayload>(&self, selection: &Selection) -> Option<&FetchSlot<T>> {
        self.get(selection)
            .and_then(T::cell)
            .map(|cell| cell.visible())
    }

    /// Store a slot.
    ///
    /// A pending slot always becomes current. A settled slot is accepted only
    /// when it settles the current pending slot (same id). Returns whether the
    /// slot was stored.
    pub fn put<T: KindPayload>(&mut self, selection: &Selection, slot: FetchSlot<T>) -> bool {
        if slot.is_pending() {
            let cell = T::cell_mut(self.entries.entry(selection.clone()).or_default());
            let next = match cell.take() {
                Some(previous) => previous.supersede(slot),
                None => SlotCell::new(slot),
            };
            *cell = Some(next);
            return true;
        }

        let Some(cell) = self
            .entries
            .get_mut(selection)
            .and_then(|results| T::cell_mut(results).as_mut())
        else {
            return false;
        };

        if !cell.current.is_pending() || cell.current.id() != slot.id() {
            return false;
        }

        cell.current = slot;
        true
    }

    /// True when the current slot of `kind` has settled.
    pub fn has_fresh(&self, selection: &Selection, kind: DataKind) -> bool {
        matches!(
            self.get(selection).and_then(|results| results.status(kind)),
            Some(SlotStatus::Ready | SlotStatus::Failed)
        )
    }

    pub fn is_loading(&self, selection: &Selection) -> bool {
        self.get(selection)
            .map(SelectionResults::is_loading)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::SlotId;

    fn aapl() -> Selection {
        Selection::new("US", "AAPL").unwrap()
    }

    fn insights(narrative: &str) -> InsightsResult {
        InsightsResult {
            ticker: "AAPL".to_string(),
            market: "US".to_string(),
            narrative: narrative.to_string(),
        }
    }

    #[test]
    fn test_settle_requires_matching_pending_slot() {
        let mut cache = ResultCache::new();
        let selection = aapl();

        assert!(cache.put(&selection, FetchSlot::<InsightsResult>::pending(SlotId::new(1))));
        assert!(cache.is_loading(&selection));

        // Wrong id
        assert!(!cache.put(&selection, FetchSlot::ready(SlotId::new(2), insights("x"))));
        // Right id
        assert!(cache.put(&selection, FetchSlot::ready(SlotId::new(1), insights("first"))));
        // Already settled: no regression
        assert!(!cache.put(&selection, FetchSlot::<InsightsResult>::failed(SlotId::new(1), "late")));

        let slot = cache.slot::<InsightsResult>(&selection).unwrap();
        assert_eq!(slot.value().unwrap().narrative, "first");
        assert!(cache.has_fresh(&selection, DataKind::Insights));
        assert!(!cache.is_loading(&selection));
    }

    #[test]
    fn test_settled_put_without_entry_is_rejected() {
        let mut cache = ResultCache::new();

        assert!(!cache.put(&aapl(), FetchSlot::ready(SlotId::new(1), insights("x"))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_stale_slot_stays_visible_during_refresh() {
        let mut cache = ResultCache::new();
        let selection = aapl();

        cache.put(&selection, FetchSlot::<InsightsResult>::pending(SlotId::new(1)));
        cache.put(&selection, FetchSlot::ready(SlotId::new(1), insights("old")));
        cache.put(&selection, FetchSlot::<InsightsResult>::pending(SlotId::new(4)));

        assert!(!cache.has_fresh(&selection, DataKind::Insights));
        let visible = cache.visible::<InsightsResult>(&selection).unwrap();
        assert_eq!(visible.value().unwrap().narrative, "old");

        cache.put(&selection, FetchSlot::ready(SlotId::new(4), insights("new")));
        let visible = cache.visible::<InsightsResult>(&selection).unwrap();
        assert_eq!(visible.value().unwrap().narrative, "new");
        assert_eq!(
            cache
                .get(&selection)
                .and_then(|r| r.insights())
                .and_then(|c| c.stale())
                .map(|s| s.id()),
            Some(SlotId::new(1))
        );
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut cache = ResultCache::new();
        let selection = aapl();

        cache.put(&selection, FetchSlot::<OverviewResult>::pending(SlotId::new(1)));
        cache.put(&selection, FetchSlot::<Vec<NewsItem>>::pending(SlotId::new(2)));
        cache.put(&selection, FetchSlot::<Vec<NewsItem>>::failed(SlotId::new(2), "HTTP 502"));

        let results = cache.get(&selection).unwrap();
        assert_eq!(results.status(DataKind::Overview), Some(SlotStatus::Pending));
        assert_eq!(results.status(DataKind::News), Some(SlotStatus::Failed));
        assert_eq!(results.status(DataKind::Insights), None);
        assert!(results.is_loading());
    }

    #[test]
    fn test_history_does_not_drive_loading() {
        let mut cache = ResultCache::new();
        let selection = aapl();

        cache.put(&selection, FetchSlot::<Vec<HistoricalPoint>>::pending(SlotId::new(1)));

        assert!(!cache.is_loading(&selection));
        assert_eq!(cache.len(), 1);
    }
}
