//! TickerTracker Core - client-side view state for the market dashboard.
//!
//! This crate tracks the selected market and ticker, fetches the overview,
//! news and insights of every new selection, caches the results per
//! selection and decides what the active tab and the price chart show. It is
//! transport-agnostic: all data comes through a
//! [`MarketDataSource`](tickertracker_market_data::MarketDataSource).
//!
//! # Data flow
//!
//! ```text
//! user action -> SelectionState -> SelectionSink queue
//!                                        |
//!                                        v
//!                 FetchOrchestrator (3 requests per selection)
//!                                        |
//!                                        v
//!                 ResultCache (one slot cell per kind)
//!                                        |
//!                       +----------------+----------------+
//!                       v                                 v
//!                TabController                    ChartDataAdapter
//! ```

pub mod cache;
pub mod catalog;
pub mod chart;
pub mod controller;
pub mod errors;
pub mod fetch;
pub mod selection;
pub mod tabs;

#[cfg(test)]
mod test_support;

pub use cache::{ResultCache, SelectionResults, SlotCell};
pub use catalog::{CatalogLoad, CatalogSource, MarketCatalog};
pub use chart::{prepare_series, ChartData, ChartPoint, ChartSeries};
pub use controller::{ControllerConfig, MarketViewController, TabView, ViewUpdate};
pub use fetch::{ApplyOutcome, FetchSlot, FetchOrchestrator, SlotId, SlotState, SlotStatus};
pub use selection::{Selection, SelectionSink, SelectionState, TickerOrigin};
pub use tabs::{Tab, TabController};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
