//! Market data models
//!
//! This module contains the JSON shapes exchanged with the TickerTracker API:
//! - `types` - Identifier aliases and the `DataKind` enum
//! - `market` - Supported markets and the built-in fallback catalog
//! - `overview` - Price/valuation overview or a "ticker not found" payload
//! - `news` - News items with optional sentiment scores
//! - `insights` - AI-generated narrative per ticker
//! - `history` - Daily closing prices for the chart
//! - `dates` - Lenient date/timestamp decoding shared by the models above

mod dates;
mod history;
mod insights;
mod market;
mod news;
mod overview;
mod types;

pub use history::HistoricalPoint;
pub use insights::InsightsResult;
pub(crate) use market::TickerEntry;
pub use market::{default_markets, Market};
pub use news::{NewsItem, Sentiment, SENTIMENT_THRESHOLD};
pub use overview::{OverviewResult, TickerOverview};
pub use types::{Currency, DataKind, MarketId};
