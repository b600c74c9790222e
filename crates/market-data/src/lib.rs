//! TickerTracker Market Data Crate
//!
//! This crate describes the remote TickerTracker API as the client sees it:
//! the JSON shapes it returns, how a request target is derived, and how a
//! request is carried out.
//!
//! # Overview
//!
//! - Wire models: markets, ticker overviews, news with sentiment, AI insights,
//!   historical closing prices
//! - Endpoint resolution that keeps the client independent of any URL layout
//! - A pluggable [`Transport`] with a reqwest implementation
//! - A [`MarketDataSource`] trait, implemented over HTTP by [`HttpMarketDataSource`]
//! - Display-symbol normalization for exchange suffixes (`TCS.NS` -> `TCS`)
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! | MarketDataSource |  (typed results per data kind)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! | EndpointResolver | --> |  request target  |
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Transport     |  (reqwest, mocks)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   JSON payload   |  -> models
//!                          +------------------+
//! ```
//!
//! # Error Handling
//!
//! A well-formed "ticker not found" payload is data, not an error: it decodes
//! to [`OverviewResult::NotFound`]. Everything that goes wrong on the way
//! (status codes, timeouts, malformed bodies) is a [`MarketDataError`].

pub mod errors;
pub mod models;
pub mod provider;
pub mod resolver;

// Re-export all public types from models
pub use models::{
    default_markets, Currency, DataKind, HistoricalPoint, InsightsResult, Market, MarketId,
    NewsItem, OverviewResult, Sentiment, TickerOverview,
};

// Re-export resolver types
pub use resolver::{normalize_display_symbol, strip_exchange_suffix, KNOWN_EXCHANGE_SUFFIXES};

// Re-export provider types
pub use provider::{
    Endpoint, EndpointResolver, HttpMarketDataSource, HttpResponse, MarketDataSource,
    ReqwestTransport, RestEndpointResolver, Transport,
};

pub use errors::{FailureClass, MarketDataError};
