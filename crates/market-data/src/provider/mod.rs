//! Market data source abstractions and the HTTP implementation.
//!
//! This module contains:
//! - The `MarketDataSource` trait the client fetches through
//! - `Endpoint` / `EndpointResolver` mapping a request to a target string
//! - `Transport`, the raw GET contract, with a reqwest implementation
//! - `HttpMarketDataSource`, which combines a resolver and a transport
//!
//! # Architecture
//!
//! The source is designed to be:
//! - **Location-agnostic**: nothing outside `RestEndpointResolver` knows a URL
//! - **Transport-agnostic**: tests and other runtimes swap the `Transport`
//! - **Typed**: callers get decoded models, never raw bodies

mod endpoint;
mod traits;
mod transport;

pub mod http;

// Re-exports
pub use endpoint::{Endpoint, EndpointResolver, RestEndpointResolver};
pub use http::HttpMarketDataSource;
pub use traits::MarketDataSource;
pub use transport::{HttpResponse, ReqwestTransport, Transport};
