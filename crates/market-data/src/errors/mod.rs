//! Error types and failure classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The error enum for every remote operation
//! - [`FailureClass`]: Coarse classification used when reporting failures

mod class;

pub use class::FailureClass;

use thiserror::Error;

/// Errors that can occur while talking to the TickerTracker API.
///
/// None of these are retried by the client. A failed request is reported
/// against the data kind that issued it and the user re-triggers the fetch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status} from {endpoint}: {message}")]
    Status {
        /// The request target
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Error detail extracted from the body, if any
        message: String,
    },

    /// The request did not complete before the transport timeout.
    #[error("Request to {endpoint} timed out")]
    Timeout {
        /// The request target
        endpoint: String,
    },

    /// The request never produced a response (DNS, refused connection, TLS...).
    #[error("Network error for {endpoint}: {message}")]
    Network {
        /// The request target
        endpoint: String,
        /// Transport error description
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Malformed response from {endpoint}: {message}")]
    Decode {
        /// The request target
        endpoint: String,
        /// Decoder error description
        message: String,
    },
}

impl MarketDataError {
    /// Returns the failure classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tickertracker_market_data::errors::{FailureClass, MarketDataError};
    ///
    /// let error = MarketDataError::Timeout { endpoint: "/api/markets".to_string() };
    /// assert_eq!(error.class(), FailureClass::Connectivity);
    /// ```
    pub fn class(&self) -> FailureClass {
        match self {
            Self::Status { .. } => FailureClass::Server,
            Self::Timeout { .. } | Self::Network { .. } => FailureClass::Connectivity,
            Self::Decode { .. } => FailureClass::Payload,
        }
    }

    /// The request target this error refers to.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Status { endpoint, .. }
            | Self::Timeout { endpoint }
            | Self::Network { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_server_failure() {
        let error = MarketDataError::Status {
            endpoint: "/api/ticker/AAPL/news".to_string(),
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(error.class(), FailureClass::Server);
    }

    #[test]
    fn test_timeout_and_network_are_connectivity_failures() {
        let timeout = MarketDataError::Timeout {
            endpoint: "/api/markets".to_string(),
        };
        let network = MarketDataError::Network {
            endpoint: "/api/markets".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(timeout.class(), FailureClass::Connectivity);
        assert_eq!(network.class(), FailureClass::Connectivity);
    }

    #[test]
    fn test_decode_is_payload_failure() {
        let error = MarketDataError::Decode {
            endpoint: "/api/ticker/AAPL/insights".to_string(),
            message: "missing field `ticker`".to_string(),
        };
        assert_eq!(error.class(), FailureClass::Payload);
        assert_eq!(error.endpoint(), "/api/ticker/AAPL/insights");
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::Status {
            endpoint: "/api/ticker/AAPL/overview".to_string(),
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "HTTP 503 from /api/ticker/AAPL/overview: Service Unavailable"
        );

        let error = MarketDataError::Timeout {
            endpoint: "/api/markets".to_string(),
        };
        assert_eq!(format!("{}", error), "Request to /api/markets timed out");
    }
}
