//! Core error types for the TickerTracker view state.
//!
//! Fetch failures are not errors here: they settle a slot as `Failed` and are
//! rendered in place. This type only covers input the controller refuses.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the view-state controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Ticker must not be empty")]
    EmptyTicker,

    #[error("Market must not be empty")]
    EmptyMarket,

    #[error("Market '{0}' is not in the catalog")]
    UnknownMarket(String),

    #[error("Unknown tab '{0}' (expected overview, news or insights)")]
    UnknownTab(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_input() {
        assert_eq!(
            Error::UnknownMarket("EU".to_string()).to_string(),
            "Market 'EU' is not in the catalog"
        );
        assert!(Error::UnknownTab("chart".to_string())
            .to_string()
            .contains("'chart'"));
    }
}
