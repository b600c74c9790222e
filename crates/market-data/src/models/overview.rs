use serde::{Deserialize, Serialize};

use super::types::{Currency, MarketId};

/// Price and valuation snapshot for a ticker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerOverview {
    /// Ticker symbol (e.g., "AAPL")
    pub symbol: String,

    /// Company or asset name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Last price
    pub price: f64,

    /// Absolute change since previous close
    pub change: f64,

    /// Percent change since previous close
    pub change_percent: f64,

    /// Market capitalization in `currency` units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,

    /// Quote currency
    #[serde(default = "default_currency")]
    pub currency: Currency,

    /// Market tag reported by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketId>,
}

fn default_currency() -> Currency {
    "USD".to_string()
}

impl TickerOverview {
    /// Name to show in headings, falling back to the symbol.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.symbol)
    }

    /// True when the price is flat or up since previous close.
    pub fn is_gain(&self) -> bool {
        self.change >= 0.0
    }

    /// Market capitalization in billions.
    pub fn market_cap_billions(&self) -> Option<f64> {
        self.market_cap.map(|cap| cap / 1e9)
    }
}

/// Outcome of an overview request that reached the API.
///
/// `NotFound` is the API's well-formed "no such ticker" answer
/// (`{"error": "..."}`). It is a displayable result, not a failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverviewResult {
    NotFound {
        #[serde(rename = "error")]
        message: String,
    },
    Found(TickerOverview),
}

impl OverviewResult {
    pub fn overview(&self) -> Option<&TickerOverview> {
        match self {
            Self::Found(overview) => Some(overview),
            Self::NotFound { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
