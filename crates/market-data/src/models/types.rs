use std::fmt;

use serde::{Deserialize, Serialize};

/// Market identifier as used by the API (e.g. "US", "INDIA", "CRYPTO")
pub type MarketId = String;

/// Currency code (ISO 4217), passed through untouched
pub type Currency = String;

/// The independently fetched facets of a ticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Overview,
    News,
    Insights,
    /// Daily closing prices. Requested on demand, never part of a round.
    History,
}

impl DataKind {
    /// The kinds fetched every time the selection changes.
    pub const ROUND: [DataKind; 3] = [DataKind::Overview, DataKind::News, DataKind::Insights];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::News => "news",
            Self::Insights => "insights",
            Self::History => "history",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
