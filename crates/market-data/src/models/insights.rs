use serde::{Deserialize, Serialize};

use super::types::MarketId;

/// AI-generated narrative for a ticker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InsightsResult {
    pub ticker: String,

    /// Empty on the wire for single-market deployments; filled in by the source.
    #[serde(default)]
    pub market: MarketId,

    /// Free-text narrative (`insights` on the wire)
    #[serde(alias = "insights")]
    pub narrative: String,
}
