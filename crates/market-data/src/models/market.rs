use serde::{Deserialize, Serialize};

use super::types::{Currency, MarketId};

/// A market the API can serve tickers for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Market code (e.g., "US", "INDIA")
    pub id: MarketId,

    /// Display name (e.g., "Indian Stock Market")
    pub name: String,

    /// Trading currency for the market's tickers
    #[serde(default = "default_currency")]
    pub currency: Currency,

    /// Exchange suffix carried by provider symbols (e.g., ".NS"), empty if none
    #[serde(default, alias = "symbol_suffix")]
    pub suffix: String,

    /// Popular tickers offered as quick picks, in display order
    #[serde(default, alias = "symbols")]
    pub suggested: Vec<String>,
}

fn default_currency() -> Currency {
    "USD".to_string()
}

impl Market {
    /// Create a market with no suffix and no suggestions.
    pub fn new(id: impl Into<String>, name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            currency: currency.into(),
            suffix: String::new(),
            suggested: Vec::new(),
        }
    }

    /// Set the exchange suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set the suggested tickers.
    pub fn with_suggested<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggested = symbols.into_iter().map(Into::into).collect();
        self
    }
}

/// Markets known without asking the API.
///
/// Used when the catalog endpoint is unreachable so that ticker entry
/// never blocks on it.
pub fn default_markets() -> Vec<Market> {
    vec![
        Market::new("US", "US Stock Market", "USD").with_suggested([
            "AAPL", "MSFT", "GOOGL", "TSLA", "AMZN", "NVDA", "META", "JPM", "JNJ", "V",
        ]),
        Market::new("INDIA", "Indian Stock Market", "INR")
            .with_suffix(".NS")
            .with_suggested([
                "RELIANCE.NS",
                "TCS.NS",
                "HDFCBANK.NS",
                "INFY.NS",
                "ICICIBANK.NS",
                "HINDUNILVR.NS",
                "SBIN.NS",
                "BHARTIARTL.NS",
                "ITC.NS",
                "KOTAKBANK.NS",
            ]),
        Market::new("CRYPTO", "Cryptocurrency", "USD")
            .with_suffix("-USD")
            .with_suggested([
                "BTC-USD", "ETH-USD", "BNB-USD", "ADA-USD", "XRP-USD", "SOL-USD", "DOT-USD",
                "DOGE-USD", "AVAX-USD", "MATIC-USD",
            ]),
    ]
}

/// One element of the suggested-tickers payload.
///
/// The endpoint returns either bare symbols or ticker records.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TickerEntry {
    Symbol(String),
    Record { symbol: String },
}

impl TickerEntry {
    pub(crate) fn into_symbol(self) -> String {
        match self {
            Self::Symbol(symbol) | Self::Record { symbol } => symbol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_decodes_catalog_shape() {
        let json = r#"{"id": "in_stock", "name": "Indian Stock Market", "symbols": ["TCS", "INFY"]}"#;
        let market: Market = serde_json::from_str(json).unwrap();

        assert_eq!(market.id, "in_stock");
        assert_eq!(market.currency, "USD");
        assert_eq!(market.suffix, "");
        assert_eq!(market.suggested, vec!["TCS", "INFY"]);
    }

    #[test]
    fn test_market_accepts_config_suffix_key() {
        let json = r#"{"id": "INDIA", "name": "Indian Stock Market", "currency": "INR", "symbol_suffix": ".NS"}"#;
        let market: Market = serde_json::from_str(json).unwrap();

        assert_eq!(market.currency, "INR");
        assert_eq!(market.suffix, ".NS");
        assert!(market.suggested.is_empty());
    }

    #[test]
    fn test_default_markets() {
        let markets = default_markets();
        let ids: Vec<&str> = markets.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["US", "INDIA", "CRYPTO"]);

        let india = &markets[1];
        assert_eq!(india.currency, "INR");
        assert_eq!(india.suffix, ".NS");
        assert_eq!(india.suggested.first().map(String::as_str), Some("RELIANCE.NS"));
    }

    #[test]
    fn test_ticker_entry_accepts_both_shapes() {
        let json = r#"["AAPL", {"symbol": "MSFT", "name": "Microsoft", "price": 410.5}]"#;
        let entries: Vec<TickerEntry> = serde_json::from_str(json).unwrap();
        let symbols: Vec<String> = entries.into_iter().map(TickerEntry::into_symbol).collect();

        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }
}
