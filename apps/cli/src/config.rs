use std::time::Duration;

pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub default_market: String,
    pub default_ticker: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = lookup("TT_API_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "http://localhost:8000".into());
        let timeout_ms: u64 = lookup("TT_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| "30000".into())
            .parse()
            .unwrap_or(30000);
        let default_market = lookup("TT_DEFAULT_MARKET")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "US".into());
        let default_ticker = lookup("TT_DEFAULT_TICKER")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "AAPL".into());
        Self {
            api_base_url,
            request_timeout: Duration::from_millis(timeout_ms),
            default_market,
            default_ticker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.default_market, "US");
        assert_eq!(config.default_ticker, "AAPL");
    }

    #[test]
    fn test_overrides_and_bad_timeout() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("TT_API_BASE_URL", "https://api.tickertracker.test"),
            ("TT_REQUEST_TIMEOUT_MS", "soon"),
            ("TT_DEFAULT_MARKET", "CRYPTO"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_base_url, "https://api.tickertracker.test");
        assert_eq!(config.request_timeout, Duration::from_millis(30000));
        assert_eq!(config.default_market, "CRYPTO");
    }

    #[test]
    fn test_blank_selection_uses_defaults() {
        let config = Config::from_lookup(|key| match key {
            "TT_DEFAULT_MARKET" | "TT_DEFAULT_TICKER" => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(config.default_market, "US");
        assert_eq!(config.default_ticker, "AAPL");
    }
}
