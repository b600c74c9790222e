use crate::models::Market;

/// Exchange suffixes stripped even when a market does not declare one.
///
/// Whitelist only: share classes like BRK.B or RDS.A keep their dot.
pub const KNOWN_EXCHANGE_SUFFIXES: &[&str] = &[".NS", ".BO", "-USD"];

/// Extract the bare ticker from a provider symbol using the known suffixes.
pub fn strip_exchange_suffix(symbol: &str) -> &str {
    for suffix in KNOWN_EXCHANGE_SUFFIXES {
        if let Some(stripped) = symbol.strip_suffix(suffix) {
            if !stripped.is_empty() {
                return stripped;
            }
        }
    }

    // No known suffix found - return as-is (preserves BRK.B, RDS.A, etc.)
    symbol
}

/// Canonical display form of a symbol within a market.
///
/// Trims and upper-cases the symbol, then removes the market's own suffix if
/// it carries one, else any whitelisted exchange suffix.
pub fn normalize_display_symbol(raw: &str, market: &Market) -> String {
    let symbol = raw.trim().to_uppercase();
    let market_suffix = market.suffix.trim().to_uppercase();

    if !market_suffix.is_empty() {
        if let Some(stripped) = symbol.strip_suffix(market_suffix.as_str()) {
            if !stripped.is_empty() {
                return stripped.to_string();
            }
        }
    }

    strip_exchange_suffix(&symbol).to_string()
}
