//! Display-symbol resolution.
//!
//! Markets hand out provider symbols with exchange suffixes (`TCS.NS`,
//! `BTC-USD`). The client selects and shows the bare ticker, so quick-pick
//! symbols go through [`normalize_display_symbol`] before they become part of
//! a selection.

mod exchange_suffixes;

pub use exchange_suffixes::{normalize_display_symbol, strip_exchange_suffix, KNOWN_EXCHANGE_SUFFIXES};
