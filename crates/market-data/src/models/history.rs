use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

use super::dates::deserialize_date;

/// Daily closing price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    /// Trading day; timestamps on the wire are truncated to their date
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,

    /// Closing price, never negative
    #[serde(deserialize_with = "deserialize_close")]
    pub close: f64,
}

fn deserialize_close<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let close = f64::deserialize(deserializer)?;
    if close.is_finite() && close >= 0.0 {
        Ok(close)
    } else {
        Err(de::Error::custom(format!("invalid closing price: {close}")))
    }
}

impl HistoricalPoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}
