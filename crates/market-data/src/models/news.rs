use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::dates::deserialize_timestamp;

/// Scores beyond +/- this threshold are considered positive/negative.
pub const SENTIMENT_THRESHOLD: f64 = 0.3;

/// A news article about a ticker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Unique id (`_id` when it comes straight from the document store)
    #[serde(alias = "_id")]
    pub id: String,

    pub headline: String,

    #[serde(default)]
    pub summary: String,

    /// Publisher name
    #[serde(default)]
    pub source: String,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub published_at: DateTime<Utc>,

    /// Link to the full article
    #[serde(default)]
    pub url: String,

    /// Sentiment in [-1, 1]; absent when not computed for this item
    #[serde(
        default,
        deserialize_with = "deserialize_sentiment",
        skip_serializing_if = "Option::is_none"
    )]
    pub sentiment_score: Option<f64>,
}

impl NewsItem {
    pub fn sentiment(&self) -> Option<Sentiment> {
        self.sentiment_score.map(Sentiment::from_score)
    }
}

fn deserialize_sentiment<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let score = Option::<f64>::deserialize(deserializer)?;
    Ok(score
        .filter(|s| s.is_finite())
        .map(|s| s.clamp(-1.0, 1.0)))
}

/// Sentiment classification for a news item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn from_score(score: f64) -> Self {
        if score > SENTIMENT_THRESHOLD {
            Self::Positive
        } else if score < -SENTIMENT_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}
