//! Tab selection. Switching tabs never fetches and never touches the cache.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tickertracker_market_data::DataKind;

use crate::errors::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Overview,
    News,
    Insights,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::News, Tab::Insights];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::News => "news",
            Tab::Insights => "insights",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::News => "News & Sentiment",
            Tab::Insights => "AI Insights",
        }
    }

    /// The data kind rendered by this tab.
    pub fn kind(&self) -> DataKind {
        match self {
            Tab::Overview => DataKind::Overview,
            Tab::News => DataKind::News,
            Tab::Insights => DataKind::Insights,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(Tab::Overview),
            "news" => Ok(Tab::News),
            "insights" => Ok(Tab::Insights),
            other => Err(Error::UnknownTab(other.to_string())),
        }
    }
}

/// Tracks the visible tab.
#[derive(Clone, Debug, Default)]
pub struct TabController {
    active: Tab,
}

impl TabController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    /// Returns whether the active tab changed.
    pub fn select(&mut self, tab: Tab) -> bool {
        let changed = self.active != tab;
        self.active = tab;
        changed
    }
}
