//! Chart data preparation.
//!
//! Turns the raw history payload into a series a renderer can draw as is.
//! Missing or empty input is a first-class `NoData` state, not an error.
//! Points are only ordered; nothing is resampled, interpolated or filtered.

use chrono::{DateTime, Utc};
use tickertracker_market_data::HistoricalPoint;

/// One plotted point: midnight UTC of the trading day, closing price.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn first(&self) -> Option<&ChartPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&ChartPoint> {
        self.points.last()
    }

    pub fn min_price(&self) -> Option<f64> {
        self.points.iter().map(|p| p.price).reduce(f64::min)
    }

    pub fn max_price(&self) -> Option<f64> {
        self.points.iter().map(|p| p.price).reduce(f64::max)
    }

    /// Relative change from the first to the last point, in percent.
    pub fn change_percent(&self) -> Option<f64> {
        let (first, last) = (self.first()?, self.last()?);
        if first.price == 0.0 {
            return None;
        }
        Some((last.price - first.price) / first.price * 100.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChartData {
    NoData,
    Series(ChartSeries),
}

impl ChartData {
    pub fn series(&self) -> Option<&ChartSeries> {
        match self {
            ChartData::NoData => None,
            ChartData::Series(series) => Some(series),
        }
    }
}

/// Build the chart series for `ticker` from its price history.
pub fn prepare_series(ticker: &str, history: Option<&[HistoricalPoint]>) -> ChartData {
    let Some(history) = history.filter(|h| !h.is_empty()) else {
        return ChartData::NoData;
    };

    let mut ordered: Vec<&HistoricalPoint> = history.iter().collect();
    ordered.sort_by_key(|point| point.date);

    let points = ordered
        .into_iter()
        .map(|point| ChartPoint {
            timestamp: point.date.and_time(chrono::NaiveTime::MIN).and_utc(),
            price: point.close,
        })
        .collect();

    ChartData::Series(ChartSeries {
        label: format!("{} Price History", ticker),
        points,
    })
}
