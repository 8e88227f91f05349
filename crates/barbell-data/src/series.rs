//! Core series types: market scopes, date windows, and normalized price series.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// Market scope a series belongs to, selecting the store partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketScope {
    /// US and European listings.
    #[serde(rename = "US_EU")]
    UsEu,
    /// African listings.
    #[serde(rename = "AFRICA")]
    Africa,
}

impl MarketScope {
    /// Canonical wire name of the scope.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UsEu => "US_EU",
            Self::Africa => "AFRICA",
        }
    }

    /// Store subdirectory name for this scope.
    pub const fn dir_name(&self) -> &'static str {
        match self {
            Self::UsEu => "us_eu",
            Self::Africa => "africa",
        }
    }
}

impl fmt::Display for MarketScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "US_EU" => Ok(Self::UsEu),
            "AFRICA" => Ok(Self::Africa),
            other => Err(format!("unknown market scope: {other}")),
        }
    }
}

/// Inclusive date window used to clip series to a simulation horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First date included in the window.
    pub start: NaiveDate,
    /// Last date included in the window.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DataError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering the `years` calendar years (365-day convention)
    /// ending at `end`.
    pub fn trailing_years(end: NaiveDate, years: u32) -> Self {
        let start = end - chrono::Duration::days(i64::from(years) * 365);
        Self { start, end }
    }

    /// Whether `date` falls inside the window (inclusive on both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days spanned by the window.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// One observation in a price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Price on that date, positive and finite.
    pub price: f64,
}

/// A normalized price series for one asset: dates strictly increasing and
/// unique, every price positive and finite.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    /// Asset identifier the series was loaded for.
    pub symbol: String,
    /// Store partition the series came from.
    pub scope: MarketScope,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from raw (date, price) pairs.
    ///
    /// Rows with non-finite or non-positive prices are dropped, rows outside
    /// `window` are clipped, rows are sorted ascending by date, and duplicate
    /// dates keep the last occurrence in input order.
    pub fn from_raw_points(
        symbol: impl Into<String>,
        scope: MarketScope,
        mut points: Vec<(NaiveDate, f64)>,
        window: Option<DateWindow>,
    ) -> Self {
        points.retain(|(_, price)| price.is_finite() && *price > 0.0);
        if let Some(window) = window {
            points.retain(|(date, _)| window.contains(*date));
        }
        // Stable sort keeps input order among equal dates, so keep-last
        // dedup below keeps the last occurrence from the source file.
        points.sort_by_key(|(date, _)| *date);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for (date, price) in points {
            match deduped.last_mut() {
                Some(last) if last.date == date => last.price = price,
                _ => deduped.push(PricePoint { date, price }),
            }
        }

        Self {
            symbol: symbol.into(),
            scope,
            points: deduped,
        }
    }

    /// Observations in ascending date order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Date of the first observation, if any.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Date of the last observation, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Price on `date`, if the series has an observation for it.
    pub fn price_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| self.points[idx].price)
    }
}
