//! Normalization of raw OHLCV tables into clean price series.
//!
//! Source files disagree on column naming (`Date` vs `timestamp`, `Close`
//! vs `Adj Close` vs `adj_close`) and date formatting. Normalization detects
//! the date and price columns, parses dates across the observed formats, and
//! hands the raw pairs to [`PriceSeries::from_raw_points`] for sorting,
//! deduplication, and window clipping.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::error::{DataError, Result};
use crate::series::{DateWindow, MarketScope, PriceSeries};

/// Date-like column names, highest priority first (case-insensitive).
const DATE_COLUMNS: &[&str] = &["date", "timestamp", "datetime"];

/// Adjusted-close spellings, matched after stripping non-alphanumerics.
/// Preferred over plain close because they fold in splits and dividends.
const ADJUSTED_CLOSE: &[&str] = &["adjclose", "adjustedclose"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn canonical(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Parse a raw date cell, trying date formats before datetime formats.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    None
}

fn find_date_column(df: &DataFrame) -> Option<String> {
    for wanted in DATE_COLUMNS {
        if let Some(name) = df
            .get_column_names()
            .iter()
            .find(|name| name.eq_ignore_ascii_case(wanted))
        {
            return Some(name.to_string());
        }
    }
    None
}

fn find_price_column(df: &DataFrame) -> Option<String> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    for name in &names {
        if ADJUSTED_CLOSE.contains(&canonical(name).as_str()) {
            return Some(name.clone());
        }
    }
    names.iter().find(|name| canonical(name) == "close").cloned()
}

/// Normalize a raw loaded table into a [`PriceSeries`].
///
/// Selects the price column by priority (adjusted close before plain close),
/// detects the date column case-insensitively (falling back to the leftmost
/// column, which some exporters write unnamed), drops rows whose date cannot
/// be parsed or whose price is missing, and clips to `window` when given.
///
/// Returns [`DataError::NoPriceColumn`] when neither an adjusted-close nor a
/// close column is present; callers treat this as a soft per-asset failure.
pub fn normalize_prices(
    df: &DataFrame,
    symbol: &str,
    scope: MarketScope,
    window: Option<DateWindow>,
) -> Result<PriceSeries> {
    let Some(price_name) = find_price_column(df) else {
        return Err(DataError::NoPriceColumn {
            symbol: symbol.to_owned(),
            reason: format!("available columns: {:?}", df.get_column_names()),
        });
    };
    let date_name = find_date_column(df).unwrap_or_else(|| {
        // No date-named column: assume the leftmost column carries dates.
        df.get_column_names()
            .first()
            .map(|name| name.to_string())
            .unwrap_or_default()
    });

    let date_col = df.column(&date_name)?.cast(&DataType::String)?;
    let dates = date_col.str()?;
    let price_col = df.column(&price_name)?.cast(&DataType::Float64)?;
    let prices = price_col.f64()?;

    let mut points = Vec::with_capacity(df.height());
    let mut dropped = 0usize;
    for (raw_date, price) in dates.into_iter().zip(prices) {
        let (Some(raw_date), Some(price)) = (raw_date, price) else {
            dropped += 1;
            continue;
        };
        match parse_date(raw_date) {
            Some(date) => points.push((date, price)),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        log::debug!("{symbol}: dropped {dropped} rows with unparseable dates or missing prices");
    }

    Ok(PriceSeries::from_raw_points(symbol, scope, points, window))
}
