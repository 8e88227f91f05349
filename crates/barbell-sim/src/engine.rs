//! Return and equity computation over aligned price series.
//!
//! Survivor series are aligned by strict intersection: only dates where
//! every asset has a price are kept, with no forward-fill or interpolation.
//! Portfolio returns apply the normalized weights identically every period;
//! the rebalance-date mask for the configured frequency is derived for the
//! result metadata but does not alter the weighting.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use ndarray::{Array1, Array2};

use crate::composition::ValidAsset;
use crate::metrics::{TRADING_DAYS_PER_YEAR, round2};
use crate::request::RebalanceFrequency;
use crate::result::EquityPoint;

/// Minimum aligned rows for a simulation to proceed (one trading year).
pub const MIN_ALIGNED_ROWS: usize = TRADING_DAYS_PER_YEAR;

/// Price matrix aligned on the dates every survivor has: one row per date,
/// one column per asset in survivor (symbol-sorted) order.
#[derive(Debug, Clone)]
pub struct AlignedPrices {
    /// Common dates, ascending.
    pub dates: Vec<NaiveDate>,
    /// Prices, `dates.len()` rows by `symbols.len()` columns.
    pub prices: Array2<f64>,
    /// Column order.
    pub symbols: Vec<String>,
}

impl AlignedPrices {
    /// Number of aligned rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether no dates survived the intersection.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Align survivor series on their common dates (strict intersection).
pub fn align_series(assets: &[ValidAsset]) -> AlignedPrices {
    let Some(first) = assets.first() else {
        return AlignedPrices {
            dates: Vec::new(),
            prices: Array2::zeros((0, 0)),
            symbols: Vec::new(),
        };
    };

    let mut common: Vec<NaiveDate> = first.series.points().iter().map(|p| p.date).collect();
    for asset in &assets[1..] {
        let dates: HashSet<NaiveDate> = asset.series.points().iter().map(|p| p.date).collect();
        common.retain(|date| dates.contains(date));
    }

    let mut prices = Array2::zeros((common.len(), assets.len()));
    for (col, asset) in assets.iter().enumerate() {
        let by_date: HashMap<NaiveDate, f64> = asset
            .series
            .points()
            .iter()
            .map(|p| (p.date, p.price))
            .collect();
        for (row, date) in common.iter().enumerate() {
            if let Some(price) = by_date.get(date) {
                prices[[row, col]] = *price;
            }
        }
    }

    AlignedPrices {
        dates: common,
        prices,
        symbols: assets
            .iter()
            .map(|asset| asset.entry.symbol.clone())
            .collect(),
    }
}

/// Row-over-row simple returns per asset column. One fewer row than the
/// price matrix; empty when fewer than two price rows exist.
pub fn compute_returns(prices: &Array2<f64>) -> Array2<f64> {
    let (rows, cols) = prices.dim();
    if rows < 2 {
        return Array2::zeros((0, cols));
    }
    let mut returns = Array2::zeros((rows - 1, cols));
    for row in 1..rows {
        for col in 0..cols {
            let prev = prices[[row - 1, col]];
            if prev.abs() > 1e-10 {
                returns[[row - 1, col]] = prices[[row, col]] / prev - 1.0;
            }
        }
    }
    returns
}

/// Static-weighted portfolio return per period: the weighted sum across
/// assets, with the same weights every period.
pub fn portfolio_returns(asset_returns: &Array2<f64>, weights: &[f64]) -> Vec<f64> {
    let weights = Array1::from(weights.to_vec());
    asset_returns.dot(&weights).to_vec()
}

/// Equity curve from portfolio returns, anchored at `initial_capital`:
/// `equity[t] = initial_capital * prod(1 + r[0..=t])`. The first element
/// corresponds to the first return period.
pub fn equity_curve(portfolio_returns: &[f64], initial_capital: f64) -> Vec<f64> {
    let mut equity = Vec::with_capacity(portfolio_returns.len());
    let mut value = initial_capital;
    for r in portfolio_returns {
        value *= 1.0 + r;
        equity.push(value);
    }
    equity
}

/// Conceptual rebalance dates: the first aligned date of each new period
/// at the configured frequency. The opening date is not a rebalance.
pub fn rebalance_dates(dates: &[NaiveDate], frequency: RebalanceFrequency) -> Vec<NaiveDate> {
    let key = |date: NaiveDate| -> (i32, u32) {
        match frequency {
            RebalanceFrequency::Monthly => (date.year(), date.month()),
            RebalanceFrequency::Quarterly => (date.year(), (date.month() - 1) / 3),
            RebalanceFrequency::Yearly => (date.year(), 0),
        }
    };
    dates
        .windows(2)
        .filter(|pair| key(pair[0]) != key(pair[1]))
        .map(|pair| pair[1])
        .collect()
}

/// Monthly equity curve: the last value of each calendar month, rounded to
/// 2 decimals. `dates` and `equity` run in lockstep.
pub fn monthly_equity(dates: &[NaiveDate], equity: &[f64]) -> Vec<EquityPoint> {
    let mut curve: Vec<EquityPoint> = Vec::new();
    for (date, value) in dates.iter().zip(equity) {
        let point = EquityPoint {
            date: *date,
            value: round2(*value),
        };
        match curve.last_mut() {
            Some(last)
                if (last.date.year(), last.date.month()) == (date.year(), date.month()) =>
            {
                *last = point;
            }
            _ => curve.push(point),
        }
    }
    curve
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::CompositionEntry;
    use approx::assert_abs_diff_eq;
    use barbell_data::{MarketScope, PriceSeries};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn asset(symbol: &str, points: Vec<(NaiveDate, f64)>) -> ValidAsset {
        let mut entry = CompositionEntry::new(symbol, 0.5);
        entry.normalized_weight = Some(0.5);
        ValidAsset {
            entry,
            series: PriceSeries::from_raw_points(symbol, MarketScope::UsEu, points, None),
        }
    }

    #[test]
    fn test_align_strict_intersection() {
        let a = asset(
            "A",
            vec![
                (date(2024, 1, 1), 100.0),
                (date(2024, 1, 2), 101.0),
                (date(2024, 1, 3), 102.0),
            ],
        );
        // B is missing Jan 2: that date must drop for the whole portfolio.
        let b = asset(
            "B",
            vec![(date(2024, 1, 1), 50.0), (date(2024, 1, 3), 51.0)],
        );

        let aligned = align_series(&[a, b]);
        assert_eq!(aligned.dates, vec![date(2024, 1, 1), date(2024, 1, 3)]);
        assert_eq!(aligned.prices.dim(), (2, 2));
        assert_eq!(aligned.prices[[0, 0]], 100.0);
        assert_eq!(aligned.prices[[1, 0]], 102.0);
        assert_eq!(aligned.prices[[0, 1]], 50.0);
        assert_eq!(aligned.prices[[1, 1]], 51.0);
        assert_eq!(aligned.symbols, vec!["A", "B"]);
    }

    #[test]
    fn test_align_no_overlap() {
        let a = asset("A", vec![(date(2024, 1, 1), 100.0)]);
        let b = asset("B", vec![(date(2024, 6, 1), 50.0)]);
        let aligned = align_series(&[a, b]);
        assert!(aligned.is_empty());
    }

    #[test]
    fn test_align_empty_input() {
        let aligned = align_series(&[]);
        assert!(aligned.is_empty());
        assert_eq!(aligned.prices.dim(), (0, 0));
    }

    #[test]
    fn test_compute_returns() {
        let prices = Array2::from_shape_vec((3, 1), vec![100.0, 110.0, 99.0]).unwrap();
        let returns = compute_returns(&prices);
        assert_eq!(returns.dim(), (2, 1));
        assert_abs_diff_eq!(returns[[0, 0]], 0.10, epsilon = 1e-10);
        assert_abs_diff_eq!(returns[[1, 0]], -0.10, epsilon = 1e-10);
    }

    #[test]
    fn test_compute_returns_too_short() {
        let prices = Array2::from_shape_vec((1, 2), vec![100.0, 50.0]).unwrap();
        assert_eq!(compute_returns(&prices).dim(), (0, 2));
    }

    #[test]
    fn test_portfolio_returns_weighted_sum() {
        let returns = Array2::from_shape_vec((2, 2), vec![0.10, 0.0, 0.0, 0.20]).unwrap();
        let port = portfolio_returns(&returns, &[0.5, 0.5]);
        assert_abs_diff_eq!(port[0], 0.05, epsilon = 1e-10);
        assert_abs_diff_eq!(port[1], 0.10, epsilon = 1e-10);
    }

    #[test]
    fn test_equity_curve_anchoring() {
        let equity = equity_curve(&[0.10, -0.5], 1000.0);
        assert_abs_diff_eq!(equity[0], 1100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(equity[1], 550.0, epsilon = 1e-9);
    }

    #[test]
    fn test_equity_curve_empty_returns() {
        assert!(equity_curve(&[], 1000.0).is_empty());
    }

    #[test]
    fn test_rebalance_dates_monthly() {
        let dates = vec![
            date(2024, 1, 30),
            date(2024, 1, 31),
            date(2024, 2, 1),
            date(2024, 2, 2),
            date(2024, 3, 1),
        ];
        let rebal = rebalance_dates(&dates, RebalanceFrequency::Monthly);
        assert_eq!(rebal, vec![date(2024, 2, 1), date(2024, 3, 1)]);
    }

    #[test]
    fn test_rebalance_dates_quarterly() {
        let dates = vec![
            date(2024, 2, 1),
            date(2024, 3, 29),
            date(2024, 4, 1),
            date(2024, 6, 28),
            date(2024, 7, 1),
        ];
        let rebal = rebalance_dates(&dates, RebalanceFrequency::Quarterly);
        assert_eq!(rebal, vec![date(2024, 4, 1), date(2024, 7, 1)]);
    }

    #[test]
    fn test_rebalance_dates_yearly() {
        let dates = vec![
            date(2023, 6, 1),
            date(2023, 12, 29),
            date(2024, 1, 2),
            date(2024, 12, 31),
        ];
        let rebal = rebalance_dates(&dates, RebalanceFrequency::Yearly);
        assert_eq!(rebal, vec![date(2024, 1, 2)]);
    }

    #[test]
    fn test_monthly_equity_keeps_last_value_per_month() {
        let dates = vec![
            date(2024, 1, 15),
            date(2024, 1, 31),
            date(2024, 2, 14),
            date(2024, 2, 29),
        ];
        let equity = vec![10_050.123, 10_100.456, 10_000.0, 10_200.789];
        let curve = monthly_equity(&dates, &equity);
        assert_eq!(curve.len(), 2);
        assert_eq!(curve[0].date, date(2024, 1, 31));
        assert_eq!(curve[0].value, 10_100.46);
        assert_eq!(curve[1].date, date(2024, 2, 29));
        assert_eq!(curve[1].value, 10_200.79);
    }
}
