//! Performance and risk metrics derived from return and equity series.
//!
//! All percentage formulas use a fixed 252 trading-day year and a fixed 2%
//! annual risk-free rate. Rounding to 2 decimals happens at the result
//! boundary in [`crate::simulator`], not here.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::result::YearlyReturn;

/// Trading days per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Annual risk-free rate used in the Sharpe ratio.
pub const RISK_FREE_RATE: f64 = 0.02;

/// Round to 2 decimals for the result boundary.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Total return as a ratio: `final / initial - 1`.
pub fn total_return(final_equity: f64, initial_capital: f64) -> f64 {
    if initial_capital.abs() > 1e-10 {
        final_equity / initial_capital - 1.0
    } else {
        0.0
    }
}

/// Compound annual growth rate in percent, from the total-return ratio and
/// the number of return periods. Zero when no time has elapsed.
pub fn cagr(total_return: f64, n_periods: usize) -> f64 {
    let years = n_periods as f64 / TRADING_DAYS_PER_YEAR as f64;
    if years <= 0.0 {
        return 0.0;
    }
    ((1.0 + total_return).powf(1.0 / years) - 1.0) * 100.0
}

/// Annualized volatility of periodic returns in percent (sample stdev).
pub fn annualized_volatility(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt() * (TRADING_DAYS_PER_YEAR as f64).sqrt() * 100.0
}

/// Sharpe ratio over [`RISK_FREE_RATE`], from percent-term CAGR and
/// volatility. Zero when volatility is zero.
pub fn sharpe_ratio(cagr_pct: f64, volatility_pct: f64) -> f64 {
    if volatility_pct.abs() < 1e-10 {
        return 0.0;
    }
    (cagr_pct / 100.0 - RISK_FREE_RATE) / (volatility_pct / 100.0)
}

/// Maximum drawdown in percent: the most negative peak-to-trough decline.
/// Zero for a monotonically non-decreasing equity series.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut worst = 0.0_f64;
    for &value in equity {
        if value > peak {
            peak = value;
        }
        if peak.abs() > 1e-10 {
            let drawdown = (value - peak) / peak;
            if drawdown < worst {
                worst = drawdown;
            }
        }
    }
    worst * 100.0
}

/// Compounded return per calendar year present in the return series, in
/// percent, keyed ascending by year.
pub fn yearly_returns(dates: &[NaiveDate], returns: &[f64]) -> Vec<YearlyReturn> {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for (date, r) in dates.iter().zip(returns) {
        let growth = by_year.entry(date.year()).or_insert(1.0);
        *growth *= 1.0 + r;
    }
    by_year
        .into_iter()
        .map(|(year, growth)| YearlyReturn {
            year,
            return_pct: (growth - 1.0) * 100.0,
        })
        .collect()
}

/// Best and worst entries of a yearly-return table by value.
pub fn best_worst_year(yearly: &[YearlyReturn]) -> (Option<YearlyReturn>, Option<YearlyReturn>) {
    let best = yearly
        .iter()
        .max_by(|a, b| {
            a.return_pct
                .partial_cmp(&b.return_pct)
                .unwrap_or(Ordering::Equal)
        })
        .copied();
    let worst = yearly
        .iter()
        .min_by(|a, b| {
            a.return_pct
                .partial_cmp(&b.return_pct)
                .unwrap_or(Ordering::Equal)
        })
        .copied();
    (best, worst)
}

/// Data-quality score: how much of the theoretically expected history
/// (252 rows per horizon year) was usable after alignment, capped at 100.
pub fn data_quality_score(aligned_rows: usize, horizon_years: u32) -> u8 {
    let expected = horizon_years as usize * TRADING_DAYS_PER_YEAR;
    if expected == 0 {
        return 0;
    }
    ((100 * aligned_rows / expected).min(100)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_total_return() {
        assert_abs_diff_eq!(total_return(11_000.0, 10_000.0), 0.10, epsilon = 1e-10);
        assert_abs_diff_eq!(total_return(9_000.0, 10_000.0), -0.10, epsilon = 1e-10);
        assert_eq!(total_return(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_cagr_one_year() {
        // 252 periods is exactly one year, so CAGR equals total return.
        assert_abs_diff_eq!(cagr(0.10, 252), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cagr_two_years() {
        // 21% over two years compounds to 10% per year.
        assert_abs_diff_eq!(cagr(0.21, 504), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cagr_no_elapsed_time() {
        assert_eq!(cagr(0.10, 0), 0.0);
    }

    #[test]
    fn test_cagr_total_loss() {
        assert_abs_diff_eq!(cagr(-1.0, 252), -100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_volatility_constant_returns() {
        assert_abs_diff_eq!(
            annualized_volatility(&[0.01, 0.01, 0.01]),
            0.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_volatility_known_series() {
        // stdev of [0.01, -0.01, 0.01, -0.01] is sqrt(4e-4/3).
        let vol = annualized_volatility(&[0.01, -0.01, 0.01, -0.01]);
        let expected = (0.0004_f64 / 3.0).sqrt() * (252.0_f64).sqrt() * 100.0;
        assert_abs_diff_eq!(vol, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_volatility_degenerate_inputs() {
        assert_eq!(annualized_volatility(&[]), 0.0);
        assert_eq!(annualized_volatility(&[0.05]), 0.0);
    }

    #[test]
    fn test_sharpe_ratio() {
        // (10% - 2%) / 16% = 0.5
        assert_abs_diff_eq!(sharpe_ratio(10.0, 16.0), 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_sharpe_zero_volatility() {
        assert_eq!(sharpe_ratio(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_max_drawdown_monotonic_is_zero() {
        assert_eq!(max_drawdown(&[100.0, 110.0, 110.0, 125.0]), 0.0);
    }

    #[test]
    fn test_max_drawdown_known_series() {
        // Peak 120, trough 60: a 50% drawdown.
        assert_abs_diff_eq!(
            max_drawdown(&[100.0, 120.0, 60.0, 90.0]),
            -50.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_max_drawdown_empty() {
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn test_yearly_returns_compound_within_year() {
        let dates = vec![date(2023, 3, 1), date(2023, 9, 1), date(2024, 2, 1)];
        let returns = vec![0.10, 0.10, -0.05];
        let yearly = yearly_returns(&dates, &returns);
        assert_eq!(yearly.len(), 2);
        assert_eq!(yearly[0].year, 2023);
        assert_abs_diff_eq!(yearly[0].return_pct, 21.0, epsilon = 1e-9);
        assert_eq!(yearly[1].year, 2024);
        assert_abs_diff_eq!(yearly[1].return_pct, -5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_best_worst_year() {
        let yearly = vec![
            YearlyReturn {
                year: 2022,
                return_pct: -12.0,
            },
            YearlyReturn {
                year: 2023,
                return_pct: 21.0,
            },
            YearlyReturn {
                year: 2024,
                return_pct: 3.5,
            },
        ];
        let (best, worst) = best_worst_year(&yearly);
        assert_eq!(best.map(|y| y.year), Some(2023));
        assert_eq!(worst.map(|y| y.year), Some(2022));
    }

    #[test]
    fn test_best_worst_year_empty() {
        let (best, worst) = best_worst_year(&[]);
        assert_eq!(best, None);
        assert_eq!(worst, None);
    }

    #[test]
    fn test_data_quality_score() {
        assert_eq!(data_quality_score(252, 1), 100);
        assert_eq!(data_quality_score(126, 1), 50);
        assert_eq!(data_quality_score(600, 1), 100);
        assert_eq!(data_quality_score(100, 1), 39);
        assert_eq!(data_quality_score(1000, 5), 79);
        assert_eq!(data_quality_score(0, 10), 0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(7.125), 7.13);
        assert_eq!(round2(-2.666), -2.67);
    }
}
