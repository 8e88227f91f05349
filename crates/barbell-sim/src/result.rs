//! Simulation result model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Hard-failure message when no composition entry survives resolution.
pub const ERR_NO_VALID_ASSETS: &str = "No valid assets with sufficient history";

/// Hard-failure message when the survivors' aligned history is too short.
pub const ERR_INSUFFICIENT_OVERLAP: &str = "Insufficient overlapping data between assets";

/// One point of the reported monthly equity curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// Last trading date of the month.
    pub date: NaiveDate,
    /// Portfolio value on that date, rounded to 2 decimals.
    pub value: f64,
}

/// Compounded return for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyReturn {
    /// Calendar year.
    pub year: i32,
    /// Compounded return over that year's periods, in percent.
    pub return_pct: f64,
}

/// An entry excluded during composition resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedAsset {
    /// Symbol of the excluded entry.
    pub symbol: String,
    /// Why it was excluded.
    pub reason: String,
}

/// Performance and risk metrics, rounded to 2 decimals at this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Compound annual growth rate, percent.
    pub cagr_pct: f64,
    /// Annualized volatility of periodic returns, percent.
    pub volatility_pct: f64,
    /// Sharpe ratio over a 2% annual risk-free rate.
    pub sharpe: f64,
    /// Worst peak-to-trough decline, percent (non-positive).
    pub max_drawdown_pct: f64,
    /// Total return over the simulated window, percent.
    pub total_return_pct: f64,
    /// Final portfolio value.
    pub final_value: f64,
}

/// The immutable output of one simulation run.
///
/// Either `metrics` is populated and `error` is `None`, or the run failed
/// hard: `metrics` is `None`, `error` describes why, and the curve and
/// yearly table are empty. Soft per-asset problems appear in `warnings`
/// and `excluded_assets` in both states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Performance metrics; absent in the error state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    /// Monthly equity curve (last value per month); empty in the error state.
    pub equity_curve: Vec<EquityPoint>,
    /// Compounded per-calendar-year returns.
    pub yearly_returns: Vec<YearlyReturn>,
    /// Year with the highest compounded return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_year: Option<YearlyReturn>,
    /// Year with the lowest compounded return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worst_year: Option<YearlyReturn>,
    /// Warnings accumulated during the run, in deterministic order.
    pub warnings: Vec<String>,
    /// Hard-failure message when the run could not produce metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// How much of the requested window was usable after alignment, 0 to 100.
    pub data_quality_score: u8,
    /// Entries that participated in the simulation.
    pub assets_included: usize,
    /// Entries excluded during composition resolution.
    pub assets_excluded: usize,
    /// Excluded entries with reasons.
    pub excluded_assets: Vec<ExcludedAsset>,
    /// Conceptual rebalance dates for the configured frequency. Recorded
    /// for callers; weights are applied every period regardless.
    pub rebalance_dates: Vec<NaiveDate>,
    /// Stable content hash of the request, for caller-side caching.
    pub fingerprint: String,
    /// When the simulation was run.
    pub generated_at: DateTime<Utc>,
}

impl SimulationResult {
    /// Build an error-state result: no metrics, empty curve, a diagnostic
    /// data-quality score.
    pub fn failure(
        error: impl Into<String>,
        warnings: Vec<String>,
        excluded_assets: Vec<ExcludedAsset>,
        assets_included: usize,
        data_quality_score: u8,
        fingerprint: String,
    ) -> Self {
        Self {
            metrics: None,
            equity_curve: Vec::new(),
            yearly_returns: Vec::new(),
            best_year: None,
            worst_year: None,
            warnings,
            error: Some(error.into()),
            data_quality_score,
            assets_included,
            assets_excluded: excluded_assets.len(),
            excluded_assets,
            rebalance_dates: Vec::new(),
            fingerprint,
            generated_at: Utc::now(),
        }
    }

    /// Whether the run failed hard.
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_state() {
        let result = SimulationResult::failure(
            ERR_NO_VALID_ASSETS,
            vec!["AAPL excluded: 0 days of history (minimum 50 required)".to_owned()],
            vec![ExcludedAsset {
                symbol: "AAPL".to_owned(),
                reason: "0 days of history (minimum 50 required)".to_owned(),
            }],
            0,
            0,
            "abc123".to_owned(),
        );
        assert!(result.is_error());
        assert_eq!(result.metrics, None);
        assert_eq!(result.assets_included, 0);
        assert_eq!(result.assets_excluded, 1);
        assert!(result.equity_curve.is_empty());
        assert_eq!(result.error.as_deref(), Some(ERR_NO_VALID_ASSETS));
    }

    #[test]
    fn test_error_field_off_wire_when_absent() {
        let result = SimulationResult {
            metrics: Some(Metrics {
                cagr_pct: 7.5,
                volatility_pct: 12.0,
                sharpe: 0.46,
                max_drawdown_pct: -18.25,
                total_return_pct: 106.1,
                final_value: 20_610.0,
            }),
            equity_curve: vec![EquityPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                value: 10_100.0,
            }],
            yearly_returns: vec![YearlyReturn {
                year: 2024,
                return_pct: 7.5,
            }],
            best_year: None,
            worst_year: None,
            warnings: Vec::new(),
            error: None,
            data_quality_score: 100,
            assets_included: 2,
            assets_excluded: 0,
            excluded_assets: Vec::new(),
            rebalance_dates: Vec::new(),
            fingerprint: "abc123".to_owned(),
            generated_at: Utc::now(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("\"error\""));
        assert!(json.contains("\"cagr_pct\":7.5"));

        let back: SimulationResult = serde_json::from_str(&json).unwrap();
        assert!(!back.is_error());
        assert_eq!(back.metrics, result.metrics);
    }
}
