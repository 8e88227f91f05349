//! The simulation engine facade.

use chrono::{NaiveDate, Utc};

use barbell_data::{DateWindow, SeriesStore};

use crate::composition::resolve_composition;
use crate::engine::{
    MIN_ALIGNED_ROWS, align_series, compute_returns, equity_curve, monthly_equity,
    portfolio_returns, rebalance_dates,
};
use crate::error::Result;
use crate::fingerprint::request_fingerprint;
use crate::metrics::{
    annualized_volatility, best_worst_year, cagr, data_quality_score, max_drawdown, round2,
    sharpe_ratio, total_return, yearly_returns,
};
use crate::request::SimulationRequest;
use crate::result::{
    ERR_INSUFFICIENT_OVERLAP, ERR_NO_VALID_ASSETS, Metrics, SimulationResult, YearlyReturn,
};

/// Portfolio simulation engine over a read-only series store.
///
/// Construct one per process or request context and pass it by reference;
/// it holds no mutable state, so `run` is a pure function of the request
/// and the store contents.
#[derive(Debug, Clone)]
pub struct Simulator {
    store: SeriesStore,
}

impl Simulator {
    /// Create an engine over a store.
    pub const fn new(store: SeriesStore) -> Self {
        Self { store }
    }

    /// The engine's store.
    pub const fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// Run a simulation with the lookback window ending today.
    pub fn run(&self, request: &SimulationRequest) -> Result<SimulationResult> {
        self.run_at(request, Utc::now().date_naive())
    }

    /// Run a simulation with the lookback window ending at `as_of`.
    ///
    /// Returns `Err` only for invalid requests. Data problems produce a
    /// result in the error state or a result with warnings, never `Err`:
    /// per-asset failures become exclusions, and a run with no survivors
    /// or under one trading year of overlapping history becomes an
    /// error-state result.
    pub fn run_at(
        &self,
        request: &SimulationRequest,
        as_of: NaiveDate,
    ) -> Result<SimulationResult> {
        request.validate()?;
        let fingerprint = request_fingerprint(request);
        let window = DateWindow::trailing_years(as_of, request.horizon_years);
        let resolved = resolve_composition(&self.store, request, window);

        if !resolved.has_valid_assets() {
            log::warn!(
                "no valid assets among {} requested entries",
                request.compositions.len()
            );
            return Ok(SimulationResult::failure(
                ERR_NO_VALID_ASSETS,
                resolved.warnings,
                resolved.excluded,
                0,
                0,
                fingerprint,
            ));
        }

        let aligned = align_series(&resolved.valid);
        if aligned.len() < MIN_ALIGNED_ROWS {
            log::warn!(
                "only {} aligned rows across {} assets (minimum {MIN_ALIGNED_ROWS})",
                aligned.len(),
                resolved.valid.len()
            );
            return Ok(SimulationResult::failure(
                ERR_INSUFFICIENT_OVERLAP,
                resolved.warnings,
                resolved.excluded,
                resolved.valid.len(),
                20,
                fingerprint,
            ));
        }

        let weights: Vec<f64> = resolved
            .valid
            .iter()
            .map(|asset| asset.entry.normalized_weight.unwrap_or(0.0))
            .collect();
        let asset_returns = compute_returns(&aligned.prices);
        let port_returns = portfolio_returns(&asset_returns, &weights);
        let equity = equity_curve(&port_returns, request.initial_capital);
        // Equity values correspond to the dates from the second aligned
        // row onward; the first reported value is capital * (1 + r[0]).
        let return_dates = &aligned.dates[1..];

        let final_value = equity.last().copied().unwrap_or(request.initial_capital);
        let tr = total_return(final_value, request.initial_capital);
        let cagr_pct = cagr(tr, port_returns.len());
        let volatility_pct = annualized_volatility(&port_returns);
        let yearly: Vec<YearlyReturn> = yearly_returns(return_dates, &port_returns)
            .into_iter()
            .map(|y| YearlyReturn {
                year: y.year,
                return_pct: round2(y.return_pct),
            })
            .collect();
        let (best_year, worst_year) = best_worst_year(&yearly);

        Ok(SimulationResult {
            metrics: Some(Metrics {
                cagr_pct: round2(cagr_pct),
                volatility_pct: round2(volatility_pct),
                sharpe: round2(sharpe_ratio(cagr_pct, volatility_pct)),
                max_drawdown_pct: round2(max_drawdown(&equity)),
                total_return_pct: round2(tr * 100.0),
                final_value: round2(final_value),
            }),
            equity_curve: monthly_equity(return_dates, &equity),
            yearly_returns: yearly,
            best_year,
            worst_year,
            warnings: resolved.warnings,
            error: None,
            data_quality_score: data_quality_score(aligned.len(), request.horizon_years),
            assets_included: resolved.valid.len(),
            assets_excluded: resolved.excluded.len(),
            excluded_assets: resolved.excluded,
            rebalance_dates: rebalance_dates(&aligned.dates, request.rebalance),
            fingerprint,
            generated_at: Utc::now(),
        })
    }
}
