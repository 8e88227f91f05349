//! Human-readable rendering of simulation results.

use barbell_sim::SimulationResult;
use std::fmt;

/// Formats a [`SimulationResult`] for terminals and documentation.
///
/// The result type itself stays a plain data carrier; this wrapper owns
/// the presentation.
#[derive(Debug, Clone, Copy)]
pub struct SimulationReport<'a> {
    result: &'a SimulationResult,
}

impl<'a> SimulationReport<'a> {
    /// Wrap a simulation result for rendering.
    pub const fn new(result: &'a SimulationResult) -> Self {
        Self { result }
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let r = self.result;
        let mut output = String::new();

        output.push_str("\nSimulation Report\n");
        output.push_str(&format!(
            "Generated: {}\n",
            r.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!("Fingerprint: {}\n", r.fingerprint));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if let Some(error) = &r.error {
            output.push_str(&format!("\nSimulation failed: {}\n", error));
        }

        if let Some(m) = &r.metrics {
            output.push_str("\nPerformance Metrics:\n");
            output.push_str(&"-".repeat(80));
            output.push('\n');
            output.push_str(&format!("  CAGR:                 {:>10.2}%\n", m.cagr_pct));
            output.push_str(&format!(
                "  Volatility (ann.):    {:>10.2}%\n",
                m.volatility_pct
            ));
            output.push_str(&format!("  Sharpe Ratio:         {:>10.2}\n", m.sharpe));
            output.push_str(&format!(
                "  Max Drawdown:         {:>10.2}%\n",
                m.max_drawdown_pct
            ));
            output.push_str(&format!(
                "  Total Return:         {:>10.2}%\n",
                m.total_return_pct
            ));
            output.push_str(&format!(
                "  Final Value:          {:>10.2}\n",
                m.final_value
            ));
        }

        if !r.yearly_returns.is_empty() {
            output.push_str("\nYearly Returns:\n");
            output.push_str(&"-".repeat(80));
            output.push('\n');
            output.push_str(&format!("  {:<8} {:>10}\n", "Year", "Return"));
            for yr in &r.yearly_returns {
                let marker = if r.best_year.is_some_and(|b| b.year == yr.year) {
                    "  (best)"
                } else if r.worst_year.is_some_and(|w| w.year == yr.year) {
                    "  (worst)"
                } else {
                    ""
                };
                output.push_str(&format!(
                    "  {:<8} {:>9.2}%{}\n",
                    yr.year, yr.return_pct, marker
                ));
            }
        }

        output.push_str("\nComposition:\n");
        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!("  Assets Included:      {}\n", r.assets_included));
        output.push_str(&format!("  Assets Excluded:      {}\n", r.assets_excluded));
        output.push_str(&format!(
            "  Data Quality:         {}/100\n",
            r.data_quality_score
        ));
        output.push_str(&format!(
            "  Rebalance Dates:      {}\n",
            r.rebalance_dates.len()
        ));

        if !r.excluded_assets.is_empty() {
            output.push_str("\nExcluded Assets:\n");
            output.push_str(&"-".repeat(80));
            output.push('\n');
            for excluded in &r.excluded_assets {
                output.push_str(&format!("  {}: {}\n", excluded.symbol, excluded.reason));
            }
        }

        if !r.warnings.is_empty() {
            output.push_str("\nWarnings:\n");
            output.push_str(&"-".repeat(80));
            output.push('\n');
            for warning in &r.warnings {
                output.push_str(&format!("  - {}\n", warning));
            }
        }

        output.push_str(&"=".repeat(80));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let r = self.result;
        let mut output = String::new();

        output.push_str("# Simulation Report\n\n");
        output.push_str(&format!(
            "**Generated:** {}\n\n",
            r.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!("**Fingerprint:** `{}`\n\n", r.fingerprint));

        if let Some(error) = &r.error {
            output.push_str(&format!("**Failed:** {}\n\n", error));
        }

        if let Some(m) = &r.metrics {
            output.push_str("## Performance Metrics\n\n");
            output.push_str(&format!("- **CAGR:** {:.2}%\n", m.cagr_pct));
            output.push_str(&format!("- **Volatility:** {:.2}%\n", m.volatility_pct));
            output.push_str(&format!("- **Sharpe Ratio:** {:.2}\n", m.sharpe));
            output.push_str(&format!("- **Max Drawdown:** {:.2}%\n", m.max_drawdown_pct));
            output.push_str(&format!("- **Total Return:** {:.2}%\n", m.total_return_pct));
            output.push_str(&format!("- **Final Value:** {:.2}\n", m.final_value));
            output.push('\n');
        }

        if !r.yearly_returns.is_empty() {
            output.push_str("## Yearly Returns\n\n");
            output.push_str("| Year | Return |\n");
            output.push_str("|------|--------|\n");
            for yr in &r.yearly_returns {
                output.push_str(&format!("| {} | {:.2}% |\n", yr.year, yr.return_pct));
            }
            output.push('\n');
        }

        output.push_str("## Composition\n\n");
        output.push_str(&format!("- **Assets Included:** {}\n", r.assets_included));
        output.push_str(&format!("- **Assets Excluded:** {}\n", r.assets_excluded));
        output.push_str(&format!(
            "- **Data Quality:** {}/100\n",
            r.data_quality_score
        ));
        output.push('\n');

        if !r.excluded_assets.is_empty() {
            output.push_str("## Excluded Assets\n\n");
            output.push_str("| Symbol | Reason |\n");
            output.push_str("|--------|--------|\n");
            for excluded in &r.excluded_assets {
                output.push_str(&format!("| {} | {} |\n", excluded.symbol, excluded.reason));
            }
            output.push('\n');
        }

        if !r.warnings.is_empty() {
            output.push_str("## Warnings\n\n");
            for warning in &r.warnings {
                output.push_str(&format!("- {}\n", warning));
            }
        }

        output
    }
}

impl fmt::Display for SimulationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        writeln!(
            f,
            "Simulation: {} included / {} excluded, quality {}/100",
            r.assets_included, r.assets_excluded, r.data_quality_score
        )?;
        if let Some(error) = &r.error {
            writeln!(f, "  Failed: {}", error)?;
        }
        if let Some(m) = &r.metrics {
            writeln!(f, "  CAGR: {:.2}%", m.cagr_pct)?;
            writeln!(f, "  Volatility: {:.2}%", m.volatility_pct)?;
            writeln!(f, "  Sharpe: {:.2}", m.sharpe)?;
            writeln!(f, "  Max Drawdown: {:.2}%", m.max_drawdown_pct)?;
            writeln!(f, "  Final Value: {:.2}", m.final_value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barbell_sim::{
        ERR_NO_VALID_ASSETS, EquityPoint, ExcludedAsset, Metrics, SimulationResult, YearlyReturn,
    };
    use chrono::{NaiveDate, Utc};

    fn sample_result() -> SimulationResult {
        SimulationResult {
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
            yearly_returns: vec![
                YearlyReturn {
                    year: 2023,
                    return_pct: 12.4,
                },
                YearlyReturn {
                    year: 2024,
                    return_pct: -3.1,
                },
            ],
            best_year: Some(YearlyReturn {
                year: 2023,
                return_pct: 12.4,
            }),
            worst_year: Some(YearlyReturn {
                year: 2024,
                return_pct: -3.1,
            }),
            warnings: vec!["VWO: low data coverage (150 of ~176 expected trading days)".to_owned()],
            error: None,
            data_quality_score: 87,
            assets_included: 2,
            assets_excluded: 1,
            excluded_assets: vec![ExcludedAsset {
                symbol: "GHOST".to_owned(),
                reason: "0 days of history (minimum 50 required)".to_owned(),
            }],
            rebalance_dates: vec![NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()],
            fingerprint: "3f2a9c1d04e7".to_owned(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_ascii_table_contains_metrics() {
        let result = sample_result();
        let table = SimulationReport::new(&result).to_ascii_table();

        assert!(table.contains("Simulation Report"));
        assert!(table.contains("CAGR"));
        assert!(table.contains("7.50%"));
        assert!(table.contains("Sharpe Ratio"));
        assert!(table.contains("-18.25%"));
        assert!(table.contains("3f2a9c1d04e7"));
    }

    #[test]
    fn test_ascii_table_marks_best_and_worst_years() {
        let result = sample_result();
        let table = SimulationReport::new(&result).to_ascii_table();

        assert!(table.contains("(best)"));
        assert!(table.contains("(worst)"));
        assert!(table.contains("2023"));
        assert!(table.contains("2024"));
    }

    #[test]
    fn test_ascii_table_lists_warnings_and_exclusions() {
        let result = sample_result();
        let table = SimulationReport::new(&result).to_ascii_table();

        assert!(table.contains("GHOST: 0 days of history"));
        assert!(table.contains("- VWO: low data coverage"));
        assert!(table.contains("Data Quality:         87/100"));
    }

    #[test]
    fn test_ascii_table_error_state() {
        let result = SimulationResult::failure(
            ERR_NO_VALID_ASSETS,
            vec!["SPY excluded: 30 days of history (minimum 50 required)".to_owned()],
            vec![ExcludedAsset {
                symbol: "SPY".to_owned(),
                reason: "30 days of history (minimum 50 required)".to_owned(),
            }],
            0,
            0,
            "deadbeef".to_owned(),
        );
        let table = SimulationReport::new(&result).to_ascii_table();

        assert!(table.contains("Simulation failed: No valid assets"));
        assert!(!table.contains("Performance Metrics"));
        assert!(table.contains("SPY excluded"));
        assert!(table.contains("Data Quality:         0/100"));
    }

    #[test]
    fn test_markdown_structure() {
        let result = sample_result();
        let md = SimulationReport::new(&result).to_markdown();

        assert!(md.contains("# Simulation Report"));
        assert!(md.contains("## Performance Metrics"));
        assert!(md.contains("- **CAGR:** 7.50%"));
        assert!(md.contains("## Yearly Returns"));
        assert!(md.contains("| 2023 | 12.40% |"));
        assert!(md.contains("## Excluded Assets"));
        assert!(md.contains("| GHOST |"));
    }

    #[test]
    fn test_display_one_line_summary() {
        let result = sample_result();
        let display = format!("{}", SimulationReport::new(&result));

        assert!(display.contains("2 included / 1 excluded"));
        assert!(display.contains("quality 87/100"));
        assert!(display.contains("CAGR: 7.50%"));
    }

    #[test]
    fn test_display_error_state() {
        let result =
            SimulationResult::failure(ERR_NO_VALID_ASSETS, vec![], vec![], 0, 0, "ff".to_owned());
        let display = format!("{}", SimulationReport::new(&result));

        assert!(display.contains("Failed: No valid assets with sufficient history"));
        assert!(!display.contains("CAGR"));
    }
}
