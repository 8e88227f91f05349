//! Demonstration of report rendering and export in barbell-output.

use barbell_output::{ExportFormat, Exporter, SimulationReport};
use barbell_sim::{EquityPoint, Metrics, SimulationResult, YearlyReturn};
use chrono::{NaiveDate, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Barbell Report Demo ===\n");

    let result = SimulationResult {
        metrics: Some(Metrics {
            cagr_pct: 6.82,
            volatility_pct: 11.35,
            sharpe: 0.42,
            max_drawdown_pct: -14.6,
            total_return_pct: 39.2,
            final_value: 13_920.0,
        }),
        equity_curve: vec![
            EquityPoint {
                date: NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
                value: 10_120.0,
            },
            EquityPoint {
                date: NaiveDate::from_ymd_opt(2023, 2, 28).unwrap(),
                value: 10_310.5,
            },
            EquityPoint {
                date: NaiveDate::from_ymd_opt(2023, 3, 31).unwrap(),
                value: 10_150.25,
            },
        ],
        yearly_returns: vec![
            YearlyReturn {
                year: 2022,
                return_pct: -8.4,
            },
            YearlyReturn {
                year: 2023,
                return_pct: 17.9,
            },
        ],
        best_year: Some(YearlyReturn {
            year: 2023,
            return_pct: 17.9,
        }),
        worst_year: Some(YearlyReturn {
            year: 2022,
            return_pct: -8.4,
        }),
        warnings: vec!["EZA: low data coverage (190 of ~252 expected trading days)".to_owned()],
        error: None,
        data_quality_score: 88,
        assets_included: 3,
        assets_excluded: 0,
        excluded_assets: vec![],
        rebalance_dates: vec![
            NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
        ],
        fingerprint: "b1a7c4e29d5f".to_owned(),
        generated_at: Utc::now(),
    };

    // 1. Terminal report
    println!("1. ASCII Report");
    let report = SimulationReport::new(&result);
    println!("{}", report.to_ascii_table());

    // 2. Markdown report
    println!("\n2. Markdown Report\n");
    println!("{}", report.to_markdown());

    // 3. CSV and JSON export
    println!("\n3. CSV Export\n");
    println!("{}", result.export_to_string(ExportFormat::Csv)?);

    println!("\n4. Pretty JSON Export\n");
    println!("{}", result.export_to_string(ExportFormat::PrettyJson)?);

    // 5. Export to files
    let temp_dir = std::env::temp_dir();
    let csv_file = temp_dir.join("barbell_result.csv");
    let json_file = temp_dir.join("barbell_result.json");

    result.export_to_file(&csv_file, ExportFormat::Csv)?;
    result.export_to_file(&json_file, ExportFormat::PrettyJson)?;

    println!("\n5. Exported result to:");
    println!("  CSV:  {}", csv_file.display());
    println!("  JSON: {}", json_file.display());

    Ok(())
}
