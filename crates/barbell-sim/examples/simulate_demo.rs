//! Demo of an end-to-end portfolio simulation.
//!
//! This example demonstrates how to:
//! - Build a store with synthetic price history
//! - Describe a weighted composition request
//! - Run the simulator and read metrics, warnings, and exclusions
//!
//! Run with: cargo run --example simulate_demo

use barbell_data::{MarketScope, SeriesStore, StoreConfig};
use barbell_sim::{CompositionEntry, RebalanceFrequency, SimulationRequest, Simulator};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

fn write_series(root: &Path, name: &str, start: NaiveDate, prices: &[f64]) -> std::io::Result<()> {
    let mut csv = String::from("date,close\n");
    let mut day = start;
    for price in prices {
        csv.push_str(&format!("{},{price}\n", day.format("%Y-%m-%d")));
        day = day + chrono::Duration::days(1);
    }
    fs::write(root.join(format!("{name}.csv")), csv)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = StoreConfig::under(dir.path());
    fs::create_dir_all(&config.us_eu_root)?;
    fs::create_dir_all(&config.africa_root)?;

    let start = NaiveDate::from_ymd_opt(2023, 9, 1).unwrap();
    let growth: Vec<f64> = (0..300)
        .map(|i| 100.0 * (1.0 + 0.0004 * f64::from(i)))
        .collect();
    let wave: Vec<f64> = (0..300)
        .map(|i| 50.0 + 2.0 * (f64::from(i) / 10.0).sin())
        .collect();
    write_series(&config.us_eu_root, "GROW", start, &growth)?;
    write_series(&config.us_eu_root, "WAVE", start, &wave)?;

    let request = SimulationRequest {
        compositions: vec![
            CompositionEntry::new("GROW", 0.6),
            CompositionEntry::new("WAVE", 0.3),
            // Not in the store: excluded, remaining weights renormalized.
            CompositionEntry::new("GHOST", 0.1),
        ],
        horizon_years: 1,
        rebalance: RebalanceFrequency::Monthly,
        initial_capital: 10_000.0,
        scope: MarketScope::UsEu,
    };

    let simulator = Simulator::new(SeriesStore::new(config));
    let as_of = NaiveDate::from_ymd_opt(2024, 6, 26).unwrap();
    let result = simulator.run_at(&request, as_of)?;

    println!("Fingerprint: {}", result.fingerprint);
    println!(
        "Assets: {} included, {} excluded",
        result.assets_included, result.assets_excluded
    );
    for warning in &result.warnings {
        println!("Warning: {warning}");
    }

    if let Some(m) = &result.metrics {
        println!("\nCAGR:          {:>8.2}%", m.cagr_pct);
        println!("Volatility:    {:>8.2}%", m.volatility_pct);
        println!("Sharpe:        {:>8.2}", m.sharpe);
        println!("Max drawdown:  {:>8.2}%", m.max_drawdown_pct);
        println!("Final value:   {:>8.2}", m.final_value);
    }

    println!("\nMonthly equity ({} points):", result.equity_curve.len());
    for point in result.equity_curve.iter().take(6) {
        println!("  {}  {:>10.2}", point.date, point.value);
    }

    Ok(())
}
