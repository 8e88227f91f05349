//! Demo of the scope-partitioned series store.
//!
//! This example demonstrates how to:
//! - Lay a store out under a base directory
//! - Resolve suffixed symbols to series files
//! - Load and normalize a raw CSV into a `PriceSeries`
//!
//! Run with: cargo run --example store_demo

use barbell_data::{DateWindow, MarketScope, SeriesStore, StoreConfig};
use chrono::NaiveDate;
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = StoreConfig::under(dir.path());
    fs::create_dir_all(&config.us_eu_root)?;
    fs::create_dir_all(&config.africa_root)?;

    // A vendor-style export: adjusted close column, shuffled rows, one
    // duplicated date.
    fs::write(
        config.africa_root.join("SCOM_NR.csv"),
        "Date,Close,Adj Close\n\
         2024-01-04,25.6,25.1\n\
         2024-01-02,25.0,24.5\n\
         2024-01-03,25.3,24.8\n\
         2024-01-03,25.4,24.9\n",
    )?;

    let store = SeriesStore::new(config);

    // The dotted symbol resolves through the underscore rule.
    if let Some(path) = store.resolve("SCOM.NR", MarketScope::Africa) {
        println!("Resolved: {}", path.display());
    }

    let series = store.load("SCOM.NR", MarketScope::Africa, None)?;
    println!("\n{} rows after normalization:", series.len());
    for point in series.points() {
        println!("  {}  {:.2}", point.date, point.price);
    }

    // Clip to a window.
    let window = DateWindow::new(
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
    )?;
    let clipped = store.load("SCOM.NR", MarketScope::Africa, Some(window))?;
    println!("\n{} rows inside the clipped window", clipped.len());

    Ok(())
}
