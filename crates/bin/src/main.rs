//! Barbell CLI binary.
//!
//! Runs portfolio simulations from JSON request files and inspects the
//! on-disk price store.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use barbell::{
    DateWindow, ExportFormat, Exporter, MarketScope, SeriesStore, SimulationReport,
    SimulationRequest, Simulator, StoreConfig,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "barbell")]
#[command(about = "Barbell: deterministic portfolio backtesting", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a portfolio simulation from a JSON request file
    Simulate {
        /// Path to the simulation request (JSON)
        request: PathBuf,

        /// Base directory containing the us_eu/ and africa/ store partitions
        #[arg(long)]
        store_root: Option<PathBuf>,

        /// Write the full result to this file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Export format (csv, json, or pretty-json)
        #[arg(long, default_value = "pretty-json")]
        format: String,

        /// Print the report as Markdown instead of an ASCII table
        #[arg(long)]
        markdown: bool,
    },

    /// Inspect one stored price series
    Inspect {
        /// Asset symbol
        symbol: String,

        /// Market scope (us_eu or africa)
        #[arg(long, default_value = "us_eu")]
        scope: String,

        /// History window in years (0 = full history)
        #[arg(long, default_value = "5")]
        years: u32,

        /// Base directory containing the us_eu/ and africa/ store partitions
        #[arg(long)]
        store_root: Option<PathBuf>,

        /// Number of leading rows to print
        #[arg(long, default_value = "5")]
        head: usize,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            request,
            store_root,
            export,
            format,
            markdown,
        } => {
            simulate(&request, store_root, export, &format, markdown)?;
        }
        Commands::Inspect {
            symbol,
            scope,
            years,
            store_root,
            head,
        } => {
            inspect(&symbol, &scope, years, store_root, head)?;
        }
    }

    Ok(())
}

/// Default store location, overridable per invocation.
fn store_config(store_root: Option<PathBuf>) -> Result<StoreConfig, Box<dyn std::error::Error>> {
    let base = match store_root {
        Some(base) => base,
        None => dirs::data_dir()
            .ok_or("no data directory on this platform; pass --store-root")?
            .join("barbell"),
    };
    Ok(StoreConfig::under(base))
}

fn simulate(
    request_path: &Path,
    store_root: Option<PathBuf>,
    export: Option<PathBuf>,
    format: &str,
    markdown: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(request_path)
        .map_err(|e| format!("failed to read {}: {e}", request_path.display()))?;
    let request: SimulationRequest =
        serde_json::from_str(&contents).map_err(|e| format!("malformed request file: {e}"))?;

    let config = store_config(store_root)?;
    let root = config.root_for(request.scope);
    if !root.is_dir() {
        return Err(format!("store partition does not exist: {}", root.display()).into());
    }

    let simulator = Simulator::new(SeriesStore::new(config));
    let result = simulator.run(&request)?;

    let report = SimulationReport::new(&result);
    if markdown {
        println!("{}", report.to_markdown());
    } else {
        println!("{}", report.to_ascii_table());
    }

    if let Some(path) = export {
        let format: ExportFormat = format.parse()?;
        result.export_to_file(&path, format)?;
        println!("Exported result to {}", path.display());
    }

    Ok(())
}

fn inspect(
    symbol: &str,
    scope: &str,
    years: u32,
    store_root: Option<PathBuf>,
    head: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let scope: MarketScope = scope.parse()?;
    let config = store_config(store_root)?;
    let store = SeriesStore::new(config);

    let Some(path) = store.resolve(symbol, scope) else {
        return Err(format!("no series file resolves for {symbol} in {scope}").into());
    };
    println!("Series:   {symbol} ({scope})");
    println!("Resolved: {}", path.display());

    let window = if years == 0 {
        None
    } else {
        Some(DateWindow::trailing_years(Utc::now().date_naive(), years))
    };
    let series = store.load(symbol, scope, window)?;

    println!("Rows:     {}", series.len());
    if let (Some(first), Some(last)) = (series.first_date(), series.last_date()) {
        println!("Range:    {first} to {last}");
    }

    if head > 0 && !series.is_empty() {
        println!("\nFirst {} rows:", head.min(series.len()));
        for point in series.points().iter().take(head) {
            println!("  {}  {:>12.4}", point.date, point.price);
        }
    }

    Ok(())
}
