#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barbell/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export the workspace libraries as modules
pub use barbell_data as data;
pub use barbell_output as output;
pub use barbell_sim as sim;

// Re-export the common entry points
pub use barbell_data::{DateWindow, MarketScope, SeriesStore, StoreConfig};
pub use barbell_output::{ExportFormat, Exporter, SimulationReport};
pub use barbell_sim::{
    CompositionEntry, RebalanceFrequency, SimulationRequest, SimulationResult, Simulator,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_facade_round_trip() {
        use std::fs;

        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::under(dir.path());
        fs::create_dir_all(&config.us_eu_root).unwrap();
        fs::create_dir_all(&config.africa_root).unwrap();

        let simulator = Simulator::new(SeriesStore::new(config));
        let request = SimulationRequest {
            compositions: vec![CompositionEntry::new("SPY", 1.0)],
            horizon_years: 1,
            rebalance: RebalanceFrequency::Yearly,
            initial_capital: 10_000.0,
            scope: MarketScope::UsEu,
        };

        // Empty store: the run completes with an error-state result.
        let result = simulator.run(&request).unwrap();
        assert!(result.is_error());

        let report = SimulationReport::new(&result);
        assert!(report.to_ascii_table().contains("Simulation failed"));
    }
}
