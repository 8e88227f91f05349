#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barbell/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod composition;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod metrics;
pub mod request;
pub mod result;
pub mod simulator;

pub use composition::{MIN_DAYS, ResolvedComposition, ValidAsset, resolve_composition};
pub use engine::{AlignedPrices, MIN_ALIGNED_ROWS, align_series};
pub use error::{Result, SimError};
pub use fingerprint::request_fingerprint;
pub use metrics::{RISK_FREE_RATE, TRADING_DAYS_PER_YEAR};
pub use request::{CompositionEntry, MAX_HORIZON_YEARS, RebalanceFrequency, SimulationRequest};
pub use result::{
    ERR_INSUFFICIENT_OVERLAP, ERR_NO_VALID_ASSETS, EquityPoint, ExcludedAsset, Metrics,
    SimulationResult, YearlyReturn,
};
pub use simulator::Simulator;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
