//! Error types for the simulation engine.
//!
//! Only invalid requests surface as `Err`. Data-quality problems (missing
//! files, short histories, insufficient overlap) are part of the engine's
//! normal output and land in [`crate::result::SimulationResult`] as
//! warnings or an error state.

use thiserror::Error;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised for requests the engine cannot meaningfully run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The request has no composition entries.
    #[error("Request contains no composition entries")]
    EmptyComposition,

    /// Horizon outside the accepted whole-year range.
    #[error("Invalid horizon: {years} years (expected 1 to {max})")]
    InvalidHorizon {
        /// Requested horizon in years
        years: u32,
        /// Largest accepted horizon
        max: u32,
    },

    /// Initial capital must be positive and finite.
    #[error("Invalid initial capital: {value}")]
    InvalidCapital {
        /// Requested capital
        value: f64,
    },

    /// Requested weights must be positive and finite.
    #[error("Invalid weight {weight} for {symbol}")]
    InvalidWeight {
        /// Entry the weight belongs to
        symbol: String,
        /// Requested weight
        weight: f64,
    },
}
