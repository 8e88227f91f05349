//! Error types for series store operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::series::MarketScope;

/// Result type for series store operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while resolving, loading, or normalizing a series.
#[derive(Debug, Error)]
pub enum DataError {
    /// No file in the store matched any path rule for the symbol.
    #[error("No series file found for {symbol} in {scope} store")]
    SeriesNotFound {
        /// Symbol that was requested
        symbol: String,
        /// Market scope that was searched
        scope: MarketScope,
    },

    /// The loaded table has no recognizable price column.
    #[error("No usable price column for {symbol}: {reason}")]
    NoPriceColumn {
        /// Symbol whose file was loaded
        symbol: String,
        /// Columns that were present, for diagnostics
        reason: String,
    },

    /// Invalid date range
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date of the range
        start: NaiveDate,
        /// End date of the range
        end: NaiveDate,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
