#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barbell/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod normalize;
pub mod resolve;
pub mod series;
pub mod store;

pub use error::{DataError, Result};
pub use normalize::normalize_prices;
pub use resolve::resolve_in_root;
pub use series::{DateWindow, MarketScope, PricePoint, PriceSeries};
pub use store::{SeriesStore, StoreConfig};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
