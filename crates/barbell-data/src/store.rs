//! Scope-partitioned, read-only series store.

use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::error::{DataError, Result};
use crate::normalize::normalize_prices;
use crate::resolve::resolve_in_root;
use crate::series::{DateWindow, MarketScope, PriceSeries};

/// Locations of the per-scope store partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Root directory of the US/EU partition.
    pub us_eu_root: PathBuf,
    /// Root directory of the Africa partition.
    pub africa_root: PathBuf,
}

impl StoreConfig {
    /// Create a config from explicit partition roots.
    pub const fn new(us_eu_root: PathBuf, africa_root: PathBuf) -> Self {
        Self {
            us_eu_root,
            africa_root,
        }
    }

    /// Conventional layout under a single base directory:
    /// `<base>/us_eu` and `<base>/africa`.
    pub fn under(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            us_eu_root: base.join(MarketScope::UsEu.dir_name()),
            africa_root: base.join(MarketScope::Africa.dir_name()),
        }
    }

    /// Partition root for a scope.
    pub fn root_for(&self, scope: MarketScope) -> &Path {
        match scope {
            MarketScope::UsEu => &self.us_eu_root,
            MarketScope::Africa => &self.africa_root,
        }
    }
}

/// Read-only access to the on-disk series store.
///
/// One store is constructed per engine instance and passed by reference;
/// it holds no mutable state and never writes to disk.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    config: StoreConfig,
}

impl SeriesStore {
    /// Create a store over the given partition roots.
    pub const fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// The store's partition configuration.
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Resolve the series file for `symbol` in `scope`, or `None` when no
    /// path rule matches. Absence is soft by contract, not an error.
    pub fn resolve(&self, symbol: &str, scope: MarketScope) -> Option<PathBuf> {
        resolve_in_root(self.config.root_for(scope), symbol)
    }

    /// Load and normalize the series for `symbol`, clipped to `window`.
    ///
    /// Fails with [`DataError::SeriesNotFound`] when no file resolves;
    /// other variants surface CSV or schema problems. All of these are
    /// soft at the simulation level: the composition resolver catches
    /// them at the per-asset boundary.
    pub fn load(
        &self,
        symbol: &str,
        scope: MarketScope,
        window: Option<DateWindow>,
    ) -> Result<PriceSeries> {
        let path = self
            .resolve(symbol, scope)
            .ok_or_else(|| DataError::SeriesNotFound {
                symbol: symbol.to_owned(),
                scope,
            })?;
        let df = read_csv(&path)?;
        normalize_prices(&df, symbol, scope, window)
    }
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}
