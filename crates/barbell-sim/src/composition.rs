//! Composition resolution: which requested holdings have enough history
//! to participate, and with what renormalized weights.

use barbell_data::{DateWindow, PriceSeries, SeriesStore};

use crate::request::{CompositionEntry, SimulationRequest};
use crate::result::ExcludedAsset;

/// Minimum absolute day count for an asset to participate.
pub const MIN_DAYS: usize = 50;

/// Fraction of calendar days in a window expected to be trading days.
const TRADING_DAY_RATIO: f64 = 0.7;

/// Coverage below this fraction of expected trading days draws a warning.
const LOW_COVERAGE_RATIO: f64 = 0.5;

/// A surviving entry with its loaded series. `entry.normalized_weight`
/// is set by the time the resolver returns.
#[derive(Debug, Clone)]
pub struct ValidAsset {
    /// The requested entry, annotated with its normalized weight.
    pub entry: CompositionEntry,
    /// The asset's price series over the simulation window.
    pub series: PriceSeries,
}

/// Outcome of composition resolution. Survivors are sorted by symbol so
/// downstream alignment is independent of request order.
#[derive(Debug, Clone)]
pub struct ResolvedComposition {
    /// Entries that participate, sorted by symbol, weights renormalized.
    pub valid: Vec<ValidAsset>,
    /// Entries excluded with reasons, sorted by symbol.
    pub excluded: Vec<ExcludedAsset>,
    /// Warning strings accumulated per asset, sorted by symbol.
    pub warnings: Vec<String>,
}

impl ResolvedComposition {
    /// Whether any entry survived with a positive normalized weight.
    pub fn has_valid_assets(&self) -> bool {
        self.valid
            .iter()
            .any(|asset| asset.entry.normalized_weight.unwrap_or(0.0) > 0.0)
    }
}

/// Resolve a request's composition against the store.
///
/// Each entry is loaded over `window` through the store's resolver and
/// normalizer. Any per-asset failure is soft: it is logged, the entry is
/// excluded with a day-count reason, and the remaining entries proceed.
/// Entries with fewer than [`MIN_DAYS`] valid rows are excluded; entries
/// with under half the expected trading-day coverage draw a warning but
/// stay in. Survivors' weights are rescaled to sum to 1.
pub fn resolve_composition(
    store: &SeriesStore,
    request: &SimulationRequest,
    window: DateWindow,
) -> ResolvedComposition {
    // Iterate in symbol order so warnings, exclusions, and the survivor
    // list are identical however the request was ordered.
    let mut entries: Vec<&CompositionEntry> = request.compositions.iter().collect();
    entries.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    let expected_days = window.num_days() as f64 * TRADING_DAY_RATIO;

    let mut valid: Vec<ValidAsset> = Vec::new();
    let mut excluded: Vec<ExcludedAsset> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    for entry in entries {
        let series = match store.load(&entry.symbol, request.scope, Some(window)) {
            Ok(series) => Some(series),
            Err(err) => {
                log::warn!("failed to load series for {}: {err}", entry.symbol);
                None
            }
        };
        let days = series.as_ref().map_or(0, PriceSeries::len);

        match series {
            Some(series) if days >= MIN_DAYS => {
                if (days as f64) < expected_days * LOW_COVERAGE_RATIO {
                    warnings.push(format!(
                        "{}: low data coverage ({days} of ~{} expected trading days)",
                        entry.symbol,
                        expected_days.round() as i64
                    ));
                }
                valid.push(ValidAsset {
                    entry: entry.clone(),
                    series,
                });
            }
            _ => {
                let reason = format!("{days} days of history (minimum {MIN_DAYS} required)");
                warnings.push(format!("{} excluded: {reason}", entry.symbol));
                excluded.push(ExcludedAsset {
                    symbol: entry.symbol.clone(),
                    reason,
                });
            }
        }
    }

    let weight_sum: f64 = valid.iter().map(|asset| asset.entry.weight).sum();
    for asset in &mut valid {
        asset.entry.normalized_weight = if weight_sum.abs() > 1e-10 {
            Some(asset.entry.weight / weight_sum)
        } else {
            // Degenerate surviving weight pool; propagates to the
            // no-valid-assets failure upstream.
            Some(0.0)
        };
    }

    ResolvedComposition {
        valid,
        excluded,
        warnings,
    }
}
