//! Path resolution for per-asset series files.
//!
//! Ingestion sources disagree on file naming: some store `AAPL.csv`, some
//! `aapl.csv`, some keep the exchange qualifier (`SCOM.NR` as `SCOM_NR.csv`
//! or `SCOM.NR.csv`), some drop it. Resolution tries a fixed ordered list of
//! candidate constructions and takes the first that exists on disk. A miss
//! across all rules is a soft not-found, not an error.

use std::path::{Path, PathBuf};

/// A path rule proposes a candidate file stem for a symbol, or `None` when
/// the rule does not apply to that symbol shape.
type PathRule = fn(&str) -> Option<String>;

/// Ordered resolution rules, most specific first. New ingestion conventions
/// are appended; the existing order must not change.
const PATH_RULES: &[(&str, PathRule)] = &[
    ("exact", exact),
    ("uppercase", uppercase),
    ("dot-to-underscore", dot_to_underscore),
    ("underscore-to-dot", underscore_to_dot),
    ("base-ticker", base_ticker),
];

fn exact(symbol: &str) -> Option<String> {
    Some(symbol.to_owned())
}

fn uppercase(symbol: &str) -> Option<String> {
    let upper = symbol.to_ascii_uppercase();
    (upper != symbol).then_some(upper)
}

fn dot_to_underscore(symbol: &str) -> Option<String> {
    symbol
        .contains('.')
        .then(|| symbol.replace('.', "_").to_ascii_uppercase())
}

fn underscore_to_dot(symbol: &str) -> Option<String> {
    symbol
        .contains('_')
        .then(|| symbol.replace('_', ".").to_ascii_uppercase())
}

/// `TICKER.EXCHANGE` or `TICKER_EXCHANGE` reduced to the bare ticker.
fn base_ticker(symbol: &str) -> Option<String> {
    let base = symbol.split(['.', '_']).next()?;
    (!base.is_empty() && base.len() != symbol.len()).then(|| base.to_ascii_uppercase())
}

/// Resolve the series file for `symbol` under `root`, returning the first
/// rule's candidate that exists on disk.
pub fn resolve_in_root(root: &Path, symbol: &str) -> Option<PathBuf> {
    for (rule, build) in PATH_RULES {
        let Some(stem) = build(symbol) else { continue };
        let candidate = root.join(format!("{stem}.csv"));
        if candidate.is_file() {
            log::debug!("resolved {symbol} via {rule} rule: {}", candidate.display());
            return Some(candidate);
        }
    }
    None
}
