//! Stable content hashing of simulation requests.

use sha2::{Digest, Sha256};

use crate::request::{CompositionEntry, SimulationRequest};

/// Stable identifier of a requested simulation, for caller-side caching
/// and deduplication.
///
/// Composition entries are sorted by symbol so the hash is independent of
/// request order; weight, block tag, horizon, and rebalance frequency
/// complete the canonical form. Capital and scope deliberately do not
/// participate, matching the caching contract: the hash identifies the
/// composition and policy, not the run context.
pub fn request_fingerprint(request: &SimulationRequest) -> String {
    let mut entries: Vec<&CompositionEntry> = request.compositions.iter().collect();
    entries.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    let mut canonical = String::new();
    for entry in entries {
        canonical.push_str(&format!(
            "{}:{:.6}:{};",
            entry.symbol,
            entry.weight,
            entry.block.as_deref().unwrap_or("")
        ));
    }
    canonical.push_str(&format!(
        "horizon={};rebalance={}",
        request.horizon_years, request.rebalance
    ));

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RebalanceFrequency;
    use barbell_data::MarketScope;

    fn request(entries: Vec<CompositionEntry>) -> SimulationRequest {
        SimulationRequest {
            compositions: entries,
            horizon_years: 10,
            rebalance: RebalanceFrequency::Yearly,
            initial_capital: 10_000.0,
            scope: MarketScope::UsEu,
        }
    }

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let fp = request_fingerprint(&request(vec![CompositionEntry::new("AAPL", 1.0)]));
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fp, fp.to_lowercase());
    }

    #[test]
    fn test_fingerprint_order_independent() {
        let forward = request(vec![
            CompositionEntry::new("AAPL", 0.6),
            CompositionEntry::new("TLT", 0.4),
        ]);
        let reversed = request(vec![
            CompositionEntry::new("TLT", 0.4),
            CompositionEntry::new("AAPL", 0.6),
        ]);
        assert_eq!(request_fingerprint(&forward), request_fingerprint(&reversed));
    }

    #[test]
    fn test_fingerprint_depends_on_weights() {
        let a = request(vec![CompositionEntry::new("AAPL", 0.6)]);
        let b = request(vec![CompositionEntry::new("AAPL", 0.5)]);
        assert_ne!(request_fingerprint(&a), request_fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_depends_on_horizon_and_frequency() {
        let base = request(vec![CompositionEntry::new("AAPL", 1.0)]);

        let mut horizon = base.clone();
        horizon.horizon_years = 5;
        assert_ne!(request_fingerprint(&base), request_fingerprint(&horizon));

        let mut freq = base.clone();
        freq.rebalance = RebalanceFrequency::Monthly;
        assert_ne!(request_fingerprint(&base), request_fingerprint(&freq));
    }

    #[test]
    fn test_fingerprint_depends_on_block_tag() {
        let plain = request(vec![CompositionEntry::new("AAPL", 1.0)]);
        let tagged = request(vec![CompositionEntry::with_block("AAPL", 1.0, "growth")]);
        assert_ne!(request_fingerprint(&plain), request_fingerprint(&tagged));
    }

    #[test]
    fn test_fingerprint_ignores_capital_and_normalized_weight() {
        let base = request(vec![CompositionEntry::new("AAPL", 1.0)]);

        let mut capital = base.clone();
        capital.initial_capital = 99_999.0;
        assert_eq!(request_fingerprint(&base), request_fingerprint(&capital));

        let mut annotated = base.clone();
        annotated.compositions[0].normalized_weight = Some(1.0);
        assert_eq!(request_fingerprint(&base), request_fingerprint(&annotated));
    }
}
