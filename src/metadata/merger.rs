//! Deduplicating merge of per-provider result sets.
//!
//! Providers are visited in the order given, and each provider's records in
//! that provider's order. The first record seen with a given IMDB id wins;
//! later ones are dropped. Records without an IMDB id have nothing reliable
//! to match on and are always kept.

use std::collections::HashSet;

use reelsearch_common::{ProviderResult, SearchRecord};

/// Flatten `results` into one deduplicated list.
///
/// Failed and timed-out providers contribute nothing.
pub fn merge(results: &[ProviderResult]) -> Vec<SearchRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut merged = Vec::new();

    for result in results {
        for record in result.status.records() {
            match record.dedup_key() {
                Some(key) if !seen.insert(key) => continue,
                _ => merged.push(record.clone()),
            }
        }
    }

    merged
}
