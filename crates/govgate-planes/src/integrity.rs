//! The integrity oracle: a deterministic fingerprint over the governed
//! artifact set.
//!
//! The master hash is SHA-256 over the concatenated per-file canonical digests
//! in sorted-path order. Missing or corrupt files contribute sentinel strings
//! instead of digests; the sentinel participates in the master hash, so
//! corruption changes the fingerprint rather than disappearing.

use camino::Utf8Path;
use govgate_domain::hash::{canonical_json_hash, sha256_hex};
use govgate_types::ids;
use serde_json::Value;
use std::collections::BTreeMap;

/// The governed artifact set, already in sorted-path order. The list itself is
/// part of the integrity contract: changing it changes every master hash.
pub const GOVERNED_ARTIFACTS: [&str; 8] = [
    "executive/context_bindings.json",
    "judiciary/standard_data_rules.json",
    "legislative/business_process_maps.json",
    "legislative/ontology_graph.json",
    "legislative/physical_data_map.json",
    "legislative/root_cause_factors.json",
    "legislative/standard_dq_dimensions.json",
    "legislative/standard_metrics.json",
];

/// Result of fingerprinting a governance root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fingerprint {
    /// Single 256-bit proof of the entire governance state.
    pub master_hash: String,
    /// Per-artifact canonical digest or sentinel, keyed by relative path.
    pub components: BTreeMap<String, String>,
}

/// Compute the master hash for a governance root. Never errors: unreadable
/// state degrades to sentinels and stays detectable through the hash.
pub fn fingerprint(root: &Utf8Path) -> Fingerprint {
    let mut components = BTreeMap::new();
    let mut combined = String::new();

    for rel in GOVERNED_ARTIFACTS {
        let digest = artifact_digest(&root.join(rel));
        combined.push_str(&digest);
        components.insert(rel.to_string(), digest);
    }

    Fingerprint {
        master_hash: sha256_hex(combined.as_bytes()),
        components,
    }
}

fn artifact_digest(path: &Utf8Path) -> String {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return ids::SENTINEL_MISSING_FILE.to_string(),
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => canonical_json_hash(&value),
        Err(_) => ids::SENTINEL_INVALID_JSON.to_string(),
    }
}
