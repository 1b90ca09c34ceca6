//! The `fingerprint` use case: report the current governance state hashes.

use camino::Utf8Path;
use serde::Serialize;
use std::collections::BTreeMap;

pub const SCHEMA_FINGERPRINT_V1: &str = "govgate.fingerprint.v1";

/// Machine-readable fingerprint of a governance root. Operators distribute the
/// master hash to callers, who present it back as their handshake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FingerprintReport {
    pub schema: String,
    pub master_hash: String,
    pub components: BTreeMap<String, String>,
}

pub fn run_fingerprint(root: &Utf8Path) -> FingerprintReport {
    let fp = govgate_planes::fingerprint(root);
    FingerprintReport {
        schema: SCHEMA_FINGERPRINT_V1.to_string(),
        master_hash: fp.master_hash,
        components: fp.components,
    }
}
