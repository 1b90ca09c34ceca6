//! Canonical JSON hashing.
//!
//! Canonical form: object keys sorted bytewise, no whitespace, serde_json
//! number/string formatting. Identical content in any key order or layout hashes
//! to the same digest.

use govgate_types::ids;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// SHA-256 over the canonical serialization of `value`.
///
/// Never errors: a value that cannot be serialized degrades to the
/// `ERROR_NON_SERIALIZABLE` sentinel, which still participates in downstream
/// hashing so the anomaly stays visible.
pub fn canonical_json_hash(value: &Value) -> String {
    match canonical_string(value) {
        Ok(canonical) => sha256_hex(canonical.as_bytes()),
        Err(_) => ids::SENTINEL_NON_SERIALIZABLE.to_string(),
    }
}

/// Hex-encoded SHA-256 of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Canonical (key-sorted, compact) serialization.
///
/// Sorting is explicit rather than relying on the map representation, so the
/// result is stable even if `serde_json`'s `preserve_order` feature is enabled
/// transitively.
pub fn canonical_string(value: &Value) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    write_canonical(value, &mut out)?;
    Ok(out)
}

fn write_canonical(value: &Value, out: &mut String) -> Result<(), serde_json::Error> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(_) => out.push_str(&serde_json::to_string(value)?),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                write_canonical(&map[key], out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}
