use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::outcome::{OutcomeKind, Violation};

/// Versioned schema identifier for ledger entries.
pub const SCHEMA_AUDIT_V1: &str = "govgate.audit.v1";

/// The three-hash receipt plus the context it was computed against.
///
/// `tripartite_binding` is `input[..8]:definition[..8]:config[..8]` — a compact
/// proof of which payload, which law-state, and which context produced the
/// decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Evidence {
    pub input_hash: String,
    pub definition_hash: String,
    pub config_hash: String,
    pub tripartite_binding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    /// Number of rules actually evaluated. Zero for security rejections.
    pub rule_count: u32,
}

/// One immutable ledger record. Created exactly once per intercept call and
/// never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditEntry {
    pub schema: String,
    pub event_id: String,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub process_urn: String,
    pub outcome: OutcomeKind,
    pub violations: Vec<Violation>,
    pub warnings: Vec<Violation>,
    pub evidence: Evidence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_entry_round_trips_as_json() {
        let entry = AuditEntry {
            schema: SCHEMA_AUDIT_V1.to_string(),
            event_id: "e-1".to_string(),
            timestamp: OffsetDateTime::UNIX_EPOCH,
            process_urn: "urn:odgs:process:test".to_string(),
            outcome: OutcomeKind::Approved,
            violations: vec![],
            warnings: vec![],
            evidence: Evidence {
                input_hash: "a".repeat(64),
                definition_hash: "b".repeat(64),
                config_hash: "c".repeat(64),
                tripartite_binding: format!("{}:{}:{}", "a".repeat(8), "b".repeat(8), "c".repeat(8)),
                context_id: Some("urn:odgs:process:test".to_string()),
                rule_count: 2,
            },
        };

        let json = serde_json::to_string(&entry).expect("serialize");
        assert!(json.contains("\"outcome\":\"APPROVED\""));
        let back: AuditEntry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, entry);
    }

    #[test]
    fn absent_context_id_is_omitted() {
        let evidence = Evidence {
            input_hash: String::new(),
            definition_hash: String::new(),
            config_hash: String::new(),
            tripartite_binding: String::new(),
            context_id: None,
            rule_count: 0,
        };
        let json = serde_json::to_string(&evidence).expect("serialize");
        assert!(!json.contains("context_id"));
    }
}
