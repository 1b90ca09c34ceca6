use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::urn::Urn;

/// Rule severity. Only `HardStop` blocks a process; the other two are recorded.
///
/// Wire form matches the governed artifacts (`HARD_STOP`, `WARNING`, `INFO`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    HardStop,
}

/// One failed rule, as recorded in the audit ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    pub rule_urn: Urn,
    pub rule_name: String,
    pub severity: Severity,
    /// Short snake_case discriminator (`expression_false`, `expression_error`, ...).
    pub code: String,
    pub message: String,
}

/// Decision label as persisted in audit entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    Approved,
    Blocked,
    SecurityRejected,
}

/// The result of one intercept call.
///
/// Blocking and security rejection are values, not errors: callers match on this
/// instead of catching typed exceptions.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Approved,
    Blocked {
        violations: Vec<Violation>,
    },
    /// Handshake mismatch: the caller-claimed hash does not match the live
    /// definition hash. Evaluated before any rule runs.
    SecurityRejected {
        expected: String,
        actual: String,
    },
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Approved => OutcomeKind::Approved,
            Outcome::Blocked { .. } => OutcomeKind::Blocked,
            Outcome::SecurityRejected { .. } => OutcomeKind::SecurityRejected,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Outcome::Approved)
    }
}

impl OutcomeKind {
    /// Stable label used in ledger commit messages.
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeKind::Approved => "APPROVED",
            OutcomeKind::Blocked => "BLOCKED",
            OutcomeKind::SecurityRejected => "SECURITY_REJECTED",
        }
    }
}
