use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `govgate.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GovgateConfigV1 {
    /// Optional schema string for tooling (`govgate.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Ledger directory, relative to the governance root unless absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_dir: Option<String>,

    /// Evaluation date (`YYYY-MM-DD`) for temporal context bindings. Defaults
    /// to the current date at resolve time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<String>,

    /// When true, intercept calls without a claimed hash are security-rejected
    /// instead of skipping the handshake.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_handshake: Option<bool>,
}
