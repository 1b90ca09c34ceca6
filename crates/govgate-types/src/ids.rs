//! Stable identifiers, sentinels, and wire constants.
//!
//! Sentinels participate in master-hash computation, so their exact spelling is
//! part of the integrity contract and must never change.

// Hash sentinels (these feed the master hash; corruption stays detectable).
pub const SENTINEL_MISSING_FILE: &str = "MISSING_FILE";
pub const SENTINEL_INVALID_JSON: &str = "INVALID_JSON";
pub const SENTINEL_NON_SERIALIZABLE: &str = "ERROR_NON_SERIALIZABLE";

// Ontology edge relationship that links a rule to the process it gates.
pub const REL_BLOCKS_PROCESS: &str = "BLOCKS_PROCESS";

// Codes: why a rule outcome failed.
pub const CODE_EXPRESSION_FALSE: &str = "expression_false";
pub const CODE_EXPRESSION_ERROR: &str = "expression_error";
pub const CODE_RULE_NOT_FOUND: &str = "rule_not_found";
pub const CODE_UNKNOWN_METRIC: &str = "unknown_metric";

// URN namespace segments (`urn:odgs:<kind>:<id>`).
pub const URN_PREFIX_RULE: &str = "urn:odgs:rule:";
pub const URN_PREFIX_METRIC: &str = "urn:odgs:metric:";
pub const URN_PREFIX_PROCESS: &str = "urn:odgs:process:";
