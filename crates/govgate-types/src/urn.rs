use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids;

/// Canonical governance identifier (`urn:odgs:<kind>:<id>`).
///
/// Kept as a validated-enough string rather than a parsed struct: artifacts are
/// externally authored and URNs flow through hashing, so the byte-for-byte form
/// matters more than structure.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct Urn(String);

impl Urn {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_string())
    }

    /// Build a rule URN from a bare rule id (`2021` -> `urn:odgs:rule:2021`).
    pub fn rule<S: AsRef<str>>(id: S) -> Self {
        Self(format!("{}{}", ids::URN_PREFIX_RULE, id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing `<id>` segment, if this looks like a namespaced URN.
    pub fn id_segment(&self) -> Option<&str> {
        self.0.starts_with("urn:").then(|| {
            self.0
                .rsplit_once(':')
                .map(|(_, id)| id)
                .unwrap_or(self.0.as_str())
        })
    }
}

impl std::fmt::Display for Urn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Urn {
    fn from(value: &str) -> Self {
        Urn::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_urn_prefixes_bare_id() {
        assert_eq!(Urn::rule("2021").as_str(), "urn:odgs:rule:2021");
    }

    #[test]
    fn id_segment_extracts_tail() {
        assert_eq!(Urn::new("urn:odgs:rule:2021").id_segment(), Some("2021"));
        assert_eq!(Urn::new("not-a-urn").id_segment(), None);
    }

    #[test]
    fn new_trims_whitespace() {
        assert_eq!(Urn::new(" urn:odgs:metric:101 ").as_str(), "urn:odgs:metric:101");
    }
}
