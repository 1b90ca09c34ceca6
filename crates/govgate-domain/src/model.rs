//! Typed plane model, built from the governed artifacts by `govgate-planes`.

use govgate_types::{Severity, Urn};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// One externally authored governance rule, addressed by `urn:odgs:rule:<id>`.
#[derive(Clone, Debug)]
pub struct Rule {
    pub urn: Urn,
    pub rule_id: String,
    pub name: String,
    pub domain: Option<String>,
    /// Sandboxed boolean expression. Absent means the rule is vacuously satisfied.
    pub logic_expression: Option<String>,
    pub severity: Severity,
    pub owner: Option<String>,
}

/// Temporally scoped policy bundle for one process context.
#[derive(Clone, Debug)]
pub struct ContextBinding {
    pub context_id: String,
    pub required_metric_urns: Vec<Urn>,
    pub rule_urns: Vec<Urn>,
    pub effective_from: Option<Date>,
    pub effective_until: Option<Date>,
}

impl ContextBinding {
    /// Whether this binding is in force on `as_of` (inclusive bounds).
    pub fn is_effective(&self, as_of: Date) -> bool {
        if let Some(from) = self.effective_from
            && as_of < from
        {
            return false;
        }
        if let Some(until) = self.effective_until
            && as_of > until
        {
            return false;
        }
        true
    }
}

/// One edge of the ontology graph. Edges with `relationship = BLOCKS_PROCESS`
/// link rules to processes when no explicit context binding exists.
#[derive(Clone, Debug)]
pub struct OntologyEdge {
    pub source_urn: Urn,
    pub target_urn: Urn,
    pub relationship: String,
}

/// The in-memory view of all loaded governance planes.
#[derive(Clone, Debug, Default)]
pub struct PlaneSet {
    /// Judiciary plane: rules indexed by URN.
    pub rules: BTreeMap<Urn, Rule>,
    /// Executive plane: context bindings.
    pub bindings: Vec<ContextBinding>,
    /// Legislative plane: ontology graph edges.
    pub edges: Vec<OntologyEdge>,
    /// Legislative plane: known metric URNs.
    pub metric_urns: BTreeSet<Urn>,
}

impl PlaneSet {
    pub fn rule(&self, urn: &Urn) -> Option<&Rule> {
        self.rules.get(urn)
    }
}
