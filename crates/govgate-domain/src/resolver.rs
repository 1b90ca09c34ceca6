//! Context resolution: which rules govern a given process right now.

use crate::model::PlaneSet;
use govgate_types::{ids, Urn};
use serde::Serialize;
use time::Date;

/// How the active rule set was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionSource {
    ContextBinding,
    OntologyFallback,
}

/// The resolved policy bundle for one intercept call. Serializable so it can be
/// canonically hashed into the `config_hash` evidence segment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedContext {
    pub context_id: String,
    pub rule_urns: Vec<Urn>,
    /// Metrics the binding declares as required. Empty on the fallback path;
    /// ontology edges carry no metric requirements.
    pub required_metric_urns: Vec<Urn>,
    pub source: ResolutionSource,
}

/// Resolve the active rule set for `process_id`.
///
/// Primary path: exact `context_id` match on a binding whose effective window
/// contains `as_of`. Fallback: ontology edges with `relationship =
/// BLOCKS_PROCESS` targeting the process; each edge source becomes an active
/// rule URN. Returns `None` when neither path yields anything.
pub fn resolve(planes: &PlaneSet, process_id: &str, as_of: Date) -> Option<ResolvedContext> {
    if let Some(binding) = planes
        .bindings
        .iter()
        .find(|b| b.context_id == process_id && b.is_effective(as_of))
    {
        return Some(ResolvedContext {
            context_id: binding.context_id.clone(),
            rule_urns: binding.rule_urns.clone(),
            required_metric_urns: binding.required_metric_urns.clone(),
            source: ResolutionSource::ContextBinding,
        });
    }

    let fallback_rules: Vec<Urn> = planes
        .edges
        .iter()
        .filter(|e| e.target_urn.as_str() == process_id && e.relationship == ids::REL_BLOCKS_PROCESS)
        .map(|e| e.source_urn.clone())
        .collect();

    if fallback_rules.is_empty() {
        return None;
    }

    Some(ResolvedContext {
        context_id: process_id.to_string(),
        rule_urns: fallback_rules,
        required_metric_urns: vec![],
        source: ResolutionSource::OntologyFallback,
    })
}
