//! Governance-plane adapters: read the governed artifact files from a
//! governance root and build the typed model used by the evaluation engine.
//!
//! This crate is allowed to do filesystem IO. The artifact set is fixed (see
//! [`integrity::GOVERNED_ARTIFACTS`]); there is no discovery step.

#![forbid(unsafe_code)]

mod integrity;
mod load;

pub use integrity::{fingerprint, Fingerprint, GOVERNED_ARTIFACTS};
pub use load::{parse_bindings, parse_edges, parse_metrics, parse_rules};

use anyhow::Context;
use camino::Utf8Path;
use govgate_domain::model::PlaneSet;
use thiserror::Error;

// Plane-relative artifact paths the engine requires at construction time.
pub const RULES_ARTIFACT: &str = "judiciary/standard_data_rules.json";
pub const ONTOLOGY_ARTIFACT: &str = "legislative/ontology_graph.json";
pub const METRICS_ARTIFACT: &str = "legislative/standard_metrics.json";
pub const BINDINGS_ARTIFACT: &str = "executive/context_bindings.json";

/// Why a plane artifact could not be turned into the typed model.
#[derive(Debug, Error)]
pub enum PlaneError {
    #[error("governed artifact not found: {path}")]
    Missing { path: String },

    #[error("unreadable artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact {path} is malformed: {reason}")]
    Invalid { path: String, reason: String },
}

/// Load all governance planes into the typed model.
///
/// Rules, ontology graph, and metrics are required (the interceptor cannot be
/// built without them); context bindings are optional and default to empty.
pub fn load_planes(root: &Utf8Path) -> anyhow::Result<PlaneSet> {
    let rules_text = read_required(root, RULES_ARTIFACT)?;
    let rules = parse_rules(RULES_ARTIFACT, &rules_text).context("parse judiciary rules")?;

    let graph_text = read_required(root, ONTOLOGY_ARTIFACT)?;
    let edges = parse_edges(ONTOLOGY_ARTIFACT, &graph_text).context("parse ontology graph")?;

    let metrics_text = read_required(root, METRICS_ARTIFACT)?;
    let metric_urns =
        parse_metrics(METRICS_ARTIFACT, &metrics_text).context("parse standard metrics")?;

    let bindings = match read_optional(root, BINDINGS_ARTIFACT)? {
        Some(text) => parse_bindings(BINDINGS_ARTIFACT, &text).context("parse context bindings")?,
        None => Vec::new(),
    };

    Ok(PlaneSet {
        rules,
        bindings,
        edges,
        metric_urns,
    })
}

fn read_required(root: &Utf8Path, rel: &str) -> Result<String, PlaneError> {
    let abs = root.join(rel);
    if !abs.exists() {
        return Err(PlaneError::Missing {
            path: rel.to_string(),
        });
    }
    std::fs::read_to_string(&abs).map_err(|source| PlaneError::Io {
        path: rel.to_string(),
        source,
    })
}

fn read_optional(root: &Utf8Path, rel: &str) -> Result<Option<String>, PlaneError> {
    let abs = root.join(rel);
    if !abs.exists() {
        return Ok(None);
    }
    std::fs::read_to_string(&abs)
        .map(Some)
        .map_err(|source| PlaneError::Io {
            path: rel.to_string(),
            source,
        })
}
