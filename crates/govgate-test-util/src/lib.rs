//! Shared test fixtures for the govgate workspace.
//!
//! This crate exists because the CLI integration tests, the planes tests, and
//! the app tests all need the same materialized governance root; a
//! `#[cfg(test)]` module inside one crate would not be visible to the others.

use serde_json::json;
use std::io;
use std::path::Path;

/// Process URN bound to rule 2021 (container id format) via a context binding.
pub const PROCESS_CONTAINER_INTAKE: &str = "urn:odgs:process:container_intake";

/// Process URN bound to rule 2007 (positive value) via a `BLOCKS_PROCESS`
/// ontology edge only (no context binding).
pub const PROCESS_PAYMENT_RUN: &str = "urn:odgs:process:payment_run";

/// Process URN whose binding window ended in 2020.
pub const PROCESS_ARCHIVED_REPORT: &str = "urn:odgs:process:archived_report";

/// Process URN carrying one rule of each severity plus a date rule.
pub const PROCESS_FULL_SPECTRUM: &str = "urn:odgs:process:full_spectrum";

/// Process URN whose binding requires a metric absent from the metrics plane.
pub const PROCESS_LEGACY_EXPORT: &str = "urn:odgs:process:legacy_export";

/// Materialize a complete governance root (all eight governed artifacts) under
/// `root`. Content is small but exercises every resolution and severity path.
pub fn write_governance_fixture(root: &Path) -> io::Result<()> {
    let rules = json!({
        "rules": [
            {
                "rule_id": "2007",
                "name": "Positive Transaction Value",
                "domain": "finance",
                "logic_expression": "value > 0",
                "severity": "HARD_STOP",
                "owner": "finance-governance"
            },
            {
                "rule_id": "2020",
                "name": "Percentage In Range",
                "logic_expression": "value >= 0 and value <= 100",
                "severity": "WARNING"
            },
            {
                "rule_id": "2021",
                "name": "ISO 6346 Container ID",
                "domain": "logistics",
                "logic_expression": "regex_match(r'^[A-Z]{4}[0-9]{7}$', value)",
                "severity": "HARD_STOP",
                "owner": "logistics-governance"
            },
            {
                "rule_id": "2027",
                "name": "No Future Dates",
                "logic_expression": "parse_date(value) <= today()",
                "severity": "HARD_STOP"
            },
            {
                "rule_id": "3001",
                "name": "Value Is Round",
                "logic_expression": "value == 100",
                "severity": "INFO"
            },
            {
                "rule_id": "1001",
                "name": "Documented Ownership",
                "severity": "WARNING"
            }
        ]
    });

    let bindings = json!({
        "contexts": [
            {
                "context_id": PROCESS_CONTAINER_INTAKE,
                "rules": ["urn:odgs:rule:2021"],
                "required_metric_urns": ["urn:odgs:metric:101"]
            },
            {
                "context_id": PROCESS_FULL_SPECTRUM,
                "rules": [
                    "urn:odgs:rule:2007",
                    "urn:odgs:rule:2020",
                    "urn:odgs:rule:3001",
                    "urn:odgs:rule:1001"
                ]
            },
            {
                "context_id": PROCESS_LEGACY_EXPORT,
                "rules": ["urn:odgs:rule:2007"],
                "required_metric_urns": ["urn:odgs:metric:999"]
            },
            {
                "context_id": PROCESS_ARCHIVED_REPORT,
                "rules": ["urn:odgs:rule:2020"],
                "effective_from": "2019-01-01",
                "effective_until": "2020-12-31"
            }
        ]
    });

    let graph = json!({
        "graph_edges": [
            {
                "source_urn": "urn:odgs:rule:2007",
                "target_urn": PROCESS_PAYMENT_RUN,
                "relationship": "BLOCKS_PROCESS"
            },
            {
                "source_urn": "urn:odgs:rule:2021",
                "target_urn": "urn:odgs:metric:101",
                "relationship": "RELATED_TO"
            }
        ]
    });

    let metrics = json!([
        { "metric_id": 101, "name": "Container Throughput" },
        { "metric_id": 102, "name": "Settlement Accuracy" }
    ]);

    let dq_dimensions = json!([
        { "id": "completeness", "name": "Completeness" },
        { "id": "validity", "name": "Validity" }
    ]);

    let process_maps = json!([
        { "process_urn": PROCESS_CONTAINER_INTAKE, "owner": "logistics" }
    ]);

    let physical_map = json!([
        { "metric_urn": "urn:odgs:metric:101", "table": "shipments", "column": "container_id" }
    ]);

    let root_causes = json!([
        { "id": "rc-01", "name": "Manual entry" }
    ]);

    write_json(root, "judiciary/standard_data_rules.json", &rules)?;
    write_json(root, "executive/context_bindings.json", &bindings)?;
    write_json(root, "legislative/ontology_graph.json", &graph)?;
    write_json(root, "legislative/standard_metrics.json", &metrics)?;
    write_json(root, "legislative/standard_dq_dimensions.json", &dq_dimensions)?;
    write_json(root, "legislative/business_process_maps.json", &process_maps)?;
    write_json(root, "legislative/physical_data_map.json", &physical_map)?;
    write_json(root, "legislative/root_cause_factors.json", &root_causes)?;
    Ok(())
}

fn write_json(root: &Path, rel: &str, value: &serde_json::Value) -> io::Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)
}
