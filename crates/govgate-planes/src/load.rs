//! Parse-and-validate for the governed artifacts.
//!
//! The artifacts are externally authored JSON and exist in a couple of shapes
//! in the wild (bare arrays vs. wrapped in a keyed object); both are accepted.
//! Required fields fail fast; defaults for the rest are documented per field.

use crate::PlaneError;
use govgate_domain::model::{ContextBinding, OntologyEdge, Rule};
use govgate_types::{Severity, Urn};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use time::macros::format_description;
use time::Date;

/// Parse the judiciary rules artifact into a URN-indexed map.
///
/// Accepted shapes: `{"rules": [...]}`, a bare array, or a single rule object.
/// Required: `rule_id`. Defaults: `severity` -> WARNING, `name` -> empty.
pub fn parse_rules(path: &str, text: &str) -> Result<BTreeMap<Urn, Rule>, PlaneError> {
    let value = parse_json(path, text)?;
    let items = unwrap_list(&value, "rules");

    let mut rules = BTreeMap::new();
    for item in items {
        let rule = parse_rule(path, item)?;
        rules.insert(rule.urn.clone(), rule);
    }
    Ok(rules)
}

fn parse_rule(path: &str, item: &Value) -> Result<Rule, PlaneError> {
    let obj = item.as_object().ok_or_else(|| invalid(path, "rule entry is not an object"))?;

    let rule_id = match obj.get("rule_id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(invalid(path, "rule entry is missing 'rule_id'")),
    };

    let severity = match obj.get("severity").and_then(Value::as_str) {
        None => Severity::Warning,
        Some(s) => parse_severity(s)
            .ok_or_else(|| invalid(path, &format!("rule {rule_id} has unknown severity '{s}'")))?,
    };

    Ok(Rule {
        urn: Urn::rule(&rule_id),
        rule_id,
        name: str_field(obj, "name").unwrap_or_default(),
        domain: str_field(obj, "domain"),
        logic_expression: str_field(obj, "logic_expression"),
        severity,
        owner: str_field(obj, "owner"),
    })
}

fn parse_severity(s: &str) -> Option<Severity> {
    match s {
        "HARD_STOP" => Some(Severity::HardStop),
        "WARNING" => Some(Severity::Warning),
        "INFO" => Some(Severity::Info),
        _ => None,
    }
}

/// Parse the executive context bindings artifact.
///
/// Accepted shapes: `{"contexts": [...]}` or a bare array. Required:
/// `context_id`. `rules` is accepted as an alias for `rule_urns`.
pub fn parse_bindings(path: &str, text: &str) -> Result<Vec<ContextBinding>, PlaneError> {
    let value = parse_json(path, text)?;
    let items = unwrap_list(&value, "contexts");

    items
        .iter()
        .map(|item| {
            let obj = item
                .as_object()
                .ok_or_else(|| invalid(path, "context entry is not an object"))?;

            let context_id = str_field(obj, "context_id")
                .ok_or_else(|| invalid(path, "context entry is missing 'context_id'"))?;

            let rule_urns = urn_list(obj.get("rule_urns").or_else(|| obj.get("rules")));
            let required_metric_urns = urn_list(
                obj.get("required_metric_urns")
                    .or_else(|| obj.get("required_metrics")),
            );

            Ok(ContextBinding {
                effective_from: date_field(path, obj, "effective_from")?,
                effective_until: date_field(path, obj, "effective_until")?,
                context_id,
                required_metric_urns,
                rule_urns,
            })
        })
        .collect()
}

/// Parse the legislative ontology graph artifact.
///
/// Accepted shapes: `{"graph_edges": [...]}` or a bare array. All three edge
/// fields are required.
pub fn parse_edges(path: &str, text: &str) -> Result<Vec<OntologyEdge>, PlaneError> {
    let value = parse_json(path, text)?;
    let items = unwrap_list(&value, "graph_edges");

    items
        .iter()
        .map(|item| {
            let obj = item
                .as_object()
                .ok_or_else(|| invalid(path, "graph edge is not an object"))?;
            let field = |key: &str| {
                str_field(obj, key)
                    .ok_or_else(|| invalid(path, &format!("graph edge is missing '{key}'")))
            };
            Ok(OntologyEdge {
                source_urn: Urn::new(field("source_urn")?),
                target_urn: Urn::new(field("target_urn")?),
                relationship: field("relationship")?,
            })
        })
        .collect()
}

/// Parse the legislative metrics artifact into the set of known metric URNs.
///
/// Accepted shapes: `{"metrics": [...]}` or a bare array. Each entry needs an
/// explicit `urn` or a `metric_id` to derive one from.
pub fn parse_metrics(path: &str, text: &str) -> Result<BTreeSet<Urn>, PlaneError> {
    let value = parse_json(path, text)?;
    let items = unwrap_list(&value, "metrics");

    items
        .iter()
        .map(|item| {
            let obj = item
                .as_object()
                .ok_or_else(|| invalid(path, "metric entry is not an object"))?;
            if let Some(urn) = str_field(obj, "urn") {
                return Ok(Urn::new(urn));
            }
            match obj.get("metric_id") {
                Some(Value::String(s)) => Ok(Urn::new(format!("urn:odgs:metric:{s}"))),
                Some(Value::Number(n)) => Ok(Urn::new(format!("urn:odgs:metric:{n}"))),
                _ => Err(invalid(path, "metric entry has neither 'urn' nor 'metric_id'")),
            }
        })
        .collect()
}

fn parse_json(path: &str, text: &str) -> Result<Value, PlaneError> {
    serde_json::from_str(text).map_err(|source| PlaneError::Json {
        path: path.to_string(),
        source,
    })
}

/// Accept `{"<key>": [...]}`, a bare array, or a single object.
fn unwrap_list<'a>(value: &'a Value, key: &str) -> Vec<&'a Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(obj) => match obj.get(key) {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => vec![value],
        },
        _ => Vec::new(),
    }
}

fn urn_list(value: Option<&Value>) -> Vec<Urn> {
    match value {
        Some(Value::Array(items)) => {
            items.iter().filter_map(Value::as_str).map(Urn::new).collect()
        }
        _ => Vec::new(),
    }
}

fn str_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn date_field(
    path: &str,
    obj: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<Date>, PlaneError> {
    let Some(text) = str_field(obj, key) else {
        return Ok(None);
    };
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(&text, &format)
        .map(Some)
        .map_err(|_| invalid(path, &format!("'{key}' is not a YYYY-MM-DD date: {text}")))
}

fn invalid(path: &str, reason: &str) -> PlaneError {
    PlaneError::Invalid {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wrapped_and_bare_rule_lists() {
        let wrapped = r#"{"rules": [{"rule_id": 2007, "name": "Positive", "severity": "HARD_STOP", "logic_expression": "value > 0"}]}"#;
        let rules = parse_rules("r.json", wrapped).expect("parse");
        let rule = rules.get(&Urn::rule("2007")).expect("rule");
        assert_eq!(rule.severity, Severity::HardStop);
        assert_eq!(rule.logic_expression.as_deref(), Some("value > 0"));

        let bare = r#"[{"rule_id": "2021", "name": "Container"}]"#;
        let rules = parse_rules("r.json", bare).expect("parse");
        // Severity defaults to WARNING when absent.
        assert_eq!(rules.get(&Urn::rule("2021")).expect("rule").severity, Severity::Warning);
    }

    #[test]
    fn single_rule_object_is_accepted() {
        let single = r#"{"rule_id": "1", "name": "Solo"}"#;
        let rules = parse_rules("r.json", single).expect("parse");
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn rule_without_id_fails_fast() {
        let err = parse_rules("r.json", r#"[{"name": "anonymous"}]"#).expect_err("must fail");
        assert!(err.to_string().contains("rule_id"));
    }

    #[test]
    fn unknown_severity_fails_fast() {
        let err = parse_rules("r.json", r#"[{"rule_id": "1", "severity": "FATAL"}]"#)
            .expect_err("must fail");
        assert!(err.to_string().contains("FATAL"));
    }

    #[test]
    fn parses_bindings_with_rules_alias_and_dates() {
        let text = r#"{"contexts": [{
            "context_id": "urn:odgs:process:intake",
            "rules": ["urn:odgs:rule:2021"],
            "effective_from": "2025-01-01",
            "effective_until": "2025-12-31"
        }]}"#;
        let bindings = parse_bindings("c.json", text).expect("parse");
        assert_eq!(bindings[0].rule_urns, vec![Urn::rule("2021")]);
        assert!(bindings[0].effective_from.is_some());
        assert!(bindings[0].effective_until.is_some());
    }

    #[test]
    fn malformed_binding_date_fails_fast() {
        let text = r#"[{"context_id": "x", "effective_from": "January 2025"}]"#;
        assert!(parse_bindings("c.json", text).is_err());
    }

    #[test]
    fn parses_graph_edges() {
        let text = r#"{"graph_edges": [{
            "source_urn": "urn:odgs:rule:2021",
            "target_urn": "urn:odgs:process:shipping",
            "relationship": "BLOCKS_PROCESS"
        }]}"#;
        let edges = parse_edges("g.json", text).expect("parse");
        assert_eq!(edges[0].relationship, "BLOCKS_PROCESS");
    }

    #[test]
    fn edge_missing_field_fails_fast() {
        let text = r#"[{"source_urn": "urn:odgs:rule:1"}]"#;
        assert!(parse_edges("g.json", text).is_err());
    }

    #[test]
    fn parses_metrics_by_urn_or_id() {
        let text = r#"[{"urn": "urn:odgs:metric:101"}, {"metric_id": 102}]"#;
        let metrics = parse_metrics("m.json", text).expect("parse");
        assert!(metrics.contains(&Urn::new("urn:odgs:metric:101")));
        assert!(metrics.contains(&Urn::new("urn:odgs:metric:102")));
    }

    #[test]
    fn invalid_json_reports_the_artifact_path() {
        let err = parse_rules("judiciary/standard_data_rules.json", "{not json")
            .expect_err("must fail");
        assert!(err.to_string().contains("judiciary/standard_data_rules.json"));
    }
}
