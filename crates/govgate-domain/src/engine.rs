//! Rule evaluation and severity classification.

use crate::expr;
use crate::model::PlaneSet;
use crate::resolver::ResolvedContext;
use govgate_types::{ids, Severity, Urn, Violation};
use serde_json::{Map, Value};
use time::Date;

#[derive(Clone, Debug, PartialEq)]
pub enum RuleStatus {
    Passed,
    /// The expression evaluated to false.
    Failed,
    /// The expression could not be evaluated. Counts as a failure.
    Error { detail: String },
    /// An active rule URN with no definition in the judiciary plane.
    NotFound,
}

/// Per-rule evaluation result for one intercept call.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleOutcome {
    pub rule_urn: Urn,
    pub rule_name: String,
    pub severity: Severity,
    pub status: RuleStatus,
    pub expression: Option<String>,
}

impl RuleOutcome {
    pub fn passed(&self) -> bool {
        matches!(self.status, RuleStatus::Passed)
    }
}

/// Evaluate every active rule against the payload. All rules run to completion
/// regardless of earlier failures, so one call reports every violation.
pub fn evaluate_rules(
    planes: &PlaneSet,
    resolved: &ResolvedContext,
    payload: &Map<String, Value>,
    as_of: Date,
) -> Vec<RuleOutcome> {
    let mut outcomes = Vec::with_capacity(resolved.rule_urns.len());

    for urn in &resolved.rule_urns {
        let Some(rule) = planes.rule(urn) else {
            outcomes.push(RuleOutcome {
                rule_urn: urn.clone(),
                rule_name: String::new(),
                severity: Severity::Warning,
                status: RuleStatus::NotFound,
                expression: None,
            });
            continue;
        };

        // A rule without executable logic is vacuously satisfied.
        let Some(expression) = rule.logic_expression.as_deref() else {
            outcomes.push(RuleOutcome {
                rule_urn: urn.clone(),
                rule_name: rule.name.clone(),
                severity: rule.severity,
                status: RuleStatus::Passed,
                expression: None,
            });
            continue;
        };

        let status = match expr::evaluate(expression, payload, as_of) {
            Ok(true) => RuleStatus::Passed,
            Ok(false) => RuleStatus::Failed,
            Err(err) => RuleStatus::Error {
                detail: err.to_string(),
            },
        };

        outcomes.push(RuleOutcome {
            rule_urn: urn.clone(),
            rule_name: rule.name.clone(),
            severity: rule.severity,
            status,
            expression: Some(expression.to_string()),
        });
    }

    outcomes
}

/// Failing outcomes split by severity.
#[derive(Clone, Debug, Default)]
pub struct Classified {
    /// HARD_STOP failures: these block the process.
    pub violations: Vec<Violation>,
    /// WARNING failures and unresolvable rule URNs: recorded, non-blocking.
    pub warnings: Vec<Violation>,
    /// INFO failures: recorded only.
    pub infos: Vec<Violation>,
}

pub fn classify(outcomes: &[RuleOutcome]) -> Classified {
    let mut classified = Classified::default();

    for outcome in outcomes {
        let violation = match &outcome.status {
            RuleStatus::Passed => continue,
            RuleStatus::Failed => Violation {
                rule_urn: outcome.rule_urn.clone(),
                rule_name: outcome.rule_name.clone(),
                severity: outcome.severity,
                code: ids::CODE_EXPRESSION_FALSE.to_string(),
                message: format!(
                    "rule {} ({}) failed: expression '{}' evaluated to false",
                    rule_id_of(&outcome.rule_urn),
                    outcome.rule_name,
                    outcome.expression.as_deref().unwrap_or(""),
                ),
            },
            RuleStatus::Error { detail } => Violation {
                rule_urn: outcome.rule_urn.clone(),
                rule_name: outcome.rule_name.clone(),
                severity: outcome.severity,
                code: ids::CODE_EXPRESSION_ERROR.to_string(),
                message: format!(
                    "rule {} ({}) failed: {}",
                    rule_id_of(&outcome.rule_urn),
                    outcome.rule_name,
                    detail,
                ),
            },
            RuleStatus::NotFound => Violation {
                rule_urn: outcome.rule_urn.clone(),
                rule_name: outcome.rule_name.clone(),
                severity: Severity::Warning,
                code: ids::CODE_RULE_NOT_FOUND.to_string(),
                message: format!(
                    "rule definition not found for {}",
                    outcome.rule_urn
                ),
            },
        };

        match violation.severity {
            Severity::HardStop => classified.violations.push(violation),
            Severity::Warning => classified.warnings.push(violation),
            Severity::Info => classified.infos.push(violation),
        }
    }

    classified
}

fn rule_id_of(urn: &Urn) -> &str {
    urn.id_segment().unwrap_or(urn.as_str())
}

/// Referential check: every metric a binding requires must exist in the
/// legislative metrics plane. Unknown metrics are warnings, not blockers.
pub fn check_required_metrics(planes: &PlaneSet, resolved: &ResolvedContext) -> Vec<Violation> {
    resolved
        .required_metric_urns
        .iter()
        .filter(|urn| !planes.metric_urns.contains(urn))
        .map(|urn| Violation {
            rule_urn: urn.clone(),
            rule_name: String::new(),
            severity: Severity::Warning,
            code: ids::CODE_UNKNOWN_METRIC.to_string(),
            message: format!(
                "context {} requires metric {} which is not in the metrics plane",
                resolved.context_id, urn
            ),
        })
        .collect()
}
