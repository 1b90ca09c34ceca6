//! The `intercept` use case: decide, prove, record.
//!
//! Every call follows the same spine regardless of outcome: hash the payload,
//! fingerprint the governance root, verify the handshake, resolve the active
//! rule set, evaluate every rule, then write exactly one ledger entry. The
//! ledger write happens for rejections too; a decision that is not recorded
//! did not happen.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use govgate_audit::{AuditSink, WriteReceipt};
use govgate_domain::hash::canonical_json_hash;
use govgate_domain::model::PlaneSet;
use govgate_settings::ResolvedConfig;
use govgate_types::{AuditEntry, Evidence, Outcome, Violation, SCHEMA_AUDIT_V1};
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// Everything one intercept call produced: the decision value, the ledger
/// entry as written, and where it landed.
#[derive(Clone, Debug)]
pub struct Decision {
    pub outcome: Outcome,
    pub entry: AuditEntry,
    pub audit: WriteReceipt,
}

/// A loaded enforcement point over one governance root.
///
/// Construction is fail-fast: an unreadable or malformed required plane is a
/// configuration error and no interceptor is built. Per-call anomalies after
/// that never panic; they become outcomes.
pub struct Interceptor {
    root: Utf8PathBuf,
    planes: PlaneSet,
    sink: AuditSink,
    settings: ResolvedConfig,
}

impl Interceptor {
    pub fn new(root: &Utf8Path, settings: ResolvedConfig) -> anyhow::Result<Self> {
        let planes = govgate_planes::load_planes(root)
            .with_context(|| format!("load governance planes from {root}"))?;

        let audit_dir = if settings.audit_dir.is_absolute() {
            settings.audit_dir.clone()
        } else {
            root.join(&settings.audit_dir)
        };
        let sink = AuditSink::open(&audit_dir)?;

        Ok(Self {
            root: root.to_owned(),
            planes,
            sink,
            settings,
        })
    }

    /// Evaluate `payload` against the rules governing `process_urn`.
    ///
    /// `claimed_hash` is the caller's handshake: the master hash it believes
    /// the governance root has. A mismatch rejects before any rule runs. An
    /// absent handshake is tolerated unless `require_handshake` is set.
    ///
    /// Errors only on ledger append failure; every policy-level anomaly is an
    /// `Outcome`, not an `Err`.
    pub fn intercept(
        &self,
        process_urn: &str,
        payload: &Map<String, Value>,
        claimed_hash: Option<&str>,
    ) -> anyhow::Result<Decision> {
        let input_hash = canonical_json_hash(&Value::Object(payload.clone()));
        let fingerprint = govgate_planes::fingerprint(&self.root);
        let definition_hash = fingerprint.master_hash;

        if let Some(rejection) = self.handshake_rejection(&definition_hash, claimed_hash) {
            let evidence = Evidence {
                config_hash: canonical_json_hash(&Value::Null),
                tripartite_binding: tripartite(
                    &input_hash,
                    &definition_hash,
                    &canonical_json_hash(&Value::Null),
                ),
                input_hash,
                definition_hash,
                context_id: None,
                rule_count: 0,
            };
            return self.record(process_urn, rejection, vec![], evidence);
        }

        let resolved = govgate_domain::resolve(&self.planes, process_urn, self.settings.as_of);
        if let Some(ctx) = &resolved
            && ctx.source == govgate_domain::ResolutionSource::OntologyFallback
        {
            tracing::debug!(
                process = process_urn,
                rules = ctx.rule_urns.len(),
                "no context binding; governed via ontology edges"
            );
        }

        let (config_hash, context_id, outcomes) = match &resolved {
            Some(ctx) => {
                let ctx_value =
                    serde_json::to_value(ctx).context("serialize resolved context")?;
                let outcomes = govgate_domain::evaluate_rules(
                    &self.planes,
                    ctx,
                    payload,
                    self.settings.as_of,
                );
                (
                    canonical_json_hash(&ctx_value),
                    Some(ctx.context_id.clone()),
                    outcomes,
                )
            }
            // Ungoverned process: nothing to evaluate, decision still recorded.
            None => (canonical_json_hash(&Value::Null), None, vec![]),
        };

        let classified = govgate_domain::classify(&outcomes);
        let outcome = if classified.violations.is_empty() {
            Outcome::Approved
        } else {
            Outcome::Blocked {
                violations: classified.violations.clone(),
            }
        };

        let mut warnings = classified.warnings;
        warnings.extend(classified.infos);
        if let Some(ctx) = &resolved {
            warnings.extend(govgate_domain::check_required_metrics(&self.planes, ctx));
        }

        let evidence = Evidence {
            tripartite_binding: tripartite(&input_hash, &definition_hash, &config_hash),
            input_hash,
            definition_hash,
            config_hash,
            context_id,
            rule_count: outcomes.len() as u32,
        };

        self.record(process_urn, outcome, warnings, evidence)
    }

    fn handshake_rejection(
        &self,
        definition_hash: &str,
        claimed_hash: Option<&str>,
    ) -> Option<Outcome> {
        match claimed_hash {
            Some(claimed) if claimed != definition_hash => Some(Outcome::SecurityRejected {
                expected: definition_hash.to_string(),
                actual: claimed.to_string(),
            }),
            Some(_) => None,
            None if self.settings.require_handshake => Some(Outcome::SecurityRejected {
                expected: definition_hash.to_string(),
                actual: String::new(),
            }),
            None => None,
        }
    }

    fn record(
        &self,
        process_urn: &str,
        outcome: Outcome,
        warnings: Vec<Violation>,
        evidence: Evidence,
    ) -> anyhow::Result<Decision> {
        let violations = match &outcome {
            Outcome::Blocked { violations } => violations.clone(),
            _ => vec![],
        };

        let entry = AuditEntry {
            schema: SCHEMA_AUDIT_V1.to_string(),
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: OffsetDateTime::now_utc(),
            process_urn: process_urn.to_string(),
            outcome: outcome.kind(),
            violations,
            warnings,
            evidence,
        };

        let audit = self.sink.write(&entry).context("write audit entry")?;
        tracing::info!(
            event_id = %entry.event_id,
            process = %entry.process_urn,
            outcome = entry.outcome.label(),
            violations = entry.violations.len(),
            degraded = audit.degraded,
            "intercept decision recorded"
        );

        Ok(Decision {
            outcome,
            entry,
            audit,
        })
    }
}

/// Compact three-segment proof: the first 8 hex chars of each evidence hash.
fn tripartite(input_hash: &str, definition_hash: &str, config_hash: &str) -> String {
    let prefix = |h: &str| h.chars().take(8).collect::<String>();
    format!(
        "{}:{}:{}",
        prefix(input_hash),
        prefix(definition_hash),
        prefix(config_hash)
    )
}
