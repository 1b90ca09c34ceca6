//! CLI entry point for govgate.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `govgate-app` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use govgate_app::{run_fingerprint, Interceptor};
use govgate_settings::Overrides;
use govgate_types::Outcome;
use std::io::Read;

// Exit codes are part of the contract: pipelines branch on them.
const EXIT_APPROVED: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_BLOCKED: i32 = 2;
const EXIT_SECURITY_REJECTED: i32 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "govgate",
    version,
    about = "Policy enforcement gate with attestable rule sets and an audit ledger"
)]
struct Cli {
    /// Governance root (directory containing the executive/judiciary/legislative planes).
    #[arg(long, default_value = ".")]
    governance_root: Utf8PathBuf,

    /// Path to govgate config TOML, relative to the governance root.
    #[arg(long, default_value = "govgate.toml")]
    config: Utf8PathBuf,

    /// Override the audit ledger directory.
    #[arg(long)]
    audit_dir: Option<String>,

    /// Override the evaluation date for temporal bindings (YYYY-MM-DD).
    #[arg(long)]
    as_of: Option<String>,

    /// Reject intercept calls that do not present a claimed hash.
    #[arg(long)]
    require_handshake: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a payload against the rules governing a process.
    Intercept {
        /// Process URN (e.g. urn:odgs:process:container_intake).
        #[arg(long)]
        process: String,

        /// Path to the JSON payload object, or '-' for stdin.
        #[arg(long)]
        payload: String,

        /// Caller-claimed master hash (the handshake).
        #[arg(long)]
        claimed_hash: Option<String>,
    },

    /// Print the master hash and per-artifact digests of the governance root.
    Fingerprint,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Intercept {
            ref process,
            ref payload,
            ref claimed_hash,
        } => cmd_intercept(&cli, process, payload, claimed_hash.as_deref()),
        Commands::Fingerprint => cmd_fingerprint(&cli),
    }
}

fn cmd_intercept(
    cli: &Cli,
    process: &str,
    payload: &str,
    claimed_hash: Option<&str>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let root = governance_root(cli)?;
        let payload = read_payload(payload)?;

        // Missing config file is allowed; defaults apply.
        let cfg_text = std::fs::read_to_string(root.join(&cli.config)).unwrap_or_default();
        let cfg = if cfg_text.trim().is_empty() {
            govgate_settings::GovgateConfigV1::default()
        } else {
            govgate_settings::parse_config_toml(&cfg_text).context("parse config")?
        };
        let settings = govgate_settings::resolve_config(
            cfg,
            Overrides {
                audit_dir: cli.audit_dir.clone(),
                as_of: cli.as_of.clone(),
                require_handshake: cli.require_handshake.then_some(true),
            },
        )
        .context("resolve config")?;

        let gate = Interceptor::new(&root, settings)?;
        let decision = gate.intercept(process, &payload, claimed_hash)?;

        println!(
            "{}",
            serde_json::to_string_pretty(&decision.entry).context("serialize decision")?
        );

        Ok(match decision.outcome {
            Outcome::Approved => EXIT_APPROVED,
            Outcome::Blocked { .. } => EXIT_BLOCKED,
            Outcome::SecurityRejected { .. } => EXIT_SECURITY_REJECTED,
        })
    })();

    exit_with(result)
}

fn cmd_fingerprint(cli: &Cli) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let root = governance_root(cli)?;
        let report = run_fingerprint(&root);
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize fingerprint")?
        );
        Ok(EXIT_APPROVED)
    })();

    exit_with(result)
}

fn governance_root(cli: &Cli) -> anyhow::Result<Utf8PathBuf> {
    let root = cli
        .governance_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.governance_root.clone());
    if !root.exists() {
        anyhow::bail!("governance root does not exist: {root}");
    }
    Ok(root)
}

fn read_payload(source: &str) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read payload from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("read payload file {source}"))?
    };

    let value: serde_json::Value =
        serde_json::from_str(&text).context("payload is not valid JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => anyhow::bail!(
            "payload must be a JSON object, got {}",
            json_kind(&other)
        ),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn exit_with(result: anyhow::Result<i32>) -> anyhow::Result<()> {
    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("govgate error: {err:#}");
            std::process::exit(EXIT_ERROR);
        }
    }
}
