//! The append-only audit ledger.
//!
//! Entries are serialized as single-line JSON and appended to a daily file
//! `audit_<YYYY-MM-DD>.jsonl` under the ledger directory. When the directory
//! is inside a git work tree, each append is committed so the ledger gains an
//! externally verifiable history. Git failure never fails the decision path;
//! the receipt carries a `degraded` flag instead.

#![forbid(unsafe_code)]

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use govgate_types::AuditEntry;
use std::io::Write;
use std::process::Command;
use time::macros::format_description;

/// Where (and how durably) an entry landed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteReceipt {
    /// Daily ledger file the entry was appended to.
    pub path: Utf8PathBuf,
    /// Commit hash anchoring this entry, when git anchoring succeeded.
    pub committed: Option<String>,
    /// True when the entry is on disk but not anchored in git.
    pub degraded: bool,
}

/// Append-only sink over a ledger directory.
///
/// Opening the sink creates the directory; it does not initialize a git
/// repository. Anchoring activates only when the operator has already placed
/// the ledger under version control.
#[derive(Debug)]
pub struct AuditSink {
    dir: Utf8PathBuf,
}

impl AuditSink {
    /// Open (creating if needed) the ledger directory.
    pub fn open(dir: &Utf8Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create audit ledger directory {dir}"))?;
        Ok(Self {
            dir: dir.to_owned(),
        })
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Append one entry to today's ledger file and best-effort anchor it.
    ///
    /// The append is fatal on failure (an unrecorded decision must not look
    /// recorded); the git anchoring is not.
    pub fn write(&self, entry: &AuditEntry) -> anyhow::Result<WriteReceipt> {
        let path = self.dir.join(daily_file_name(entry)?);
        let line = serde_json::to_string(entry).context("serialize audit entry")?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open ledger file {path}"))?;
        writeln!(file, "{line}").with_context(|| format!("append to ledger file {path}"))?;

        match self.anchor(&path, entry) {
            Ok(commit) => Ok(WriteReceipt {
                path,
                committed: Some(commit),
                degraded: false,
            }),
            Err(err) => {
                tracing::warn!(
                    event_id = %entry.event_id,
                    error = %format!("{err:#}"),
                    "audit entry written but not git-anchored"
                );
                Ok(WriteReceipt {
                    path,
                    committed: None,
                    degraded: true,
                })
            }
        }
    }

    fn anchor(&self, path: &Utf8Path, entry: &AuditEntry) -> anyhow::Result<String> {
        let file_name = path.file_name().context("ledger path has no file name")?;

        run_git(&self.dir, &["add", file_name])?;
        let message = format!(
            "Audit: {} [Event: {}]",
            entry.outcome.label(),
            entry.event_id
        );
        run_git(&self.dir, &["commit", "-m", &message])?;

        let head = run_git(&self.dir, &["rev-parse", "HEAD"])?;
        Ok(head.trim().to_string())
    }
}

fn run_git(dir: &Utf8Path, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .context("spawn git")?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.first().copied().unwrap_or_default(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn daily_file_name(entry: &AuditEntry) -> anyhow::Result<String> {
    let format = format_description!("[year]-[month]-[day]");
    let date = entry
        .timestamp
        .date()
        .format(&format)
        .context("format ledger date")?;
    Ok(format!("audit_{date}.jsonl"))
}
