//! Stable DTOs and IDs used across the govgate workspace.
//!
//! This crate is intentionally boring:
//! - data types for decisions, violations, and audit ledger entries
//! - stable string IDs, URN handling, and hash sentinels
//! - no IO, no evaluation logic

#![forbid(unsafe_code)]

pub mod audit;
pub mod ids;
pub mod outcome;
pub mod urn;

pub use audit::{AuditEntry, Evidence, SCHEMA_AUDIT_V1};
pub use outcome::{Outcome, OutcomeKind, Severity, Violation};
pub use urn::Urn;
