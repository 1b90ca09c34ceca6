//! Use case orchestration for govgate.
//!
//! This crate provides the application layer: the interceptor that coordinates
//! integrity checking, context resolution, rule evaluation, and the audit
//! ledger. It is intentionally thin and delegates heavy lifting to the domain
//! and plane layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod fingerprint;
mod intercept;

pub use fingerprint::{run_fingerprint, FingerprintReport, SCHEMA_FINGERPRINT_V1};
pub use intercept::{Decision, Interceptor};
